//! kb tags / tag-add command implementations.

use crate::config::Config;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::tag::TagRegistry;

/// Options for the tags command
pub struct LsOptions {
    pub config: Config,
    pub json: bool,
    pub quiet: bool,
}

/// Options for the tag-add command
pub struct AddOptions {
    pub name: String,
    pub color: String,
    pub config: Config,
    pub json: bool,
    pub quiet: bool,
}

pub fn run_ls(options: LsOptions) -> Result<()> {
    let runtime = super::runtime()?;
    let remote = super::connect(&options.config)?;
    let tags = runtime.block_on(remote.list_tags())?;

    let mut human = HumanOutput::new(format!("{} tags", tags.len()));
    for tag in &tags {
        human.push_detail(format!("#{} {} ({})", tag.id, tag.name, tag.color));
    }
    emit_success(
        OutputOptions { json: options.json, quiet: options.quiet },
        "tags",
        &tags,
        Some(&human),
    )
}

pub fn run_add(options: AddOptions) -> Result<()> {
    let runtime = super::runtime()?;
    let remote = super::connect(&options.config)?;
    let mut registry = TagRegistry::new();
    let tag = runtime.block_on(registry.create(remote.as_ref(), &options.name, &options.color))?;

    let mut human = HumanOutput::new(format!("Created tag #{}", tag.id));
    human.push_summary("name", tag.name.clone());
    human.push_summary("color", tag.color.clone());
    emit_success(
        OutputOptions { json: options.json, quiet: options.quiet },
        "tag-add",
        &tag,
        Some(&human),
    )
}
