//! kb health command implementation.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput, OutputOptions};

/// Options for the health command
pub struct HealthOptions {
    pub config: Config,
    pub json: bool,
    pub quiet: bool,
}

pub fn run(options: HealthOptions) -> Result<()> {
    let runtime = super::runtime()?;
    let remote = super::connect(&options.config)?;
    let healthy = runtime.block_on(remote.health());

    if !healthy {
        return Err(Error::Remote(format!(
            "health check failed for {}",
            options.config.api.base_url
        )));
    }

    let mut human = HumanOutput::new("healthy");
    human.push_summary("api", options.config.api.base_url.clone());
    emit_success(
        OutputOptions { json: options.json, quiet: options.quiet },
        "health",
        &serde_json::json!({ "status": "healthy" }),
        Some(&human),
    )
}
