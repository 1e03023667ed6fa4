//! kb board command implementation: launches the interactive TUI.

use crate::config::Config;
use crate::error::Result;
use crate::prefs::FilePrefStore;
use crate::task::Column;
use crate::ui;

/// Options for the board command
pub struct BoardOptions {
    pub config: Config,
}

pub fn run(options: BoardOptions) -> Result<()> {
    let start_column = Column::parse(&options.config.board.default_column)?;
    let runtime = super::runtime()?;
    let remote = super::connect(&options.config)?;
    let prefs = FilePrefStore::open();
    ui::board::run(runtime, remote, prefs, start_column)
}
