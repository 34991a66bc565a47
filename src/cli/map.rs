//! Map command: draw the configured buttons on the physical keypad.

use crate::cli::common::{load_error, CliResult};
use crate::export::render_keypad_map;
use crate::parser;
use clap::Args;
use std::path::PathBuf;

/// Show where each configured button sits on the keypad
#[derive(Debug, Clone, Args)]
pub struct MapArgs {
    /// Path to button list (.yaml, .yml, .json or .json5)
    #[arg(short, long, value_name = "FILE")]
    pub buttons: PathBuf,
}

impl MapArgs {
    /// Execute the map command
    pub fn execute(&self) -> CliResult<()> {
        let entries = parser::load_buttons(&self.buttons).map_err(|e| load_error(&e))?;

        print!("{}", render_keypad_map(&entries));
        println!("* hidden from Home Assistant   HA bound to an entity");

        Ok(())
    }
}
