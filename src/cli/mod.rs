//! CLI command handling

pub mod config_cmd;
pub mod journal_cmd;
pub mod output;

pub use config_cmd::*;
pub use journal_cmd::*;
pub use output::*;
