//! CLI command handlers.

pub mod checksum;
pub mod config;
pub mod session;

pub use checksum::run_checksum;
pub use config::{ConfigShowFormat, run_config_show};
pub use session::{SessionArgs, run_walkthrough};
