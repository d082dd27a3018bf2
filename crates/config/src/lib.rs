//! # stepdoc-config
//!
//! Configuration schema, validation, and normalization logic for the CLI.
//! This crate depends on `domain` and `shared` only.

/// Environment variable parsing and merging.
pub mod env;
/// Config loading helpers (file + env + overrides).
pub mod load;
/// Configuration schema types and helpers.
pub mod schema;

pub use schema::{
    CURRENT_CONFIG_VERSION, ConfigSchemaError, OutputConfig, ScanConfig, StepdocConfig,
    ValidatedConfig, parse_config_json, parse_config_toml,
};

pub use env::{EnvParseError, StepdocEnv, apply_env_overrides};
pub use load::{
    ConfigFormat, ConfigOverrides, load_config_from_path, load_config_from_sources,
    load_config_std_env, to_pretty_json, to_pretty_toml,
};

/// Returns the config crate version.
#[must_use]
pub const fn config_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
