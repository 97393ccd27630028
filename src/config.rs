//! Configuration file parsing and validation

pub mod lintel_toml;

pub use lintel_toml::{CONFIG_FILE_NAME, Config, LintelMeta, LintersConfig, PatternDefinition};
