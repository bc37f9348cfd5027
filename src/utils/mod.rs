/// TOML configuration of named providers.
pub mod toml_config;
