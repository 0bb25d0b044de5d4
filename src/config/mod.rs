//! Configuration module.
//!
//! Configuration is resolved once at startup and passed by value to whoever
//! needs it; nothing here is global.

pub mod keybindings;
pub mod loader;

pub use keybindings::KeyBindings;
pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_config_path, default_log_path,
    load_config_file, load_config_with_precedence, merge_config, validate, write_default_config,
    CliOverrides, ConfigError, ConfigFile, ResolvedConfig, StoreMode, DEFAULT_COUNT,
};
