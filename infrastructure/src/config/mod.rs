//! Configuration file loading for canonica
//!
//! This module handles file I/O and merging of configuration from multiple
//! sources. The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./canonica.toml` or `./.canonica.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/canonica/config.toml`
//! 4. Fallback: `~/.config/canonica/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileChainConfig, FileConfig, FileLimitsConfig, FileLogoConfig,
    FileProviderConfig, FileSearchConfig,
};
pub use loader::ConfigLoader;
