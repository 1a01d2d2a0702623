//! Configuration file loading for snapshot-resolver
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./snapshot-resolver.toml` or `./.snapshot-resolver.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/snapshot-resolver/config.toml`
//! 4. Default values

mod file_config;
mod loader;

pub use file_config::{FileConfig, FileOutputConfig, FileUpstreamConfig};
pub use loader::ConfigLoader;
