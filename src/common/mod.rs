//! # Common Components
//!
//! - [`config`]: TOML configuration for CLI defaults

pub mod config;

pub use config::{load_config, StegoConfig};
