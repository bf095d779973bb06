//! # Configuration
//!
//! Optional TOML file supplying defaults for the CLI. Every field has a
//! default, so an empty file (or no file at all) is valid:
//!
//! ```toml
//! [defaults]
//! mode = "alpha"
//! use_delimiter = true
//! delimiter = "~END~"
//! format = "png"
//!
//! [logging]
//! level = "debug"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Result, StegoError};
use crate::processing::OutputFormat;
use crate::stego::{EmbeddingMode, TerminationPolicy, DEFAULT_DELIMITER};

/// Load a TOML configuration file and deserialize it into the specified type.
///
/// # Errors
/// - [`StegoError::Config`] if the file cannot be read or parsed
///
/// # Example
/// ```ignore
/// let config: StegoConfig = load_config("stego.toml")?;
/// ```
pub fn load_config<T>(path: impl AsRef<Path>) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let path = path.as_ref();
    let config_error = |reason: String| StegoError::Config {
        path: path.to_path_buf(),
        reason,
    };

    let content = fs::read_to_string(path).map_err(|e| config_error(e.to_string()))?;
    let config: T = toml::from_str(&content).map_err(|e| config_error(e.to_string()))?;
    Ok(config)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StegoConfig {
    pub defaults: DefaultsConfig,
    pub logging: LoggingConfig,
}

/// Values used when the matching CLI flag is not given.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Channels used for embedding
    pub mode: EmbeddingMode,
    /// Delimiter termination when true, zero-byte termination otherwise
    pub use_delimiter: bool,
    pub delimiter: String,
    /// Output format override; the output path's extension decides when unset
    pub format: Option<OutputFormat>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            mode: EmbeddingMode::Rgb,
            use_delimiter: false,
            delimiter: DEFAULT_DELIMITER.to_string(),
            format: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of off, error, warn, info, debug, trace
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl StegoConfig {
    /// Read `path` if given, otherwise fall back to built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => load_config(path),
            None => Ok(Self::default()),
        }
    }

    /// Termination policy from the `--use-delimiter` flag and an optional
    /// `--delimiter` override, falling back to the configured defaults.
    /// Passing a delimiter implies delimiter termination.
    pub fn termination(&self, use_delimiter: bool, delimiter: Option<&str>) -> TerminationPolicy {
        if use_delimiter || delimiter.is_some() || self.defaults.use_delimiter {
            let delimiter = delimiter.unwrap_or(&self.defaults.delimiter);
            TerminationPolicy::DelimiterScan(delimiter.to_string())
        } else {
            TerminationPolicy::ZeroByteSentinel
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: StegoConfig = toml::from_str("").unwrap();
        assert_eq!(config.defaults.mode, EmbeddingMode::Rgb);
        assert!(!config.defaults.use_delimiter);
        assert_eq!(config.defaults.delimiter, "~END~");
        assert_eq!(config.defaults.format, None);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[defaults]\nmode = \"alpha\"\nuse_delimiter = true\ndelimiter = \"##\"\nformat = \"jpg\"\n\n[logging]\nlevel = \"debug\""
        )
        .unwrap();

        let config: StegoConfig = load_config(file.path()).unwrap();
        assert_eq!(config.defaults.mode, EmbeddingMode::Alpha);
        assert!(config.defaults.use_delimiter);
        assert_eq!(config.defaults.delimiter, "##");
        assert_eq!(config.defaults.format, Some(OutputFormat::Jpeg));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_bad_mode_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[defaults]\nmode = \"cmyk\"").unwrap();

        let result: Result<StegoConfig> = load_config(file.path());
        assert!(matches!(result, Err(StegoError::Config { .. })));
    }

    #[test]
    fn test_termination_resolution() {
        let config = StegoConfig::default();
        assert_eq!(config.termination(false, None), TerminationPolicy::ZeroByteSentinel);
        assert_eq!(
            config.termination(true, None),
            TerminationPolicy::DelimiterScan("~END~".to_string())
        );
        assert_eq!(
            config.termination(false, Some("<>")),
            TerminationPolicy::DelimiterScan("<>".to_string())
        );

        let mut config = StegoConfig::default();
        config.defaults.use_delimiter = true;
        assert_eq!(
            config.termination(false, None),
            TerminationPolicy::DelimiterScan("~END~".to_string())
        );
    }
}
