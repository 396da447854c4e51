//! Run configuration for `relink.toml`.
//!
//! The config file is optional: when absent, built-in defaults apply
//! (the export at `public/knowledgebase.json`, rewritten in place). CLI
//! flags override file values.
//!
//! # Example
//!
//! ```toml
//! [paths]
//! input = "public/knowledgebase.json"
//! output = "public/knowledgebase.relinked.json"
//! ```

mod error;

pub use error::ConfigError;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::cli::Cli;
use crate::log;

/// Default export location, shared by input and output (in-place rewrite).
const DEFAULT_EXPORT: &str = "public/knowledgebase.json";

/// Root configuration structure representing relink.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RelinkConfig {
    /// Input/output path settings
    pub paths: PathsConfig,
}

/// `[paths]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Input JSON export
    pub input: Option<PathBuf>,

    /// Output path (defaults to the input path)
    pub output: Option<PathBuf>,
}

impl RelinkConfig {
    /// Load configuration for this invocation.
    ///
    /// A missing config file is not an error; a present but unreadable or
    /// invalid one is.
    pub fn load(cli: &Cli) -> Result<Self> {
        if !cli.config.exists() {
            return Ok(Self::default());
        }
        let config = Self::from_path(&cli.config)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a config file, warning about unknown fields.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            let display_path = path
                .file_name()
                .map(|n| n.to_string_lossy())
                .unwrap_or_else(|| path.to_string_lossy());
            log!("warning"; "unknown fields in {}, ignoring:", display_path);
            for field in &ignored {
                eprintln!("- {}", field);
            }
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("paths.input", &self.paths.input),
            ("paths.output", &self.paths.output),
        ] {
            if let Some(path) = value
                && path.as_os_str().is_empty()
            {
                return Err(
                    ConfigError::Validation(format!("`{field}` must not be empty")).into(),
                );
            }
        }
        Ok(())
    }

    /// Effective input path: CLI flag, then config file, then the default.
    pub fn input_path(&self, cli_input: Option<&Path>) -> PathBuf {
        cli_input
            .map(Path::to_path_buf)
            .or_else(|| self.paths.input.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT))
    }

    /// Effective output path: CLI flag, then config file, then the input
    /// path (in-place rewrite).
    pub fn output_path(&self, cli_output: Option<&Path>, input: &Path) -> PathBuf {
        cli_output
            .map(Path::to_path_buf)
            .or_else(|| self.paths.output.clone())
            .unwrap_or_else(|| input.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> RelinkConfig {
        let (config, ignored) = RelinkConfig::parse_with_ignored(content).unwrap();
        assert!(
            ignored.is_empty(),
            "test config has unknown fields: {:?}",
            ignored
        );
        config
    }

    #[test]
    fn test_empty_config_yields_defaults() {
        let config = parse("");
        assert_eq!(
            config.input_path(None),
            PathBuf::from("public/knowledgebase.json")
        );
        let input = config.input_path(None);
        assert_eq!(config.output_path(None, &input), input);
    }

    #[test]
    fn test_paths_section_is_read() {
        let config = parse("[paths]\ninput = \"kb.json\"\noutput = \"kb.out.json\"");
        assert_eq!(config.input_path(None), PathBuf::from("kb.json"));
        assert_eq!(
            config.output_path(None, &config.input_path(None)),
            PathBuf::from("kb.out.json")
        );
    }

    #[test]
    fn test_cli_flag_overrides_config_file() {
        let config = parse("[paths]\ninput = \"kb.json\"");
        let cli_input = PathBuf::from("other.json");
        assert_eq!(config.input_path(Some(&cli_input)), cli_input);
    }

    #[test]
    fn test_output_falls_back_to_input() {
        let config = parse("[paths]\ninput = \"kb.json\"");
        let input = config.input_path(None);
        assert_eq!(config.output_path(None, &input), PathBuf::from("kb.json"));
    }

    #[test]
    fn test_unknown_fields_are_collected() {
        let (_, ignored) =
            RelinkConfig::parse_with_ignored("[paths]\ninput = \"kb.json\"\ntypo = 1").unwrap();
        assert!(ignored.iter().any(|f| f.contains("typo")));
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(RelinkConfig::parse_with_ignored("[paths\ninput =").is_err());
    }

    #[test]
    fn test_empty_path_fails_validation() {
        let config = parse("[paths]\ninput = \"\"");
        assert!(config.validate().is_err());
    }
}
