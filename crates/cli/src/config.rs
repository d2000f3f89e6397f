//! Command-line configuration for the `docdata` tool.
//!
//! Every option can also be supplied through the environment.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `DOCDATA_INPUT` | (required) | JSON description of the provider tree |
//! | `DOCDATA_OUTPUT` | stdout | XML file to write |
//! | `DOCDATA_INDENT` | 4 | Spaces per nesting level (0 = single line) |
//! | `DOCDATA_NO_DECLARATION` | false | Omit the `<?xml ...?>` declaration |
//! | `DOCDATA_LOG_LEVEL` | info | Log level |

use std::path::PathBuf;

use clap::Parser;
use docdata_publish::PublishOptions;

/// Largest accepted indentation width.
const MAX_INDENT: usize = 16;

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Configuration for one publish run.
#[derive(Debug, Clone, Parser)]
#[command(name = "docdata")]
#[command(about = "Publish a JSON-described data provider tree as XML")]
pub struct PublishConfig {
    /// JSON file describing the provider tree.
    #[arg(short, long, env = "DOCDATA_INPUT")]
    pub input: PathBuf,

    /// XML file to write. Written atomically; stdout when omitted.
    #[arg(short, long, env = "DOCDATA_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Spaces per nesting level (0 writes a single line).
    #[arg(long, env = "DOCDATA_INDENT", default_value = "4")]
    pub indent: usize,

    /// Omit the XML declaration.
    #[arg(long, env = "DOCDATA_NO_DECLARATION")]
    pub no_declaration: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "DOCDATA_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output: None,
            indent: 4,
            no_declaration: false,
            log_level: "info".to_string(),
        }
    }
}

impl PublishConfig {
    /// Options handed to the XML publisher.
    pub fn publish_options(&self) -> PublishOptions {
        PublishOptions::default()
            .indent(self.indent)
            .xml_declaration(!self.no_declaration)
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.input.as_os_str().is_empty() {
            errors.push("Input file must be given".to_string());
        }

        if self.indent > MAX_INDENT {
            errors.push(format!("Indent cannot exceed {}", MAX_INDENT));
        }

        if self.output.as_ref() == Some(&self.input) {
            errors.push("Output file cannot be the input file".to_string());
        }

        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            errors.push(format!(
                "Unknown log level '{}' (expected one of {})",
                self.log_level,
                LOG_LEVELS.join(", ")
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(input: &str) -> PublishConfig {
        PublishConfig {
            input: PathBuf::from(input),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = PublishConfig::default();
        assert_eq!(config.indent, 4);
        assert!(!config.no_declaration);
        assert_eq!(config.log_level, "info");
        assert!(config.output.is_none());
    }

    #[test]
    fn test_parse_arguments() {
        let config = PublishConfig::try_parse_from([
            "docdata",
            "--input",
            "tree.json",
            "-o",
            "data.xml",
            "--indent",
            "2",
            "--no-declaration",
        ])
        .expect("arguments parse");

        assert_eq!(config.input, PathBuf::from("tree.json"));
        assert_eq!(config.output, Some(PathBuf::from("data.xml")));
        assert_eq!(config.indent, 2);
        assert!(config.no_declaration);
    }

    #[test]
    fn test_publish_options() {
        let config = PublishConfig {
            indent: 0,
            no_declaration: true,
            ..config_for("tree.json")
        };
        let options = config.publish_options();
        assert_eq!(options.indent, 0);
        assert!(!options.xml_declaration);
    }

    #[test]
    fn test_validate_valid() {
        assert!(config_for("tree.json").validate().is_ok());
    }

    #[test]
    fn test_validate_missing_input() {
        let result = PublishConfig::default().validate();
        assert!(result.unwrap_err().iter().any(|e| e.contains("Input")));
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let config = PublishConfig {
            output: Some(PathBuf::from("tree.json")),
            indent: 40,
            log_level: "loud".to_string(),
            ..config_for("tree.json")
        };
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
