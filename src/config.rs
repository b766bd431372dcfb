use crate::error::{IpCommonError, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReportConfig {
    pub sort: SortOrder,
    pub labels: FileLabel,
    pub file_separator: String,
}

/// Order in which addresses are listed in a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Parsed IP addresses numerically, then anything else lexically
    #[default]
    Address,
    /// Plain string order
    Lexical,
    /// Whatever order the sets yield
    None,
}

/// How source files are named in the shared-address listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FileLabel {
    /// The path exactly as given
    #[default]
    Path,
    /// The file name only
    Name,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            sort: SortOrder::Address,
            labels: FileLabel::Path,
            file_separator: ", ".to_string(),
        }
    }
}

impl Config {
    pub const DEFAULT_PATHS: [&'static str; 2] = ["ipcommon.toml", ".ipcommon.toml"];

    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(IpCommonError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| IpCommonError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| IpCommonError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                for default_path in &Self::DEFAULT_PATHS {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(sort) = cli_args.sort {
            self.report.sort = sort;
        }

        if let Some(labels) = cli_args.labels {
            self.report.labels = labels;
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| IpCommonError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| IpCommonError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.report.file_separator.is_empty() {
            return Err(IpCommonError::Config {
                message: "report.file_separator must not be empty".to_string(),
            });
        }

        if self.report.file_separator.contains('\n') {
            return Err(IpCommonError::Config {
                message: "report.file_separator must fit on one line".to_string(),
            });
        }

        Ok(())
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub sort: Option<SortOrder>,
    pub labels: Option<FileLabel>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sort(mut self, sort: Option<SortOrder>) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_labels(mut self, labels: Option<FileLabel>) -> Self {
        self.labels = labels;
        self
    }
}
