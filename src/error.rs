use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IpCommonError {
    #[error("Unsupported file format: {path}")]
    UnsupportedFormat { path: String },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed record in {path}: {message}")]
    MalformedRecord { path: String, message: String },

    #[error("Invalid arguments: {message}")]
    InvalidArguments { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl IpCommonError {
    pub fn unsupported_format(path: &Path) -> Self {
        IpCommonError::UnsupportedFormat {
            path: path.display().to_string(),
        }
    }

    pub fn io(path: &Path, source: std::io::Error) -> Self {
        IpCommonError::Io {
            path: path.display().to_string(),
            source,
        }
    }

    /// Splits a csv reader failure into an I/O error or a record error.
    pub fn from_csv(path: &Path, error: csv::Error) -> Self {
        let message = error.to_string();
        match error.into_kind() {
            csv::ErrorKind::Io(source) => Self::io(path, source),
            _ => IpCommonError::MalformedRecord {
                path: path.display().to_string(),
                message,
            },
        }
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            IpCommonError::Config { .. } => 1,
            IpCommonError::InvalidArguments { .. } => 2,
            IpCommonError::UnsupportedFormat { .. } => 3,
            IpCommonError::Io { .. } => 4,
            IpCommonError::MalformedRecord { .. } => 5,
        }
    }
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for IpCommonError {
    fn user_message(&self) -> String {
        match self {
            IpCommonError::UnsupportedFormat { path } => {
                format!("Unsupported file format: {}", path)
            }
            IpCommonError::Io { path, source } => match source.kind() {
                std::io::ErrorKind::NotFound => format!("File not found: {}", path),
                std::io::ErrorKind::PermissionDenied => {
                    format!("Permission denied reading: {}", path)
                }
                std::io::ErrorKind::InvalidData => {
                    format!("File is not valid UTF-8 text: {}", path)
                }
                _ => format!("Failed to read {}: {}", path, source),
            },
            IpCommonError::MalformedRecord { path, message } => {
                format!("Could not parse {}: {}", path, message)
            }
            IpCommonError::InvalidArguments { message } => {
                format!("Invalid arguments: {}", message)
            }
            IpCommonError::Config { message } => {
                format!("Configuration error: {}", message)
            }
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            IpCommonError::UnsupportedFormat { .. } => Some(
                "Only .csv and .txt files are supported. Rename or convert the file and try again.".to_string()
            ),
            IpCommonError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound => Some(
                "Check the path for typos and that the file exists.".to_string()
            ),
            IpCommonError::MalformedRecord { .. } => Some(
                "Make sure the file is comma-delimited UTF-8 text with the address in the first column.".to_string()
            ),
            IpCommonError::InvalidArguments { .. } => Some(
                "Pass at least one file, e.g. ipcommon blocklist.csv firewall.txt".to_string()
            ),
            IpCommonError::Config { .. } => Some(
                "Check your configuration file syntax, or regenerate one with --generate-config.".to_string()
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for IpCommonError {
    fn from(error: toml::de::Error) -> Self {
        IpCommonError::Config {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, IpCommonError>;
