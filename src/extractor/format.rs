use crate::error::{IpCommonError, Result};
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Input layouts recognised by the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// Comma-delimited rows, address in the first field.
    Delimited,
    /// One address per line.
    Lines,
}

impl InputFormat {
    pub const DELIMITED_SUFFIX: &'static str = ".csv";
    pub const LINES_SUFFIX: &'static str = ".txt";

    /// Picks the reader for `path` from its file name suffix.
    ///
    /// Matching is case-sensitive, so `hosts.CSV` is rejected. The file
    /// itself is never touched.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default();

        if file_name.ends_with(Self::DELIMITED_SUFFIX) {
            Ok(InputFormat::Delimited)
        } else if file_name.ends_with(Self::LINES_SUFFIX) {
            Ok(InputFormat::Lines)
        } else {
            Err(IpCommonError::unsupported_format(path))
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InputFormat::Delimited => "csv",
            InputFormat::Lines => "txt",
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
