use crate::error::{IpCommonError, Result};
use crate::extractor::InputFormat;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Deduplicated address tokens read from one file.
pub type AddressSet = HashSet<String>;

/// A source file paired with the addresses it contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    path: PathBuf,
    format: InputFormat,
    addresses: AddressSet,
}

impl FileRecord {
    pub fn new(path: impl Into<PathBuf>, format: InputFormat, addresses: AddressSet) -> Self {
        Self {
            path: path.into(),
            format,
            addresses,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> InputFormat {
        self.format
    }

    pub fn addresses(&self) -> &AddressSet {
        &self.addresses
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    pub fn contains(&self, address: &str) -> bool {
        self.addresses.contains(address)
    }
}

/// Reads every address token out of `path`.
///
/// The format is chosen from the file name before anything is opened, so an
/// unsupported path fails without touching the filesystem.
pub fn extract(path: &Path) -> Result<AddressSet> {
    let format = InputFormat::from_path(path)?;
    extract_as(path, format)
}

/// Like [`extract`] but keeps the path alongside the result.
pub fn load_record(path: &Path) -> Result<FileRecord> {
    let format = InputFormat::from_path(path)?;
    let addresses = extract_as(path, format)?;

    debug!(
        path = %path.display(),
        format = %format,
        addresses = addresses.len(),
        "loaded address file"
    );

    Ok(FileRecord::new(path, format, addresses))
}

fn extract_as(path: &Path, format: InputFormat) -> Result<AddressSet> {
    match format {
        InputFormat::Delimited => read_delimited(path),
        InputFormat::Lines => read_lines(path),
    }
}

/// First field of every row. Header rows are data like any other row.
pub fn read_delimited(path: &Path) -> Result<AddressSet> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| IpCommonError::from_csv(path, e))?;

    let mut addresses = AddressSet::new();
    for row in reader.records() {
        let row = row.map_err(|e| IpCommonError::from_csv(path, e))?;
        if let Some(address) = row.get(0).filter(|field| !field.is_empty()) {
            addresses.insert(address.to_string());
        }
    }

    Ok(addresses)
}

/// One token per line; only the line terminator (`\n`, `\r\n` or `\r`) is
/// stripped.
pub fn read_lines(path: &Path) -> Result<AddressSet> {
    let content = fs::read_to_string(path).map_err(|e| IpCommonError::io(path, e))?;
    Ok(parse_lines(&content))
}

fn parse_lines(content: &str) -> AddressSet {
    content
        .split(['\n', '\r'])
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
