use crate::extractor::FileRecord;
use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;

/// Address to the files containing it, for addresses found in two or more
/// distinct files.
pub type OccurrenceMap = HashMap<String, BTreeSet<PathBuf>>;

/// Every address shared by at least two files, with the files that hold it.
///
/// Builds the full address-to-files index in one pass, then drops entries
/// seen in a single file. Files are identified by path, so the same path
/// given twice counts once.
pub fn occurrences_across_files(records: &[FileRecord]) -> OccurrenceMap {
    let mut index: OccurrenceMap = HashMap::new();

    for record in records {
        for address in record.addresses() {
            index
                .entry(address.clone())
                .or_default()
                .insert(record.path().to_path_buf());
        }
    }

    index.retain(|_, files| files.len() >= 2);
    index
}
