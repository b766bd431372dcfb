use crate::aggregator::{intersect_all, occurrences_across_files};
use crate::config::{FileLabel, ReportConfig, SortOrder};
use crate::extractor::FileRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::net::IpAddr;
use std::path::{Path, PathBuf};

/// Outcome of comparing a set of address files.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub files: Vec<String>,
    pub common_to_all: Vec<String>,
    pub shared: Vec<SharedAddress>,
    pub generated_at: DateTime<Utc>,
}

/// An address found in two or more files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharedAddress {
    pub address: String,
    pub files: Vec<String>,
}

impl ComparisonReport {
    /// Runs both aggregations over `records` and orders the results.
    ///
    /// Files inside each shared entry keep the order they were given in.
    pub fn build(records: &[FileRecord], config: &ReportConfig) -> Self {
        let common = intersect_all(records.iter().map(FileRecord::addresses));
        let occurrences = occurrences_across_files(records);

        let mut input_order: Vec<&Path> = Vec::with_capacity(records.len());
        for path in records.iter().map(FileRecord::path) {
            if !input_order.contains(&path) {
                input_order.push(path);
            }
        }
        let files = unique_labels(&input_order, config.labels);
        let index: HashMap<&Path, (usize, &str)> = input_order
            .iter()
            .zip(&files)
            .enumerate()
            .map(|(position, (path, label))| (*path, (position, label.as_str())))
            .collect();

        let mut common_to_all: Vec<String> = common.into_iter().collect();
        sort_addresses(&mut common_to_all, config.sort);

        let mut shared: Vec<SharedAddress> = occurrences
            .into_iter()
            .map(|(address, paths)| {
                let mut paths: Vec<PathBuf> = paths.into_iter().collect();
                paths.sort_by_key(|path| index.get(path.as_path()).map(|(position, _)| *position));
                SharedAddress {
                    address,
                    files: paths
                        .iter()
                        .map(|path| match index.get(path.as_path()) {
                            Some((_, label)) => label.to_string(),
                            None => path.display().to_string(),
                        })
                        .collect(),
                }
            })
            .collect();
        if config.sort != SortOrder::None {
            shared.sort_by(|a, b| compare_addresses(&a.address, &b.address, config.sort));
        }

        Self {
            files,
            common_to_all,
            shared,
            generated_at: Utc::now(),
        }
    }

    pub fn has_common(&self) -> bool {
        !self.common_to_all.is_empty()
    }

    pub fn has_shared(&self) -> bool {
        !self.shared.is_empty()
    }
}

pub fn file_label(path: &Path, labels: FileLabel) -> String {
    match labels {
        FileLabel::Path => path.display().to_string(),
        FileLabel::Name => path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string()),
    }
}

/// One label per distinct path. Under [`FileLabel::Name`], files sharing a
/// name are shown by path instead.
fn unique_labels(paths: &[&Path], labels: FileLabel) -> Vec<String> {
    let names: Vec<String> = paths.iter().map(|path| file_label(path, labels)).collect();

    names
        .iter()
        .zip(paths)
        .map(|(name, path)| {
            if names.iter().filter(|other| *other == name).count() > 1 {
                path.display().to_string()
            } else {
                name.clone()
            }
        })
        .collect()
}

pub fn sort_addresses(addresses: &mut [String], order: SortOrder) {
    if order != SortOrder::None {
        addresses.sort_by(|a, b| compare_addresses(a, b, order));
    }
}

fn compare_addresses(a: &str, b: &str, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Lexical | SortOrder::None => a.cmp(b),
        SortOrder::Address => match (a.parse::<IpAddr>(), b.parse::<IpAddr>()) {
            (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
            (Ok(_), Err(_)) => Ordering::Less,
            (Err(_), Ok(_)) => Ordering::Greater,
            (Err(_), Err(_)) => a.cmp(b),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::{AddressSet, InputFormat};

    fn record(path: &str, items: &[&str]) -> FileRecord {
        let addresses: AddressSet = items.iter().map(|s| s.to_string()).collect();
        FileRecord::new(path, InputFormat::Delimited, addresses)
    }

    fn fixture() -> Vec<FileRecord> {
        vec![
            record("data/f1.csv", &["192.168.1.1", "10.0.0.1", "192.168.1.2"]),
            record("data/f2.txt", &["192.168.1.1", "10.0.0.1", "192.168.1.3"]),
            record("data/f3.csv", &["192.168.1.1", "10.0.0.1", "192.168.1.4"]),
            record("data/f4.txt", &["192.168.1.1", "10.0.0.2", "192.168.1.3"]),
        ]
    }

    #[test]
    fn test_build_from_fixture() {
        let report = ComparisonReport::build(&fixture(), &ReportConfig::default());

        assert_eq!(report.common_to_all, vec!["192.168.1.1"]);
        assert_eq!(
            report.shared,
            vec![
                SharedAddress {
                    address: "10.0.0.1".to_string(),
                    files: vec![
                        "data/f1.csv".to_string(),
                        "data/f2.txt".to_string(),
                        "data/f3.csv".to_string(),
                    ],
                },
                SharedAddress {
                    address: "192.168.1.1".to_string(),
                    files: vec![
                        "data/f1.csv".to_string(),
                        "data/f2.txt".to_string(),
                        "data/f3.csv".to_string(),
                        "data/f4.txt".to_string(),
                    ],
                },
                SharedAddress {
                    address: "192.168.1.3".to_string(),
                    files: vec!["data/f2.txt".to_string(), "data/f4.txt".to_string()],
                },
            ]
        );
    }

    #[test]
    fn test_shared_files_follow_input_order() {
        let records = vec![record("z.txt", &["1.1.1.1"]), record("a.txt", &["1.1.1.1"])];
        let report = ComparisonReport::build(&records, &ReportConfig::default());

        assert_eq!(report.shared[0].files, vec!["z.txt", "a.txt"]);
        assert_eq!(report.files, vec!["z.txt", "a.txt"]);
    }

    #[test]
    fn test_name_labels() {
        let config = ReportConfig {
            labels: FileLabel::Name,
            ..ReportConfig::default()
        };
        let report = ComparisonReport::build(&fixture(), &config);

        assert_eq!(report.files, vec!["f1.csv", "f2.txt", "f3.csv", "f4.txt"]);
        let shared_3 = report
            .shared
            .iter()
            .find(|s| s.address == "192.168.1.3")
            .unwrap();
        assert_eq!(shared_3.files, vec!["f2.txt", "f4.txt"]);
    }

    #[test]
    fn test_name_labels_keep_same_named_files_apart() {
        let config = ReportConfig {
            labels: FileLabel::Name,
            ..ReportConfig::default()
        };
        let records = vec![
            record("a/hosts.txt", &["10.0.0.1", "10.0.0.2"]),
            record("b/hosts.txt", &["10.0.0.1"]),
            record("c/extra.txt", &["10.0.0.2"]),
        ];
        let report = ComparisonReport::build(&records, &config);

        assert_eq!(report.files, vec!["a/hosts.txt", "b/hosts.txt", "extra.txt"]);
        assert_eq!(report.shared[0].address, "10.0.0.1");
        assert_eq!(report.shared[0].files, vec!["a/hosts.txt", "b/hosts.txt"]);
        assert_eq!(report.shared[1].files, vec!["a/hosts.txt", "extra.txt"]);
    }

    #[test]
    fn test_repeated_path_listed_once() {
        let records = vec![record("a.txt", &["1.1.1.1"]), record("a.txt", &["1.1.1.1"])];
        let report = ComparisonReport::build(&records, &ReportConfig::default());

        assert_eq!(report.files, vec!["a.txt"]);
        assert!(!report.has_shared());
    }

    #[test]
    fn test_empty_results() {
        let records = vec![record("a.txt", &["1.1.1.1"]), record("b.txt", &["2.2.2.2"])];
        let report = ComparisonReport::build(&records, &ReportConfig::default());

        assert!(!report.has_common());
        assert!(!report.has_shared());
    }

    #[test]
    fn test_address_sort_is_numeric() {
        let mut addresses: Vec<String> = ["10.0.0.10", "host-a", "::1", "10.0.0.9", "9.9.9.9", "abc"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        sort_addresses(&mut addresses, SortOrder::Address);
        assert_eq!(
            addresses,
            vec!["9.9.9.9", "10.0.0.9", "10.0.0.10", "::1", "abc", "host-a"]
        );

        sort_addresses(&mut addresses, SortOrder::Lexical);
        assert_eq!(
            addresses,
            vec!["10.0.0.10", "10.0.0.9", "9.9.9.9", "::1", "abc", "host-a"]
        );
    }

    #[test]
    fn test_build_is_repeatable() {
        let records = fixture();
        let first = ComparisonReport::build(&records, &ReportConfig::default());
        let second = ComparisonReport::build(&records, &ReportConfig::default());

        assert_eq!(first.files, second.files);
        assert_eq!(first.common_to_all, second.common_to_all);
        assert_eq!(first.shared, second.shared);
    }
}
