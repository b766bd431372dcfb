pub mod aggregator;
pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod logging;
pub mod report;
pub mod ui;

// Public API re-exports
pub use cli::{run, Cli, OutputFormat};
pub use config::{CliOverrides, Config, FileLabel, ReportConfig, SortOrder};
pub use error::{IpCommonError, Result, UserFriendlyError};

// Core functionality re-exports
pub use aggregator::{intersect_all, occurrences_across_files, OccurrenceMap};
pub use extractor::{extract, load_record, AddressSet, FileRecord, InputFormat};
pub use report::{ComparisonReport, SharedAddress};
pub use ui::{OutputFormatter, OutputMode};

use std::path::Path;
use tracing::{debug, info};

/// Main library interface for comparing address files
pub struct IpCommon {
    config: Config,
    output_formatter: OutputFormatter,
}

impl IpCommon {
    /// Create a new IpCommon instance with the provided configuration
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet)
            .with_file_separator(config.report.file_separator.clone());

        Self {
            config,
            output_formatter,
        }
    }

    /// Create IpCommon instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        Ok(Self::new(
            config,
            cli_args.output_mode(),
            cli_args.verbose,
            cli_args.quiet,
        ))
    }

    /// Load every file in order, stopping at the first failure.
    pub fn load_records<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Vec<FileRecord>> {
        if paths.is_empty() {
            return Err(IpCommonError::InvalidArguments {
                message: "at least one input file is required".to_string(),
            });
        }

        let mut records = Vec::with_capacity(paths.len());
        for path in paths {
            let record = load_record(path.as_ref())?;
            if record.is_empty() {
                debug!(path = %record.path().display(), "file contains no addresses");
                self.output_formatter.warning(&format!(
                    "{} contains no addresses; nothing can be common to all files",
                    record.path().display()
                ));
            }
            self.output_formatter.debug(&format!(
                "Loaded {} addresses from {} ({})",
                record.len(),
                record.path().display(),
                record.format()
            ));
            records.push(record);
        }

        Ok(records)
    }

    /// Compare the address files at `paths`.
    pub fn compare<P: AsRef<Path>>(&self, paths: &[P]) -> Result<ComparisonReport> {
        let records = self.load_records(paths)?;
        let report = ComparisonReport::build(&records, &self.config.report);

        info!(
            files = records.len(),
            common = report.common_to_all.len(),
            shared = report.shared.len(),
            "comparison complete"
        );
        self.output_formatter.info(&format!(
            "Compared {} files: {} common to all, {} shared by two or more",
            records.len(),
            report.common_to_all.len(),
            report.shared.len()
        ));

        Ok(report)
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let path = output_path.as_ref();
        std::fs::write(path, Config::create_sample_config())
            .map_err(|e| IpCommonError::io(path, e))
    }

    /// Get output formatter reference
    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &IpCommonError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Get version information
pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    struct Fixture {
        _dir: TempDir,
        paths: Vec<PathBuf>,
    }

    fn four_files() -> Fixture {
        let dir = TempDir::new().unwrap();
        let files = [
            ("f1.csv", "192.168.1.1\n10.0.0.1\n192.168.1.2\n"),
            ("f2.txt", "192.168.1.1\n10.0.0.1\n192.168.1.3\n"),
            ("f3.csv", "192.168.1.1\n10.0.0.1\n192.168.1.4\n"),
            ("f4.txt", "192.168.1.1\n10.0.0.2\n192.168.1.3\n"),
        ];

        let paths = files
            .iter()
            .map(|(name, content)| {
                let path = dir.path().join(name);
                fs::write(&path, content).unwrap();
                path
            })
            .collect();

        Fixture { _dir: dir, paths }
    }

    fn quiet() -> IpCommon {
        IpCommon::new(Config::default(), OutputMode::Plain, 0, true)
    }

    #[test]
    fn test_compare_four_files() {
        let fixture = four_files();
        let report = quiet().compare(&fixture.paths).unwrap();

        assert_eq!(report.common_to_all, vec!["192.168.1.1"]);

        let shared: Vec<(&str, usize)> = report
            .shared
            .iter()
            .map(|s| (s.address.as_str(), s.files.len()))
            .collect();
        assert_eq!(shared, vec![("10.0.0.1", 3), ("192.168.1.1", 4), ("192.168.1.3", 2)]);
    }

    #[test]
    fn test_full_pipeline_over_records() {
        let fixture = four_files();
        let records = quiet().load_records(&fixture.paths).unwrap();

        let common = intersect_all(records.iter().map(FileRecord::addresses));
        assert_eq!(common, ["192.168.1.1".to_string()].into_iter().collect::<AddressSet>());

        let map = occurrences_across_files(&records);
        let p = &fixture.paths;
        assert_eq!(map.len(), 3);
        assert_eq!(map["192.168.1.1"], p.iter().cloned().collect::<BTreeSet<_>>());
        assert_eq!(
            map["10.0.0.1"],
            [p[0].clone(), p[1].clone(), p[2].clone()]
                .into_iter()
                .collect::<BTreeSet<_>>()
        );
        assert_eq!(
            map["192.168.1.3"],
            [p[1].clone(), p[3].clone()].into_iter().collect::<BTreeSet<_>>()
        );
    }

    #[test]
    fn test_compare_is_idempotent() {
        let fixture = four_files();
        let ipcommon = quiet();

        let first = ipcommon.compare(&fixture.paths).unwrap();
        let second = ipcommon.compare(&fixture.paths).unwrap();

        let formatter = OutputFormatter::new(OutputMode::Plain, 0, true);
        assert_eq!(formatter.render_report(&first), formatter.render_report(&second));
    }

    #[test]
    fn test_one_bad_file_aborts() {
        let fixture = four_files();
        let mut paths = fixture.paths.clone();
        paths.push(PathBuf::from("extra.xyz"));

        let err = quiet().compare(&paths).unwrap_err();
        assert!(matches!(err, IpCommonError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_no_paths() {
        let paths: Vec<PathBuf> = Vec::new();
        let err = quiet().compare(&paths).unwrap_err();
        assert!(matches!(err, IpCommonError::InvalidArguments { .. }));
    }

    #[test]
    fn test_single_file() {
        let fixture = four_files();
        let report = quiet().compare(&fixture.paths[..1]).unwrap();

        assert_eq!(report.common_to_all, vec!["10.0.0.1", "192.168.1.1", "192.168.1.2"]);
        assert!(report.shared.is_empty());
    }

    #[test]
    fn test_sample_config_generation() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("sample.toml");

        IpCommon::generate_sample_config(&config_path).unwrap();

        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[report]"));
        assert!(Config::load_from_file(&config_path).is_ok());
    }

    #[test]
    fn test_version_info() {
        assert!(!version_info().is_empty());
    }
}
