use crate::config::{CliOverrides, Config, FileLabel, SortOrder};
use crate::error::{Result, UserFriendlyError};
use crate::logging;
use crate::ui::{OutputFormatter, OutputMode};
use crate::IpCommon;
use clap::{Parser, ValueEnum};
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ipcommon")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Find IP addresses shared across CSV and TXT files")]
#[command(
    long_about = "ipcommon reads IP addresses from .csv files (first column) and .txt files \
                  (one per line), then reports the addresses present in every file and the \
                  addresses present in at least two files."
)]
#[command(after_help = "EXAMPLES:\n  \
    ipcommon blocklist.csv firewall.txt\n  \
    ipcommon jan.csv feb.csv mar.txt --labels name\n  \
    ipcommon *.txt --output-format json --sort lexical\n  \
    ipcommon --generate-config --config ipcommon.toml")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Address files to compare (.csv or .txt)
    #[arg(required_unless_present = "generate_config", num_args = 1..)]
    pub files: Vec<PathBuf>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Ordering of listed addresses
    #[arg(long, value_enum, help = "How to order addresses in the report")]
    pub sort: Option<SortOrder>,

    /// How files are named in the shared-address listing
    #[arg(long, value_enum, help = "Show files by full path or by file name")]
    pub labels: Option<FileLabel>,

    /// Verbose output level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl From<&OutputFormat> for OutputMode {
    fn from(format: &OutputFormat) -> Self {
        match format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        }
    }
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_sort(self.sort)
            .with_labels(self.labels)
    }

    pub fn output_mode(&self) -> OutputMode {
        OutputMode::from(&self.output_format)
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}

/// Parses `args` (program name first) and runs a comparison.
///
/// Returns the process exit status instead of exiting, so callers other
/// than `main` can drive the command line.
pub fn run<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return e.exit_code();
        }
    };

    logging::init_logging(cli.verbosity_level());

    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let ipcommon = match IpCommon::from_cli(&cli) {
        Ok(ipcommon) => ipcommon,
        Err(e) => {
            let formatter = OutputFormatter::new(cli.output_mode(), 0, false);
            formatter.print_user_friendly_error(&e);
            return e.exit_code();
        }
    };

    match ipcommon.compare(&cli.files) {
        Ok(report) => {
            ipcommon.output_formatter().print_report(&report);
            0
        }
        Err(e) => {
            ipcommon.handle_error(&e);
            e.exit_code()
        }
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(Config::DEFAULT_PATHS[0]));

    match IpCommon::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path.display());
            println!("\nTo use this configuration:");
            println!("  ipcommon <files>... --config {}", config_path.display());
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            e.exit_code()
        }
    }
}
