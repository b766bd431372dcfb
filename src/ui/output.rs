use crate::error::{IpCommonError, UserFriendlyError};
use crate::report::ComparisonReport;
use console::{style, Emoji, Term};
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

pub const COMMON_HEADER: &str = "Common IP addresses in all files:";
pub const NO_COMMON: &str = "No common IP addresses found in all files.";
pub const SHARED_HEADER: &str = "IP addresses common to at least two files:";
pub const NO_SHARED: &str = "No IP addresses found in two or more files.";

// Emojis with text fallbacks
static CROSS: Emoji = Emoji("❌ ", "✗ ");
static INFO: Emoji = Emoji("ℹ️  ", "i ");
static WARNING: Emoji = Emoji("⚠️  ", "! ");

pub struct OutputFormatter {
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
    file_separator: String,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let use_colors = match mode {
            OutputMode::Human => Term::stdout().features().colors_supported() && !quiet,
            _ => false,
        };

        Self {
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
            file_separator: ", ".to_string(),
        }
    }

    pub fn with_file_separator<S: Into<String>>(mut self, separator: S) -> Self {
        self.file_separator = separator.into();
        self
    }

    // Core messaging methods
    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Error, message),
            OutputMode::Json => self.print_json_message("error", message),
            OutputMode::Plain => eprintln!("ERROR: {}", message),
        }
    }

    pub fn warning(&self, message: &str) {
        if self.should_show_message(0) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Warning, message),
                OutputMode::Json => self.print_json_message("warning", message),
                OutputMode::Plain => eprintln!("WARNING: {}", message),
            }
        }
    }

    pub fn info(&self, message: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Info, message),
                OutputMode::Json => self.print_json_message("info", message),
                OutputMode::Plain => eprintln!("INFO: {}", message),
            }
        }
    }

    pub fn debug(&self, message: &str) {
        if self.should_show_message(2) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        eprintln!("  {}", style(message).dim());
                    } else {
                        eprintln!("  DEBUG: {}", message);
                    }
                }
                OutputMode::Json => self.print_json_message("debug", message),
                OutputMode::Plain => eprintln!("DEBUG: {}", message),
            }
        }
    }

    // User-friendly error handling
    pub fn print_user_friendly_error(&self, error: &IpCommonError) {
        self.error(&error.user_message());

        if let Some(suggestion) = error.suggestion() {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        eprintln!(
                            "{}{}",
                            INFO,
                            style(&format!("Suggestion: {}", suggestion)).cyan()
                        );
                    } else {
                        eprintln!("Suggestion: {}", suggestion);
                    }
                }
                OutputMode::Json => {
                    self.print_json_object(&serde_json::json!({
                        "type": "suggestion",
                        "message": suggestion
                    }));
                }
                OutputMode::Plain => {
                    eprintln!("SUGGESTION: {}", suggestion);
                }
            }
        }
    }

    // Reporting
    pub fn print_report(&self, report: &ComparisonReport) {
        print!("{}", self.render_report(report));
    }

    /// The report exactly as `print_report` writes it to stdout.
    pub fn render_report(&self, report: &ComparisonReport) -> String {
        match self.mode {
            OutputMode::Json => {
                let mut json =
                    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string());
                json.push('\n');
                json
            }
            OutputMode::Human => self.render_text_report(report, true),
            OutputMode::Plain => self.render_text_report(report, false),
        }
    }

    fn render_text_report(&self, report: &ComparisonReport, spaced: bool) -> String {
        let mut out = String::new();

        if report.has_common() {
            let _ = writeln!(out, "{}", self.header(COMMON_HEADER));
            for address in &report.common_to_all {
                let _ = writeln!(out, "{}", address);
            }
        } else {
            let _ = writeln!(out, "{}", self.sentinel(NO_COMMON));
        }

        if spaced {
            out.push('\n');
        }

        if report.has_shared() {
            let _ = writeln!(out, "{}", self.header(SHARED_HEADER));
            for shared in &report.shared {
                let _ = writeln!(
                    out,
                    "IP: {}, Present in Files: {}",
                    shared.address,
                    shared.files.join(&self.file_separator)
                );
            }
        } else {
            let _ = writeln!(out, "{}", self.sentinel(NO_SHARED));
        }

        out
    }

    fn header(&self, title: &str) -> String {
        if self.use_colors {
            style(title).bold().cyan().to_string()
        } else {
            title.to_string()
        }
    }

    fn sentinel(&self, message: &str) -> String {
        if self.use_colors {
            style(message).yellow().to_string()
        } else {
            message.to_string()
        }
    }

    // Private helper methods
    fn should_show_message(&self, min_verbose_level: u8) -> bool {
        !self.quiet && self.verbose_level >= min_verbose_level
    }

    fn print_human_message(&self, msg_type: MessageType, message: &str) {
        #[allow(clippy::type_complexity)]
        let (emoji, color_fn): (Emoji, Box<dyn Fn(&str) -> console::StyledObject<&str>>) =
            match msg_type {
                MessageType::Error => (CROSS, Box::new(|msg| style(msg).red().bold())),
                MessageType::Warning => (WARNING, Box::new(|msg| style(msg).yellow().bold())),
                MessageType::Info => (INFO, Box::new(|msg| style(msg).cyan())),
            };

        // stdout carries only the report.
        if self.use_colors {
            eprintln!("{}{}", emoji, color_fn(message));
        } else {
            let prefix = match msg_type {
                MessageType::Error => "✗",
                MessageType::Warning => "!",
                MessageType::Info => "i",
            };
            eprintln!("{} {}", prefix, message);
        }
    }

    fn print_json_message(&self, level: &str, message: &str) {
        self.print_json_object(&serde_json::json!({
            "type": "message",
            "level": level,
            "message": message,
            "timestamp": chrono::Utc::now().to_rfc3339()
        }));
    }

    fn print_json_object(&self, obj: &serde_json::Value) {
        eprintln!(
            "{}",
            serde_json::to_string(obj).unwrap_or_else(|_| "{}".to_string())
        );
    }
}

#[derive(Debug, Clone, Copy)]
enum MessageType {
    Error,
    Warning,
    Info,
}
