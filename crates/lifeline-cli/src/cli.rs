//! Command-line interface for the lifeline utility
//!
//! Renders JSON diagram descriptions to HTML/SVG markup, validates them, and
//! lists the kinds and enum values a description may use.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::debug;

use crate::colorizer::{heading, status_line};
use lifeline::core::logging::{init_logging, LOG_FORMAT_ENV, LOG_LEVEL_ENV};
use lifeline::primitives::sequence::SequenceConfig;
use lifeline::primitives::{Catalog, Orchestrator};

/// Lifeline - render diagram descriptions to HTML and SVG
#[derive(Parser)]
#[command(name = "lifeline")]
#[command(about = "Render declarative diagram descriptions to HTML and SVG")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a JSON description to markup
    Render {
        /// Input file containing a JSON description (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file for the markup (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pixels between message rows; overrides the description
        #[arg(long)]
        message_spacing: Option<f64>,

        /// Pixels per actor column
        #[arg(long)]
        column_width: Option<f64>,

        /// Pixels above the first message row
        #[arg(long)]
        header_height: Option<f64>,
    },

    /// Validate a JSON description
    Validate {
        /// Input file to validate (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// When to use colors in output
        #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
        color: ColorChoice,
    },

    /// Show description kinds and enum values
    Kinds {
        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },
}

/// When to colorize output
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Use colors if output is a terminal and NO_COLOR is not set
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Main CLI application
pub struct LifelineApp {
    orchestrator: Orchestrator,
}

impl LifelineApp {
    /// Create a new application instance with default settings
    pub fn new() -> Self {
        Self {
            orchestrator: Orchestrator::new(),
        }
    }

    fn build_orchestrator(
        message_spacing: Option<f64>,
        column_width: Option<f64>,
        header_height: Option<f64>,
    ) -> Orchestrator {
        let mut config = SequenceConfig::default();
        if let Some(width) = column_width {
            config = config.with_column_width(width);
        }
        if let Some(height) = header_height {
            config = config.with_header_height(height);
        }
        debug!(
            ?message_spacing,
            column_width = config.column_width,
            header_height = config.header_height,
            "Resolved sequence settings"
        );
        Orchestrator::with_config(config).with_message_spacing(message_spacing)
    }

    /// Run the application with the given CLI arguments
    pub fn run(&mut self, cli: Cli) -> Result<()> {
        let (log_level, log_format) = logging_settings(&cli, |key| std::env::var(key).ok());
        if let Err(e) = init_logging(Some(&log_level), Some(&log_format)) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("Lifeline v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Render {
                input,
                output,
                message_spacing,
                column_width,
                header_height,
            } => {
                self.orchestrator =
                    Self::build_orchestrator(message_spacing, column_width, header_height);
                self.render_command(input, output, cli.verbose)
            }
            Commands::Validate { input, color } => {
                self.validate_command(input, color, cli.verbose)
            }
            Commands::Kinds { json } => self.kinds_command(json, cli.verbose),
        }
    }

    /// Handle the render command
    fn render_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        verbose: bool,
    ) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let markup = self.orchestrator.process(&content)?;

        if verbose {
            eprintln!("Rendered {} bytes of markup", markup.len());
        }

        self.write_output(output, &markup)
    }

    /// Parse and validate `content`, returning the description kind
    pub fn check(&self, content: &str) -> Result<&'static str> {
        let description = self.orchestrator.parse(content)?;
        self.orchestrator.validate(&description)?;
        Ok(description.kind())
    }

    /// Handle the validate command
    fn validate_command(
        &self,
        input: Option<PathBuf>,
        color: ColorChoice,
        verbose: bool,
    ) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let colorize = should_colorize(color);
        match self.check(&content) {
            Ok(kind) => {
                println!(
                    "{}",
                    status_line(true, &format!("Valid {} description", kind), colorize)
                );
                Ok(())
            }
            Err(e) => {
                println!(
                    "{}",
                    status_line(false, &format!("Invalid description: {}", e), colorize)
                );
                Err(e)
            }
        }
    }

    /// Text listing of the catalog
    pub fn kinds_listing(&self, json: bool, colorize: bool) -> Result<String> {
        let catalog = Catalog::new();
        if json {
            return Ok(serde_json::to_string_pretty(&catalog)?);
        }
        let mut out = String::new();
        for (group, values) in catalog.groups() {
            out.push_str(&heading(group, colorize));
            out.push_str(":\n");
            out.push_str("  ");
            out.push_str(&values.join(", "));
            out.push('\n');
        }
        Ok(out)
    }

    /// Handle the kinds command
    fn kinds_command(&self, json: bool, verbose: bool) -> Result<()> {
        if verbose {
            eprintln!("Listing description kinds");
        }
        let listing = self.kinds_listing(json, !json && should_colorize(ColorChoice::Auto))?;
        println!("{}", listing.trim_end());
        Ok(())
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) if path.to_string_lossy() != "-" => fs::read_to_string(&path)
                .map_err(|e| anyhow!("Failed to read input file '{}': {}", path.display(), e)),
            _ => {
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        match output {
            Some(path) if path.to_string_lossy() != "-" => {
                fs::write(&path, content).map_err(|e| {
                    anyhow!("Failed to write output file '{}': {}", path.display(), e)
                })?;
            }
            _ => {
                let mut stdout = io::stdout();
                stdout.write_all(content.as_bytes())?;
                if !content.is_empty() && !content.ends_with('\n') {
                    stdout.write_all(b"\n")?;
                }
                stdout.flush()?;
            }
        }
        Ok(())
    }

    /// Get a reference to the orchestrator (for testing)
    #[cfg(test)]
    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }
}

impl Default for LifelineApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Level and format for the subscriber; environment variables take
/// precedence over flags
fn logging_settings(cli: &Cli, env: impl Fn(&str) -> Option<String>) -> (String, String) {
    let level = env(LOG_LEVEL_ENV)
        .or_else(|| env("RUST_LOG"))
        .unwrap_or_else(|| cli.log_level.as_str().to_string());
    let format = env(LOG_FORMAT_ENV).unwrap_or_else(|| cli.log_format.as_str().to_string());
    (level, format)
}

/// Whether stdout output should carry ANSI colors
fn should_colorize(color: ColorChoice) -> bool {
    match color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => {
            if std::env::var("NO_COLOR").is_ok() {
                return false;
            }
            crossterm::tty::IsTty::is_tty(&std::io::stdout())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::tempdir;

    const SEQUENCE: &str = r#"{
        "actors": [{"id": "a", "label": "A"}, {"id": "b", "label": "B"}],
        "messages": [{"id": "m1", "from": "a", "to": "b", "label": "req"}]
    }"#;

    #[test]
    fn test_cli_parsing_render_command() {
        let args = vec![
            "lifeline",
            "render",
            "--input",
            "diagram.json",
            "--output",
            "diagram.svg",
            "--message-spacing",
            "30",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Render {
                input,
                output,
                message_spacing,
                column_width,
                header_height,
            } => {
                assert_eq!(input.unwrap().to_string_lossy(), "diagram.json");
                assert_eq!(output.unwrap().to_string_lossy(), "diagram.svg");
                assert_eq!(message_spacing, Some(30.0));
                assert_eq!(column_width, None);
                assert_eq!(header_height, None);
            }
            _ => panic!("Expected Render command"),
        }
    }

    #[test]
    fn test_cli_parsing_validate_command() {
        let cli = Cli::try_parse_from(vec!["lifeline", "validate", "--color", "never"]).unwrap();

        match cli.command {
            Commands::Validate { input, color } => {
                assert!(input.is_none());
                assert_eq!(color, ColorChoice::Never);
            }
            _ => panic!("Expected Validate command"),
        }
    }

    #[test]
    fn test_cli_parsing_kinds_command() {
        let cli = Cli::try_parse_from(vec!["lifeline", "kinds", "--json"]).unwrap();

        match cli.command {
            Commands::Kinds { json } => assert!(json),
            _ => panic!("Expected Kinds command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(vec![
            "lifeline",
            "--verbose",
            "--log-level",
            "debug",
            "--log-format",
            "json",
            "kinds",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.log_level, LogLevel::Debug);
        assert_eq!(cli.log_format, LogFormat::Json);
    }

    #[test]
    fn test_logging_settings_follow_flags() {
        let cli = Cli::try_parse_from(vec![
            "lifeline",
            "--log-level",
            "trace",
            "--log-format",
            "pretty",
            "kinds",
        ])
        .unwrap();
        let (level, format) = logging_settings(&cli, |_| None);
        assert_eq!(level, "trace");
        assert_eq!(format, "pretty");

        let cli = Cli::try_parse_from(vec!["lifeline", "kinds"]).unwrap();
        assert_eq!(
            logging_settings(&cli, |_| None),
            ("info".to_string(), "compact".to_string())
        );
    }

    #[test]
    fn test_logging_settings_environment_overrides() {
        let cli = Cli::try_parse_from(vec!["lifeline", "--log-level", "warn", "kinds"]).unwrap();
        let env = |key: &str| match key {
            LOG_LEVEL_ENV => Some("debug".to_string()),
            LOG_FORMAT_ENV => Some("json".to_string()),
            _ => None,
        };
        assert_eq!(
            logging_settings(&cli, env),
            ("debug".to_string(), "json".to_string())
        );

        let rust_log = |key: &str| (key == "RUST_LOG").then(|| "error".to_string());
        assert_eq!(logging_settings(&cli, rust_log).0, "error");
    }

    #[test]
    fn test_invalid_color_rejected() {
        assert!(Cli::try_parse_from(vec!["lifeline", "validate", "--color", "rainbow"]).is_err());
    }

    #[test]
    fn test_read_input_from_file() {
        let app = LifelineApp::new();
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("diagram.json");
        fs::write(&file_path, SEQUENCE).unwrap();

        let content = app.read_input(Some(file_path)).unwrap();
        assert_eq!(content, SEQUENCE);
    }

    #[test]
    fn test_read_missing_file_names_path() {
        let app = LifelineApp::new();
        let err = app
            .read_input(Some(PathBuf::from("/nonexistent/diagram.json")))
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/diagram.json"));
    }

    #[test]
    fn test_render_command_writes_svg() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("diagram.json");
        let output = dir.path().join("diagram.svg");
        fs::write(&input, SEQUENCE).unwrap();

        let mut app = LifelineApp::new();
        let cli = Cli::try_parse_from(vec![
            "lifeline",
            "render",
            "--input",
            input.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
            "--message-spacing",
            "20",
        ])
        .unwrap();
        app.run(cli).unwrap();

        let svg = fs::read_to_string(&output).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("height=\"80\""));
        assert_eq!(app.orchestrator().config().column_width, 160.0);
    }

    #[test]
    fn test_check_valid_and_invalid() {
        let app = LifelineApp::new();
        assert_eq!(app.check(SEQUENCE).unwrap(), "sequence");
        assert_eq!(
            app.check(r#"{"type":"text","text":"hi"}"#).unwrap(),
            "text"
        );
        let err = app
            .check(r#"{"actors":[{"id":"a","label":"A"}],"messages":[{"id":"m1","from":"a","to":"x","label":"?"}]}"#)
            .unwrap_err();
        assert!(err.to_string().contains("Unknown actor"));
    }

    #[test]
    fn test_kinds_listing() {
        let app = LifelineApp::new();
        let text = app.kinds_listing(false, false).unwrap();
        assert!(text.contains("message variants:\n  sync, async, return"));

        let json = app.kinds_listing(true, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["kinds"].as_array().unwrap().len(), 7);
    }

    #[test]
    fn test_write_output_to_file() {
        let app = LifelineApp::new();
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("out.html");

        app.write_output(Some(file_path.clone()), "<div></div>").unwrap();
        assert_eq!(fs::read_to_string(&file_path).unwrap(), "<div></div>");
    }

    #[test]
    fn test_color_choices() {
        assert!(should_colorize(ColorChoice::Always));
        assert!(!should_colorize(ColorChoice::Never));
    }
}
