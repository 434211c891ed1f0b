//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::analysis::Horizon;
use clap::Parser;
use std::path::PathBuf;

/// SkillFlow - talent analytics over demo professional profiles
///
/// Search a catalog of demo profiles and report which skills, proficiency
/// levels, locations and employers dominate the results.
///
/// Examples:
///   skillflow --query python
///   skillflow --query "data scientist" --format json -o report.json
///   skillflow --query react --seed 42 --latency-ms 0
///   skillflow --query python --target-role "Machine Learning Engineer" --forecast long
///   skillflow --list-topics
///   skillflow --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Free-text search query (a topic such as "python", or any phrase)
    #[arg(
        short,
        long,
        value_name = "QUERY",
        required_unless_present_any = ["init_config", "list_topics"]
    )]
    pub query: Option<String>,

    /// Maximum number of search hits
    #[arg(long, value_name = "COUNT")]
    pub limit: Option<usize>,

    /// Maximum number of profiles fetched and aggregated
    #[arg(long, value_name = "COUNT")]
    pub max_profiles: Option<usize>,

    /// Number of skills kept in the report
    #[arg(long, value_name = "COUNT")]
    pub top_skills: Option<usize>,

    /// Output file path for the report
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (markdown, json)
    #[arg(long, default_value = "markdown", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Path to configuration file
    ///
    /// If not specified, looks for .skillflow.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Seed for the demo data, for reproducible reports
    #[arg(long, value_name = "SEED", env = "SKILLFLOW_SEED")]
    pub seed: Option<u64>,

    /// Simulated latency for every store call, in milliseconds
    #[arg(long, value_name = "MS")]
    pub latency_ms: Option<u64>,

    /// Number of concurrent profile lookups
    #[arg(long, value_name = "NUM")]
    pub concurrency: Option<usize>,

    /// Drop malformed profiles before aggregating
    #[arg(long)]
    pub strict: bool,

    /// Skip correlation, career path and market insights
    #[arg(long)]
    pub no_insights: bool,

    /// Role to compute skill gaps against
    ///
    /// Known roles: "Senior Software Engineer", "Machine Learning Engineer"
    #[arg(long, value_name = "ROLE")]
    pub target_role: Option<String>,

    /// Add a demand forecast for the top skill
    #[arg(long, value_name = "HORIZON")]
    pub forecast: Option<Horizon>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(long)]
    pub quiet: bool,

    /// Exit with code 2 when the query matches no profiles
    #[arg(long)]
    pub fail_on_empty: bool,

    /// List the available demo topics and exit
    #[arg(long)]
    pub list_topics: bool,

    /// Generate a default .skillflow.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The trimmed query, or an empty string if none was given.
    pub fn query_text(&self) -> &str {
        self.query.as_deref().map(str::trim).unwrap_or("")
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Nothing to check for the early-exit modes
        if self.init_config || self.list_topics {
            return Ok(());
        }

        if self.query_text().is_empty() {
            return Err("Query parameter is required".to_string());
        }

        for (name, value) in [
            ("Limit", self.limit),
            ("Max profiles", self.max_profiles),
            ("Top skills", self.top_skills),
            ("Concurrency", self.concurrency),
        ] {
            if value == Some(0) {
                return Err(format!("{} must be at least 1", name));
            }
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
