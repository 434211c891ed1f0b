//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.skillflow.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = ".skillflow.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Profile search settings.
    #[serde(default)]
    pub search: SearchConfig,

    /// Aggregation settings.
    #[serde(default)]
    pub analytics: AnalyticsConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default output file path.
    #[serde(default = "default_output")]
    pub output: String,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,

    /// Number of concurrent profile lookups.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            verbose: false,
            concurrency: default_concurrency(),
        }
    }
}

fn default_output() -> String {
    "skillflow_report.md".to_string()
}

fn default_concurrency() -> usize {
    4
}

/// Profile search settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Maximum number of search hits.
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Maximum number of hits fetched in detail and aggregated.
    #[serde(default = "default_max_profiles")]
    pub max_profiles: usize,

    /// Seed for the demo data. Random when unset.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Simulated search latency in milliseconds.
    #[serde(default = "default_search_latency")]
    pub search_latency_ms: u64,

    /// Simulated per-profile latency in milliseconds.
    #[serde(default = "default_profile_latency")]
    pub profile_latency_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            max_profiles: default_max_profiles(),
            seed: None,
            search_latency_ms: default_search_latency(),
            profile_latency_ms: default_profile_latency(),
        }
    }
}

fn default_limit() -> usize {
    30
}

fn default_max_profiles() -> usize {
    15
}

fn default_search_latency() -> u64 {
    800
}

fn default_profile_latency() -> u64 {
    300
}

/// Aggregation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Number of skills kept in the report.
    #[serde(default = "default_top_skills")]
    pub top_skills: usize,

    /// Number of organizations kept in the industry table.
    #[serde(default = "default_top_industries")]
    pub top_industries: usize,

    /// Drop malformed profiles before aggregating.
    #[serde(default)]
    pub strict: bool,

    /// Attach correlation, career path and market insights.
    #[serde(default = "default_true")]
    pub include_insights: bool,

    /// Role to compute skill gaps against.
    #[serde(default)]
    pub target_role: Option<String>,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            top_skills: default_top_skills(),
            top_industries: default_top_industries(),
            strict: false,
            include_insights: true,
            target_role: None,
        }
    }
}

fn default_top_skills() -> usize {
    15
}

fn default_top_industries() -> usize {
    10
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Include the per-profile table.
    #[serde(default = "default_true")]
    pub include_profiles: bool,

    /// Include the proficiency breakdown table.
    #[serde(default = "default_true")]
    pub include_proficiency: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            include_profiles: true,
            include_proficiency: true,
        }
    }
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load `.skillflow.toml` from a directory.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings, but only
    /// when they were given explicitly.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(limit) = args.limit {
            self.search.limit = limit;
        }
        if let Some(max_profiles) = args.max_profiles {
            self.search.max_profiles = max_profiles;
        }
        if args.seed.is_some() {
            self.search.seed = args.seed;
        }
        if let Some(latency) = args.latency_ms {
            self.search.search_latency_ms = latency;
            self.search.profile_latency_ms = latency;
        }

        if let Some(top_skills) = args.top_skills {
            self.analytics.top_skills = top_skills;
        }
        if args.strict {
            self.analytics.strict = true;
        }
        if args.no_insights {
            self.analytics.include_insights = false;
        }
        if let Some(ref role) = args.target_role {
            self.analytics.target_role = Some(role.clone());
        }

        if let Some(concurrency) = args.concurrency {
            self.general.concurrency = concurrency;
        }
        if let Some(ref output) = args.output {
            self.general.output = output.display().to_string();
        }

        // Flags always override
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Check that the merged settings are usable.
    ///
    /// Count settings must be at least 1, wherever they came from.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("search.limit", self.search.limit),
            ("search.max_profiles", self.search.max_profiles),
            ("analytics.top_skills", self.analytics.top_skills),
            ("general.concurrency", self.general.concurrency),
        ] {
            if value == 0 {
                anyhow::bail!("{} must be at least 1", name);
            }
        }
        Ok(())
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::tests::make_args;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.search.limit, 30);
        assert_eq!(config.search.max_profiles, 15);
        assert_eq!(config.analytics.top_skills, 15);
        assert!(config.analytics.include_insights);
        assert!(!config.analytics.strict);
        assert_eq!(config.general.output, "skillflow_report.md");
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
output = "custom_report.md"
verbose = true

[search]
limit = 10
seed = 1234
search_latency_ms = 0

[analytics]
top_skills = 5
strict = true
target_role = "Machine Learning Engineer"
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.general.output, "custom_report.md");
        assert!(config.general.verbose);
        assert_eq!(config.search.limit, 10);
        assert_eq!(config.search.seed, Some(1234));
        assert_eq!(config.search.search_latency_ms, 0);
        assert_eq!(config.search.profile_latency_ms, 300);
        assert_eq!(config.analytics.top_skills, 5);
        assert!(config.analytics.strict);
        assert_eq!(
            config.analytics.target_role.as_deref(),
            Some("Machine Learning Engineer")
        );
        assert!(config.report.include_profiles);
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[search]"));
        assert!(toml_str.contains("[analytics]"));

        let reparsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(reparsed.search.limit, 30);
    }

    #[test]
    fn test_load_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load_from_dir(dir.path()).unwrap().is_none());

        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[search]\nmax_profiles = 3\n",
        )
        .unwrap();
        let config = Config::load_from_dir(dir.path()).unwrap().unwrap();
        assert_eq!(config.search.max_profiles, 3);

        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[search\n").unwrap();
        assert!(Config::load_from_dir(dir.path()).is_err());
    }

    #[test]
    fn test_validate_rejects_zero_counts() {
        assert!(Config::default().validate().is_ok());

        let config: Config = toml::from_str("[search]\nlimit = 0\n").unwrap();
        let err = config.validate().unwrap_err();
        assert_eq!(err.to_string(), "search.limit must be at least 1");

        let config: Config = toml::from_str("[general]\nconcurrency = 0\n").unwrap();
        assert!(config.validate().is_err());

        // An explicit flag fixes a bad file value
        let mut config: Config = toml::from_str("[analytics]\ntop_skills = 0\n").unwrap();
        let mut args = make_args();
        args.top_skills = Some(3);
        config.merge_with_args(&args);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_merge_with_args() {
        let mut config = Config::default();
        config.search.limit = 12;
        config.analytics.target_role = Some("Senior Software Engineer".to_string());

        let mut args = make_args();
        args.max_profiles = Some(4);
        args.latency_ms = Some(0);
        args.no_insights = true;
        args.seed = Some(99);

        config.merge_with_args(&args);
        assert_eq!(config.search.limit, 12);
        assert_eq!(config.search.max_profiles, 4);
        assert_eq!(config.search.search_latency_ms, 0);
        assert_eq!(config.search.profile_latency_ms, 0);
        assert_eq!(config.search.seed, Some(99));
        assert!(!config.analytics.include_insights);
        assert_eq!(
            config.analytics.target_role.as_deref(),
            Some("Senior Software Engineer")
        );
    }
}
