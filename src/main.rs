//! SkillFlow - talent analytics over demo professional profiles
//!
//! A CLI tool that searches a catalog of demo profiles, aggregates their
//! skills, proficiency levels, locations and employers, and writes a
//! Markdown or JSON report.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (invalid arguments, config, report write, etc.)
//!   2 - No profiles matched and --fail-on-empty was set

mod analysis;
mod cli;
mod config;
mod models;
mod report;
mod store;

use analysis::InsightOptions;
use anyhow::{Context, Result};
use chrono::{Datelike, Utc};
use cli::{Args, OutputFormat};
use config::{Config, CONFIG_FILE_NAME};
use models::{Profile, ProfileSummary, ReportMetadata, SearchAnalytics};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use store::{BatchOptions, DemoProfileStore, StoreOptions};
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Number of top skills used to derive insights.
const INSIGHT_SKILLS: usize = 5;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle early-exit modes (no logging needed)
    if args.init_config {
        return handle_init_config();
    }
    if args.list_topics {
        handle_list_topics();
        return Ok(());
    }

    // Load configuration before logging so the config file can enable verbose output
    let (mut config, config_source) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };
    config.merge_with_args(&args);
    if let Err(e) = config.validate() {
        eprintln!("Error: invalid configuration: {:#}", e);
        std::process::exit(1);
    }

    init_logging(&args, &config);

    info!("SkillFlow v{}", env!("CARGO_PKG_VERSION"));
    info!("{}", config_source);
    debug!("Arguments: {:?}", args);

    match run_search(&args, &config).await {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Search failed: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .skillflow.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE_NAME);
    println!("   Edit it to customize search limits, analytics and report sections.");
    Ok(())
}

/// Handle --list-topics.
fn handle_list_topics() {
    println!("Available demo topics:");
    for topic in DemoProfileStore::topics() {
        println!("  - {}", topic);
    }
    println!("\nAny other query is matched against profile titles and summaries,");
    println!("e.g. \"data scientist\" or \"devops\".");
}

/// Initialize logging based on verbosity settings.
///
/// `RUST_LOG` overrides the level derived from the flags.
fn init_logging(args: &Args, config: &Config) {
    let level = if !args.quiet && config.general.verbose {
        tracing::Level::DEBUG
    } else {
        args.log_level()
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Load configuration from file or use defaults.
///
/// Returns the configuration together with a description of where it came from.
fn load_config(args: &Args) -> Result<(Config, String)> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        let config = Config::load(config_path)?;
        return Ok((config, format!("Loaded config from: {}", config_path.display())));
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => Ok((config, format!("Loaded default config from {}", CONFIG_FILE_NAME))),
        Ok(None) => Ok((Config::default(), "No config file found, using defaults".to_string())),
        Err(e) => Ok((
            Config::default(),
            format!("Failed to load config ({:#}), using defaults", e),
        )),
    }
}

/// Run the search and report workflow. Returns the exit code (0 or 2).
async fn run_search(args: &Args, config: &Config) -> Result<i32> {
    let start_time = Instant::now();
    let query = args.query_text().to_string();
    let output_path = PathBuf::from(&config.general.output);

    let store = DemoProfileStore::new(StoreOptions {
        seed: config.search.seed,
        search_latency: Duration::from_millis(config.search.search_latency_ms),
        profile_latency: Duration::from_millis(config.search.profile_latency_ms),
        current_year: Utc::now().year(),
    });

    // Step 1: Search
    println!("🔍 Searching demo profiles for \"{}\"", query);
    let hits = store.search_people(&query, config.search.limit).await;

    let mut metadata = ReportMetadata {
        query: query.clone(),
        analysis_date: Utc::now(),
        profiles_analyzed: 0,
        profiles_failed: 0,
        seed: Some(store.seed()),
        duration_seconds: 0.0,
    };

    if hits.is_empty() {
        let message = no_results_message(&query);
        warn!("{}", message);

        metadata.duration_seconds = start_time.elapsed().as_secs_f64();
        let analytics = SearchAnalytics::empty(metadata, message.clone());
        save_report(&analytics, args.format, config, &output_path)?;

        println!("\n⚠️  {}", message);
        println!("   Report saved to: {}", output_path.display());

        if args.fail_on_empty {
            eprintln!("\n⛔ No profiles matched. Failing (exit code 2).");
            return Ok(2);
        }
        return Ok(0);
    }

    println!("✅ Found {} demo profiles", hits.len());

    // Step 2: Fetch detailed profiles
    let usernames: Vec<String> = hits
        .iter()
        .map(|hit| hit.username.to_string())
        .filter(|username| !username.is_empty())
        .take(config.search.max_profiles)
        .collect();

    println!("🧬 Fetching {} detailed profiles...", usernames.len());
    let batch = store
        .batch_get_profiles(
            &usernames,
            &BatchOptions {
                concurrency: config.general.concurrency,
                show_progress: !args.quiet,
            },
        )
        .await;

    let mut profiles_failed = batch.failed.len();
    let profiles = if config.analytics.strict {
        let (valid, rejected) = retain_valid(batch.profiles);
        profiles_failed += rejected;
        valid
    } else {
        batch.profiles
    };

    // Step 3: Aggregate
    println!("📊 Analyzing {} profiles...", profiles.len());
    metadata.profiles_analyzed = profiles.len();
    metadata.profiles_failed = profiles_failed;

    let insight_options = InsightOptions {
        target_role: config.analytics.target_role.clone(),
        forecast: args.forecast,
    };
    let mut rng = StdRng::seed_from_u64(store.seed());

    let mut analytics = analyze_profiles(
        &profiles,
        hits.len(),
        config,
        &insight_options,
        metadata,
        i64::from(Utc::now().year()),
        &mut rng,
    );
    analytics.metadata.duration_seconds = start_time.elapsed().as_secs_f64();

    // Step 4: Render and save
    save_report(&analytics, args.format, config, &output_path)?;

    print_summary(&analytics);
    println!(
        "\n✅ Analysis complete! Report saved to: {}",
        output_path.display()
    );

    Ok(0)
}

/// Message shown when a query matches no profiles.
fn no_results_message(query: &str) -> String {
    let mut suggestions: Vec<String> = DemoProfileStore::topics()
        .into_iter()
        .map(|t| format!("\"{}\"", t))
        .collect();
    suggestions.push("\"data scientist\"".to_string());

    format!(
        "No demo profiles found for \"{}\". Try: {}",
        query,
        suggestions.join(", ")
    )
}

/// Drop profiles that fail validation. Returns the kept profiles and the number dropped.
fn retain_valid(profiles: Vec<Profile>) -> (Vec<Profile>, usize) {
    let mut rejected = 0;

    let valid = profiles
        .into_iter()
        .filter(|profile| match profile.validate() {
            Ok(()) => true,
            Err(e) => {
                warn!("Dropping malformed profile: {}", e);
                rejected += 1;
                false
            }
        })
        .collect();

    (valid, rejected)
}

/// Aggregate fetched profiles into a report.
fn analyze_profiles<R: Rng + ?Sized>(
    profiles: &[Profile],
    total_hits: usize,
    config: &Config,
    insight_options: &InsightOptions,
    metadata: ReportMetadata,
    current_year: i64,
    rng: &mut R,
) -> SearchAnalytics {
    let mut skill_analytics = analysis::compute_skill_statistics(profiles);
    let location_distribution = analysis::compute_location_distribution(profiles);
    let experience_distribution = analysis::compute_experience_distribution(profiles, current_year);
    let top_industries =
        analysis::compute_top_industries(profiles, config.analytics.top_industries);
    let language_distribution = analysis::compute_language_distribution(profiles);

    debug!(
        "Aggregated {} distinct skills across {} countries",
        skill_analytics.len(),
        location_distribution.len()
    );

    let insights = if config.analytics.include_insights {
        let top = analysis::top_skill_names(&skill_analytics, INSIGHT_SKILLS);
        analysis::build_insights(&top, insight_options, rng)
    } else {
        None
    };

    skill_analytics.truncate(config.analytics.top_skills);

    SearchAnalytics {
        metadata,
        total_profiles: total_hits,
        skill_analytics,
        location_distribution,
        experience_distribution,
        top_industries,
        language_distribution,
        profiles: profiles.iter().map(ProfileSummary::from).collect(),
        insights,
        message: None,
        is_demo: true,
    }
}

/// Render the report in the requested format and write it out.
fn save_report(
    analytics: &SearchAnalytics,
    format: OutputFormat,
    config: &Config,
    path: &Path,
) -> Result<()> {
    let output = match format {
        OutputFormat::Json => report::generate_json_report(analytics)?,
        OutputFormat::Markdown => report::generate_markdown_report(analytics, &config.report),
    };

    report::write_report(&output, path)
}

/// Print a short console summary.
fn print_summary(analytics: &SearchAnalytics) {
    println!("\n📊 Analytics Summary:");
    println!("   Profiles found: {}", analytics.total_profiles);
    println!("   Profiles analyzed: {}", analytics.metadata.profiles_analyzed);
    if analytics.metadata.profiles_failed > 0 {
        println!("   Profiles skipped: {}", analytics.metadata.profiles_failed);
    }

    for skill in analytics.skill_analytics.iter().take(5) {
        println!(
            "   - {} {}: {} profiles, avg {:.2}",
            skill.trend.emoji(),
            skill.skill_name,
            skill.frequency,
            skill.avg_proficiency
        );
    }

    if let Some(top) = analytics.location_distribution.first() {
        println!("   Top location: {} ({})", top.country, top.count);
    }
    println!("   Duration: {:.1}s", analytics.metadata.duration_seconds);
}
