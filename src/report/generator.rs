//! Markdown and JSON report generation.
//!
//! This module renders a [`SearchAnalytics`] result as a Markdown report
//! with one table per statistic, or as pretty-printed JSON.

use crate::analysis::SkillInsights;
use crate::config::ReportConfig;
use crate::models::{
    ExperienceStat, IndustryStat, LanguageStat, LocationStat, Proficiency, ProfileSummary,
    ReportMetadata, SearchAnalytics, SkillStat,
};
use anyhow::{Context, Result};
use std::path::Path;

/// Width of the text bars in distribution tables.
const BAR_WIDTH: usize = 20;

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &SearchAnalytics, config: &ReportConfig) -> String {
    let mut output = String::new();

    output.push_str("# SkillFlow Report\n\n");

    output.push_str(&generate_metadata_section(&report.metadata, report.total_profiles));

    if let Some(ref message) = report.message {
        output.push_str(&format!("> {}\n\n", message));
    }

    if report.skill_analytics.is_empty() && report.profiles.is_empty() {
        output.push_str(&generate_footer());
        return output;
    }

    output.push_str(&generate_table_of_contents(report, config));
    output.push_str(&generate_skills_section(&report.skill_analytics));

    if config.include_proficiency {
        output.push_str(&generate_proficiency_section(&report.skill_analytics));
    }

    output.push_str(&generate_location_section(&report.location_distribution));
    output.push_str(&generate_experience_section(&report.experience_distribution));
    output.push_str(&generate_industry_section(&report.top_industries));
    output.push_str(&generate_language_section(&report.language_distribution));

    if let Some(ref insights) = report.insights {
        output.push_str(&generate_insights_section(insights));
    }

    if config.include_profiles {
        output.push_str(&generate_profiles_section(&report.profiles));
    }

    output.push_str(&generate_footer());

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata, total_profiles: usize) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Query:** \"{}\"\n", metadata.query));
    section.push_str(&format!(
        "- **Analysis Date:** {}\n",
        metadata.analysis_date.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!("- **Profiles Found:** {}\n", total_profiles));
    section.push_str(&format!(
        "- **Profiles Analyzed:** {}\n",
        metadata.profiles_analyzed
    ));
    if metadata.profiles_failed > 0 {
        section.push_str(&format!(
            "- **Profiles Skipped:** {}\n",
            metadata.profiles_failed
        ));
    }
    if let Some(seed) = metadata.seed {
        section.push_str(&format!("- **Seed:** `{}`\n", seed));
    }
    section.push_str(&format!(
        "- **Duration:** {:.1}s\n",
        metadata.duration_seconds
    ));
    section.push('\n');

    section
}

/// Generate the table of contents.
fn generate_table_of_contents(report: &SearchAnalytics, config: &ReportConfig) -> String {
    let mut toc = String::new();

    toc.push_str("## Table of Contents\n\n");
    toc.push_str("- [Metadata](#metadata)\n");
    toc.push_str("- [Top Skills](#top-skills)\n");
    if config.include_proficiency {
        toc.push_str("- [Proficiency Breakdown](#proficiency-breakdown)\n");
    }
    toc.push_str("- [Locations](#locations)\n");
    if !report.experience_distribution.is_empty() {
        toc.push_str("- [Experience](#experience)\n");
    }
    if !report.top_industries.is_empty() {
        toc.push_str("- [Top Employers](#top-employers)\n");
    }
    if !report.language_distribution.is_empty() {
        toc.push_str("- [Languages](#languages)\n");
    }
    if report.insights.is_some() {
        toc.push_str("- [Skill Insights](#skill-insights)\n");
    }
    if config.include_profiles {
        toc.push_str("- [Profiles](#profiles)\n");
    }
    toc.push('\n');

    toc
}

/// Render `count` as a bar scaled against `max`.
fn bar(count: usize, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let filled = ((count * BAR_WIDTH) + max - 1) / max;
    "█".repeat(filled.min(BAR_WIDTH))
}

/// Generate the top skills table.
fn generate_skills_section(skills: &[SkillStat]) -> String {
    let mut section = String::new();

    section.push_str("## Top Skills\n\n");

    if skills.is_empty() {
        section.push_str("No skills were found on the analyzed profiles.\n\n");
        return section;
    }

    section.push_str("| # | Skill | Profiles | Avg. Proficiency | Trend | Employers |\n");
    section.push_str("|:---:|:---|:---:|:---:|:---|:---|\n");

    for (i, skill) in skills.iter().enumerate() {
        section.push_str(&format!(
            "| {} | {} | {} | {:.2} | {} {} | {} |\n",
            i + 1,
            skill.skill_name,
            skill.frequency,
            skill.avg_proficiency,
            skill.trend.emoji(),
            skill.trend,
            skill.industries.join(", ")
        ));
    }
    section.push('\n');

    section
}

/// Generate the proficiency histogram table.
fn generate_proficiency_section(skills: &[SkillStat]) -> String {
    if skills.is_empty() {
        return String::new();
    }

    let mut section = String::new();

    section.push_str("## Proficiency Breakdown\n\n");
    section.push_str("| Skill |");
    for level in Proficiency::ALL {
        section.push_str(&format!(" {} |", level));
    }
    section.push_str("\n|:---|:---:|:---:|:---:|:---:|\n");

    for skill in skills {
        section.push_str(&format!("| {} |", skill.skill_name));
        for level in Proficiency::ALL {
            section.push_str(&format!(" {} |", skill.experience_levels.get(level)));
        }
        section.push('\n');
    }
    section.push('\n');

    section
}

/// Generate the location distribution table.
fn generate_location_section(locations: &[LocationStat]) -> String {
    let mut section = String::new();

    section.push_str("## Locations\n\n");
    section.push_str("| Country | Profiles | |\n");
    section.push_str("|:---|:---:|:---|\n");

    let max = locations.iter().map(|l| l.count).max().unwrap_or(0);
    for location in locations {
        section.push_str(&format!(
            "| {} | {} | {} |\n",
            location.country,
            location.count,
            bar(location.count, max)
        ));
    }
    section.push('\n');

    section
}

/// Generate the experience distribution table.
fn generate_experience_section(experience: &[ExperienceStat]) -> String {
    if experience.is_empty() {
        return String::new();
    }

    let mut section = String::new();

    section.push_str("## Experience\n\n");
    section.push_str("| Total Experience | Profiles |\n");
    section.push_str("|:---|:---:|\n");

    for stat in experience {
        section.push_str(&format!("| {} | {} |\n", stat.bracket, stat.count));
    }
    section.push('\n');

    section
}

/// Generate the top employers table.
fn generate_industry_section(industries: &[IndustryStat]) -> String {
    if industries.is_empty() {
        return String::new();
    }

    let mut section = String::new();

    section.push_str("## Top Employers\n\n");
    section.push_str("| Organization | Positions |\n");
    section.push_str("|:---|:---:|\n");

    for stat in industries {
        section.push_str(&format!("| {} | {} |\n", stat.industry, stat.count));
    }
    section.push('\n');

    section
}

/// Generate the spoken languages table.
fn generate_language_section(languages: &[LanguageStat]) -> String {
    if languages.is_empty() {
        return String::new();
    }

    let mut section = String::new();

    section.push_str("## Languages\n\n");
    section.push_str("| Language | Profiles |\n");
    section.push_str("|:---|:---:|\n");

    for stat in languages {
        section.push_str(&format!("| {} | {} |\n", stat.language, stat.count));
    }
    section.push('\n');

    section
}

/// Generate the insights section.
fn generate_insights_section(insights: &SkillInsights) -> String {
    let mut section = String::new();

    section.push_str("## Skill Insights\n\n");

    if !insights.correlations.is_empty() {
        section.push_str(&format!(
            "### Skills Related to {}\n\n",
            insights.primary_skill
        ));
        section.push_str("| Skill | Correlation | Confidence | Demand | Trend |\n");
        section.push_str("|:---|:---:|:---:|:---:|:---|\n");
        for corr in &insights.correlations {
            section.push_str(&format!(
                "| {} | {:.0}% | {:.0}% | {} | {} {} |\n",
                corr.skill,
                corr.correlation * 100.0,
                corr.confidence * 100.0,
                corr.market_demand,
                corr.trend.emoji(),
                corr.trend
            ));
        }
        section.push('\n');
    }

    if !insights.career_paths.is_empty() {
        section.push_str("### Career Paths\n\n");
        for path in &insights.career_paths {
            section.push_str(&format!(
                "- **{}** ({:.0}% likely, {}): ${}k-${}k. Needs {}\n",
                path.title,
                path.probability * 100.0,
                path.timeframe,
                path.salary_range.min / 1000,
                path.salary_range.max / 1000,
                path.required_skills.join(", ")
            ));
        }
        section.push('\n');
    }

    if !insights.market_insights.is_empty() {
        section.push_str("### Market Snapshot\n\n");
        section.push_str("| Skill | Demand | Supply | Competition | Openings | Avg. Salary | Growth |\n");
        section.push_str("|:---|:---:|:---:|:---:|:---:|:---:|:---:|\n");
        for insight in &insights.market_insights {
            section.push_str(&format!(
                "| {} | {} | {} | {} | {} | ${} | {:.1}% |\n",
                insight.skill,
                insight.demand,
                insight.supply,
                insight.competition,
                insight.opportunities,
                insight.average_salary,
                insight.growth_rate
            ));
        }
        section.push('\n');
    }

    if let Some(ref role) = insights.target_role {
        section.push_str(&format!("### Gaps for {}\n\n", role));
        if insights.skill_gaps.is_empty() {
            section.push_str("No gaps found for this role.\n\n");
        } else {
            for gap in &insights.skill_gaps {
                section.push_str(&format!(
                    "- **{}** ({}): {} -> {}. Resources: {}\n",
                    gap.skill,
                    gap.priority,
                    gap.current_level,
                    gap.recommended_level,
                    gap.learning_resources.join("; ")
                ));
            }
            section.push('\n');
        }
    }

    if let Some(ref forecast) = insights.forecast {
        section.push_str(&format!("### Demand Forecast for {}\n\n", insights.primary_skill));
        section.push_str(&format!(
            "Current demand **{}**, predicted **{}** (confidence {:.0}%).\n\n",
            forecast.current_demand,
            forecast.predicted_demand,
            forecast.confidence * 100.0
        ));
        for factor in &forecast.factors {
            section.push_str(&format!("- {}\n", factor));
        }
        section.push('\n');
    }

    section
}

/// Generate the profiles table.
fn generate_profiles_section(profiles: &[ProfileSummary]) -> String {
    let mut section = String::new();

    section.push_str("## Profiles\n\n");
    section.push_str("| Name | Headline | Location | Top Skills |\n");
    section.push_str("|:---|:---|:---|:---|\n");

    for profile in profiles {
        section.push_str(&format!(
            "| {} (`{}`) | {} | {} | {} |\n",
            profile.name,
            profile.username,
            profile.headline.as_deref().unwrap_or("-"),
            profile.location.as_deref().unwrap_or("-"),
            profile.top_skills.join(", ")
        ));
    }
    section.push('\n');

    section
}

/// Generate the report footer.
fn generate_footer() -> String {
    let mut footer = String::new();

    footer.push_str("---\n\n");
    footer.push_str("*Demo data. Report generated by SkillFlow.*\n");

    footer
}

/// Generate a JSON report.
pub fn generate_json_report(report: &SearchAnalytics) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

/// Write rendered report content to a file.
pub fn write_report(content: &str, path: &Path) -> Result<()> {
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write report to {}", path.display()))
}
