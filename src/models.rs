//! Data models for the talent analytics tool.
//!
//! This module contains the profile records supplied by the profile store,
//! the statistics derived from them, and the report envelope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Proficiency level of a skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Proficiency {
    Novice,
    Intermediate,
    Advanced,
    Expert,
}

impl Proficiency {
    /// All levels, lowest first.
    pub const ALL: [Proficiency; 4] = [
        Proficiency::Novice,
        Proficiency::Intermediate,
        Proficiency::Advanced,
        Proficiency::Expert,
    ];

    /// Numeric weight used for averaging (1-4).
    pub fn weight(&self) -> u32 {
        match self {
            Proficiency::Novice => 1,
            Proficiency::Intermediate => 2,
            Proficiency::Advanced => 3,
            Proficiency::Expert => 4,
        }
    }
}

impl fmt::Display for Proficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Proficiency::Novice => write!(f, "Novice"),
            Proficiency::Intermediate => write!(f, "Intermediate"),
            Proficiency::Advanced => write!(f, "Advanced"),
            Proficiency::Expert => write!(f, "Expert"),
        }
    }
}

/// Trend classification of a skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Rising,
    Stable,
    Declining,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Rising => write!(f, "Rising"),
            Trend::Stable => write!(f, "Stable"),
            Trend::Declining => write!(f, "Declining"),
        }
    }
}

impl Trend {
    /// Returns an emoji representation of the trend.
    pub fn emoji(&self) -> &'static str {
        match self {
            Trend::Rising => "📈",
            Trend::Stable => "➡️",
            Trend::Declining => "📉",
        }
    }
}

/// Where a person is based.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Display name, e.g. "Madrid, Spain".
    pub name: String,
    /// Country component.
    pub country: String,
}

/// A single skill on a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub proficiency: Proficiency,
}

/// An organization attached to an experience or education entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub name: String,
}

/// A job or education entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    /// Role or degree name.
    pub name: String,
    #[serde(default)]
    pub organizations: Vec<Organization>,
    /// Start year as given by the source (may not parse).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_year: Option<String>,
    /// End year; `None` for a current position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_year: Option<String>,
}

/// A spoken language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpokenLanguage {
    pub language: String,
    pub fluency: String,
}

/// An area of interest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interest {
    pub name: String,
}

/// Errors raised when validating a profile at the store boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("profile has an empty username")]
    EmptyUsername,

    #[error("profile '{username}' has a skill with an empty name at position {index}")]
    EmptySkillName { username: String, index: usize },
}

/// A professional profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub experiences: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Experience>,
    #[serde(default)]
    pub languages: Vec<SpokenLanguage>,
    #[serde(default)]
    pub interests: Vec<Interest>,
}

impl Profile {
    /// Country of the profile, if known and non-empty.
    pub fn country(&self) -> Option<&str> {
        self.location
            .as_ref()
            .map(|l| l.country.as_str())
            .filter(|c| !c.is_empty())
    }

    /// Distinct, non-empty organization names across all experiences,
    /// in order of first appearance.
    pub fn organization_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for org in self.experiences.iter().flat_map(|e| &e.organizations) {
            let name = org.name.as_str();
            if !name.is_empty() && !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    /// Check that the profile is well formed.
    ///
    /// The aggregator tolerates malformed profiles; this is only used when
    /// strict mode is enabled.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.username.trim().is_empty() {
            return Err(ProfileError::EmptyUsername);
        }
        if let Some(index) = self.skills.iter().position(|s| s.name.trim().is_empty()) {
            return Err(ProfileError::EmptySkillName {
                username: self.username.clone(),
                index,
            });
        }
        Ok(())
    }
}

/// Count of skill observations per proficiency level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProficiencyHistogram {
    pub novice: usize,
    pub intermediate: usize,
    pub advanced: usize,
    pub expert: usize,
}

impl ProficiencyHistogram {
    /// Record one observation.
    pub fn record(&mut self, level: Proficiency) {
        match level {
            Proficiency::Novice => self.novice += 1,
            Proficiency::Intermediate => self.intermediate += 1,
            Proficiency::Advanced => self.advanced += 1,
            Proficiency::Expert => self.expert += 1,
        }
    }

    /// Count for a single level.
    pub fn get(&self, level: Proficiency) -> usize {
        match level {
            Proficiency::Novice => self.novice,
            Proficiency::Intermediate => self.intermediate,
            Proficiency::Advanced => self.advanced,
            Proficiency::Expert => self.expert,
        }
    }

    /// Total number of observations.
    pub fn total(&self) -> usize {
        self.novice + self.intermediate + self.advanced + self.expert
    }
}

/// Aggregated statistics for one skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillStat {
    /// Skill name as it appears on profiles.
    pub skill_name: String,
    /// Number of profiles listing the skill.
    pub frequency: usize,
    /// Mean proficiency weight (1.0 - 4.0).
    pub avg_proficiency: f64,
    /// Up to five organization names, in first-seen order.
    pub industries: Vec<String>,
    /// Observations per proficiency level.
    pub experience_levels: ProficiencyHistogram,
    pub trend: Trend,
}

/// Number of profiles per country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationStat {
    pub country: String,
    pub count: usize,
}

/// Total-experience bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExperienceBracket {
    #[serde(rename = "0-2 years")]
    UnderTwo,
    #[serde(rename = "2-5 years")]
    TwoToFive,
    #[serde(rename = "5-10 years")]
    FiveToTen,
    #[serde(rename = "10+ years")]
    TenPlus,
}

impl ExperienceBracket {
    /// Bucket a total number of years.
    pub fn from_years(years: i64) -> Self {
        if years < 2 {
            ExperienceBracket::UnderTwo
        } else if years < 5 {
            ExperienceBracket::TwoToFive
        } else if years < 10 {
            ExperienceBracket::FiveToTen
        } else {
            ExperienceBracket::TenPlus
        }
    }
}

impl fmt::Display for ExperienceBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExperienceBracket::UnderTwo => write!(f, "0-2 years"),
            ExperienceBracket::TwoToFive => write!(f, "2-5 years"),
            ExperienceBracket::FiveToTen => write!(f, "5-10 years"),
            ExperienceBracket::TenPlus => write!(f, "10+ years"),
        }
    }
}

/// Number of profiles per experience bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceStat {
    pub bracket: ExperienceBracket,
    pub count: usize,
}

/// Number of experience entries per organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndustryStat {
    pub industry: String,
    pub count: usize,
}

/// Number of profiles speaking a language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageStat {
    pub language: String,
    pub count: usize,
}

/// Short view of a profile for the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub name: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    pub top_skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl From<&Profile> for ProfileSummary {
    fn from(profile: &Profile) -> Self {
        Self {
            name: profile.name.clone(),
            username: profile.username.clone(),
            headline: profile.headline.clone(),
            top_skills: profile.skills.iter().take(5).map(|s| s.name.clone()).collect(),
            location: profile.location.as_ref().map(|l| l.name.clone()),
        }
    }
}

/// Metadata about a report run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// The query as typed by the user.
    pub query: String,
    /// Date and time of the analysis.
    pub analysis_date: DateTime<Utc>,
    /// Number of profiles fetched in detail and aggregated.
    pub profiles_analyzed: usize,
    /// Number of profiles that could not be fetched or were rejected.
    pub profiles_failed: usize,
    /// Seed used for the demo data, if fixed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Duration of the run in seconds.
    pub duration_seconds: f64,
}

/// The complete analytics report for one query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchAnalytics {
    pub metadata: ReportMetadata,
    /// Number of search hits (before detail fetching).
    pub total_profiles: usize,
    pub skill_analytics: Vec<SkillStat>,
    pub location_distribution: Vec<LocationStat>,
    pub experience_distribution: Vec<ExperienceStat>,
    pub top_industries: Vec<IndustryStat>,
    pub language_distribution: Vec<LanguageStat>,
    pub profiles: Vec<ProfileSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insights: Option<crate::analysis::SkillInsights>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub is_demo: bool,
}

impl SearchAnalytics {
    /// Creates an empty report for a query that matched nothing.
    pub fn empty(metadata: ReportMetadata, message: String) -> Self {
        Self {
            metadata,
            total_profiles: 0,
            skill_analytics: Vec::new(),
            location_distribution: Vec::new(),
            experience_distribution: Vec::new(),
            top_industries: Vec::new(),
            language_distribution: Vec::new(),
            profiles: Vec::new(),
            insights: None,
            message: Some(message),
            is_demo: true,
        }
    }
}
