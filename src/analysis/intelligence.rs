//! Rule-based skill intelligence.
//!
//! Correlations, career paths, skill gaps and market figures come from fixed
//! lookup tables. Where a figure is not in the tables it is filled in from
//! the caller's random source, so a seeded RNG gives repeatable reports.

use crate::models::Trend;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Market demand band for a skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DemandLevel {
    High,
    Medium,
    Low,
}

impl DemandLevel {
    fn from_score(demand: u32) -> Self {
        if demand > 80 {
            DemandLevel::High
        } else if demand > 60 {
            DemandLevel::Medium
        } else {
            DemandLevel::Low
        }
    }
}

impl fmt::Display for DemandLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DemandLevel::High => write!(f, "High"),
            DemandLevel::Medium => write!(f, "Medium"),
            DemandLevel::Low => write!(f, "Low"),
        }
    }
}

/// How crowded the talent pool for a skill is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Competition {
    Low,
    Medium,
    High,
}

impl fmt::Display for Competition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Competition::Low => write!(f, "Low"),
            Competition::Medium => write!(f, "Medium"),
            Competition::High => write!(f, "High"),
        }
    }
}

/// Priority of closing a skill gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GapPriority {
    Critical,
    High,
    Medium,
    Low,
}

impl fmt::Display for GapPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GapPriority::Critical => write!(f, "Critical"),
            GapPriority::High => write!(f, "High"),
            GapPriority::Medium => write!(f, "Medium"),
            GapPriority::Low => write!(f, "Low"),
        }
    }
}

/// Prediction horizon for demand forecasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Horizon {
    Short,
    Medium,
    Long,
}

impl Horizon {
    fn multiplier(&self) -> f64 {
        match self {
            Horizon::Short => 1.1,
            Horizon::Medium => 1.3,
            Horizon::Long => 1.8,
        }
    }
}

/// A skill that tends to appear alongside another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillCorrelation {
    pub skill: String,
    pub correlation: f64,
    pub confidence: f64,
    pub market_demand: DemandLevel,
    pub trend: Trend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRange {
    pub min: u32,
    pub max: u32,
}

/// A possible next role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerPath {
    pub title: String,
    pub probability: f64,
    pub timeframe: String,
    pub required_skills: Vec<String>,
    pub salary_range: SalaryRange,
}

/// A skill missing for a target role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGap {
    pub skill: String,
    pub current_level: String,
    pub recommended_level: String,
    pub priority: GapPriority,
    pub learning_resources: Vec<String>,
}

/// Market figures for one skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketInsight {
    pub skill: String,
    pub demand: u32,
    pub supply: u32,
    pub competition: Competition,
    pub opportunities: u32,
    pub average_salary: u32,
    pub growth_rate: f64,
}

/// Forecast of demand for a skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandPrediction {
    pub current_demand: u32,
    pub predicted_demand: u32,
    pub confidence: f64,
    pub factors: Vec<String>,
}

/// Insights attached to a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillInsights {
    pub primary_skill: String,
    pub correlations: Vec<SkillCorrelation>,
    pub career_paths: Vec<CareerPath>,
    pub market_insights: Vec<MarketInsight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_role: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skill_gaps: Vec<SkillGap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast: Option<DemandPrediction>,
}

/// Optional parts of the insights block.
#[derive(Debug, Clone, Default)]
pub struct InsightOptions {
    /// Role to compute skill gaps against.
    pub target_role: Option<String>,
    /// Horizon for a demand forecast of the primary skill.
    pub forecast: Option<Horizon>,
}

struct MarketTrend {
    skill: &'static str,
    demand: u32,
    trend: Trend,
    growth: f64,
}

struct Requirement {
    skill: &'static str,
    level: &'static str,
    priority: GapPriority,
}

/// (primary skill, [(related skill, correlation, confidence)])
const CORRELATIONS: &[(&str, &[(&str, f64, f64)])] = &[
    (
        "React",
        &[
            ("JavaScript", 0.95, 0.98),
            ("TypeScript", 0.78, 0.92),
            ("Node.js", 0.72, 0.89),
            ("Redux", 0.65, 0.85),
            ("Next.js", 0.58, 0.82),
            ("GraphQL", 0.45, 0.77),
            ("Jest", 0.52, 0.79),
        ],
    ),
    (
        "Python",
        &[
            ("Django", 0.68, 0.91),
            ("FastAPI", 0.45, 0.83),
            ("PostgreSQL", 0.72, 0.88),
            ("Docker", 0.58, 0.86),
            ("AWS", 0.62, 0.84),
            ("Machine Learning", 0.55, 0.79),
            ("Pandas", 0.48, 0.82),
        ],
    ),
    (
        "JavaScript",
        &[
            ("HTML5", 0.92, 0.97),
            ("CSS3", 0.89, 0.95),
            ("React", 0.73, 0.91),
            ("Node.js", 0.67, 0.88),
            ("TypeScript", 0.61, 0.85),
            ("Vue.js", 0.42, 0.78),
        ],
    ),
    (
        "Machine Learning",
        &[
            ("Python", 0.88, 0.94),
            ("TensorFlow", 0.72, 0.89),
            ("Scikit-learn", 0.68, 0.87),
            ("Pandas", 0.75, 0.91),
            ("NumPy", 0.71, 0.89),
            ("Jupyter", 0.65, 0.86),
        ],
    ),
];

const MARKET_TRENDS: &[MarketTrend] = &[
    MarketTrend { skill: "React", demand: 92, trend: Trend::Rising, growth: 15.2 },
    MarketTrend { skill: "Python", demand: 88, trend: Trend::Rising, growth: 18.7 },
    MarketTrend { skill: "TypeScript", demand: 85, trend: Trend::Rising, growth: 22.3 },
    MarketTrend { skill: "Node.js", demand: 78, trend: Trend::Stable, growth: 8.4 },
    MarketTrend { skill: "Machine Learning", demand: 95, trend: Trend::Rising, growth: 28.5 },
    MarketTrend { skill: "Docker", demand: 82, trend: Trend::Rising, growth: 12.8 },
    MarketTrend { skill: "Kubernetes", demand: 89, trend: Trend::Rising, growth: 31.2 },
    MarketTrend { skill: "GraphQL", demand: 71, trend: Trend::Rising, growth: 19.6 },
];

const BASE_SALARIES: &[(&str, u32)] = &[
    ("Machine Learning", 145_000),
    ("Kubernetes", 135_000),
    ("React", 115_000),
    ("Python", 120_000),
    ("TypeScript", 125_000),
    ("Node.js", 110_000),
    ("Docker", 125_000),
    ("AWS", 130_000),
];

const DEFAULT_SALARY: u32 = 100_000;

const POPULAR_SKILLS: &[&str] = &["JavaScript", "Python", "React", "Java"];
const EMERGING_SKILLS: &[&str] = &["Rust", "Go", "Kubernetes", "Machine Learning"];

const ROLE_REQUIREMENTS: &[(&str, &[Requirement])] = &[
    (
        "Senior Software Engineer",
        &[
            Requirement { skill: "System Design", level: "advanced", priority: GapPriority::Critical },
            Requirement { skill: "Leadership", level: "intermediate", priority: GapPriority::High },
            Requirement { skill: "Cloud Architecture", level: "intermediate", priority: GapPriority::High },
            Requirement { skill: "Performance Optimization", level: "advanced", priority: GapPriority::Medium },
        ],
    ),
    (
        "Machine Learning Engineer",
        &[
            Requirement { skill: "MLOps", level: "advanced", priority: GapPriority::Critical },
            Requirement { skill: "Model Deployment", level: "advanced", priority: GapPriority::Critical },
            Requirement { skill: "Data Engineering", level: "intermediate", priority: GapPriority::High },
            Requirement { skill: "Statistics", level: "advanced", priority: GapPriority::High },
        ],
    ),
];

const LEARNING_RESOURCES: &[(&str, &[&str])] = &[
    (
        "System Design",
        &[
            "High Scalability Blog",
            "Designing Data-Intensive Applications",
            "System Design Interview Course",
        ],
    ),
    (
        "MLOps",
        &[
            "MLOps Specialization (Coursera)",
            "MLflow Documentation",
            "Kubeflow Tutorials",
        ],
    ),
    (
        "Leadership",
        &[
            "The Manager's Path",
            "Leadership in Tech Bootcamp",
            "Engineering Management Newsletter",
        ],
    ),
    (
        "Cloud Architecture",
        &[
            "AWS Solutions Architect Certification",
            "Cloud Architecture Patterns",
            "Multi-Cloud Strategy Guide",
        ],
    ),
];

const DEFAULT_RESOURCES: &[&str] = &["Online Courses", "Documentation", "Practice Projects"];

const DEMAND_FACTORS: &[(&str, &[&str])] = &[
    (
        "React",
        &[
            "Growing SPA adoption",
            "Enterprise digital transformation",
            "Mobile-first development",
        ],
    ),
    (
        "Python",
        &["AI/ML boom", "Data science growth", "Automation demand"],
    ),
    (
        "Machine Learning",
        &[
            "AI investment surge",
            "Business intelligence needs",
            "Automation trends",
        ],
    ),
    (
        "Kubernetes",
        &[
            "Cloud-native adoption",
            "Microservices architecture",
            "DevOps transformation",
        ],
    ),
];

const DEFAULT_FACTORS: &[&str] = &["Industry growth", "Digital transformation", "Market demand"];

fn lookup<V: Copy>(table: &[(&str, V)], key: &str) -> Option<V> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

fn market_trend(skill: &str) -> Option<&'static MarketTrend> {
    MARKET_TRENDS.iter().find(|t| t.skill == skill)
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Demand band for a skill (unlisted skills count as demand 60).
pub fn market_demand(skill: &str) -> DemandLevel {
    DemandLevel::from_score(market_trend(skill).map(|t| t.demand).unwrap_or(60))
}

/// Competition for a skill based on the popular/emerging lists.
pub fn competition_level(skill: &str) -> Competition {
    if POPULAR_SKILLS.contains(&skill) {
        Competition::High
    } else if EMERGING_SKILLS.contains(&skill) {
        Competition::Medium
    } else {
        Competition::Low
    }
}

/// Average salary for a skill.
pub fn base_salary(skill: &str) -> u32 {
    lookup(BASE_SALARIES, skill).unwrap_or(DEFAULT_SALARY)
}

/// Skills correlated with `primary_skill`, strongest first.
pub fn analyze_skill_correlations(primary_skill: &str) -> Vec<SkillCorrelation> {
    let rows = lookup(CORRELATIONS, primary_skill).unwrap_or(&[]);

    let mut correlations: Vec<SkillCorrelation> = rows
        .iter()
        .map(|(skill, correlation, confidence)| SkillCorrelation {
            skill: skill.to_string(),
            correlation: *correlation,
            confidence: *confidence,
            market_demand: market_demand(skill),
            trend: market_trend(skill).map(|t| t.trend).unwrap_or(Trend::Stable),
        })
        .collect();

    correlations.sort_by(|a, b| {
        b.correlation
            .partial_cmp(&a.correlation)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    correlations
}

/// Candidate next roles for someone holding `current_skills`.
pub fn generate_career_paths(current_skills: &[String]) -> Vec<CareerPath> {
    let has = |skill: &str| current_skills.iter().any(|s| s == skill);
    let mut paths = Vec::new();

    if has("Python") || has("Machine Learning") {
        paths.push(CareerPath {
            title: "Senior Machine Learning Engineer".to_string(),
            probability: 0.78,
            timeframe: "18-24 months".to_string(),
            required_skills: to_strings(&["TensorFlow", "PyTorch", "MLOps", "Cloud Platforms"]),
            salary_range: SalaryRange { min: 130_000, max: 200_000 },
        });
    }

    if has("React") || has("JavaScript") {
        paths.push(CareerPath {
            title: "Senior Full Stack Engineer".to_string(),
            probability: 0.72,
            timeframe: "12-18 months".to_string(),
            required_skills: to_strings(&["TypeScript", "Cloud Architecture", "System Design"]),
            salary_range: SalaryRange { min: 120_000, max: 180_000 },
        });
    }

    if has("Docker") || has("AWS") {
        paths.push(CareerPath {
            title: "Platform Engineering Lead".to_string(),
            probability: 0.68,
            timeframe: "15-24 months".to_string(),
            required_skills: to_strings(&["Kubernetes", "Terraform", "Monitoring", "Security"]),
            salary_range: SalaryRange { min: 140_000, max: 220_000 },
        });
    }

    if has("Python") || has("SQL") {
        paths.push(CareerPath {
            title: "Senior Data Scientist".to_string(),
            probability: 0.65,
            timeframe: "20-30 months".to_string(),
            required_skills: to_strings(&[
                "Advanced Statistics",
                "A/B Testing",
                "Business Intelligence",
            ]),
            salary_range: SalaryRange { min: 125_000, max: 190_000 },
        });
    }

    paths.sort_by(|a, b| {
        b.probability
            .partial_cmp(&a.probability)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    paths
}

/// Requirements of `target_role` not covered by `current_skills`.
pub fn identify_skill_gaps(current_skills: &[String], target_role: &str) -> Vec<SkillGap> {
    let requirements = lookup(ROLE_REQUIREMENTS, target_role).unwrap_or(&[]);

    requirements
        .iter()
        .filter(|req| !current_skills.iter().any(|s| s == req.skill))
        .map(|req| SkillGap {
            skill: req.skill.to_string(),
            current_level: "beginner".to_string(),
            recommended_level: req.level.to_string(),
            priority: req.priority,
            learning_resources: learning_resources(req.skill),
        })
        .collect()
}

/// Suggested resources for learning a skill.
pub fn learning_resources(skill: &str) -> Vec<String> {
    to_strings(lookup(LEARNING_RESOURCES, skill).unwrap_or(DEFAULT_RESOURCES))
}

/// Factors driving demand for a skill.
pub fn demand_factors(skill: &str) -> Vec<String> {
    to_strings(lookup(DEMAND_FACTORS, skill).unwrap_or(DEFAULT_FACTORS))
}

/// Market figures for each skill, highest demand first.
pub fn generate_market_insights<R: Rng + ?Sized>(
    skills: &[String],
    rng: &mut R,
) -> Vec<MarketInsight> {
    let mut insights: Vec<MarketInsight> = skills
        .iter()
        .map(|skill| {
            let trend = market_trend(skill);
            let demand = trend.map(|t| t.demand).unwrap_or_else(|| rng.gen_range(60..100));
            let supply = rng.gen_range(50..80);
            let opportunities = rng.gen_range(500..1500);
            let growth_rate = trend
                .map(|t| t.growth)
                .unwrap_or_else(|| rng.gen_range(5..25) as f64);

            MarketInsight {
                skill: skill.clone(),
                demand,
                supply,
                competition: competition_level(skill),
                opportunities,
                average_salary: base_salary(skill),
                growth_rate,
            }
        })
        .collect();

    insights.sort_by_key(|i| std::cmp::Reverse(i.demand));
    insights
}

/// Forecast demand for a skill over a horizon.
pub fn predict_skill_demand<R: Rng + ?Sized>(
    skill: &str,
    horizon: Horizon,
    rng: &mut R,
) -> DemandPrediction {
    let current = market_trend(skill).map(|t| t.demand).unwrap_or(70);
    let predicted = (current as f64 * horizon.multiplier()).min(100.0);

    DemandPrediction {
        current_demand: current,
        predicted_demand: predicted.round() as u32,
        confidence: 0.75 + rng.gen::<f64>() * 0.2,
        factors: demand_factors(skill),
    }
}

/// Build the insights block for a report from its most frequent skills.
///
/// Returns `None` when there are no skills.
pub fn build_insights<R: Rng + ?Sized>(
    top_skills: &[String],
    options: &InsightOptions,
    rng: &mut R,
) -> Option<SkillInsights> {
    let primary = top_skills.first()?;

    let skill_gaps = options
        .target_role
        .as_deref()
        .map(|role| identify_skill_gaps(top_skills, role))
        .unwrap_or_default();

    Some(SkillInsights {
        primary_skill: primary.clone(),
        correlations: analyze_skill_correlations(primary),
        career_paths: generate_career_paths(top_skills),
        market_insights: generate_market_insights(top_skills, rng),
        target_role: options.target_role.clone(),
        skill_gaps,
        forecast: options
            .forecast
            .map(|horizon| predict_skill_demand(primary, horizon, rng)),
    })
}
