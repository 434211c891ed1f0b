//! Profile aggregation and statistics.
//!
//! This module turns a list of profiles into skill, location, experience,
//! industry and language statistics. Every function here is pure: it
//! allocates its own result and keeps no state between calls.

use crate::models::{
    ExperienceBracket, ExperienceStat, IndustryStat, LanguageStat, LocationStat, Proficiency,
    ProficiencyHistogram, Profile, SkillStat, Trend,
};
use std::cmp::Reverse;
use std::collections::HashMap;

/// Maximum number of organization names kept per skill.
pub const MAX_SKILL_INDUSTRIES: usize = 5;

/// Maximum number of countries in the location distribution.
pub const MAX_LOCATIONS: usize = 10;

/// Frequency above which an unlisted skill counts as rising.
const RISING_FREQUENCY: usize = 15;

/// Frequency below which an unlisted skill counts as declining.
const DECLINING_FREQUENCY: usize = 5;

const RISING_KEYWORDS: &[&str] = &[
    "typescript",
    "react",
    "python",
    "aws",
    "kubernetes",
    "docker",
    "nextjs",
    "node.js",
];

const DECLINING_KEYWORDS: &[&str] = &["jquery", "flash", "silverlight", "perl", "cobol"];

/// Per-skill accumulator.
struct SkillAccumulator {
    name: String,
    count: usize,
    weight_sum: u32,
    levels: ProficiencyHistogram,
    industries: Vec<String>,
}

impl SkillAccumulator {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            count: 0,
            weight_sum: 0,
            levels: ProficiencyHistogram::default(),
            industries: Vec::new(),
        }
    }

    fn observe(&mut self, proficiency: Proficiency, industries: &[&str]) {
        self.count += 1;
        self.weight_sum += proficiency.weight();
        self.levels.record(proficiency);

        for industry in industries {
            if self.industries.len() >= MAX_SKILL_INDUSTRIES {
                break;
            }
            if !self.industries.iter().any(|i| i == industry) {
                self.industries.push(industry.to_string());
            }
        }
    }

    fn finish(self) -> SkillStat {
        // count >= 1: an accumulator is only created on an observation
        let avg_proficiency = self.weight_sum as f64 / self.count as f64;
        let trend = classify_trend(&self.name, self.count);

        SkillStat {
            skill_name: self.name,
            frequency: self.count,
            avg_proficiency,
            industries: self.industries,
            experience_levels: self.levels,
            trend,
        }
    }
}

/// Counts keys while remembering the order in which they were first seen.
#[derive(Default)]
struct OrderedCounter {
    index: HashMap<String, usize>,
    entries: Vec<(String, usize)>,
}

impl OrderedCounter {
    fn add(&mut self, key: &str) {
        match self.index.get(key) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), 1));
            }
        }
    }

    /// Entries sorted by count (highest first), ties in first-seen order.
    fn into_sorted(self) -> Vec<(String, usize)> {
        let mut entries = self.entries;
        entries.sort_by_key(|(_, count)| Reverse(*count));
        entries
    }
}

/// Compute per-skill statistics, most frequent first.
pub fn compute_skill_statistics(profiles: &[Profile]) -> Vec<SkillStat> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut skills: Vec<SkillAccumulator> = Vec::new();

    for profile in profiles {
        let industries = profile.organization_names();

        for skill in &profile.skills {
            let slot = match index.get(&skill.name) {
                Some(&i) => i,
                None => {
                    index.insert(skill.name.clone(), skills.len());
                    skills.push(SkillAccumulator::new(&skill.name));
                    skills.len() - 1
                }
            };
            skills[slot].observe(skill.proficiency, &industries);
        }
    }

    let mut stats: Vec<SkillStat> = skills.into_iter().map(SkillAccumulator::finish).collect();
    stats.sort_by_key(|s| Reverse(s.frequency));
    stats
}

/// Classify a skill as rising, stable or declining.
///
/// Keyword lists win over the frequency thresholds; rising keywords are
/// checked before declining ones.
pub fn classify_trend(skill_name: &str, frequency: usize) -> Trend {
    let lower = skill_name.to_lowercase();

    if RISING_KEYWORDS.iter().any(|k| lower.contains(k)) {
        Trend::Rising
    } else if DECLINING_KEYWORDS.iter().any(|k| lower.contains(k)) {
        Trend::Declining
    } else if frequency > RISING_FREQUENCY {
        Trend::Rising
    } else if frequency < DECLINING_FREQUENCY {
        Trend::Declining
    } else {
        Trend::Stable
    }
}

/// Count profiles per country, top 10.
pub fn compute_location_distribution(profiles: &[Profile]) -> Vec<LocationStat> {
    let mut counter = OrderedCounter::default();

    for profile in profiles {
        counter.add(profile.country().unwrap_or("Unknown"));
    }

    let mut stats: Vec<LocationStat> = counter
        .into_sorted()
        .into_iter()
        .map(|(country, count)| LocationStat { country, count })
        .collect();
    stats.truncate(MAX_LOCATIONS);
    stats
}

fn parse_year(year: Option<&str>) -> Option<i64> {
    year.map(str::trim)
        .filter(|y| !y.is_empty())
        .and_then(|y| y.parse().ok())
}

/// Total years of experience on a profile.
///
/// Open-ended entries run until `current_year`. Entries without a parseable
/// start year are ignored.
pub fn total_experience_years(profile: &Profile, current_year: i64) -> i64 {
    profile
        .experiences
        .iter()
        .filter_map(|exp| {
            let from = parse_year(exp.from_year.as_deref())?;
            let has_end = exp
                .to_year
                .as_deref()
                .map(|y| !y.trim().is_empty())
                .unwrap_or(false);
            if has_end {
                parse_year(exp.to_year.as_deref()).map(|to| to - from)
            } else {
                Some(current_year - from)
            }
        })
        .sum()
}

/// Count profiles per experience bracket, in first-seen bracket order.
pub fn compute_experience_distribution(
    profiles: &[Profile],
    current_year: i64,
) -> Vec<ExperienceStat> {
    let mut stats: Vec<ExperienceStat> = Vec::new();

    for profile in profiles {
        let bracket = ExperienceBracket::from_years(total_experience_years(profile, current_year));
        match stats.iter_mut().find(|s| s.bracket == bracket) {
            Some(stat) => stat.count += 1,
            None => stats.push(ExperienceStat { bracket, count: 1 }),
        }
    }

    stats
}

/// Most common organizations across all experience entries.
pub fn compute_top_industries(profiles: &[Profile], limit: usize) -> Vec<IndustryStat> {
    let mut counter = OrderedCounter::default();

    for org in profiles
        .iter()
        .flat_map(|p| &p.experiences)
        .flat_map(|e| &e.organizations)
    {
        if !org.name.trim().is_empty() {
            counter.add(&org.name);
        }
    }

    let mut stats: Vec<IndustryStat> = counter
        .into_sorted()
        .into_iter()
        .map(|(industry, count)| IndustryStat { industry, count })
        .collect();
    stats.truncate(limit);
    stats
}

/// Count spoken languages across profiles.
pub fn compute_language_distribution(profiles: &[Profile]) -> Vec<LanguageStat> {
    let mut counter = OrderedCounter::default();

    for lang in profiles.iter().flat_map(|p| &p.languages) {
        if !lang.language.trim().is_empty() {
            counter.add(&lang.language);
        }
    }

    counter
        .into_sorted()
        .into_iter()
        .map(|(language, count)| LanguageStat { language, count })
        .collect()
}

/// Names of the `n` most frequent skills.
pub fn top_skill_names(stats: &[SkillStat], n: usize) -> Vec<String> {
    stats.iter().take(n).map(|s| s.skill_name.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Experience, Location, Organization, Skill, SpokenLanguage};

    fn create_test_profile(country: Option<&str>, skills: &[(&str, Proficiency)]) -> Profile {
        Profile {
            name: "Test Person".to_string(),
            username: "test-person".to_string(),
            location: country.map(|c| Location {
                name: format!("Somewhere, {}", c),
                country: c.to_string(),
            }),
            headline: None,
            summary: None,
            skills: skills
                .iter()
                .map(|(name, proficiency)| Skill {
                    name: name.to_string(),
                    proficiency: *proficiency,
                })
                .collect(),
            experiences: Vec::new(),
            education: Vec::new(),
            languages: Vec::new(),
            interests: Vec::new(),
        }
    }

    fn job(orgs: &[&str], from: Option<&str>, to: Option<&str>) -> Experience {
        Experience {
            name: "Engineer".to_string(),
            organizations: orgs
                .iter()
                .map(|o| Organization { name: o.to_string() })
                .collect(),
            from_year: from.map(String::from),
            to_year: to.map(String::from),
        }
    }

    fn madrid_berlin() -> Vec<Profile> {
        vec![
            create_test_profile(
                Some("Spain"),
                &[
                    ("Python", Proficiency::Expert),
                    ("Django", Proficiency::Advanced),
                ],
            ),
            create_test_profile(Some("Germany"), &[("Python", Proficiency::Intermediate)]),
        ]
    }

    #[test]
    fn test_end_to_end_two_profiles() {
        let profiles = madrid_berlin();

        let skills = compute_skill_statistics(&profiles);
        assert_eq!(skills.len(), 2);
        assert_eq!(skills[0].skill_name, "Python");
        assert_eq!(skills[0].frequency, 2);
        assert_eq!(skills[0].avg_proficiency, 3.0);
        assert_eq!(skills[1].skill_name, "Django");
        assert_eq!(skills[1].frequency, 1);
        assert_eq!(skills[1].avg_proficiency, 3.0);

        let locations = compute_location_distribution(&profiles);
        assert_eq!(
            locations,
            vec![
                LocationStat {
                    country: "Spain".to_string(),
                    count: 1
                },
                LocationStat {
                    country: "Germany".to_string(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(compute_skill_statistics(&[]).is_empty());
        assert!(compute_location_distribution(&[]).is_empty());
        assert!(compute_experience_distribution(&[], 2026).is_empty());
        assert!(compute_top_industries(&[], 10).is_empty());
        assert!(compute_language_distribution(&[]).is_empty());
    }

    #[test]
    fn test_frequency_sum_matches_skill_count() {
        let profiles = vec![
            create_test_profile(
                Some("Spain"),
                &[
                    ("Rust", Proficiency::Expert),
                    ("Go", Proficiency::Novice),
                    ("SQL", Proficiency::Advanced),
                ],
            ),
            create_test_profile(None, &[("Rust", Proficiency::Novice)]),
            create_test_profile(
                Some("Chile"),
                &[("SQL", Proficiency::Expert), ("Go", Proficiency::Expert)],
            ),
        ];

        let stats = compute_skill_statistics(&profiles);
        let total: usize = stats.iter().map(|s| s.frequency).sum();
        let expected: usize = profiles.iter().map(|p| p.skills.len()).sum();
        assert_eq!(total, expected);

        for stat in &stats {
            assert_eq!(stat.experience_levels.total(), stat.frequency);
        }
    }

    #[test]
    fn test_histogram_and_average() {
        let profiles = vec![
            create_test_profile(None, &[("Go", Proficiency::Novice)]),
            create_test_profile(None, &[("Go", Proficiency::Expert)]),
            create_test_profile(None, &[("Go", Proficiency::Expert)]),
            create_test_profile(None, &[("Go", Proficiency::Intermediate)]),
        ];

        let stats = compute_skill_statistics(&profiles);
        let go = &stats[0];
        assert_eq!(go.experience_levels.novice, 1);
        assert_eq!(go.experience_levels.intermediate, 1);
        assert_eq!(go.experience_levels.advanced, 0);
        assert_eq!(go.experience_levels.expert, 2);
        assert_eq!(go.avg_proficiency, 11.0 / 4.0);
    }

    #[test]
    fn test_sort_is_stable_for_ties() {
        let profiles = vec![
            create_test_profile(
                None,
                &[
                    ("Zig", Proficiency::Novice),
                    ("Ada", Proficiency::Novice),
                    ("Elm", Proficiency::Novice),
                ],
            ),
            create_test_profile(None, &[("Elm", Proficiency::Novice)]),
        ];

        let names: Vec<_> = compute_skill_statistics(&profiles)
            .into_iter()
            .map(|s| s.skill_name)
            .collect();
        assert_eq!(names, vec!["Elm", "Zig", "Ada"]);
    }

    #[test]
    fn test_industries_capped_in_first_seen_order() {
        let mut first = create_test_profile(None, &[("Rust", Proficiency::Advanced)]);
        first.experiences = vec![job(&["A", "B", "C"], None, None), job(&["D"], None, None)];
        let mut second = create_test_profile(None, &[("Rust", Proficiency::Advanced)]);
        second.experiences = vec![job(&["B", "E", "F", "G"], None, None)];

        let stats = compute_skill_statistics(&[first, second]);
        assert_eq!(stats[0].industries, vec!["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn test_empty_skill_name_passes_through() {
        let profiles = vec![create_test_profile(None, &[("", Proficiency::Novice)])];
        let stats = compute_skill_statistics(&profiles);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].skill_name, "");
        assert_eq!(stats[0].trend, Trend::Declining);
    }

    #[test]
    fn test_classify_trend() {
        assert_eq!(classify_trend("TypeScript", 3), Trend::Rising);
        assert_eq!(classify_trend("Flash", 100), Trend::Declining);
        assert_eq!(classify_trend("Cobalt", 20), Trend::Rising);
        assert_eq!(classify_trend("Cobalt", 2), Trend::Declining);
        assert_eq!(classify_trend("Cobalt", 8), Trend::Stable);
    }

    #[test]
    fn test_classify_trend_substring_and_boundaries() {
        assert_eq!(classify_trend("React Native", 1), Trend::Rising);
        assert_eq!(classify_trend("Node.js", 1), Trend::Rising);
        assert_eq!(classify_trend("jQuery UI", 50), Trend::Declining);
        assert_eq!(classify_trend("Elixir", 15), Trend::Stable);
        assert_eq!(classify_trend("Elixir", 16), Trend::Rising);
        assert_eq!(classify_trend("Elixir", 5), Trend::Stable);
        assert_eq!(classify_trend("Elixir", 4), Trend::Declining);
    }

    #[test]
    fn test_location_unknown_fallback() {
        let mut blank = create_test_profile(Some(""), &[]);
        blank.location.as_mut().unwrap().name = "Nowhere".to_string();
        let profiles = vec![
            create_test_profile(None, &[]),
            blank,
            create_test_profile(Some("Peru"), &[]),
        ];

        let stats = compute_location_distribution(&profiles);
        assert_eq!(stats[0].country, "Unknown");
        assert_eq!(stats[0].count, 2);
        assert_eq!(stats[1].country, "Peru");
    }

    #[test]
    fn test_location_sum_and_cap() {
        let countries = [
            "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "A", "B",
        ];
        let profiles: Vec<Profile> = countries
            .iter()
            .map(|c| create_test_profile(Some(c), &[]))
            .collect();

        let stats = compute_location_distribution(&profiles);
        assert_eq!(stats.len(), MAX_LOCATIONS);
        assert_eq!(stats[0].country, "A");
        assert_eq!(stats[0].count, 2);
        assert_eq!(stats[1].country, "B");
        assert_eq!(stats[2].country, "C");

        let few = &profiles[..6];
        let sum: usize = compute_location_distribution(few).iter().map(|l| l.count).sum();
        assert_eq!(sum, few.len());
    }

    #[test]
    fn test_idempotence() {
        let profiles = madrid_berlin();
        assert_eq!(
            compute_skill_statistics(&profiles),
            compute_skill_statistics(&profiles)
        );
        assert_eq!(
            compute_location_distribution(&profiles),
            compute_location_distribution(&profiles)
        );
    }

    #[test]
    fn test_experience_distribution() {
        let mut junior = create_test_profile(None, &[]);
        junior.experiences = vec![job(&["A"], Some("2025"), None)];
        let mut mid = create_test_profile(None, &[]);
        mid.experiences = vec![
            job(&["A"], Some("2020"), Some("2022")),
            job(&["B"], Some("2022"), Some("")),
        ];
        let mut senior = create_test_profile(None, &[]);
        senior.experiences = vec![
            job(&["A"], Some("2000"), Some("2015")),
            job(&["B"], Some("unknown"), Some("2020")),
        ];

        assert_eq!(total_experience_years(&junior, 2026), 1);
        assert_eq!(total_experience_years(&mid, 2026), 6);
        assert_eq!(total_experience_years(&senior, 2026), 15);

        let stats = compute_experience_distribution(&[junior.clone(), senior, junior, mid], 2026);
        assert_eq!(
            stats,
            vec![
                ExperienceStat {
                    bracket: ExperienceBracket::UnderTwo,
                    count: 2
                },
                ExperienceStat {
                    bracket: ExperienceBracket::TenPlus,
                    count: 1
                },
                ExperienceStat {
                    bracket: ExperienceBracket::FiveToTen,
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn test_top_industries() {
        let mut a = create_test_profile(None, &[]);
        a.experiences = vec![job(&["Stripe", " "], None, None), job(&["Netflix"], None, None)];
        let mut b = create_test_profile(None, &[]);
        b.experiences = vec![job(&["Netflix"], None, None), job(&["Uber"], None, None)];

        let stats = compute_top_industries(&[a, b], 2);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].industry, "Netflix");
        assert_eq!(stats[0].count, 2);
        assert_eq!(stats[1].industry, "Stripe");
    }

    #[test]
    fn test_language_distribution() {
        let speak = |langs: &[&str]| {
            let mut p = create_test_profile(None, &[]);
            p.languages = langs
                .iter()
                .map(|l| SpokenLanguage {
                    language: l.to_string(),
                    fluency: "Fluent".to_string(),
                })
                .collect();
            p
        };

        let stats = compute_language_distribution(&[
            speak(&["English"]),
            speak(&["Spanish", "English", ""]),
        ]);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].language, "English");
        assert_eq!(stats[0].count, 2);
        assert_eq!(stats[1].language, "Spanish");
    }

    #[test]
    fn test_top_skill_names() {
        let stats = compute_skill_statistics(&madrid_berlin());
        assert_eq!(top_skill_names(&stats, 1), vec!["Python"]);
        assert_eq!(top_skill_names(&stats, 10).len(), 2);
    }
}
