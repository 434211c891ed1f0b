//! Demo implementation of the profile store.
//!
//! Profiles are expanded from the static catalog with a random generator
//! seeded per username, so a fixed store seed always yields the same data
//! regardless of fetch order.

use super::catalog::{self, SeedProfile};
use super::StoreError;
use crate::models::{
    Experience, Interest, Location, Organization, Proficiency, Profile, Skill, SpokenLanguage,
};
use chrono::Datelike;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Upper bound on search hits regardless of the requested limit.
pub const MAX_SEARCH_RESULTS: usize = 50;

/// Options for the demo store.
#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// Seed for generated data (random when `None`).
    pub seed: Option<u64>,
    /// Simulated delay for a search.
    pub search_latency: Duration,
    /// Simulated delay for each profile lookup.
    pub profile_latency: Duration,
    /// Year used to date generated experience entries.
    pub current_year: i32,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            seed: None,
            search_latency: Duration::from_millis(800),
            profile_latency: Duration::from_millis(300),
            current_year: chrono::Utc::now().year(),
        }
    }
}

/// Options for fetching several profiles.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Maximum lookups in flight.
    pub concurrency: usize,
    /// Whether to show a progress bar.
    pub show_progress: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            concurrency: 4,
            show_progress: false,
        }
    }
}

/// Outcome of a batch fetch.
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    /// Fetched profiles, in request order.
    pub profiles: Vec<Profile>,
    /// Usernames that could not be fetched.
    pub failed: Vec<String>,
}

/// In-memory profile store backed by the demo catalog.
pub struct DemoProfileStore {
    seed: u64,
    options: StoreOptions,
}

/// FNV-1a, used to derive per-key generator seeds.
fn key_hash(key: &str) -> u64 {
    key.bytes().fold(0xcbf2_9ce4_8422_2325, |hash, byte| {
        (hash ^ byte as u64).wrapping_mul(0x0100_0000_01b3)
    })
}

impl DemoProfileStore {
    /// Create a new store.
    pub fn new(options: StoreOptions) -> Self {
        let seed = options.seed.unwrap_or_else(|| rand::thread_rng().gen());
        debug!("Demo store seed: {}", seed);
        Self { seed, options }
    }

    /// The seed in use (useful to reproduce a run).
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Topic keys that match exactly.
    pub fn topics() -> Vec<&'static str> {
        catalog::TOPICS.iter().map(|(topic, _)| *topic).collect()
    }

    fn rng_for(&self, key: &str) -> StdRng {
        StdRng::seed_from_u64(self.seed ^ key_hash(key))
    }

    /// Search the catalog.
    ///
    /// An exact topic key returns that topic's profiles; otherwise the query
    /// is matched against titles and summaries. Hits are shuffled and capped
    /// at `min(limit, 50)`.
    pub async fn search_people(&self, query: &str, limit: usize) -> Vec<SeedProfile> {
        info!("Searching demo profiles for \"{}\"", query);
        tokio::time::sleep(self.options.search_latency).await;

        let term = query.trim().to_lowercase();

        let mut results: Vec<SeedProfile> = match catalog::seeds_for_topic(&term) {
            Some(seeds) => seeds.to_vec(),
            None => catalog::all_seeds()
                .filter(|seed| {
                    seed.title.to_lowercase().contains(&term)
                        || seed.summary.to_lowercase().contains(&term)
                })
                .cloned()
                .collect(),
        };

        results.shuffle(&mut self.rng_for(&term));
        results.truncate(limit.min(MAX_SEARCH_RESULTS));

        debug!("Search returned {} profiles", results.len());
        results
    }

    /// Fetch the full profile for a username.
    pub async fn get_profile(&self, username: &str) -> Result<Profile, StoreError> {
        debug!("Fetching profile for {}", username);
        tokio::time::sleep(self.options.profile_latency).await;

        catalog::all_seeds()
            .find(|seed| seed.username == username)
            .map(|seed| self.expand(seed))
            .ok_or_else(|| StoreError::NotFound(username.to_string()))
    }

    /// Fetch several profiles concurrently, keeping request order.
    ///
    /// Lookups that fail are logged and skipped.
    pub async fn batch_get_profiles(
        &self,
        usernames: &[String],
        options: &BatchOptions,
    ) -> BatchResult {
        info!("Fetching {} profiles", usernames.len());

        let progress_bar = if options.show_progress {
            let pb = ProgressBar::new(usernames.len() as u64);
            if let Ok(style) = ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} profiles")
            {
                pb.set_style(style.progress_chars("#>-"));
            }
            Some(pb)
        } else {
            None
        };
        let pb = progress_bar.as_ref();

        let outcomes: Vec<(&String, Result<Profile, StoreError>)> = stream::iter(usernames)
            .map(|username| async move {
                let outcome = self.get_profile(username).await;
                if let Some(pb) = pb {
                    pb.inc(1);
                }
                (username, outcome)
            })
            .buffered(options.concurrency.max(1))
            .collect()
            .await;

        if let Some(pb) = progress_bar.as_ref() {
            pb.finish_and_clear();
        }

        let mut result = BatchResult::default();
        for (username, outcome) in outcomes {
            match outcome {
                Ok(profile) => result.profiles.push(profile),
                Err(e) => {
                    warn!("Could not fetch profile for {}: {}", username, e);
                    result.failed.push(username.clone());
                }
            }
        }

        result
    }

    /// Expand a catalog seed into a full profile.
    pub fn expand(&self, seed: &SeedProfile) -> Profile {
        let mut rng = self.rng_for(seed.username);

        let skills = catalog::skill_set_for(seed.title)
            .iter()
            .map(|name| Skill {
                name: name.to_string(),
                proficiency: Proficiency::ALL[rng.gen_range(0..Proficiency::ALL.len())],
            })
            .collect();

        let current_year = self.options.current_year;
        let experiences = (0..3)
            .map(|i| {
                let start_year = current_year - (i * 2 + 1);
                let company = catalog::COMPANIES[rng.gen_range(0..catalog::COMPANIES.len())];
                Experience {
                    name: if i == 0 {
                        format!("Senior {}", seed.title)
                    } else {
                        seed.title.to_string()
                    },
                    organizations: vec![Organization {
                        name: company.to_string(),
                    }],
                    from_year: Some(start_year.to_string()),
                    to_year: if i == 0 {
                        None
                    } else {
                        Some((start_year + 2).to_string())
                    },
                }
            })
            .collect();

        let university = catalog::UNIVERSITIES[rng.gen_range(0..catalog::UNIVERSITIES.len())];
        let education = vec![Experience {
            name: "Bachelor of Science in Computer Science".to_string(),
            organizations: vec![Organization {
                name: university.to_string(),
            }],
            from_year: Some("2015".to_string()),
            to_year: Some("2019".to_string()),
        }];

        let languages = catalog::LANGUAGES
            .iter()
            .take(rng.gen_range(1..=catalog::LANGUAGES.len()))
            .map(|(language, fluency)| SpokenLanguage {
                language: language.to_string(),
                fluency: fluency.to_string(),
            })
            .collect();

        let interests = catalog::INTERESTS
            .iter()
            .take(rng.gen_range(2..=5))
            .map(|name| Interest {
                name: name.to_string(),
            })
            .collect();

        Profile {
            name: seed.name.to_string(),
            username: seed.username.to_string(),
            location: Some(Location {
                name: seed.location.to_string(),
                country: catalog::country_of(seed.location).to_string(),
            }),
            headline: Some(seed.title.to_string()),
            summary: Some(seed.summary.to_string()),
            skills,
            experiences,
            education,
            languages,
            interests,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store(seed: u64) -> DemoProfileStore {
        DemoProfileStore::new(StoreOptions {
            seed: Some(seed),
            search_latency: Duration::ZERO,
            profile_latency: Duration::ZERO,
            current_year: 2026,
        })
    }

    fn usernames(seeds: &[SeedProfile]) -> Vec<&str> {
        seeds.iter().map(|s| s.username).collect()
    }

    #[test]
    fn test_search_exact_topic() {
        let store = test_store(1);
        let results = tokio_test::block_on(store.search_people("Python", 30));
        assert_eq!(results.len(), 5);
        assert!(results.iter().any(|s| s.username == "sofia-rodriguez"));

        let limited = tokio_test::block_on(store.search_people("python", 2));
        assert_eq!(limited.len(), 2);
    }

    #[test]
    fn test_search_partial_match() {
        let store = test_store(1);
        let results = tokio_test::block_on(store.search_people("data scientist", 30));
        assert_eq!(usernames(&results), vec!["marcus-chen"]);

        let devops = tokio_test::block_on(store.search_people("devops", 30));
        assert_eq!(usernames(&devops), vec!["carlos-mendoza"]);
    }

    #[test]
    fn test_search_no_match() {
        let store = test_store(1);
        assert!(tokio_test::block_on(store.search_people("cobol", 30)).is_empty());
    }

    #[test]
    fn test_search_order_is_seeded() {
        let a = tokio_test::block_on(test_store(9).search_people("python", 30));
        let b = tokio_test::block_on(test_store(9).search_people("python", 30));
        assert_eq!(usernames(&a), usernames(&b));
    }

    #[test]
    fn test_get_profile_expansion() {
        let store = test_store(42);
        let profile = tokio_test::block_on(store.get_profile("sofia-rodriguez")).unwrap();

        assert_eq!(profile.country(), Some("Spain"));
        assert_eq!(profile.location.as_ref().unwrap().name, "Madrid, Spain");
        assert_eq!(profile.headline.as_deref(), Some("Senior Python Developer"));
        assert_eq!(profile.skills.len(), 10);
        assert_eq!(profile.skills[0].name, "Python");

        assert_eq!(profile.experiences.len(), 3);
        assert_eq!(profile.experiences[0].from_year.as_deref(), Some("2025"));
        assert!(profile.experiences[0].to_year.is_none());
        assert_eq!(profile.experiences[1].from_year.as_deref(), Some("2023"));
        assert_eq!(profile.experiences[1].to_year.as_deref(), Some("2025"));
        assert!(profile.experiences[0].name.starts_with("Senior "));

        assert_eq!(profile.education.len(), 1);
        assert!((1..=3).contains(&profile.languages.len()));
        assert_eq!(profile.languages[0].language, "English");
        assert!((2..=5).contains(&profile.interests.len()));
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_get_profile_is_deterministic() {
        let a = tokio_test::block_on(test_store(5).get_profile("david-kim")).unwrap();
        let b = tokio_test::block_on(test_store(5).get_profile("david-kim")).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_get_profile_not_found() {
        let store = test_store(1);
        let err = tokio_test::block_on(store.get_profile("ghost")).unwrap_err();
        assert_eq!(err, StoreError::NotFound("ghost".to_string()));
        assert_eq!(err.to_string(), "profile 'ghost' not found");
    }

    #[test]
    fn test_batch_skips_failures_and_keeps_order() {
        let store = test_store(3);
        let names: Vec<String> = ["jennifer-wu", "ghost", "ahmed-hassan"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let result = tokio_test::block_on(store.batch_get_profiles(
            &names,
            &BatchOptions {
                concurrency: 2,
                show_progress: false,
            },
        ));

        let fetched: Vec<_> = result.profiles.iter().map(|p| p.username.as_str()).collect();
        assert_eq!(fetched, vec!["jennifer-wu", "ahmed-hassan"]);
        assert_eq!(result.failed, vec!["ghost".to_string()]);
    }

    #[test]
    fn test_topics() {
        assert_eq!(
            DemoProfileStore::topics(),
            vec!["python", "javascript", "react"]
        );
    }
}
