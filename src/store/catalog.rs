//! Static demo catalog.
//!
//! Seed records keyed by topic, plus the pools used to expand a seed into a
//! full profile.

/// A search hit: the short form of a demo profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedProfile {
    pub name: &'static str,
    pub username: &'static str,
    /// "City, Country"
    pub location: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
}

pub const TOPICS: &[(&str, &[SeedProfile])] = &[
    (
        "python",
        &[
            SeedProfile {
                name: "Sofia Rodriguez",
                username: "sofia-rodriguez",
                location: "Madrid, Spain",
                title: "Senior Python Developer",
                summary: "Full-stack Python developer with 6+ years experience in Django, FastAPI, and machine learning applications.",
            },
            SeedProfile {
                name: "Marcus Chen",
                username: "marcus-chen",
                location: "San Francisco, CA",
                title: "Python Data Scientist",
                summary: "Data scientist specializing in Python, pandas, scikit-learn, and deep learning with TensorFlow.",
            },
            SeedProfile {
                name: "Elena Petrov",
                username: "elena-petrov",
                location: "Berlin, Germany",
                title: "Backend Python Engineer",
                summary: "Backend engineer focused on scalable Python applications using Django, PostgreSQL, and AWS.",
            },
            SeedProfile {
                name: "Carlos Mendoza",
                username: "carlos-mendoza",
                location: "Mexico City, Mexico",
                title: "Python DevOps Engineer",
                summary: "DevOps engineer with expertise in Python automation, Docker, Kubernetes, and CI/CD pipelines.",
            },
            SeedProfile {
                name: "Aisha Okafor",
                username: "aisha-okafor",
                location: "Lagos, Nigeria",
                title: "Python Machine Learning Engineer",
                summary: "ML engineer building intelligent systems with Python, TensorFlow, and cloud platforms.",
            },
        ],
    ),
    (
        "javascript",
        &[
            SeedProfile {
                name: "David Kim",
                username: "david-kim",
                location: "Seoul, South Korea",
                title: "Senior JavaScript Developer",
                summary: "Full-stack JavaScript developer with expertise in React, Node.js, and TypeScript.",
            },
            SeedProfile {
                name: "Isabella Silva",
                username: "isabella-silva",
                location: "São Paulo, Brazil",
                title: "Frontend React Developer",
                summary: "Frontend specialist creating beautiful user interfaces with React, Next.js, and modern CSS.",
            },
            SeedProfile {
                name: "Ahmed Hassan",
                username: "ahmed-hassan",
                location: "Cairo, Egypt",
                title: "Node.js Backend Developer",
                summary: "Backend developer building scalable APIs with Node.js, Express, and MongoDB.",
            },
        ],
    ),
    (
        "react",
        &[
            SeedProfile {
                name: "Jennifer Wu",
                username: "jennifer-wu",
                location: "Vancouver, Canada",
                title: "React Frontend Lead",
                summary: "Frontend team lead specializing in React, Redux, and component architecture.",
            },
            SeedProfile {
                name: "Mikael Andersson",
                username: "mikael-andersson",
                location: "Stockholm, Sweden",
                title: "React Native Developer",
                summary: "Mobile app developer creating cross-platform apps with React Native and Expo.",
            },
        ],
    ),
];

/// Skill sets, matched against the seed title in this order.
const SKILL_SETS: &[(&str, &[&str])] = &[
    (
        "Python",
        &[
            "Python", "Django", "FastAPI", "Flask", "PostgreSQL", "AWS", "Docker", "Git", "Linux",
            "REST APIs",
        ],
    ),
    (
        "JavaScript",
        &[
            "JavaScript", "TypeScript", "React", "Node.js", "Express", "MongoDB", "HTML5", "CSS3",
            "Git", "npm",
        ],
    ),
    (
        "React",
        &[
            "React", "JavaScript", "TypeScript", "Redux", "Next.js", "CSS3", "HTML5", "Jest",
            "Webpack", "Git",
        ],
    ),
    (
        "Data",
        &[
            "Python", "Pandas", "NumPy", "Scikit-learn", "TensorFlow", "SQL", "Jupyter",
            "Matplotlib", "Statistics", "Machine Learning",
        ],
    ),
    (
        "DevOps",
        &[
            "Docker", "Kubernetes", "AWS", "Python", "Terraform", "Jenkins", "Git", "Linux",
            "Monitoring", "CI/CD",
        ],
    ),
];

pub const COMPANIES: &[&str] = &[
    "Google", "Microsoft", "Amazon", "Meta", "Apple", "Netflix", "Spotify", "Airbnb", "Uber",
    "Tesla", "Shopify", "Stripe", "Datadog", "Twilio", "Slack", "GitHub", "GitLab", "Docker",
    "MongoDB", "Redis",
];

pub const UNIVERSITIES: &[&str] = &[
    "Stanford University",
    "MIT",
    "University of California Berkeley",
    "Carnegie Mellon University",
    "Georgia Institute of Technology",
    "University of Washington",
    "Cornell University",
];

/// (language, fluency)
pub const LANGUAGES: &[(&str, &str)] = &[
    ("English", "Fluent"),
    ("Spanish", "Native"),
    ("Portuguese", "Conversational"),
];

pub const INTERESTS: &[&str] = &[
    "Machine Learning",
    "Open Source",
    "Blockchain",
    "Cloud Computing",
    "Mobile Development",
    "Web Development",
    "Data Science",
    "Cybersecurity",
];

/// Skill set for a professional title; Python when nothing matches.
pub fn skill_set_for(title: &str) -> &'static [&'static str] {
    SKILL_SETS
        .iter()
        .find(|(key, _)| title.contains(key))
        .map(|(_, skills)| *skills)
        .unwrap_or(SKILL_SETS[0].1)
}

/// Every seed profile in catalog order.
pub fn all_seeds() -> impl Iterator<Item = &'static SeedProfile> {
    TOPICS.iter().flat_map(|(_, seeds)| seeds.iter())
}

/// Seeds registered under an exact topic key.
pub fn seeds_for_topic(topic: &str) -> Option<&'static [SeedProfile]> {
    TOPICS
        .iter()
        .find(|(key, _)| *key == topic)
        .map(|(_, seeds)| *seeds)
}

/// Country part of a "City, Country" location.
pub fn country_of(location: &str) -> &str {
    location
        .rsplit(", ")
        .next()
        .filter(|c| !c.is_empty())
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_set_for_title() {
        assert_eq!(skill_set_for("Senior Python Developer")[1], "Django");
        assert_eq!(skill_set_for("Senior JavaScript Developer")[0], "JavaScript");
        assert_eq!(skill_set_for("React Native Developer")[3], "Redux");
        assert_eq!(skill_set_for("Node.js Backend Developer")[0], "Python");
    }

    #[test]
    fn test_country_of() {
        assert_eq!(country_of("Madrid, Spain"), "Spain");
        assert_eq!(country_of("San Francisco, CA"), "CA");
        assert_eq!(country_of("Atlantis"), "Atlantis");
        assert_eq!(country_of(""), "Unknown");
    }

    #[test]
    fn test_catalog_usernames_unique() {
        let mut names: Vec<_> = all_seeds().map(|s| s.username).collect();
        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total);
        assert_eq!(total, 10);
    }

    #[test]
    fn test_seeds_for_topic() {
        assert_eq!(seeds_for_topic("react").map(|s| s.len()), Some(2));
        assert!(seeds_for_topic("cobol").is_none());
    }
}
