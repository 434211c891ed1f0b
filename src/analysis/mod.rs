//! Analysis modules.
//!
//! `aggregator` computes statistics over fetched profiles; `intelligence`
//! adds rule-based insights for the most frequent skills.

pub mod aggregator;
pub mod intelligence;

pub use aggregator::*;
pub use intelligence::{build_insights, Horizon, InsightOptions, SkillInsights};
