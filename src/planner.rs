//! Content calendar planning.
//!
//! Everything here is a pure function over in-memory topics and entries.
//! Persisting what comes out is the caller's job.

mod balance;
mod generate;
mod limits;
mod lookup;
mod score;
mod select;
mod tally;

use jiff::civil::{Date, Weekday};
use serde::{Deserialize, Serialize};

pub use balance::balance_topics;
pub use generate::generate_calendar;
pub use limits::{Rejection, check_daily_limits, validate_entry};
pub use lookup::{next_scheduled, next_scheduled_index, optimal_publish_time, weekly_summary};
pub use score::priority_score;
pub use select::{select_content_type, select_topic};

/// Errors that stop a planning call outright.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("no topics provided")]
    NoTopics,

    #[error("date out of range: {0}")]
    DateOutOfRange(#[from] jiff::Error),
}

pub type Result<T> = core::result::Result<T, PlanError>;

/// Caps and thresholds the planner works within.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PlanRules {
    /// Entries allowed on one date, across all topics.
    pub max_per_day: usize,

    /// Entries allowed on one date for a single topic.
    pub max_per_topic_per_day: usize,

    /// Cluster articles a topic gets before it moves to supporting content.
    pub cluster_quota: usize,
}

impl Default for PlanRules {
    fn default() -> Self {
        Self {
            max_per_day: 3,
            max_per_topic_per_day: 2,
            cluster_quota: 10,
        }
    }
}

/// Saturdays and Sundays get a single lightweight entry.
pub fn is_weekend(date: Date) -> bool {
    matches!(date.weekday(), Weekday::Saturday | Weekday::Sunday)
}
