//! Daily caps: advisory limits and single-entry validation.

use std::collections::HashMap;

use jiff::civil::Date;

use crate::model::{CalendarEntry, DailyLimit, Topic};

use super::PlanRules;

/// Why a proposed entry was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("Maximum {0} articles per day exceeded")]
    DailyCapReached(usize),

    #[error("Maximum {0} articles per topic per day exceeded")]
    TopicCapReached(usize),

    #[error("Invalid topic ID")]
    UnknownTopic(String),
}

/// Per-topic caps for `date`, given what has already been generated today.
///
/// A topic's cap is its target share of the daily cap, rounded, and never
/// below one. Topics missing from `generated_today` count as zero.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
pub fn check_daily_limits(
    topics: &[Topic],
    date: Date,
    generated_today: &HashMap<String, u32>,
    rules: &PlanRules,
) -> Vec<DailyLimit> {
    topics
        .iter()
        .map(|topic| {
            let scaled = (topic.target_percentage / 100.0 * rules.max_per_day as f64).round();
            let max_per_day = if scaled >= 1.0 { scaled as u32 } else { 1 };
            let generated = generated_today.get(&topic.id).copied().unwrap_or(0);
            DailyLimit {
                date,
                topic_id: topic.id.clone(),
                topic_name: topic.name.clone(),
                max_per_day,
                generated_today: generated,
                remaining: max_per_day.saturating_sub(generated),
            }
        })
        .collect()
}

/// Check one proposed entry against the calendar it would join.
///
/// Rules run in order and the first failure wins: the daily cap, the
/// per-topic daily cap, then whether the topic exists.
pub fn validate_entry(
    entry: &CalendarEntry,
    calendar: &[CalendarEntry],
    topics: &[Topic],
    rules: &PlanRules,
) -> Result<(), Rejection> {
    let same_day: Vec<&CalendarEntry> = calendar.iter().filter(|e| e.date == entry.date).collect();
    if same_day.len() >= rules.max_per_day {
        return Err(Rejection::DailyCapReached(rules.max_per_day));
    }

    let same_topic = same_day.iter().filter(|e| e.topic_id == entry.topic_id).count();
    if same_topic >= rules.max_per_topic_per_day {
        return Err(Rejection::TopicCapReached(rules.max_per_topic_per_day));
    }

    if !topics.iter().any(|t| t.id == entry.topic_id) {
        return Err(Rejection::UnknownTopic(entry.topic_id.clone()));
    }

    Ok(())
}
