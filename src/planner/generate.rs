//! Bulk calendar generation.

use jiff::civil::Date;
use tracing::{debug, info};

use crate::model::{CalendarEntry, ContentType, Topic};

use super::score::{SLOT_TIMES, WEEKEND_SCORE, WEEKEND_TIME};
use super::select::{content_type_for, pick_topic};
use super::tally::Tally;
use super::{PlanError, PlanRules, Result, balance_topics, is_weekend, priority_score};

/// Plan `days` days of content starting at `start`.
///
/// Weekdays get `articles_per_day` entries, clamped to the daily cap;
/// weekends get one supporting entry. Each slot goes to the eligible topic
/// furthest below its target share, where eligible means still under the
/// per-topic daily cap. A slot with no eligible topic is left empty.
/// The result is rebalanced toward target shares before it is returned.
pub fn generate_calendar(
    topics: &[Topic],
    start: Date,
    days: u32,
    articles_per_day: usize,
    rules: &PlanRules,
) -> Result<Vec<CalendarEntry>> {
    if topics.is_empty() {
        return Err(PlanError::NoTopics);
    }

    let mut topics = topics.to_vec();
    topics.sort_by_key(|t| t.priority);

    let per_day = articles_per_day.min(rules.max_per_day);
    let mut calendar = Vec::new();
    let mut tally = Tally::default();
    let mut date = start;

    for day in 0..days {
        if day > 0 {
            date = date.tomorrow()?;
        }

        let before = calendar.len();
        if is_weekend(date) {
            if let Some(topic) = eligible_topic(&topics, &tally, date, rules) {
                let entry = CalendarEntry {
                    date,
                    topic_id: topic.id.clone(),
                    topic_name: topic.name.clone(),
                    content_type: ContentType::Supporting,
                    title: None,
                    focus_keyword: None,
                    priority_score: WEEKEND_SCORE,
                    planned_time: WEEKEND_TIME,
                };
                tally.record(&entry);
                calendar.push(entry);
            }
        } else {
            for slot in 0..per_day {
                let Some(topic) = eligible_topic(&topics, &tally, date, rules) else {
                    break;
                };
                let content_type = content_type_for(topic, &tally, rules);
                let entry = CalendarEntry {
                    date,
                    topic_id: topic.id.clone(),
                    topic_name: topic.name.clone(),
                    content_type,
                    title: None,
                    focus_keyword: None,
                    priority_score: priority_score(topic, content_type),
                    planned_time: SLOT_TIMES[slot % SLOT_TIMES.len()],
                };
                tally.record(&entry);
                calendar.push(entry);
            }
        }
        debug!(%date, entries = calendar.len() - before, "planned day");
    }

    balance_topics(&mut calendar, &topics, rules);

    info!(
        topics = topics.len(),
        days,
        entries = calendar.len(),
        "generated content calendar"
    );
    Ok(calendar)
}

fn eligible_topic<'a>(
    topics: &'a [Topic],
    tally: &Tally,
    date: Date,
    rules: &PlanRules,
) -> Option<&'a Topic> {
    let eligible = topics
        .iter()
        .filter(|t| tally.on_day(date, &t.id) < rules.max_per_topic_per_day);
    pick_topic(eligible, tally)
}
