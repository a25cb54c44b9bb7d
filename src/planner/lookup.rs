//! Read-only queries over a generated calendar.

use std::collections::BTreeMap;

use jiff::ToSpan;
use jiff::civil::{Date, Time, Weekday, time};

use crate::model::{CalendarEntry, ContentType, TopicCount, WeeklySummary};

use super::Result;

/// Index of the entry to work on next: the earliest on or after
/// `current`, highest score first within a date, calendar order after that.
pub fn next_scheduled_index(calendar: &[CalendarEntry], current: Date) -> Option<usize> {
    calendar
        .iter()
        .enumerate()
        .filter(|(_, e)| e.date >= current)
        .min_by(|(_, a), (_, b)| {
            a.date
                .cmp(&b.date)
                .then(b.priority_score.cmp(&a.priority_score))
        })
        .map(|(i, _)| i)
}

/// The entry to work on next, if anything is left on or after `current`.
pub fn next_scheduled(calendar: &[CalendarEntry], current: Date) -> Option<&CalendarEntry> {
    next_scheduled_index(calendar, current).map(|i| &calendar[i])
}

/// Best time of day to publish a given kind of content.
pub fn optimal_publish_time(weekday: Weekday, content_type: ContentType) -> Time {
    let weekend = matches!(weekday, Weekday::Saturday | Weekday::Sunday);
    match (content_type, weekend) {
        (ContentType::Pillar, false) => time(10, 0, 0, 0),
        (ContentType::Pillar, true) => time(11, 0, 0, 0),
        (ContentType::Cluster, false) => time(14, 0, 0, 0),
        (ContentType::Cluster, true) => time(10, 0, 0, 0),
        (ContentType::Supporting, false) => time(16, 0, 0, 0),
        (ContentType::Supporting, true) => time(9, 0, 0, 0),
    }
}

/// Roll up the seven days starting at `start`.
pub fn weekly_summary(calendar: &[CalendarEntry], start: Date) -> Result<WeeklySummary> {
    let end = start.checked_add(6.days())?;

    let mut by_topic: BTreeMap<String, TopicCount> = BTreeMap::new();
    let mut by_content_type = BTreeMap::new();
    let mut total = 0;
    for entry in calendar.iter().filter(|e| e.date >= start && e.date <= end) {
        total += 1;
        by_topic
            .entry(entry.topic_id.clone())
            .or_insert_with(|| TopicCount {
                name: entry.topic_name.clone(),
                count: 0,
            })
            .count += 1;
        *by_content_type.entry(entry.content_type).or_insert(0) += 1;
    }

    Ok(WeeklySummary {
        week_start: start,
        week_end: end,
        week_number: (start.day_of_year() - 1) / 7 + 1,
        iso_week: start.iso_week_date().week(),
        total,
        by_topic,
        by_content_type,
    })
}
