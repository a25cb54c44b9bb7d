//! Output formatting for CLI display.

use crate::model::{DailyLimit, EntryStatus, ScheduledEntry, Topic, WeeklySummary};

pub(super) fn format_topic(topic: &Topic) -> String {
    format!(
        "{:<20} p{}  {:>5.1}%  {}",
        topic.id, topic.priority, topic.target_percentage, topic.name
    )
}

pub(super) fn format_entry(scheduled: &ScheduledEntry) -> String {
    let e = &scheduled.entry;
    let mut line = format!(
        "{} {}  {:<10}  {}  [{}]",
        e.date, e.planned_time, e.content_type, e.topic_name, e.priority_score
    );
    if let Some(title) = &e.title {
        line.push_str(&format!("  \"{title}\""));
    }
    if scheduled.status == EntryStatus::Taken {
        line.push_str("  (taken)");
    }
    line
}

pub(super) fn format_limit(limit: &DailyLimit) -> String {
    format!(
        "{:<20} {}/{}  {} remaining",
        limit.topic_id, limit.generated_today, limit.max_per_day, limit.remaining
    )
}

pub(super) fn format_summary(summary: &WeeklySummary) -> String {
    let mut out = format!(
        "Week {} (ISO {}): {} to {}, {} entries",
        summary.week_number, summary.iso_week, summary.week_start, summary.week_end, summary.total
    );
    for (content_type, count) in &summary.by_content_type {
        out.push_str(&format!("\n  {content_type:<10} {count}"));
    }
    for (id, topic) in &summary.by_topic {
        out.push_str(&format!("\n  {id:<20} {} ({})", topic.count, topic.name));
    }
    out
}
