//! Running counts over a calendar as it grows.

use std::collections::HashMap;

use jiff::civil::Date;

use crate::model::{CalendarEntry, ContentType};

#[derive(Debug, Default, Clone, Copy)]
struct TopicTally {
    entries: usize,
    pillars: usize,
    clusters: usize,
}

/// Per-topic and per-(date, topic) entry counts, kept in step with a
/// calendar so selection never has to rescan it.
#[derive(Debug, Default)]
pub(crate) struct Tally {
    total: usize,
    topics: HashMap<String, TopicTally>,
    days: HashMap<Date, HashMap<String, usize>>,
}

impl Tally {
    pub(crate) fn from_calendar(calendar: &[CalendarEntry]) -> Self {
        let mut tally = Self::default();
        for entry in calendar {
            tally.record(entry);
        }
        tally
    }

    pub(crate) fn record(&mut self, entry: &CalendarEntry) {
        self.total += 1;
        let topic = self.topics.entry(entry.topic_id.clone()).or_default();
        topic.entries += 1;
        match entry.content_type {
            ContentType::Pillar => topic.pillars += 1,
            ContentType::Cluster => topic.clusters += 1,
            ContentType::Supporting => {}
        }
        *self
            .days
            .entry(entry.date)
            .or_default()
            .entry(entry.topic_id.clone())
            .or_default() += 1;
    }

    /// Undo a previous `record` of the same entry.
    pub(crate) fn forget(&mut self, entry: &CalendarEntry) {
        self.total = self.total.saturating_sub(1);
        if let Some(topic) = self.topics.get_mut(&entry.topic_id) {
            topic.entries = topic.entries.saturating_sub(1);
            match entry.content_type {
                ContentType::Pillar => topic.pillars = topic.pillars.saturating_sub(1),
                ContentType::Cluster => topic.clusters = topic.clusters.saturating_sub(1),
                ContentType::Supporting => {}
            }
        }
        if let Some(n) = self
            .days
            .get_mut(&entry.date)
            .and_then(|day| day.get_mut(&entry.topic_id))
        {
            *n = n.saturating_sub(1);
        }
    }

    pub(crate) fn total(&self) -> usize {
        self.total
    }

    pub(crate) fn entries(&self, topic_id: &str) -> usize {
        self.topics.get(topic_id).map_or(0, |t| t.entries)
    }

    pub(crate) fn pillars(&self, topic_id: &str) -> usize {
        self.topics.get(topic_id).map_or(0, |t| t.pillars)
    }

    pub(crate) fn clusters(&self, topic_id: &str) -> usize {
        self.topics.get(topic_id).map_or(0, |t| t.clusters)
    }

    pub(crate) fn on_day(&self, date: Date, topic_id: &str) -> usize {
        self.days
            .get(&date)
            .and_then(|day| day.get(topic_id))
            .copied()
            .unwrap_or(0)
    }
}
