//! Post-generation rebalancing toward target topic shares.

use std::collections::HashMap;

use tracing::debug;

use crate::model::{CalendarEntry, ContentType, Topic};

use super::score::WEEKEND_SCORE;
use super::select::content_type_for;
use super::tally::Tally;
use super::{PlanRules, is_weekend, priority_score};

/// Move entries from over-represented topics to under-represented ones.
///
/// Target counts come from largest-remainder apportionment of the
/// calendar length. Entries are reassigned from the end backwards, only
/// onto topics still under the per-topic daily cap for that date. When
/// anything moves, content types and scores are re-derived in calendar
/// order so each topic still runs pillar, clusters, then supporting.
/// Entries for topics not in `topics` are left alone.
pub fn balance_topics(calendar: &mut [CalendarEntry], topics: &[Topic], rules: &PlanRules) {
    if topics.is_empty() || calendar.is_empty() {
        return;
    }

    let targets = apportion(topics, calendar.len());
    let mut tally = Tally::from_calendar(calendar);

    let mut moved = 0;
    for i in (0..calendar.len()).rev() {
        let Some(&from_target) = targets.get(calendar[i].topic_id.as_str()) else {
            continue;
        };
        if tally.entries(&calendar[i].topic_id) <= from_target {
            continue;
        }

        let date = calendar[i].date;
        let Some(to) = topics
            .iter()
            .filter(|t| tally.entries(&t.id) < targets[t.id.as_str()])
            .filter(|t| tally.on_day(date, &t.id) < rules.max_per_topic_per_day)
            .max_by(|a, b| {
                let gap_a = targets[a.id.as_str()] - tally.entries(&a.id);
                let gap_b = targets[b.id.as_str()] - tally.entries(&b.id);
                gap_a
                    .cmp(&gap_b)
                    .then(b.priority.cmp(&a.priority))
                    .then_with(|| b.id.cmp(&a.id))
            })
        else {
            continue;
        };

        tally.forget(&calendar[i]);
        calendar[i].topic_id.clone_from(&to.id);
        calendar[i].topic_name.clone_from(&to.name);
        tally.record(&calendar[i]);
        moved += 1;
    }

    if moved == 0 {
        return;
    }
    debug!(moved, "rebalanced topics");
    rederive_types(calendar, topics, rules);
}

/// Replay the content-type state machine over the calendar in order.
fn rederive_types(calendar: &mut [CalendarEntry], topics: &[Topic], rules: &PlanRules) {
    let mut tally = Tally::default();
    for entry in calendar.iter_mut() {
        if is_weekend(entry.date) {
            entry.content_type = ContentType::Supporting;
            entry.priority_score = WEEKEND_SCORE;
        } else if let Some(topic) = topics.iter().find(|t| t.id == entry.topic_id) {
            let content_type = content_type_for(topic, &tally, rules);
            entry.content_type = content_type;
            entry.priority_score = priority_score(topic, content_type);
        }
        tally.record(entry);
    }
}

/// Split `total` entries across topics in proportion to their targets.
///
/// Floors first, then the leftover goes to the largest remainders; ties
/// go to the lower priority value, then the smaller id. Negative targets
/// count as zero, and all-zero targets split evenly.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
fn apportion(topics: &[Topic], total: usize) -> HashMap<&str, usize> {
    let mut weights: Vec<f64> = topics.iter().map(|t| t.target_percentage.max(0.0)).collect();
    let mut sum: f64 = weights.iter().sum();
    if sum <= 0.0 || !sum.is_finite() {
        weights = vec![1.0; topics.len()];
        sum = topics.len() as f64;
    }

    let mut shares: Vec<(&Topic, usize, f64)> = topics
        .iter()
        .zip(&weights)
        .map(|(topic, w)| {
            let quota = w / sum * total as f64;
            let floor = quota.floor();
            (topic, floor as usize, quota - floor)
        })
        .collect();

    let assigned: usize = shares.iter().map(|(_, n, _)| n).sum();
    let leftover = total.saturating_sub(assigned);

    shares.sort_by(|(a, _, ra), (b, _, rb)| {
        rb.total_cmp(ra)
            .then(a.priority.cmp(&b.priority))
            .then_with(|| a.id.cmp(&b.id))
    });
    for share in shares.iter_mut().take(leftover) {
        share.1 += 1;
    }

    shares
        .into_iter()
        .map(|(topic, n, _)| (topic.id.as_str(), n))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::civil::date;

    use crate::planner::fixtures::{entry, topic};

    #[test]
    fn apportion_uses_largest_remainder() {
        let topics = [topic("a", 1, 60.0), topic("b", 2, 40.0)];
        let targets = apportion(&topics, 12);
        // 7.2 and 4.8: b has the larger remainder.
        assert_eq!(targets["a"], 7);
        assert_eq!(targets["b"], 5);
    }

    #[test]
    fn apportion_normalizes_targets() {
        let topics = [topic("a", 1, 30.0), topic("b", 2, 10.0)];
        let targets = apportion(&topics, 8);
        assert_eq!(targets["a"], 6);
        assert_eq!(targets["b"], 2);
    }

    #[test]
    fn apportion_splits_evenly_without_targets() {
        let topics = [topic("a", 2, 0.0), topic("b", 1, 0.0), topic("c", 3, 0.0)];
        let targets = apportion(&topics, 4);
        // Leftover goes to the highest priority first.
        assert_eq!(targets["b"], 2);
        assert_eq!(targets["a"], 1);
        assert_eq!(targets["c"], 1);
    }

    #[test]
    fn balanced_calendar_is_left_alone() {
        let topics = [topic("a", 1, 50.0), topic("b", 2, 50.0)];
        let mut calendar = vec![
            entry(date(2024, 1, 1), "a", ContentType::Pillar),
            entry(date(2024, 1, 1), "b", ContentType::Pillar),
        ];
        let before = calendar.clone();

        balance_topics(&mut calendar, &topics, &PlanRules::default());
        assert_eq!(calendar, before);
    }

    #[test]
    fn moves_late_entries_to_starved_topic() {
        let topics = [topic("a", 1, 50.0), topic("b", 2, 50.0)];
        // Monday through Thursday, all on topic a.
        let mut calendar: Vec<_> = (1..=4)
            .map(|d| entry(date(2024, 1, d), "a", ContentType::Cluster))
            .collect();

        balance_topics(&mut calendar, &topics, &PlanRules::default());

        let ids: Vec<&str> = calendar.iter().map(|e| e.topic_id.as_str()).collect();
        assert_eq!(ids, ["a", "a", "b", "b"]);
        let types: Vec<ContentType> = calendar.iter().map(|e| e.content_type).collect();
        assert_eq!(
            types,
            [
                ContentType::Pillar,
                ContentType::Cluster,
                ContentType::Pillar,
                ContentType::Cluster
            ]
        );
        assert_eq!(calendar[2].topic_name, "B");
        assert_eq!(calendar[2].priority_score, priority_score(&topics[1], ContentType::Pillar));
    }

    #[test]
    fn respects_topic_daily_cap_when_moving() {
        let topics = [topic("a", 1, 25.0), topic("b", 2, 75.0)];
        let rules = PlanRules {
            max_per_topic_per_day: 1,
            ..PlanRules::default()
        };
        let day = date(2024, 1, 1);
        let mut calendar = vec![
            entry(day, "b", ContentType::Pillar),
            entry(day, "a", ContentType::Pillar),
            entry(day, "a", ContentType::Cluster),
            entry(day, "a", ContentType::Cluster),
        ];

        balance_topics(&mut calendar, &topics, &rules);

        // b already has its one slot on this date, so nothing can move.
        let b = calendar.iter().filter(|e| e.topic_id == "b").count();
        assert_eq!(b, 1);
    }

    #[test]
    fn weekend_entries_stay_supporting() {
        let topics = [topic("a", 1, 50.0), topic("b", 2, 50.0)];
        // Saturday and Sunday, both on a.
        let mut calendar = vec![
            entry(date(2024, 1, 6), "a", ContentType::Supporting),
            entry(date(2024, 1, 7), "a", ContentType::Supporting),
        ];

        balance_topics(&mut calendar, &topics, &PlanRules::default());

        assert_eq!(calendar[1].topic_id, "b");
        assert!(calendar.iter().all(|e| e.content_type == ContentType::Supporting));
        assert!(calendar.iter().all(|e| e.priority_score == WEEKEND_SCORE));
    }
}
