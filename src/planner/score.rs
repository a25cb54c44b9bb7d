use jiff::civil::{Time, time};

use crate::model::{ContentType, Topic};

/// Score given to every weekend entry.
pub(super) const WEEKEND_SCORE: i32 = 300;

/// Weekday publish slots, cycled by slot index.
pub(super) const SLOT_TIMES: [Time; 3] = [time(9, 0, 0, 0), time(12, 0, 0, 0), time(15, 0, 0, 0)];

/// Weekend entries always go out first thing.
pub(super) const WEEKEND_TIME: Time = time(9, 0, 0, 0);

/// Ordering score for an entry: higher-ranked topics and heavier content score higher.
///
/// Saturates rather than overflowing for extreme priorities.
pub fn priority_score(topic: &Topic, content_type: ContentType) -> i32 {
    let bonus = match content_type {
        ContentType::Pillar => 300,
        ContentType::Cluster => 200,
        ContentType::Supporting => 100,
    };
    6_i32
        .saturating_sub(topic.priority)
        .saturating_mul(100)
        .saturating_add(500 + bonus)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::planner::fixtures::topic;

    #[test]
    fn heavier_content_scores_higher() {
        for priority in 1..=5 {
            let t = topic("a", priority, 50.0);
            let pillar = priority_score(&t, ContentType::Pillar);
            let cluster = priority_score(&t, ContentType::Cluster);
            let supporting = priority_score(&t, ContentType::Supporting);
            assert!(pillar > cluster && cluster > supporting);
        }
    }

    #[test]
    fn top_priority_pillar_score() {
        assert_eq!(priority_score(&topic("a", 1, 50.0), ContentType::Pillar), 1300);
        assert_eq!(priority_score(&topic("a", 5, 50.0), ContentType::Supporting), 700);
    }

    #[test]
    fn lowest_priority_and_beyond_do_not_overflow() {
        assert_eq!(priority_score(&topic("a", 100, 50.0), ContentType::Supporting), -8800);

        for priority in [100, 30_000_000, i32::MAX, i32::MIN] {
            let t = topic("a", priority, 50.0);
            let pillar = priority_score(&t, ContentType::Pillar);
            let cluster = priority_score(&t, ContentType::Cluster);
            let supporting = priority_score(&t, ContentType::Supporting);
            assert!(pillar >= cluster && cluster >= supporting, "{priority}");
        }
    }
}
