//! Topic and content-type selection.

use crate::model::{CalendarEntry, ContentType, Topic};

use super::PlanRules;
use super::tally::Tally;

/// Pick the topic furthest below its target share of `calendar`.
///
/// Share is `count / max(1, total) * 100`, so on an empty calendar the
/// highest target wins. Ties go to the lower `priority` value, then the
/// lexically smaller `id`. Returns `None` only when `topics` is empty.
pub fn select_topic<'a>(
    topics: impl IntoIterator<Item = &'a Topic>,
    calendar: &[CalendarEntry],
) -> Option<&'a Topic> {
    pick_topic(topics, &Tally::from_calendar(calendar))
}

/// [`select_topic`] against counts the caller keeps up to date.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn pick_topic<'a>(
    topics: impl IntoIterator<Item = &'a Topic>,
    tally: &Tally,
) -> Option<&'a Topic> {
    let total = tally.total().max(1) as f64;

    topics
        .into_iter()
        .map(|topic| {
            let current = tally.entries(&topic.id) as f64 / total * 100.0;
            (topic, topic.target_percentage - current)
        })
        .min_by(|(a, deficit_a), (b, deficit_b)| {
            deficit_b
                .total_cmp(deficit_a)
                .then(a.priority.cmp(&b.priority))
                .then_with(|| a.id.cmp(&b.id))
        })
        .map(|(topic, _)| topic)
}

/// Decide what depth of content `topic` needs next.
///
/// Pillar until one exists, then clusters up to the quota, then
/// supporting forever after. Only entries for `topic` are considered.
pub fn select_content_type(
    topic: &Topic,
    calendar: &[CalendarEntry],
    rules: &PlanRules,
) -> ContentType {
    content_type_for(topic, &Tally::from_calendar(calendar), rules)
}

pub(crate) fn content_type_for(topic: &Topic, tally: &Tally, rules: &PlanRules) -> ContentType {
    let pillars = tally.pillars(&topic.id);
    let clusters = tally.clusters(&topic.id);

    if pillars == 0 {
        ContentType::Pillar
    } else if clusters < rules.cluster_quota {
        ContentType::Cluster
    } else {
        ContentType::Supporting
    }
}
