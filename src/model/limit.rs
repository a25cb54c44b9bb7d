use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// How many more articles a topic may receive on a given date.
///
/// Advisory only. Whoever generates content enforces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyLimit {
    pub date: Date,
    pub topic_id: String,
    pub topic_name: String,
    pub max_per_day: u32,
    pub generated_today: u32,
    pub remaining: u32,
}
