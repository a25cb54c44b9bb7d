//! Calendar entries: one scheduled content slot each.

use std::fmt;
use std::str::FromStr;

use jiff::civil::{Date, Time};
use serde::{Deserialize, Serialize};

/// Content depth tier.
///
/// One comprehensive pillar page per topic, then intermediate cluster
/// articles, then ongoing lightweight supporting articles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Pillar,
    Cluster,
    Supporting,
}

impl ContentType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pillar => "pillar",
            Self::Cluster => "cluster",
            Self::Supporting => "supporting",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pillar" => Ok(Self::Pillar),
            "cluster" => Ok(Self::Cluster),
            "supporting" => Ok(Self::Supporting),
            other => Err(format!("unknown content type: {other}")),
        }
    }
}

/// One planned piece of content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEntry {
    pub date: Date,
    pub topic_id: String,
    pub topic_name: String,
    pub content_type: ContentType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus_keyword: Option<String>,

    /// Ordering hint for picking among same-day entries. Never gates acceptance.
    pub priority_score: i32,

    /// Time of day to publish, rendered `HH:MM:SS`.
    pub planned_time: Time,
}

/// Whether a stored entry is still waiting or has been handed off for writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntryStatus {
    Scheduled,
    Taken,
}

impl EntryStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Taken => "taken",
        }
    }
}

impl FromStr for EntryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(Self::Scheduled),
            "taken" => Ok(Self::Taken),
            other => Err(format!("unknown entry status: {other}")),
        }
    }
}

/// A calendar entry as persisted for a project.
///
/// `id` follows generation order, so sorting by it replays the calendar
/// in the order it was built.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledEntry {
    pub id: i64,

    #[serde(flatten)]
    pub entry: CalendarEntry,

    pub status: EntryStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::civil::{date, time};

    #[test]
    fn content_type_round_trips_through_str() {
        for ty in [ContentType::Pillar, ContentType::Cluster, ContentType::Supporting] {
            assert_eq!(ty.as_str().parse::<ContentType>().unwrap(), ty);
        }
        assert!("essay".parse::<ContentType>().is_err());
    }

    #[test]
    fn entry_serializes_camel_case_with_plain_time() {
        let entry = CalendarEntry {
            date: date(2024, 1, 1),
            topic_id: "a".into(),
            topic_name: "Alpha".into(),
            content_type: ContentType::Pillar,
            title: None,
            focus_keyword: None,
            priority_score: 1300,
            planned_time: time(9, 0, 0, 0),
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["date"], "2024-01-01");
        assert_eq!(json["contentType"], "pillar");
        assert_eq!(json["plannedTime"], "09:00:00");
        assert!(json.get("title").is_none());
    }
}
