//! Core data model for the content planner.
//!
//! Projects own topics. Topics go in, calendar entries come out. Daily limits and weekly
//! summaries are read-only projections over those two.

mod entry;
mod limit;
mod project;
mod summary;
mod topic;

pub use entry::{CalendarEntry, ContentType, EntryStatus, ScheduledEntry};
pub use limit::DailyLimit;
pub use project::Project;
pub use summary::{TopicCount, WeeklySummary};
pub use topic::{Topic, slugify};
