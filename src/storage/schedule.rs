//! Schedule storage: the planned calendar and what has been handed off.
//!
//! Planning replaces the calendar wholesale. Entry ids are assigned in
//! insertion order, so the stored calendar replays in generation order.

use std::collections::HashMap;

use jiff::civil::{Date, Time};
use rusqlite::{Connection, Row};
use tracing::debug;
use uuid::Uuid;

use crate::model::{CalendarEntry, ContentType, EntryStatus, ScheduledEntry};

use super::{Result, Storage, StorageError};

impl Storage {
    /// Replaces a project's calendar with freshly generated entries.
    pub fn replace_schedule(&self, project_id: Uuid, entries: &[CalendarEntry]) -> Result<()> {
        let mut conn = self.open_db(project_id)?;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM scheduled_content", [])?;
        for entry in entries {
            insert_entry(&tx, entry)?;
        }
        tx.commit()?;
        debug!(%project_id, entries = entries.len(), "replaced schedule");
        Ok(())
    }

    /// Appends a single entry to a project's calendar, returning its id.
    pub fn append_entry(&self, project_id: Uuid, entry: &CalendarEntry) -> Result<i64> {
        let conn = self.open_db(project_id)?;
        let id = insert_entry(&conn, entry)?;
        debug!(%project_id, id, "appended scheduled entry");
        Ok(id)
    }

    /// Loads a project's calendar in generation order.
    pub fn load_schedule(&self, project_id: Uuid) -> Result<Vec<ScheduledEntry>> {
        let conn = self.open_db(project_id)?;
        let mut stmt = conn.prepare(
            "SELECT id, date, topic_id, topic_name, content_type, title, focus_keyword,
                    priority_score, planned_time, status
             FROM scheduled_content ORDER BY id",
        )?;
        let rows = stmt
            .query_map([], read_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        rows.into_iter().map(RawEntry::parse).collect()
    }

    /// Marks a scheduled entry as handed off for writing.
    pub fn mark_taken(&self, project_id: Uuid, entry_id: i64) -> Result<()> {
        let conn = self.open_db(project_id)?;
        let rows = conn.execute(
            "UPDATE scheduled_content SET status = ?1 WHERE id = ?2",
            rusqlite::params![EntryStatus::Taken.as_str(), entry_id],
        )?;
        if rows == 0 {
            return Err(StorageError::EntryNotFound(entry_id));
        }
        Ok(())
    }

    /// Records that an article for `topic_id` was generated on `date`.
    pub fn record_generation(&self, project_id: Uuid, topic_id: &str, date: Date) -> Result<()> {
        let conn = self.open_db(project_id)?;
        conn.execute(
            "INSERT INTO generation_log (topic_id, generated_on) VALUES (?1, ?2)",
            rusqlite::params![topic_id, date.to_string()],
        )?;
        Ok(())
    }

    /// Articles generated on `date`, per topic id.
    pub fn generated_on(&self, project_id: Uuid, date: Date) -> Result<HashMap<String, u32>> {
        let conn = self.open_db(project_id)?;
        let mut stmt = conn.prepare(
            "SELECT topic_id, COUNT(*) FROM generation_log
             WHERE generated_on = ?1 GROUP BY topic_id",
        )?;
        let counts = stmt
            .query_map([date.to_string()], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, u32>(1)?))
            })?
            .collect::<rusqlite::Result<HashMap<_, _>>>()?;
        Ok(counts)
    }
}

fn insert_entry(conn: &Connection, entry: &CalendarEntry) -> Result<i64> {
    conn.execute(
        "INSERT INTO scheduled_content
             (date, topic_id, topic_name, content_type, title, focus_keyword,
              priority_score, planned_time, status)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        rusqlite::params![
            entry.date.to_string(),
            &entry.topic_id,
            &entry.topic_name,
            entry.content_type.as_str(),
            &entry.title,
            &entry.focus_keyword,
            entry.priority_score,
            entry.planned_time.to_string(),
            EntryStatus::Scheduled.as_str(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Column values as stored, before parsing into domain types.
struct RawEntry {
    id: i64,
    date: String,
    topic_id: String,
    topic_name: String,
    content_type: String,
    title: Option<String>,
    focus_keyword: Option<String>,
    priority_score: i32,
    planned_time: String,
    status: String,
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<RawEntry> {
    Ok(RawEntry {
        id: row.get(0)?,
        date: row.get(1)?,
        topic_id: row.get(2)?,
        topic_name: row.get(3)?,
        content_type: row.get(4)?,
        title: row.get(5)?,
        focus_keyword: row.get(6)?,
        priority_score: row.get(7)?,
        planned_time: row.get(8)?,
        status: row.get(9)?,
    })
}

impl RawEntry {
    fn parse(self) -> Result<ScheduledEntry> {
        let date = self
            .date
            .parse::<Date>()
            .map_err(|e| StorageError::Corrupt(format!("invalid date: {e}")))?;
        let planned_time = self
            .planned_time
            .parse::<Time>()
            .map_err(|e| StorageError::Corrupt(format!("invalid planned_time: {e}")))?;
        let content_type = self
            .content_type
            .parse::<ContentType>()
            .map_err(StorageError::Corrupt)?;
        let status = self
            .status
            .parse::<EntryStatus>()
            .map_err(StorageError::Corrupt)?;

        Ok(ScheduledEntry {
            id: self.id,
            entry: CalendarEntry {
                date,
                topic_id: self.topic_id,
                topic_name: self.topic_name,
                content_type,
                title: self.title,
                focus_keyword: self.focus_keyword,
                priority_score: self.priority_score,
                planned_time,
            },
            status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::civil::{date, time};

    use crate::storage::fixtures::{sample_project, test_storage};

    fn sample_entry(d: Date, topic_id: &str, content_type: ContentType) -> CalendarEntry {
        CalendarEntry {
            date: d,
            topic_id: topic_id.into(),
            topic_name: format!("Topic {topic_id}"),
            content_type,
            title: None,
            focus_keyword: None,
            priority_score: 1200,
            planned_time: time(12, 0, 0, 0),
        }
    }

    #[test]
    fn replace_and_load_schedule_in_order() {
        let (_dir, storage) = test_storage();
        let project = sample_project();
        storage.create_project(&project).unwrap();

        let mut titled = sample_entry(date(2024, 1, 2), "b", ContentType::Cluster);
        titled.title = Some("Sourdough starters".into());
        titled.focus_keyword = Some("sourdough".into());
        let entries = vec![
            sample_entry(date(2024, 1, 1), "a", ContentType::Pillar),
            titled.clone(),
        ];
        storage.replace_schedule(project.id, &entries).unwrap();

        let loaded = storage.load_schedule(project.id).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].entry, entries[0]);
        assert_eq!(loaded[1].entry, titled);
        assert!(loaded[0].id < loaded[1].id);
        assert!(loaded.iter().all(|e| e.status == EntryStatus::Scheduled));
    }

    #[test]
    fn replace_discards_previous_schedule() {
        let (_dir, storage) = test_storage();
        let project = sample_project();
        storage.create_project(&project).unwrap();

        let first = vec![sample_entry(date(2024, 1, 1), "a", ContentType::Pillar)];
        let second = vec![sample_entry(date(2024, 2, 1), "b", ContentType::Pillar)];
        storage.replace_schedule(project.id, &first).unwrap();
        storage.replace_schedule(project.id, &second).unwrap();

        let loaded = storage.load_schedule(project.id).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].entry.topic_id, "b");
    }

    #[test]
    fn append_then_mark_taken() {
        let (_dir, storage) = test_storage();
        let project = sample_project();
        storage.create_project(&project).unwrap();

        let id = storage
            .append_entry(
                project.id,
                &sample_entry(date(2024, 1, 1), "a", ContentType::Pillar),
            )
            .unwrap();
        storage.mark_taken(project.id, id).unwrap();

        let loaded = storage.load_schedule(project.id).unwrap();
        assert_eq!(loaded[0].id, id);
        assert_eq!(loaded[0].status, EntryStatus::Taken);
    }

    #[test]
    fn mark_taken_unknown_entry_fails() {
        let (_dir, storage) = test_storage();
        let project = sample_project();
        storage.create_project(&project).unwrap();

        let err = storage.mark_taken(project.id, 42).unwrap_err();
        assert!(matches!(err, StorageError::EntryNotFound(42)));
    }

    #[test]
    fn generation_counts_are_per_day_and_topic() {
        let (_dir, storage) = test_storage();
        let project = sample_project();
        storage.create_project(&project).unwrap();

        let today = date(2024, 1, 1);
        storage.record_generation(project.id, "a", today).unwrap();
        storage.record_generation(project.id, "a", today).unwrap();
        storage.record_generation(project.id, "b", today).unwrap();
        storage
            .record_generation(project.id, "a", date(2024, 1, 2))
            .unwrap();

        let counts = storage.generated_on(project.id, today).unwrap();
        assert_eq!(counts.len(), 2);
        assert_eq!(counts["a"], 2);
        assert_eq!(counts["b"], 1);
        assert!(
            storage
                .generated_on(project.id, date(2024, 1, 3))
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn schedule_for_missing_project_fails() {
        let (_dir, storage) = test_storage();
        let err = storage.load_schedule(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, StorageError::ProjectNotFound(_)));
    }
}
