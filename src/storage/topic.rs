//! Topic storage: the registry a project's calendar is planned from.

use tracing::debug;
use uuid::Uuid;

use crate::model::Topic;

use super::{Result, Storage};

impl Storage {
    /// Replaces a project's topics wholesale.
    pub fn replace_topics(&self, project_id: Uuid, topics: &[Topic]) -> Result<()> {
        let mut conn = self.open_db(project_id)?;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM topic", [])?;
        {
            let mut insert = tx.prepare(
                "INSERT INTO topic (id, name, slug, priority, target_percentage)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for t in topics {
                insert.execute(rusqlite::params![
                    &t.id,
                    &t.name,
                    &t.slug,
                    t.priority,
                    t.target_percentage
                ])?;
            }
        }
        tx.commit()?;
        debug!(%project_id, topics = topics.len(), "replaced topics");
        Ok(())
    }

    /// Loads a project's topics, highest priority first.
    pub fn load_topics(&self, project_id: Uuid) -> Result<Vec<Topic>> {
        let conn = self.open_db(project_id)?;
        let mut stmt = conn.prepare(
            "SELECT id, name, slug, priority, target_percentage
             FROM topic ORDER BY priority, id",
        )?;
        let topics = stmt
            .query_map([], |row| {
                Ok(Topic {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    slug: row.get(2)?,
                    priority: row.get(3)?,
                    target_percentage: row.get(4)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(topics)
    }
}
