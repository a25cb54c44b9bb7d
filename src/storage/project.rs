//! Project storage: create, load, and list projects.

use std::{fs, io};

use rusqlite::Connection;
use uuid::Uuid;

use crate::model::Project;

use super::{Result, Storage, StorageError};

impl Storage {
    /// Creates a new project, writing its metadata to a new `SQLite` file.
    pub fn create_project(&self, project: &Project) -> Result<()> {
        let conn = self.create_db(project.id)?;
        conn.execute(
            "INSERT INTO project (id, name, created_at) VALUES (?1, ?2, ?3)",
            rusqlite::params![
                project.id.to_string(),
                &project.name,
                project.created_at.to_string(),
            ],
        )?;
        Ok(())
    }

    /// Loads a single project's metadata.
    pub fn load_project(&self, id: Uuid) -> Result<Project> {
        let conn = self.open_db(id)?;
        load_project_row(&conn)
    }

    /// Lists all projects by reading each `.sqlite` file in the storage root.
    ///
    /// Unreadable or malformed files are silently skipped.
    pub fn list_projects(&self) -> Result<Vec<Project>> {
        let mut projects = Vec::new();
        let entries = match fs::read_dir(&self.root) {
            Ok(e) => e,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(projects),
            Err(e) => return Err(e.into()),
        };
        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("sqlite") {
                continue;
            }
            let Ok(conn) = Connection::open(&path) else {
                continue;
            };
            if let Ok(p) = load_project_row(&conn) {
                projects.push(p);
            }
        }
        projects.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(projects)
    }
}

/// Reads the single project row from an open connection.
fn load_project_row(conn: &Connection) -> Result<Project> {
    let (id_str, name, created_at_str) = conn.query_row(
        "SELECT id, name, created_at FROM project LIMIT 1",
        [],
        |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        },
    )?;

    let id = id_str
        .parse::<Uuid>()
        .map_err(|e| StorageError::Corrupt(format!("invalid project id: {e}")))?;
    let created_at = created_at_str
        .parse::<jiff::Timestamp>()
        .map_err(|e| StorageError::Corrupt(format!("invalid created_at: {e}")))?;

    Ok(Project {
        id,
        name,
        created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::Timestamp;

    use crate::storage::fixtures::{sample_project, test_storage};

    #[test]
    fn create_and_load_project() {
        let (_dir, storage) = test_storage();
        let project = sample_project();

        storage.create_project(&project).unwrap();
        let loaded = storage.load_project(project.id).unwrap();

        assert_eq!(loaded.id, project.id);
        assert_eq!(loaded.name, project.name);
        assert_eq!(loaded.created_at, project.created_at);
    }

    #[test]
    fn create_duplicate_project_fails() {
        let (_dir, storage) = test_storage();
        let project = sample_project();

        storage.create_project(&project).unwrap();
        let err = storage.create_project(&project).unwrap_err();

        assert!(matches!(err, StorageError::ProjectAlreadyExists(_)));
    }

    #[test]
    fn load_nonexistent_project_fails() {
        let (_dir, storage) = test_storage();
        let err = storage.load_project(Uuid::new_v4()).unwrap_err();

        assert!(matches!(err, StorageError::ProjectNotFound(_)));
    }

    #[test]
    fn list_projects_empty() {
        let (_dir, storage) = test_storage();
        assert!(storage.list_projects().unwrap().is_empty());
    }

    #[test]
    fn list_projects_sorted_by_created_at_and_skips_strays() {
        let (dir, storage) = test_storage();

        let mut p1 = sample_project();
        p1.name = "First".into();
        p1.created_at = Timestamp::new(1_000_000_000, 0).unwrap();

        let mut p2 = sample_project();
        p2.name = "Second".into();
        p2.created_at = Timestamp::new(2_000_000_000, 0).unwrap();

        // Create in reverse order to verify sorting.
        storage.create_project(&p2).unwrap();
        storage.create_project(&p1).unwrap();
        fs::write(dir.path().join("projects").join("notes.txt"), "hi").unwrap();
        fs::write(dir.path().join("projects").join("broken.sqlite"), "not a db").unwrap();

        let projects = storage.list_projects().unwrap();
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].name, "First");
        assert_eq!(projects[1].name, "Second");
    }
}
