//! Project lifecycle commands: new, list.

use clap::Subcommand;
use jiff::Timestamp;
use tracing::info;
use uuid::Uuid;

use crate::{model::Project, storage::Storage};

use super::short_id;

#[derive(Debug, Subcommand)]
pub enum ProjectCommand {
    /// Create a new project. Prints the project ID.
    New {
        /// Client or site name.
        name: String,
    },

    /// List projects.
    List,
}

pub(super) fn run(storage: &Storage, command: ProjectCommand) -> Result<(), String> {
    match command {
        ProjectCommand::New { name } => cmd_new(storage, &name),
        ProjectCommand::List => cmd_list(storage),
    }
}

fn cmd_new(storage: &Storage, name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("project name cannot be empty".to_string());
    }

    let project = Project {
        id: Uuid::new_v4(),
        name: name.to_string(),
        created_at: Timestamp::now(),
    };

    storage
        .create_project(&project)
        .map_err(|e| format!("failed to create project: {e}"))?;
    info!(id = %project.id, name, "created project");

    println!("{}", project.id);
    Ok(())
}

fn cmd_list(storage: &Storage) -> Result<(), String> {
    let projects = storage
        .list_projects()
        .map_err(|e| format!("failed to list projects: {e}"))?;

    if projects.is_empty() {
        println!("No projects");
        return Ok(());
    }

    for p in &projects {
        println!("{}  {}", short_id(p.id), p.name);
    }

    Ok(())
}
