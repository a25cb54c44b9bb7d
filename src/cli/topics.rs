//! Topic commands: import a topics file, list what a project plans from.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Subcommand;
use serde::Deserialize;
use tracing::{info, warn};

use crate::model::{Project, Topic, slugify};
use crate::storage::Storage;

use super::format::format_topic;

/// Lowest rank a topic can be given (1 is the highest).
const MAX_PRIORITY: i32 = 100;

#[derive(Debug, Subcommand)]
pub enum TopicsCommand {
    /// Replace the project's topics with those in a TOML file.
    Import {
        /// File with one `[[topic]]` table per topic.
        file: PathBuf,
    },

    /// List the project's topics, highest priority first.
    List,
}

/// On-disk shape of a topics file.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TopicsFile {
    #[serde(default)]
    topic: Vec<TopicRow>,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct TopicRow {
    /// Defaults to the slug.
    id: Option<String>,
    name: String,
    /// Defaults to the slugified name.
    slug: Option<String>,
    priority: i32,
    target_percentage: f64,
}

pub(super) fn run(
    storage: &Storage,
    project: &Project,
    command: TopicsCommand,
) -> Result<(), String> {
    match command {
        TopicsCommand::Import { file } => cmd_import(storage, project, &file),
        TopicsCommand::List => cmd_list(storage, project),
    }
}

fn cmd_import(storage: &Storage, project: &Project, file: &Path) -> Result<(), String> {
    let contents = fs::read_to_string(file)
        .map_err(|e| format!("failed to read {}: {e}", file.display()))?;
    let topics = parse_topics(&contents).map_err(|e| format!("{}: {e}", file.display()))?;

    let total: f64 = topics.iter().map(|t| t.target_percentage).sum();
    if (total - 100.0).abs() > 0.5 {
        warn!(total, "topic targets do not sum to 100");
    }

    storage
        .replace_topics(project.id, &topics)
        .map_err(|e| format!("failed to save topics: {e}"))?;
    info!(project = %project.id, topics = topics.len(), "imported topics");

    eprintln!("Imported {} topic(s) into {}", topics.len(), project.name);
    Ok(())
}

fn cmd_list(storage: &Storage, project: &Project) -> Result<(), String> {
    let topics = storage
        .load_topics(project.id)
        .map_err(|e| format!("failed to load topics: {e}"))?;

    if topics.is_empty() {
        println!("No topics");
        return Ok(());
    }

    for t in &topics {
        println!("{}", format_topic(t));
    }
    Ok(())
}

/// Parse and check a topics file.
fn parse_topics(contents: &str) -> Result<Vec<Topic>, String> {
    let file: TopicsFile =
        toml::from_str(contents).map_err(|e| format!("invalid topics file: {e}"))?;

    if file.topic.is_empty() {
        return Err("no [[topic]] entries".to_string());
    }

    let mut seen = HashSet::new();
    let mut topics = Vec::with_capacity(file.topic.len());
    for row in file.topic {
        let slug = row.slug.unwrap_or_else(|| slugify(&row.name));
        let id = row.id.unwrap_or_else(|| slug.clone());
        if id.is_empty() {
            return Err(format!("topic '{}' needs an id or a sluggable name", row.name));
        }
        if !(1..=MAX_PRIORITY).contains(&row.priority) {
            return Err(format!("topic '{id}': priority must be between 1 and {MAX_PRIORITY}"));
        }
        if !(0.0..=100.0).contains(&row.target_percentage) {
            return Err(format!("topic '{id}': target-percentage must be within 0-100"));
        }
        if !seen.insert(id.clone()) {
            return Err(format!("duplicate topic id '{id}'"));
        }
        topics.push(Topic {
            id,
            name: row.name,
            slug,
            priority: row.priority,
            target_percentage: row.target_percentage,
        });
    }
    Ok(topics)
}
