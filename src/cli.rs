//! CLI interface for the WritGo planner.
//!
//! Each subcommand is non-interactive: arguments in, text or JSON out.
//!
//! Commands split into two groups:
//!
//! - `writgo project new|list` and `writgo publish-time`: no project context needed.
//! - `writgo --project <id> topics|plan ...`: everything else, within one project.
//!
//! The `--project` flag takes a full UUID or unambiguous prefix.

mod format;
mod plan;
mod project;
mod topics;

use clap::{Parser, Subcommand, ValueEnum};
use jiff::civil::Date;
use uuid::Uuid;

use crate::config::Config;
use crate::model::{ContentType, Project};
use crate::planner::optimal_publish_time;
use crate::storage::Storage;

pub use plan::PlanCommand;
pub use project::ProjectCommand;
pub use topics::TopicsCommand;

/// WritGo: plan SEO content calendars.
#[derive(Debug, Parser)]
#[command(name = "writgo", after_long_help = WORKFLOW_HELP)]
pub struct Cli {
    /// Project ID: full UUID or unambiguous prefix (e.g. `a3b`).
    /// Required for topics and plan.
    #[arg(long, global = true)]
    project: Option<String>,

    /// Log at debug level.
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log output format (logs go to stderr).
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

const WORKFLOW_HELP: &str = r#"Workflow: planning a month of content
  1. writgo project new "Bakery blog"
     → prints a project ID (e.g. a3b0fc12)
  2. writgo --project a3b topics import topics.toml
  3. writgo --project a3b plan generate --start 2024-01-01 --days 30
  4. writgo --project a3b plan next --take
     → prints the next entry as JSON for the article generator

Topics file:
  [[topic]]
  name = "Sourdough"
  priority = 1
  target-percentage = 60"#;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage projects: create new ones, list existing.
    Project {
        #[command(subcommand)]
        command: ProjectCommand,
    },

    /// Manage the topics a project's calendar draws from.
    /// Requires `--project`.
    Topics {
        #[command(subcommand)]
        command: TopicsCommand,
    },

    /// Generate, inspect, and consume a project's content calendar.
    /// Requires `--project`.
    Plan {
        #[command(subcommand)]
        command: PlanCommand,
    },

    /// Print the best time of day to publish a kind of content on a date.
    PublishTime {
        /// Publication date (YYYY-MM-DD).
        date: Date,

        /// Kind of content.
        #[arg(value_enum)]
        content_type: ContentTypeArg,
    },
}

/// CLI-facing content type, mapped to the domain `ContentType`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ContentTypeArg {
    /// Comprehensive cornerstone page.
    Pillar,
    /// Intermediate article linking back to the pillar.
    Cluster,
    /// Lightweight ongoing article.
    Supporting,
}

impl ContentTypeArg {
    fn to_domain(self) -> ContentType {
        match self {
            Self::Pillar => ContentType::Pillar,
            Self::Cluster => ContentType::Cluster,
            Self::Supporting => ContentType::Supporting,
        }
    }
}

/// Run the parsed CLI, returning an error message on failure.
pub fn run(cli: Cli, config: &Config, storage: &Storage) -> Result<(), String> {
    match cli.command {
        Command::Project { command } => project::run(storage, command),
        Command::Topics { command } => {
            let project = require_project(storage, cli.project.as_deref())?;
            topics::run(storage, &project, command)
        }
        Command::Plan { command } => {
            let project = require_project(storage, cli.project.as_deref())?;
            plan::run(config, storage, &project, command)
        }
        Command::PublishTime { date, content_type } => {
            println!("{}", optimal_publish_time(date.weekday(), content_type.to_domain()));
            Ok(())
        }
    }
}

/// Today's date in the system time zone.
fn today() -> Date {
    jiff::Zoned::now().date()
}

/// Require that `--project` was provided and resolve it.
fn require_project(storage: &Storage, project_ref: Option<&str>) -> Result<Project, String> {
    let project_ref = project_ref.ok_or("this command requires --project <id>")?;
    resolve_project(storage, project_ref)
}

/// Resolve a project reference (full UUID or unambiguous prefix) to a project.
fn resolve_project(storage: &Storage, reference: &str) -> Result<Project, String> {
    // Try full UUID first.
    if let Ok(id) = reference.parse::<Uuid>() {
        return storage
            .load_project(id)
            .map_err(|e| format!("project not found: {e}"));
    }

    // Try as a prefix match against all projects.
    let projects = storage
        .list_projects()
        .map_err(|e| format!("failed to list projects: {e}"))?;

    let matches: Vec<&Project> = projects
        .iter()
        .filter(|p| p.id.to_string().starts_with(reference))
        .collect();

    match matches.len() {
        0 => Err(format!("no project matching '{reference}'")),
        1 => Ok(matches[0].clone()),
        n => {
            let ids: Vec<String> = matches.iter().map(|p| short_id(p.id)).collect();
            Err(format!(
                "'{reference}' is ambiguous: matches {n} projects: {}",
                ids.join(", ")
            ))
        }
    }
}

fn short_id(id: Uuid) -> String {
    id.to_string()[..8].to_string()
}
