//! Calendar commands: generate, show, next, add, limits, summary.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Subcommand;
use jiff::civil::{Date, Time};
use tracing::info;

use crate::config::Config;
use crate::model::{CalendarEntry, ContentType, EntryStatus, Project, ScheduledEntry, Topic};
use crate::planner::{
    check_daily_limits, generate_calendar, next_scheduled, next_scheduled_index,
    optimal_publish_time, priority_score, select_content_type, select_topic, validate_entry,
    weekly_summary,
};
use crate::storage::Storage;

use super::format::{format_entry, format_limit, format_summary};
use super::{ContentTypeArg, today};

#[derive(Debug, Subcommand)]
pub enum PlanCommand {
    /// Generate a fresh calendar, replacing the stored one.
    Generate {
        /// First day to plan (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        start: Option<Date>,

        /// Number of days to plan.
        #[arg(long, default_value_t = 30)]
        days: u32,

        /// Weekday articles. Defaults to `articles-per-day` from the config.
        #[arg(long)]
        articles_per_day: Option<usize>,

        /// Also write the calendar JSON to this file.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Print the stored calendar.
    Show {
        /// Print JSON instead of one line per entry.
        #[arg(long)]
        json: bool,
    },

    /// Print the next scheduled entry as JSON.
    Next {
        /// Earliest date to consider. Defaults to today.
        #[arg(long)]
        date: Option<Date>,

        /// Mark the entry as taken and count it toward today's generated total.
        #[arg(long)]
        take: bool,
    },

    /// Add one entry by hand, subject to the daily caps.
    Add {
        /// Date to schedule on (YYYY-MM-DD).
        #[arg(long)]
        date: Date,

        /// Topic ID. Defaults to the topic furthest below its target share.
        #[arg(long)]
        topic: Option<String>,

        /// Kind of content. Defaults to what the topic needs next.
        #[arg(long = "type", value_enum)]
        content_type: Option<ContentTypeArg>,

        /// Publish time (HH:MM:SS). Defaults to the best time for the day and type.
        #[arg(long)]
        time: Option<Time>,

        /// Working title.
        #[arg(long)]
        title: Option<String>,

        /// Focus keyword.
        #[arg(long)]
        keyword: Option<String>,
    },

    /// Show per-topic daily limits.
    Limits {
        /// Date to check. Defaults to today.
        #[arg(long)]
        date: Option<Date>,

        /// Print JSON.
        #[arg(long)]
        json: bool,
    },

    /// Summarize seven days of the calendar.
    Summary {
        /// First day of the window. Defaults to today.
        #[arg(long)]
        start: Option<Date>,

        /// Print JSON.
        #[arg(long)]
        json: bool,
    },
}

pub(super) fn run(
    config: &Config,
    storage: &Storage,
    project: &Project,
    command: PlanCommand,
) -> Result<(), String> {
    match command {
        PlanCommand::Generate {
            start,
            days,
            articles_per_day,
            out,
        } => cmd_generate(
            config,
            storage,
            project,
            start.unwrap_or_else(today),
            days,
            articles_per_day.unwrap_or(config.articles_per_day),
            out.as_deref(),
        ),
        PlanCommand::Show { json } => cmd_show(storage, project, json),
        PlanCommand::Next { date, take } => {
            cmd_next(storage, project, date.unwrap_or_else(today), take)
        }
        PlanCommand::Add {
            date,
            topic,
            content_type,
            time,
            title,
            keyword,
        } => {
            let draft = Draft {
                date,
                topic_id: topic,
                content_type,
                time,
                title,
                keyword,
            };
            cmd_add(config, storage, project, draft)
        }
        PlanCommand::Limits { date, json } => {
            cmd_limits(config, storage, project, date.unwrap_or_else(today), json)
        }
        PlanCommand::Summary { start, json } => {
            cmd_summary(storage, project, start.unwrap_or_else(today), json)
        }
    }
}

fn cmd_generate(
    config: &Config,
    storage: &Storage,
    project: &Project,
    start: Date,
    days: u32,
    articles_per_day: usize,
    out: Option<&Path>,
) -> Result<(), String> {
    let topics = load_topics(storage, project)?;
    let calendar = generate_calendar(&topics, start, days, articles_per_day, &config.rules)
        .map_err(|e| format!("failed to generate calendar: {e}"))?;

    storage
        .replace_schedule(project.id, &calendar)
        .map_err(|e| format!("failed to save calendar: {e}"))?;

    if let Some(path) = out {
        let json = serde_json::to_string_pretty(&calendar)
            .map_err(|e| format!("failed to serialize calendar: {e}"))?;
        fs::write(path, json).map_err(|e| format!("failed to write {}: {e}", path.display()))?;
        eprintln!("Wrote calendar → {}", path.display());
    }

    eprintln!(
        "Planned {} entries over {days} day(s) from {start}",
        calendar.len()
    );
    Ok(())
}

fn cmd_show(storage: &Storage, project: &Project, json: bool) -> Result<(), String> {
    let schedule = load_schedule(storage, project)?;

    if json {
        let json = serde_json::to_string_pretty(&schedule)
            .map_err(|e| format!("failed to serialize calendar: {e}"))?;
        println!("{json}");
        return Ok(());
    }

    if schedule.is_empty() {
        println!("Nothing planned");
        return Ok(());
    }
    for entry in &schedule {
        println!("{}", format_entry(entry));
    }

    let pending: Vec<CalendarEntry> = schedule
        .into_iter()
        .filter(|e| e.status == EntryStatus::Scheduled)
        .map(|e| e.entry)
        .collect();
    if let Some(next) = next_scheduled(&pending, today()) {
        println!(
            "\nNext up: {} {} {} ({})",
            next.date, next.planned_time, next.topic_name, next.content_type
        );
    }
    Ok(())
}

fn cmd_next(storage: &Storage, project: &Project, date: Date, take: bool) -> Result<(), String> {
    let pending: Vec<ScheduledEntry> = load_schedule(storage, project)?
        .into_iter()
        .filter(|e| e.status == EntryStatus::Scheduled)
        .collect();
    let calendar: Vec<CalendarEntry> = pending.iter().map(|e| e.entry.clone()).collect();

    let Some(index) = next_scheduled_index(&calendar, date) else {
        eprintln!("Nothing scheduled on or after {date}");
        return Ok(());
    };
    let next = &pending[index];

    let json = serde_json::to_string_pretty(next)
        .map_err(|e| format!("failed to serialize entry: {e}"))?;
    println!("{json}");

    if take {
        storage
            .mark_taken(project.id, next.id)
            .map_err(|e| format!("failed to mark entry taken: {e}"))?;
        storage
            .record_generation(project.id, &next.entry.topic_id, today())
            .map_err(|e| format!("failed to record generation: {e}"))?;
        info!(entry = next.id, topic = %next.entry.topic_id, "took scheduled entry");
    }
    Ok(())
}

/// A hand-written entry before defaults are filled in.
struct Draft {
    date: Date,
    topic_id: Option<String>,
    content_type: Option<ContentTypeArg>,
    time: Option<Time>,
    title: Option<String>,
    keyword: Option<String>,
}

fn cmd_add(
    config: &Config,
    storage: &Storage,
    project: &Project,
    draft: Draft,
) -> Result<(), String> {
    let topics = storage
        .load_topics(project.id)
        .map_err(|e| format!("failed to load topics: {e}"))?;
    let calendar: Vec<CalendarEntry> = load_schedule(storage, project)?
        .into_iter()
        .map(|e| e.entry)
        .collect();

    let entry = build_entry(draft, &topics, &calendar, config);
    validate_entry(&entry, &calendar, &topics, &config.rules)
        .map_err(|rejection| format!("entry rejected: {rejection}"))?;

    let id = storage
        .append_entry(project.id, &entry)
        .map_err(|e| format!("failed to save entry: {e}"))?;

    println!("{id}");
    Ok(())
}

/// Fill in what a draft leaves out.
///
/// An unknown topic still yields an entry so validation can reject it.
/// Without a topic, the one furthest below its target share is used.
fn build_entry(
    draft: Draft,
    topics: &[Topic],
    calendar: &[CalendarEntry],
    config: &Config,
) -> CalendarEntry {
    let topic_id = match draft.topic_id {
        Some(id) => id,
        None => select_topic(topics, calendar)
            .map(|t| t.id.clone())
            .unwrap_or_default(),
    };
    let topic = topics.iter().find(|t| t.id == topic_id);
    let content_type = match (draft.content_type, topic) {
        (Some(arg), _) => arg.to_domain(),
        (None, Some(t)) => select_content_type(t, calendar, &config.rules),
        (None, None) => ContentType::Supporting,
    };

    CalendarEntry {
        date: draft.date,
        topic_name: topic.map(|t| t.name.clone()).unwrap_or_default(),
        priority_score: topic.map_or(0, |t| priority_score(t, content_type)),
        topic_id,
        content_type,
        title: draft.title,
        focus_keyword: draft.keyword,
        planned_time: draft
            .time
            .unwrap_or_else(|| optimal_publish_time(draft.date.weekday(), content_type)),
    }
}

fn cmd_limits(
    config: &Config,
    storage: &Storage,
    project: &Project,
    date: Date,
    json: bool,
) -> Result<(), String> {
    let topics = load_topics(storage, project)?;
    let generated = storage
        .generated_on(project.id, date)
        .map_err(|e| format!("failed to count generated articles: {e}"))?;

    let limits = check_daily_limits(&topics, date, &generated, &config.rules);

    if json {
        let json = serde_json::to_string_pretty(&limits)
            .map_err(|e| format!("failed to serialize limits: {e}"))?;
        println!("{json}");
        return Ok(());
    }
    for limit in &limits {
        println!("{}", format_limit(limit));
    }
    Ok(())
}

fn cmd_summary(
    storage: &Storage,
    project: &Project,
    start: Date,
    json: bool,
) -> Result<(), String> {
    let calendar: Vec<CalendarEntry> = load_schedule(storage, project)?
        .into_iter()
        .map(|e| e.entry)
        .collect();
    let summary =
        weekly_summary(&calendar, start).map_err(|e| format!("failed to summarize: {e}"))?;

    if json {
        let json = serde_json::to_string_pretty(&summary)
            .map_err(|e| format!("failed to serialize summary: {e}"))?;
        println!("{json}");
    } else {
        println!("{}", format_summary(&summary));
    }
    Ok(())
}

/// Load topics, failing when the project has none to plan from.
fn load_topics(storage: &Storage, project: &Project) -> Result<Vec<Topic>, String> {
    let topics = storage
        .load_topics(project.id)
        .map_err(|e| format!("failed to load topics: {e}"))?;
    if topics.is_empty() {
        return Err(format!(
            "project {} has no topics; import some with `topics import <file>`",
            project.name
        ));
    }
    Ok(topics)
}

fn load_schedule(storage: &Storage, project: &Project) -> Result<Vec<ScheduledEntry>, String> {
    storage
        .load_schedule(project.id)
        .map_err(|e| format!("failed to load calendar: {e}"))
}
