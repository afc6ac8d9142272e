use catedra::api::{CmdMessage, MessageLevel};
use catedra::auth::CurrentUser;
use catedra::config::CatedraConfig;
use catedra::error::Result;
use catedra::model::{EntityKind, Record};
use chrono::{DateTime, Utc};
use colored::Colorize;
use console::Term;
use serde_json::Value;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const DEFAULT_LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const ID_WIDTH: usize = 32;

/// Fields tried, in order, for the one-line summary of a record.
const HEADLINE_FIELDS: [&str; 10] = [
    "title",
    "name",
    "site_title",
    "section",
    "platform",
    "subject",
    "email",
    "event_type",
    "content",
    "url",
];

pub fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub fn print_json(records: &[Record]) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(records)?);
    Ok(())
}

pub fn print_record(record: &Record) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(record)?);
    Ok(())
}

pub fn print_records(records: &[Record]) {
    if records.is_empty() {
        println!("No records found.");
        return;
    }

    let line_width = line_width();
    for record in records {
        let id = truncate_to_width(record.id().unwrap_or("-"), ID_WIDTH);
        let id_padding = ID_WIDTH.saturating_sub(id.width());

        let time_ago = record
            .created_date()
            .map(format_time_ago)
            .unwrap_or_default();
        let time_display = format!("{:>width$}", time_ago, width = TIME_WIDTH);

        let available = line_width.saturating_sub(ID_WIDTH + TIME_WIDTH + 4);
        let headline = truncate_to_width(&headline(record), available);
        let padding = available.saturating_sub(headline.width());

        println!(
            "  {}{}  {}{}{}",
            id.yellow(),
            " ".repeat(id_padding),
            headline,
            " ".repeat(padding),
            time_display.dimmed()
        );
    }
}

pub fn print_stats(stats: &[(EntityKind, usize)]) {
    for (kind, count) in stats {
        let name = format!("{:<18}", kind.name());
        if *count == 0 {
            println!("  {}{}", name.dimmed(), count.to_string().dimmed());
        } else {
            println!("  {}{}", name, count);
        }
    }
}

pub fn print_user(user: &CurrentUser) {
    println!("{} <{}>", user.name.bold(), user.email);
    println!("{}", format!("id: {}", user.id).dimmed());
}

pub fn print_config(config: &CatedraConfig) {
    println!("snapshot-key = {}", config.snapshot_key);
    println!("session-key = {}", config.session_key);
    println!("user-email = {}", config.user_email);
    println!("user-name = {}", config.user_name);
}

fn headline(record: &Record) -> String {
    HEADLINE_FIELDS
        .iter()
        .filter_map(|field| record.get(field))
        .find_map(|value| match value {
            Value::String(s) if !s.trim().is_empty() => Some(s.replace('\n', " ")),
            _ => None,
        })
        .unwrap_or_default()
}

fn line_width() -> usize {
    Term::stdout()
        .size_checked()
        .map(|(_, cols)| cols as usize)
        .unwrap_or(DEFAULT_LINE_WIDTH)
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(created_date: &str) -> String {
    let Ok(timestamp) = DateTime::parse_from_rfc3339(created_date) else {
        return String::new();
    };
    let duration = Utc::now().signed_duration_since(timestamp.with_timezone(&Utc));

    let formatter = Formatter::new();
    formatter.convert(duration.to_std().unwrap_or_default())
}
