//! Calendar task types and export table building
//!
//! Turns a date-keyed task collection into the two-column table the PDF
//! exporter renders. Table building is pure so the export content can be
//! asserted on without generating a document.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single study task, keyed implicitly by its owning date
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Subject the task belongs to (e.g., "Math")
    pub subject: String,
    /// Task title
    pub title: String,
    /// Task kind (e.g., "homework", "exam")
    #[serde(rename = "type")]
    pub kind: String,
}

/// Date-keyed task collection. Keys are `YYYY-MM-DD` strings, need not be
/// contiguous, and carry no ordering guarantee — exports always sort keys
/// lexicographically, which is chronological for this format.
pub type TasksByDate = HashMap<String, Vec<Task>>;

/// Header row of every exported table
pub const TABLE_HEADER: [&str; 2] = ["Date", "Task List"];

/// Render one task as its export cell line: `"{subject}：{title} ({kind})"`.
/// The fullwidth colon is part of the format.
pub fn format_task(task: &Task) -> String {
    format!("{}：{} ({})", task.subject, task.title, task.kind)
}

/// Build the export table for the full collection: header row, then one row
/// per date key sorted ascending, tasks joined by newlines within the cell.
///
/// An empty collection yields a header-only table, not an error.
pub fn build_table(tasks_by_date: &TasksByDate) -> Vec<[String; 2]> {
    let mut days: Vec<&String> = tasks_by_date.keys().collect();
    days.sort();
    rows_for_days(tasks_by_date, &days)
}

/// Build the export table scoped to the month of `reference`: keys whose
/// year and (1-based) month match the reference date are kept, everything
/// else — including keys that do not parse as `YYYY-MM-DD` — is dropped.
pub fn build_month_table(tasks_by_date: &TasksByDate, reference: NaiveDate) -> Vec<[String; 2]> {
    let mut days: Vec<&String> = tasks_by_date
        .keys()
        .filter(|day| {
            NaiveDate::parse_from_str(day, "%Y-%m-%d").is_ok_and(|date| {
                date.year() == reference.year() && date.month() == reference.month()
            })
        })
        .collect();
    days.sort();
    rows_for_days(tasks_by_date, &days)
}

/// Document heading for a month-scoped export, e.g. `2025年9月`.
pub fn month_title(reference: NaiveDate) -> String {
    format!("{}年{}月", reference.year(), reference.month())
}

fn rows_for_days(tasks_by_date: &TasksByDate, days: &[&String]) -> Vec<[String; 2]> {
    let mut body = vec![[TABLE_HEADER[0].to_string(), TABLE_HEADER[1].to_string()]];
    for day in days {
        let cell = tasks_by_date
            .get(*day)
            .map(|tasks| {
                tasks
                    .iter()
                    .map(format_task)
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .unwrap_or_default();
        body.push([(*day).clone(), cell]);
    }
    body
}
