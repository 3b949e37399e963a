//! CSV export of tasks.

use chrono::NaiveDate;

use crate::task::{TaskPriority, TaskStatus};
use crate::types::Timestamp;

/// Column headers, in output order.
pub const EXPORT_HEADERS: &[&str] = &[
    "ID",
    "Project",
    "Title",
    "Description",
    "Status",
    "Priority",
    "Assignee",
    "Due Date",
    "Created At",
    "Updated At",
];

/// One exported task.
#[derive(Debug, Clone)]
pub struct ExportRow {
    pub id: String,
    pub project_name: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub assignee: Option<String>,
    pub due_date: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Quote a free-text field when it contains a delimiter, quote or newline.
/// Inner quotes are doubled. Missing values become empty fields.
pub fn escape_field(value: Option<&str>) -> String {
    let Some(value) = value.filter(|v| !v.is_empty()) else {
        return String::new();
    };
    let escaped = value.replace('"', "\"\"");
    if escaped.contains([',', '"', '\n']) {
        format!("\"{escaped}\"")
    } else {
        escaped
    }
}

/// Render the header line followed by one line per row, joined with `\n`.
pub fn to_csv(rows: &[ExportRow]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(EXPORT_HEADERS.join(","));
    for row in rows {
        let fields = [
            escape_field(Some(&row.id)),
            escape_field(row.project_name.as_deref()),
            escape_field(Some(&row.title)),
            escape_field(row.description.as_deref()),
            row.status.as_str().to_string(),
            row.priority.as_str().to_string(),
            escape_field(row.assignee.as_deref()),
            escape_field(row.due_date.as_deref()),
            row.created_at.to_rfc3339(),
            row.updated_at.to_rfc3339(),
        ];
        lines.push(fields.join(","));
    }
    lines.join("\n")
}

/// Attachment file name for an export taken on `date`.
pub fn export_filename(date: NaiveDate) -> String {
    format!("kanban-export-{}.csv", date.format("%Y-%m-%d"))
}
