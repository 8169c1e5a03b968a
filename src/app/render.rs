use crate::domain::model::{BlockReason, CourseRow, SelectionSummary};
use serde::Serialize;
use std::fmt::Write;

pub const HELP: &str = "\
Commands:
  add <code>     choose a course
  drop <code>    remove a course from the selection
  force <code>   choose a course even if it is blocked
  limit <n>      change the maximum number of courses
  clear          deselect everything
  show           print the course list
  summary        print the selected courses and conflicts
  help           print this help
  quit           leave";

pub fn render_table(rows: &[CourseRow]) -> String {
    let width = rows.iter().map(|row| row.name.chars().count()).max().unwrap_or(0);
    let mut out = String::from("Course List\n");

    for row in rows {
        let marker = if row.chosen {
            "[x]"
        } else if row.is_blocked {
            "[-]"
        } else {
            "[ ]"
        };
        let _ = write!(
            out,
            "{} {:<width$}  (Code: {})",
            marker,
            row.name,
            row.id,
            width = width
        );
        if row.block_reason != BlockReason::None {
            let _ = write!(out, "  {}", row.block_reason);
        }
        out.push('\n');
    }

    out
}

pub fn render_summary(summary: &SelectionSummary) -> String {
    let mut out = String::new();

    if summary.limit_reached {
        let _ = writeln!(
            out,
            "You have selected {} courses. Deselect one to add others.",
            summary.selected_names.len()
        );
        out.push('\n');
    }

    out.push_str("Selected Courses:\n");
    if summary.selected_names.is_empty() {
        out.push_str("  No courses selected.\n");
    } else {
        for name in &summary.selected_names {
            let _ = writeln!(out, "  • {}", name);
        }
    }

    out.push_str("\nConflicts:\n");
    if summary.selected_names.is_empty() {
        out.push_str("  Select courses to see incompatibility information.\n");
    } else if summary.conflict_pairs.is_empty() {
        out.push_str("  No conflicts! All selected courses are compatible.\n");
    } else {
        for pair in &summary.conflict_pairs {
            let _ = writeln!(out, "  • {} is not compatible with {}", pair.first, pair.second);
        }
    }

    if !summary.excluded_names.is_empty() {
        out.push_str("\nNot compatible with your current selection:\n");
        for name in &summary.excluded_names {
            let _ = writeln!(out, "  • {}", name);
        }
    }

    out
}

#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub rows: &'a [CourseRow],
    pub summary: &'a SelectionSummary,
}

pub fn render_json(rows: &[CourseRow], summary: &SelectionSummary) -> crate::Result<String> {
    Ok(serde_json::to_string_pretty(&JsonReport { rows, summary })?)
}
