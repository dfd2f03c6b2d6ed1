//! Shared formatting helpers

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

/// Render rows as a plain table with right-aligned value columns
pub fn render_table<T: Tabled>(rows: Vec<T>, first_value_column: usize) -> String {
    let mut table = Table::new(rows);
    table.with(Style::psql());
    table.modify(Columns::new(first_value_column..), Alignment::right());
    table.to_string()
}

/// Proportional bar of `width` cells
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Cut `text` to `width` characters, marking the cut with an ellipsis
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", kept)
}

pub fn check_mark(checked: bool) -> &'static str {
    if checked {
        "[x]"
    } else {
        "[ ]"
    }
}

pub fn separator(width: usize) -> String {
    "─".repeat(width)
}
