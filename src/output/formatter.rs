use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::scoring::{Category, ResultRow};

const EMPTY_MESSAGE: &str = "No regions found.";

/// Output format for the result table on stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned table for terminals
    #[default]
    Table,
    /// Tab-separated values with a header row
    Tsv,
    /// Pretty-printed JSON array
    Json,
}

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a region name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format a score with four decimals
pub fn format_score(score: f64) -> String {
    format!("{:.4}", score)
}

/// Render results as an aligned table with a header row.
///
/// Columns: index, State, raw score, risk (0-100), contribution.
/// Region names are truncated only when stdout is a narrow terminal.
pub fn format_results_table(rows: &[ResultRow], use_colors: bool) -> String {
    if rows.is_empty() {
        return EMPTY_MESSAGE.to_string();
    }

    let score_width = 10;
    let index_width = rows.len().to_string().len() + 1;
    let name_width = rows
        .iter()
        .map(|r| r.state.chars().count())
        .max()
        .unwrap_or(0)
        .max("State".len());

    // index + separators + three score columns
    let fixed_width = index_width + 1 + 3 * (score_width + 2);
    let name_width = match get_terminal_width() {
        Some(width) if width > fixed_width + 10 => name_width.min(width - fixed_width),
        Some(_) => name_width.min(20),
        None => name_width,
    };

    let header = format!(
        "{:>iw$} {:<nw$}  {:>sw$}  {:>sw$}  {:>sw$}",
        "#",
        "State",
        "Raw",
        "Risk",
        "Contrib",
        iw = index_width,
        nw = name_width,
        sw = score_width
    );

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(if use_colors {
        header.bold().to_string()
    } else {
        header
    });

    for (idx, row) in rows.iter().enumerate() {
        let index_str = format!("{:>w$}", format!("{}.", idx + 1), w = index_width);
        let name = format!(
            "{:<w$}",
            truncate_name(&row.state, name_width),
            w = name_width
        );
        let raw = format!("{:>w$}", format_score(row.raw_score), w = score_width);
        let risk = format!("{:>w$}", format_score(row.risk), w = score_width);
        let contribution = format!("{:>w$}", format_score(row.contribution), w = score_width);

        lines.push(if use_colors {
            format!(
                "{} {}  {}  {}  {}",
                index_str.dimmed(),
                name,
                raw,
                risk.bold(),
                contribution.cyan()
            )
        } else {
            format!("{} {}  {}  {}  {}", index_str, name, raw, risk, contribution)
        });
    }

    lines.join("\n")
}

/// Format results as tab-separated values for scripting
/// Columns follow the result file header; no colors
pub fn format_tsv(rows: &[ResultRow]) -> String {
    let mut lines = vec![super::writer::RESULT_COLUMNS.join("\t")];
    lines.extend(rows.iter().map(|row| {
        format!(
            "{}\t{}\t{}\t{}",
            row.state, row.raw_score, row.risk, row.contribution
        )
    }));
    lines.join("\n")
}

/// Format results as a JSON array keyed by the result file column names
pub fn format_json(rows: &[ResultRow]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(rows)
}

/// Format one region with its per-category breakdown (for verbose mode)
pub fn format_region_detail(row: &ResultRow, use_colors: bool) -> String {
    let mut lines = vec![if use_colors {
        row.state.bold().to_string()
    } else {
        row.state.clone()
    }];
    lines.push(format!(
        "  Raw: {}  Risk: {}  Contribution: {}",
        format_score(row.raw_score),
        format_score(row.risk),
        format_score(row.contribution)
    ));
    for category in Category::ALL {
        lines.push(format!(
            "  {:<4} total {:>10}  normalized {:.4}  weighted {:.4}",
            category.column(),
            row.breakdown.totals[category],
            row.breakdown.normalized[category],
            row.breakdown.weighted[category]
        ));
    }
    lines.join("\n")
}
