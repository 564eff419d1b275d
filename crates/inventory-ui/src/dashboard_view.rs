//! Aggregate dashboard view for the inventory TUI.
//!
//! Renders the headline summary counters followed by a grid of distribution
//! panels (status, category, site, business, version, role) with
//! proportional bars, and a compact growth strip at the bottom.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use inventory_core::formatting;
use inventory_data::analysis::{DashboardData, DistributionEntry};

use crate::themes::Theme;

/// Width of a distribution bar in characters.
const BAR_WIDTH: usize = 20;

/// Render the full dashboard into `area`.
pub fn render_dashboard(frame: &mut Frame, area: Rect, data: &DashboardData, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),  // summary header
            Constraint::Min(10),    // distribution grid
            Constraint::Length(5),  // growth strip
        ])
        .split(area);

    render_summary(frame, chunks[0], data, theme);
    render_distribution_grid(frame, chunks[1], data, theme);
    render_growth_strip(frame, chunks[2], data, theme);
}

// ── Summary header ────────────────────────────────────────────────────────────

fn render_summary(frame: &mut Frame, area: Rect, data: &DashboardData, theme: &Theme) {
    let s = &data.summary;
    let lines = vec![
        Line::from(vec![
            Span::styled("Databases: ", theme.label),
            Span::styled(formatting::format_count(s.total), theme.value),
            Span::styled("   Production: ", theme.label),
            Span::styled(formatting::format_count(s.production), theme.value),
            Span::styled("   Development: ", theme.label),
            Span::styled(formatting::format_count(s.development), theme.value),
            Span::styled("   Pre Production: ", theme.label),
            Span::styled(formatting::format_count(s.pre_production), theme.value),
        ]),
        Line::from(vec![
            Span::styled("Masters: ", theme.label),
            Span::styled(formatting::format_count(s.master), theme.success),
            Span::styled("   Replicas/Standbys: ", theme.label),
            Span::styled(formatting::format_count(s.replica), theme.warning),
        ]),
    ];

    frame.render_widget(
        Paragraph::new(Text::from(lines)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" PostgreSQL Inventory "),
        ),
        area,
    );
}

// ── Distribution panels ───────────────────────────────────────────────────────

fn render_distribution_grid(frame: &mut Frame, area: Rect, data: &DashboardData, theme: &Theme) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

    let panels: [(&str, &[DistributionEntry]); 6] = [
        ("Status", &data.status),
        ("Category", &data.category),
        ("Site", &data.site),
        ("Business Category", &data.business),
        ("Version", &data.version),
        ("Replication Role", &data.role),
    ];

    for (i, row) in rows.iter().enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(*row);
        for (j, col) in cols.iter().enumerate() {
            let (title, entries) = panels[i * 2 + j];
            render_distribution_panel(frame, *col, title, entries, theme);
        }
    }
}

/// Render one distribution panel with a proportional bar per entry.
///
/// Bars are scaled against the largest count in the panel so the busiest
/// bucket always fills the full bar width.
fn render_distribution_panel(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    entries: &[DistributionEntry],
    theme: &Theme,
) {
    let max_count = entries.iter().map(|e| e.count).max().unwrap_or(0);
    let panel_total: u64 = entries.iter().map(|e| e.count).sum();

    let lines: Vec<Line> = if entries.is_empty() {
        vec![Line::from(Span::styled("no data", theme.dim))]
    } else {
        entries
            .iter()
            .map(|entry| {
                let (filled, empty) = build_bar(entry.count, max_count, BAR_WIDTH);
                let share = formatting::percentage(entry.count, panel_total, 1);
                Line::from(vec![
                    Span::styled(format!("{:<24.24} ", entry.label), theme.text),
                    Span::styled(filled, theme.bar_fill),
                    Span::styled(empty, theme.bar_empty),
                    Span::styled(
                        format!(" {:>6}", formatting::format_count(entry.count)),
                        theme.value,
                    ),
                    Span::styled(format!(" ({:.1}%)", share), theme.dim),
                ])
            })
            .collect()
    };

    frame.render_widget(
        Paragraph::new(Text::from(lines)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", title)),
        ),
        area,
    );
}

/// Build a proportional bar, returning `(filled_str, empty_str)`.
fn build_bar(count: u64, max_count: u64, width: usize) -> (String, String) {
    let filled = if max_count == 0 {
        0
    } else {
        ((count as f64 / max_count as f64) * width as f64).round() as usize
    };
    let filled = filled.min(width);
    ("█".repeat(filled), "░".repeat(width - filled))
}

// ── Growth strip ──────────────────────────────────────────────────────────────

/// Compact single-line rendering of the most recent monthly growth points.
fn render_growth_strip(frame: &mut Frame, area: Rect, data: &DashboardData, theme: &Theme) {
    let growth = &data.growth;

    let lines: Vec<Line> = if growth.monthly.is_empty() {
        vec![Line::from(Span::styled(
            "no parseable installation dates",
            theme.dim,
        ))]
    } else {
        // The strip shows the last 6 months plus the baseline.
        let recent = &growth.monthly[growth.monthly.len().saturating_sub(6)..];
        let mut spans = vec![Span::styled(
            format!("baseline {}  ", formatting::format_count(growth.baseline)),
            theme.dim,
        )];
        for point in recent {
            spans.push(Span::styled(format!("{}: ", point.label), theme.label));
            spans.push(Span::styled(
                format!("+{} ", formatting::format_count(point.added)),
                theme.success,
            ));
            spans.push(Span::styled(
                format!("({})  ", formatting::format_count(point.total)),
                theme.value,
            ));
        }
        vec![
            Line::from(spans),
            Line::from(Span::styled("Press 'q' or Ctrl+C to exit", theme.dim)),
        ]
    };

    frame.render_widget(
        Paragraph::new(Text::from(lines)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Growth (monthly) "),
        ),
        area,
    );
}

// ── Tests ──────────────────────────────────────────────────────────────────────
