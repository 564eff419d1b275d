//! Cumulative growth table (monthly / yearly) for the inventory TUI.
//!
//! Renders a bordered [`ratatui::widgets::Table`] with one row per period
//! plus a highlighted final-total row at the bottom. Records whose
//! installation date could not be parsed show up as a dimmed baseline row
//! above the first period.

use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use inventory_core::formatting;
use inventory_core::growth::GrowthPoint;

use crate::themes::Theme;

/// Render the monthly or yearly growth table into `area`.
///
/// The table shows one data row per [`GrowthPoint`], preceded by a baseline
/// row when `baseline > 0` and followed by a highlighted total row, all
/// within a bordered block titled `title`.
pub fn render_growth_table(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    points: &[GrowthPoint],
    baseline: u64,
    theme: &Theme,
) {
    let header_cells = ["Period", "Added", "Total"]
        .iter()
        .map(|h| Cell::from(*h).style(theme.table_header));
    let header = Row::new(header_cells).height(1);

    let mut all_rows: Vec<Row> = Vec::with_capacity(points.len() + 2);

    if baseline > 0 {
        all_rows.push(
            Row::new(vec![
                Cell::from("(baseline)"),
                Cell::from(""),
                Cell::from(formatting::format_count(baseline)),
            ])
            .style(theme.dim),
        );
    }

    for (i, point) in points.iter().enumerate() {
        let style = if i % 2 == 0 {
            theme.table_row
        } else {
            theme.table_row_alt
        };
        all_rows.push(
            Row::new(vec![
                Cell::from(point.label.clone()),
                Cell::from(formatting::format_count(point.added)),
                Cell::from(formatting::format_count(point.total)),
            ])
            .style(style),
        );
    }

    let added_sum: u64 = points.iter().map(|p| p.added).sum();
    let final_total = points.last().map(|p| p.total).unwrap_or(baseline);
    all_rows.push(
        Row::new(vec![
            Cell::from("TOTAL"),
            Cell::from(formatting::format_count(added_sum)),
            Cell::from(formatting::format_count(final_total)),
        ])
        .style(theme.table_total),
    );

    let widths = [
        Constraint::Length(12),
        Constraint::Length(10),
        Constraint::Length(10),
    ];

    let table = Table::new(all_rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", title)),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

/// Render a "no data" placeholder when the inventory is empty.
pub fn render_no_data(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No inventory records found", theme.warning)),
        Line::from(""),
        Line::from(Span::styled(
            "Import a sheet with 'pg-inventory import <file>' or add records with 'pg-inventory add'.",
            theme.dim,
        )),
        Line::from(Span::styled("Press 'q' or Ctrl+C to exit", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(ratatui::text::Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" PostgreSQL Inventory "),
        ),
        area,
    );
}

// ── Tests ──────────────────────────────────────────────────────────────────────
