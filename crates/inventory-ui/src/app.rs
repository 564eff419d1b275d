//! Application state and TUI event loop for the inventory dashboard.
//!
//! [`App`] owns the theme, the current view mode, and the precomputed
//! dashboard data. The inventory is read once at startup; the event loop
//! only redraws and handles keys.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};

use inventory_data::analysis::DashboardData;

use crate::dashboard_view;
use crate::table_view;
use crate::themes::Theme;

// ── ViewMode ──────────────────────────────────────────────────────────────────

/// Which view the TUI is currently rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Distribution dashboard.
    Dashboard,
    /// Monthly cumulative growth table.
    MonthlyGrowth,
    /// Yearly cumulative growth table.
    YearlyGrowth,
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the inventory TUI.
pub struct App {
    /// Active colour theme.
    pub theme: Theme,
    /// Current view mode.
    pub view_mode: ViewMode,
    /// Precomputed dashboard data.
    pub data: DashboardData,
}

impl App {
    /// Construct a new application with the given configuration.
    pub fn new(theme_name: &str, view_mode: ViewMode, data: DashboardData) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            view_mode,
            data,
        }
    }

    /// Run the TUI event loop until the user exits.
    ///
    /// Uses `crossterm::event::poll` with a 250 ms timeout so the loop stays
    /// responsive without burning CPU. The loop exits on `q`, `Q`, or
    /// `Ctrl+C`; `d`, `m`, and `y` switch between the dashboard and the
    /// monthly/yearly growth views.
    pub fn run(mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            terminal.draw(|frame| self.render(frame))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    match key.code {
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            break Ok(());
                        }
                        KeyCode::Char('q') | KeyCode::Char('Q') => break Ok(()),
                        KeyCode::Char('d') | KeyCode::Char('D') => {
                            self.view_mode = ViewMode::Dashboard;
                        }
                        KeyCode::Char('m') | KeyCode::Char('M') => {
                            self.view_mode = ViewMode::MonthlyGrowth;
                        }
                        KeyCode::Char('y') | KeyCode::Char('Y') => {
                            self.view_mode = ViewMode::YearlyGrowth;
                        }
                        _ => {}
                    }
                }
            }
        };

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    /// Render the current application state into `frame`.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        if self.data.summary.total == 0 {
            table_view::render_no_data(frame, area, &self.theme);
            return;
        }

        match self.view_mode {
            ViewMode::Dashboard => {
                dashboard_view::render_dashboard(frame, area, &self.data, &self.theme);
            }
            ViewMode::MonthlyGrowth => {
                table_view::render_growth_table(
                    frame,
                    area,
                    "Monthly Growth",
                    &self.data.growth.monthly,
                    self.data.growth.baseline,
                    &self.theme,
                );
            }
            ViewMode::YearlyGrowth => {
                table_view::render_growth_table(
                    frame,
                    area,
                    "Yearly Growth",
                    &self.data.growth.yearly,
                    self.data.growth.baseline,
                    &self.theme,
                );
            }
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
