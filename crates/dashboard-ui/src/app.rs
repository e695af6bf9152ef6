//! Main application state and TUI event loop for the sales dashboard.
//!
//! [`App`] owns the theme, the [`Dashboard`] selection state and the city
//! colour assignment. Month changes come from the keyboard; every change
//! recomputes the snapshot and the next frame redraws all five charts.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span, Text},
    widgets::Paragraph,
    Frame, Terminal,
};

use dashboard_data::views::ViewId;
use dashboard_runtime::dashboard::Dashboard;

use crate::chart_view::{self, SeriesColors};
use crate::components::header::{Header, CAPTION};
use crate::themes::Theme;

/// Key hints shown next to the caption.
pub const KEY_HINTS: &str = "←/→ mês · Home/End primeiro/último · q sair";

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the dashboard TUI.
pub struct App {
    pub theme: Theme,
    pub dashboard: Dashboard,
    pub colors: SeriesColors,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
}

impl App {
    pub fn new(theme_name: &str, dashboard: Dashboard) -> Self {
        let colors = SeriesColors::new(dashboard.table().cities());
        Self {
            theme: Theme::from_name(theme_name),
            dashboard,
            colors,
            should_quit: false,
        }
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Run the dashboard until the user quits.
    ///
    /// Uses `crossterm::event::poll` with a 250 ms timeout so the loop stays
    /// responsive to cancellation of the surrounding task.
    pub async fn run(mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);
        tracing::debug!("terminal initialised");

        let result = loop {
            if let Err(e) = terminal.draw(|frame| self.render(frame)) {
                break Err(e);
            }

            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) => self.handle_key(key),
                    Ok(_) => {}
                    Err(e) => break Err(e),
                },
                Ok(false) => {}
                Err(e) => break Err(e),
            }

            if self.should_quit {
                tracing::info!("quit requested");
                break Ok(());
            }

            tokio::task::yield_now().await;
        };

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    /// Leave raw mode and the alternate screen outside the event loop, for
    /// when [`App::run`] is cancelled before it can clean up.
    pub fn restore_terminal() -> io::Result<()> {
        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen, crossterm::cursor::Show)?;
        Ok(())
    }

    /// Apply one key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Right | KeyCode::Char('l') => {
                self.dashboard.next_month();
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.dashboard.prev_month();
            }
            KeyCode::Home => {
                self.dashboard.first_month();
            }
            KeyCode::End => {
                self.dashboard.last_month();
            }
            _ => {}
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Render header, the two chart rows and the caption into `frame`.
    pub fn render(&self, frame: &mut Frame) {
        let [header_area, top, bottom, caption_area] = Self::layout(frame.area());

        let snapshot = self.dashboard.snapshot();
        let header = Header::new(
            self.dashboard.months(),
            self.dashboard.selected_month(),
            snapshot.rows,
            snapshot.revenue,
            &self.theme,
        );
        frame.render_widget(Paragraph::new(Text::from(header.to_lines())), header_area);

        let top_cols = Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(top);
        let bottom_cols = Layout::horizontal([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(bottom);

        let placement = [
            (ViewId::RevenueByDay, top_cols[0]),
            (ViewId::RevenueByProductLine, top_cols[1]),
            (ViewId::RevenueByCity, bottom_cols[0]),
            (ViewId::RevenueByPayment, bottom_cols[1]),
            (ViewId::RatingByCity, bottom_cols[2]),
        ];
        for (id, area) in placement {
            if let Some(view) = snapshot.view(id) {
                chart_view::render_view(frame, area, view, &self.colors, &self.theme);
            }
        }

        let caption = Line::from(vec![
            Span::styled(CAPTION, self.theme.caption),
            Span::raw("   "),
            Span::styled(KEY_HINTS, self.theme.dim),
        ]);
        frame.render_widget(Paragraph::new(caption), caption_area);
    }

    fn layout(area: Rect) -> [Rect; 4] {
        let chunks = Layout::vertical([
            Constraint::Length(Header::HEIGHT),
            Constraint::Percentage(50),
            Constraint::Percentage(50),
            Constraint::Length(1),
        ])
        .split(area);
        [chunks[0], chunks[1], chunks[2], chunks[3]]
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
