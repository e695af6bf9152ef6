use ratatui::style::{Color, Modifier, Style};

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
    Unknown,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`. Background values
/// 0–6 are dark, 7–15 light. Absent or unparseable values report
/// [`BackgroundType::Unknown`].
pub fn detect_background() -> BackgroundType {
    std::env::var("COLORFGBG")
        .ok()
        .as_deref()
        .map(background_from_colorfgbg)
        .unwrap_or(BackgroundType::Unknown)
}

fn background_from_colorfgbg(val: &str) -> BackgroundType {
    match val.split(';').next_back().and_then(|bg| bg.parse::<u8>().ok()) {
        Some(bg) if bg <= 6 => BackgroundType::Dark,
        Some(_) => BackgroundType::Light,
        None => BackgroundType::Unknown,
    }
}

/// Styles used by every dashboard component.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub caption: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub dim: Style,
    pub bold: Style,
    pub label: Style,
    pub value: Style,

    // ── Month selector ───────────────────────────────────────────────────────
    pub month_selected: Style,
    pub month_other: Style,

    // ── Charts ───────────────────────────────────────────────────────────────
    pub chart_border: Style,
    pub chart_title: Style,
    pub axis_label: Style,
    /// Unfilled track behind a bar.
    pub bar_empty: Style,
    /// Bar colour for single-series charts.
    pub bar_single: Style,
    /// Placeholder shown when a view has no rows.
    pub no_data: Style,

    /// Series colours, assigned to cities in table order.
    pub series: Vec<Color>,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            caption: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
            separator: Style::default().fg(Color::DarkGray),

            dim: Style::default().fg(Color::DarkGray),
            bold: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            month_selected: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            month_other: Style::default().fg(Color::Gray),

            chart_border: Style::default().fg(Color::DarkGray),
            chart_title: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            axis_label: Style::default().fg(Color::Gray),
            bar_empty: Style::default().fg(Color::DarkGray),
            bar_single: Style::default().fg(Color::Cyan),
            no_data: Style::default().fg(Color::DarkGray),

            series: vec![
                Color::Cyan,
                Color::Magenta,
                Color::Yellow,
                Color::Green,
                Color::Blue,
                Color::Red,
            ],
        }
    }

    /// Light-background terminal theme.
    ///
    /// Dark text with saturated accents so bars stay legible on a light
    /// canvas.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            caption: Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),
            separator: Style::default().fg(Color::Gray),

            dim: Style::default().fg(Color::Gray),
            bold: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            month_selected: Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            month_other: Style::default().fg(Color::DarkGray),

            chart_border: Style::default().fg(Color::Gray),
            chart_title: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            axis_label: Style::default().fg(Color::DarkGray),
            bar_empty: Style::default().fg(Color::Gray),
            bar_single: Style::default().fg(Color::Blue),
            no_data: Style::default().fg(Color::Gray),

            series: vec![
                Color::Blue,
                Color::Magenta,
                Color::Red,
                Color::Green,
                Color::Cyan,
                Color::Yellow,
            ],
        }
    }

    /// Classic theme using only the basic 8-colour ANSI palette and no bold
    /// modifiers.
    pub fn classic() -> Self {
        Self {
            header: Style::default().fg(Color::Cyan),
            caption: Style::default().fg(Color::DarkGray),
            separator: Style::default().fg(Color::DarkGray),

            dim: Style::default().fg(Color::DarkGray),
            bold: Style::default().fg(Color::White),
            label: Style::default().fg(Color::Gray),
            value: Style::default().fg(Color::White),

            month_selected: Style::default().fg(Color::Black).bg(Color::White),
            month_other: Style::default().fg(Color::Gray),

            chart_border: Style::default().fg(Color::DarkGray),
            chart_title: Style::default().fg(Color::Cyan),
            axis_label: Style::default().fg(Color::Gray),
            bar_empty: Style::default().fg(Color::DarkGray),
            bar_single: Style::default().fg(Color::Green),
            no_data: Style::default().fg(Color::DarkGray),

            series: vec![Color::Green, Color::Yellow, Color::Cyan, Color::Magenta],
        }
    }

    /// Choose a theme from the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Construct a theme by name. Unknown names fall back to
    /// [`Theme::auto_detect`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => Self::auto_detect(),
        }
    }

    // ── Style helpers ────────────────────────────────────────────────────────

    /// Colour of the `idx`-th series, cycling through the palette.
    pub fn series_color(&self, idx: usize) -> Color {
        if self.series.is_empty() {
            return Color::Reset;
        }
        self.series[idx % self.series.len()]
    }

    pub fn series_style(&self, idx: usize) -> Style {
        Style::default().fg(self.series_color(idx))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
