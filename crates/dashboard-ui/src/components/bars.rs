use crate::themes::Theme;
use dashboard_core::formatting::percentage;
use ratatui::style::Style;
use ratatui::text::{Line, Span};

/// Visual configuration shared by every bar.
#[derive(Debug, Clone, Copy)]
pub struct BarConfig {
    /// Width in terminal columns of the bar portion (excluding labels).
    pub width: u16,
    pub filled_char: char,
    pub empty_char: char,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            width: 30,
            filled_char: '\u{2588}', // █  FULL BLOCK
            empty_char: '\u{2591}',  // ░  LIGHT SHADE
        }
    }
}

impl BarConfig {
    pub fn with_width(width: u16) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }
}

/// Columns a value occupies on a bar scaled so that `max` fills `width`.
pub fn scaled_width(value: f64, max: f64, width: u16) -> u16 {
    if max <= 0.0 || value <= 0.0 || !value.is_finite() {
        return 0;
    }
    let cols = (value / max * width as f64).round();
    cols.clamp(0.0, width as f64) as u16
}

fn repeat(c: char, n: u16) -> String {
    c.to_string().repeat(n as usize)
}

// ── ValueBar ─────────────────────────────────────────────────────────────────

/// Single-series horizontal bar relative to the chart maximum.
pub struct ValueBar<'a> {
    pub value: f64,
    pub max: f64,
    pub style: Style,
    pub theme: &'a Theme,
    pub config: BarConfig,
}

impl<'a> ValueBar<'a> {
    pub fn new(value: f64, max: f64, style: Style, theme: &'a Theme) -> Self {
        Self {
            value,
            max,
            style,
            theme,
            config: BarConfig::default(),
        }
    }

    pub fn width(mut self, width: u16) -> Self {
        self.config.width = width;
        self
    }

    /// Filled and empty spans, always exactly `config.width` columns.
    pub fn to_spans(&self) -> Vec<Span<'static>> {
        let filled = scaled_width(self.value, self.max, self.config.width);
        let empty = self.config.width - filled;
        vec![
            Span::styled(repeat(self.config.filled_char, filled), self.style),
            Span::styled(repeat(self.config.empty_char, empty), self.theme.bar_empty),
        ]
    }
}

// ── StackedBar ───────────────────────────────────────────────────────────────

/// Horizontal bar made of coloured segments laid end to end.
///
/// Segment boundaries are placed on the rounded cumulative sum so the filled
/// length always matches the bar of the segments' total.
pub struct StackedBar<'a> {
    pub segments: Vec<(f64, Style)>,
    pub max: f64,
    pub theme: &'a Theme,
    pub config: BarConfig,
}

impl<'a> StackedBar<'a> {
    pub fn new(segments: Vec<(f64, Style)>, max: f64, theme: &'a Theme) -> Self {
        Self {
            segments,
            max,
            theme,
            config: BarConfig::default(),
        }
    }

    pub fn width(mut self, width: u16) -> Self {
        self.config.width = width;
        self
    }

    pub fn to_spans(&self) -> Vec<Span<'static>> {
        let mut spans = Vec::with_capacity(self.segments.len() + 1);
        let mut cumulative = 0.0;
        let mut drawn: u16 = 0;

        for (value, style) in &self.segments {
            cumulative += value.max(0.0);
            let end = scaled_width(cumulative, self.max, self.config.width);
            let cols = end.saturating_sub(drawn);
            if cols > 0 {
                spans.push(Span::styled(repeat(self.config.filled_char, cols), *style));
                drawn = end;
            }
        }

        spans.push(Span::styled(
            repeat(self.config.empty_char, self.config.width - drawn),
            self.theme.bar_empty,
        ));
        spans
    }
}

// ── ShareBar ─────────────────────────────────────────────────────────────────

/// Proportional bar showing each part's share of the whole, followed by
/// percentage labels. Stands in for a pie chart.
pub struct ShareBar<'a> {
    /// `(label, value, style)` triples in display order.
    pub parts: Vec<(String, f64, Style)>,
    pub theme: &'a Theme,
    pub config: BarConfig,
}

impl<'a> ShareBar<'a> {
    pub fn new(parts: Vec<(String, f64, Style)>, theme: &'a Theme) -> Self {
        Self {
            parts,
            theme,
            config: BarConfig::default(),
        }
    }

    pub fn width(mut self, width: u16) -> Self {
        self.config.width = width;
        self
    }

    pub fn total(&self) -> f64 {
        self.parts.iter().map(|(_, v, _)| v.max(0.0)).sum()
    }

    /// Share of each part in percent, one decimal.
    pub fn shares(&self) -> Vec<(String, f64)> {
        let total = self.total();
        self.parts
            .iter()
            .map(|(label, v, _)| (label.clone(), percentage(v.max(0.0), total, 1)))
            .collect()
    }

    /// The bar itself, spanning the full width when the total is positive.
    pub fn to_line(&self) -> Line<'static> {
        let total = self.total();
        let segments = self.parts.iter().map(|(_, v, s)| (*v, *s)).collect();
        let bar = StackedBar {
            segments,
            max: total,
            theme: self.theme,
            config: self.config,
        };
        Line::from(bar.to_spans())
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
