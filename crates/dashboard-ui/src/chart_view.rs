//! Chart panels for the aggregate views.
//!
//! Every [`AggregateView`] is drawn as a bordered [`Paragraph`] of text bars.
//! The shape follows the view's [`ChartKind`]; colours for city series come
//! from [`SeriesColors`] so a city keeps its colour across every panel and
//! every month.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use dashboard_core::formatting::{format_compact, format_currency, format_number};
use dashboard_data::views::{AggregateView, ChartKind, GroupKey, Measure, Reduction, ViewDef};

use crate::components::bars::{ShareBar, StackedBar, ValueBar};
use crate::themes::Theme;

/// Placeholder for a view with no rows.
pub const NO_DATA: &str = "Sem dados para o mês selecionado";

// ── Series colours ────────────────────────────────────────────────────────────

/// Fixed city → palette slot assignment.
#[derive(Debug, Clone, Default)]
pub struct SeriesColors {
    cities: Vec<String>,
}

impl SeriesColors {
    /// Assign slots in the given order; duplicates keep their first slot.
    pub fn new(cities: Vec<String>) -> Self {
        let mut unique: Vec<String> = Vec::with_capacity(cities.len());
        for city in cities {
            if !unique.contains(&city) {
                unique.push(city);
            }
        }
        Self { cities: unique }
    }

    /// Palette slot of `city`. Unknown names share the slot after the last
    /// known city.
    pub fn index_of(&self, city: &str) -> usize {
        self.cities
            .iter()
            .position(|c| c == city)
            .unwrap_or(self.cities.len())
    }

    pub fn style(&self, city: &str, theme: &Theme) -> Style {
        theme.series_style(self.index_of(city))
    }

    pub fn cities(&self) -> &[String] {
        &self.cities
    }
}

// ── Text helpers ──────────────────────────────────────────────────────────────

/// Pad or truncate `s` to exactly `width` display columns.
pub fn fit(s: &str, width: usize) -> String {
    let current = s.width();
    if current <= width {
        return format!("{s}{}", " ".repeat(width - current));
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    used += 1;
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

/// Short value label for bar ends.
fn bar_value(def: &ViewDef, value: f64) -> String {
    match def.reduction {
        Reduction::Mean(Measure::Rating) | Reduction::Sum(Measure::Rating) => {
            format_number(value, 2)
        }
        Reduction::Sum(Measure::Total) | Reduction::Mean(Measure::Total) => format_compact(value),
    }
}

/// Day label for the daily chart: `YYYY-MM-DD` → `MM-DD`.
fn short_day(key: &str) -> &str {
    if key.len() == 10 {
        key.get(5..).unwrap_or(key)
    } else {
        key
    }
}

struct Columns {
    label: usize,
    value: usize,
    bar: u16,
}

impl Columns {
    fn new<'s>(width: u16, labels: impl Iterator<Item = &'s str>, values: &[String], indent: usize) -> Self {
        let label = labels
            .map(|l| l.width())
            .max()
            .unwrap_or(0)
            .min(width as usize / 3);
        let value = values.iter().map(|v| v.width()).max().unwrap_or(0);
        let used = indent + label + value + 2;
        Self {
            label,
            value,
            bar: (width as usize).saturating_sub(used) as u16,
        }
    }
}

// ── Line builders ─────────────────────────────────────────────────────────────

/// Lines for `view` drawn inside `width` columns.
pub fn view_lines(
    view: &AggregateView,
    colors: &SeriesColors,
    theme: &Theme,
    width: u16,
) -> Vec<Line<'static>> {
    if view.is_empty() {
        return vec![
            Line::from(""),
            Line::from(Span::styled(NO_DATA, theme.no_data)),
        ];
    }

    let mut lines = vec![Line::from(Span::styled(
        format!("{} × {}", view.def.key_label, view.def.value_label),
        theme.axis_label,
    ))];

    lines.extend(match view.def.chart {
        ChartKind::Bar => bar_lines(view, colors, theme, width),
        ChartKind::HorizontalGroupedBar => grouped_lines(view, colors, theme, width),
        ChartKind::StackedBar => stacked_lines(view, colors, theme, width),
        ChartKind::Pie => share_lines(view, theme, width),
    });
    lines
}

fn bar_lines(view: &AggregateView, colors: &SeriesColors, theme: &Theme, width: u16) -> Vec<Line<'static>> {
    let max = view.max_value().unwrap_or(0.0);
    let values: Vec<String> = view.rows.iter().map(|r| bar_value(&view.def, r.value)).collect();
    let cols = Columns::new(width, view.rows.iter().map(|r| r.key.as_str()), &values, 0);
    let by_city = view.def.group_by.first() == Some(&GroupKey::City);

    view.rows
        .iter()
        .zip(values)
        .map(|(row, value)| {
            let style = if by_city {
                colors.style(&row.key, theme)
            } else {
                theme.bar_single
            };
            let mut spans = vec![Span::styled(fit(&row.key, cols.label), theme.label), Span::raw(" ")];
            spans.extend(ValueBar::new(row.value, max, style, theme).width(cols.bar).to_spans());
            spans.push(Span::raw(" "));
            spans.push(Span::styled(format!("{value:>w$}", w = cols.value), theme.value));
            Line::from(spans)
        })
        .collect()
}

fn grouped_lines(view: &AggregateView, colors: &SeriesColors, theme: &Theme, width: u16) -> Vec<Line<'static>> {
    let max = view.max_value().unwrap_or(0.0);
    let values: Vec<String> = view.rows.iter().map(|r| bar_value(&view.def, r.value)).collect();
    let cols = Columns::new(
        width,
        view.rows.iter().filter_map(|r| r.subkey.as_deref()),
        &values,
        2,
    );

    let mut lines = Vec::new();
    let mut current: Option<&str> = None;
    for (row, value) in view.rows.iter().zip(values) {
        if current != Some(row.key.as_str()) {
            lines.push(Line::from(Span::styled(row.key.clone(), theme.bold)));
            current = Some(row.key.as_str());
        }
        let series = row.subkey.as_deref().unwrap_or("");
        let style = colors.style(series, theme);
        let mut spans = vec![
            Span::raw("  "),
            Span::styled(fit(series, cols.label), theme.label),
            Span::raw(" "),
        ];
        spans.extend(ValueBar::new(row.value, max, style, theme).width(cols.bar).to_spans());
        spans.push(Span::raw(" "));
        spans.push(Span::styled(format!("{value:>w$}", w = cols.value), theme.value));
        lines.push(Line::from(spans));
    }
    lines
}

fn legend(view: &AggregateView, colors: &SeriesColors, theme: &Theme) -> Line<'static> {
    let mut present: Vec<&str> = view.rows.iter().filter_map(|r| r.subkey.as_deref()).collect();
    present.sort_by_key(|s| (colors.index_of(s), *s));
    present.dedup();

    let mut spans = Vec::new();
    for city in present {
        if !spans.is_empty() {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled("■ ", colors.style(city, theme)));
        spans.push(Span::styled(city.to_string(), theme.label));
    }
    Line::from(spans)
}

fn stacked_lines(view: &AggregateView, colors: &SeriesColors, theme: &Theme, width: u16) -> Vec<Line<'static>> {
    let keys = view.keys();
    let totals: Vec<f64> = keys
        .iter()
        .map(|k| view.rows_for(k).map(|r| r.value).sum())
        .collect();
    let max = totals.iter().copied().fold(0.0, f64::max);
    let values: Vec<String> = totals.iter().map(|t| bar_value(&view.def, *t)).collect();
    let cols = Columns::new(width, keys.iter().map(|k| short_day(k)), &values, 0);

    let mut lines = vec![legend(view, colors, theme)];
    for (key, value) in keys.iter().zip(values) {
        let mut rows: Vec<_> = view.rows_for(key).collect();
        rows.sort_by_key(|r| colors.index_of(r.subkey.as_deref().unwrap_or("")));
        let segments = rows
            .iter()
            .map(|r| (r.value, colors.style(r.subkey.as_deref().unwrap_or(""), theme)))
            .collect();

        let mut spans = vec![Span::styled(fit(short_day(key), cols.label), theme.label), Span::raw(" ")];
        spans.extend(StackedBar::new(segments, max, theme).width(cols.bar).to_spans());
        spans.push(Span::raw(" "));
        spans.push(Span::styled(format!("{value:>w$}", w = cols.value), theme.value));
        lines.push(Line::from(spans));
    }
    lines
}

fn share_lines(view: &AggregateView, theme: &Theme, width: u16) -> Vec<Line<'static>> {
    let parts: Vec<(String, f64, Style)> = view
        .rows
        .iter()
        .enumerate()
        .map(|(i, r)| (r.key.clone(), r.value, theme.series_style(i)))
        .collect();
    let bar = ShareBar::new(parts.clone(), theme).width(width);
    let label_width = parts.iter().map(|(l, _, _)| l.width()).max().unwrap_or(0);

    let mut lines = vec![bar.to_line(), Line::from("")];
    for ((label, value, style), (_, share)) in parts.iter().zip(bar.shares()) {
        lines.push(Line::from(vec![
            Span::styled("■ ", *style),
            Span::styled(fit(label, label_width), theme.label),
            Span::styled(format!(" {share:>5.1}%"), theme.value),
            Span::styled(format!("  {}", format_currency(*value)), theme.dim),
        ]));
    }
    lines
}

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Draw `view` as a titled panel filling `area`.
pub fn render_view(frame: &mut Frame, area: Rect, view: &AggregateView, colors: &SeriesColors, theme: &Theme) {
    let inner_width = area.width.saturating_sub(2);
    let lines = view_lines(view, colors, theme, inner_width);
    let paragraph = Paragraph::new(Text::from(lines)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.chart_border)
            .title(Span::styled(format!(" {} ", view.def.title), theme.chart_title)),
    );
    frame.render_widget(paragraph, area);
}

// ── Tests ──────────────────────────────────────────────────────────────────────
