use crate::themes::Theme;
use dashboard_core::formatting::{format_currency, format_number};
use ratatui::text::{Line, Span};

/// Dashboard title.
pub const TITLE: &str = "Supermarket Sales Dashboard";

/// Dataset attribution shown under the charts.
pub const CAPTION: &str = "Dados de exemplo: Supermarket Sales (© 2021 Kaggle)";

/// Dashboard header rendering four lines:
///
/// 1. Title.
/// 2. A 60-column `=` separator.
/// 3. Month selector with the selected month highlighted.
/// 4. Row count and revenue of the selected month.
pub struct Header<'a> {
    pub months: &'a [String],
    pub selected: Option<&'a str>,
    pub rows: usize,
    pub revenue: f64,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(
        months: &'a [String],
        selected: Option<&'a str>,
        rows: usize,
        revenue: f64,
        theme: &'a Theme,
    ) -> Self {
        Self {
            months,
            selected,
            rows,
            revenue,
            theme,
        }
    }

    /// Number of lines [`Header::to_lines`] produces.
    pub const HEIGHT: u16 = 4;

    pub fn to_lines(&self) -> Vec<Line<'a>> {
        vec![
            Line::from(Span::styled(TITLE, self.theme.header)),
            Line::from(Span::styled("=".repeat(60), self.theme.separator)),
            self.month_line(),
            self.summary_line(),
        ]
    }

    fn month_line(&self) -> Line<'a> {
        let mut spans = vec![Span::styled("Mês ", self.theme.label)];
        if self.months.is_empty() {
            spans.push(Span::styled("(nenhum)", self.theme.dim));
            return Line::from(spans);
        }

        spans.push(Span::styled("◀ ", self.theme.dim));
        for (i, month) in self.months.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            let style = if Some(month.as_str()) == self.selected {
                self.theme.month_selected
            } else {
                self.theme.month_other
            };
            spans.push(Span::styled(format!(" {month} "), style));
        }
        spans.push(Span::styled(" ▶", self.theme.dim));
        Line::from(spans)
    }

    fn summary_line(&self) -> Line<'a> {
        Line::from(vec![
            Span::styled("[ ", self.theme.label),
            Span::styled(
                format!("{} vendas", format_number(self.rows as f64, 0)),
                self.theme.value,
            ),
            Span::styled(" | ", self.theme.label),
            Span::styled(format_currency(self.revenue), self.theme.value),
            Span::styled(" ]", self.theme.label),
        ])
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
