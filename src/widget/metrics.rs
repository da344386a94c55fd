use itertools::Itertools;
use tui::buffer::Buffer;
use tui::layout::{Alignment, Rect};
use tui::style::Modifier;
use tui::text::{Span, Spans};
use tui::widgets::{Paragraph, Widget};

use super::block;
use crate::metrics::Metrics;
use crate::theme;
use crate::THEME;

/// Summary panel: total value, top performer, percentage allocation per
/// display name (largest share first).
pub struct MetricsWidget<'a> {
    pub total_value: f64,
    pub metrics: &'a Metrics,
}

impl<'a> Widget for MetricsWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut lines = vec![Spans::from(vec![
            Span::styled("Total value: ", theme::style().fg(THEME.text_normal())),
            Span::styled(
                format!("${:.2}", self.total_value),
                theme::style()
                    .add_modifier(Modifier::BOLD)
                    .fg(THEME.text_primary()),
            ),
        ])];

        match self.metrics.top.as_ref() {
            Some(top) => lines.push(Spans::from(vec![
                Span::styled("Top performer: ", theme::style().fg(THEME.text_normal())),
                Span::styled(
                    format!("{} ({}) @ {:.2}", top.name, top.symbol, top.price),
                    theme::style().fg(THEME.profit()),
                ),
            ])),
            None => lines.push(Spans::from(Span::styled(
                "Top performer: -",
                theme::style().fg(THEME.text_normal()),
            ))),
        }

        lines.push(Spans::default());
        lines.push(Spans::from(Span::styled(
            "Allocation",
            theme::style()
                .add_modifier(Modifier::BOLD)
                .fg(THEME.text_secondary()),
        )));

        let allocations = self
            .metrics
            .distribution
            .iter()
            .sorted_by(|a, b| b.1.partial_cmp(a.1).unwrap_or(std::cmp::Ordering::Equal));

        for (name, share) in allocations {
            lines.push(Spans::from(vec![
                Span::styled(format!("{:<12}", name), theme::style().fg(THEME.text_normal())),
                Span::styled(
                    format!("{:>6.1}%", share),
                    theme::style().fg(THEME.text_secondary()),
                ),
            ]));
        }

        Paragraph::new(lines)
            .block(block::new(" Metrics "))
            .style(theme::style())
            .alignment(Alignment::Left)
            .render(area, buf);
    }
}
