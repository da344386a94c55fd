use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::symbols::Marker;
use tui::text::Span;
use tui::widgets::{Axis, Chart, Dataset, GraphType, Widget};

use super::block;
use crate::portfolio::Position;
use crate::theme;
use crate::THEME;

/// Line chart of market values, one point per position in list order.
pub struct ValueChartWidget<'a> {
    pub positions: &'a [Position],
}

fn cast_as_dataset(input: (usize, f64)) -> (f64, f64) {
    ((input.0 + 1) as f64, input.1)
}

impl<'a> Widget for ValueChartWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let values: Vec<(f64, f64)> = self
            .positions
            .iter()
            .map(Position::market_value)
            .enumerate()
            .map(cast_as_dataset)
            .collect();

        // Need more than one point for GraphType::Line to work
        let graph_type = if values.len() <= 2 {
            GraphType::Scatter
        } else {
            GraphType::Line
        };

        let max = values.iter().map(|(_, value)| *value).fold(0.0, f64::max);
        let y_max = if max <= 0.0 { 1.0 } else { max * 1.1 };

        let x_labels: Vec<Span> = self
            .positions
            .iter()
            .map(|position| {
                Span::styled(
                    position.name().to_string(),
                    theme::style().fg(THEME.text_secondary()),
                )
            })
            .collect();

        let y_labels: Vec<Span> = [0.0, y_max / 2.0, y_max]
            .iter()
            .map(|value| {
                Span::styled(format!("{:>8.2}", value), theme::style().fg(THEME.text_secondary()))
            })
            .collect();

        let datasets = vec![Dataset::default()
            .marker(Marker::Braille)
            .style(theme::style().fg(THEME.profit()))
            .graph_type(graph_type)
            .data(&values)];

        Chart::new(datasets)
            .block(block::new(" Market Value "))
            .style(theme::style())
            .x_axis(
                Axis::default()
                    .bounds([0.0, values.len() as f64 + 1.0])
                    .labels(x_labels)
                    .style(theme::style().fg(THEME.border_axis())),
            )
            .y_axis(
                Axis::default()
                    .bounds([0.0, y_max])
                    .labels(y_labels)
                    .style(theme::style().fg(THEME.border_axis())),
            )
            .render(area, buf);
    }
}
