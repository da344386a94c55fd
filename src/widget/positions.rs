use tui::buffer::Buffer;
use tui::layout::{Constraint, Rect};
use tui::style::Modifier;
use tui::widgets::{Cell, Row, StatefulWidget, Table, TableState};

use super::block;
use crate::portfolio::Position;
use crate::theme;
use crate::THEME;

/// One row per position: name, symbol, quantity, price (or a loading
/// indicator until the first fetch lands) and market value.
pub struct PositionsWidget<'a> {
    pub positions: &'a [Position],
}

impl<'a> StatefulWidget for PositionsWidget<'a> {
    type State = TableState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let header = Row::new(vec!["Name", "Symbol", "Qty", "Price", "Value"])
            .style(
                theme::style()
                    .fg(THEME.text_secondary())
                    .add_modifier(Modifier::BOLD),
            )
            .bottom_margin(1);

        let rows = self.positions.iter().map(|position| {
            let price = match position.current_price() {
                Some(price) => {
                    Cell::from(format!("{:.2}", price)).style(theme::style().fg(THEME.text_primary()))
                }
                None => Cell::from("...").style(theme::style().fg(THEME.gray())),
            };

            Row::new(vec![
                Cell::from(position.name().to_string()),
                Cell::from(position.symbol().to_string()),
                Cell::from(position.quantity().to_string()),
                price,
                Cell::from(format!("{:.2}", position.market_value())),
            ])
        });

        let widths = [
            Constraint::Percentage(28),
            Constraint::Percentage(16),
            Constraint::Percentage(12),
            Constraint::Percentage(22),
            Constraint::Percentage(22),
        ];

        let table = Table::new(rows)
            .header(header)
            .block(block::new(" Positions  <e> edit  <d> delete "))
            .style(theme::style().fg(THEME.text_normal()))
            .highlight_style(
                theme::style()
                    .add_modifier(Modifier::BOLD)
                    .fg(THEME.highlight_focused()),
            )
            .highlight_symbol("> ")
            .widths(&widths);

        StatefulWidget::render(table, area, buf, state);
    }
}
