use tui::widgets::TableState;

use crate::portfolio::Portfolio;
use crate::widget;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mode {
    DisplayPortfolio,
    EditPosition,
    Help,
}

pub struct App {
    pub mode: Mode,
    pub previous_mode: Mode,
    pub portfolio: Portfolio,
    pub form: widget::FormState,
    pub table_state: TableState,
    pub help: widget::HelpWidget,
    pub hide_help: bool,
}

impl App {
    pub fn new(portfolio: Portfolio, hide_help: bool) -> App {
        let mut table_state = TableState::default();

        if !portfolio.positions().is_empty() {
            table_state.select(Some(0));
        }

        App {
            mode: Mode::DisplayPortfolio,
            previous_mode: Mode::DisplayPortfolio,
            portfolio,
            form: widget::FormState::new(),
            table_state,
            help: widget::HelpWidget {},
            hide_help,
        }
    }

    pub fn selected_position_id(&self) -> Option<u64> {
        self.table_state
            .selected()
            .and_then(|idx| self.portfolio.positions().get(idx))
            .map(|position| position.id())
    }

    pub fn select_next(&mut self) {
        let len = self.portfolio.positions().len();
        if len == 0 {
            return;
        }

        let selected = self.table_state.selected().map_or(0, |idx| (idx + 1) % len);
        self.table_state.select(Some(selected));
    }

    pub fn select_previous(&mut self) {
        let len = self.portfolio.positions().len();
        if len == 0 {
            return;
        }

        let selected = self
            .table_state
            .selected()
            .map_or(len - 1, |idx| (idx + len - 1) % len);
        self.table_state.select(Some(selected));
    }

    /// Clamp the table selection after a mutation shrank or emptied the list.
    pub fn fix_selection(&mut self) {
        let len = self.portfolio.positions().len();

        if len == 0 {
            self.table_state.select(None);
        } else {
            let selected = self.table_state.selected().unwrap_or(0);
            self.table_state.select(Some(selected.min(len - 1)));
        }
    }
}
