use tui::buffer::Buffer;
use tui::layout::{Alignment, Rect};
use tui::style::{Color, Modifier};
use tui::text::{Span, Spans};
use tui::widgets::{Paragraph, StatefulWidget, Widget, Wrap};

use super::block;
use crate::catalog::{self, CATALOG};
use crate::portfolio::{Portfolio, Position};
use crate::theme;
use crate::THEME;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Field {
    Instrument,
    Quantity,
}

/// Working values of the add/edit form.
///
/// `id` is the state machine: `None` means adding, `Some` means editing the
/// position it names. A failed submission leaves every working value in
/// place and raises `error_msg` instead.
pub struct FormState {
    id: Option<u64>,
    selection: Option<usize>,
    quantity: String,
    focus: Field,
    error_msg: Option<String>,
}

impl FormState {
    pub fn new() -> FormState {
        FormState {
            id: None,
            selection: None,
            quantity: String::from("1"),
            focus: Field::Instrument,
            error_msg: None,
        }
    }

    /// Load an existing position, switching the form to edit state.
    pub fn load(&mut self, position: &Position) {
        self.id = Some(position.id());
        self.selection = CATALOG
            .iter()
            .position(|instrument| instrument.name == position.name());
        self.quantity = position.quantity().to_string();
        self.focus = Field::Instrument;
        self.error_msg = None;
    }

    pub fn is_editing(&self) -> bool {
        self.id.is_some()
    }

    pub fn reset(&mut self) {
        *self = FormState::new();
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Field::Instrument => Field::Quantity,
            Field::Quantity => Field::Instrument,
        };
    }

    pub fn next_option(&mut self) {
        if self.focus != Field::Instrument {
            return;
        }

        self.selection = Some(self.selection.map_or(0, |idx| (idx + 1) % CATALOG.len()));
    }

    pub fn previous_option(&mut self) {
        if self.focus != Field::Instrument {
            return;
        }

        self.selection = Some(
            self.selection
                .map_or(CATALOG.len() - 1, |idx| (idx + CATALOG.len() - 1) % CATALOG.len()),
        );
    }

    pub fn add_char(&mut self, c: char) {
        if self.focus == Field::Quantity && c.is_ascii_digit() && self.quantity.len() < 9 {
            self.quantity.push(c);
        }
    }

    pub fn del_char(&mut self) {
        if self.focus == Field::Quantity {
            self.quantity.pop();
        }
    }

    fn selected_name(&self) -> Option<&'static str> {
        self.selection
            .and_then(|idx| CATALOG.get(idx))
            .map(|instrument| instrument.name)
    }

    /// Apply the form to the store. Returns true when the submission was
    /// accepted and the form has been reset for the next add.
    pub fn submit(&mut self, portfolio: &mut Portfolio) -> bool {
        // The catalog lookup is the validation: the symbol always comes from
        // the catalog entry for the selected name, never from the form
        let instrument = match self.selected_name().and_then(catalog::find_by_name) {
            Some(instrument) => instrument,
            None => {
                self.error_msg = Some(String::from("Select an instrument first"));
                return false;
            }
        };

        let quantity = match self.quantity.parse::<u32>() {
            Ok(quantity) if quantity > 0 => quantity,
            _ => {
                self.error_msg = Some(String::from("Quantity must be a positive number"));
                return false;
            }
        };

        match self.id {
            Some(id) => {
                if !portfolio.update(id, instrument, quantity) {
                    self.error_msg = Some(String::from("Position no longer exists"));
                    return false;
                }
            }
            None => {
                portfolio.add(instrument, quantity);
            }
        }

        self.reset();

        true
    }

    fn field_color(&self, field: Field) -> Color {
        if self.focus == field {
            THEME.highlight_focused()
        } else {
            THEME.highlight_unfocused()
        }
    }
}

pub struct FormWidget {}

impl StatefulWidget for FormWidget {
    type State = FormState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let title = if state.is_editing() {
            " Update Position "
        } else {
            " Add Position "
        };

        let instrument_label = state
            .selection
            .and_then(|idx| CATALOG.get(idx))
            .map_or(String::from("<none>"), |instrument| {
                format!("{} ({})", instrument.name, instrument.symbol)
            });

        let mut lines = vec![
            Spans::from(vec![
                Span::styled("Instrument: ", theme::style().fg(THEME.text_normal())),
                Span::styled(
                    instrument_label,
                    theme::style()
                        .add_modifier(Modifier::BOLD)
                        .fg(state.field_color(Field::Instrument)),
                ),
            ]),
            Spans::from(vec![
                Span::styled("Quantity:   ", theme::style().fg(THEME.text_normal())),
                Span::styled(
                    state.quantity.as_str(),
                    theme::style()
                        .add_modifier(Modifier::BOLD)
                        .fg(state.field_color(Field::Quantity)),
                ),
            ]),
        ];

        match state.error_msg.as_ref() {
            Some(msg) => lines.push(Spans::from(Span::styled(
                msg.as_str(),
                theme::style().add_modifier(Modifier::BOLD).fg(THEME.loss()),
            ))),
            None => lines.push(Spans::from(Span::styled(
                "<Up/Down> select  <Tab> switch field  <Enter> submit  <Esc> cancel",
                theme::style().fg(THEME.gray()),
            ))),
        }

        Paragraph::new(lines)
            .block(block::new(title))
            .style(theme::style())
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
