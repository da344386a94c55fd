use crossbeam_channel::Sender;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Mode};
use crate::cleanup_terminal;

fn handle_keys_display_portfolio(keycode: KeyCode, app: &mut App) {
    match keycode {
        KeyCode::Up => {
            app.select_previous();
        }
        KeyCode::Down => {
            app.select_next();
        }
        KeyCode::Char('a') | KeyCode::Char('/') => {
            app.form.reset();
            app.previous_mode = app.mode;
            app.mode = Mode::EditPosition;
        }
        KeyCode::Char('e') => {
            if let Some(id) = app.selected_position_id() {
                if let Some(position) = app.portfolio.get(id) {
                    app.form.load(position);
                }
                app.previous_mode = app.mode;
                app.mode = Mode::EditPosition;
            }
        }
        KeyCode::Char('d') => {
            if let Some(id) = app.selected_position_id() {
                app.portfolio.remove(id);
                app.fix_selection();
            }
        }
        _ => {}
    }
}

fn handle_keys_edit_position(keycode: KeyCode, app: &mut App) {
    match keycode {
        KeyCode::Enter => {
            if app.form.submit(&mut app.portfolio) {
                app.fix_selection();
                app.mode = app.previous_mode;
            }
        }
        KeyCode::Tab => {
            app.form.toggle_focus();
        }
        KeyCode::Up => {
            app.form.previous_option();
        }
        KeyCode::Down => {
            app.form.next_option();
        }
        KeyCode::Char(c) => {
            app.form.add_char(c);
        }
        KeyCode::Backspace => {
            app.form.del_char();
        }
        KeyCode::Esc => {
            app.form.reset();
            app.mode = app.previous_mode;
        }
        _ => {}
    }
}

pub fn handle_key_bindings(
    mode: Mode,
    key_event: KeyEvent,
    app: &mut App,
    request_redraw: &Sender<()>,
) {
    match (mode, key_event.modifiers, key_event.code) {
        (_, KeyModifiers::CONTROL, KeyCode::Char('c')) => {
            cleanup_terminal();
            std::process::exit(0);
        }
        (Mode::Help, modifiers, keycode) => {
            if modifiers.is_empty()
                && matches!(keycode, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q'))
            {
                app.mode = app.previous_mode;
            }
        }
        (mode, KeyModifiers::NONE, KeyCode::Char('q')) if mode != Mode::EditPosition => {
            cleanup_terminal();
            std::process::exit(0);
        }
        (mode, KeyModifiers::NONE, KeyCode::Char('?')) if mode != Mode::EditPosition => {
            app.previous_mode = app.mode;
            app.mode = Mode::Help;
        }
        (Mode::EditPosition, modifiers, keycode) => {
            if modifiers.is_empty() || modifiers == KeyModifiers::SHIFT {
                handle_keys_edit_position(keycode, app);
            }
        }
        (Mode::DisplayPortfolio, KeyModifiers::NONE, keycode) => {
            handle_keys_display_portfolio(keycode, app);
        }
        _ => {}
    }

    let _ = request_redraw.try_send(());
}

#[cfg(test)]
mod tests {
    use crossbeam_channel::unbounded;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::catalog::SEED_COUNT;
    use crate::portfolio::Portfolio;

    fn seeded_app() -> App {
        let portfolio = Portfolio::seeded(&mut StdRng::seed_from_u64(1), SEED_COUNT);
        App::new(portfolio, false)
    }

    fn key(app: &mut App, keycode: KeyCode) {
        let (sender, _receiver) = unbounded();
        handle_key_bindings(
            app.mode,
            KeyEvent::new(keycode, KeyModifiers::NONE),
            app,
            &sender,
        );
    }

    #[test]
    fn add_key_opens_the_form_in_adding_state() {
        let mut app = seeded_app();

        key(&mut app, KeyCode::Char('a'));

        assert_eq!(app.mode, Mode::EditPosition);
        assert!(!app.form.is_editing());
    }

    #[test]
    fn edit_key_loads_the_selected_position() {
        let mut app = seeded_app();

        key(&mut app, KeyCode::Char('e'));

        assert_eq!(app.mode, Mode::EditPosition);
        assert!(app.form.is_editing());
    }

    #[test]
    fn delete_key_removes_the_selected_position() {
        let mut app = seeded_app();
        let before = app.portfolio.positions().len();
        let selected = app.selected_position_id().unwrap();

        key(&mut app, KeyCode::Char('d'));

        assert_eq!(app.portfolio.positions().len(), before - 1);
        assert!(app.portfolio.get(selected).is_none());
        assert!(app.selected_position_id().is_some());
    }

    #[test]
    fn escape_cancels_the_form_without_touching_the_portfolio() {
        let mut app = seeded_app();
        let before = app.portfolio.generation();

        key(&mut app, KeyCode::Char('a'));
        key(&mut app, KeyCode::Down);
        key(&mut app, KeyCode::Esc);

        assert_eq!(app.mode, Mode::DisplayPortfolio);
        assert_eq!(app.portfolio.generation(), before);
    }

    #[test]
    fn submitting_the_form_appends_a_position() {
        let mut app = seeded_app();
        let before = app.portfolio.positions().len();

        key(&mut app, KeyCode::Char('a'));
        key(&mut app, KeyCode::Down);
        key(&mut app, KeyCode::Enter);

        assert_eq!(app.mode, Mode::DisplayPortfolio);
        assert_eq!(app.portfolio.positions().len(), before + 1);
    }
}
