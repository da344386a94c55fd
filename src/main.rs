use std::io;
use std::panic;
use std::time::Duration;

use crossbeam_channel::{bounded, select, tick, unbounded, Receiver, Sender};
use crossterm::cursor;
use crossterm::event::Event;
use crossterm::execute;
use crossterm::terminal;
use lazy_static::lazy_static;
use rand::thread_rng;
use tracing::{debug, info};
use tui::backend::CrosstermBackend;
use tui::Terminal;

mod app;
mod catalog;
mod draw;
mod event;
mod logging;
mod metrics;
mod opts;
mod portfolio;
mod service;
mod task;
mod theme;
mod widget;

use crate::opts::Opts;
use crate::portfolio::Portfolio;
use crate::service::Service;
use crate::theme::Theme;

lazy_static! {
    pub static ref OPTS: Opts = opts::resolve_opts();
    pub static ref UPDATE_INTERVAL: u64 = OPTS.update_interval.unwrap_or(10);
    pub static ref THEME: Theme = OPTS.theme.unwrap_or_default();
    pub static ref CLIENT: api::Client = match OPTS.token.clone() {
        Some(token) => api::Client::with_token(token),
        None => api::Client::new(),
    };
    pub static ref DATA_RECEIVED: (Sender<()>, Receiver<()>) = bounded(1);
    pub static ref REDRAW_REQUEST: (Sender<()>, Receiver<()>) = bounded(1);
}

fn main() {
    better_panic::install();

    let opts = &*OPTS;

    if let Err(e) = logging::setup() {
        eprintln!("Failed to initialize logging: {:#}", e);
    }

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend).unwrap();

    setup_panic_hook();
    setup_terminal();

    let ticker = tick(Duration::from_secs(1));
    let ui_events = setup_ui_events();
    let ctrl_c_events = setup_ctrl_c();

    let data_received = DATA_RECEIVED.1.clone();
    let redraw_requested = REDRAW_REQUEST.1.clone();

    let starting_portfolio = if opts.no_seed {
        Portfolio::new()
    } else {
        Portfolio::seeded(&mut thread_rng(), catalog::SEED_COUNT)
    };

    info!(
        "starting with {} positions, refreshing every {}s",
        starting_portfolio.positions().len(),
        *UPDATE_INTERVAL
    );

    let mut app = app::App::new(starting_portfolio, opts.hide_help);

    let mut quotes = service::quotes::QuoteService::new();
    quotes.refresh(&app.portfolio);
    let mut refreshed_generation = app.portfolio.generation();

    draw::draw(&mut terminal, &mut app);

    loop {
        select! {
            recv(ctrl_c_events) -> _ => {
                break;
            }
            recv(ticker) -> _ => {
                draw::draw(&mut terminal, &mut app);
            }
            recv(data_received) -> _ => {
                for update in quotes.updates() {
                    if !app.portfolio.apply_quotes(update.generation, &update.prices) {
                        debug!(
                            "discarded refresh cycle for generation {} (current {})",
                            update.generation,
                            app.portfolio.generation()
                        );
                    }
                }

                draw::draw(&mut terminal, &mut app);
            }
            recv(redraw_requested) -> _ => {
                draw::draw(&mut terminal, &mut app);
            }
            recv(ui_events) -> message => {
                if let Ok(Event::Key(key_event)) = message {
                    event::handle_key_bindings(app.mode, key_event, &mut app, &REDRAW_REQUEST.0);
                }

                // A mutation invalidates the dispatched snapshot, start a
                // fresh refresh cycle
                if app.portfolio.generation() != refreshed_generation {
                    quotes.refresh(&app.portfolio);
                    refreshed_generation = app.portfolio.generation();
                }

                draw::draw(&mut terminal, &mut app);
            }
        }
    }

    cleanup_terminal();
}

fn setup_terminal() {
    let mut stdout = io::stdout();

    execute!(stdout, terminal::EnterAlternateScreen).unwrap();
    execute!(stdout, cursor::Hide).unwrap();

    execute!(stdout, terminal::Clear(terminal::ClearType::All)).unwrap();

    terminal::enable_raw_mode().unwrap();
}

pub fn cleanup_terminal() {
    let mut stdout = io::stdout();

    execute!(stdout, cursor::MoveTo(0, 0)).unwrap();
    execute!(stdout, terminal::Clear(terminal::ClearType::All)).unwrap();

    execute!(stdout, terminal::LeaveAlternateScreen).unwrap();
    execute!(stdout, cursor::Show).unwrap();

    terminal::disable_raw_mode().unwrap();
}

fn setup_ui_events() -> Receiver<Event> {
    let (sender, receiver) = unbounded();
    std::thread::spawn(move || loop {
        sender.send(crossterm::event::read().unwrap()).unwrap();
    });

    receiver
}

fn setup_ctrl_c() -> Receiver<()> {
    let (sender, receiver) = unbounded();
    ctrlc::set_handler(move || {
        sender.send(()).unwrap();
    })
    .unwrap();

    receiver
}

fn setup_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        cleanup_terminal();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));
}
