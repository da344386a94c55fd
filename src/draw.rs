use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use tui::style::Modifier;
use tui::text::{Span, Spans};
use tui::widgets::Paragraph;
use tui::{Frame, Terminal};

use crate::app::{App, Mode};
use crate::theme;
use crate::widget::{
    self, FormWidget, MetricsWidget, PositionsWidget, ValueChartWidget, HELP_HEIGHT, HELP_WIDTH,
};
use crate::THEME;

pub fn draw<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) {
    if app.mode == Mode::Help {
        draw_help(terminal, app);
        return;
    }

    terminal
        .draw(|frame| {
            // chunks[0] - Header
            // chunks[1] - Positions table | metrics + chart
            // chunks[2] - (Optional) Form
            let chunks = match app.mode {
                Mode::EditPosition => Layout::default()
                    .constraints(
                        [
                            Constraint::Length(3),
                            Constraint::Min(0),
                            Constraint::Length(5),
                        ]
                        .as_ref(),
                    )
                    .split(frame.size()),
                _ => Layout::default()
                    .constraints([Constraint::Length(3), Constraint::Min(0)].as_ref())
                    .split(frame.size()),
            };

            draw_header(frame, app, chunks[0]);

            // body[0] - Positions table
            // body[1] - Metrics + chart
            let body = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(55), Constraint::Percentage(45)].as_ref())
                .split(chunks[1]);

            frame.render_stateful_widget(
                PositionsWidget {
                    positions: app.portfolio.positions(),
                },
                body[0],
                &mut app.table_state,
            );

            // side[0] - Metrics
            // side[1] - Chart
            let metrics_height = app.portfolio.metrics().distribution.len() as u16 + 6;

            let side = Layout::default()
                .constraints([Constraint::Length(metrics_height), Constraint::Min(0)].as_ref())
                .split(body[1]);

            frame.render_widget(
                MetricsWidget {
                    total_value: app.portfolio.total_value(),
                    metrics: app.portfolio.metrics(),
                },
                side[0],
            );

            frame.render_widget(
                ValueChartWidget {
                    positions: app.portfolio.positions(),
                },
                side[1],
            );

            if app.mode == Mode::EditPosition {
                frame.render_stateful_widget(FormWidget {}, chunks[2], &mut app.form);
            }
        })
        .unwrap();
}

fn draw_header<B: Backend>(frame: &mut Frame<B>, app: &App, mut area: Rect) {
    frame.render_widget(widget::block::new(" folio "), area);

    area = add_padding(area, 1, PaddingDirection::Top);
    area = add_padding(area, 1, PaddingDirection::Left);
    area = add_padding(area, 2, PaddingDirection::Right);

    // header[0] - Total value
    // header[1] - (Optional) help hint
    let header = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(10)].as_ref())
        .split(area);

    frame.render_widget(
        Paragraph::new(Spans::from(vec![
            Span::styled("Portfolio value: ", theme::style().fg(THEME.text_normal())),
            Span::styled(
                format!("${:.2}", app.portfolio.total_value()),
                theme::style()
                    .add_modifier(Modifier::BOLD)
                    .fg(THEME.text_primary()),
            ),
        ]))
        .style(theme::style())
        .alignment(Alignment::Left),
        header[0],
    );

    if !app.hide_help {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Help '?'",
                theme::style().fg(THEME.text_normal()),
            ))
            .style(theme::style())
            .alignment(Alignment::Right),
            header[1],
        );
    }
}

fn draw_help<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) {
    terminal
        .draw(|frame| {
            let mut rect = frame.size();

            if rect.width < HELP_WIDTH || rect.height < HELP_HEIGHT {
                frame.render_widget(
                    Paragraph::new("Increase screen size to display help"),
                    rect,
                );
            } else {
                rect = app.help.get_rect(frame.size());

                frame.render_widget(app.help, rect);
            }
        })
        .unwrap();
}

pub fn add_padding(mut rect: Rect, n: u16, direction: PaddingDirection) -> Rect {
    match direction {
        PaddingDirection::Top => {
            rect.y += n;
            rect.height -= n;
            rect
        }
        PaddingDirection::Bottom => {
            rect.height -= n;
            rect
        }
        PaddingDirection::Left => {
            rect.x += n;
            rect.width -= n;
            rect
        }
        PaddingDirection::Right => {
            rect.width -= n;
            rect
        }
    }
}

#[allow(dead_code)]
pub enum PaddingDirection {
    Top,
    Bottom,
    Left,
    Right,
}
