use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::app_state::{Mode, TuiState};
use webmemo_lib::flashcards::ActiveSession;

pub fn draw(f: &mut Frame, area: Rect, state: &TuiState) {
    let is_active = matches!(state.mode, Mode::Review | Mode::Quiz | Mode::ConfirmSave);
    let labels = state.app.labels();

    let (title, lines) = match state.active_session() {
        Some(ActiveSession::Review(session)) => {
            let title = format!(" {} ", session.deck().name);
            let lines = match session.view() {
                Some(view) => {
                    let face_style = if view.answer_shown {
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().add_modifier(Modifier::BOLD)
                    };
                    vec![
                        Line::from(Span::styled(
                            format!("{}/{}", view.position, view.total),
                            Style::default().fg(Color::DarkGray),
                        )),
                        Line::from(""),
                        Line::from(Span::styled(view.face.to_string(), face_style)),
                        Line::from(""),
                        Line::from(Span::styled(
                            view.memo.to_string(),
                            Style::default().fg(Color::Yellow),
                        )),
                        Line::from(Span::styled(
                            labels.status_line(&view.status),
                            Style::default().fg(Color::Cyan),
                        )),
                    ]
                }
                None => vec![Line::from(Span::styled(
                    labels.no_cards,
                    Style::default().fg(Color::DarkGray),
                ))],
            };
            (title, lines)
        }
        Some(ActiveSession::Quiz(quiz)) => {
            let face = quiz.face().unwrap_or_default().to_string();
            let face_style = if quiz.answer_shown() {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };
            let lines = vec![
                Line::from(Span::styled(
                    format!("{}/{}", quiz.card_index() + 1, quiz.len()),
                    Style::default().fg(Color::DarkGray),
                )),
                Line::from(""),
                Line::from(Span::styled(face, face_style)),
            ];
            (" Quiz ".to_string(), lines)
        }
        None => {
            let hint = Style::default().fg(Color::DarkGray);
            let lines = vec![
                Line::from(""),
                Line::from(Span::styled("  Select a test and press Enter to review it.", hint)),
                Line::from(""),
                Line::from(Span::styled("  i: import a CSV deck   t: quick quiz from CSV", hint)),
            ];
            (" Card ".to_string(), lines)
        }
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(if is_active {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        });

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}
