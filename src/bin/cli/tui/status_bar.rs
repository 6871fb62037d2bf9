use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use super::app_state::{Mode, TuiState};

pub fn draw(f: &mut Frame, area: Rect, state: &TuiState) {
    // Show flash message if present
    if let Some(ref msg) = state.flash_message {
        let flash = Paragraph::new(format!(" {}", msg))
            .style(Style::default().bg(Color::Green).fg(Color::Black));
        f.render_widget(flash, area);
        return;
    }

    let labels = state.app.labels();
    let (text, style) = match state.mode {
        Mode::ConfirmSave => (
            format!(" {} (y/n) ", labels.save_prompt),
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        Mode::ConfirmDelete => {
            let name = state.pending_delete.as_ref().map(|r| r.label.as_str()).unwrap_or("");
            (
                format!(" {} \"{}\" (y/n) ", labels.delete_prompt, name),
                Style::default().bg(Color::Red).fg(Color::White),
            )
        }
        Mode::ImportName => (
            format!(" Test name: {}\u{2588}", state.input_text),
            Style::default().bg(Color::Blue).fg(Color::White),
        ),
        Mode::ImportPath => (
            format!(" CSV for \"{}\": {}\u{2588}", state.pending_name, state.input_text),
            Style::default().bg(Color::Blue).fg(Color::White),
        ),
        Mode::QuizPath => (
            format!(" Quiz CSV: {}\u{2588}", state.input_text),
            Style::default().bg(Color::Magenta).fg(Color::White),
        ),
        Mode::Decks => (
            " j/k: move  Enter: review  i: import  t: quiz  d: delete  q: quit ".to_string(),
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        Mode::Review => (
            " j/k: back/next  o: learned  n: hide  a: review  s: restart  q: finish  e: abandon  other: flip "
                .to_string(),
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        Mode::Quiz => (
            " j: back  k: next  q: quit ".to_string(),
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
    };

    f.render_widget(Paragraph::new(text).style(style), area);
}
