use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use super::app_state::{Mode, TuiState};
use webmemo_lib::flashcards::{QuizAction, ReviewAction};

pub fn handle_key(state: &mut TuiState, key: KeyEvent) {
    // Clear flash message on any keypress
    state.flash_message = None;

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.quit = true;
        return;
    }

    match state.mode {
        Mode::Decks => handle_deck_key(state, key),
        Mode::Review => handle_review_key(state, key),
        Mode::Quiz => handle_quiz_key(state, key),
        Mode::ConfirmSave => {
            if let Some(answer) = yes_no(key) {
                state.answer_save(answer);
            }
        }
        Mode::ConfirmDelete => {
            if let Some(answer) = yes_no(key) {
                state.answer_delete(answer);
            }
        }
        Mode::ImportName | Mode::ImportPath | Mode::QuizPath => handle_input_key(state, key),
    }
}

fn handle_deck_key(state: &mut TuiState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => state.quit = true,
        KeyCode::Char('j') | KeyCode::Down => state.move_down(),
        KeyCode::Char('k') | KeyCode::Up => state.move_up(),
        KeyCode::Char('g') | KeyCode::Home => state.go_top(),
        KeyCode::Char('G') | KeyCode::End => state.go_bottom(),
        KeyCode::Enter | KeyCode::Char('l') => state.review_selected(),
        KeyCode::Char('d') => state.request_delete(),
        KeyCode::Char('i') => state.begin_input(Mode::ImportName),
        KeyCode::Char('t') => state.begin_input(Mode::QuizPath),
        _ => {}
    }
}

/// Every key does something in review; unbound ones flip the answer
fn handle_review_key(state: &mut TuiState, key: KeyEvent) {
    let action = match key.code {
        KeyCode::Char(c) => ReviewAction::from_key(c),
        _ => ReviewAction::RevealToggle,
    };
    state.review_action(action);
}

fn handle_quiz_key(state: &mut TuiState, key: KeyEvent) {
    if let KeyCode::Char(c) = key.code {
        if let Some(action) = QuizAction::from_key(c) {
            state.quiz_action(action);
        }
    }
}

fn yes_no(key: KeyEvent) -> Option<bool> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => Some(true),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(false),
        _ => None,
    }
}

fn handle_input_key(state: &mut TuiState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => state.cancel_input(),
        KeyCode::Enter => state.submit_input(),
        KeyCode::Backspace => {
            state.input_text.pop();
        }
        KeyCode::Char(c) => {
            state.input_text.push(c);
        }
        _ => {}
    }
}

pub fn handle_mouse(state: &mut TuiState, mouse: MouseEvent) {
    if state.mode != Mode::Decks {
        return;
    }

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let Some(area) = state.list_area else {
                return;
            };
            let (col, row) = (mouse.column, mouse.row);
            if col < area.x || col >= area.x + area.width || row < area.y || row >= area.y + area.height {
                return;
            }

            // Account for the border
            let clicked = state.list_offset + row.saturating_sub(area.y + 1) as usize;
            if clicked < state.rows.len() {
                if state.selected == clicked {
                    // Click same item again: start review
                    state.review_selected();
                } else {
                    state.selected = clicked;
                }
            }
        }
        MouseEventKind::ScrollDown => state.move_down(),
        MouseEventKind::ScrollUp => state.move_up(),
        _ => {}
    }
}
