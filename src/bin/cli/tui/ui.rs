use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;

use super::app_state::TuiState;
use super::{card_widget, deck_list, status_bar};

pub fn draw(f: &mut Frame, state: &mut TuiState) {
    let size = f.area();

    // Main layout: panels + status bar
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(size);

    // Horizontal split: decks (35%) | card (65%)
    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(outer[0]);

    // Save area for mouse hit-testing
    state.list_area = Some(panels[0]);

    deck_list::draw(f, panels[0], state);
    card_widget::draw(f, panels[1], state);
    status_bar::draw(f, outer[1], state);
}
