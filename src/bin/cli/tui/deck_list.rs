use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

use super::app_state::{Mode, TuiState};

pub fn draw(f: &mut Frame, area: Rect, state: &mut TuiState) {
    let is_active = state.mode == Mode::Decks;

    let block = Block::default()
        .title(" Tests ")
        .borders(Borders::ALL)
        .border_style(if is_active {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        });

    let items: Vec<ListItem> = state
        .rows
        .iter()
        .map(|row| {
            let indent = "  ".repeat(row.depth);
            let (prefix, style) = if row.depth == 0 {
                ("\u{25b8} ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            } else {
                ("\u{2022} ", Style::default().fg(Color::White))
            };

            let line = Line::from(vec![
                Span::styled(format!("{}{}{}", indent, prefix, row.label), style),
                Span::styled(format!(" ({})", row.card_count), Style::default().fg(Color::DarkGray)),
            ]);
            ListItem::new(line)
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(if is_active { Color::DarkGray } else { Color::Black })
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut list_state = ListState::default().with_offset(state.list_offset);
    if !state.rows.is_empty() {
        list_state.select(Some(state.selected));
    }

    f.render_stateful_widget(list, area, &mut list_state);
    state.list_offset = list_state.offset();
}
