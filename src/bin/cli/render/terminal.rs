use webmemo_lib::flashcards::{Card, Deck};
use webmemo_lib::Labels;

/// ANSI color codes
#[allow(dead_code)]
pub struct Color;

#[allow(dead_code)]
impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

const BRANCH: &str = "\u{251c}\u{2500}\u{2500} ";
const LAST_BRANCH: &str = "\u{2514}\u{2500}\u{2500} ";
const PIPE: &str = "\u{2502}   ";
const SPACE: &str = "    ";

/// Draw the deck forest with box-drawing connectors, one line per deck
pub fn render_forest(decks: &[Deck], use_color: bool) -> Vec<String> {
    let mut lines = Vec::new();
    for deck in decks {
        lines.push(deck_label(deck, use_color, true));
        render_children(&deck.children, "", use_color, &mut lines);
    }
    lines
}

fn render_children(children: &[Deck], prefix: &str, use_color: bool, lines: &mut Vec<String>) {
    for (i, child) in children.iter().enumerate() {
        let is_last = i + 1 == children.len();
        let connector = if is_last { LAST_BRANCH } else { BRANCH };
        lines.push(format!("{}{}{}", prefix, connector, deck_label(child, use_color, false)));

        let child_prefix = format!("{}{}", prefix, if is_last { SPACE } else { PIPE });
        render_children(&child.children, &child_prefix, use_color, lines);
    }
}

fn deck_label(deck: &Deck, use_color: bool, is_root: bool) -> String {
    let count = format!("({} cards)", deck.cards.len());
    if use_color {
        let name_style = if is_root { Color::BOLD } else { Color::CYAN };
        format!(
            "{}{}{} {}{}{} {}[{}]{}",
            name_style, deck.name, Color::RESET,
            Color::DIM, count, Color::RESET,
            Color::GRAY, deck.id, Color::RESET,
        )
    } else {
        format!("{} {} [{}]", deck.name, count, deck.id)
    }
}

/// Render one card as question, answer, memo and flag lines
pub fn render_card(index: usize, card: &Card, labels: &Labels, use_color: bool) -> Vec<String> {
    let mut lines = Vec::new();
    if use_color {
        lines.push(format!("{}{}. {}{}", Color::BOLD, index + 1, card.question, Color::RESET));
        lines.push(format!("   {}{}{}", Color::GREEN, card.answer, Color::RESET));
    } else {
        lines.push(format!("{}. {}", index + 1, card.question));
        lines.push(format!("   {}", card.answer));
    }
    if !card.memo.is_empty() {
        lines.push(format!("   {}", card.memo));
    }
    let status = labels.status_line(&card.status);
    if use_color {
        lines.push(format!("   {}{}{}", Color::DIM, status, Color::RESET));
    } else {
        lines.push(format!("   {}", status));
    }
    lines
}
