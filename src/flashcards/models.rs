//! Data models for decks, cards and result snapshots
//!
//! Field names on the wire are kept short (`q`, `a`, `m`) so the stored
//! blob stays readable by the browser build of the tool.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Suffix appended to a deck name when a review result is saved under it
pub const RESULT_SUFFIX: &str = " 結果";

/// Per-card study flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardStatus {
    #[serde(default)]
    pub learned: bool,
    #[serde(default)]
    pub hide: bool,
    #[serde(default)]
    pub review: bool,
}

impl CardStatus {
    pub fn get(&self, flag: StatusFlag) -> bool {
        match flag {
            StatusFlag::Learned => self.learned,
            StatusFlag::Hide => self.hide,
            StatusFlag::Review => self.review,
        }
    }

    /// Flip one flag, returning its new value
    pub fn toggle(&mut self, flag: StatusFlag) -> bool {
        let slot = match flag {
            StatusFlag::Learned => &mut self.learned,
            StatusFlag::Hide => &mut self.hide,
            StatusFlag::Review => &mut self.review,
        };
        *slot = !*slot;
        *slot
    }
}

/// Names one of the three [`CardStatus`] flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusFlag {
    Learned,
    Hide,
    Review,
}

impl StatusFlag {
    pub const ALL: [StatusFlag; 3] = [StatusFlag::Learned, StatusFlag::Hide, StatusFlag::Review];
}

/// A question/answer card with an optional memo line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    #[serde(rename = "q", default)]
    pub question: String,
    #[serde(rename = "a", default)]
    pub answer: String,
    #[serde(rename = "m", default)]
    pub memo: String,
    #[serde(default)]
    pub status: CardStatus,
}

impl Card {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            ..Default::default()
        }
    }
}

/// A named test. Root decks are imported from CSV; children are saved
/// review results, which may themselves be reviewed and gain children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub cards: Vec<Card>,
    #[serde(default)]
    pub children: Vec<Deck>,
}

impl Deck {
    pub fn new(name: String, cards: Vec<Card>) -> Self {
        Self {
            id: gen_id(),
            name,
            cards,
            children: Vec::new(),
        }
    }

    /// Freeze an edited copy of this deck as a result snapshot
    pub fn to_result(&self) -> Deck {
        let mut result = self.clone();
        result.id = gen_id();
        result.name = format!("{}{}", self.name, RESULT_SUFFIX);
        result
    }

    /// Number of decks in this subtree, including self
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Deck::subtree_len).sum::<usize>()
    }
}

/// A bare question/answer pair used by quiz mode
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizCard {
    pub question: String,
    pub answer: String,
}

/// Generate a deck id, unique with overwhelming probability
pub fn gen_id() -> String {
    format!("t{}", Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_flips_only_named_flag() {
        let mut status = CardStatus::default();
        assert!(status.toggle(StatusFlag::Hide));
        assert_eq!(status, CardStatus { learned: false, hide: true, review: false });
        assert!(!status.toggle(StatusFlag::Hide));
        assert_eq!(status, CardStatus::default());
    }

    #[test]
    fn test_to_result_renames_and_reissues_id() {
        let deck = Deck::new("Math".to_string(), vec![Card::new("1+1", "2")]);
        let result = deck.to_result();

        assert_eq!(result.name, "Math 結果");
        assert_ne!(result.id, deck.id);
        assert_eq!(result.cards, deck.cards);
    }

    #[test]
    fn test_gen_id_is_unique() {
        let a = gen_id();
        let b = gen_id();
        assert!(a.starts_with('t'));
        assert_ne!(a, b);
    }

    #[test]
    fn test_decodes_browser_blob_shape() {
        // Children and memo missing, as written by older exports
        let json = r#"[{"id":"tabc","name":"Old","cards":[{"q":"x","a":"y","status":{"learned":true}}]}]"#;
        let decks: Vec<Deck> = serde_json::from_str(json).unwrap();

        assert_eq!(decks[0].children.len(), 0);
        assert_eq!(decks[0].cards[0].memo, "");
        assert!(decks[0].cards[0].status.learned);
        assert!(!decks[0].cards[0].status.review);
    }

    #[test]
    fn test_subtree_len_counts_nested_results() {
        let mut root = Deck::new("A".to_string(), Vec::new());
        let mut child = root.to_result();
        child.children.push(child.to_result());
        root.children.push(child);
        assert_eq!(root.subtree_len(), 3);
    }
}
