//! Quiz mode: a throwaway run over cards read straight from a CSV file.
//! Nothing is persisted and there are no status flags.

use super::models::QuizCard;
use super::session::{Result, SessionError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizAction {
    Forward,
    Backward,
    Quit,
}

impl QuizAction {
    /// Keyboard binding; unbound keys are ignored
    pub fn from_key(key: char) -> Option<Self> {
        match key {
            'k' => Some(Self::Forward),
            'j' => Some(Self::Backward),
            'q' => Some(Self::Quit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizTransition {
    Updated,
    Finished,
}

#[derive(Debug)]
pub struct QuizSession {
    cards: Vec<QuizCard>,
    card_index: usize,
    answer_shown: bool,
    finished: bool,
}

impl QuizSession {
    pub fn start(cards: Vec<QuizCard>) -> Result<Self> {
        if cards.is_empty() {
            return Err(SessionError::NoCards);
        }
        log::debug!("Starting quiz with {} cards", cards.len());

        Ok(Self {
            cards,
            card_index: 0,
            answer_shown: false,
            finished: false,
        })
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn card_index(&self) -> usize {
        self.card_index
    }

    pub fn answer_shown(&self) -> bool {
        self.answer_shown
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Text currently facing the user
    pub fn face(&self) -> Option<&str> {
        if self.finished {
            return None;
        }
        let card = self.cards.get(self.card_index)?;
        Some(if self.answer_shown { &card.answer } else { &card.question })
    }

    pub fn apply(&mut self, action: QuizAction) -> Result<QuizTransition> {
        if self.finished {
            return Err(SessionError::Inactive);
        }

        match action {
            QuizAction::Forward => {
                if !self.answer_shown {
                    self.answer_shown = true;
                } else if self.card_index + 1 < self.cards.len() {
                    self.card_index += 1;
                    self.answer_shown = false;
                } else {
                    self.finished = true;
                }
            }
            QuizAction::Backward => {
                if self.answer_shown {
                    self.answer_shown = false;
                } else if self.card_index > 0 {
                    self.card_index -= 1;
                    self.answer_shown = true;
                }
            }
            QuizAction::Quit => self.finished = true,
        }

        if self.finished {
            log::debug!("Quiz ended at card {} of {}", self.card_index + 1, self.cards.len());
            Ok(QuizTransition::Finished)
        } else {
            Ok(QuizTransition::Updated)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flashcards::import::parse_quiz_csv;
    use crate::flashcards::storage::{BlobStore, DeckStore, MemoryBlobStore, DEFAULT_STORAGE_KEY};

    fn cards(n: usize) -> Vec<QuizCard> {
        (0..n)
            .map(|i| QuizCard {
                question: format!("q{}", i),
                answer: format!("a{}", i),
            })
            .collect()
    }

    #[test]
    fn test_start_rejects_empty() {
        assert!(matches!(QuizSession::start(Vec::new()), Err(SessionError::NoCards)));
    }

    #[test]
    fn test_forward_walks_and_finishes() {
        let mut quiz = QuizSession::start(cards(2)).unwrap();
        assert_eq!(quiz.face(), Some("q0"));

        assert_eq!(quiz.apply(QuizAction::Forward).unwrap(), QuizTransition::Updated);
        assert_eq!(quiz.face(), Some("a0"));
        quiz.apply(QuizAction::Forward).unwrap();
        assert_eq!(quiz.face(), Some("q1"));
        quiz.apply(QuizAction::Forward).unwrap();
        assert_eq!(quiz.apply(QuizAction::Forward).unwrap(), QuizTransition::Finished);

        assert!(quiz.is_finished());
        assert!(quiz.face().is_none());
        assert!(matches!(quiz.apply(QuizAction::Backward), Err(SessionError::Inactive)));
    }

    #[test]
    fn test_backward_mirrors_full_mode() {
        let mut quiz = QuizSession::start(cards(2)).unwrap();
        quiz.apply(QuizAction::Backward).unwrap();
        assert_eq!((quiz.card_index(), quiz.answer_shown()), (0, false));

        quiz.apply(QuizAction::Forward).unwrap();
        quiz.apply(QuizAction::Forward).unwrap();
        quiz.apply(QuizAction::Backward).unwrap();
        assert_eq!(quiz.face(), Some("a0"));
        quiz.apply(QuizAction::Backward).unwrap();
        assert_eq!(quiz.face(), Some("q0"));
    }

    #[test]
    fn test_quit_ends_immediately() {
        let mut quiz = QuizSession::start(cards(3)).unwrap();
        assert_eq!(quiz.apply(QuizAction::Quit).unwrap(), QuizTransition::Finished);
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(QuizAction::from_key('k'), Some(QuizAction::Forward));
        assert_eq!(QuizAction::from_key('j'), Some(QuizAction::Backward));
        assert_eq!(QuizAction::from_key('q'), Some(QuizAction::Quit));
        assert_eq!(QuizAction::from_key('o'), None);
    }

    #[test]
    fn test_csv_quiz_run_leaves_store_alone() {
        let store = DeckStore::open(MemoryBlobStore::new(), DEFAULT_STORAGE_KEY);
        let parsed = parse_quiz_csv("問題,答え\nCapital of Japan,Tokyo").unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].question, "Capital of Japan");

        let mut quiz = QuizSession::start(parsed).unwrap();
        quiz.apply(QuizAction::Forward).unwrap();
        assert_eq!(quiz.face(), Some("Tokyo"));
        assert_eq!(quiz.apply(QuizAction::Forward).unwrap(), QuizTransition::Finished);

        assert!(store.decks().is_empty());
        assert!(store.blobs().read(DEFAULT_STORAGE_KEY).unwrap().is_none());
    }
}
