//! Review sessions over a private copy of a deck
//!
//! Navigation is "reveal, then move": stepping forward first shows the
//! current answer and only advances on the next step; stepping backward
//! first hides the answer, then lands on the previous card with its
//! answer already showing.

use thiserror::Error;

use super::models::{Card, CardStatus, Deck, QuizCard, StatusFlag};
use super::quiz::QuizSession;
use super::storage::{BlobStore, DeckStore, FlashcardStorageError};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session is no longer accepting input")]
    Inactive,

    #[error("Session is not waiting for a save decision")]
    NotAwaitingSave,

    #[error("Another session is already running")]
    AlreadyActive,

    #[error("No cards to study")]
    NoCards,

    #[error(transparent)]
    Storage(#[from] FlashcardStorageError),
}

pub type Result<T> = std::result::Result<T, SessionError>;

/// Input accepted by a review session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    RevealToggle,
    StepBackward,
    StepForward,
    ToggleFlag(StatusFlag),
    Restart,
    Abandon,
    Finish,
}

impl ReviewAction {
    /// Keyboard binding; unbound keys flip the answer
    pub fn from_key(key: char) -> Self {
        match key {
            'j' => Self::StepBackward,
            'k' => Self::StepForward,
            'o' => Self::ToggleFlag(StatusFlag::Learned),
            'n' => Self::ToggleFlag(StatusFlag::Hide),
            'a' => Self::ToggleFlag(StatusFlag::Review),
            'q' => Self::Finish,
            's' => Self::Restart,
            'e' => Self::Abandon,
            _ => Self::RevealToggle,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Active,
    /// Ended; the caller must answer the save prompt via [`ReviewSession::conclude`]
    AwaitingSave,
    Closed,
}

/// What the UI should do after an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Updated,
    SavePrompt,
    Abandoned,
}

/// What a review screen shows for the current card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView<'a> {
    pub face: &'a str,
    pub memo: &'a str,
    pub status: CardStatus,
    pub answer_shown: bool,
    pub position: usize,
    pub total: usize,
}

pub struct ReviewSession {
    source_id: String,
    deck: Deck,
    card_index: usize,
    answer_shown: bool,
    phase: Phase,
}

impl ReviewSession {
    /// Begin reviewing a copy of `source`. An empty deck goes straight to
    /// the save prompt.
    pub fn start(source: &Deck) -> Self {
        let phase = if source.cards.is_empty() {
            Phase::AwaitingSave
        } else {
            Phase::Active
        };
        log::debug!("Starting review of '{}' ({} cards)", source.name, source.cards.len());

        Self {
            source_id: source.id.clone(),
            deck: source.clone(),
            card_index: 0,
            answer_shown: false,
            phase,
        }
    }

    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    /// The session's working copy
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn card_index(&self) -> usize {
        self.card_index
    }

    pub fn answer_shown(&self) -> bool {
        self.answer_shown
    }

    pub fn current_card(&self) -> Option<&Card> {
        self.deck.cards.get(self.card_index)
    }

    pub fn view(&self) -> Option<CardView<'_>> {
        let card = self.current_card()?;
        Some(CardView {
            face: if self.answer_shown { &card.answer } else { &card.question },
            memo: &card.memo,
            status: card.status,
            answer_shown: self.answer_shown,
            position: self.card_index + 1,
            total: self.deck.cards.len(),
        })
    }

    pub fn apply(&mut self, action: ReviewAction) -> Result<Transition> {
        if self.phase != Phase::Active {
            return Err(SessionError::Inactive);
        }

        match action {
            ReviewAction::RevealToggle => self.answer_shown = !self.answer_shown,
            ReviewAction::StepBackward => self.step_backward(),
            ReviewAction::StepForward => self.step_forward(),
            ReviewAction::ToggleFlag(flag) => {
                let idx = self.card_index;
                if let Some(card) = self.deck.cards.get_mut(idx) {
                    let value = card.status.toggle(flag);
                    log::debug!("Card {} {:?} -> {}", idx, flag, value);
                }
            }
            ReviewAction::Restart => {
                self.card_index = 0;
                self.answer_shown = false;
            }
            ReviewAction::Abandon => {
                log::debug!("Review of '{}' abandoned", self.deck.name);
                self.phase = Phase::Closed;
                return Ok(Transition::Abandoned);
            }
            ReviewAction::Finish => {
                self.phase = Phase::AwaitingSave;
                return Ok(Transition::SavePrompt);
            }
        }

        Ok(Transition::Updated)
    }

    fn step_backward(&mut self) {
        if self.answer_shown {
            self.answer_shown = false;
        } else if self.card_index > 0 {
            self.card_index -= 1;
            self.answer_shown = true;
        }
    }

    fn step_forward(&mut self) {
        if !self.answer_shown {
            self.answer_shown = true;
        } else if self.card_index + 1 < self.deck.cards.len() {
            self.card_index += 1;
            self.answer_shown = false;
        }
    }

    /// Answer the save prompt. On `save`, a renamed snapshot of the edited
    /// deck is attached under the source deck; returns the snapshot id when
    /// it was stored.
    pub fn conclude<B: BlobStore>(
        &mut self,
        save: bool,
        store: &mut DeckStore<B>,
    ) -> Result<Option<String>> {
        if self.phase != Phase::AwaitingSave {
            return Err(SessionError::NotAwaitingSave);
        }
        self.phase = Phase::Closed;

        if !save {
            log::debug!("Review result of '{}' discarded", self.deck.name);
            return Ok(None);
        }

        let result = self.deck.to_result();
        let result_id = result.id.clone();
        if store.add_child_result(&self.source_id, result)? {
            Ok(Some(result_id))
        } else {
            Ok(None)
        }
    }
}

/// The one session allowed to run at a time
pub enum ActiveSession {
    Review(ReviewSession),
    Quiz(QuizSession),
}

impl ActiveSession {
    pub fn is_live(&self) -> bool {
        match self {
            Self::Review(session) => session.phase() != Phase::Closed,
            Self::Quiz(session) => !session.is_finished(),
        }
    }
}

/// Holder enforcing the single-active-session rule
#[derive(Default)]
pub struct SessionSlot {
    current: Option<ActiveSession>,
}

impl SessionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a session is running or waiting on a save decision
    pub fn is_occupied(&self) -> bool {
        self.current.as_ref().map_or(false, ActiveSession::is_live)
    }

    fn claim(&mut self) -> Result<()> {
        if self.is_occupied() {
            return Err(SessionError::AlreadyActive);
        }
        self.current = None;
        Ok(())
    }

    pub fn begin_review(&mut self, deck: &Deck) -> Result<&mut ReviewSession> {
        self.claim()?;
        match self.current.insert(ActiveSession::Review(ReviewSession::start(deck))) {
            ActiveSession::Review(session) => Ok(session),
            ActiveSession::Quiz(_) => unreachable!(),
        }
    }

    pub fn begin_quiz(&mut self, cards: Vec<QuizCard>) -> Result<&mut QuizSession> {
        self.claim()?;
        let session = QuizSession::start(cards)?;
        match self.current.insert(ActiveSession::Quiz(session)) {
            ActiveSession::Quiz(session) => Ok(session),
            ActiveSession::Review(_) => unreachable!(),
        }
    }

    pub fn current(&self) -> Option<&ActiveSession> {
        self.current.as_ref()
    }

    pub fn review_mut(&mut self) -> Option<&mut ReviewSession> {
        match self.current.as_mut() {
            Some(ActiveSession::Review(session)) => Some(session),
            _ => None,
        }
    }

    pub fn quiz_mut(&mut self) -> Option<&mut QuizSession> {
        match self.current.as_mut() {
            Some(ActiveSession::Quiz(session)) => Some(session),
            _ => None,
        }
    }

    /// Drop the held session once it has ended
    pub fn clear_finished(&mut self) {
        if !self.is_occupied() {
            self.current = None;
        }
    }
}
