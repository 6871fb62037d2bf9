//! Flashcard decks, review sessions and result snapshots
//!
//! This module provides:
//! - Deck forest storage (root decks with nested review results)
//! - CSV import for decks and quiz runs
//! - Full review sessions with status flags and result saving
//! - Quiz sessions over unsaved cards

pub mod import;
pub mod models;
pub mod quiz;
pub mod session;
pub mod storage;

pub use models::*;
pub use quiz::{QuizAction, QuizSession, QuizTransition};
pub use session::{
    ActiveSession, CardView, Phase, ReviewAction, ReviewSession, SessionError, SessionSlot,
    Transition,
};
pub use storage::{
    BlobStore, DeckStore, FileBlobStore, FlashcardStorageError, MemoryBlobStore,
    DEFAULT_STORAGE_KEY,
};
