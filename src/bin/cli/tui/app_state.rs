use anyhow::Result;
use ratatui::prelude::Rect;

use crate::app::App;
use webmemo_lib::flashcards::{
    ActiveSession, Deck, Phase, QuizAction, QuizCard, QuizTransition, ReviewAction, SessionError,
    SessionSlot, Transition,
};

/// What the TUI opens on
pub enum Launch {
    Browse,
    Review(String),
    Quiz(Vec<QuizCard>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Decks,
    Review,
    Quiz,
    ConfirmSave,
    ConfirmDelete,
    ImportName,
    ImportPath,
    QuizPath,
}

#[derive(Debug, Clone)]
pub struct DeckRow {
    pub id: String,
    pub label: String,
    pub depth: usize,
    pub card_count: usize,
}

pub struct TuiState {
    pub app: App,
    pub mode: Mode,

    // Deck list state
    pub rows: Vec<DeckRow>,
    pub selected: usize,
    pub list_area: Option<Rect>,
    pub list_offset: usize,

    pub sessions: SessionSlot,
    /// Leave the TUI when the launching session ends
    pub exit_after_session: bool,

    pub pending_delete: Option<DeckRow>,
    pub pending_name: String,

    pub input_text: String,
    pub flash_message: Option<String>,

    pub quit: bool,
}

impl TuiState {
    pub fn new(app: App, launch: Launch) -> Result<Self> {
        let mut state = Self {
            app,
            mode: Mode::Decks,
            rows: Vec::new(),
            selected: 0,
            list_area: None,
            list_offset: 0,
            sessions: SessionSlot::new(),
            exit_after_session: !matches!(launch, Launch::Browse),
            pending_delete: None,
            pending_name: String::new(),
            input_text: String::new(),
            flash_message: None,
            quit: false,
        };

        state.rebuild_rows();
        match launch {
            Launch::Browse => {}
            Launch::Review(id) => state.start_review(&id),
            Launch::Quiz(cards) => state.start_quiz(cards),
        }
        Ok(state)
    }

    pub fn rebuild_rows(&mut self) {
        self.rows.clear();
        for deck in self.app.store.decks() {
            push_rows(&mut self.rows, deck, 0);
        }
        if self.selected >= self.rows.len() {
            self.selected = self.rows.len().saturating_sub(1);
        }
    }

    pub fn move_down(&mut self) {
        if !self.rows.is_empty() && self.selected < self.rows.len() - 1 {
            self.selected += 1;
        }
    }

    pub fn move_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    pub fn go_top(&mut self) {
        self.selected = 0;
    }

    pub fn go_bottom(&mut self) {
        self.selected = self.rows.len().saturating_sub(1);
    }

    pub fn selected_row(&self) -> Option<&DeckRow> {
        self.rows.get(self.selected)
    }

    // ==================== Review ====================

    pub fn review_selected(&mut self) {
        if let Some(id) = self.selected_row().map(|r| r.id.clone()) {
            self.start_review(&id);
        }
    }

    pub fn start_review(&mut self, id: &str) {
        let Some(deck) = self.app.store.find(id) else {
            self.flash_message = Some(format!("Deck not found: {}", id));
            return;
        };

        match self.sessions.begin_review(deck) {
            Ok(session) => {
                self.mode = if session.phase() == Phase::AwaitingSave {
                    Mode::ConfirmSave
                } else {
                    Mode::Review
                };
            }
            Err(e) => self.flash_message = Some(e.to_string()),
        }
    }

    pub fn review_action(&mut self, action: ReviewAction) {
        let Some(session) = self.sessions.review_mut() else {
            return;
        };

        match session.apply(action) {
            Ok(Transition::Updated) => {}
            Ok(Transition::SavePrompt) => self.mode = Mode::ConfirmSave,
            Ok(Transition::Abandoned) => self.end_session(),
            Err(e) => log::warn!("Review input rejected: {}", e),
        }
    }

    pub fn answer_save(&mut self, save: bool) {
        if let Some(session) = self.sessions.review_mut() {
            match session.conclude(save, &mut self.app.store) {
                Ok(Some(_)) => {
                    self.flash_message = Some(format!("Saved \"{}\"", result_name(session.deck())));
                }
                Ok(None) if save => {
                    self.flash_message = Some("Source deck is gone; result not saved".to_string());
                }
                Ok(None) => {}
                Err(e) => self.flash_message = Some(format!("Error: {}", e)),
            }
        }
        self.end_session();
    }

    // ==================== Quiz ====================

    pub fn start_quiz(&mut self, cards: Vec<QuizCard>) {
        match self.sessions.begin_quiz(cards) {
            Ok(_) => self.mode = Mode::Quiz,
            Err(SessionError::NoCards) => {
                self.flash_message = Some(self.app.labels().no_cards.to_string());
            }
            Err(e) => self.flash_message = Some(e.to_string()),
        }
    }

    pub fn quiz_action(&mut self, action: QuizAction) {
        let Some(quiz) = self.sessions.quiz_mut() else {
            return;
        };

        match quiz.apply(action) {
            Ok(QuizTransition::Updated) => {}
            Ok(QuizTransition::Finished) => self.end_session(),
            Err(e) => log::warn!("Quiz input rejected: {}", e),
        }
    }

    fn end_session(&mut self) {
        self.sessions.clear_finished();
        self.rebuild_rows();
        self.mode = Mode::Decks;
        if self.exit_after_session {
            self.quit = true;
        }
    }

    pub fn active_session(&self) -> Option<&ActiveSession> {
        self.sessions.current()
    }

    // ==================== Deck management ====================

    pub fn request_delete(&mut self) {
        if let Some(row) = self.selected_row().cloned() {
            self.pending_delete = Some(row);
            self.mode = Mode::ConfirmDelete;
        }
    }

    pub fn answer_delete(&mut self, confirmed: bool) {
        if let Some(row) = self.pending_delete.take() {
            if confirmed {
                match self.app.delete_deck(&row.id) {
                    Ok(_) => self.flash_message = Some(format!("Deleted \"{}\"", row.label)),
                    Err(e) => self.flash_message = Some(format!("Error: {}", e)),
                }
                self.rebuild_rows();
            }
        }
        self.mode = Mode::Decks;
    }

    pub fn begin_input(&mut self, mode: Mode) {
        self.input_text.clear();
        self.mode = mode;
    }

    pub fn cancel_input(&mut self) {
        self.input_text.clear();
        self.pending_name.clear();
        self.mode = Mode::Decks;
    }

    /// Handle Enter in one of the text input modes
    pub fn submit_input(&mut self) {
        let text = self.input_text.trim().to_string();
        self.input_text.clear();

        match self.mode {
            Mode::ImportName => {
                if text.is_empty() {
                    self.flash_message = Some(self.app.labels().missing_name_or_file.to_string());
                    self.mode = Mode::Decks;
                    return;
                }
                self.pending_name = text;
                self.mode = Mode::ImportPath;
            }
            Mode::ImportPath => {
                let name = std::mem::take(&mut self.pending_name);
                self.mode = Mode::Decks;
                match self.app.import_deck(&name, std::path::Path::new(&text)) {
                    Ok(id) => {
                        self.rebuild_rows();
                        if let Some(pos) = self.rows.iter().position(|r| r.id == id) {
                            self.selected = pos;
                        }
                        self.flash_message = Some(format!("Imported \"{}\"", name));
                    }
                    Err(e) => self.flash_message = Some(format!("{:#}", e)),
                }
            }
            Mode::QuizPath => {
                self.mode = Mode::Decks;
                match self.app.read_quiz(std::path::Path::new(&text)) {
                    Ok(cards) => self.start_quiz(cards),
                    Err(e) => self.flash_message = Some(format!("{:#}", e)),
                }
            }
            _ => {}
        }
    }
}

fn push_rows(rows: &mut Vec<DeckRow>, deck: &Deck, depth: usize) {
    rows.push(DeckRow {
        id: deck.id.clone(),
        label: deck.name.clone(),
        depth,
        card_count: deck.cards.len(),
    });
    for child in &deck.children {
        push_rows(rows, child, depth + 1);
    }
}

fn result_name(deck: &Deck) -> String {
    format!("{}{}", deck.name, webmemo_lib::flashcards::RESULT_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_state(launch: Launch) -> (TuiState, TempDir) {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("config.toml");
        fs::write(&config, "locale = \"en\"\n").unwrap();
        let app = App::new(Some(config.as_path()), Some(temp.path().join("data"))).unwrap();
        (TuiState::new(app, launch).unwrap(), temp)
    }

    fn import(state: &mut TuiState, temp: &TempDir, name: &str, csv: &str) {
        let path = temp.path().join(format!("{}.csv", name));
        fs::write(&path, csv).unwrap();
        state.begin_input(Mode::ImportName);
        state.input_text = name.to_string();
        state.submit_input();
        state.input_text = path.to_string_lossy().to_string();
        state.submit_input();
    }

    #[test]
    fn test_import_review_save_flow() {
        let (mut state, temp) = create_test_state(Launch::Browse);
        import(&mut state, &temp, "Math", "What is 2+2?,4,,false,false,false\n");
        assert_eq!(state.rows.len(), 1);

        state.review_selected();
        assert_eq!(state.mode, Mode::Review);
        state.review_action(ReviewAction::from_key('k'));
        state.review_action(ReviewAction::from_key('o'));
        state.review_action(ReviewAction::from_key('q'));
        assert_eq!(state.mode, Mode::ConfirmSave);

        state.answer_save(true);
        assert_eq!(state.mode, Mode::Decks);
        assert_eq!(state.rows.len(), 2);
        assert_eq!(state.rows[1].label, "Math 結果");
        assert_eq!(state.rows[1].depth, 1);
        assert!(state.app.store.decks()[0].children[0].cards[0].status.learned);
    }

    #[test]
    fn test_import_requires_name() {
        let (mut state, _temp) = create_test_state(Launch::Browse);
        state.begin_input(Mode::ImportName);
        state.submit_input();

        assert_eq!(state.mode, Mode::Decks);
        assert_eq!(state.flash_message.as_deref(), Some("Enter a name and a CSV file"));
        assert!(state.app.store.decks().is_empty());
    }

    #[test]
    fn test_delete_confirmation() {
        let (mut state, temp) = create_test_state(Launch::Browse);
        import(&mut state, &temp, "Math", "1+1,2\n");

        state.request_delete();
        state.answer_delete(false);
        assert_eq!(state.rows.len(), 1);

        state.request_delete();
        state.answer_delete(true);
        assert!(state.rows.is_empty());
        assert!(state.app.store.decks().is_empty());
    }

    #[test]
    fn test_launch_quiz_exits_when_done() {
        let cards = vec![QuizCard {
            question: "Capital of Japan".to_string(),
            answer: "Tokyo".to_string(),
        }];
        let (mut state, _temp) = create_test_state(Launch::Quiz(cards));
        assert_eq!(state.mode, Mode::Quiz);

        state.quiz_action(QuizAction::Forward);
        state.quiz_action(QuizAction::Forward);
        assert!(state.quit);
        assert!(state.app.store.decks().is_empty());
    }

    #[test]
    fn test_abandon_returns_to_list() {
        let (mut state, temp) = create_test_state(Launch::Browse);
        import(&mut state, &temp, "Math", "1+1,2\n");

        state.review_selected();
        state.review_action(ReviewAction::Abandon);
        assert_eq!(state.mode, Mode::Decks);
        assert!(state.active_session().is_none());
        assert!(state.app.store.decks()[0].children.is_empty());
        assert!(!state.quit);
    }
}
