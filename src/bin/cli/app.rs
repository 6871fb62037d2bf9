use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use webmemo_lib::flashcards::import;
use webmemo_lib::flashcards::{Deck, DeckStore, FileBlobStore, QuizCard};
use webmemo_lib::{Config, Labels};

/// Shared application state for CLI commands
pub struct App {
    pub config: Config,
    pub store: DeckStore<FileBlobStore>,
}

impl App {
    /// Load config and open the deck store
    pub fn new(config_path: Option<&Path>, data_dir: Option<PathBuf>) -> Result<Self> {
        let mut config = Config::load(config_path).context("Failed to load config")?;
        if data_dir.is_some() {
            config.data_dir = data_dir;
        }

        let dir = config.data_dir().context("Failed to get data directory")?;
        log::debug!("Using deck store in {:?}", dir);
        let store = DeckStore::open_dir(dir, config.storage_key.clone());

        Ok(Self { config, store })
    }

    pub fn labels(&self) -> &'static Labels {
        self.config.locale.labels()
    }

    /// Find a deck by id, exact name or name prefix
    pub fn find_deck(&self, reference: &str) -> Result<&Deck> {
        Ok(self.store.resolve(reference)?)
    }

    /// Import a deck CSV under `name`; returns the new deck id
    pub fn import_deck(&mut self, name: &str, csv_path: &Path) -> Result<String> {
        if name.trim().is_empty() || csv_path.as_os_str().is_empty() {
            bail!("{}", self.labels().missing_name_or_file);
        }

        let cards = import::read_deck_file(csv_path)
            .with_context(|| format!("Failed to read {}", csv_path.display()))?;
        self.store.add_deck(name, cards).context("Failed to save deck")
    }

    /// Read quiz cards from a CSV with 問題/答え headers
    pub fn read_quiz(&self, csv_path: &Path) -> Result<Vec<QuizCard>> {
        if csv_path.as_os_str().is_empty() {
            bail!("{}", self.labels().missing_file);
        }

        let cards = import::read_quiz_file(csv_path)
            .with_context(|| format!("Failed to read {}", csv_path.display()))?;
        if cards.is_empty() {
            bail!("{}", self.labels().no_cards);
        }
        Ok(cards)
    }

    /// Delete a deck everywhere in the forest
    pub fn delete_deck(&mut self, id: &str) -> Result<bool> {
        self.store.delete_deck(id).context("Failed to delete deck")
    }
}
