//! Deck forest persistence
//!
//! The whole forest is stored as one JSON blob under a fixed key:
//! ```text
//! {data_dir}/
//! └── webmemo-tests.json   # Array of root decks, children nested inline
//! ```
//! Every mutation rewrites the full blob.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use thiserror::Error;

use super::models::{Card, Deck};

/// Key the forest is stored under
pub const DEFAULT_STORAGE_KEY: &str = "webmemo-tests";

#[derive(Error, Debug)]
pub enum FlashcardStorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Deck not found: {0}")]
    DeckNotFound(String),

    #[error("Ambiguous deck name '{name}'. Matches:\n{matches}")]
    AmbiguousDeck { name: String, matches: String },

    #[error("Deck name must not be empty")]
    EmptyName,
}

pub type Result<T> = std::result::Result<T, FlashcardStorageError>;

/// Opaque key/value blob storage
pub trait BlobStore {
    /// Read the blob stored under `key`, if any
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the blob stored under `key`
    fn write(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Blob store keeping one `{key}.json` file per key in a directory
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn blob_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl BlobStore for FileBlobStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.blob_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.blob_path(key);
        let tmp_path = self.dir.join(format!(".{}.json.tmp", key));

        // Replace atomically so a failed write never truncates the old blob
        fs::write(&tmp_path, value)?;
        fs::rename(&tmp_path, &path)?;
        Ok(())
    }
}

/// In-process blob store
#[derive(Debug, Default, Clone)]
pub struct MemoryBlobStore {
    blobs: HashMap<String, String>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryBlobStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.blobs.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Owner of the deck forest
pub struct DeckStore<B: BlobStore> {
    blobs: B,
    key: String,
    decks: Vec<Deck>,
}

impl<B: BlobStore> DeckStore<B> {
    /// Open the store, loading whatever forest is persisted under `key`
    pub fn open(blobs: B, key: impl Into<String>) -> Self {
        let key = key.into();
        let decks = load(&blobs, &key);
        Self { blobs, key, decks }
    }

    /// Root decks in insertion order
    pub fn decks(&self) -> &[Deck] {
        &self.decks
    }

    pub fn blobs(&self) -> &B {
        &self.blobs
    }

    /// Reload the forest from the blob store, discarding in-memory state
    pub fn reload(&mut self) {
        self.decks = load(&self.blobs, &self.key);
    }

    /// Persist the whole forest
    pub fn save(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.decks)?;
        self.blobs.write(&self.key, &json)?;
        Ok(())
    }

    /// Create a new root deck and persist; returns the new id
    pub fn add_deck(&mut self, name: &str, cards: Vec<Card>) -> Result<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FlashcardStorageError::EmptyName);
        }

        let deck = Deck::new(name.to_string(), cards);
        let id = deck.id.clone();
        log::info!("Adding deck '{}' ({}) with {} cards", deck.name, id, deck.cards.len());

        self.decks.push(deck);
        self.save()?;
        Ok(id)
    }

    /// Remove every deck with `id`, at the root or nested at any depth.
    /// Persists even when nothing matched; returns whether anything was removed.
    pub fn delete_deck(&mut self, id: &str) -> Result<bool> {
        let before: usize = self.decks.iter().map(Deck::subtree_len).sum();

        self.decks.retain(|d| d.id != id);
        for deck in &mut self.decks {
            remove_descendants(deck, id);
        }

        let after: usize = self.decks.iter().map(Deck::subtree_len).sum();
        let removed = after < before;
        if removed {
            log::info!("Deleted deck {} ({} nodes removed)", id, before - after);
        } else {
            log::debug!("Delete of unknown deck {} ignored", id);
        }

        self.save()?;
        Ok(removed)
    }

    /// Attach `result` under the first deck (depth first) whose id is
    /// `parent_id`. Returns false without touching storage when absent.
    pub fn add_child_result(&mut self, parent_id: &str, result: Deck) -> Result<bool> {
        match find_in_mut(&mut self.decks, parent_id) {
            Some(parent) => {
                log::info!("Saving result '{}' under deck {}", result.name, parent_id);
                parent.children.push(result);
            }
            None => {
                log::warn!("Result parent {} not found; result discarded", parent_id);
                return Ok(false);
            }
        }

        self.save()?;
        Ok(true)
    }

    /// Depth-first lookup at any depth
    pub fn find(&self, id: &str) -> Option<&Deck> {
        find_in(&self.decks, id)
    }

    /// Resolve a user-supplied reference: an id at any depth, an exact
    /// root name, or an unambiguous case-insensitive name prefix.
    pub fn resolve(&self, reference: &str) -> Result<&Deck> {
        if let Some(deck) = self.find(reference) {
            return Ok(deck);
        }

        if let Some(deck) = self.decks.iter().find(|d| d.name == reference) {
            return Ok(deck);
        }

        let lower = reference.to_lowercase();
        let matches: Vec<&Deck> = self
            .decks
            .iter()
            .filter(|d| d.name.to_lowercase().starts_with(&lower))
            .collect();

        match matches.len() {
            0 => Err(FlashcardStorageError::DeckNotFound(reference.to_string())),
            1 => Ok(matches[0]),
            _ => Err(FlashcardStorageError::AmbiguousDeck {
                name: reference.to_string(),
                matches: matches
                    .iter()
                    .map(|d| format!("  - {} ({})", d.name, d.id))
                    .collect::<Vec<_>>()
                    .join("\n"),
            }),
        }
    }
}

impl DeckStore<FileBlobStore> {
    /// Open a file-backed store rooted at `data_dir`
    pub fn open_dir(data_dir: PathBuf, key: impl Into<String>) -> Self {
        Self::open(FileBlobStore::new(data_dir), key)
    }
}

/// Decode the forest; absent, unreadable or corrupt blobs yield an empty forest
fn load<B: BlobStore>(blobs: &B, key: &str) -> Vec<Deck> {
    let content = match blobs.read(key) {
        Ok(Some(content)) => content,
        Ok(None) => return Vec::new(),
        Err(e) => {
            log::warn!("Failed to read stored decks '{}': {}", key, e);
            return Vec::new();
        }
    };

    match serde_json::from_str::<Option<Vec<Deck>>>(&content) {
        Ok(decks) => decks.unwrap_or_default(),
        Err(e) => {
            log::warn!("Stored decks '{}' are corrupt, starting empty: {}", key, e);
            Vec::new()
        }
    }
}

fn remove_descendants(deck: &mut Deck, id: &str) {
    deck.children.retain(|c| c.id != id);
    for child in &mut deck.children {
        remove_descendants(child, id);
    }
}

fn find_in<'a>(decks: &'a [Deck], id: &str) -> Option<&'a Deck> {
    for deck in decks {
        if deck.id == id {
            return Some(deck);
        }
        if let Some(found) = find_in(&deck.children, id) {
            return Some(found);
        }
    }
    None
}

fn find_in_mut<'a>(decks: &'a mut [Deck], id: &str) -> Option<&'a mut Deck> {
    for deck in decks {
        if deck.id == id {
            return Some(deck);
        }
        if let Some(found) = find_in_mut(&mut deck.children, id) {
            return Some(found);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> DeckStore<MemoryBlobStore> {
        DeckStore::open(MemoryBlobStore::new(), DEFAULT_STORAGE_KEY)
    }

    fn deck_with_id(id: &str, name: &str) -> Deck {
        Deck {
            id: id.to_string(),
            name: name.to_string(),
            cards: vec![Card::new("q", "a")],
            children: Vec::new(),
        }
    }

    #[test]
    fn test_add_deck_persists() {
        let mut store = create_test_store();
        let id = store.add_deck("Math", vec![Card::new("1+1", "2")]).unwrap();

        let reopened = DeckStore::open(store.blobs().clone(), DEFAULT_STORAGE_KEY);
        assert_eq!(reopened.decks().len(), 1);
        assert_eq!(reopened.decks()[0].id, id);
        assert!(reopened.decks()[0].children.is_empty());
    }

    #[test]
    fn test_add_deck_rejects_blank_name() {
        let mut store = create_test_store();
        let err = store.add_deck("   ", Vec::new()).unwrap_err();
        assert!(matches!(err, FlashcardStorageError::EmptyName));
        assert!(store.blobs().read(DEFAULT_STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn test_delete_removes_every_occurrence() {
        let mut store = create_test_store();
        let mut a = deck_with_id("a", "A");
        let mut b = deck_with_id("b", "B");
        let mut nested = deck_with_id("x", "X");
        nested.children.push(deck_with_id("x-child", "X child"));
        a.children.push(nested.clone());
        let mut mid = deck_with_id("m", "M");
        mid.children.push(nested);
        b.children.push(mid);
        store.decks = vec![a, b, deck_with_id("x", "X root")];

        assert!(store.delete_deck("x").unwrap());

        assert_eq!(store.decks().len(), 2);
        assert!(store.find("x").is_none());
        assert!(store.find("x-child").is_none());
        assert!(store.find("m").is_some());
        assert!(store.decks()[0].children.is_empty());
    }

    #[test]
    fn test_delete_unknown_still_persists() {
        let mut store = create_test_store();
        store.decks.push(deck_with_id("a", "A"));

        assert!(!store.delete_deck("missing").unwrap());
        let blob = store.blobs().read(DEFAULT_STORAGE_KEY).unwrap();
        assert!(blob.unwrap().contains("\"a\""));
    }

    #[test]
    fn test_add_child_result_first_dfs_match() {
        let mut store = create_test_store();
        let mut a = deck_with_id("a", "A");
        a.children.push(deck_with_id("dup", "first"));
        store.decks = vec![a, deck_with_id("dup", "second")];

        let result = deck_with_id("r", "result");
        assert!(store.add_child_result("dup", result).unwrap());

        assert_eq!(store.decks()[0].children[0].children.len(), 1);
        assert!(store.decks()[1].children.is_empty());
    }

    #[test]
    fn test_add_child_result_unknown_parent() {
        let mut store = create_test_store();
        store.decks.push(deck_with_id("a", "A"));
        let before = store.decks().to_vec();

        assert!(!store.add_child_result("zzz", deck_with_id("r", "R")).unwrap());
        assert_eq!(store.decks(), before.as_slice());
        assert!(store.blobs().read(DEFAULT_STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn test_save_load_round_trip() {
        let temp = TempDir::new().unwrap();
        let mut store = DeckStore::open_dir(temp.path().to_path_buf(), DEFAULT_STORAGE_KEY);
        let id = store.add_deck("Math", vec![Card::new("2+2", "4")]).unwrap();
        let result = store.find(&id).unwrap().to_result();
        store.add_child_result(&id, result).unwrap();
        store.add_deck("Kanji", Vec::new()).unwrap();

        let reopened = DeckStore::open_dir(temp.path().to_path_buf(), DEFAULT_STORAGE_KEY);
        assert_eq!(reopened.decks(), store.decks());
    }

    #[test]
    fn test_corrupt_blob_loads_empty() {
        let mut blobs = MemoryBlobStore::new();
        blobs.write(DEFAULT_STORAGE_KEY, "{not json").unwrap();
        assert!(DeckStore::open(blobs, DEFAULT_STORAGE_KEY).decks().is_empty());

        let mut blobs = MemoryBlobStore::new();
        blobs.write(DEFAULT_STORAGE_KEY, "null").unwrap();
        assert!(DeckStore::open(blobs, DEFAULT_STORAGE_KEY).decks().is_empty());
    }

    #[test]
    fn test_file_store_leaves_no_temp_file() {
        let temp = TempDir::new().unwrap();
        let mut blobs = FileBlobStore::new(temp.path().join("nested"));
        blobs.write("k", "[]").unwrap();

        let names: Vec<String> = fs::read_dir(temp.path().join("nested"))
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["k.json".to_string()]);
    }

    #[test]
    fn test_resolve_by_id_name_and_prefix() {
        let mut store = create_test_store();
        let mut math = deck_with_id("a", "Math");
        math.children.push(deck_with_id("r", "Math 結果"));
        store.decks = vec![math, deck_with_id("b", "Mandarin"), deck_with_id("c", "Kanji")];

        assert_eq!(store.resolve("r").unwrap().name, "Math 結果");
        assert_eq!(store.resolve("Math").unwrap().id, "a");
        assert_eq!(store.resolve("kan").unwrap().id, "c");
        assert!(matches!(
            store.resolve("ma"),
            Err(FlashcardStorageError::AmbiguousDeck { .. })
        ));
        assert!(matches!(
            store.resolve("zzz"),
            Err(FlashcardStorageError::DeckNotFound(_))
        ));
    }
}
