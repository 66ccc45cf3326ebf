use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::models::Draft;

/// Scratch file holding drafts pending commit to the database.
///
/// The file is a JSON array of draft objects, rewritten in full on every
/// mutation. There is no locking and no optimistic concurrency check, so
/// concurrent writers race last-writer-wins.
#[derive(Debug, Clone)]
pub struct DraftStore {
    path: PathBuf,
}

impl DraftStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current drafts in insertion order. Reads fail open: an absent,
    /// unreadable, or malformed file reads as an empty list.
    #[must_use]
    pub fn list(&self) -> Vec<Draft> {
        let Ok(raw) = fs::read_to_string(&self.path) else {
            return Vec::new();
        };
        serde_json::from_str(&raw).unwrap_or_default()
    }

    pub fn append(&self, draft: Draft) -> Result<()> {
        let mut drafts = self.list();
        drafts.push(draft);
        self.write(&drafts)
    }

    /// Remove the draft at `index`. Returns `false` without touching the
    /// file when the index is out of range.
    pub fn remove_at(&self, index: usize) -> Result<bool> {
        let mut drafts = self.list();
        if index >= drafts.len() {
            return Ok(false);
        }
        drafts.remove(index);
        self.write(&drafts)?;
        Ok(true)
    }

    /// Write an empty array; used after a successful commit.
    pub fn clear(&self) -> Result<()> {
        self.write(&[])
    }

    fn write(&self, drafts: &[Draft]) -> Result<()> {
        let json = serde_json::to_string_pretty(drafts)?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write draft file: {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_draft(name: &str) -> Draft {
        Draft {
            name: name.to_string(),
            ingredients: vec!["flour".to_string(), "milk".to_string()],
        }
    }

    fn store_in(dir: &tempfile::TempDir) -> DraftStore {
        DraftStore::new(dir.path().join("recipes.json"))
    }

    #[test]
    fn test_list_absent_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_list_malformed_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "{not json").unwrap();
        assert!(store.list().is_empty());

        // Wrong shape (object instead of array) also reads as empty
        fs::write(store.path(), "{\"name\": \"x\"}").unwrap();
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_append_and_list() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.append(sample_draft("Pannenkoeken")).unwrap();
        store.append(sample_draft("Hutspot")).unwrap();

        let drafts = store.list();
        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].name, "Pannenkoeken");
        assert_eq!(drafts[1].name, "Hutspot");
    }

    #[test]
    fn test_append_then_remove_restores_prior_state() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.append(sample_draft("Keep")).unwrap();
        let before = store.list();

        store.append(sample_draft("Temp")).unwrap();
        assert!(store.remove_at(1).unwrap());

        assert_eq!(store.list(), before);
    }

    #[test]
    fn test_remove_at_out_of_range() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.append(sample_draft("Only")).unwrap();

        assert!(!store.remove_at(1).unwrap());
        assert!(!store.remove_at(99).unwrap());
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn test_remove_at_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(!store.remove_at(0).unwrap());
    }

    #[test]
    fn test_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.append(sample_draft("A")).unwrap();
        store.append(sample_draft("B")).unwrap();

        store.clear().unwrap();
        assert!(store.list().is_empty());
        // The file itself holds an empty array, not nothing
        assert_eq!(fs::read_to_string(store.path()).unwrap().trim(), "[]");
    }

    #[test]
    fn test_file_is_pretty_printed() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.append(sample_draft("Pannenkoeken")).unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains('\n'));
    }
}
