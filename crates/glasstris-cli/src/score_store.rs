use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

/// One row of the high-score table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u64,
}

/// The high-score table, persisted as a JSON file.
///
/// Each player keeps a single entry holding their best score; the table is
/// stored sorted by score, highest first.
#[derive(Debug)]
pub struct ScoreStore {
    path: PathBuf,
    entries: Vec<ScoreEntry>,
}

impl ScoreStore {
    /// Loads the table from `path`. A missing file is an empty table.
    pub fn load(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json)
                .with_context(|| format!("invalid score file: {}", path.display()))?,
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                return Err(e).with_context(|| format!("failed to read {}", path.display()));
            }
        };
        Ok(Self { path, entries })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    /// Records a result, keeping only the player's best score.
    pub fn record(&mut self, name: &str, score: u64) {
        match self.entries.iter_mut().find(|entry| entry.name == name) {
            Some(existing) => existing.score = existing.score.max(score),
            None => self.entries.push(ScoreEntry {
                name: name.to_owned(),
                score,
            }),
        }
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
    }

    /// Writes the table back to its file.
    pub fn save(&self) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, json)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> ScoreStore {
        ScoreStore {
            path: PathBuf::from("unused.json"),
            entries: Vec::new(),
        }
    }

    #[test]
    fn records_are_sorted_by_score_descending() {
        let mut store = store();
        store.record("ada", 300);
        store.record("grace", 800);
        store.record("linus", 500);
        let names: Vec<_> = store.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["grace", "linus", "ada"]);
    }

    #[test]
    fn a_player_keeps_only_their_best_score() {
        let mut store = store();
        store.record("ada", 300);
        store.record("ada", 100);
        assert_eq!(store.entries(), [ScoreEntry {
            name: "ada".to_owned(),
            score: 300,
        }]);

        store.record("ada", 900);
        assert_eq!(store.entries()[0].score, 900);
        assert_eq!(store.entries().len(), 1);
    }

    #[test]
    fn missing_file_loads_as_an_empty_table() {
        let store = ScoreStore::load("definitely/not/here.json").unwrap();
        assert!(store.entries().is_empty());
    }

    #[test]
    fn entries_round_trip_through_json() {
        let mut store = store();
        store.record("ada", 300);
        let json = serde_json::to_string(&store.entries).unwrap();
        let parsed: Vec<ScoreEntry> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, store.entries);
    }
}
