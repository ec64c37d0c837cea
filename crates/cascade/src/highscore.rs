//! High-score persistence. The controller reads once at session start and
//! writes only when a finished session beats the stored score.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

pub trait HighScoreStore {
    /// The persisted high score; 0 if none has been recorded.
    fn load(&mut self) -> Result<u32, StoreError>;
    fn save(&mut self, high_score: u32) -> Result<(), StoreError>;
}

/// Keeps the high score in memory only.
#[derive(Debug, Default, Clone)]
pub struct MemoryHighScoreStore {
    high_score: u32,
    saves: u32,
}

impl MemoryHighScoreStore {
    pub fn with_high_score(high_score: u32) -> Self {
        MemoryHighScoreStore {
            high_score,
            saves: 0,
        }
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// How many times `save` has been called.
    pub fn saves(&self) -> u32 {
        self.saves
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load(&mut self) -> Result<u32, StoreError> {
        Ok(self.high_score)
    }

    fn save(&mut self, high_score: u32) -> Result<(), StoreError> {
        self.high_score = high_score;
        self.saves += 1;
        Ok(())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct HighScoreRecord {
    high_score: u32,
}

/// Stores `{"high_score": N}` as JSON at a fixed path. A missing file reads as 0.
#[derive(Debug, Clone)]
pub struct JsonFileHighScoreStore {
    path: PathBuf,
}

impl JsonFileHighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileHighScoreStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for JsonFileHighScoreStore {
    fn load(&mut self) -> Result<u32, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };
        let record: HighScoreRecord = serde_json::from_str(&content)?;
        Ok(record.high_score)
    }

    fn save(&mut self, high_score: u32) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&HighScoreRecord { high_score })?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("cascade-highscore-{}-{}", std::process::id(), name))
            .join("highscore.json")
    }

    #[test]
    fn missing_file_reads_zero() {
        let mut store = JsonFileHighScoreStore::new(scratch_path("missing"));
        assert_eq!(store.load().unwrap(), 0);
    }

    #[test]
    fn file_store_round_trips() {
        let path = scratch_path("roundtrip");
        let mut store = JsonFileHighScoreStore::new(&path);
        store.save(42).unwrap();
        let mut reopened = JsonFileHighScoreStore::new(&path);
        assert_eq!(reopened.load().unwrap(), 42);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn corrupt_file_is_json_error() {
        let path = scratch_path("corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not json").unwrap();
        let mut store = JsonFileHighScoreStore::new(&path);
        assert!(matches!(store.load(), Err(StoreError::Json(_))));
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn memory_store_counts_saves() {
        let mut store = MemoryHighScoreStore::with_high_score(10);
        assert_eq!(store.load().unwrap(), 10);
        store.save(12).unwrap();
        assert_eq!(store.high_score(), 12);
        assert_eq!(store.saves(), 1);
    }
}
