/// Best-score persistence.
///
/// One integer per game, keyed `"<game>HighScore"`. The file holds
/// `key=value` lines and is rewritten wholesale on every update. A missing
/// file, a missing key or a garbled line all read as "no score yet".

use std::collections::HashMap;
use std::path::PathBuf;

pub trait ScoreStore {
    fn get(&self, key: &str) -> Option<u32>;
    fn set(&mut self, key: &str, value: u32);
}

// ── File-backed store ────────────────────────────────────────────────────────

pub struct FileStore {
    path: PathBuf,
    scores: HashMap<String, u32>,
}

impl FileStore {
    /// Load `$HOME/.term_arcade_scores` (or `./.term_arcade_scores` when
    /// `HOME` is unset). Never fails: unreadable state means empty state.
    pub fn open() -> Self {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        Self::open_at(PathBuf::from(home).join(".term_arcade_scores"))
    }

    pub fn open_at(path: PathBuf) -> Self {
        let mut scores = HashMap::new();
        if let Ok(contents) = std::fs::read_to_string(&path) {
            for line in contents.lines() {
                if let Some((key, value)) = line.split_once('=') {
                    if let Ok(value) = value.trim().parse() {
                        scores.insert(key.trim().to_string(), value);
                    }
                }
            }
        }
        FileStore { path, scores }
    }
}

impl ScoreStore for FileStore {
    fn get(&self, key: &str) -> Option<u32> {
        self.scores.get(key).copied()
    }

    fn set(&mut self, key: &str, value: u32) {
        self.scores.insert(key.to_string(), value);
        let mut lines: Vec<String> = self
            .scores
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        lines.sort();
        // Best-effort write; failures are ignored.
        let _ = std::fs::write(&self.path, lines.join("\n") + "\n");
    }
}

// ── In-memory store ──────────────────────────────────────────────────────────

/// Map-backed store for tests.
#[derive(Default)]
pub struct MemStore {
    scores: HashMap<String, u32>,
}

impl MemStore {
    pub fn new() -> Self {
        MemStore::default()
    }
}

impl ScoreStore for MemStore {
    fn get(&self, key: &str) -> Option<u32> {
        self.scores.get(key).copied()
    }

    fn set(&mut self, key: &str, value: u32) {
        self.scores.insert(key.to_string(), value);
    }
}
