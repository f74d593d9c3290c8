use std::fs;
use std::io;
use std::path::PathBuf;

use log::{error, info, warn};

/// Somewhere to keep the best score between runs.
pub trait HighScoreStore {
    /// The stored score, or 0 when there is nothing usable.
    fn read(&self) -> u32;

    fn write(&mut self, value: u32) -> io::Result<()>;
}

/// A text file holding a single base-10 integer.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into() }
    }
}

impl HighScoreStore for FileStore {
    fn read(&self) -> u32 {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return 0,
            Err(e) => {
                warn!("Error loading high score from {}: {}", self.path.display(), e);
                return 0;
            }
        };

        contents.trim().parse().unwrap_or_else(|e| {
            warn!(
                "Ignoring unreadable high score in {}: {}",
                self.path.display(),
                e
            );
            0
        })
    }

    fn write(&mut self, value: u32) -> io::Result<()> {
        fs::write(&self.path, value.to_string())
    }
}

/// Keeps the score in memory only. Handy for tests and throwaway sessions.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    value: Option<u32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: u32) -> Self {
        MemoryStore { value: Some(value) }
    }
}

impl HighScoreStore for MemoryStore {
    fn read(&self) -> u32 {
        self.value.unwrap_or(0)
    }

    fn write(&mut self, value: u32) -> io::Result<()> {
        self.value = Some(value);
        Ok(())
    }
}

/// Compares a finished game's score with the stored one and persists it if it
/// is strictly better. Returns the high score that now stands; a failed write
/// is logged and otherwise ignored.
pub fn record_score(store: &mut impl HighScoreStore, score: u32) -> u32 {
    let high_score = store.read();
    if score <= high_score {
        return high_score;
    }

    info!("New high score: {} (was {})", score, high_score);
    if let Err(e) = store.write(score) {
        error!("Error saving high score: {}", e);
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static NEXT_FILE: AtomicUsize = AtomicUsize::new(0);

    fn scratch_path() -> PathBuf {
        let n = NEXT_FILE.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir().join(format!(
            "snekgrid-high-score-{}-{}.txt",
            std::process::id(),
            n
        ))
    }

    #[test]
    fn test_missing_file_reads_zero() {
        let path = scratch_path();
        let _ = fs::remove_file(&path);
        assert_eq!(FileStore::new(&path).read(), 0);
    }

    #[test]
    fn test_write_then_read() {
        let path = scratch_path();
        let mut store = FileStore::new(&path);

        store.write(7).unwrap();
        assert_eq!(store.read(), 7);
        assert_eq!(fs::read_to_string(&path).unwrap(), "7");

        store.write(3).unwrap();
        assert_eq!(store.read(), 3, "writes overwrite");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_corrupt_file_reads_zero() {
        for contents in ["", "abc", "-4", "12 apples", "99999999999999999999"] {
            let path = scratch_path();
            fs::write(&path, contents).unwrap();
            assert_eq!(FileStore::new(&path).read(), 0, "contents: {:?}", contents);
            fs::remove_file(&path).unwrap();
        }
    }

    #[test]
    fn test_trailing_whitespace_tolerated() {
        let path = scratch_path();
        fs::write(&path, "42\n").unwrap();
        assert_eq!(FileStore::new(&path).read(), 42);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_directory_reads_zero() {
        assert_eq!(FileStore::new(std::env::temp_dir()).read(), 0);
    }

    #[test]
    fn test_unwritable_store_reports_error() {
        let mut store = FileStore::new(std::env::temp_dir());
        assert!(store.write(5).is_err());
    }

    #[test]
    fn test_record_score_only_when_better() {
        let mut store = MemoryStore::with_value(5);

        assert_eq!(record_score(&mut store, 3), 5);
        assert_eq!(store.read(), 5);

        assert_eq!(record_score(&mut store, 5), 5);
        assert_eq!(store.read(), 5);

        assert_eq!(record_score(&mut store, 8), 8);
        assert_eq!(store.read(), 8);
    }

    #[test]
    fn test_record_score_survives_failed_write() {
        let mut store = FileStore::new(std::env::temp_dir());
        assert_eq!(record_score(&mut store, 4), 4);
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.read(), 0);
        store.write(7).unwrap();
        assert_eq!(store.read(), 7);
    }
}
