//! Best-score persistence
//!
//! A single integer survives between sessions. Whatever is stored is parsed
//! leniently: anything that is not a finite number reads as 0.

use crate::error::StorageError;

/// Where the best score lives
pub trait BestScoreStore {
    /// Stored best score, 0 when absent or unreadable
    fn load(&self) -> u64;
    fn save(&mut self, score: u64) -> Result<(), StorageError>;
}

/// Parse a stored value; negatives clamp to 0, fractions truncate
pub fn parse_best_score(raw: Option<&str>) -> u64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .map(|n| n.max(0.0).floor() as u64)
        .unwrap_or(0)
}

/// In-memory store for native runs and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    raw: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with a raw stored value, as if read from disk
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Some(raw.into()),
        }
    }
}

impl BestScoreStore for MemoryStore {
    fn load(&self) -> u64 {
        parse_best_score(self.raw.as_deref())
    }

    fn save(&mut self, score: u64) -> Result<(), StorageError> {
        self.raw = Some(score.to_string());
        Ok(())
    }
}

/// Browser LocalStorage backend
#[cfg(target_arch = "wasm32")]
pub struct LocalStorageStore {
    key: &'static str,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    /// LocalStorage key
    pub const DEFAULT_KEY: &'static str = "drop_catcher_best_score";

    pub fn new() -> Self {
        Self {
            key: Self::DEFAULT_KEY,
        }
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
impl BestScoreStore for LocalStorageStore {
    fn load(&self) -> u64 {
        let raw = Self::storage().and_then(|s| s.get_item(self.key).ok().flatten());
        let best = parse_best_score(raw.as_deref());
        log::info!("Loaded best score {}", best);
        best
    }

    fn save(&mut self, score: u64) -> Result<(), StorageError> {
        let storage = Self::storage().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(self.key, &score.to_string())
            .map_err(|_| StorageError::Write(self.key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_best_score() {
        assert_eq!(parse_best_score(None), 0);
        assert_eq!(parse_best_score(Some("")), 0);
        assert_eq!(parse_best_score(Some("420")), 420);
        assert_eq!(parse_best_score(Some(" 37.9 ")), 37);
        assert_eq!(parse_best_score(Some("-12")), 0);
        assert_eq!(parse_best_score(Some("garbage")), 0);
        assert_eq!(parse_best_score(Some("NaN")), 0);
        assert_eq!(parse_best_score(Some("inf")), 0);
        assert_eq!(parse_best_score(Some("1e3")), 1000);
    }

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load(), 0);
        store.save(310).expect("memory save");
        assert_eq!(store.load(), 310);
        assert_eq!(MemoryStore::with_raw("corrupt{").load(), 0);
    }
}
