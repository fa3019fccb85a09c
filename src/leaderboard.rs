//! Score leaderboard
//!
//! Tracks the top 10 rounds across sessions, sorted by score with faster
//! completion breaking ties. Persisted through a swappable [`ScoreStore`];
//! storage failures degrade to a session-only board.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::persistence::ScoreStore;

/// Maximum number of entries to keep
pub const MAX_ENTRIES: usize = 10;

/// Rejected submission
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("player name is empty")]
    EmptyName,
}

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Player name, non-empty after trimming
    pub name: String,
    /// Items collected in the round
    pub score: u32,
    /// Unix timestamp (ms) when submitted
    pub timestamp: i64,
    /// Seconds from round start to the terminal state
    #[serde(rename = "finalTime")]
    pub final_time: f32,
}

impl LeaderboardEntry {
    /// Dedup key equality: the exact (name, score, timestamp) triple.
    /// Entries differing in any of the three are distinct submissions.
    pub fn same_submission(&self, other: &Self) -> bool {
        self.name == other.name && self.score == other.score && self.timestamp == other.timestamp
    }
}

/// Ranked, capped score table
#[derive(Debug, Clone, Default)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// Create an empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Load from the store; unavailable or corrupt data yields an empty board
    pub fn load(store: &dyn ScoreStore) -> Self {
        match store.load() {
            Ok(entries) => {
                let mut board = Self { entries };
                board.normalize();
                log::info!("Loaded {} leaderboard entries", board.len());
                board
            }
            Err(err) => {
                log::warn!("Leaderboard unavailable, starting empty: {err}");
                Self::new()
            }
        }
    }

    /// Write the board to the store, best-effort
    pub fn save(&self, store: &dyn ScoreStore) {
        match store.save(&self.entries) {
            Ok(()) => log::info!("Leaderboard saved ({} entries)", self.len()),
            Err(err) => log::warn!("Leaderboard not persisted: {err}"),
        }
    }

    /// Validate and insert a new entry, keeping the board sorted and capped.
    ///
    /// Returns the 1-indexed rank, or None if the entry fell off the bottom
    /// of a full board. Submitting the identical (name, score, timestamp)
    /// triple twice stores one entry.
    pub fn submit(
        &mut self,
        name: &str,
        score: u32,
        final_time: f32,
        timestamp: i64,
    ) -> Result<Option<usize>, SubmitError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SubmitError::EmptyName);
        }

        let entry = LeaderboardEntry {
            name: name.to_owned(),
            score,
            timestamp,
            final_time,
        };
        self.push_dedup(entry.clone());
        self.normalize();

        Ok(self.rank_of(&entry))
    }

    /// Submit a score and persist the updated board.
    ///
    /// Re-reads the store first so entries written by other sessions survive
    /// the rewrite; exact duplicate triples collapse to one entry.
    pub fn submit_and_persist(
        &mut self,
        store: &dyn ScoreStore,
        name: &str,
        score: u32,
        final_time: f32,
        timestamp: i64,
    ) -> Result<Option<usize>, SubmitError> {
        match store.load() {
            Ok(existing) => self.merge(existing),
            Err(err) => log::warn!("Skipping leaderboard merge: {err}"),
        }
        let rank = self.submit(name, score, final_time, timestamp)?;
        self.save(store);
        Ok(rank)
    }

    /// Fold in entries persisted elsewhere, deduplicating exact repeats
    pub fn merge(&mut self, entries: impl IntoIterator<Item = LeaderboardEntry>) {
        for entry in entries {
            self.push_dedup(entry);
        }
        self.normalize();
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push_dedup(&mut self, entry: LeaderboardEntry) {
        if !self.entries.iter().any(|e| e.same_submission(&entry)) {
            self.entries.push(entry);
        }
    }

    /// Sort by score descending, final time ascending, and cap at the top 10
    fn normalize(&mut self) {
        self.entries.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then(a.final_time.total_cmp(&b.final_time))
        });
        self.entries.truncate(MAX_ENTRIES);
    }

    fn rank_of(&self, entry: &LeaderboardEntry) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.same_submission(entry))
            .map(|i| i + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryStore, StoreError};

    fn entry(name: &str, score: u32, final_time: f32, timestamp: i64) -> LeaderboardEntry {
        LeaderboardEntry {
            name: name.to_owned(),
            score,
            timestamp,
            final_time,
        }
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut board = Leaderboard::new();
        assert_eq!(board.submit("", 5, 12.0, 1), Err(SubmitError::EmptyName));
        assert_eq!(board.submit("   ", 5, 12.0, 1), Err(SubmitError::EmptyName));
        assert!(board.is_empty());
    }

    #[test]
    fn test_name_is_trimmed() {
        let mut board = Leaderboard::new();
        let rank = board.submit("  ada  ", 5, 12.0, 1).unwrap();
        assert_eq!(rank, Some(1));
        assert_eq!(board.entries()[0].name, "ada");
    }

    #[test]
    fn test_ordering_score_then_time() {
        let mut board = Leaderboard::new();
        board.submit("a", 5, 10.0, 1).unwrap();
        board.submit("b", 5, 8.0, 2).unwrap();
        board.submit("c", 7, 20.0, 3).unwrap();

        let names: Vec<_> = board.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_capped_at_ten() {
        let mut board = Leaderboard::new();
        for i in 0..12u32 {
            board.submit(&format!("p{i}"), i, 10.0, i as i64).unwrap();
        }
        assert_eq!(board.len(), MAX_ENTRIES);
        // Lowest scores fell off
        assert!(board.entries().iter().all(|e| e.score >= 2));
    }

    #[test]
    fn test_rank_none_when_off_the_bottom() {
        let mut board = Leaderboard::new();
        for i in 0..10u32 {
            board.submit(&format!("p{i}"), 100 + i, 10.0, i as i64).unwrap();
        }
        let rank = board.submit("slow", 1, 19.0, 99).unwrap();
        assert_eq!(rank, None);
        assert_eq!(board.len(), MAX_ENTRIES);
    }

    #[test]
    fn test_duplicate_triple_is_idempotent() {
        let mut board = Leaderboard::new();
        board.submit("ada", 5, 12.0, 42).unwrap();
        board.submit("ada", 5, 12.0, 42).unwrap();
        assert_eq!(board.len(), 1);

        // A different timestamp is a distinct submission
        board.submit("ada", 5, 12.0, 43).unwrap();
        assert_eq!(board.len(), 2);
    }

    #[test]
    fn test_merge_dedups_against_persisted() {
        let mut board = Leaderboard::new();
        board.submit("ada", 5, 12.0, 42).unwrap();

        board.merge(vec![
            entry("ada", 5, 12.0, 42),
            entry("bob", 3, 15.0, 50),
        ]);
        assert_eq!(board.len(), 2);
    }

    #[test]
    fn test_load_from_failing_store_is_empty() {
        struct FailStore;
        impl ScoreStore for FailStore {
            fn load(&self) -> Result<Vec<LeaderboardEntry>, StoreError> {
                Err(StoreError::Unavailable)
            }
            fn save(&self, _: &[LeaderboardEntry]) -> Result<(), StoreError> {
                Err(StoreError::Unavailable)
            }
        }

        let board = Leaderboard::load(&FailStore);
        assert!(board.is_empty());

        // Saving to a broken store must not panic either
        board.save(&FailStore);
    }

    #[test]
    fn test_load_normalizes_persisted_order() {
        let store = MemoryStore::default();
        store
            .save(&[
                entry("a", 5, 10.0, 1),
                entry("c", 7, 20.0, 3),
                entry("b", 5, 8.0, 2),
            ])
            .unwrap();

        let board = Leaderboard::load(&store);
        let names: Vec<_> = board.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_submit_and_persist_round_trip() {
        let store = MemoryStore::default();
        {
            let mut board = Leaderboard::new();
            board
                .submit_and_persist(&store, "ada", 8, 14.5, 42)
                .unwrap();
        }

        // A second session sees the entry and dedups its own resubmission
        let mut board = Leaderboard::load(&store);
        assert_eq!(board.len(), 1);
        board
            .submit_and_persist(&store, "ada", 8, 14.5, 42)
            .unwrap();
        assert_eq!(board.len(), 1);
        assert_eq!(store.load().unwrap().len(), 1);
    }
}
