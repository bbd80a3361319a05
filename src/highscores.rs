//! Score and high score bookkeeping
//!
//! The running score belongs to one world. The high score is loaded once
//! per process and handed from world to world; it never decreases.

use serde::{Deserialize, Serialize};

use crate::persistence::{KeyValueStore, load_high_score, save_high_score};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTracker {
    score: u32,
    high_score: u32,
    /// Set when the last finished run beat the previous high score
    new_high_score: bool,
    /// Whether storage holds the current high score
    persisted: bool,
}

impl ScoreTracker {
    /// Start a run with score 0 and a known high score
    pub fn new(high_score: u32) -> Self {
        Self {
            score: 0,
            high_score,
            new_high_score: false,
            persisted: false,
        }
    }

    /// Read the high score from storage; missing or unreadable means 0
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match load_high_score(store) {
            Ok(high_score) => {
                log::info!("Loaded high score {}", high_score);
                Self {
                    persisted: true,
                    ..Self::new(high_score)
                }
            }
            Err(e) => {
                log::warn!("Could not load high score, starting from 0: {}", e);
                Self::new(0)
            }
        }
    }

    /// Tracker for the next world: score reset, high score and its
    /// storage state carried over
    pub fn next_run(&self) -> Self {
        Self {
            persisted: self.persisted,
            ..Self::new(self.high_score)
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn is_new_high_score(&self) -> bool {
        self.new_high_score
    }

    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    /// One enemy destroyed. Returns the new score.
    pub fn record_kill(&mut self) -> u32 {
        self.score = self.score.saturating_add(1);
        self.score
    }

    /// Settle the run: raise the high score if beaten, then persist it.
    ///
    /// The write happens even when the value is unchanged. Returns whether
    /// this run set a new high score.
    pub fn finish_run(&mut self, store: &mut dyn KeyValueStore) -> bool {
        self.new_high_score = self.score > self.high_score;
        if self.new_high_score {
            log::info!("New high score: {} (was {})", self.score, self.high_score);
            self.high_score = self.score;
        }

        match save_high_score(store, self.high_score) {
            Ok(()) => self.persisted = true,
            Err(e) => {
                log::warn!("Failed to save high score {}: {}", self.high_score, e);
                self.persisted = false;
            }
        }
        self.new_high_score
    }
}
