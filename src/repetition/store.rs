//! Persistence of difficult pairs
//!
//! The whole record lives under a single key. Storage problems never reach
//! the caller: unreadable data is treated as empty and failed writes are
//! logged and dropped, so review bookkeeping can never block gameplay.

use std::sync::Arc;

use super::algorithm::{calculate_next_review, GRADUATION_REHEARSALS};
use super::models::{DifficultPair, SpacedRepetitionData};
use crate::clock::{Clock, SystemClock};
use crate::storage::{KeyValueStore, StorageError};

/// Key under which the record is stored
pub const STORAGE_KEY: &str = "memory-trainer-spaced-repetition";

/// What `mark_pair_reviewed` did to a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewUpdate {
    /// The pair is not tracked; nothing changed
    NotTracked,
    /// The pair was rescheduled
    Rescheduled(DifficultPair),
    /// The pair reached the graduation threshold and was removed
    Graduated(String),
}

pub struct SpacedRepetitionStore {
    backend: Option<Arc<dyn KeyValueStore>>,
    clock: Arc<dyn Clock>,
}

impl SpacedRepetitionStore {
    pub fn new(backend: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            backend: Some(backend),
            clock,
        }
    }

    pub fn with_system_clock(backend: Arc<dyn KeyValueStore>) -> Self {
        Self::new(backend, Arc::new(SystemClock))
    }

    /// A store with no backend; every operation is a no-op
    pub fn disabled() -> Self {
        Self {
            backend: None,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.backend.is_some()
    }

    fn now(&self) -> i64 {
        self.clock.now_millis()
    }

    // ==================== Persistence ====================

    /// Load the stored record, falling back to an empty one
    pub fn load(&self) -> SpacedRepetitionData {
        let now = self.now();
        let Some(backend) = &self.backend else {
            return SpacedRepetitionData::empty(now);
        };

        let stored = match backend.get(STORAGE_KEY) {
            Ok(Some(stored)) => stored,
            Ok(None) => return SpacedRepetitionData::empty(now),
            Err(e) => {
                log::warn!("Failed to load spaced repetition data: {}", e);
                return SpacedRepetitionData::empty(now);
            }
        };

        match serde_json::from_str(&stored) {
            Ok(data) => data,
            Err(e) => {
                log::warn!("Discarding malformed spaced repetition data: {}", e);
                SpacedRepetitionData::empty(now)
            }
        }
    }

    fn save(&self, data: &SpacedRepetitionData) {
        let Some(backend) = &self.backend else {
            return;
        };

        let result = serde_json::to_string(data)
            .map_err(StorageError::from)
            .and_then(|json| backend.set(STORAGE_KEY, &json));

        if let Err(e) = result {
            log::error!("Failed to save spaced repetition data: {}", e);
        }
    }

    // ==================== Review Operations ====================

    /// Record a failed pair once its session failure count meets the threshold
    pub fn record_failed_pair(
        &self,
        pair_id: &str,
        value: &str,
        category: &str,
        current_failure_count: u32,
        threshold: u32,
    ) {
        if current_failure_count < threshold || !self.is_enabled() {
            return;
        }

        let mut data = self.load();
        let now = self.now();

        if let Some(pair) = data.difficult_pairs.iter_mut().find(|p| p.pair_id == pair_id) {
            pair.failure_count = current_failure_count;
            pair.last_failure_timestamp = now;
            pair.next_review_timestamp = calculate_next_review(pair.rehearsal_count, now);
        } else {
            log::info!("Tracking difficult pair {} ({} failures)", pair_id, current_failure_count);
            data.difficult_pairs.push(DifficultPair {
                pair_id: pair_id.to_string(),
                value: value.to_string(),
                category: category.to_string(),
                failure_count: current_failure_count,
                last_failure_timestamp: now,
                next_review_timestamp: calculate_next_review(0, now),
                rehearsal_count: 0,
            });
        }

        data.last_updated = now;
        self.save(&data);
    }

    /// Pairs whose next review is at or before `now`
    pub fn get_due_pairs(&self, now: i64) -> Vec<DifficultPair> {
        self.load()
            .difficult_pairs
            .into_iter()
            .filter(|pair| pair.is_due(now))
            .collect()
    }

    /// Pairs due right now
    pub fn due_pairs_now(&self) -> Vec<DifficultPair> {
        self.get_due_pairs(self.now())
    }

    /// Due pairs belonging to one level
    pub fn due_pairs_for_level(&self, level_id: &str, now: i64) -> Vec<DifficultPair> {
        self.get_due_pairs(now)
            .into_iter()
            .filter(|pair| pair.belongs_to_level(level_id))
            .collect()
    }

    /// All tracked pairs, soonest review first
    pub fn all_pairs(&self) -> Vec<DifficultPair> {
        let mut pairs = self.load().difficult_pairs;
        pairs.sort_by_key(|p| p.next_review_timestamp);
        pairs
    }

    /// Update a tracked pair after it was reviewed
    pub fn mark_pair_reviewed(&self, pair_id: &str, success: bool) -> ReviewUpdate {
        if !self.is_enabled() {
            return ReviewUpdate::NotTracked;
        }

        let mut data = self.load();
        let Some(index) = data.difficult_pairs.iter().position(|p| p.pair_id == pair_id) else {
            return ReviewUpdate::NotTracked;
        };

        let now = self.now();
        let update = {
            let pair = &mut data.difficult_pairs[index];
            if success {
                pair.rehearsal_count += 1;
                pair.next_review_timestamp = calculate_next_review(pair.rehearsal_count, now);
            } else {
                pair.rehearsal_count = 0;
                pair.failure_count += 1;
                pair.last_failure_timestamp = now;
                pair.next_review_timestamp = calculate_next_review(0, now);
            }

            if success && pair.rehearsal_count >= GRADUATION_REHEARSALS {
                ReviewUpdate::Graduated(pair.pair_id.clone())
            } else {
                ReviewUpdate::Rescheduled(pair.clone())
            }
        };

        if let ReviewUpdate::Graduated(id) = &update {
            log::info!("Pair {} graduated from review", id);
            data.difficult_pairs.remove(index);
        }

        data.last_updated = now;
        self.save(&data);
        update
    }

    /// Delete all stored review data
    pub fn clear(&self) {
        let Some(backend) = &self.backend else {
            return;
        };

        if let Err(e) = backend.remove(STORAGE_KEY) {
            log::error!("Failed to clear spaced repetition data: {}", e);
        }
    }
}
