//! Data models for spaced repetition records

use serde::{Deserialize, Serialize};

/// A pair the player has failed repeatedly, scheduled for review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultPair {
    /// Pair id; embeds the level id (`{level}-pair-{n}`)
    pub pair_id: String,
    pub value: String,
    pub category: String,
    pub failure_count: u32,
    /// Unix milliseconds
    pub last_failure_timestamp: i64,
    /// Unix milliseconds
    pub next_review_timestamp: i64,
    /// Consecutive successful reviews since the last failure
    #[serde(default)]
    pub rehearsal_count: u32,
}

impl DifficultPair {
    pub fn is_due(&self, now: i64) -> bool {
        self.next_review_timestamp <= now
    }

    pub fn belongs_to_level(&self, level_id: &str) -> bool {
        self.pair_id
            .strip_prefix(level_id)
            .map_or(false, |rest| rest.starts_with("-pair-"))
    }
}

/// The persisted record, stored as one JSON document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpacedRepetitionData {
    #[serde(default)]
    pub difficult_pairs: Vec<DifficultPair>,
    pub last_updated: i64,
}

impl SpacedRepetitionData {
    pub fn empty(now: i64) -> Self {
        Self {
            difficult_pairs: Vec::new(),
            last_updated: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persisted_layout() {
        let data = SpacedRepetitionData {
            difficult_pairs: vec![DifficultPair {
                pair_id: "adaptive-loop-pair-2".to_string(),
                value: "🎭".to_string(),
                category: "objects".to_string(),
                failure_count: 2,
                last_failure_timestamp: 10,
                next_review_timestamp: 300_010,
                rehearsal_count: 0,
            }],
            last_updated: 10,
        };

        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["lastUpdated"], 10);
        let pair = &json["difficultPairs"][0];
        assert_eq!(pair["pairId"], "adaptive-loop-pair-2");
        assert_eq!(pair["failureCount"], 2);
        assert_eq!(pair["lastFailureTimestamp"], 10);
        assert_eq!(pair["nextReviewTimestamp"], 300_010);
        assert_eq!(pair["rehearsalCount"], 0);
    }

    #[test]
    fn test_belongs_to_level() {
        let pair = DifficultPair {
            pair_id: "loci-journey-pair-11".to_string(),
            value: "🦜".to_string(),
            category: "neutral".to_string(),
            failure_count: 2,
            last_failure_timestamp: 0,
            next_review_timestamp: 0,
            rehearsal_count: 0,
        };

        assert!(pair.belongs_to_level("loci-journey"));
        assert!(!pair.belongs_to_level("loci"));
        assert!(!pair.belongs_to_level("focus-start"));
    }
}
