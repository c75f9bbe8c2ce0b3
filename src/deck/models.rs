//! Data models for cards

use serde::{Deserialize, Serialize};

/// Category assigned to cards of levels without categorical grouping
pub const NEUTRAL_CATEGORY: &str = "neutral";

/// Semantic tag inferred from a card's symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CardTag {
    Symbol,
    Color,
    Sound,
    Location,
    Concept,
}

/// Result of a single rehearsal of a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RehearsalOutcome {
    Success,
    Failure,
}

/// One entry of a card's rehearsal history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RehearsalEntry {
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
    pub outcome: RehearsalOutcome,
}

/// Optional memory cues attached to a card
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardCues {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visual_hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auditory_hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mnemonic_strategy: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardMetadata {
    #[serde(default)]
    pub cues: CardCues,
    #[serde(default)]
    pub tags: Vec<CardTag>,
    /// Present only for levels with the spaced-repetition hook
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rehearsal_history: Option<Vec<RehearsalEntry>>,
}

/// A single card on the board. Exactly two cards in a deck share a `pair_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardData {
    pub id: String,
    /// Display symbol
    pub value: String,
    pub pair_id: String,
    pub category: String,
    #[serde(default)]
    pub metadata: CardMetadata,
}

impl CardData {
    pub fn is_neutral(&self) -> bool {
        self.category.is_empty() || self.category == NEUTRAL_CATEGORY
    }
}
