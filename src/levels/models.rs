//! Data models for level definitions

use serde::{Deserialize, Serialize};

/// A cognitive hook that changes how a level's deck is built or played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CognitiveHook {
    /// Previously missed pairs are tracked for later review
    SpacedRepetition,
    /// Cards carry a mnemonic strategy cue
    MnemonicCue,
    /// Cards carry a loci (memory palace) position hint
    LociEnvironment,
    /// Pairs are assigned round-robin to categories worth a bonus
    CategoricalGrouping,
    /// Reserved for difficulty tuning; has no effect on generation
    AdaptiveDifficulty,
}

impl CognitiveHook {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SpacedRepetition => "spaced-repetition",
            Self::MnemonicCue => "mnemonic-cue",
            Self::LociEnvironment => "loci-environment",
            Self::CategoricalGrouping => "categorical-grouping",
            Self::AdaptiveDifficulty => "adaptive-difficulty",
        }
    }
}

/// Static definition of a playable level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelConfig {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Number of pairs in the deck (the deck holds twice as many cards)
    pub card_pairs: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_time_limit_sec: Option<u32>,
    #[serde(default)]
    pub difficulty_hooks: Vec<CognitiveHook>,
    #[serde(default)]
    pub objectives: Vec<String>,
}

impl LevelConfig {
    pub fn has_hook(&self, hook: CognitiveHook) -> bool {
        self.difficulty_hooks.contains(&hook)
    }

    /// Seconds left against the level's time limit, if it has one
    pub fn time_remaining(&self, elapsed_seconds: u32) -> Option<u32> {
        self.base_time_limit_sec
            .map(|limit| limit.saturating_sub(elapsed_seconds))
    }
}
