//! Data models for hints

use serde::{Deserialize, Serialize};

/// The memory technique a hint leans on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HintKind {
    Visual,
    Story,
    Association,
    Category,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MnemonicHint {
    pub text: String,
    pub kind: HintKind,
}

/// Cards sharing a category, with a grouping hint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryGroup {
    pub category: String,
    /// Card values in deck order (each pair appears twice)
    pub cards: Vec<String>,
    pub hint: String,
}

/// Everything shown before a round starts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreRoundSummary {
    pub category_groups: Vec<CategoryGroup>,
    pub total_pairs: usize,
    pub mnemonic_suggestion: String,
}
