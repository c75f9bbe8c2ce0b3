//! Data models for a game session

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::feedback::FeedbackQueue;
use crate::deck::CardData;
use crate::hints::PreRoundSummary;

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameStatus {
    Idle,
    Countdown,
    InProgress,
    Paused,
    Completed,
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::Idle
    }
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Countdown => "countdown",
            Self::InProgress => "in-progress",
            Self::Paused => "paused",
            Self::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FeedbackKind {
    Success,
    Tip,
    Encouragement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackMessage {
    pub id: Uuid,
    pub text: String,
    pub kind: FeedbackKind,
    /// Unix milliseconds
    pub timestamp: i64,
}

impl FeedbackMessage {
    pub fn new(text: String, kind: FeedbackKind, timestamp: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
            kind,
            timestamp,
        }
    }
}

/// Totals shown when every pair has been matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSummary {
    pub elapsed_seconds: u32,
    pub moves: u32,
    pub score: u32,
    pub category_bonus_count: u32,
}

/// What a dialog presents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "camelCase")]
pub enum ModalContent {
    #[serde(rename_all = "camelCase")]
    Pause { level_id: String },
    Summary(GameSummary),
    PreRound(PreRoundSummary),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModalState {
    pub is_open: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<ModalContent>,
}

impl ModalState {
    pub fn open(content: ModalContent) -> Self {
        Self {
            is_open: true,
            content: Some(content),
        }
    }

    pub fn closed() -> Self {
        Self::default()
    }
}

/// Result of a `select_card` intent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Nothing changed (re-entrant, duplicate, unknown or already matched)
    Ignored,
    /// First card of a pair is face-up
    Revealed,
    Matched { pair_id: String, category_bonus: bool },
    /// The cards differ; they flip back once the reveal timer fires
    Mismatched { failure_count: u32 },
    /// The last pair was matched
    Completed(GameSummary),
}

/// Mutable state of one game, owned by the session engine
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSession {
    pub level_id: String,
    pub deck: Vec<CardData>,
    /// Face-up cards awaiting resolution, in reveal order
    pub revealed_card_ids: Vec<String>,
    pub matched_pairs: BTreeSet<String>,
    /// Zero to two card ids currently being evaluated
    pub selected_cards: Vec<String>,
    pub moves: u32,
    pub elapsed_seconds: u32,
    pub score: u32,
    pub category_bonus_count: u32,
    pub status: GameStatus,
    pub is_checking: bool,
    pub timer_started: bool,
    /// Session-local failure counts keyed by the sorted pair ids involved
    pub failed_pairs: BTreeMap<String, u32>,
    pub feedback_messages: FeedbackQueue,
}

impl GameSession {
    pub fn new(level_id: String, deck: Vec<CardData>, feedback_capacity: usize) -> Self {
        Self {
            level_id,
            deck,
            revealed_card_ids: Vec::new(),
            matched_pairs: BTreeSet::new(),
            selected_cards: Vec::new(),
            moves: 0,
            elapsed_seconds: 0,
            score: 0,
            category_bonus_count: 0,
            status: GameStatus::Idle,
            is_checking: false,
            timer_started: false,
            failed_pairs: BTreeMap::new(),
            feedback_messages: FeedbackQueue::new(feedback_capacity),
        }
    }

    pub fn card(&self, card_id: &str) -> Option<&CardData> {
        self.deck.iter().find(|c| c.id == card_id)
    }

    pub fn total_pairs(&self) -> usize {
        self.deck.len() / 2
    }

    pub fn is_complete(&self) -> bool {
        !self.deck.is_empty() && self.matched_pairs.len() == self.total_pairs()
    }

    pub fn is_revealed(&self, card_id: &str) -> bool {
        self.revealed_card_ids.iter().any(|id| id == card_id)
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary {
            elapsed_seconds: self.elapsed_seconds,
            moves: self.moves,
            score: self.score,
            category_bonus_count: self.category_bonus_count,
        }
    }
}

/// Key for a pair of pair ids, independent of selection order
pub fn failure_key(first: &str, second: &str) -> String {
    if first <= second {
        format!("{}|{}", first, second)
    } else {
        format!("{}|{}", second, first)
    }
}
