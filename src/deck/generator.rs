//! Deck generator
//!
//! Builds two cards per symbol, tags them according to the level's hooks and
//! shuffles the result so that every ordering is equally likely.

use rand::Rng;
use thiserror::Error;

use super::models::*;
use crate::levels::{find_level, CognitiveHook, LevelConfig};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeckError {
    #[error("Level configuration not found: {0}")]
    ConfigNotFound(String),

    #[error("Not enough symbols in pool ({available}) for {required} pairs")]
    InsufficientSymbols { required: usize, available: usize },
}

pub type Result<T> = std::result::Result<T, DeckError>;

const BASIC_SYMBOLS: &[&str] = &["🌟", "🎯", "🔥", "💎", "🌸", "🍎", "🎨", "⚡"];

const INTERMEDIATE_SYMBOLS: &[&str] = &[
    "🦋", "🌊", "🎭", "🎪", "🎬", "🎸", "🎮", "🎲", "🏆", "🔮", "🌈", "🚀",
];

const ADVANCED_SYMBOLS: &[&str] = &[
    "🦄", "🐉", "🦅", "🦊", "🐺", "🦁", "🐯", "🐘", "🦒", "🦜", "🦩", "🦚", "🦢", "🦫", "🦦", "🦥",
];

/// Labels assigned round-robin when a level uses categorical grouping
pub const CATEGORY_LABELS: [&str; 4] = ["animals", "nature", "objects", "abstract"];

const ANIMAL_SYMBOLS: &[&str] = &[
    "🦋", "🐉", "🦅", "🦊", "🐺", "🦁", "🐯", "🐘", "🦒", "🦜", "🦩", "🦚", "🦢", "🦫", "🦦", "🦥",
];

const NATURE_SYMBOLS: &[&str] = &["🌟", "🌸", "🌊", "🌈"];

const OBJECT_SYMBOLS: &[&str] = &[
    "🎯", "💎", "🍎", "🎨", "🎭", "🎪", "🎬", "🎸", "🎮", "🎲", "🏆", "🔮", "🚀",
];

/// Select the symbol pool for a level tier. Unknown levels use the basic pool.
fn symbol_pool(level_id: &str) -> &'static [&'static str] {
    match level_id {
        "adaptive-loop" => INTERMEDIATE_SYMBOLS,
        "loci-journey" => ADVANCED_SYMBOLS,
        _ => BASIC_SYMBOLS,
    }
}

/// Generate a shuffled deck for a built-in level
pub fn generate_deck(level_id: &str) -> Result<Vec<CardData>> {
    generate_deck_with_rng(level_id, &mut rand::thread_rng())
}

/// Generate a shuffled deck for a built-in level using the given RNG
pub fn generate_deck_with_rng<R: Rng + ?Sized>(level_id: &str, rng: &mut R) -> Result<Vec<CardData>> {
    let config =
        find_level(level_id).ok_or_else(|| DeckError::ConfigNotFound(level_id.to_string()))?;
    build_deck(&config, rng)
}

/// Build a shuffled deck from a level definition
pub fn build_deck<R: Rng + ?Sized>(config: &LevelConfig, rng: &mut R) -> Result<Vec<CardData>> {
    let pool = symbol_pool(&config.id);
    if config.card_pairs > pool.len() {
        return Err(DeckError::InsufficientSymbols {
            required: config.card_pairs,
            available: pool.len(),
        });
    }

    let categorical = config.has_hook(CognitiveHook::CategoricalGrouping);
    let mnemonic = config.has_hook(CognitiveHook::MnemonicCue);
    let loci = config.has_hook(CognitiveHook::LociEnvironment);
    let spaced = config.has_hook(CognitiveHook::SpacedRepetition);

    let mut cards = Vec::with_capacity(config.card_pairs * 2);
    for (pair_index, symbol) in pool.iter().take(config.card_pairs).enumerate() {
        let pair_id = format!("{}-pair-{}", config.id, pair_index);
        let category = if categorical {
            CATEGORY_LABELS[pair_index % CATEGORY_LABELS.len()]
        } else {
            NEUTRAL_CATEGORY
        };

        let metadata = CardMetadata {
            cues: CardCues {
                visual_hint: loci.then(|| format!("loci-position-{}", pair_index)),
                auditory_hint: None,
                mnemonic_strategy: mnemonic.then(|| format!("mnemonic-{}-{}", symbol, pair_index)),
            },
            tags: infer_card_tags(symbol),
            rehearsal_history: spaced.then(Vec::new),
        };

        let base = CardData {
            id: format!("{}-a", pair_id),
            value: symbol.to_string(),
            pair_id: pair_id.clone(),
            category: category.to_string(),
            metadata,
        };
        let mirror = CardData {
            id: format!("{}-b", pair_id),
            ..base.clone()
        };

        cards.push(base);
        cards.push(mirror);
    }

    fisher_yates_shuffle(&mut cards, rng);
    log::debug!("Generated {} cards for level {}", cards.len(), config.id);

    Ok(cards)
}

/// Shuffle in place: walk from the last index down to 1 and swap each slot
/// with a uniformly chosen index in `[0, i]`.
pub fn fisher_yates_shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Infer semantic tags from a symbol
fn infer_card_tags(symbol: &str) -> Vec<CardTag> {
    let mut tags = vec![CardTag::Symbol];

    if ANIMAL_SYMBOLS.contains(&symbol) || OBJECT_SYMBOLS.contains(&symbol) {
        tags.push(CardTag::Concept);
    } else if NATURE_SYMBOLS.contains(&symbol) {
        tags.push(CardTag::Color);
        tags.push(CardTag::Concept);
    }

    tags
}
