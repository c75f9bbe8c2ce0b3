//! Hint lookups
//!
//! Static tables keyed by symbol, with a generic fallback for symbols that
//! have no dedicated hint.

use super::models::*;
use crate::deck::{CardData, NEUTRAL_CATEGORY};

const MULTI_GROUP_SUGGESTION: &str =
    "Tip: group the cards by category in your head. Each group has its own border color!";

const SINGLE_GROUP_SUGGESTION: &str =
    "Tip: build a story or mental journey that links every symbol in a memorable sequence.";

fn animal_hint(symbol: &str) -> Option<&'static str> {
    let text = match symbol {
        "🦋" => "Imagine a butterfly dancing in your memory palace",
        "🐉" => "Picture a dragon guarding this card in your mind",
        "🦅" => "Visualize an eagle soaring to remember this position",
        "🦊" => "Think of a clever fox hiding in this location",
        "🐺" => "A wolf howling at the moon marks this spot",
        "🦁" => "A majestic lion stands guard here",
        "🐯" => "A tiger prowls through this mental space",
        "🐘" => "An elephant never forgets - place it here mentally",
        _ => return None,
    };
    Some(text)
}

fn nature_hint(symbol: &str) -> Option<&'static str> {
    let text = match symbol {
        "🌟" => "A bright star illuminates this memory point",
        "🌸" => "A flower blooms in this corner of your mind",
        "🌊" => "Ocean waves wash over this location",
        "🌈" => "A rainbow arcs across this mental position",
        _ => return None,
    };
    Some(text)
}

fn object_hint(symbol: &str) -> Option<&'static str> {
    let text = match symbol {
        "🎯" => "Target locked on this memory location",
        "💎" => "A precious gem marks this valuable spot",
        "🍎" => "A crisp apple sits at this position",
        "🎨" => "Paint this location with vivid colors",
        "🎭" => "Drama unfolds at this memory stage",
        "🏆" => "A trophy stands proudly in this place",
        "🔮" => "Crystal ball reveals this position",
        "🚀" => "Launch into memory from this point",
        _ => return None,
    };
    Some(text)
}

fn category_hint(category: &str) -> &'static str {
    match category {
        "animals" => "🐾 Animals: tell a story that connects these creatures",
        "nature" => "🌿 Nature: picture one landscape that holds all of these",
        "objects" => "🎁 Objects: imagine these items together in one physical place",
        "abstract" => "✨ Abstract: connect these symbols through a feeling",
        _ => "⚪ Mixed items: use whatever technique fits each one",
    }
}

/// Generate a mnemonic hint for a symbol
pub fn generate_mnemonic_hint(symbol: &str, category: &str) -> MnemonicHint {
    let found = animal_hint(symbol)
        .or_else(|| nature_hint(symbol))
        .or_else(|| object_hint(symbol));

    match found {
        Some(text) => MnemonicHint {
            text: text.to_string(),
            kind: match category {
                "animals" => HintKind::Visual,
                "nature" => HintKind::Story,
                _ => HintKind::Association,
            },
        },
        None => MnemonicHint {
            text: format!("Associate {} with a memorable location or story", symbol),
            kind: HintKind::Association,
        },
    }
}

/// Group cards by category, keeping first-seen order and dropping groups
/// with fewer than two cards
pub fn generate_category_groups(deck: &[CardData]) -> Vec<CategoryGroup> {
    let mut groups: Vec<(String, Vec<String>)> = Vec::new();

    for card in deck {
        let category = if card.category.is_empty() {
            NEUTRAL_CATEGORY
        } else {
            card.category.as_str()
        };

        match groups.iter_mut().find(|(name, _)| name == category) {
            Some((_, values)) => values.push(card.value.clone()),
            None => groups.push((category.to_string(), vec![card.value.clone()])),
        }
    }

    groups
        .into_iter()
        .filter(|(_, cards)| cards.len() >= 2)
        .map(|(category, cards)| CategoryGroup {
            hint: category_hint(&category).to_string(),
            category,
            cards,
        })
        .collect()
}

/// Build the pre-round summary for a deck
pub fn generate_pre_round_summary(deck: &[CardData]) -> PreRoundSummary {
    let category_groups = generate_category_groups(deck);
    let mnemonic_suggestion = if category_groups.len() > 1 {
        MULTI_GROUP_SUGGESTION
    } else {
        SINGLE_GROUP_SUGGESTION
    };

    PreRoundSummary {
        total_pairs: deck.len() / 2,
        category_groups,
        mnemonic_suggestion: mnemonic_suggestion.to_string(),
    }
}
