//! Built-in levels
//!
//! Three tiers, each exercising a different set of cognitive hooks.

use super::models::{CognitiveHook, LevelConfig};

/// Create all built-in levels, in presentation order
pub fn all_levels() -> Vec<LevelConfig> {
    vec![
        create_focus_start_level(),
        create_adaptive_loop_level(),
        create_loci_journey_level(),
    ]
}

/// Find a built-in level by id
pub fn find_level(level_id: &str) -> Option<LevelConfig> {
    all_levels().into_iter().find(|level| level.id == level_id)
}

/// Resolve a requested level id, falling back to the first level when the
/// id is missing or unknown
pub fn resolve_level(requested: Option<&str>) -> LevelConfig {
    let mut levels = all_levels();

    if let Some(id) = requested {
        if let Some(pos) = levels.iter().position(|level| level.id == id) {
            return levels.swap_remove(pos);
        }
        log::warn!("Unknown level '{}', falling back to '{}'", id, levels[0].id);
    }

    levels.swap_remove(0)
}

/// Level 1 - slow introduction with simple pairs and mnemonic cues
fn create_focus_start_level() -> LevelConfig {
    LevelConfig {
        id: "focus-start".to_string(),
        name: "Level 1 · Focused Attention".to_string(),
        description: "Introduces simple pairs at a slow pace to build pattern formation and selective attention.".to_string(),
        card_pairs: 8,
        base_time_limit_sec: Some(180),
        difficulty_hooks: vec![CognitiveHook::MnemonicCue],
        objectives: vec!["15 matches".to_string(), "0 hints".to_string()],
    }
}

/// Level 2 - previously missed pairs come back at widening intervals
fn create_adaptive_loop_level() -> LevelConfig {
    LevelConfig {
        id: "adaptive-loop".to_string(),
        name: "Level 2 · Spaced Repetition".to_string(),
        description: "Reintroduces previously seen pairs at gradual intervals to reinforce short-term recall.".to_string(),
        card_pairs: 12,
        base_time_limit_sec: Some(210),
        difficulty_hooks: vec![
            CognitiveHook::SpacedRepetition,
            CognitiveHook::CategoricalGrouping,
        ],
        objectives: vec!["18 matches".to_string(), "-10% time".to_string()],
    }
}

/// Level 3 - spatial memory training with loci positions
fn create_loci_journey_level() -> LevelConfig {
    LevelConfig {
        id: "loci-journey".to_string(),
        name: "Level 3 · Journey of Loci".to_string(),
        description: "Simulates visual environments to train spatial and narrative memory.".to_string(),
        card_pairs: 16,
        base_time_limit_sec: Some(240),
        difficulty_hooks: vec![
            CognitiveHook::LociEnvironment,
            CognitiveHook::AdaptiveDifficulty,
        ],
        objectives: vec!["Complete map".to_string(), "Real-time feedback".to_string()],
    }
}
