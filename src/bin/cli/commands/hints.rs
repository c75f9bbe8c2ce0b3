use std::collections::BTreeSet;

use anyhow::Result;

use memory_trainer_lib::hints::{generate_mnemonic_hint, generate_pre_round_summary};

use crate::app::App;
use crate::commands::deck;
use crate::render::terminal::{self, paint, Color};
use crate::OutputFormat;

pub fn run(
    app: &App,
    level_id: &str,
    seed: Option<u64>,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let deck = deck::generate(app, level_id, seed)?;
    let summary = generate_pre_round_summary(&deck);

    // One hint per pair, in deck order
    let mut seen = BTreeSet::new();
    let hints: Vec<_> = deck
        .iter()
        .filter(|card| seen.insert(card.pair_id.clone()))
        .map(|card| (card, generate_mnemonic_hint(&card.value, &card.category)))
        .collect();

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "summary": summary,
                "hints": hints.iter().map(|(card, hint)| serde_json::json!({
                    "pairId": card.pair_id,
                    "value": card.value,
                    "hint": hint,
                })).collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("{}", terminal::render_pre_round(&summary, use_color));
            println!();

            for (card, hint) in &hints {
                let kind = format!("{:?}", hint.kind).to_lowercase();
                println!(
                    "  {}  {} {}",
                    card.value,
                    hint.text,
                    paint(&format!("({})", kind), Color::DIM, use_color)
                );
            }
        }
    }

    Ok(())
}
