use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

use memory_trainer_lib::deck::{build_deck, CardData};

use crate::app::App;
use crate::render::terminal::{category_color, paint, Color};
use crate::OutputFormat;

/// Build a deck for `level_id`, seeded when a seed is given
pub fn generate(app: &App, level_id: &str, seed: Option<u64>) -> Result<Vec<CardData>> {
    let level = app.find_level(level_id)?;
    let mut rng = match app.engine_config(seed).seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    build_deck(&level, &mut rng).context(format!("Failed to generate deck for '{}'", level.id))
}

pub fn run(
    app: &App,
    level_id: &str,
    seed: Option<u64>,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let deck = generate(app, level_id, seed)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&deck)?);
        }
        OutputFormat::Plain => {
            let id_width = deck.iter().map(|c| c.id.len()).max().unwrap_or(4).max(4);

            println!("{:>3}  {:<width$}  {:<6}  {:<9}  Cue", "#", "Card", "Symbol", "Category", width = id_width);
            println!("{}", "\u{2500}".repeat(id_width + 36));

            for (index, card) in deck.iter().enumerate() {
                let cue = card
                    .metadata
                    .cues
                    .visual_hint
                    .as_deref()
                    .or(card.metadata.cues.mnemonic_strategy.as_deref())
                    .unwrap_or("");
                println!(
                    "{:>3}  {:<width$}  {:<6}  {}  {}",
                    index + 1,
                    card.id,
                    card.value,
                    paint(&format!("{:<9}", card.category), category_color(&card.category), use_color),
                    paint(cue, Color::DIM, use_color),
                    width = id_width
                );
            }

            println!("\n{} cards, {} pairs", deck.len(), deck.len() / 2);
        }
    }

    Ok(())
}
