use anyhow::Result;

use memory_trainer_lib::levels::all_levels;

use crate::app::App;
use crate::render::terminal::{paint, Color};
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let levels = all_levels();
    let due = app.repetition().due_pairs_now();

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = levels
                .iter()
                .map(|level| {
                    let due_count = due.iter().filter(|p| p.belongs_to_level(&level.id)).count();
                    serde_json::json!({
                        "level": level,
                        "duePairs": due_count,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            for level in &levels {
                println!(
                    "{}  {}",
                    paint(&format!("{:<14}", level.id), Color::BOLD, use_color),
                    level.name
                );
                println!("    {}", level.description);

                let limit = level
                    .base_time_limit_sec
                    .map(|s| format!("{}s", s))
                    .unwrap_or_else(|| "none".to_string());
                println!("    {} pairs, time limit {}", level.card_pairs, limit);

                let hooks = level
                    .difficulty_hooks
                    .iter()
                    .map(|h| h.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                println!("    {}", paint(&format!("hooks: {}", hooks), Color::DIM, use_color));

                for objective in &level.objectives {
                    println!("    - {}", objective);
                }

                let due_count = due.iter().filter(|p| p.belongs_to_level(&level.id)).count();
                if due_count > 0 {
                    println!(
                        "    {}",
                        paint(&format!("{} pairs due for review", due_count), Color::CYAN, use_color)
                    );
                }
                println!();
            }
        }
    }

    Ok(())
}
