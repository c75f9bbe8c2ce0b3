use anyhow::Result;
use chrono::{Local, TimeZone};

use memory_trainer_lib::repetition::format_interval;

use crate::app::App;
use crate::render::terminal::{paint, Color};
use crate::OutputFormat;

pub fn run(app: &App, due_only: bool, clear: bool, format: &OutputFormat, use_color: bool) -> Result<()> {
    let repetition = app.repetition();

    if clear {
        repetition.clear();
        match format {
            OutputFormat::Json => println!("{}", serde_json::json!({ "cleared": true })),
            OutputFormat::Plain => println!("Cleared review data in {}", app.data_dir.display()),
        }
        return Ok(());
    }

    let now = chrono::Utc::now().timestamp_millis();
    let pairs = if due_only {
        repetition.get_due_pairs(now)
    } else {
        repetition.all_pairs()
    };

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&pairs)?);
        }
        OutputFormat::Plain => {
            if pairs.is_empty() {
                println!("No difficult pairs tracked.");
                return Ok(());
            }

            let id_width = pairs.iter().map(|p| p.pair_id.len()).max().unwrap_or(4).max(4);
            println!(
                "{:<width$}  {:<6}  {:<9}  {:>8}  {:>10}  Next review",
                "Pair", "Symbol", "Category", "Failures", "Rehearsals",
                width = id_width
            );
            println!("{}", "\u{2500}".repeat(id_width + 60));

            for pair in &pairs {
                let next = if pair.is_due(now) {
                    paint("due now", Color::CYAN, use_color)
                } else {
                    let at = Local
                        .timestamp_millis_opt(pair.next_review_timestamp)
                        .single()
                        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
                        .unwrap_or_default();
                    format!("in {} ({})", format_interval(pair.next_review_timestamp - now), at)
                };

                println!(
                    "{:<width$}  {:<6}  {:<9}  {:>8}  {:>10}  {}",
                    pair.pair_id,
                    pair.value,
                    pair.category,
                    pair.failure_count,
                    pair.rehearsal_count,
                    next,
                    width = id_width
                );
            }

            println!("\n{} pairs tracked", pairs.len());
        }
    }

    Ok(())
}
