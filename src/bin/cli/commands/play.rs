use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;

use memory_trainer_lib::levels::resolve_level;
use memory_trainer_lib::session::{GameStatus, SelectOutcome, SessionEngine, TokioScheduler};

use crate::app::App;
use crate::render::terminal::{self, paint, Color};

type Engine = SessionEngine<TokioScheduler>;

const HELP: &str = "Enter a card number to flip it, 'p' to pause, 'r' to restart, 'q' to quit.";

enum Input {
    Redraw,
    Quiet,
    Quit,
}

/// Line-mode game loop: stdin intents, fired timers and a one-second ticker
/// are multiplexed onto a single engine.
pub async fn run(
    app: &App,
    level_id: Option<&str>,
    hints: bool,
    seed: Option<u64>,
    use_color: bool,
) -> Result<()> {
    let level = match level_id {
        Some(id) => app.find_level(id)?,
        None => resolve_level(None),
    };

    let mut config = app.engine_config(seed);
    config.gate_selection_on_status = true;
    if hints {
        config.pre_round_hints = true;
    }

    let (scheduler, mut timers) = TokioScheduler::new();
    let mut engine = SessionEngine::new(config, scheduler).with_repetition(app.repetition());
    engine
        .initialize_level(level)
        .context("Failed to start level")?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    println!("{}", paint(HELP, Color::DIM, use_color));
    draw(&engine, use_color);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read input")? else {
                    break;
                };
                match handle_input(&mut engine, line.trim()) {
                    Input::Redraw => draw(&engine, use_color),
                    Input::Quiet => {}
                    Input::Quit => break,
                }
            }
            Some(fired) = timers.recv() => {
                if engine.on_timer(fired) {
                    draw(&engine, use_color);
                }
            }
            _ = ticker.tick() => {
                if engine.should_tick() {
                    engine.increment_timer();
                }
            }
        }
    }

    log::debug!("Leaving level {} with status {}", engine.level().id, engine.status().as_str());
    Ok(())
}

fn handle_input(engine: &mut Engine, input: &str) -> Input {
    match input {
        "q" | "quit" => Input::Quit,
        "" => Input::Redraw,
        "?" | "help" => {
            println!("{}", HELP);
            Input::Quiet
        }
        "p" | "pause" => {
            engine.toggle_pause();
            Input::Redraw
        }
        "h" | "start" => {
            if !engine.dismiss_hints() {
                println!("Nothing to dismiss.");
            }
            Input::Redraw
        }
        "r" | "restart" => {
            if let Err(e) = engine.reset() {
                log::error!("Failed to restart level: {}", e);
                println!("Could not restart: {}", e);
            }
            Input::Redraw
        }
        other => match other.parse::<usize>() {
            Ok(position) => select_position(engine, position),
            Err(_) => {
                println!("Unknown command '{}'. {}", other, HELP);
                Input::Quiet
            }
        },
    }
}

fn select_position(engine: &mut Engine, position: usize) -> Input {
    let Some(card_id) = position
        .checked_sub(1)
        .and_then(|index| engine.deck().get(index))
        .map(|card| card.id.clone())
    else {
        println!("No card at position {}.", position);
        return Input::Quiet;
    };

    match engine.select_card(&card_id) {
        SelectOutcome::Ignored => {
            match engine.status() {
                GameStatus::Countdown => println!("Wait for the countdown."),
                GameStatus::Paused => println!("The game is paused."),
                _ => println!("That card cannot be flipped right now."),
            }
            Input::Quiet
        }
        SelectOutcome::Mismatched { .. } => {
            println!("No match.");
            Input::Redraw
        }
        _ => Input::Redraw,
    }
}

fn draw(engine: &Engine, use_color: bool) {
    let session = engine.session();

    println!();
    println!("{}", terminal::render_status(engine.level(), session, use_color));

    if let Some(content) = engine.modal().content.as_ref().filter(|_| engine.modal().is_open) {
        println!("{}", terminal::render_modal(content, use_color));
        if session.status != GameStatus::Completed {
            return;
        }
    } else if session.status == GameStatus::Countdown {
        println!("{}", paint("Get ready...", Color::YELLOW, use_color));
    }

    println!("{}", terminal::render_board(session, use_color));
    for line in terminal::render_feedback(session, use_color) {
        println!("{}", line);
    }
}
