use memory_trainer_lib::hints::PreRoundSummary;
use memory_trainer_lib::levels::LevelConfig;
use memory_trainer_lib::session::{FeedbackKind, GameSession, GameStatus, GameSummary, ModalContent};

/// ANSI color codes
#[allow(dead_code)]
pub struct Color;

#[allow(dead_code)]
impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const MAGENTA: &str = "\x1b[35m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

/// Wrap `text` in `color` when colors are enabled
pub fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

/// Border color for a card category
pub fn category_color(category: &str) -> &'static str {
    match category {
        "animals" => Color::YELLOW,
        "nature" => Color::GREEN,
        "objects" => Color::BLUE,
        "abstract" => Color::MAGENTA,
        _ => Color::GRAY,
    }
}

/// Render the board as a grid of numbered slots.
/// Face-down cards show their 1-based position; face-up and matched cards
/// show their symbol.
pub fn render_board(session: &GameSession, use_color: bool) -> String {
    let columns = board_columns(session.deck.len());
    let mut lines = Vec::new();
    let mut row = Vec::new();

    for (index, card) in session.deck.iter().enumerate() {
        let matched = session.matched_pairs.contains(&card.pair_id);
        let slot = if matched {
            paint(&format!("[{}]", card.value), Color::DIM, use_color)
        } else if session.is_revealed(&card.id) {
            paint(&format!("<{}>", card.value), category_color(&card.category), use_color)
        } else {
            format!("[{:>2}]", index + 1)
        };
        row.push(slot);

        if row.len() == columns {
            lines.push(row.join(" "));
            row.clear();
        }
    }
    if !row.is_empty() {
        lines.push(row.join(" "));
    }

    lines.join("\n")
}

fn board_columns(cards: usize) -> usize {
    match cards {
        0..=16 => 4,
        17..=24 => 6,
        _ => 8,
    }
}

/// One-line status: level, state, time, moves, score
pub fn render_status(level: &LevelConfig, session: &GameSession, use_color: bool) -> String {
    let time = match level.time_remaining(session.elapsed_seconds) {
        Some(left) => format!("{}s ({}s left)", session.elapsed_seconds, left),
        None => format!("{}s", session.elapsed_seconds),
    };

    let status = match session.status {
        GameStatus::InProgress => paint(session.status.as_str(), Color::GREEN, use_color),
        GameStatus::Paused => paint(session.status.as_str(), Color::YELLOW, use_color),
        _ => paint(session.status.as_str(), Color::CYAN, use_color),
    };

    format!(
        "{} | {} | time {} | moves {} | pairs {}/{} | score {}",
        paint(&level.name, Color::BOLD, use_color),
        status,
        time,
        session.moves,
        session.matched_pairs.len(),
        session.total_pairs(),
        session.score
    )
}

/// Feedback messages, oldest first
pub fn render_feedback(session: &GameSession, use_color: bool) -> Vec<String> {
    session
        .feedback_messages
        .iter()
        .map(|message| {
            let color = match message.kind {
                FeedbackKind::Success => Color::GREEN,
                FeedbackKind::Tip => Color::CYAN,
                FeedbackKind::Encouragement => Color::MAGENTA,
            };
            paint(&format!("* {}", message.text), color, use_color)
        })
        .collect()
}

pub fn render_modal(content: &ModalContent, use_color: bool) -> String {
    match content {
        ModalContent::Pause { level_id } => format!(
            "{}\nLevel {} is paused. Enter 'p' to resume, 'r' to restart or 'q' to quit.",
            paint("Paused", Color::BOLD, use_color),
            level_id
        ),
        ModalContent::Summary(summary) => render_summary(summary, use_color),
        ModalContent::PreRound(summary) => {
            let mut text = render_pre_round(summary, use_color);
            text.push_str("\nEnter 'h' to start.");
            text
        }
    }
}

pub fn render_summary(summary: &GameSummary, use_color: bool) -> String {
    format!(
        "{}\n  Time: {}s\n  Moves: {}\n  Score: {}\n  Category bonuses: {}",
        paint("Level complete!", Color::BOLD, use_color),
        summary.elapsed_seconds,
        summary.moves,
        summary.score,
        summary.category_bonus_count
    )
}

pub fn render_pre_round(summary: &PreRoundSummary, use_color: bool) -> String {
    let mut lines = vec![paint(
        &format!("Get ready: {} pairs", summary.total_pairs),
        Color::BOLD,
        use_color,
    )];

    for group in &summary.category_groups {
        let mut symbols = group.cards.clone();
        symbols.sort();
        symbols.dedup();
        lines.push(format!(
            "  {} {}",
            paint(&format!("{:<9}", group.category), category_color(&group.category), use_color),
            symbols.join(" ")
        ));
        lines.push(format!("            {}", group.hint));
    }

    lines.push(summary.mnemonic_suggestion.clone());
    lines.join("\n")
}
