//! Session engine
//!
//! Owns one `GameSession` and applies intents to it:
//!
//! ```text
//! idle -> countdown -> in-progress <-> paused
//!                      in-progress  -> completed
//! ```
//!
//! `countdown -> in-progress` is the only automatic transition. It fires from
//! the countdown timer, or from `dismiss_hints` when the pre-round hint screen
//! holds the countdown.
//!
//! At most one countdown timer and one mismatch timer are live at a time.
//! Starting a new level or resetting cancels both before the session is
//! replaced, and `on_timer` drops any fired handle that is no longer live.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::models::*;
use super::timer::{FiredTimer, Scheduler, TimerEvent, TimerHandle};
use crate::clock::{Clock, SystemClock};
use crate::config::EngineConfig;
use crate::deck::{build_deck, CardData, DeckError};
use crate::hints::generate_pre_round_summary;
use crate::levels::{resolve_level, CognitiveHook, LevelConfig};
use crate::repetition::{ReviewUpdate, SpacedRepetitionStore};

pub struct SessionEngine<S: Scheduler> {
    config: EngineConfig,
    scheduler: S,
    repetition: SpacedRepetitionStore,
    clock: Arc<dyn Clock>,
    rng: StdRng,
    level: LevelConfig,
    session: GameSession,
    modal: ModalState,
    countdown_timer: Option<TimerHandle>,
    mismatch_timer: Option<TimerHandle>,
}

impl<S: Scheduler> SessionEngine<S> {
    /// Create an idle engine with review tracking disabled
    pub fn new(config: EngineConfig, scheduler: S) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let level = resolve_level(None);
        let session = GameSession::new(level.id.clone(), Vec::new(), config.feedback_capacity);

        Self {
            config,
            scheduler,
            repetition: SpacedRepetitionStore::disabled(),
            clock: Arc::new(SystemClock),
            rng,
            level,
            session,
            modal: ModalState::closed(),
            countdown_timer: None,
            mismatch_timer: None,
        }
    }

    pub fn with_repetition(mut self, repetition: SpacedRepetitionStore) -> Self {
        self.repetition = repetition;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    // ==================== Presentation ====================

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn deck(&self) -> &[CardData] {
        &self.session.deck
    }

    pub fn modal(&self) -> &ModalState {
        &self.modal
    }

    pub fn level(&self) -> &LevelConfig {
        &self.level
    }

    pub fn status(&self) -> GameStatus {
        self.session.status
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn repetition(&self) -> &SpacedRepetitionStore {
        &self.repetition
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Whether the external one-second ticker should call `increment_timer`
    pub fn should_tick(&self) -> bool {
        self.session.status == GameStatus::InProgress && self.session.timer_started
    }

    /// Whether a mismatched pair is waiting to flip back
    pub fn has_pending_mismatch(&self) -> bool {
        self.mismatch_timer.is_some()
    }

    /// Whether the countdown is held on the pre-round hint screen
    pub fn is_hint_gate_active(&self) -> bool {
        self.session.status == GameStatus::Countdown
            && self.countdown_timer.is_none()
            && matches!(self.modal.content, Some(ModalContent::PreRound(_)))
    }

    // ==================== Lifecycle ====================

    /// Start a level with a freshly generated deck.
    ///
    /// On a deck error the current session is left untouched.
    pub fn initialize_level(&mut self, level: LevelConfig) -> Result<(), DeckError> {
        let deck = build_deck(&level, &mut self.rng)?;

        self.cancel_timers();
        self.session = GameSession::new(level.id.clone(), deck, self.config.feedback_capacity);
        self.session.status = GameStatus::Countdown;
        self.modal = ModalState::closed();
        self.level = level;

        log::info!(
            "Initialized level {} with {} pairs",
            self.level.id,
            self.session.total_pairs()
        );

        let due = self
            .repetition
            .due_pairs_for_level(&self.level.id, self.clock.now_millis());
        if !due.is_empty() {
            let noun = if due.len() == 1 { "pair is" } else { "pairs are" };
            self.push_feedback(
                format!("{} difficult {} due for review. Watch for them!", due.len(), noun),
                FeedbackKind::Tip,
            );
        }

        self.begin_countdown();
        Ok(())
    }

    /// Restart the current level with a new shuffle
    pub fn reset(&mut self) -> Result<(), DeckError> {
        log::debug!("Resetting level {}", self.level.id);
        self.initialize_level(self.level.clone())
    }

    fn begin_countdown(&mut self) {
        let gated = self.config.pre_round_hints
            && (self.level.has_hook(CognitiveHook::MnemonicCue)
                || self.level.has_hook(CognitiveHook::CategoricalGrouping));

        if gated {
            let summary = generate_pre_round_summary(&self.session.deck);
            self.modal = ModalState::open(ModalContent::PreRound(summary));
        } else {
            let handle = self
                .scheduler
                .schedule(self.config.countdown_delay(), TimerEvent::CountdownElapsed);
            self.countdown_timer = Some(handle);
        }
    }

    /// Close the pre-round hint screen and start play.
    /// Returns false when no hint screen is holding the countdown.
    pub fn dismiss_hints(&mut self) -> bool {
        if !self.is_hint_gate_active() {
            return false;
        }

        self.modal = ModalState::closed();
        self.session.status = GameStatus::InProgress;
        true
    }

    fn cancel_timers(&mut self) {
        if let Some(handle) = self.countdown_timer.take() {
            self.scheduler.cancel(handle);
        }
        if let Some(handle) = self.mismatch_timer.take() {
            self.scheduler.cancel(handle);
        }
    }

    /// Apply a fired timer. Returns false if the timer was stale.
    pub fn on_timer(&mut self, fired: FiredTimer) -> bool {
        match fired.event {
            TimerEvent::CountdownElapsed if self.countdown_timer == Some(fired.handle) => {
                self.countdown_timer = None;
                if self.session.status == GameStatus::Countdown {
                    self.session.status = GameStatus::InProgress;
                }
                true
            }
            TimerEvent::MismatchResolved if self.mismatch_timer == Some(fired.handle) => {
                self.mismatch_timer = None;
                self.resolve_mismatch();
                true
            }
            _ => {
                log::debug!("Ignoring stale timer {:?}", fired);
                false
            }
        }
    }

    // ==================== Intents ====================

    pub fn set_status(&mut self, status: GameStatus) {
        if self.session.status == GameStatus::Countdown && status != GameStatus::Countdown {
            if let Some(handle) = self.countdown_timer.take() {
                self.scheduler.cancel(handle);
            }
        }

        log::debug!("Status {} -> {}", self.session.status.as_str(), status.as_str());
        self.session.status = status;
    }

    pub fn set_modal(&mut self, modal: ModalState) {
        self.modal = modal;
    }

    /// Pause an in-progress game and show the pause dialog.
    ///
    /// A pending mismatch timer keeps running and still resolves while paused.
    pub fn pause(&mut self) -> bool {
        if self.session.status != GameStatus::InProgress {
            return false;
        }

        self.set_status(GameStatus::Paused);
        self.modal = ModalState::open(ModalContent::Pause {
            level_id: self.level.id.clone(),
        });
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.session.status != GameStatus::Paused {
            return false;
        }

        self.set_status(GameStatus::InProgress);
        self.modal = ModalState::closed();
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.session.status {
            GameStatus::Paused => self.resume(),
            _ => self.pause(),
        }
    }

    pub fn increment_timer(&mut self) {
        self.session.elapsed_seconds += 1;
    }

    /// Turn a card face-up and, on the second card, evaluate the pair
    pub fn select_card(&mut self, card_id: &str) -> SelectOutcome {
        if self.session.is_checking || self.session.selected_cards.iter().any(|id| id == card_id) {
            return SelectOutcome::Ignored;
        }

        if self.config.gate_selection_on_status && self.session.status != GameStatus::InProgress {
            log::debug!("Ignoring selection of {} while {}", card_id, self.session.status.as_str());
            return SelectOutcome::Ignored;
        }

        let Some(card) = self.session.card(card_id) else {
            log::warn!("Ignoring selection of unknown card {}", card_id);
            return SelectOutcome::Ignored;
        };
        if self.session.matched_pairs.contains(&card.pair_id) {
            return SelectOutcome::Ignored;
        }

        self.session.selected_cards.push(card_id.to_string());
        if !self.session.is_revealed(card_id) {
            self.session.revealed_card_ids.push(card_id.to_string());
        }
        self.session.timer_started = true;

        if self.session.selected_cards.len() < 2 {
            return SelectOutcome::Revealed;
        }

        self.session.is_checking = true;
        self.evaluate_selection()
    }

    // ==================== Matching ====================

    fn evaluate_selection(&mut self) -> SelectOutcome {
        let selected = |index: usize| {
            self.session
                .selected_cards
                .get(index)
                .and_then(|id| self.session.card(id))
                .cloned()
        };
        let (Some(first), Some(second)) = (selected(0), selected(1)) else {
            self.session.selected_cards.clear();
            self.session.is_checking = false;
            return SelectOutcome::Ignored;
        };

        if first.pair_id == second.pair_id {
            self.apply_match(&first, &second)
        } else {
            self.apply_mismatch(&first, &second)
        }
    }

    fn apply_match(&mut self, first: &CardData, second: &CardData) -> SelectOutcome {
        let pair_id = first.pair_id.clone();

        self.session.matched_pairs.insert(pair_id.clone());
        self.session.moves += 1;
        self.session.score += self.config.match_points;

        let category_bonus = !first.is_neutral() && first.category == second.category;
        if category_bonus {
            self.session.score += self.config.category_bonus_points;
            self.session.category_bonus_count += 1;
            self.push_feedback(
                format!(
                    "Category bonus! Matched a pair of {} (+{})",
                    first.category, self.config.category_bonus_points
                ),
                FeedbackKind::Success,
            );
        }

        self.session.selected_cards.clear();
        self.session.is_checking = false;

        if let ReviewUpdate::Graduated(id) = self.repetition.mark_pair_reviewed(&pair_id, true) {
            self.push_feedback(
                format!("{} has graduated from your review list!", first.value),
                FeedbackKind::Success,
            );
            log::debug!("Graduated {} during play", id);
        }

        if self.session.is_complete() {
            return SelectOutcome::Completed(self.complete());
        }

        SelectOutcome::Matched {
            pair_id,
            category_bonus,
        }
    }

    fn apply_mismatch(&mut self, first: &CardData, second: &CardData) -> SelectOutcome {
        let key = failure_key(&first.pair_id, &second.pair_id);
        let failure_count = {
            let count = self.session.failed_pairs.entry(key).or_insert(0);
            *count += 1;
            *count
        };

        if failure_count >= self.config.failure_threshold {
            for card in [first, second] {
                self.repetition.record_failed_pair(
                    &card.pair_id,
                    &card.value,
                    &card.category,
                    failure_count,
                    self.config.failure_threshold,
                );
            }
        }

        if failure_count == self.config.tip_after_failures {
            self.push_feedback(
                format!(
                    "Tip: {} and {} keep getting swapped. Link each one to a spot on the board.",
                    first.value, second.value
                ),
                FeedbackKind::Tip,
            );
        }

        let upcoming_move = self.session.moves + 1;
        let every = self.config.encouragement_every_moves;
        if every > 0 && upcoming_move % every == 0 {
            self.push_feedback(
                format!("{} moves in. Every attempt strengthens your recall!", upcoming_move),
                FeedbackKind::Encouragement,
            );
        }

        if let Some(stale) = self.mismatch_timer.take() {
            self.scheduler.cancel(stale);
        }
        let handle = self
            .scheduler
            .schedule(self.config.mismatch_delay(), TimerEvent::MismatchResolved);
        self.mismatch_timer = Some(handle);

        SelectOutcome::Mismatched { failure_count }
    }

    fn resolve_mismatch(&mut self) {
        self.session.revealed_card_ids.clear();
        self.session.selected_cards.clear();
        self.session.moves += 1;
        self.session.is_checking = false;
    }

    fn complete(&mut self) -> GameSummary {
        if let Some(handle) = self.countdown_timer.take() {
            self.scheduler.cancel(handle);
        }

        let summary = self.session.summary();
        self.session.status = GameStatus::Completed;
        self.modal = ModalState::open(ModalContent::Summary(summary));

        log::info!(
            "Completed level {} in {}s with {} moves, score {}",
            self.level.id,
            summary.elapsed_seconds,
            summary.moves,
            summary.score
        );
        summary
    }

    fn push_feedback(&mut self, text: String, kind: FeedbackKind) {
        let message = FeedbackMessage::new(text, kind, self.clock.now_millis());
        self.session.feedback_messages.push(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::levels::find_level;
    use crate::session::timer::ManualScheduler;
    use crate::storage::MemoryStore;
    use std::time::Duration;

    const START: i64 = 1_700_000_000_000;

    fn test_config() -> EngineConfig {
        EngineConfig {
            seed: Some(11),
            ..EngineConfig::default()
        }
    }

    fn create_engine(level_id: &str) -> SessionEngine<ManualScheduler> {
        let mut engine = SessionEngine::new(test_config(), ManualScheduler::new());
        engine.initialize_level(find_level(level_id).unwrap()).unwrap();
        engine
    }

    fn create_tracked_engine(
        level_id: &str,
    ) -> (SessionEngine<ManualScheduler>, Arc<MemoryStore>, Arc<ManualClock>) {
        let backend = Arc::new(MemoryStore::new());
        let clock = Arc::new(ManualClock::new(START));
        let repetition = SpacedRepetitionStore::new(backend.clone(), clock.clone());

        let mut engine = SessionEngine::new(test_config(), ManualScheduler::new())
            .with_repetition(repetition)
            .with_clock(clock.clone());
        engine.initialize_level(find_level(level_id).unwrap()).unwrap();
        (engine, backend, clock)
    }

    /// Advance virtual time and feed every fired timer back into the engine
    fn advance(engine: &mut SessionEngine<ManualScheduler>, millis: u64) {
        let fired = engine.scheduler_mut().advance(Duration::from_millis(millis));
        for timer in fired {
            engine.on_timer(timer);
        }
    }

    fn card_ids_for(engine: &SessionEngine<ManualScheduler>, pair_index: usize) -> (String, String) {
        let pair_id = format!("{}-pair-{}", engine.level().id, pair_index);
        (format!("{}-a", pair_id), format!("{}-b", pair_id))
    }

    fn start(engine: &mut SessionEngine<ManualScheduler>) {
        advance(engine, 2000);
        assert_eq!(engine.status(), GameStatus::InProgress);
    }

    #[test]
    fn test_initialize_enters_countdown() {
        let engine = create_engine("focus-start");
        let session = engine.session();

        assert_eq!(session.status, GameStatus::Countdown);
        assert_eq!(session.deck.len(), 16);
        assert_eq!(session.moves, 0);
        assert!(!session.timer_started);
        assert!(!engine.modal().is_open);
    }

    #[test]
    fn test_countdown_elapses_after_delay() {
        let mut engine = create_engine("focus-start");

        advance(&mut engine, 1999);
        assert_eq!(engine.status(), GameStatus::Countdown);

        advance(&mut engine, 1);
        assert_eq!(engine.status(), GameStatus::InProgress);
    }

    #[test]
    fn test_double_select_is_idempotent() {
        let mut engine = create_engine("focus-start");
        start(&mut engine);
        let (a, _) = card_ids_for(&engine, 0);

        assert_eq!(engine.select_card(&a), SelectOutcome::Revealed);
        assert_eq!(engine.select_card(&a), SelectOutcome::Ignored);

        assert_eq!(engine.session().selected_cards, vec![a.clone()]);
        assert_eq!(engine.session().revealed_card_ids, vec![a]);
        assert!(engine.session().timer_started);
    }

    #[test]
    fn test_match_scores_and_counts() {
        let mut engine = create_engine("focus-start");
        start(&mut engine);
        let (a, b) = card_ids_for(&engine, 2);

        engine.select_card(&a);
        let outcome = engine.select_card(&b);

        assert_eq!(
            outcome,
            SelectOutcome::Matched {
                pair_id: "focus-start-pair-2".to_string(),
                category_bonus: false,
            }
        );
        let session = engine.session();
        assert_eq!(session.matched_pairs.len(), 1);
        assert_eq!(session.moves, 1);
        assert_eq!(session.score, 10);
        assert_eq!(session.category_bonus_count, 0);
        assert!(session.selected_cards.is_empty());
        assert!(!session.is_checking);
    }

    #[test]
    fn test_category_bonus() {
        let mut engine = create_engine("adaptive-loop");
        start(&mut engine);
        let (a, b) = card_ids_for(&engine, 1);

        engine.select_card(&a);
        let outcome = engine.select_card(&b);

        assert!(matches!(outcome, SelectOutcome::Matched { category_bonus: true, .. }));
        let session = engine.session();
        assert_eq!(session.score, 15);
        assert_eq!(session.category_bonus_count, 1);
        let message = session.feedback_messages.latest().unwrap();
        assert_eq!(message.kind, FeedbackKind::Success);
        assert!(message.text.contains("nature"));
    }

    #[test]
    fn test_mismatch_resolves_after_delay() {
        let mut engine = create_engine("focus-start");
        start(&mut engine);
        let (a0, _) = card_ids_for(&engine, 0);
        let (a1, _) = card_ids_for(&engine, 1);

        engine.select_card(&a0);
        assert_eq!(engine.select_card(&a1), SelectOutcome::Mismatched { failure_count: 1 });
        assert!(engine.session().is_checking);
        assert!(engine.has_pending_mismatch());

        // Further selections are refused while checking
        let (a2, _) = card_ids_for(&engine, 2);
        assert_eq!(engine.select_card(&a2), SelectOutcome::Ignored);

        advance(&mut engine, 1199);
        assert_eq!(engine.session().revealed_card_ids.len(), 2);
        assert_eq!(engine.session().moves, 0);

        advance(&mut engine, 1);
        let session = engine.session();
        assert!(session.revealed_card_ids.is_empty());
        assert!(session.selected_cards.is_empty());
        assert_eq!(session.moves, 1);
        assert!(!session.is_checking);
        assert!(!engine.has_pending_mismatch());
    }

    #[test]
    fn test_completion_opens_summary() {
        let mut engine = create_engine("focus-start");
        start(&mut engine);

        // One miss, some time, then clear the board
        let (a0, b0) = card_ids_for(&engine, 0);
        let (a1, _) = card_ids_for(&engine, 1);
        engine.select_card(&a0);
        engine.select_card(&a1);
        advance(&mut engine, 1200);
        for _ in 0..7 {
            engine.increment_timer();
        }

        engine.select_card(&a0);
        engine.select_card(&b0);
        let outcomes: Vec<_> = (1..8)
            .map(|index| {
                let (a, b) = card_ids_for(&engine, index);
                engine.select_card(&a);
                engine.select_card(&b)
            })
            .collect();
        let last = outcomes.last().cloned().unwrap();

        let expected = GameSummary {
            elapsed_seconds: 7,
            moves: 9,
            score: 80,
            category_bonus_count: 0,
        };
        assert_eq!(last, SelectOutcome::Completed(expected));
        assert_eq!(engine.status(), GameStatus::Completed);
        assert_eq!(engine.modal(), &ModalState::open(ModalContent::Summary(expected)));
        assert!(!engine.should_tick());
    }

    #[test]
    fn test_selection_accepted_during_countdown() {
        let mut engine = create_engine("focus-start");
        assert_eq!(engine.status(), GameStatus::Countdown);

        let (a0, _) = card_ids_for(&engine, 0);
        let (a1, _) = card_ids_for(&engine, 1);
        assert_eq!(engine.select_card(&a0), SelectOutcome::Revealed);
        assert_eq!(engine.select_card(&a1), SelectOutcome::Mismatched { failure_count: 1 });
    }

    #[test]
    fn test_status_gate_when_enabled() {
        let config = EngineConfig {
            gate_selection_on_status: true,
            ..test_config()
        };
        let mut engine = SessionEngine::new(config, ManualScheduler::new());
        engine.initialize_level(find_level("focus-start").unwrap()).unwrap();
        let (a0, _) = card_ids_for(&engine, 0);

        assert_eq!(engine.select_card(&a0), SelectOutcome::Ignored);
        start(&mut engine);
        assert_eq!(engine.select_card(&a0), SelectOutcome::Revealed);

        engine.pause();
        let (a1, _) = card_ids_for(&engine, 1);
        assert_eq!(engine.select_card(&a1), SelectOutcome::Ignored);
    }

    #[test]
    fn test_unknown_and_matched_cards_ignored() {
        let mut engine = create_engine("focus-start");
        start(&mut engine);
        assert_eq!(engine.select_card("no-such-card"), SelectOutcome::Ignored);

        let (a, b) = card_ids_for(&engine, 3);
        engine.select_card(&a);
        engine.select_card(&b);
        assert_eq!(engine.select_card(&a), SelectOutcome::Ignored);
        assert!(engine.session().selected_cards.is_empty());
    }

    #[test]
    fn test_reset_cancels_pending_mismatch() {
        let mut engine = create_engine("focus-start");
        start(&mut engine);
        let (a0, _) = card_ids_for(&engine, 0);
        let (a1, _) = card_ids_for(&engine, 1);
        engine.select_card(&a0);
        engine.select_card(&a1);

        engine.reset().unwrap();
        assert_eq!(engine.status(), GameStatus::Countdown);
        assert!(!engine.scheduler_mut().is_pending(TimerEvent::MismatchResolved));

        // Start a fresh selection; no stale reveal clears it
        start(&mut engine);
        engine.select_card(&a0);
        advance(&mut engine, 5000);
        assert_eq!(engine.session().selected_cards, vec![a0]);
        assert_eq!(engine.session().moves, 0);
    }

    #[test]
    fn test_stale_timer_is_ignored() {
        let mut engine = create_engine("focus-start");
        start(&mut engine);
        let (a0, _) = card_ids_for(&engine, 0);
        let (a1, _) = card_ids_for(&engine, 1);
        engine.select_card(&a0);
        engine.select_card(&a1);

        // Capture the in-flight firing, then replace the session
        let fired = engine.scheduler_mut().advance(Duration::from_millis(1200));
        assert_eq!(fired.len(), 1);
        engine.reset().unwrap();

        assert!(!engine.on_timer(fired[0]));
        assert_eq!(engine.session().moves, 0);
    }

    #[test]
    fn test_reset_reshuffles_and_zeroes() {
        let mut engine = create_engine("adaptive-loop");
        start(&mut engine);
        let (a, b) = card_ids_for(&engine, 0);
        engine.select_card(&a);
        engine.select_card(&b);
        engine.increment_timer();

        let before: Vec<_> = engine.deck().iter().map(|c| c.id.clone()).collect();
        engine.reset().unwrap();
        let after: Vec<_> = engine.deck().iter().map(|c| c.id.clone()).collect();

        assert_ne!(before, after);
        let session = engine.session();
        assert_eq!(session.level_id, "adaptive-loop");
        assert_eq!((session.moves, session.score, session.elapsed_seconds), (0, 0, 0));
        assert!(session.matched_pairs.is_empty());
        assert!(session.feedback_messages.is_empty());
    }

    #[test]
    fn test_pause_keeps_mismatch_timer() {
        let mut engine = create_engine("focus-start");
        start(&mut engine);
        let (a0, _) = card_ids_for(&engine, 0);
        let (a1, _) = card_ids_for(&engine, 1);
        engine.select_card(&a0);
        engine.select_card(&a1);

        assert!(engine.pause());
        assert_eq!(engine.session().selected_cards.len(), 2);
        assert!(matches!(engine.modal().content, Some(ModalContent::Pause { .. })));

        advance(&mut engine, 1200);
        assert_eq!(engine.status(), GameStatus::Paused);
        assert!(engine.session().selected_cards.is_empty());
        assert_eq!(engine.session().moves, 1);

        assert!(engine.toggle_pause());
        assert_eq!(engine.status(), GameStatus::InProgress);
        assert!(!engine.modal().is_open);
    }

    #[test]
    fn test_should_tick() {
        let mut engine = create_engine("focus-start");
        start(&mut engine);
        assert!(!engine.should_tick());

        let (a0, _) = card_ids_for(&engine, 0);
        engine.select_card(&a0);
        assert!(engine.should_tick());

        engine.increment_timer();
        engine.increment_timer();
        assert_eq!(engine.session().elapsed_seconds, 2);
    }

    #[test]
    fn test_leaving_countdown_cancels_countdown_timer() {
        let mut engine = create_engine("focus-start");
        engine.set_status(GameStatus::InProgress);
        engine.pause();

        advance(&mut engine, 2000);
        assert_eq!(engine.status(), GameStatus::Paused);
    }

    #[test]
    fn test_repeated_failures_are_tracked() {
        let (mut engine, backend, _clock) = create_tracked_engine("adaptive-loop");
        start(&mut engine);
        let (a0, _) = card_ids_for(&engine, 0);
        let (a1, _) = card_ids_for(&engine, 1);

        for attempt in 1..=3u32 {
            engine.select_card(&a1);
            assert_eq!(
                engine.select_card(&a0),
                SelectOutcome::Mismatched { failure_count: attempt }
            );
            advance(&mut engine, 1200);

            if attempt == 1 {
                assert_eq!(backend.write_count(), 0);
            }
        }

        let tracked = engine.repetition().all_pairs();
        let ids: Vec<_> = tracked.iter().map(|p| p.pair_id.as_str()).collect();
        assert_eq!(tracked.len(), 2);
        assert!(ids.contains(&"adaptive-loop-pair-0"));
        assert!(ids.contains(&"adaptive-loop-pair-1"));
        assert!(tracked.iter().all(|p| p.failure_count == 3));

        let tip = engine.session().feedback_messages.latest().unwrap();
        assert_eq!(tip.kind, FeedbackKind::Tip);
    }

    #[test]
    fn test_due_pairs_announced_on_initialize() {
        let (mut engine, _backend, clock) = create_tracked_engine("adaptive-loop");
        engine
            .repetition()
            .record_failed_pair("adaptive-loop-pair-4", "🎸", "animals", 2, 2);
        engine
            .repetition()
            .record_failed_pair("focus-start-pair-0", "🌟", "neutral", 2, 2);

        clock.advance(Duration::from_secs(300));
        engine.reset().unwrap();

        let messages: Vec<_> = engine.session().feedback_messages.iter().collect();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].kind, FeedbackKind::Tip);
        assert!(messages[0].text.starts_with("1 difficult pair is due"));
    }

    #[test]
    fn test_match_counts_as_successful_review() {
        let (mut engine, _backend, _clock) = create_tracked_engine("adaptive-loop");
        engine
            .repetition()
            .record_failed_pair("adaptive-loop-pair-0", "🦋", "animals", 2, 2);
        start(&mut engine);

        let (a, b) = card_ids_for(&engine, 0);
        engine.select_card(&a);
        engine.select_card(&b);

        let tracked = engine.repetition().all_pairs();
        assert_eq!(tracked[0].rehearsal_count, 1);
    }

    #[test]
    fn test_encouragement_every_tenth_move() {
        let mut engine = create_engine("loci-journey");
        start(&mut engine);

        for index in 0..10 {
            let (a, _) = card_ids_for(&engine, index);
            let (b, _) = card_ids_for(&engine, index + 1);
            engine.select_card(&a);
            engine.select_card(&b);
            advance(&mut engine, 1200);
        }

        assert_eq!(engine.session().moves, 10);
        let latest = engine.session().feedback_messages.latest().unwrap();
        assert_eq!(latest.kind, FeedbackKind::Encouragement);
        assert!(latest.text.starts_with("10 moves"));
        assert_eq!(engine.session().feedback_messages.len(), 1);
    }

    #[test]
    fn test_pre_round_hint_gate() {
        let config = EngineConfig {
            pre_round_hints: true,
            ..test_config()
        };
        let mut engine = SessionEngine::new(config, ManualScheduler::new());
        engine.initialize_level(find_level("adaptive-loop").unwrap()).unwrap();

        assert!(engine.is_hint_gate_active());
        let Some(ModalContent::PreRound(summary)) = &engine.modal().content else {
            panic!("expected pre-round modal");
        };
        assert_eq!(summary.total_pairs, 12);

        // The countdown does not auto-advance while gated
        advance(&mut engine, 10_000);
        assert_eq!(engine.status(), GameStatus::Countdown);

        assert!(engine.dismiss_hints());
        assert_eq!(engine.status(), GameStatus::InProgress);
        assert!(!engine.modal().is_open);
        assert!(!engine.dismiss_hints());
    }

    #[test]
    fn test_hint_gate_skipped_for_levels_without_cues() {
        let config = EngineConfig {
            pre_round_hints: true,
            ..test_config()
        };
        let mut engine = SessionEngine::new(config, ManualScheduler::new());
        engine.initialize_level(find_level("loci-journey").unwrap()).unwrap();

        assert!(!engine.is_hint_gate_active());
        advance(&mut engine, 2000);
        assert_eq!(engine.status(), GameStatus::InProgress);
    }

    #[test]
    fn test_failed_initialize_leaves_session() {
        let mut engine = create_engine("focus-start");
        let mut broken = find_level("focus-start").unwrap();
        broken.card_pairs = 50;

        let result = engine.initialize_level(broken);
        assert!(matches!(result, Err(DeckError::InsufficientSymbols { .. })));
        assert_eq!(engine.session().deck.len(), 16);
        assert_eq!(engine.level().card_pairs, 8);
    }
}
