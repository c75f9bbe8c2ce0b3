//! Game sessions
//!
//! This module provides:
//! - The session state machine and selection/matching rules
//! - A bounded feedback queue
//! - Cancellable timers behind a `Scheduler` trait (tokio or manual)

pub mod engine;
pub mod feedback;
pub mod models;
pub mod timer;

pub use engine::SessionEngine;
pub use feedback::FeedbackQueue;
pub use models::*;
pub use timer::{FiredTimer, ManualScheduler, Scheduler, TimerEvent, TimerHandle, TokioScheduler};
