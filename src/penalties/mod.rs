//! Penalty and debt tracking.

pub mod tracker;
pub mod types;

pub use tracker::{
    apply_streak_break, check_missed_workouts, missed_candidates, resolve_debt, total_debt,
    unresolved_debts, PenaltyError,
};
pub use types::{PenaltyKind, PenaltyRecord};
