//! XP ledger and level derivation.

pub mod levels;
pub mod types;

pub use levels::{level_for_xp, xp_to_next_level, LevelDefinition, LevelProgress, LEVELS};
pub use types::{XpEvent, XpEventKind, XpProfile};
