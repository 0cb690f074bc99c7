//! Level threshold table and derivation.
//!
//! T020: Define the static level table
//! T021: Implement level derivation and progress-to-next-level

use serde::{Deserialize, Serialize};

/// A named tier in the level table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelDefinition {
    /// Ordinal level number (1-based)
    pub level: u32,
    /// Display name
    pub name: &'static str,
    /// Minimum total XP required to hold this level
    pub min_xp: i64,
    /// Icon tag for the UI layer
    pub icon: &'static str,
}

/// Static level table, ascending by `min_xp`.
pub const LEVELS: [LevelDefinition; 8] = [
    LevelDefinition { level: 1, name: "Novice", min_xp: 0, icon: "seedling" },
    LevelDefinition { level: 2, name: "Apprentice", min_xp: 250, icon: "spark" },
    LevelDefinition { level: 3, name: "Athlete", min_xp: 600, icon: "bolt" },
    LevelDefinition { level: 4, name: "Contender", min_xp: 1100, icon: "flame" },
    LevelDefinition { level: 5, name: "Champion", min_xp: 1800, icon: "medal" },
    LevelDefinition { level: 6, name: "Elite", min_xp: 2700, icon: "trophy" },
    LevelDefinition { level: 7, name: "Master", min_xp: 3800, icon: "crown" },
    LevelDefinition { level: 8, name: "Legend", min_xp: 5200, icon: "star" },
];

/// Progress toward the next level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelProgress {
    /// XP accumulated inside the current level
    pub current: i64,
    /// XP still needed to reach the next level (0 at the top level)
    pub needed: i64,
    /// Percentage of the way through the current level (100 at the top)
    pub percentage: f32,
}

/// Return the highest level whose threshold is at or below `xp`.
///
/// Monotonic non-decreasing in `xp`.
pub fn level_for_xp(xp: i64) -> &'static LevelDefinition {
    LEVELS
        .iter()
        .rev()
        .find(|def| def.min_xp <= xp)
        .unwrap_or(&LEVELS[0])
}

/// Compute progress from `xp` toward the next level threshold.
pub fn xp_to_next_level(xp: i64) -> LevelProgress {
    let current_def = level_for_xp(xp);
    let next_def = LEVELS.iter().find(|def| def.min_xp > xp);

    match next_def {
        Some(next) => {
            let span = next.min_xp - current_def.min_xp;
            let current = xp - current_def.min_xp;
            let percentage = if span > 0 {
                ((current as f32 / span as f32) * 100.0).min(100.0)
            } else {
                100.0
            };
            LevelProgress {
                current,
                needed: next.min_xp - xp,
                percentage,
            }
        }
        None => LevelProgress {
            current: xp - current_def.min_xp,
            needed: 0,
            percentage: 100.0,
        },
    }
}
