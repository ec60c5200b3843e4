//! Static level table

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Level {
    pub level: u32,
    pub min_points: u64,
    pub max_points: u64,
    pub title: &'static str,
}

/// Contiguous, non-overlapping point ranges starting at 0
pub const LEVELS: [Level; 10] = [
    Level { level: 1, min_points: 0, max_points: 100, title: "Budget Beginner" },
    Level { level: 2, min_points: 100, max_points: 300, title: "Savings Scout" },
    Level { level: 3, min_points: 300, max_points: 600, title: "Finance Follower" },
    Level { level: 4, min_points: 600, max_points: 1000, title: "Money Manager" },
    Level { level: 5, min_points: 1000, max_points: 1500, title: "Budget Boss" },
    Level { level: 6, min_points: 1500, max_points: 2200, title: "Wealth Wizard" },
    Level { level: 7, min_points: 2200, max_points: 3000, title: "Finance Master" },
    Level { level: 8, min_points: 3000, max_points: 4000, title: "Economy Expert" },
    Level { level: 9, min_points: 4000, max_points: 5500, title: "Fortune Founder" },
    Level { level: 10, min_points: 5500, max_points: 7500, title: "Financial Freedom" },
];

/// Reaching this level unlocks the `level_5` achievement
pub const MILESTONE_LEVEL: u32 = 5;

/// Highest level whose minimum is at or below `points`.
pub fn level_for_points(points: u64) -> &'static Level {
    LEVELS
        .iter()
        .rev()
        .find(|l| l.min_points <= points)
        .unwrap_or(&LEVELS[0])
}

pub fn level_info(level: u32) -> &'static Level {
    LEVELS.iter().find(|l| l.level == level).unwrap_or(&LEVELS[0])
}

pub fn top_level() -> &'static Level {
    &LEVELS[LEVELS.len() - 1]
}

/// Percent of the way through `level`'s range, 100 at the top level.
pub fn progress_to_next_level(points: u64, level: u32) -> f64 {
    let info = level_info(level);
    if info.level >= top_level().level {
        return 100.0;
    }

    let span = (info.max_points - info.min_points) as f64;
    let earned = points.saturating_sub(info.min_points) as f64;
    (earned / span * 100.0).clamp(0.0, 100.0)
}
