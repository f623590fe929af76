//! Scoring module - line clear, combo and back-to-back rules
//!
//! Rules applied after every lock:
//! - No rows cleared: the combo chain ends (`combo = -1`), nothing else changes.
//! - Otherwise the combo index grows by one (the first clear of a chain is 0).
//! - A 4-row clear is "difficult". Two difficult clears in a row award a
//!   back-to-back bonus of half the base line score.
//! - Base line score and back-to-back bonus use the level *before* the clear;
//!   the combo bonus is `combo * 50 * rows` with no level multiplier.
//! - Level is `lines / 10 + 1`.

use crate::types::{
    COMBO_BONUS, DIFFICULT_CLEAR_LINES, HARD_DROP_POINTS, LINES_PER_LEVEL, LINE_SCORES,
    SOFT_DROP_POINTS,
};

/// Breakdown of the points awarded for one lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClearScore {
    pub lines: u32,
    /// `LINE_SCORES[lines] * level`
    pub line_score: u32,
    pub combo_bonus: u32,
    pub back_to_back_bonus: u32,
    pub total: u32,
    pub difficult: bool,
    /// Combo index after this clear (-1 when nothing was cleared)
    pub combo: i32,
    /// Set when this clear raised the level; holds the new level
    pub leveled_up: Option<u32>,
}

/// Base points for clearing `lines` rows at once, before the level multiplier.
/// Counts above four score like four.
pub fn base_line_score(lines: usize) -> u32 {
    LINE_SCORES[lines.min(LINE_SCORES.len() - 1)]
}

/// Calculate line clear score
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    base_line_score(lines).saturating_mul(level)
}

/// Calculate combo bonus (`combo_index` is -1 for no chain, 0 for the first clear)
pub fn calculate_combo_bonus(combo_index: i32, lines: usize) -> u32 {
    if combo_index <= 0 {
        return 0;
    }
    (combo_index as u32)
        .saturating_mul(COMBO_BONUS)
        .saturating_mul(lines as u32)
}

/// Back-to-back bonus: half of the level-scaled line score, rounded down
pub fn calculate_back_to_back_bonus(lines: usize, level: u32) -> u32 {
    calculate_line_score(lines, level) / 2
}

/// Check if a clear counts as difficult
pub fn is_difficult(lines: usize) -> bool {
    lines == DIFFICULT_CLEAR_LINES
}

/// Calculate drop score
/// soft_drop: +1 per cell
/// hard_drop: +2 per cell
pub fn calculate_drop_score(cells: u32, is_hard_drop: bool) -> u32 {
    if is_hard_drop {
        cells * HARD_DROP_POINTS
    } else {
        cells * SOFT_DROP_POINTS
    }
}

/// Level for a total number of cleared lines (levels start at 1)
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Score, level and chain counters of one game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreState {
    score: u32,
    level: u32,
    lines: u32,
    combo: i32,
    back_to_back: bool,
}

impl ScoreState {
    pub fn new() -> Self {
        Self {
            score: 0,
            level: 1,
            lines: 0,
            combo: -1,
            back_to_back: false,
        }
    }

    /// Fresh counters for a game that already has `lines` cleared rows
    /// (level follows from the line count; score starts at zero).
    pub fn with_lines(lines: u32) -> Self {
        Self {
            lines,
            level: calculate_level(lines),
            ..Self::new()
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn combo(&self) -> i32 {
        self.combo
    }

    pub fn back_to_back(&self) -> bool {
        self.back_to_back
    }

    /// Award drop points for `cells` moved
    pub fn add_drop(&mut self, cells: u32, is_hard_drop: bool) -> u32 {
        let points = calculate_drop_score(cells, is_hard_drop);
        self.score = self.score.saturating_add(points);
        points
    }

    /// Apply the result of a lock that completed `lines` rows
    pub fn apply_clear(&mut self, lines: usize) -> ClearScore {
        if lines == 0 {
            self.combo = -1;
            return ClearScore {
                combo: self.combo,
                ..ClearScore::default()
            };
        }

        self.combo += 1;

        let level = self.level;
        let difficult = is_difficult(lines);
        let mut back_to_back_bonus = 0;
        if difficult {
            if self.back_to_back {
                back_to_back_bonus = calculate_back_to_back_bonus(lines, level);
            }
            self.back_to_back = true;
        } else {
            self.back_to_back = false;
        }

        let line_score = calculate_line_score(lines, level);
        let combo_bonus = calculate_combo_bonus(self.combo, lines);
        let total = line_score
            .saturating_add(combo_bonus)
            .saturating_add(back_to_back_bonus);

        self.lines += lines as u32;
        self.score = self.score.saturating_add(total);
        self.level = calculate_level(self.lines);

        ClearScore {
            lines: lines as u32,
            line_score,
            combo_bonus,
            back_to_back_bonus,
            total,
            difficult,
            combo: self.combo,
            leveled_up: (self.level > level).then_some(self.level),
        }
    }
}

impl Default for ScoreState {
    fn default() -> Self {
        Self::new()
    }
}
