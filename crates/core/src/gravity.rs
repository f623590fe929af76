//! Gravity and lock-delay timing
//!
//! Time only enters the core through [`GravityClock::advance`]; there are no
//! hidden timers. Each tick adds the elapsed time to a drop accumulator. Once
//! the accumulator reaches the current interval one downward step is attempted
//! and the accumulator restarts from zero. A failed step adds the accumulated
//! time to the lock timer; the piece locks when that reaches the lock delay.

use crate::types::{Rules, SpeedMode};

/// Gravity interval for a level (levels start at 1, capped at `gravity_max_level`)
///
/// ```
/// use sakura_tetris_core::gravity::drop_interval_ms;
/// use sakura_tetris_core::types::Rules;
///
/// let rules = Rules::default();
/// assert_eq!(drop_interval_ms(1, &rules), 755);
/// assert_eq!(drop_interval_ms(10, &rules), 350);
/// assert_eq!(drop_interval_ms(30, &rules), 80);
/// ```
pub fn drop_interval_ms(level: u32, rules: &Rules) -> u32 {
    let level = level.min(rules.gravity_max_level);
    rules
        .gravity_base_ms
        .saturating_sub(rules.gravity_step_ms.saturating_mul(level))
        .max(rules.gravity_floor_ms)
}

/// Scale an interval by the presentation-selected speed mode
pub fn apply_speed_mode(interval_ms: u32, speed: SpeedMode, rules: &Rules) -> u32 {
    match speed {
        SpeedMode::Normal => interval_ms,
        SpeedMode::Fast => {
            (interval_ms.saturating_mul(rules.fast_percent) / 100).max(rules.fast_floor_ms)
        }
    }
}

/// Drop accumulator plus lock-delay timer for the active piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GravityClock {
    drop_ms: u32,
    lock_ms: u32,
}

impl GravityClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time accumulated since the last gravity step
    pub fn drop_ms(&self) -> u32 {
        self.drop_ms
    }

    /// Time spent grounded since the last successful move
    pub fn lock_ms(&self) -> u32 {
        self.lock_ms
    }

    /// Accumulate `elapsed_ms`; returns true when a gravity step is due.
    pub fn advance(&mut self, elapsed_ms: u32, interval_ms: u32) -> bool {
        self.drop_ms = self.drop_ms.saturating_add(elapsed_ms);
        self.drop_ms >= interval_ms
    }

    /// Record the result of a due gravity step.
    ///
    /// Returns true when the piece has been grounded for at least
    /// `lock_delay_ms` and must lock now. The lock timer is cleared in that case.
    pub fn settle(&mut self, moved: bool, lock_delay_ms: u32) -> bool {
        let step = std::mem::take(&mut self.drop_ms);
        if moved {
            self.lock_ms = 0;
            return false;
        }

        self.lock_ms = self.lock_ms.saturating_add(step);
        if self.lock_ms >= lock_delay_ms {
            self.lock_ms = 0;
            return true;
        }
        false
    }

    /// Any successful move or rotation restarts the lock delay
    pub fn reset_lock(&mut self) {
        self.lock_ms = 0;
    }

    /// Forget time accumulated toward the next drop (used when resuming)
    pub fn rebaseline(&mut self) {
        self.drop_ms = 0;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_curve() {
        let rules = Rules::default();
        assert_eq!(drop_interval_ms(1, &rules), 755);
        assert_eq!(drop_interval_ms(2, &rules), 710);
        assert_eq!(drop_interval_ms(15, &rules), 125);
        assert_eq!(drop_interval_ms(16, &rules), 80);
        assert_eq!(drop_interval_ms(99, &rules), 80);
    }

    #[test]
    fn test_interval_is_monotonic() {
        let rules = Rules::default();
        let mut prev = u32::MAX;
        for level in 1..=40 {
            let interval = drop_interval_ms(level, &rules);
            assert!(interval <= prev);
            assert!(interval >= rules.gravity_floor_ms);
            prev = interval;
        }
    }

    #[test]
    fn test_speed_mode() {
        let rules = Rules::default();
        assert_eq!(apply_speed_mode(755, SpeedMode::Normal, &rules), 755);
        assert_eq!(apply_speed_mode(755, SpeedMode::Fast, &rules), 264);
        assert_eq!(apply_speed_mode(80, SpeedMode::Fast, &rules), 30);
    }

    #[test]
    fn test_step_due_only_at_interval() {
        let mut clock = GravityClock::new();
        assert!(!clock.advance(16, 50));
        assert!(!clock.advance(16, 50));
        assert!(!clock.advance(16, 50));
        assert!(clock.advance(16, 50));
        assert!(!clock.settle(true, 500));
        assert_eq!(clock.drop_ms(), 0);
    }

    #[test]
    fn test_grounded_steps_accumulate_into_lock() {
        let mut clock = GravityClock::new();
        for _ in 0..4 {
            assert!(clock.advance(120, 100));
            assert!(!clock.settle(false, 500));
        }
        assert_eq!(clock.lock_ms(), 480);

        assert!(clock.advance(120, 100));
        assert!(clock.settle(false, 500));
        assert_eq!(clock.lock_ms(), 0);
    }

    #[test]
    fn test_rebaseline_keeps_lock_timer() {
        let mut clock = GravityClock::new();
        clock.advance(200, 100);
        clock.settle(false, 500);
        clock.advance(40, 100);
        clock.rebaseline();
        assert_eq!(clock.drop_ms(), 0);
        assert_eq!(clock.lock_ms(), 200);
    }
}
