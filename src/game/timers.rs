//! Power-up duration and chance-based spawn windows.

use rand::rngs::SmallRng;
use rand::Rng;

use crate::constants::POWER_UP_DURATION;

/// Countdown for the player's temporary power state.
#[derive(Debug, Default, Clone, Copy)]
pub struct PowerUp {
    active: bool,
    elapsed: u32,
}

impl PowerUp {
    /// Starts (or restarts) the power-up countdown.
    pub fn activate(&mut self) {
        self.active = true;
        self.elapsed = 0;
    }

    /// Deactivates without waiting for expiry.
    pub fn clear(&mut self) {
        self.active = false;
        self.elapsed = 0;
    }

    /// Advances one tick. Returns `true` exactly on the expiry tick.
    pub fn tick(&mut self) -> bool {
        if !self.active {
            return false;
        }

        self.elapsed += 1;
        if self.elapsed >= POWER_UP_DURATION {
            self.clear();
            return true;
        }
        false
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Remaining ticks, zero when inactive.
    pub fn remaining(&self) -> u32 {
        if self.active {
            POWER_UP_DURATION - self.elapsed
        } else {
            0
        }
    }
}

/// A periodic chance-based spawn window.
///
/// The counter increases monotonically every tick. A spawn is attempted
/// only when the tracked item is absent, the threshold has elapsed, and a
/// per-tick random draw succeeds; the counter resets only once an item is
/// actually placed (see [`SpawnWindow::confirm`]).
#[derive(Debug, Clone, Copy)]
pub struct SpawnWindow {
    elapsed: u32,
    threshold: u32,
    chance: f64,
}

impl SpawnWindow {
    pub fn new(threshold: u32, chance: f64) -> Self {
        Self {
            elapsed: 0,
            threshold,
            chance,
        }
    }

    /// Advances one tick. Returns `true` when a spawn should be attempted.
    ///
    /// The random draw is only consumed once the item is absent and the
    /// threshold has elapsed.
    pub fn tick(&mut self, item_absent: bool, rng: &mut SmallRng) -> bool {
        self.elapsed += 1;
        item_absent && self.elapsed > self.threshold && rng.random::<f64>() < self.chance
    }

    /// Resets the window after a successful placement.
    pub fn confirm(&mut self) {
        self.elapsed = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_power_up_expires_after_exact_duration() {
        let mut power = PowerUp::default();
        power.activate();

        for tick in 1..POWER_UP_DURATION {
            assert!(!power.tick(), "expired early at tick {tick}");
            assert!(power.is_active());
        }

        assert!(power.tick());
        assert!(!power.is_active());
        assert_eq!(power.remaining(), 0);
    }

    #[test]
    fn test_power_up_remaining_counts_down() {
        let mut power = PowerUp::default();
        assert_eq!(power.remaining(), 0);

        power.activate();
        assert_eq!(power.remaining(), POWER_UP_DURATION);
        power.tick();
        assert_eq!(power.remaining(), POWER_UP_DURATION - 1);
    }

    #[test]
    fn test_power_up_reactivation_restarts_countdown() {
        let mut power = PowerUp::default();
        power.activate();
        for _ in 0..200 {
            power.tick();
        }
        power.activate();
        assert_eq!(power.remaining(), POWER_UP_DURATION);
    }

    #[test]
    fn test_inactive_power_up_never_expires() {
        let mut power = PowerUp::default();
        for _ in 0..POWER_UP_DURATION * 2 {
            assert!(!power.tick());
        }
    }

    #[test]
    fn test_spawn_window_waits_for_threshold() {
        let mut rng = SmallRng::seed_from_u64(1);
        // Certain draw, so the threshold is the only gate.
        let mut window = SpawnWindow::new(10, 1.1);

        for _ in 0..10 {
            assert!(!window.tick(true, &mut rng));
        }
        assert!(window.tick(true, &mut rng));
    }

    #[test]
    fn test_spawn_window_requires_absent_item() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut window = SpawnWindow::new(0, 1.1);

        assert!(!window.tick(false, &mut rng));
        assert!(window.tick(true, &mut rng));
    }

    #[test]
    fn test_spawn_window_zero_chance_never_fires() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut window = SpawnWindow::new(0, 0.0);

        for _ in 0..1000 {
            assert!(!window.tick(true, &mut rng));
        }
    }

    #[test]
    fn test_confirm_restarts_the_window() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut window = SpawnWindow::new(5, 1.1);

        for _ in 0..5 {
            window.tick(true, &mut rng);
        }
        assert!(window.tick(true, &mut rng));

        window.confirm();
        assert!(!window.tick(true, &mut rng), "window must close again after confirm");
    }
}
