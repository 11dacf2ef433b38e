/// One side's allotment: counts down from `initial` seconds and latches an expiry flag the first
/// time it lands on zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Countdown {
    initial: f64,
    remaining: f64,
    expired: bool,
}

impl Countdown {
    /// `initial` must be positive; callers sanitize user input first (see `MatchSetup`).
    pub fn new(initial: f64) -> Self {
        Self {
            initial,
            remaining: initial,
            expired: false,
        }
    }

    pub fn initial(&self) -> f64 {
        self.initial
    }

    pub fn remaining(&self) -> f64 {
        self.remaining
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }

    pub fn clear_expired(&mut self) {
        self.expired = false;
    }

    /// Whole seconds shown to the players: the ceiling of the remaining time.
    pub fn display_value(&self) -> u64 {
        self.remaining.ceil() as u64
    }

    /// Elapsed share of the allotment, clamped to `0..=1`.
    pub fn elapsed_fraction(&self) -> f64 {
        if self.initial <= 0.0 {
            return 1.0;
        }
        ((self.initial - self.remaining) / self.initial).clamp(0.0, 1.0)
    }

    /// Spends `delta` seconds. Returns `true` only on the tick that crosses into expiry.
    ///
    /// A countdown already at zero ignores ticks, so a stalled frame with a huge delta can at most
    /// expire it once.
    pub fn tick(&mut self, delta: f64) -> bool {
        if self.remaining <= 0.0 {
            return false;
        }
        let delta = if delta.is_finite() { delta.max(0.0) } else { 0.0 };
        self.remaining = (self.remaining - delta).max(0.0);
        if self.remaining == 0.0 && !self.expired {
            self.expired = true;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_never_goes_negative() {
        let mut c = Countdown::new(5.0);
        for delta in [0.0, 0.25, 1.0, 3.5, 1_000.0, f64::MAX] {
            c.tick(delta);
            assert!(c.remaining() >= 0.0);
        }
        assert_eq!(c.remaining(), 0.0);
    }

    #[test]
    fn expiry_is_reported_once() {
        let mut c = Countdown::new(1.0);
        assert!(!c.tick(0.5));
        assert!(c.tick(0.75));
        assert!(c.is_expired());
        assert!(!c.tick(0.75));
        assert!(!c.tick(10.0));
    }

    #[test]
    fn display_is_ceiling_of_remaining() {
        let mut c = Countdown::new(10.0);
        assert_eq!(c.display_value(), 10);
        c.tick(9.7);
        assert_eq!(c.display_value(), 1);
        c.tick(0.5);
        assert_eq!(c.display_value(), 0);
    }

    #[test]
    fn negative_and_nan_deltas_are_ignored() {
        let mut c = Countdown::new(4.0);
        c.tick(-3.0);
        c.tick(f64::NAN);
        assert_eq!(c.remaining(), 4.0);
    }

    #[test]
    fn elapsed_fraction_tracks_spent_time() {
        let mut c = Countdown::new(8.0);
        assert_eq!(c.elapsed_fraction(), 0.0);
        c.tick(2.0);
        assert_eq!(c.elapsed_fraction(), 0.25);
        c.tick(100.0);
        assert_eq!(c.elapsed_fraction(), 1.0);
    }
}
