use std::time::{Duration, Instant};

use log::debug;

use crate::player::Player;

pub const PASS_FLASH_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingRevert {
    side: Player,
    deadline: Instant,
}

/// Pass-flash indicators, kept apart from `ClockState`.
///
/// Every flash schedules its own revert at a fixed deadline. Reverts cannot be cancelled: a
/// restart does not touch them, and when two flashes overlap on one side the first revert
/// already restores the color.
#[derive(Debug, Clone, Default)]
pub struct PassFlash {
    flashed: [bool; 2],
    pending: Vec<PendingRevert>,
}

impl PassFlash {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flash(&mut self, side: Player, now: Instant) {
        self.flashed[side.index()] = true;
        self.pending.push(PendingRevert {
            side,
            deadline: now + PASS_FLASH_DURATION,
        });
    }

    /// Runs every revert whose deadline has passed, in deadline order. Returns the sides reverted.
    pub fn advance(&mut self, now: Instant) -> Vec<Player> {
        let mut due: Vec<PendingRevert> = Vec::new();
        self.pending.retain(|revert| {
            if revert.deadline <= now {
                due.push(*revert);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|revert| revert.deadline);

        due.into_iter()
            .map(|revert| {
                self.flashed[revert.side.index()] = false;
                debug!("pass flash on {} reverted", revert.side);
                revert.side
            })
            .collect()
    }

    pub fn is_flashed(&self, side: Player) -> bool {
        self.flashed[side.index()]
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}
