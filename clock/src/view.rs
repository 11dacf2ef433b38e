use crate::color::{PASS_FLASH, Rgb, drain_palette, side_color};
use crate::flash::PassFlash;
use crate::player::Player;
use crate::state::{ClockPhase, ClockState};

/// Everything the UI needs to draw one player's half.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SidePresentation {
    pub player: Player,
    /// `ceil(remaining)`.
    pub display: u64,
    pub drain_fraction: f64,
    pub drain_color: Rgb,
    /// Indicator color: the side color, or the pass-flash color while flashed.
    pub indicator_color: Rgb,
    pub flashed: bool,
    pub active: bool,
    /// No time left. Stays set after the turn moves on, unlike the countdown's expiry latch.
    pub expired: bool,
}

impl SidePresentation {
    pub fn display_text(&self) -> String {
        self.display.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockPresentation {
    pub red: SidePresentation,
    pub blue: SidePresentation,
    pub phase: ClockPhase,
}

impl ClockPresentation {
    pub fn side(&self, player: Player) -> &SidePresentation {
        match player {
            Player::Red => &self.red,
            Player::Blue => &self.blue,
        }
    }

    pub fn status_text(&self) -> String {
        match self.phase {
            ClockPhase::Idle => "SET UP MATCH".to_string(),
            ClockPhase::Paused(p) => format!("PAUSED - {} TO PLAY", p.name().to_uppercase()),
            ClockPhase::Running(p) => format!("{} TO PLAY", p.name().to_uppercase()),
        }
    }
}

fn present_side(clock: &ClockState, flash: &PassFlash, player: Player) -> SidePresentation {
    let countdown = clock.countdown(player);
    let drain_fraction = countdown.elapsed_fraction();
    let flashed = flash.is_flashed(player);
    SidePresentation {
        player,
        display: countdown.display_value(),
        drain_fraction,
        drain_color: drain_palette(player).at(drain_fraction),
        indicator_color: if flashed {
            PASS_FLASH
        } else {
            side_color(player)
        },
        flashed,
        active: !clock.is_idle() && clock.active_player() == player,
        expired: countdown.remaining() == 0.0,
    }
}

pub fn present(clock: &ClockState, flash: &PassFlash) -> ClockPresentation {
    ClockPresentation {
        red: present_side(clock, flash, Player::Red),
        blue: present_side(clock, flash, Player::Blue),
        phase: clock.phase(),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;
    use crate::color::{BLUE_DRAIN, RED_DRAIN, RED_SIDE};
    use crate::state::MatchSetup;

    #[test]
    fn fresh_match_shows_full_time_and_dark_drain() {
        let now = Instant::now();
        let mut clock = ClockState::new(now);
        clock.start(
            MatchSetup {
                red_seconds: 20.0,
                blue_seconds: 15.0,
                starting_player: Player::Blue,
            },
            now,
        );
        let view = present(&clock, &PassFlash::new());

        assert_eq!(view.red.display_text(), "20");
        assert_eq!(view.blue.display, 15);
        assert_eq!(view.red.drain_fraction, 0.0);
        assert_eq!(view.red.drain_color, RED_DRAIN.empty);
        assert_eq!(view.blue.drain_color, BLUE_DRAIN.empty);
        assert!(view.blue.active);
        assert!(!view.red.active);
        assert_eq!(view.status_text(), "PAUSED - BLUE TO PLAY");
    }

    #[test]
    fn drain_follows_elapsed_fraction() {
        let now = Instant::now();
        let mut clock = ClockState::new(now);
        clock.start(MatchSetup::default(), now);
        clock.toggle_pause(now);
        clock.tick(15.0);

        let view = present(&clock, &PassFlash::new());
        assert_eq!(view.red.drain_fraction, 0.5);
        assert_eq!(view.red.drain_color, RED_DRAIN.at(0.5));
        assert_eq!(view.red.display, 15);
        assert_eq!(view.status_text(), "RED TO PLAY");
    }

    #[test]
    fn both_sides_stay_expired_after_successive_timeouts() {
        let now = Instant::now();
        let mut clock = ClockState::new(now);
        clock.start(
            MatchSetup {
                red_seconds: 2.0,
                blue_seconds: 3.0,
                starting_player: Player::Red,
            },
            now,
        );
        clock.toggle_pause(now);
        clock.tick(5.0);
        clock.toggle_pause(now);
        clock.tick(5.0);

        let view = present(&clock, &PassFlash::new());
        assert!(view.red.expired && view.blue.expired);
        assert_eq!(view.red.display_text(), "0");
        assert_eq!(view.blue.display_text(), "0");
    }

    #[test]
    fn flashed_side_uses_flash_color() {
        let now = Instant::now();
        let clock = ClockState::new(now);
        let mut flash = PassFlash::new();
        flash.flash(Player::Blue, now);

        let view = present(&clock, &flash);
        assert_eq!(view.blue.indicator_color, PASS_FLASH);
        assert_eq!(view.red.indicator_color, RED_SIDE);
        assert!(!view.red.active && !view.blue.active);
        assert_eq!(view.status_text(), "SET UP MATCH");
    }
}
