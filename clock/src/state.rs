use std::time::Instant;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::countdown::Countdown;
use crate::player::Player;

/// Allotment used when a side's time is missing, unparsable or not positive.
pub const DEFAULT_SIDE_SECONDS: f64 = 30.0;

pub fn sanitize_seconds(seconds: f64) -> f64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        DEFAULT_SIDE_SECONDS
    }
}

/// What the operator submits on the startup form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchSetup {
    pub red_seconds: f64,
    pub blue_seconds: f64,
    pub starting_player: Player,
}

impl Default for MatchSetup {
    fn default() -> Self {
        Self {
            red_seconds: DEFAULT_SIDE_SECONDS,
            blue_seconds: DEFAULT_SIDE_SECONDS,
            starting_player: Player::Red,
        }
    }
}

impl MatchSetup {
    pub fn sanitized(mut self) -> Self {
        self.red_seconds = sanitize_seconds(self.red_seconds);
        self.blue_seconds = sanitize_seconds(self.blue_seconds);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockPhase {
    Idle,
    Running(Player),
    Paused(Player),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockCommand {
    Switch,
    TogglePause,
    Restart,
    Pass,
}

/// Side effect requested by a transition. The caller dispatches it (audio, flash, form).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockEffect {
    None,
    Buzzer,
    SwitchChime,
    Flash(Player),
    ShowSetup,
}

/// The whole clock: both countdowns, whose turn it is, and the frame-time reference.
///
/// `last_tick` is only written by `start`, `frame`, `toggle_switch` and `toggle_pause`, so time
/// that passes while paused or across a switch is never charged to a player.
#[derive(Debug, Clone)]
pub struct ClockState {
    red: Countdown,
    blue: Countdown,
    active: Player,
    paused: bool,
    idle: bool,
    started: bool,
    last_tick: Instant,
}

impl ClockState {
    pub fn new(now: Instant) -> Self {
        Self {
            red: Countdown::new(DEFAULT_SIDE_SECONDS),
            blue: Countdown::new(DEFAULT_SIDE_SECONDS),
            active: Player::Red,
            paused: true,
            idle: true,
            started: false,
            last_tick: now,
        }
    }

    /// Loads a fresh match and waits, paused, on the starting player.
    pub fn start(&mut self, setup: MatchSetup, now: Instant) -> ClockEffect {
        let setup = setup.sanitized();
        self.red = Countdown::new(setup.red_seconds);
        self.blue = Countdown::new(setup.blue_seconds);
        self.active = setup.starting_player;
        self.paused = true;
        self.idle = false;
        self.started = true;
        self.last_tick = now;
        info!(
            "match started: red {}s, blue {}s, {} to play",
            setup.red_seconds, setup.blue_seconds, setup.starting_player
        );
        ClockEffect::None
    }

    pub fn phase(&self) -> ClockPhase {
        if self.idle {
            ClockPhase::Idle
        } else if self.paused {
            ClockPhase::Paused(self.active)
        } else {
            ClockPhase::Running(self.active)
        }
    }

    pub fn countdown(&self, player: Player) -> &Countdown {
        match player {
            Player::Red => &self.red,
            Player::Blue => &self.blue,
        }
    }

    fn countdown_mut(&mut self, player: Player) -> &mut Countdown {
        match player {
            Player::Red => &mut self.red,
            Player::Blue => &mut self.blue,
        }
    }

    pub fn active_player(&self) -> Player {
        self.active
    }

    /// `false` until the first `start`; before that there is no side to act on.
    pub fn has_started(&self) -> bool {
        self.started
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_idle(&self) -> bool {
        self.idle
    }

    pub fn is_running(&self) -> bool {
        !self.idle && !self.paused
    }

    pub fn last_tick(&self) -> Instant {
        self.last_tick
    }

    /// Charges `delta` seconds to the active player.
    ///
    /// On expiry the turn passes to the other side, which has its expiry flag cleared, and the
    /// clock pauses until someone resumes it.
    pub fn tick(&mut self, delta: f64) -> ClockEffect {
        if !self.is_running() {
            return ClockEffect::None;
        }
        let player = self.active;
        if !self.countdown_mut(player).tick(delta) {
            return ClockEffect::None;
        }

        let next = player.other();
        self.active = next;
        self.countdown_mut(next).clear_expired();
        self.paused = true;
        info!("{player} ran out of time; {next} to play (paused)");
        ClockEffect::Buzzer
    }

    /// Per-frame update: measures the time since the previous reference and ticks if running.
    pub fn frame(&mut self, now: Instant) -> ClockEffect {
        let delta = now.saturating_duration_since(self.last_tick).as_secs_f64();
        self.last_tick = now;
        self.tick(delta)
    }

    pub fn toggle_switch(&mut self, now: Instant) -> ClockEffect {
        if !self.is_running() {
            debug!("switch ignored in {:?}", self.phase());
            return ClockEffect::None;
        }
        self.active = self.active.other();
        self.last_tick = now;
        debug!("turn switched to {}", self.active);
        ClockEffect::SwitchChime
    }

    pub fn toggle_pause(&mut self, now: Instant) -> ClockEffect {
        if self.idle {
            debug!("pause ignored while idle");
            return ClockEffect::None;
        }
        self.paused = !self.paused;
        self.last_tick = now;
        debug!("clock {}", if self.paused { "paused" } else { "resumed" });
        ClockEffect::None
    }

    /// Back to the startup form. The last countdown values stay visible until the next `start`.
    pub fn restart(&mut self) -> ClockEffect {
        self.idle = true;
        self.paused = true;
        info!("match restarted");
        ClockEffect::ShowSetup
    }

    /// Pauses and asks for the active side to flash. Accepted in every phase.
    pub fn pass(&mut self) -> ClockEffect {
        self.paused = true;
        if !self.has_started() {
            return ClockEffect::None;
        }
        info!("{} passed", self.active);
        ClockEffect::Flash(self.active)
    }

    pub fn apply(&mut self, command: ClockCommand, now: Instant) -> ClockEffect {
        match command {
            ClockCommand::Switch => self.toggle_switch(now),
            ClockCommand::TogglePause => self.toggle_pause(now),
            ClockCommand::Restart => self.restart(),
            ClockCommand::Pass => self.pass(),
        }
    }
}
