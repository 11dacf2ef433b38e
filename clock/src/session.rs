use std::time::Instant;

use engine::app::KeyPress;
use log::debug;
use winit::event::VirtualKeyCode;

use crate::flash::PassFlash;
use crate::input::KeyBindings;
use crate::setup::{FormOutcome, SetupForm};
use crate::sfx::Cue;
use crate::state::{ClockEffect, ClockState, MatchSetup};
use crate::view::{ClockPresentation, present};

/// The clock plus everything that hangs off it: the pass-flash timers, the startup form and the
/// key bindings. Owns no I/O; cues are returned to the caller.
#[derive(Debug, Clone)]
pub struct ClockSession {
    clock: ClockState,
    flash: PassFlash,
    form: Option<SetupForm>,
    keys: KeyBindings,
    last_setup: MatchSetup,
}

impl ClockSession {
    /// New session showing the startup form prefilled with `defaults`.
    pub fn new(keys: KeyBindings, defaults: MatchSetup, now: Instant) -> Self {
        let defaults = defaults.sanitized();
        Self {
            clock: ClockState::new(now),
            flash: PassFlash::new(),
            form: Some(SetupForm::from_setup(&defaults)),
            keys,
            last_setup: defaults,
        }
    }

    pub fn clock(&self) -> &ClockState {
        &self.clock
    }

    pub fn flash(&self) -> &PassFlash {
        &self.flash
    }

    pub fn form(&self) -> Option<&SetupForm> {
        self.form.as_ref()
    }

    pub fn last_setup(&self) -> MatchSetup {
        self.last_setup
    }

    pub fn presentation(&self) -> ClockPresentation {
        present(&self.clock, &self.flash)
    }

    /// One rendered frame. Each key press is replayed at the instant it arrived: the clock is
    /// brought up to that instant, then the key applies. The clock then catches up to `now`.
    pub fn update(&mut self, keys: &[KeyPress], now: Instant) -> Vec<Cue> {
        let mut cues = Vec::new();
        for press in keys {
            // Keep the time reference monotonic and never past the frame being rendered.
            let at = press.at.max(self.clock.last_tick()).min(now);
            cues.extend(self.frame(at));
            cues.extend(self.handle_key(press.key, at));
        }
        cues.extend(self.frame(now));
        cues
    }

    /// Due flash reverts, then the time since the last reference is charged.
    pub fn frame(&mut self, now: Instant) -> Option<Cue> {
        self.flash.advance(now);
        let effect = self.clock.frame(now);
        self.dispatch(effect, now)
    }

    pub fn handle_key(&mut self, key: VirtualKeyCode, now: Instant) -> Option<Cue> {
        if let Some(form) = self.form.as_mut() {
            if let FormOutcome::Submitted(setup) = form.handle_key(key) {
                self.form = None;
                self.last_setup = setup;
                let effect = self.clock.start(setup, now);
                return self.dispatch(effect, now);
            }
            return None;
        }

        let Some(command) = self.keys.command_for(key) else {
            debug!("unbound key {key:?}");
            return None;
        };
        let effect = self.clock.apply(command, now);
        self.dispatch(effect, now)
    }

    fn dispatch(&mut self, effect: ClockEffect, now: Instant) -> Option<Cue> {
        match effect {
            ClockEffect::None => None,
            ClockEffect::Buzzer => Some(Cue::Buzzer),
            ClockEffect::SwitchChime => Some(Cue::SwitchChime),
            ClockEffect::Flash(side) => {
                self.flash.flash(side, now);
                None
            }
            ClockEffect::ShowSetup => {
                self.form = Some(SetupForm::from_setup(&self.last_setup));
                None
            }
        }
    }
}
