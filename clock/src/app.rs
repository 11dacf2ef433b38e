use std::time::Instant;

use engine::app::{AppContext, GameApp, InputFrame};
use engine::graphics::Renderer2d;

use crate::clock_ui::{draw_clock, draw_setup_form};
use crate::cue_player::CuePlayer;
use crate::input::KeyBindings;
use crate::session::ClockSession;
use crate::sfx::Cue;
use crate::state::MatchSetup;

/// Windowed front end: feeds frames and keys into a `ClockSession` and plays the cues it returns.
pub struct ClockApp {
    keys: KeyBindings,
    defaults: MatchSetup,
    cues: Box<dyn CuePlayer>,
}

impl ClockApp {
    pub fn new(keys: KeyBindings, defaults: MatchSetup, cues: Box<dyn CuePlayer>) -> Self {
        Self {
            keys,
            defaults,
            cues,
        }
    }
}

impl GameApp for ClockApp {
    type State = ClockSession;
    type Effect = Cue;

    fn init_state(&mut self, _ctx: &mut AppContext) -> Self::State {
        ClockSession::new(self.keys, self.defaults, Instant::now())
    }

    fn update_state(
        &mut self,
        state: &mut Self::State,
        input: &InputFrame,
        now: Instant,
        _ctx: &mut AppContext,
    ) -> Vec<Self::Effect> {
        state.update(&input.keys_pressed, now)
    }

    fn render(&mut self, state: &Self::State, renderer: &mut dyn Renderer2d) {
        draw_clock(renderer, &state.presentation());
        if let Some(form) = state.form() {
            draw_setup_form(renderer, form);
        }
    }

    fn handle_effects(&mut self, effects: Vec<Self::Effect>, _ctx: &mut AppContext) {
        for cue in effects {
            self.cues.play(cue);
        }
    }
}
