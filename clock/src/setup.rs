//! Startup form: collects both allotments and the starting player from the keyboard.

use winit::event::VirtualKeyCode;

use crate::player::Player;
use crate::state::{DEFAULT_SIDE_SECONDS, MatchSetup, sanitize_seconds};

const MAX_FIELD_LEN: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupField {
    RedSeconds,
    BlueSeconds,
    StartingPlayer,
}

impl SetupField {
    fn next(self) -> Self {
        match self {
            SetupField::RedSeconds => SetupField::BlueSeconds,
            SetupField::BlueSeconds => SetupField::StartingPlayer,
            SetupField::StartingPlayer => SetupField::RedSeconds,
        }
    }

    fn prev(self) -> Self {
        self.next().next()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormOutcome {
    Editing,
    Submitted(MatchSetup),
}

/// Seconds typed by the operator. Empty, unparsable or non-positive input means 30 seconds.
pub fn parse_seconds(text: &str) -> f64 {
    text.trim()
        .parse::<f64>()
        .map(sanitize_seconds)
        .unwrap_or(DEFAULT_SIDE_SECONDS)
}

fn format_seconds(seconds: f64) -> String {
    format!("{seconds}")
}

fn digit_for(key: VirtualKeyCode) -> Option<char> {
    use VirtualKeyCode::*;
    let d = match key {
        Key0 | Numpad0 => '0',
        Key1 | Numpad1 => '1',
        Key2 | Numpad2 => '2',
        Key3 | Numpad3 => '3',
        Key4 | Numpad4 => '4',
        Key5 | Numpad5 => '5',
        Key6 | Numpad6 => '6',
        Key7 | Numpad7 => '7',
        Key8 | Numpad8 => '8',
        Key9 | Numpad9 => '9',
        Period | NumpadDecimal => '.',
        _ => return None,
    };
    Some(d)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupForm {
    red_text: String,
    blue_text: String,
    starting: Player,
    focus: SetupField,
}

impl SetupForm {
    /// Form prefilled with `setup`, focused on the red field.
    pub fn from_setup(setup: &MatchSetup) -> Self {
        Self {
            red_text: format_seconds(setup.red_seconds),
            blue_text: format_seconds(setup.blue_seconds),
            starting: setup.starting_player,
            focus: SetupField::RedSeconds,
        }
    }

    pub fn red_text(&self) -> &str {
        &self.red_text
    }

    pub fn blue_text(&self) -> &str {
        &self.blue_text
    }

    pub fn starting_player(&self) -> Player {
        self.starting
    }

    pub fn focus(&self) -> SetupField {
        self.focus
    }

    pub fn to_setup(&self) -> MatchSetup {
        MatchSetup {
            red_seconds: parse_seconds(&self.red_text),
            blue_seconds: parse_seconds(&self.blue_text),
            starting_player: self.starting,
        }
    }

    fn focused_text(&mut self) -> Option<&mut String> {
        match self.focus {
            SetupField::RedSeconds => Some(&mut self.red_text),
            SetupField::BlueSeconds => Some(&mut self.blue_text),
            SetupField::StartingPlayer => None,
        }
    }

    pub fn handle_key(&mut self, key: VirtualKeyCode) -> FormOutcome {
        match key {
            VirtualKeyCode::Return | VirtualKeyCode::NumpadEnter => {
                return FormOutcome::Submitted(self.to_setup());
            }
            VirtualKeyCode::Tab | VirtualKeyCode::Down => self.focus = self.focus.next(),
            VirtualKeyCode::Up => self.focus = self.focus.prev(),
            VirtualKeyCode::Back => {
                if let Some(text) = self.focused_text() {
                    text.pop();
                }
            }
            VirtualKeyCode::Delete => {
                if let Some(text) = self.focused_text() {
                    text.clear();
                }
            }
            VirtualKeyCode::Left | VirtualKeyCode::Right
                if self.focus == SetupField::StartingPlayer =>
            {
                self.starting = self.starting.other();
            }
            VirtualKeyCode::R if self.focus == SetupField::StartingPlayer => {
                self.starting = Player::Red;
            }
            VirtualKeyCode::B if self.focus == SetupField::StartingPlayer => {
                self.starting = Player::Blue;
            }
            other => {
                if let Some(ch) = digit_for(other) {
                    if let Some(text) = self.focused_text() {
                        let second_dot = ch == '.' && text.contains('.');
                        if !second_dot && text.len() < MAX_FIELD_LEN {
                            text.push(ch);
                        }
                    }
                }
            }
        }
        FormOutcome::Editing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_keys(form: &mut SetupForm, keys: &[VirtualKeyCode]) -> FormOutcome {
        let mut outcome = FormOutcome::Editing;
        for key in keys {
            outcome = form.handle_key(*key);
        }
        outcome
    }

    #[test]
    fn parse_seconds_defaults_bad_input() {
        assert_eq!(parse_seconds("45"), 45.0);
        assert_eq!(parse_seconds(" 2.5 "), 2.5);
        assert_eq!(parse_seconds(""), 30.0);
        assert_eq!(parse_seconds("abc"), 30.0);
        assert_eq!(parse_seconds("0"), 30.0);
        assert_eq!(parse_seconds("-5"), 30.0);
        assert_eq!(parse_seconds("inf"), 30.0);
    }

    #[test]
    fn form_is_prefilled_from_setup() {
        let form = SetupForm::from_setup(&MatchSetup {
            red_seconds: 12.5,
            blue_seconds: 30.0,
            starting_player: Player::Blue,
        });
        assert_eq!(form.red_text(), "12.5");
        assert_eq!(form.blue_text(), "30");
        assert_eq!(form.starting_player(), Player::Blue);
        assert_eq!(form.focus(), SetupField::RedSeconds);
    }

    #[test]
    fn typing_edits_the_focused_field_and_submits() {
        use VirtualKeyCode::*;
        let mut form = SetupForm::from_setup(&MatchSetup::default());
        let outcome = type_keys(
            &mut form,
            &[Delete, Key1, Key5, Tab, Back, Back, Key9, Tab, Right, Return],
        );
        assert_eq!(
            outcome,
            FormOutcome::Submitted(MatchSetup {
                red_seconds: 15.0,
                blue_seconds: 9.0,
                starting_player: Player::Blue,
            })
        );
    }

    #[test]
    fn empty_field_submits_default() {
        use VirtualKeyCode::*;
        let mut form = SetupForm::from_setup(&MatchSetup::default());
        let outcome = type_keys(&mut form, &[Delete, Return]);
        let FormOutcome::Submitted(setup) = outcome else {
            panic!("expected submit");
        };
        assert_eq!(setup.red_seconds, 30.0);
    }

    #[test]
    fn only_one_decimal_point_is_accepted() {
        use VirtualKeyCode::*;
        let mut form = SetupForm::from_setup(&MatchSetup::default());
        type_keys(&mut form, &[Delete, Key1, Period, Key5, Period, Key2]);
        assert_eq!(form.red_text(), "1.52");
    }

    #[test]
    fn player_keys_only_act_on_player_field() {
        use VirtualKeyCode::*;
        let mut form = SetupForm::from_setup(&MatchSetup::default());
        form.handle_key(B);
        assert_eq!(form.starting_player(), Player::Red);

        form.handle_key(Up);
        assert_eq!(form.focus(), SetupField::StartingPlayer);
        form.handle_key(B);
        assert_eq!(form.starting_player(), Player::Blue);
        form.handle_key(R);
        assert_eq!(form.starting_player(), Player::Red);
    }

    #[test]
    fn field_length_is_capped() {
        use VirtualKeyCode::*;
        let mut form = SetupForm::from_setup(&MatchSetup::default());
        type_keys(
            &mut form,
            &[Delete, Key9, Key9, Key9, Key9, Key9, Key9, Key9, Key9, Key9],
        );
        assert_eq!(form.red_text().len(), MAX_FIELD_LEN);
    }
}
