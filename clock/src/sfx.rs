use engine::audio::{Envelope, Tone, ToneSequence, Waveform};

/// Sample rate cues are rendered at.
pub const CUE_SAMPLE_RATE: u32 = 48_000;

/// Default master volume for cues (0.0..=1.0).
pub const DEFAULT_CUE_VOLUME: f32 = 0.8;

pub const BUZZER_FREQ_HZ: f32 = 150.0;
pub const BUZZER_SECONDS: f32 = 1.0;
pub const BUZZER_END_GAIN: f32 = 0.001;

pub const CHIME_LOW_HZ: f32 = 600.0;
pub const CHIME_HIGH_HZ: f32 = 800.0;
pub const CHIME_NOTE_SECONDS: f32 = 0.1;
pub const CHIME_GAP_SECONDS: f32 = 0.05;
pub const CHIME_GAIN: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// A side ran out of time.
    Buzzer,
    /// Manual turn switch.
    SwitchChime,
}

impl Cue {
    pub fn tones(self) -> Vec<Tone> {
        match self {
            Cue::Buzzer => vec![
                Tone::new(Waveform::Square, BUZZER_FREQ_HZ, BUZZER_SECONDS).with_envelope(
                    Envelope::Exponential {
                        end_gain: BUZZER_END_GAIN,
                    },
                ),
            ],
            Cue::SwitchChime => vec![
                Tone::new(Waveform::Sine, CHIME_LOW_HZ, CHIME_NOTE_SECONDS)
                    .with_gain(CHIME_GAIN),
                Tone::new(Waveform::Sine, CHIME_HIGH_HZ, CHIME_NOTE_SECONDS)
                    .starting_at(CHIME_NOTE_SECONDS + CHIME_GAP_SECONDS)
                    .with_gain(CHIME_GAIN),
            ],
        }
    }

    pub fn sequence(self, sample_rate: u32) -> ToneSequence {
        ToneSequence::new(self.tones(), sample_rate)
    }
}
