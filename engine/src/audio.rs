use std::f32::consts::TAU;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
}

fn waveform_sample(wave: Waveform, phase: f32) -> f32 {
    match wave {
        Waveform::Sine => phase.sin(),
        Waveform::Square => {
            if phase.sin() >= 0.0 {
                1.0
            } else {
                -1.0
            }
        }
    }
}

/// Gain shape over the lifetime of a tone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Envelope {
    /// Holds the start gain for the whole tone.
    Constant,
    /// Exponential ramp from the start gain to `end_gain` at the end of the tone.
    Exponential { end_gain: f32 },
}

/// One oscillator burst: `waveform` at `freq_hz`, sounding from `start` for `duration` seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub waveform: Waveform,
    pub freq_hz: f32,
    pub start: f32,
    pub duration: f32,
    pub gain: f32,
    pub envelope: Envelope,
}

impl Tone {
    pub fn new(waveform: Waveform, freq_hz: f32, duration: f32) -> Self {
        Self {
            waveform,
            freq_hz,
            start: 0.0,
            duration: duration.max(0.0),
            gain: 1.0,
            envelope: Envelope::Constant,
        }
    }

    pub fn starting_at(mut self, start: f32) -> Self {
        self.start = start.max(0.0);
        self
    }

    pub fn with_gain(mut self, gain: f32) -> Self {
        self.gain = gain.max(0.0);
        self
    }

    pub fn with_envelope(mut self, envelope: Envelope) -> Self {
        self.envelope = envelope;
        self
    }

    pub fn end(&self) -> f32 {
        self.start + self.duration
    }

    /// Gain at `t` seconds from the start of the sequence; zero outside the tone.
    pub fn gain_at(&self, t: f32) -> f32 {
        if t < self.start || t >= self.end() || self.duration <= 0.0 {
            return 0.0;
        }
        match self.envelope {
            Envelope::Constant => self.gain,
            Envelope::Exponential { end_gain } => {
                // Exponential ramps cannot cross zero.
                if self.gain <= 0.0 || end_gain <= 0.0 {
                    return self.gain;
                }
                let progress = (t - self.start) / self.duration;
                self.gain * (end_gain / self.gain).powf(progress)
            }
        }
    }

    pub fn sample_at(&self, t: f32) -> f32 {
        let gain = self.gain_at(t);
        if gain == 0.0 {
            return 0.0;
        }
        let phase = (TAU * self.freq_hz * (t - self.start)) % TAU;
        waveform_sample(self.waveform, phase) * gain
    }
}

/// Finite mono sample stream rendering a set of tones.
///
/// Each sample is computed from the absolute time, so the sequence carries no oscillator state
/// beyond its frame counter.
#[derive(Debug, Clone, PartialEq)]
pub struct ToneSequence {
    tones: Vec<Tone>,
    sample_rate: u32,
    frame: u64,
    total_frames: u64,
}

impl ToneSequence {
    pub fn new(tones: impl Into<Vec<Tone>>, sample_rate: u32) -> Self {
        let tones = tones.into();
        let sample_rate = sample_rate.max(1);
        let end = tones.iter().map(Tone::end).fold(0.0f32, f32::max);
        let total_frames = (f64::from(end) * f64::from(sample_rate)).ceil() as u64;
        Self {
            tones,
            sample_rate,
            frame: 0,
            total_frames,
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.total_frames as f64 / f64::from(self.sample_rate))
    }

    pub fn sample_at(&self, t: f32) -> f32 {
        self.tones.iter().map(|tone| tone.sample_at(t)).sum()
    }
}

impl Iterator for ToneSequence {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        if self.frame >= self.total_frames {
            return None;
        }
        let t = (self.frame as f64 / f64::from(self.sample_rate)) as f32;
        self.frame += 1;
        Some(self.sample_at(t).clamp(-1.0, 1.0))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.total_frames.saturating_sub(self.frame) as usize;
        (left, Some(left))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exponential_envelope_ramps_between_gains() {
        let tone = Tone::new(Waveform::Square, 150.0, 1.0)
            .with_envelope(Envelope::Exponential { end_gain: 0.001 });
        assert!((tone.gain_at(0.0) - 1.0).abs() < 1e-6);
        assert!((tone.gain_at(0.5) - 0.001f32.sqrt()).abs() < 1e-4);
        assert!(tone.gain_at(0.999) < 0.0011);
        assert_eq!(tone.gain_at(1.0), 0.0);
    }

    #[test]
    fn tone_is_silent_outside_its_window() {
        let tone = Tone::new(Waveform::Sine, 800.0, 0.1)
            .starting_at(0.15)
            .with_gain(0.5);
        assert_eq!(tone.gain_at(0.1), 0.0);
        assert_eq!(tone.gain_at(0.2), 0.5);
        assert_eq!(tone.gain_at(0.26), 0.0);
    }

    #[test]
    fn square_wave_holds_full_amplitude() {
        let tone = Tone::new(Waveform::Square, 100.0, 1.0);
        assert_eq!(tone.sample_at(0.001), 1.0);
        assert_eq!(tone.sample_at(0.006), -1.0);
    }

    #[test]
    fn sequence_length_covers_last_tone() {
        let seq = ToneSequence::new(
            vec![
                Tone::new(Waveform::Sine, 600.0, 0.1),
                Tone::new(Waveform::Sine, 800.0, 0.1).starting_at(0.15),
            ],
            1_000,
        );
        assert_eq!(seq.duration(), Duration::from_millis(250));
        assert_eq!(seq.count(), 250);
    }

    #[test]
    fn sequence_samples_stay_in_range() {
        let loud = Tone::new(Waveform::Square, 440.0, 0.05).with_gain(1.0);
        let seq = ToneSequence::new(vec![loud, loud], 8_000);
        assert!(seq.into_iter().all(|s| (-1.0..=1.0).contains(&s)));
    }
}
