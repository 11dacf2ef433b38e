use std::time::Duration;

use engine::audio::ToneSequence;
use log::{info, warn};
use rodio::{OutputStream, OutputStreamHandle, Sink};

use crate::sfx::{CUE_SAMPLE_RATE, Cue};

/// Fire-and-forget cue playback. Implementations must never block or panic when audio is missing.
pub trait CuePlayer {
    fn play(&mut self, cue: Cue);
}

/// Swallows every cue. Used when audio is muted or no output device could be opened.
#[derive(Debug, Default)]
pub struct NullCuePlayer;

impl CuePlayer for NullCuePlayer {
    fn play(&mut self, _cue: Cue) {}
}

/// Mono `rodio` source over a synthesized cue.
pub struct CueSource {
    samples: ToneSequence,
}

impl CueSource {
    pub fn new(cue: Cue) -> Self {
        Self {
            samples: cue.sequence(CUE_SAMPLE_RATE),
        }
    }
}

impl Iterator for CueSource {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        self.samples.next()
    }
}

impl rodio::Source for CueSource {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        self.samples.sample_rate()
    }

    fn total_duration(&self) -> Option<Duration> {
        Some(self.samples.duration())
    }
}

/// Plays each cue on its own detached sink, so overlapping cues mix instead of queueing.
pub struct RodioCuePlayer {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    volume: f32,
}

impl RodioCuePlayer {
    pub fn new(volume: f32) -> Result<Self, rodio::StreamError> {
        let (stream, handle) = OutputStream::try_default()?;
        Ok(Self {
            _stream: stream,
            handle,
            volume: volume.clamp(0.0, 1.0),
        })
    }
}

impl CuePlayer for RodioCuePlayer {
    fn play(&mut self, cue: Cue) {
        let sink = match Sink::try_new(&self.handle) {
            Ok(sink) => sink,
            Err(err) => {
                warn!("could not open a sink for {cue:?}: {err}");
                return;
            }
        };
        sink.set_volume(self.volume);
        sink.append(CueSource::new(cue));
        sink.detach();
    }
}

/// Picks the real output when possible and degrades to silence otherwise.
pub fn open_cue_player(volume: f32, mute: bool) -> Box<dyn CuePlayer> {
    if mute {
        info!("audio muted");
        return Box::new(NullCuePlayer);
    }
    match RodioCuePlayer::new(volume) {
        Ok(player) => Box::new(player),
        Err(err) => {
            warn!("audio unavailable, cues disabled: {err}");
            Box::new(NullCuePlayer)
        }
    }
}

#[cfg(test)]
mod tests {
    use rodio::Source;

    use super::*;

    #[test]
    fn cue_source_reports_mono_stream_of_cue_length() {
        let source = CueSource::new(Cue::Buzzer);
        assert_eq!(source.channels(), 1);
        assert_eq!(source.sample_rate(), CUE_SAMPLE_RATE);
        assert_eq!(source.total_duration(), Some(Duration::from_secs(1)));
        assert_eq!(source.count(), CUE_SAMPLE_RATE as usize);
    }

    #[test]
    fn muted_player_is_silent() {
        let mut player = open_cue_player(1.0, true);
        player.play(Cue::Buzzer);
        player.play(Cue::SwitchChime);
    }
}
