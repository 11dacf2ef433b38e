use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::input::KeyBindings;
use crate::sfx::DEFAULT_CUE_VOLUME;
use crate::state::MatchSetup;

pub const SETTINGS_PATH_ENV: &str = "BUZZER_CLOCK_SETTINGS_PATH";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AudioSettings {
    pub volume: f32,
    pub mute: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            volume: DEFAULT_CUE_VOLUME,
            mute: false,
        }
    }
}

impl AudioSettings {
    pub fn clamp(mut self) -> Self {
        self.volume = if self.volume.is_finite() {
            self.volume.clamp(0.0, 1.0)
        } else {
            DEFAULT_CUE_VOLUME
        };
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClockSettings {
    #[serde(default = "default_version")]
    pub version: u32,
    /// Values the startup form opens with.
    #[serde(default)]
    pub defaults: MatchSetup,
    #[serde(default)]
    pub keys: KeyBindings,
    #[serde(default)]
    pub audio: AudioSettings,
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self {
            version: default_version(),
            defaults: MatchSetup::default(),
            keys: KeyBindings::default(),
            audio: AudioSettings::default(),
        }
    }
}

impl ClockSettings {
    pub fn sanitized(mut self) -> Self {
        self.version = default_version();
        self.defaults = self.defaults.sanitized();
        self.audio = self.audio.clamp();
        if self.keys.has_duplicates() {
            warn!("settings bind one key to several commands; using default key bindings");
            self.keys = KeyBindings::default();
        }
        self
    }
}

fn default_version() -> u32 {
    1
}

#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn from_env() -> Self {
        if let Some(explicit) = std::env::var_os(SETTINGS_PATH_ENV) {
            return Self::at(PathBuf::from(explicit));
        }

        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));

        Self::at(base.join("buzzer-clock").join("settings.json"))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing or unreadable settings fall back to defaults.
    pub fn load(&self) -> ClockSettings {
        let Ok(bytes) = fs::read(&self.path) else {
            debug!("no settings at {}; using defaults", self.path.display());
            return ClockSettings::default();
        };
        match serde_json::from_slice::<ClockSettings>(&bytes) {
            Ok(settings) => settings.sanitized(),
            Err(err) => {
                warn!("ignoring invalid settings {}: {err}", self.path.display());
                ClockSettings::default()
            }
        }
    }

    pub fn save(&self, settings: &ClockSettings) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string_pretty(settings)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, text)
    }
}
