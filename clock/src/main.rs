use anyhow::{Context, Result, anyhow};
use clap::Parser;
use log::info;
use winit::dpi::PhysicalSize;

use buzzer_clock::app::ClockApp;
use buzzer_clock::cue_player::open_cue_player;
use buzzer_clock::player::Player;
use buzzer_clock::settings::{ClockSettings, SettingsStore};
use engine::app::{AppConfig, run_game};

#[derive(Debug, Parser)]
#[command(name = "buzzer-clock")]
#[command(about = "Two-player countdown clock for buzzer and trivia games")]
struct Cli {
    /// Red's allotment in seconds (prefills the startup form).
    #[arg(long)]
    red: Option<f64>,
    /// Blue's allotment in seconds (prefills the startup form).
    #[arg(long)]
    blue: Option<f64>,
    /// Side that plays first.
    #[arg(long, value_enum, ignore_case = true)]
    first: Option<Player>,
    /// Disable audio cues.
    #[arg(long, default_value_t = false)]
    mute: bool,
    #[arg(long, default_value_t = 1024)]
    width: u32,
    #[arg(long, default_value_t = 640)]
    height: u32,
    /// Save the effective settings to the settings file and exit.
    #[arg(long, default_value_t = false)]
    write_settings: bool,
}

fn apply_overrides(mut settings: ClockSettings, cli: &Cli) -> ClockSettings {
    if let Some(red) = cli.red {
        settings.defaults.red_seconds = red;
    }
    if let Some(blue) = cli.blue {
        settings.defaults.blue_seconds = blue;
    }
    if let Some(first) = cli.first {
        settings.defaults.starting_player = first;
    }
    if cli.mute {
        settings.audio.mute = true;
    }
    settings.sanitized()
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let store = SettingsStore::from_env();
    let settings = apply_overrides(store.load(), &cli);

    if cli.write_settings {
        store
            .save(&settings)
            .with_context(|| format!("writing settings to {}", store.path().display()))?;
        info!("settings written to {}", store.path().display());
        return Ok(());
    }

    let cues = open_cue_player(settings.audio.volume, settings.audio.mute);
    let app = ClockApp::new(settings.keys, settings.defaults, cues);
    let config = AppConfig {
        title: "Buzzer Clock".to_string(),
        desired_size: PhysicalSize::new(cli.width, cli.height),
        clamp_to_monitor: true,
        vsync: Some(true),
        target_fps: 60,
    };

    run_game(config, app).map_err(|err| anyhow!("window loop failed: {err}"))
}
