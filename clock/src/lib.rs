pub mod app;
pub mod clock_ui;
pub mod color;
pub mod countdown;
pub mod cue_player;
pub mod flash;
pub mod input;
pub mod player;
pub mod session;
pub mod settings;
pub mod setup;
pub mod sfx;
pub mod state;
pub mod view;
