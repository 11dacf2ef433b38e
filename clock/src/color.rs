use engine::graphics::Color;
use serde::{Deserialize, Serialize};

use crate::player::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    pub fn to_rgba(self) -> Color {
        let [r, g, b] = self.0;
        [r, g, b, 255]
    }
}

/// Per-channel linear blend from `start` to `end`, rounded to the nearest integer.
///
/// `fraction` is expected in `0..=1`; callers clamp it.
pub fn interpolate(start: Rgb, end: Rgb, fraction: f64) -> Rgb {
    let mut out = [0u8; 3];
    for (i, channel) in out.iter_mut().enumerate() {
        let s = f64::from(start.0[i]);
        let e = f64::from(end.0[i]);
        *channel = (s + (e - s) * fraction).round().clamp(0.0, 255.0) as u8;
    }
    Rgb(out)
}

/// Drain overlay colors: `empty` with no time spent, `full` when the side is out of time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrainPalette {
    pub empty: Rgb,
    pub full: Rgb,
}

impl DrainPalette {
    pub fn at(&self, fraction: f64) -> Rgb {
        interpolate(self.empty, self.full, fraction.clamp(0.0, 1.0))
    }
}

pub const RED_DRAIN: DrainPalette = DrainPalette {
    empty: Rgb::new(139, 0, 0),
    full: Rgb::new(255, 200, 200),
};

pub const BLUE_DRAIN: DrainPalette = DrainPalette {
    empty: Rgb::new(0, 0, 139),
    full: Rgb::new(200, 200, 255),
};

pub const RED_SIDE: Rgb = Rgb::new(255, 0, 0);
pub const BLUE_SIDE: Rgb = Rgb::new(0, 0, 255);
pub const PASS_FLASH: Rgb = Rgb::new(255, 255, 0);

pub fn drain_palette(player: Player) -> DrainPalette {
    match player {
        Player::Red => RED_DRAIN,
        Player::Blue => BLUE_DRAIN,
    }
}

pub fn side_color(player: Player) -> Rgb {
    match player {
        Player::Red => RED_SIDE,
        Player::Blue => BLUE_SIDE,
    }
}
