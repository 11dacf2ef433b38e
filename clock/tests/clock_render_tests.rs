use std::time::{Duration, Instant};

use buzzer_clock::clock_ui::{draw_clock, draw_setup_form};
use buzzer_clock::color::{BLUE_SIDE, PASS_FLASH, RED_DRAIN};
use buzzer_clock::input::KeyBindings;
use buzzer_clock::player::Player;
use buzzer_clock::session::ClockSession;
use buzzer_clock::sfx::Cue;
use buzzer_clock::state::MatchSetup;
use engine::app::KeyPress;
use engine::graphics::CpuRenderer;
use engine::surface::{RgbaBufferSurface, Surface, SurfaceSize};
use winit::event::VirtualKeyCode;

const SIZE: SurfaceSize = SurfaceSize::new(640, 400);

fn step(session: &mut ClockSession, keys: &[VirtualKeyCode], now: Instant) -> Vec<Cue> {
    let presses: Vec<KeyPress> = keys.iter().map(|key| KeyPress::new(*key, now)).collect();
    session.update(&presses, now)
}

fn running_session(t0: Instant) -> ClockSession {
    let setup = MatchSetup {
        red_seconds: 20.0,
        blue_seconds: 20.0,
        starting_player: Player::Red,
    };
    let mut session = ClockSession::new(KeyBindings::default(), setup, t0);
    step(
        &mut session,
        &[VirtualKeyCode::Return, VirtualKeyCode::Space],
        t0,
    );
    session
}

#[test]
fn drain_covers_elapsed_share_of_track_in_interpolated_color() {
    let t0 = Instant::now();
    let mut session = running_session(t0);
    step(&mut session, &[], t0 + Duration::from_secs(5));

    let mut surface = RgbaBufferSurface::new(SIZE);
    let layout = {
        let mut gfx = CpuRenderer::new(surface.frame_mut(), SIZE);
        draw_clock(&mut gfx, &session.presentation())
    };

    let track = layout.red_track;
    let drain = RED_DRAIN.at(0.25).to_rgba();
    let x = track.x + 3;
    // Inside the drained quarter.
    assert_eq!(surface.pixel(x, track.y + track.h / 8), Some(drain));
    // Below it the track is undrained.
    let below = surface.pixel(x, track.y + track.h * 3 / 4).unwrap();
    assert_ne!(below, drain);
}

#[test]
fn pass_flash_recolors_active_side_border() {
    let t0 = Instant::now();
    let mut session = running_session(t0);
    step(
        &mut session,
        &[VirtualKeyCode::Right],
        t0 + Duration::from_millis(10),
    );
    step(
        &mut session,
        &[VirtualKeyCode::P],
        t0 + Duration::from_millis(20),
    );

    let mut surface = RgbaBufferSurface::new(SIZE);
    let layout = {
        let mut gfx = CpuRenderer::new(surface.frame_mut(), SIZE);
        draw_clock(&mut gfx, &session.presentation())
    };
    let blue = layout.blue_panel;
    assert_eq!(surface.pixel(blue.x + 2, blue.y + 2), Some(PASS_FLASH.to_rgba()));

    step(&mut session, &[], t0 + Duration::from_secs(4));
    let mut gfx = CpuRenderer::new(surface.frame_mut(), SIZE);
    draw_clock(&mut gfx, &session.presentation());
    assert_eq!(surface.pixel(blue.x + 2, blue.y + 2), Some(BLUE_SIDE.to_rgba()));
}

#[test]
fn setup_form_dims_the_clock_behind_it() {
    let t0 = Instant::now();
    let session = ClockSession::new(KeyBindings::default(), MatchSetup::default(), t0);
    let form = session.form().expect("new session shows the form");

    let mut surface = RgbaBufferSurface::new(SIZE);
    let (clock_layout, form_layout) = {
        let mut gfx = CpuRenderer::new(surface.frame_mut(), SIZE);
        let clock_layout = draw_clock(&mut gfx, &session.presentation());
        let form_layout = draw_setup_form(&mut gfx, form);
        (clock_layout, form_layout)
    };

    let red = clock_layout.red_panel;
    let [r, g, b, _] = surface.pixel(red.x + 2, red.y + 2).unwrap();
    assert!(r < 255 && r > 0, "red side should be dimmed, got {r}");
    assert_eq!((g, b), (0, 0));

    let panel = form_layout.panel;
    assert!(panel.w > 0 && panel.h > 0);
    assert!(form_layout.rows.iter().all(|row| panel.contains(row.x, row.y)));
}
