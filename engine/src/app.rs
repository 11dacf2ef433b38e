use std::collections::HashSet;
use std::error::Error;
use std::time::{Duration, Instant};

use log::{debug, warn};
use pixels::{PixelsBuilder, SurfaceTexture};
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

use crate::graphics::Renderer2d;
use crate::pixels_renderer::PixelsRenderer2d;
use crate::surface::SurfaceSize;

pub struct AppConfig {
    pub title: String,
    pub desired_size: PhysicalSize<u32>,
    pub clamp_to_monitor: bool,
    pub vsync: Option<bool>,
    pub target_fps: u32,
}

pub struct AppContext {
    pub window: Window,
    pub renderer: PixelsRenderer2d,
    pub surface_size: SurfaceSize,
}

/// A key going down, stamped when the window event arrived rather than when the frame ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: VirtualKeyCode,
    pub at: Instant,
}

impl KeyPress {
    pub fn new(key: VirtualKeyCode, at: Instant) -> Self {
        Self { key, at }
    }
}

/// Discrete input gathered between two frames.
#[derive(Debug, Clone, Default)]
pub struct InputFrame {
    /// Keys that went down since the last frame, in arrival order. OS key repeat is filtered out.
    pub keys_pressed: Vec<KeyPress>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.keys_pressed.clear();
    }
}

/// Tracks held keys so a held key reports a single press.
#[derive(Debug, Default)]
pub struct KeyTracker {
    held: HashSet<VirtualKeyCode>,
}

impl KeyTracker {
    /// Returns `true` for a fresh press, `false` for a repeat or a release.
    pub fn on_key(&mut self, key: VirtualKeyCode, state: ElementState) -> bool {
        match state {
            ElementState::Pressed => self.held.insert(key),
            ElementState::Released => {
                self.held.remove(&key);
                false
            }
        }
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }
}

pub trait GameApp {
    type State;
    type Effect;

    fn init_state(&mut self, ctx: &mut AppContext) -> Self::State;

    fn update_state(
        &mut self,
        state: &mut Self::State,
        input: &InputFrame,
        now: Instant,
        ctx: &mut AppContext,
    ) -> Vec<Self::Effect>;

    fn render(&mut self, state: &Self::State, renderer: &mut dyn Renderer2d);

    fn handle_effects(&mut self, _effects: Vec<Self::Effect>, _ctx: &mut AppContext) {}
}

pub fn run_game<G: GameApp + 'static>(
    config: AppConfig,
    mut game: G,
) -> Result<(), Box<dyn Error>> {
    let event_loop = EventLoop::new();
    let initial_size = match event_loop.primary_monitor().map(|m| m.size()) {
        Some(monitor) if config.clamp_to_monitor => PhysicalSize::new(
            config.desired_size.width.min(monitor.width),
            config.desired_size.height.min(monitor.height),
        ),
        _ => config.desired_size,
    };
    let window = WindowBuilder::new()
        .with_title(config.title)
        .with_inner_size(initial_size)
        .build(&event_loop)?;

    let window_size = window.inner_size();
    let surface_size = SurfaceSize::new(window_size.width.max(1), window_size.height.max(1));

    let pixels = {
        let surface_texture = SurfaceTexture::new(surface_size.width, surface_size.height, &window);
        let mut builder =
            PixelsBuilder::new(surface_size.width, surface_size.height, surface_texture);
        if let Some(vsync) = config.vsync {
            builder = builder.enable_vsync(vsync);
        }
        builder.build()?
    };
    let renderer = PixelsRenderer2d::new(pixels, surface_size)?;

    let mut ctx = AppContext {
        window,
        renderer,
        surface_size,
    };
    let mut state = game.init_state(&mut ctx);
    let mut input = InputFrame::default();
    let mut keys = KeyTracker::default();

    // Redraws are paced by `WaitUntil` instead of spinning on `Poll`.
    let frame_interval = Duration::from_secs_f64(1.0 / f64::from(config.target_fps.max(1)));
    let mut next_redraw = Instant::now();

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::WaitUntil(next_redraw);

        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    *control_flow = ControlFlow::Exit;
                }
                WindowEvent::Resized(size) => {
                    ctx.surface_size = SurfaceSize::new(size.width, size.height);
                    if let Err(err) = ctx.renderer.resize(ctx.surface_size) {
                        warn!("resize failed: {err}");
                    }
                    ctx.window.request_redraw();
                }
                WindowEvent::Focused(false) => {
                    keys.clear();
                }
                WindowEvent::KeyboardInput {
                    input:
                        KeyboardInput {
                            state: key_state,
                            virtual_keycode: Some(key),
                            ..
                        },
                    ..
                } => {
                    if keys.on_key(key, key_state) {
                        debug!("key pressed: {key:?}");
                        input.keys_pressed.push(KeyPress::new(key, Instant::now()));
                    }
                }
                _ => {}
            },
            Event::MainEventsCleared => {
                let now = Instant::now();
                if now >= next_redraw {
                    ctx.window.request_redraw();
                    next_redraw = now + frame_interval;
                }
                *control_flow = ControlFlow::WaitUntil(next_redraw);
            }
            Event::RedrawRequested(_) => {
                let now = Instant::now();
                let effects = game.update_state(&mut state, &input, now, &mut ctx);
                input.clear();

                ctx.renderer.draw_frame(|gfx| game.render(&state, gfx));
                if let Err(err) = ctx.renderer.present() {
                    warn!("present failed: {err}");
                }

                game.handle_effects(effects, &mut ctx);
            }
            _ => {}
        }
    })
}
