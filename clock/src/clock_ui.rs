use engine::graphics::{Color, Renderer2d, text_size};
use engine::surface::SurfaceSize;
use engine::ui::{Anchor, Insets, Rect, Size};

use crate::player::Player;
use crate::setup::{SetupField, SetupForm};
use crate::view::{ClockPresentation, SidePresentation};

const BACKGROUND: Color = [10, 10, 14, 255];
const TRACK: Color = [20, 20, 26, 255];
const TEXT: Color = [240, 240, 240, 255];
const DIM_TEXT: Color = [150, 150, 160, 255];
const ACTIVE_OUTLINE: Color = [255, 255, 255, 255];
const FORM_BG: Color = [30, 30, 38, 255];
const FORM_FOCUS: Color = [255, 220, 80, 255];

const PANEL_MARGIN: u32 = 24;
const STATUS_BAR_H: u32 = 40;
const LABEL_SCALE: u32 = 3;
const FORM_SCALE: u32 = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClockLayout {
    pub red_panel: Rect,
    pub blue_panel: Rect,
    /// Drain track inside each panel; the panel border around it shows the indicator color.
    pub red_track: Rect,
    pub blue_track: Rect,
    pub status_bar: Rect,
}

impl ClockLayout {
    pub fn panel(&self, player: Player) -> Rect {
        match player {
            Player::Red => self.red_panel,
            Player::Blue => self.blue_panel,
        }
    }

    pub fn track(&self, player: Player) -> Rect {
        match player {
            Player::Red => self.red_track,
            Player::Blue => self.blue_track,
        }
    }
}

pub fn clock_layout(size: SurfaceSize) -> ClockLayout {
    let full = Rect::from_size(size.width, size.height);
    let bar_h = STATUS_BAR_H.min(size.height);
    let panels = Rect::new(0, 0, size.width, size.height - bar_h);
    let (red_panel, blue_panel) = panels.split_columns();
    ClockLayout {
        red_panel,
        blue_panel,
        red_track: red_panel.inset(Insets::all(PANEL_MARGIN)),
        blue_track: blue_panel.inset(Insets::all(PANEL_MARGIN)),
        status_bar: full.place(Size::new(size.width, bar_h), Anchor::BottomCenter),
    }
}

/// Largest text scale at which `text` fits into `max` (at least 1).
fn fit_scale(text: &str, max: Size) -> u32 {
    let unit = text_size(text, 1);
    if unit.w == 0 || unit.h == 0 {
        return 1;
    }
    (max.w / (unit.w + 1)).min(max.h / (unit.h + 1)).max(1)
}

fn draw_text_in(
    gfx: &mut dyn Renderer2d,
    area: Rect,
    text: &str,
    color: Color,
    scale: u32,
    anchor: Anchor,
) {
    let at = area.place(text_size(text, scale), anchor);
    gfx.draw_text_scaled(at.x, at.y, text, color, scale);
}

fn draw_side(gfx: &mut dyn Renderer2d, panel: Rect, track: Rect, side: &SidePresentation) {
    gfx.fill_rect(panel, side.indicator_color.to_rgba());
    gfx.fill_rect(track, TRACK);
    gfx.fill_rect(track.top_fraction(side.drain_fraction), side.drain_color.to_rgba());
    if side.active {
        gfx.rect_outline(track, ACTIVE_OUTLINE);
    }

    let label_area = track.inset(Insets::all(8));
    let label = side.player.name().to_uppercase();
    draw_text_in(gfx, label_area, &label, TEXT, LABEL_SCALE, Anchor::TopCenter);

    let digits = side.display_text();
    let number_box = Size::new(track.w * 7 / 10, track.h * 2 / 5);
    let scale = fit_scale(&digits, number_box);
    draw_text_in(gfx, track, &digits, TEXT, scale, Anchor::Center);

    if side.expired {
        draw_text_in(
            gfx,
            label_area,
            "TIME",
            TEXT,
            LABEL_SCALE,
            Anchor::BottomCenter,
        );
    }
}

pub fn draw_clock(gfx: &mut dyn Renderer2d, view: &ClockPresentation) -> ClockLayout {
    let layout = clock_layout(gfx.size());
    gfx.clear(BACKGROUND);
    for player in Player::ALL {
        draw_side(gfx, layout.panel(player), layout.track(player), view.side(player));
    }

    gfx.fill_rect(layout.status_bar, BACKGROUND);
    draw_text_in(
        gfx,
        layout.status_bar,
        &view.status_text(),
        DIM_TEXT,
        2,
        Anchor::Center,
    );
    layout
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SetupFormLayout {
    pub panel: Rect,
    pub rows: [Rect; 3],
}

fn form_rows(form: &SetupForm) -> [(SetupField, String); 3] {
    [
        (
            SetupField::RedSeconds,
            format!("RED SECONDS: {}", form.red_text()),
        ),
        (
            SetupField::BlueSeconds,
            format!("BLUE SECONDS: {}", form.blue_text()),
        ),
        (
            SetupField::StartingPlayer,
            format!("FIRST: < {} >", form.starting_player().name().to_uppercase()),
        ),
    ]
}

/// Startup form drawn as a modal over whatever is already in the frame.
pub fn draw_setup_form(gfx: &mut dyn Renderer2d, form: &SetupForm) -> SetupFormLayout {
    let size = gfx.size();
    let screen = Rect::from_size(size.width, size.height);
    gfx.blend_rect(screen, [0, 0, 0, 255], 180);

    let row_h = text_size("X", FORM_SCALE).h + 14;
    let panel = screen.place(Size::new(460, row_h * 5 + 32), Anchor::Center);
    gfx.fill_rect(panel, FORM_BG);
    gfx.rect_outline(panel, DIM_TEXT);

    let content = panel.inset(Insets::all(16));
    let mut layout = SetupFormLayout {
        panel,
        rows: [Rect::default(); 3],
    };
    for (i, (field, text)) in form_rows(form).into_iter().enumerate() {
        let row = Rect::new(content.x, content.y + row_h * i as u32, content.w, row_h);
        layout.rows[i] = row;
        let focused = form.focus() == field;
        let (color, marker) = if focused {
            (FORM_FOCUS, "> ")
        } else {
            (TEXT, "  ")
        };
        let line = format!("{marker}{text}");
        draw_text_in(gfx, row, &line, color, FORM_SCALE, Anchor::CenterLeft);
    }

    let hint_area = Rect::new(content.x, content.y + row_h * 3, content.w, row_h * 2);
    draw_text_in(
        gfx,
        hint_area,
        "TAB NEXT  ENTER START",
        DIM_TEXT,
        2,
        Anchor::Center,
    );
    layout
}
