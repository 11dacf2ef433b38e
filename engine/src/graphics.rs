use crate::surface::SurfaceSize;
use crate::ui::{Rect, Size};

pub type Color = [u8; 4];

// 3x5 block font, one bit per pixel, MSB is the leftmost column.
const GLYPH_W: u32 = 3;
const GLYPH_H: u32 = 5;

fn glyph_advance_x(scale: u32) -> u32 {
    (GLYPH_W + 1) * scale.max(1)
}

fn line_advance_y(scale: u32) -> u32 {
    (GLYPH_H + 1) * scale.max(1)
}

/// Pixel size of `text` rendered at `scale` (widest line by line count).
pub fn text_size(text: &str, scale: u32) -> Size {
    let scale = scale.max(1);
    let lines = text.split('\n');
    let mut widest = 0u32;
    let mut count = 0u32;
    for line in lines {
        count += 1;
        let chars = line.chars().count() as u32;
        // Drop the trailing gap column after the last glyph.
        let w = (chars * glyph_advance_x(scale)).saturating_sub(scale);
        widest = widest.max(w);
    }
    let h = (count * line_advance_y(scale)).saturating_sub(scale);
    Size::new(widest, h)
}

/// 2D drawing interface used by all UI code.
pub trait Renderer2d {
    fn begin_frame(&mut self, size: SurfaceSize);
    fn size(&self) -> SurfaceSize;

    /// Opaque fill.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Blends `color` over existing content with the given alpha.
    fn blend_rect(&mut self, rect: Rect, color: Color, alpha: u8);

    fn draw_text_scaled(&mut self, x: u32, y: u32, text: &str, color: Color, scale: u32);

    fn rect_outline(&mut self, rect: Rect, color: Color) {
        if rect.w == 0 || rect.h == 0 {
            return;
        }
        let right = rect.x + rect.w - 1;
        let bottom = rect.y + rect.h - 1;
        self.fill_rect(Rect::new(rect.x, rect.y, rect.w, 1), color);
        self.fill_rect(Rect::new(rect.x, bottom, rect.w, 1), color);
        self.fill_rect(Rect::new(rect.x, rect.y, 1, rect.h), color);
        self.fill_rect(Rect::new(right, rect.y, 1, rect.h), color);
    }

    fn clear(&mut self, color: Color) {
        let s = self.size();
        self.fill_rect(Rect::from_size(s.width, s.height), color);
    }
}

/// Software renderer writing into an RGBA frame buffer.
pub struct CpuRenderer<'a> {
    frame: &'a mut [u8],
    size: SurfaceSize,
}

impl<'a> CpuRenderer<'a> {
    pub fn new(frame: &'a mut [u8], size: SurfaceSize) -> Self {
        Self { frame, size }
    }

    /// Visible part of `rect`, or `None` when it is off-surface or the buffer is too small.
    fn clip(&self, rect: Rect) -> Option<Rect> {
        if self.frame.len() < self.size.rgba_len() || self.size.is_empty() {
            return None;
        }
        let x1 = rect.x.saturating_add(rect.w).min(self.size.width);
        let y1 = rect.y.saturating_add(rect.h).min(self.size.height);
        if rect.x >= x1 || rect.y >= y1 {
            return None;
        }
        Some(Rect::new(rect.x, rect.y, x1 - rect.x, y1 - rect.y))
    }

    fn for_each_pixel(&mut self, rect: Rect, mut f: impl FnMut(&mut [u8])) {
        let Some(rect) = self.clip(rect) else {
            return;
        };
        let stride = self.size.width as usize * 4;
        for y in rect.y..rect.y + rect.h {
            let start = y as usize * stride + rect.x as usize * 4;
            let end = start + rect.w as usize * 4;
            for px in self.frame[start..end].chunks_exact_mut(4) {
                f(px);
            }
        }
    }
}

impl Renderer2d for CpuRenderer<'_> {
    fn begin_frame(&mut self, size: SurfaceSize) {
        self.size = size;
    }

    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.for_each_pixel(rect, |px| px.copy_from_slice(&color));
    }

    fn blend_rect(&mut self, rect: Rect, color: Color, alpha: u8) {
        match alpha {
            0 => {}
            255 => self.fill_rect(rect, color),
            _ => {
                let a = alpha as u32;
                let inv = 255 - a;
                self.for_each_pixel(rect, |px| {
                    for c in 0..3 {
                        px[c] = ((px[c] as u32 * inv + color[c] as u32 * a + 127) / 255) as u8;
                    }
                    px[3] = 255;
                });
            }
        }
    }

    fn draw_text_scaled(&mut self, x: u32, y: u32, text: &str, color: Color, scale: u32) {
        let scale = scale.max(1);
        let mut cursor_x = x;
        let mut cursor_y = y;
        for ch in text.chars() {
            match ch {
                '\n' => {
                    cursor_x = x;
                    cursor_y = cursor_y.saturating_add(line_advance_y(scale));
                    continue;
                }
                ' ' => {}
                _ => {
                    for (row, bits) in glyph_rows(ch).into_iter().enumerate() {
                        let py = cursor_y.saturating_add(row as u32 * scale);
                        for col in 0..GLYPH_W {
                            if bits & (1u8 << (GLYPH_W - 1 - col)) != 0 {
                                let px = cursor_x.saturating_add(col * scale);
                                self.fill_rect(Rect::new(px, py, scale, scale), color);
                            }
                        }
                    }
                }
            }
            cursor_x = cursor_x.saturating_add(glyph_advance_x(scale));
            if cursor_x >= self.size.width {
                break;
            }
        }
    }
}

fn glyph_rows(ch: char) -> [u8; GLYPH_H as usize] {
    match ch.to_ascii_uppercase() {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],

        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'J' => [0b111, 0b001, 0b001, 0b101, 0b010],
        'K' => [0b101, 0b110, 0b100, 0b110, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'N' => [0b101, 0b111, 0b111, 0b111, 0b101],
        'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'R' => [0b111, 0b101, 0b111, 0b110, 0b101],
        'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b101, 0b010],
        'W' => [0b101, 0b101, 0b111, 0b111, 0b101],
        'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'Y' => [0b101, 0b101, 0b010, 0b010, 0b010],
        'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],

        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '_' => [0b000, 0b000, 0b000, 0b000, 0b111],
        '<' => [0b001, 0b010, 0b100, 0b010, 0b001],
        '>' => [0b100, 0b010, 0b001, 0b010, 0b100],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '!' => [0b010, 0b010, 0b010, 0b000, 0b010],

        _ => [0b111, 0b001, 0b010, 0b000, 0b010], // '?'
    }
}
