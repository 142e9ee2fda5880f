use super::Rgba;
use crate::error::{BragError, Result};
use cosmic_text::{
    fontdb, Attrs, Buffer, Family, FontSystem, Metrics, Shaping, SwashCache,
};
use std::fs;
use std::path::Path;
use tiny_skia::{Paint, Pixmap, Rect, Transform};

pub const FONT_SIZE: f32 = 24.0;
const LINE_HEIGHT: f32 = 32.0;

/// Shapes and rasterizes single lines of text onto a pixmap.
pub struct TextPainter {
    font_system: FontSystem,
    swash_cache: SwashCache,
    metrics: Metrics,
}

impl TextPainter {
    /// Uses the host font database, or only `font` when one is given.
    pub fn new(font: Option<&Path>) -> Result<Self> {
        let font_system = match font {
            Some(path) => {
                let data = fs::read(path).map_err(|e| {
                    BragError::Font(format!("could not read '{}': {e}", path.display()))
                })?;
                let mut db = fontdb::Database::new();
                db.load_font_data(data);
                FontSystem::new_with_locale_and_db("en-US".to_string(), db)
            }
            None => FontSystem::new(),
        };

        if font_system.db().len() == 0 {
            return Err(BragError::Font("no usable font face found".to_string()));
        }

        Ok(Self {
            font_system,
            swash_cache: SwashCache::new(),
            metrics: Metrics::new(FONT_SIZE, LINE_HEIGHT),
        })
    }

    fn shape(&mut self, text: &str) -> Buffer {
        let mut buffer = Buffer::new(&mut self.font_system, self.metrics);
        buffer.set_size(&mut self.font_system, None, None);
        buffer.set_text(
            &mut self.font_system,
            text,
            Attrs::new().family(Family::Monospace),
            Shaping::Advanced,
        );
        buffer.shape_until_scroll(&mut self.font_system, false);
        buffer
    }

    /// Advance width of `text` in whole pixels.
    pub fn measure(&mut self, text: &str) -> i32 {
        let buffer = self.shape(text);
        let width = buffer
            .layout_runs()
            .fold(0.0f32, |widest, run| widest.max(run.line_w));
        width.ceil() as i32
    }

    /// Draws `text` with its baseline at `baseline`, starting at `x`.
    pub fn draw(&mut self, pixmap: &mut Pixmap, text: &str, x: i32, baseline: i32, color: Rgba) {
        let buffer = self.shape(text);
        let ascent = buffer
            .layout_runs()
            .next()
            .map(|run| run.line_y)
            .unwrap_or(FONT_SIZE);
        let top = baseline - ascent.round() as i32;

        let mut paint = Paint {
            anti_alias: false,
            ..Paint::default()
        };
        buffer.draw(
            &mut self.font_system,
            &mut self.swash_cache,
            color.to_text(),
            |gx, gy, w, h, c| {
                if c.a() == 0 {
                    return;
                }
                let Some(rect) =
                    Rect::from_xywh((x + gx) as f32, (top + gy) as f32, w as f32, h as f32)
                else {
                    return;
                };
                paint.set_color_rgba8(c.r(), c.g(), c.b(), c.a());
                pixmap.fill_rect(rect, &paint, Transform::identity(), None);
            },
        );
    }
}
