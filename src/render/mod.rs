pub mod color;
pub mod legend;
pub mod text;

pub use color::Rgba;
pub use legend::language_entries;
pub use text::TextPainter;

use crate::error::{BragError, Result};
use crate::language::LanguageTable;
use crate::model::{LanguageEntry, RenderOptions, Totals};
use crate::report::block_lines;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Rect, Transform};
use tracing::debug;

pub const LANGUAGE_CANVAS_HEIGHT: u32 = 950;

const DATE_BASELINE: i32 = 280;
const LINE_OFFSETS: [i32; 3] = [100, 150, 200];
const BAR_OFFSET: i32 = 280;
const BAR_WIDTH: i32 = 600;
const BAR_HEIGHT: i32 = 40;
const LEGEND_GAP: i32 = 40;
const CIRCLE_RADIUS: i32 = 8;
const CIRCLE_LIFT: i32 = 6;
const CIRCLE_TEXT_GAP: i32 = 10;
const LEGEND_ITEM_GAP: i32 = 30;

/// Draws the summary card.
pub struct Renderer {
    painter: TextPainter,
    languages: &'static LanguageTable,
}

impl Renderer {
    pub fn new(font: Option<&Path>) -> Result<Self> {
        Ok(Self {
            painter: TextPainter::new(font)?,
            languages: LanguageTable::builtin(),
        })
    }

    pub fn render(&mut self, totals: &Totals, options: &RenderOptions) -> Result<Pixmap> {
        let entries = if options.show_language_bar {
            language_entries(&totals.languages, self.languages)
        } else {
            Vec::new()
        };

        // room for the bar is kept even when every language has zero lines
        let height = if options.show_language_bar && !totals.languages.is_empty() {
            options.height.max(LANGUAGE_CANVAS_HEIGHT)
        } else {
            options.height
        };

        let mut pixmap = Pixmap::new(options.width, height).ok_or_else(|| {
            BragError::Encode(format!("invalid canvas size {}x{height}", options.width))
        })?;
        pixmap.fill(options.background.to_skia());

        let width = options.width as i32;

        if let Some(label) = &options.date_range {
            let x = (width - self.painter.measure(label)) / 2;
            self.painter.draw(&mut pixmap, label, x, DATE_BASELINE, options.foreground);
        }

        let colors = [
            options.foreground,
            options.insertion_color,
            options.deletion_color,
        ];
        for ((line, offset), color) in block_lines(totals).iter().zip(LINE_OFFSETS).zip(colors) {
            let x = (width - self.painter.measure(line)) / 2;
            self.painter
                .draw(&mut pixmap, line, x, DATE_BASELINE + offset, color);
        }

        if !entries.is_empty() {
            self.draw_language_bar(&mut pixmap, &entries, DATE_BASELINE + BAR_OFFSET, options);
        }

        Ok(pixmap)
    }

    fn draw_language_bar(
        &mut self,
        pixmap: &mut Pixmap,
        entries: &[LanguageEntry],
        bar_y: i32,
        options: &RenderOptions,
    ) {
        let bar_x = (options.width as i32 - BAR_WIDTH) / 2;

        let mut paint = Paint::default();
        let mut x = bar_x;
        for entry in entries {
            let segment = (BAR_WIDTH as f64 * entry.percentage / 100.0) as i32;
            if segment <= 0 {
                continue;
            }
            if let Some(rect) =
                Rect::from_xywh(x as f32, bar_y as f32, segment as f32, BAR_HEIGHT as f32)
            {
                paint.set_color(entry.color.to_skia());
                pixmap.fill_rect(rect, &paint, Transform::identity(), None);
            }
            x += segment;
        }

        // No wrapping: a long legend runs past the right edge.
        let label_y = bar_y + BAR_HEIGHT + LEGEND_GAP;
        let mut x = bar_x;
        for entry in entries {
            let cx = x + CIRCLE_RADIUS;
            let cy = label_y - CIRCLE_LIFT;
            if let Some(circle) =
                PathBuilder::from_circle(cx as f32, cy as f32, CIRCLE_RADIUS as f32)
            {
                paint.set_color(entry.color.to_skia());
                pixmap.fill_path(&circle, &paint, FillRule::Winding, Transform::identity(), None);
            }

            let text_x = x + CIRCLE_RADIUS * 2 + CIRCLE_TEXT_GAP;
            self.painter
                .draw(pixmap, &entry.name, text_x, label_y, options.foreground);
            x = text_x + self.painter.measure(&entry.name) + LEGEND_ITEM_GAP;
        }
    }

    /// Renders and replaces `path` in one step; a failed encode or write
    /// leaves any existing file untouched.
    pub fn render_to_file(
        &mut self,
        totals: &Totals,
        options: &RenderOptions,
        path: &Path,
    ) -> Result<()> {
        let pixmap = self.render(totals, options)?;
        let png = pixmap
            .encode_png()
            .map_err(|e| BragError::Encode(format!("failed to encode PNG: {e}")))?;

        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&png)?;
        tmp.as_file().sync_all()?;
        tmp.persist(path)?;

        debug!(path = %path.display(), bytes = png.len(), "wrote image");
        Ok(())
    }
}
