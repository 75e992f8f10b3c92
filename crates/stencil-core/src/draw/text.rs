//! Multi-line text blocks with size measurement.
//!
//! Labels keep their line breaks exactly as declared, including empty
//! lines; the original diagram scripts use runs of blank lines to nudge a
//! label away from its connection line, and collapsing them would move
//! text around.

use std::sync::{Mutex, OnceLock};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};
use log::info;

use crate::geometry::Size;

/// Shared font system. Building a [`FontSystem`] scans system fonts, which
/// is far too expensive to repeat per measurement.
static FONT_SYSTEM: OnceLock<Mutex<FontSystem>> = OnceLock::new();

fn font_system() -> &'static Mutex<FontSystem> {
    FONT_SYSTEM.get_or_init(|| {
        info!("Initializing FontSystem");
        Mutex::new(FontSystem::new())
    })
}

/// A label split into lines, with the font size it will be rendered at.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    lines: Vec<String>,
    font_size: u32,
}

impl TextBlock {
    /// Splits `text` on `\n`, preserving empty lines verbatim.
    pub fn new(text: &str, font_size: u32) -> Self {
        Self {
            lines: text.split('\n').map(str::to_string).collect(),
            font_size,
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn font_size(&self) -> u32 {
        self.font_size
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|line| line.trim().is_empty())
    }

    /// Font size in CSS pixels (points scaled for standard DPI).
    pub fn font_size_px(&self) -> f32 {
        self.font_size as f32 * 1.33
    }

    /// Line height in pixels.
    pub fn line_height(&self) -> f32 {
        self.font_size_px() * 1.2
    }

    /// Measured size of the whole block.
    ///
    /// Width is the widest line; height counts every line, including empty
    /// ones, at the block's line height.
    pub fn size(&self) -> Size {
        let width = self
            .lines
            .iter()
            .map(|line| measure_line_width(line, self.font_size_px()))
            .fold(0.0_f32, f32::max);

        Size::new(width, self.lines.len() as f32 * self.line_height())
    }
}

/// Measures one line of text with cosmic-text.
///
/// Falls back to a character-count estimate when no fonts are available
/// (headless CI images often ship without any), so measurement is always
/// defined and deterministic on a given machine.
fn measure_line_width(line: &str, font_size_px: f32) -> f32 {
    if line.is_empty() {
        return 0.0;
    }

    let mut font_system = font_system()
        .lock()
        .expect("Failed to acquire font system lock");

    let metrics = Metrics::new(font_size_px, font_size_px * 1.2);
    let mut buffer = Buffer::new(&mut font_system, metrics);
    let mut buffer = buffer.borrow_with(&mut font_system);

    let attrs = Attrs::new().family(Family::Name("Arial"));
    buffer.set_size(None, None);
    buffer.set_text(line, &attrs, Shaping::Advanced, None);
    buffer.shape_until_scroll(true);

    let mut max_width: f32 = 0.0;
    let mut measured = false;
    for run in buffer.layout_runs() {
        if let Some(last) = run.glyphs.last() {
            max_width = max_width.max(last.x + last.w);
            measured = true;
        }
    }

    if measured {
        max_width
    } else {
        line.chars().count() as f32 * font_size_px * 0.6
    }
}
