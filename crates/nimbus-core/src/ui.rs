//! Minimal text widgets for the home screen.
//!
//! The panel only ever shows a handful of static labels, so there is no
//! container or layout system here; each label is an anchored run of text
//! with dirty tracking so the draw loop can skip clean frames.

use embedded_graphics::{
    Drawable as EgDrawable,
    mono_font::{
        MonoTextStyle,
        iso_8859_1::{FONT_7X13, FONT_10X20},
    },
    pixelcolor::Rgb565,
    prelude::*,
    text::{Alignment, Text},
};

pub const BACKGROUND: Rgb565 = Rgb565::BLACK;
pub const TEXT_COLOR: Rgb565 = Rgb565::WHITE;

/// Label font size. The ISO 8859-1 fonts carry the `°` glyph the temperature
/// readout needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSize {
    Small,
    Large,
}

impl TextSize {
    fn style(self) -> MonoTextStyle<'static, Rgb565> {
        match self {
            TextSize::Small => MonoTextStyle::new(&FONT_7X13, TEXT_COLOR),
            TextSize::Large => MonoTextStyle::new(&FONT_10X20, TEXT_COLOR),
        }
    }
}

/// A single anchored text run.
///
/// An empty label draws nothing, which is how the home screen stays blank
/// until the first reading arrives.
pub struct TextLabel {
    anchor: Point,
    alignment: Alignment,
    size: TextSize,
    text: heapless::String<64>,
    dirty: bool,
}

impl TextLabel {
    pub fn new(anchor: Point, alignment: Alignment, size: TextSize) -> Self {
        Self {
            anchor,
            alignment,
            size,
            text: heapless::String::new(),
            dirty: false,
        }
    }

    /// Replaces the label text, truncating to the label's capacity. Marks the
    /// label dirty only when the text actually changed.
    pub fn set_text(&mut self, text: &str) {
        let mut next: heapless::String<64> = heapless::String::new();
        for ch in text.chars() {
            if next.push(ch).is_err() {
                break;
            }
        }
        if next != self.text {
            self.text = next;
            self.dirty = true;
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        if self.text.is_empty() {
            return Ok(());
        }
        Text::with_alignment(&self.text, self.anchor, self.size.style(), self.alignment)
            .draw(display)?;
        Ok(())
    }
}
