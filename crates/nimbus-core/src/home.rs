//! Home screen model: four weather labels plus an indoor readout.
//!
//! Label placement follows the stock panel: a right-aligned column with the
//! temperature on top, then condition, date and weekday. The indoor line from
//! the sibling sensor flow sits in the lower-left corner.
//!
//! Nothing weather-related is drawn until [`apply_weather`] has been called
//! once; absence of data is silent.
//!
//! [`apply_weather`]: HomeScreen::apply_weather

use core::fmt::Write;

use embedded_graphics::{
    Drawable as EgDrawable,
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
    text::Alignment,
};

use crate::ui::{BACKGROUND, TextLabel, TextSize};

const RIGHT_MARGIN_PX: i32 = 50;
const TEMPERATURE_Y_PX: i32 = 80;
const CONDITION_Y_PX: i32 = 140;
const DATE_Y_PX: i32 = 180;
const WEEKDAY_Y_PX: i32 = 220;
const INDOOR_MARGIN_PX: i32 = 10;

pub struct HomeScreen {
    bounds: Rectangle,
    temperature: TextLabel,
    condition: TextLabel,
    date: TextLabel,
    weekday: TextLabel,
    indoor: TextLabel,
    background_drawn: bool,
}

impl HomeScreen {
    pub fn new(bounds: Rectangle) -> Self {
        let right = bounds.top_left.x + bounds.size.width as i32 - RIGHT_MARGIN_PX;
        let top = bounds.top_left.y;
        let bottom = bounds.top_left.y + bounds.size.height as i32 - INDOOR_MARGIN_PX;

        Self {
            bounds,
            temperature: TextLabel::new(
                Point::new(right, top + TEMPERATURE_Y_PX),
                Alignment::Right,
                TextSize::Large,
            ),
            condition: TextLabel::new(
                Point::new(right, top + CONDITION_Y_PX),
                Alignment::Right,
                TextSize::Small,
            ),
            date: TextLabel::new(
                Point::new(right, top + DATE_Y_PX),
                Alignment::Right,
                TextSize::Small,
            ),
            weekday: TextLabel::new(
                Point::new(right, top + WEEKDAY_Y_PX),
                Alignment::Right,
                TextSize::Small,
            ),
            indoor: TextLabel::new(
                Point::new(bounds.top_left.x + INDOOR_MARGIN_PX, bottom),
                Alignment::Left,
                TextSize::Small,
            ),
            background_drawn: false,
        }
    }

    /// Pushes one complete reading onto the screen. The temperature is
    /// rendered with one decimal, e.g. `21.5°C`.
    pub fn apply_weather(&mut self, temp_c: f64, condition: &str, date: &str, weekday: &str) {
        let mut temp_text: heapless::String<16> = heapless::String::new();
        write!(temp_text, "{:.1}°C", temp_c).ok();

        self.temperature.set_text(&temp_text);
        self.condition.set_text(condition);
        self.date.set_text(date);
        self.weekday.set_text(weekday);
    }

    /// Updates the indoor readout from the sensor flow.
    pub fn apply_indoor(&mut self, temp_c: f32, humidity_pct: f32) {
        let mut text: heapless::String<32> = heapless::String::new();
        write!(text, "Indoor {:.1}°C  {:.0}% RH", temp_c, humidity_pct).ok();
        self.indoor.set_text(&text);
    }

    pub fn is_dirty(&self) -> bool {
        !self.background_drawn
            || self.labels().iter().any(|label| label.is_dirty())
    }

    /// Redraws the screen if anything changed since the last call.
    ///
    /// The screen is small and static, so a dirty frame repaints the whole
    /// background and every label rather than tracking per-label regions.
    pub fn draw<D: DrawTarget<Color = Rgb565>>(&mut self, display: &mut D) -> Result<(), D::Error> {
        if !self.is_dirty() {
            return Ok(());
        }

        self.bounds
            .into_styled(PrimitiveStyle::with_fill(BACKGROUND))
            .draw(display)?;
        self.background_drawn = true;

        for label in self.labels() {
            label.draw(display)?;
        }
        for label in self.labels_mut() {
            label.mark_clean();
        }
        Ok(())
    }

    fn labels(&self) -> [&TextLabel; 5] {
        [
            &self.temperature,
            &self.condition,
            &self.date,
            &self.weekday,
            &self.indoor,
        ]
    }

    fn labels_mut(&mut self) -> [&mut TextLabel; 5] {
        [
            &mut self.temperature,
            &mut self.condition,
            &mut self.date,
            &mut self.weekday,
            &mut self.indoor,
        ]
    }

    #[cfg(test)]
    fn texts(&self) -> [&str; 5] {
        [
            self.temperature.text(),
            self.condition.text(),
            self.date.text(),
            self.weekday.text(),
            self.indoor.text(),
        ]
    }
}
