/*
 *  display/components/weather.rs
 *
 *  dialface - analog watch face renderer
 *  (c) 2020-26 Stuart Hunter
 *
 *  Temperature ring, temperature text and condition icon
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use std::fmt::Write;

use arrayvec::ArrayString;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::PrimitiveStyle;

use crate::display::color::Ink;
use crate::display::layout::{LayoutConfig, WeatherLayout};
use crate::draw::{draw_circle_from_center, draw_glyph_centered, draw_text_centered};
use crate::face::state::FaceState;
use crate::glyphs::{get_weather_glyph_slice, WEATHER_GLYPH_HEIGHT, WEATHER_GLYPH_WIDTH};

/// Shown until the first weather message arrives
pub const NO_TEMPERATURE: &str = "--";

/// Temperature label for the current state
pub fn temperature_text(temperature: Option<i32>) -> ArrayString<12> {
    let mut text = ArrayString::new();
    match temperature {
        Some(t) => {
            let _ = write!(&mut text, "{}", t);
        }
        None => {
            let _ = text.try_push_str(NO_TEMPERATURE);
        }
    }
    text
}

/// Weather component
#[derive(Debug, Clone)]
pub struct WeatherDisplay {
    layout: WeatherLayout,
}

impl WeatherDisplay {
    pub fn new(layout: &LayoutConfig) -> Self {
        Self { layout: layout.weather.clone() }
    }

    pub fn render<D>(&self, state: &FaceState, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Ink>,
    {
        draw_circle_from_center(
            target,
            self.layout.ring_center,
            self.layout.ring_radius,
            PrimitiveStyle::with_stroke(Ink::Black, 1),
        )?;

        let text = temperature_text(state.temperature());
        draw_text_centered(target, &text, self.layout.temp_text, &FONT_6X10, Ink::Black)?;

        // unknown codes leave the icon box empty
        if let Some(bits) = get_weather_glyph_slice(state.weather_icon()) {
            draw_glyph_centered(
                target,
                bits,
                Size::new(WEATHER_GLYPH_WIDTH, WEATHER_GLYPH_HEIGHT),
                self.layout.icon,
                Ink::Black,
            )?;
        }
        Ok(())
    }
}
