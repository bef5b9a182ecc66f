/*
 *  glyphs.rs
 *
 *  dialface - analog watch face renderer
 *  (c) 2020-26 Stuart Hunter
 *
 *  1-bit glyph bitmaps: status icons and the weather icon strip
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

use crate::face::state::WeatherIcon;

/// Helper function to get a slice for a specific glyph from a binary set
pub fn get_glyph_slice(raw_glyph: &'static [u8], index: usize, w: u32, h: u32) -> &'static [u8] {
    let byte_size = (w as usize).div_ceil(8) * h as usize;
    let start_idx = index * byte_size;
    let end_idx = start_idx + byte_size;
    &raw_glyph[start_idx..end_idx]
}

/// Status glyphs are 14x14, rows padded to 2 bytes
pub const STATUS_GLYPH_WIDTH: u32 = 14;
pub const STATUS_GLYPH_HEIGHT: u32 = 14;

pub const GLYPH_CHARGING: [u8; 28] = [
    0x00, 0xe0, 0x01, 0xc0, 0x03, 0x80, 0x07, 0x00,
    0x0e, 0x00, 0x1f, 0xe0, 0x3f, 0xc0, 0x07, 0x80,
    0x0f, 0x00, 0x1c, 0x00, 0x38, 0x00, 0x70, 0x00,
    0x60, 0x00, 0x40, 0x00,
];

pub const GLYPH_LINK_LOST: [u8; 28] = [
    0x04, 0x00, 0x06, 0x00, 0x45, 0x08, 0x24, 0x90,
    0x15, 0x20, 0x0e, 0x40, 0x04, 0x80, 0x0e, 0x00,
    0x15, 0x00, 0x24, 0x80, 0x45, 0x00, 0x06, 0x00,
    0x04, 0x00, 0x00, 0x00,
];

/// Shoe shown under the step count
pub const SHOE_GLYPH_WIDTH: u32 = 24;
pub const SHOE_GLYPH_HEIGHT: u32 = 16;

pub const GLYPH_SHOE: [u8; 48] = [
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, 0xf0, 0x00, 0x02, 0x10, 0x00,
    0x02, 0x10, 0x00, 0x02, 0x18, 0x00, 0x02, 0x0c, 0x00, 0x02, 0x07, 0x00,
    0x02, 0x01, 0xe0, 0x06, 0x00, 0x38, 0x0e, 0x00, 0x0c, 0x0f, 0xff, 0xfc,
    0x0f, 0xff, 0xfc, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// Weather icon dimensions (10 glyphs in vertical strip)
pub const WEATHER_GLYPH_WIDTH: u32 = 24;
pub const WEATHER_GLYPH_HEIGHT: u32 = 16;

/// Order follows [`WeatherIcon::ALL`]
static WEATHER_RAW_DATA: [u8; 480] = [
    // clear-day
    0x08, 0x08, 0x08, 0x04, 0x08, 0x10, 0x02, 0x08, 0x20, 0x01, 0x00, 0x40,
    0x00, 0xbc, 0x80, 0x00, 0x66, 0x00, 0x00, 0xc3, 0x00, 0x00, 0x81, 0x00,
    0x7e, 0x81, 0x3f, 0x00, 0xc3, 0x00, 0x00, 0x66, 0x00, 0x00, 0x3c, 0x00,
    0x00, 0x80, 0x80, 0x01, 0x00, 0x40, 0x02, 0x08, 0x20, 0x04, 0x08, 0x10,
    // clear-night
    0x00, 0x00, 0x00, 0x00, 0x70, 0x00, 0x00, 0xe0, 0x00, 0x01, 0xe0, 0x00,
    0x03, 0xc0, 0x00, 0x07, 0xc0, 0x00, 0x07, 0xc0, 0x00, 0x07, 0xe0, 0x00,
    0x07, 0xe0, 0x00, 0x07, 0xf0, 0x00, 0x07, 0xf8, 0x00, 0x03, 0xff, 0xc0,
    0x01, 0xff, 0x80, 0x00, 0xff, 0x00, 0x00, 0x7e, 0x00, 0x00, 0x00, 0x00,
    // rain
    0x00, 0x3c, 0x00, 0x00, 0x42, 0x00, 0x00, 0x81, 0x00, 0x00, 0x81, 0x00,
    0x07, 0x00, 0xe0, 0x08, 0x00, 0x10, 0x08, 0x00, 0x10, 0x08, 0x00, 0x10,
    0x08, 0x00, 0x10, 0x07, 0xff, 0xe0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x88, 0x80, 0x01, 0x11, 0x00, 0x01, 0x11, 0x00, 0x02, 0x22, 0x00,
    // snow
    0x00, 0x3c, 0x00, 0x00, 0x42, 0x00, 0x00, 0x81, 0x00, 0x00, 0x81, 0x00,
    0x07, 0x00, 0xe0, 0x08, 0x00, 0x10, 0x08, 0x00, 0x10, 0x08, 0x00, 0x10,
    0x08, 0x00, 0x10, 0x07, 0xff, 0xe0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x01, 0x00, 0x40, 0x03, 0x88, 0xe0, 0x01, 0x1c, 0x40, 0x00, 0x08, 0x00,
    // sleet
    0x00, 0x3c, 0x00, 0x00, 0x42, 0x00, 0x00, 0x81, 0x00, 0x00, 0x81, 0x00,
    0x07, 0x00, 0xe0, 0x08, 0x00, 0x10, 0x08, 0x00, 0x10, 0x08, 0x00, 0x10,
    0x08, 0x00, 0x10, 0x07, 0xff, 0xe0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x01, 0x11, 0x00, 0x02, 0x3a, 0x00, 0x02, 0x12, 0x10, 0x04, 0x04, 0x00,
    // wind
    0x00, 0x01, 0x80, 0x00, 0x02, 0x40, 0x00, 0x02, 0x40, 0x00, 0x02, 0x40,
    0x3f, 0xff, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x3f, 0xff, 0xf8, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x06, 0x00,
    0x07, 0xfd, 0x00, 0x00, 0x09, 0x00, 0x00, 0x09, 0x00, 0x00, 0x06, 0x00,
    // fog
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1f, 0xff, 0xe0,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x07, 0xff, 0xf8, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x1f, 0xff, 0xe0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x07, 0xff, 0xf8, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    // cloudy
    0x00, 0x00, 0x00, 0x00, 0x7c, 0x00, 0x00, 0x82, 0x00, 0x01, 0x01, 0x00,
    0x01, 0x01, 0x00, 0x0e, 0x00, 0xe0, 0x10, 0x00, 0x10, 0x20, 0x00, 0x08,
    0x20, 0x00, 0x08, 0x20, 0x00, 0x08, 0x20, 0x00, 0x08, 0x10, 0xfe, 0x10,
    0x0f, 0x01, 0xe0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    // partly-cloudy-day
    0x20, 0x82, 0x00, 0x10, 0x84, 0x00, 0x08, 0x88, 0x00, 0x07, 0xd0, 0x00,
    0x06, 0x6f, 0x80, 0x04, 0x30, 0x40, 0xfc, 0x30, 0x40, 0x06, 0x60, 0x30,
    0x03, 0x80, 0x0c, 0x05, 0x00, 0x04, 0x0a, 0x00, 0x02, 0x11, 0x00, 0x04,
    0x21, 0x1f, 0xc4, 0x00, 0xe0, 0x38, 0x00, 0x80, 0x00, 0x00, 0x00, 0x00,
    // partly-cloudy-night
    0x00, 0x00, 0x00, 0x03, 0x00, 0x00, 0x0e, 0x00, 0x00, 0x0e, 0x00, 0x00,
    0x1e, 0x0f, 0x80, 0x1e, 0x10, 0x40, 0x1e, 0x10, 0x40, 0x1f, 0x60, 0x30,
    0x0f, 0x80, 0x0c, 0x0f, 0x00, 0x04, 0x02, 0x00, 0x02, 0x01, 0x00, 0x04,
    0x01, 0x1f, 0xc4, 0x00, 0xe0, 0x38, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// Get the bitmap for a weather icon, `None` draws nothing
pub fn get_weather_glyph_slice(icon: WeatherIcon) -> Option<&'static [u8]> {
    let index = WeatherIcon::ALL.iter().position(|i| *i == icon)?;
    Some(get_glyph_slice(
        &WEATHER_RAW_DATA,
        index,
        WEATHER_GLYPH_WIDTH,
        WEATHER_GLYPH_HEIGHT,
    ))
}
