/*
 *  display/color.rs
 *
 *  dialface - analog watch face renderer
 *  (c) 2020-26 Stuart Hunter
 *
 *  Layer ink: black, white, or transparent
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

use embedded_graphics::pixelcolor::{BinaryColor, PixelColor};

/// Pixel color used inside render layers
///
/// Layers are composed on top of each other, so they need a transparent
/// value in addition to the two panel colors. Composition turns `Ink`
/// into the panel's `BinaryColor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ink {
    /// Nothing drawn here, lower layers show through
    #[default]
    Clear,

    /// Black/Off
    Black,

    /// White/On
    White,
}

impl PixelColor for Ink {
    type Raw = ();
}

impl Ink {
    /// Convert to BinaryColor, `None` for transparent pixels
    pub fn to_binary(self) -> Option<BinaryColor> {
        match self {
            Ink::Clear => None,
            Ink::Black => Some(BinaryColor::Off),
            Ink::White => Some(BinaryColor::On),
        }
    }
}

/// Canvas background behind every layer
pub const BACKGROUND: BinaryColor = BinaryColor::Off;
