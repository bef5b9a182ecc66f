/*
 *  display/components/connectivity.rs
 *
 *  dialface - analog watch face renderer
 *  (c) 2020-26 Stuart Hunter
 *
 *  Phone link indicator, shown only while disconnected
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

use embedded_graphics::prelude::*;

use crate::display::color::Ink;
use crate::display::layout::{ConnectivityLayout, LayoutConfig};
use crate::draw::draw_glyph_centered;
use crate::face::state::FaceState;
use crate::glyphs::{GLYPH_LINK_LOST, STATUS_GLYPH_HEIGHT, STATUS_GLYPH_WIDTH};

#[derive(Debug, Clone)]
pub struct ConnectivityDisplay {
    layout: ConnectivityLayout,
}

impl ConnectivityDisplay {
    pub fn new(layout: &LayoutConfig) -> Self {
        Self { layout: layout.connectivity.clone() }
    }

    pub fn render<D>(&self, state: &FaceState, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Ink>,
    {
        if state.connected() {
            return Ok(());
        }
        draw_glyph_centered(
            target,
            &GLYPH_LINK_LOST,
            Size::new(STATUS_GLYPH_WIDTH, STATUS_GLYPH_HEIGHT),
            self.layout.bounds,
            self.layout.ink,
        )
    }
}
