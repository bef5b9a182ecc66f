/*
 *  vframebuf.rs
 *
 *  dialface - analog watch face renderer
 *  (c) 2020-26 Stuart Hunter
 *
 *  Runtime-sized framebuffer placed anywhere on the canvas
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

use core::convert::Infallible;
use embedded_graphics::geometry::{Dimensions, Size};
use embedded_graphics::pixelcolor::PixelColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// A runtime-sized framebuffer for embedded-graphics.
///
/// The buffer covers `area` in canvas coordinates; drawing outside it is
/// silently clipped. A full-canvas buffer simply has its origin at (0,0).
#[derive(Debug, Clone)]
pub struct VarFrameBuf<C: PixelColor> {
    buf: Vec<C>,
    area: Rectangle,
}

impl<C: PixelColor> VarFrameBuf<C> {
    pub fn new(width: u32, height: u32, fill: C) -> Self {
        Self::with_area(Rectangle::new(Point::zero(), Size::new(width, height)), fill)
    }

    /// Buffer covering `area` of the canvas.
    pub fn with_area(area: Rectangle, fill: C) -> Self {
        let len = (area.size.width as usize).saturating_mul(area.size.height as usize);
        Self { buf: vec![fill; len], area }
    }

    pub fn width(&self) -> usize { self.area.size.width as usize }
    pub fn height(&self) -> usize { self.area.size.height as usize }

    /// Canvas rectangle covered by this buffer
    pub fn area(&self) -> Rectangle { self.area }

    /// Immutable raw access, row-major from the top-left of `area`
    pub fn as_slice(&self) -> &[C] { &self.buf }

    /// Clear to a color
    pub fn clear_color(&mut self, color: C) {
        self.buf.fill(color);
    }

    /// Color at canvas position `p`, `None` when outside the buffer
    pub fn pixel(&self, p: Point) -> Option<C> {
        self.idx(p).map(|i| self.buf[i])
    }

    /// Iterate `(canvas point, color)` over every pixel in the buffer
    pub fn pixels(&self) -> impl Iterator<Item = (Point, C)> + '_ {
        let w = self.width();
        let origin = self.area.top_left;
        self.buf.iter().enumerate().map(move |(i, &c)| {
            (origin + Point::new((i % w) as i32, (i / w) as i32), c)
        })
    }

    /// Count pixels matching `color`
    pub fn count(&self, color: C) -> usize {
        self.buf.iter().filter(|&&c| c == color).count()
    }

    /// Map canvas point to linear index; returns None if out of bounds
    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        let local = p - self.area.top_left;
        if local.x >= 0 && local.y >= 0 {
            let (x, y) = (local.x as usize, local.y as usize);
            if x < self.width() && y < self.height() {
                return Some(y * self.width() + x);
            }
        }
        None
    }
}

impl<C: PixelColor> Dimensions for VarFrameBuf<C> {
    fn bounding_box(&self) -> Rectangle {
        self.area
    }
}

impl<C: PixelColor> DrawTarget for VarFrameBuf<C> {
    type Color = C;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, c) in pixels {
            if let Some(i) = self.idx(p) {
                self.buf[i] = c;
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.clear_color(color);
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        // fast path for the horizontal spans the polygon fill emits
        let clipped = area.intersection(&self.area);
        if clipped.is_zero_sized() {
            return Ok(());
        }
        let w = self.width();
        let local = clipped.top_left - self.area.top_left;
        let (x0, y0) = (local.x as usize, local.y as usize);
        for row in 0..clipped.size.height as usize {
            let base = (y0 + row) * w + x0;
            self.buf[base..base + clipped.size.width as usize].fill(color);
        }
        Ok(())
    }
}
