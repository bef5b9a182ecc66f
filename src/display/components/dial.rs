/*
 *  display/components/dial.rs
 *
 *  dialface - analog watch face renderer
 *  (c) 2020-26 Stuart Hunter
 *
 *  Dial background: white disc, sixty tick marks, date frame
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
use embedded_graphics::primitives::{PrimitiveStyle, RoundedRectangle};

use crate::display::color::Ink;
use crate::display::layout::{DialLayout, LayoutConfig, TickStyle};
use crate::draw::{draw_circle_from_center, draw_line};
use crate::geometry::point_on_circle;

/// Static dial; depends on the layout only, never on face state
#[derive(Debug, Clone)]
pub struct DialFace {
    center: Point,
    layout: DialLayout,
}

impl DialFace {
    pub fn new(layout: &LayoutConfig) -> Self {
        Self {
            center: layout.center,
            layout: layout.dial.clone(),
        }
    }

    /// Tick style for tick `index`; every `major_every`-th tick is major
    pub fn tick_style(&self, index: u32) -> TickStyle {
        if index % self.layout.major_every.max(1) == 0 {
            self.layout.major_tick
        } else {
            self.layout.minor_tick
        }
    }

    /// Inner and outer end of tick `index`
    pub fn tick_endpoints(&self, index: u32) -> (Point, Point) {
        let angle = index as f32 / self.layout.tick_count as f32;
        let style = self.tick_style(index);
        let outer = self.layout.radius;
        (
            point_on_circle(self.center, outer - style.length, angle),
            point_on_circle(self.center, outer, angle),
        )
    }

    pub fn render<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Ink>,
    {
        draw_circle_from_center(
            target,
            self.center,
            self.layout.radius.max(0) as u32,
            PrimitiveStyle::with_fill(Ink::White),
        )?;

        for i in 0..self.layout.tick_count {
            let (start, end) = self.tick_endpoints(i);
            draw_line(target, end, start, Ink::Black, self.tick_style(i).stroke_width)?;
        }

        // day | date box
        let frame = self.layout.date_frame;
        let corner = self.layout.date_frame_corner;
        RoundedRectangle::with_equal_corners(frame, Size::new(corner, corner))
            .into_styled(PrimitiveStyle::with_stroke(Ink::Black, 1))
            .draw(target)?;
        let top = frame.top_left.y;
        let bottom = top + frame.size.height as i32 - 2;
        draw_line(
            target,
            Point::new(self.layout.date_divider_x, top),
            Point::new(self.layout.date_divider_x, bottom),
            Ink::Black,
            1,
        )?;
        Ok(())
    }
}
