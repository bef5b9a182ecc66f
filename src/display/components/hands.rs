/*
 *  display/components/hands.rs
 *
 *  dialface - analog watch face renderer
 *  (c) 2020-26 Stuart Hunter
 *
 *  Hour and minute hands with fillers and centre hub
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
use embedded_graphics::primitives::{PrimitiveStyle, PrimitiveStyleBuilder};

use crate::display::color::Ink;
use crate::display::layout::{HandsLayout, LayoutConfig};
use crate::draw::{draw_circle_from_center, draw_polygon_outline, fill_polygon};
use crate::face::state::{FaceState, HandsVisibility};
use crate::geometry::{rotate_polygon, Polygon};

// hand shapes, pointing at 12 o'clock, origin on the pivot
const MINUTE_HAND: [Point; 5] = [
    Point::new(5, 16),
    Point::new(-5, 16),
    Point::new(-4, -64),
    Point::new(0, -70),
    Point::new(4, -64),
];
const MINUTE_FILLER: [Point; 4] = [
    Point::new(2, -16),
    Point::new(-2, -16),
    Point::new(-2, -60),
    Point::new(2, -60),
];
const HOUR_HAND: [Point; 5] = [
    Point::new(5, 16),
    Point::new(-5, 16),
    Point::new(-4, -48),
    Point::new(0, -54),
    Point::new(4, -48),
];
const HOUR_FILLER: [Point; 4] = [
    Point::new(2, -16),
    Point::new(-2, -16),
    Point::new(-2, -44),
    Point::new(2, -44),
];

/// Minute hand angle in turns
pub fn minute_angle(minute: u32) -> f32 {
    (minute % 60) as f32 / 60.0
}

/// Hour hand angle in turns; advances with the minutes
pub fn hour_angle(hour: u32, minute: u32) -> f32 {
    (hour % 12) as f32 / 12.0 + (minute % 60) as f32 / 720.0
}

/// The four hand shapes, placed on the dial centre once
#[derive(Debug, Clone, PartialEq)]
pub struct HandGeometry {
    pub minute: Polygon,
    pub minute_filler: Polygon,
    pub hour: Polygon,
    pub hour_filler: Polygon,
}

impl HandGeometry {
    pub fn new(pivot: Point, scale: f32) -> Self {
        Self {
            minute: Polygon::scaled_from_local(&MINUTE_HAND, pivot, scale),
            minute_filler: Polygon::scaled_from_local(&MINUTE_FILLER, pivot, scale),
            hour: Polygon::scaled_from_local(&HOUR_HAND, pivot, scale),
            hour_filler: Polygon::scaled_from_local(&HOUR_FILLER, pivot, scale),
        }
    }
}

/// Hands overlay renderer
#[derive(Debug, Clone)]
pub struct HandsDisplay {
    center: Point,
    layout: HandsLayout,
    geometry: HandGeometry,
}

impl HandsDisplay {
    pub fn new(layout: &LayoutConfig) -> Self {
        Self {
            center: layout.center,
            layout: layout.hands.clone(),
            geometry: HandGeometry::new(layout.center, layout.hands.scale),
        }
    }

    pub fn geometry(&self) -> &HandGeometry {
        &self.geometry
    }

    /// Draw the hands for the state's time. Hidden hands draw nothing.
    pub fn render<D>(&self, state: &FaceState, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Ink>,
    {
        if state.hands() == HandsVisibility::Hidden {
            return Ok(());
        }
        let minute = minute_angle(state.minute());
        let hour = hour_angle(state.hour(), state.minute());

        for (shape, angle) in [(&self.geometry.minute, minute), (&self.geometry.hour, hour)] {
            let hand = rotate_polygon(shape, angle);
            fill_polygon(target, hand.points(), Ink::White)?;
            draw_polygon_outline(target, hand.points(), Ink::Black, 1)?;
        }
        for (shape, angle) in [
            (&self.geometry.minute_filler, minute),
            (&self.geometry.hour_filler, hour),
        ] {
            let filler = rotate_polygon(shape, angle);
            fill_polygon(target, filler.points(), Ink::Black)?;
            draw_polygon_outline(target, filler.points(), Ink::Black, 1)?;
        }

        let hub = PrimitiveStyleBuilder::new()
            .fill_color(Ink::White)
            .stroke_color(Ink::Black)
            .stroke_width(1)
            .build();
        draw_circle_from_center(target, self.center, self.layout.hub_radius, hub)?;
        draw_circle_from_center(
            target,
            self.center,
            self.layout.dot_radius,
            PrimitiveStyle::with_fill(Ink::Black),
        )?;
        Ok(())
    }
}
