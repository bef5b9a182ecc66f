/*
 *  display/components/battery.rs
 *
 *  dialface - analog watch face renderer
 *  (c) 2020-26 Stuart Hunter
 *
 *  Battery ring, battery glyph and charging bolt
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
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle, RoundedRectangle};

use crate::display::color::Ink;
use crate::display::layout::{BatteryLayout, LayoutConfig};
use crate::draw::{draw_glyph_centered, fill_radial};
use crate::face::state::FaceState;
use crate::geometry::degrees_to_turn;
use crate::glyphs::{GLYPH_CHARGING, STATUS_GLYPH_HEIGHT, STATUS_GLYPH_WIDTH};

/// Ring sweep for a charge level, 0 at empty and 360 at full
pub fn battery_sweep_degrees(percent: u8) -> f32 {
    percent.min(100) as f32 * 3.6
}

#[derive(Debug, Clone)]
pub struct BatteryDisplay {
    layout: BatteryLayout,
}

impl BatteryDisplay {
    pub fn new(layout: &LayoutConfig) -> Self {
        Self { layout: layout.battery.clone() }
    }

    pub fn render<D>(&self, state: &FaceState, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Ink>,
    {
        let percent = state.battery_percent();

        // the ring empties anticlockwise from 12 o'clock
        let sweep = degrees_to_turn(battery_sweep_degrees(percent));
        fill_radial(
            target,
            self.layout.bounds,
            self.layout.ring_thickness,
            1.0 - sweep,
            1.0,
            Ink::Black,
        )?;

        let glyph = self.layout.glyph;
        RoundedRectangle::with_equal_corners(glyph, Size::new(1, 1))
            .into_styled(PrimitiveStyle::with_stroke(Ink::Black, 1))
            .draw(target)?;

        let inner_x = glyph.top_left.x + 2;
        let inner_w = glyph.size.width.saturating_sub(4).max(1);
        // nub
        target.fill_solid(
            &Rectangle::new(Point::new(inner_x, glyph.top_left.y - 1), Size::new(inner_w, 1)),
            Ink::Black,
        )?;
        let level = (percent / 10) as u32;
        if level > 0 {
            let bottom = glyph.top_left.y + glyph.size.height as i32 - 2;
            target.fill_solid(
                &Rectangle::new(
                    Point::new(inner_x, bottom - level as i32),
                    Size::new(inner_w, level),
                ),
                Ink::Black,
            )?;
        }

        if state.is_charging() {
            draw_glyph_centered(
                target,
                &GLYPH_CHARGING,
                Size::new(STATUS_GLYPH_WIDTH, STATUS_GLYPH_HEIGHT),
                self.layout.charging_icon,
                Ink::Black,
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::face::{BatteryCharge, FaceEvent, SchedulerConfig, UpdateScheduler};
    use crate::vframebuf::VarFrameBuf;
    use std::time::Instant;

    fn render(percent: u8, charging: bool) -> VarFrameBuf<Ink> {
        let layout = LayoutConfig::classic();
        let mut scheduler = UpdateScheduler::new(FaceState::default(), SchedulerConfig::default());
        scheduler.dispatch(
            FaceEvent::Battery(BatteryCharge { percent, is_charging: charging, is_plugged: false }),
            Instant::now(),
        );
        let mut layer = VarFrameBuf::with_area(layout.battery.bounds, Ink::Clear);
        BatteryDisplay::new(&layout).render(scheduler.state(), &mut layer).unwrap();
        layer
    }

    #[test]
    fn sweep_endpoints_and_monotonic() {
        assert_eq!(battery_sweep_degrees(0), 0.0);
        assert_eq!(battery_sweep_degrees(100), 360.0);
        for p in 1..=100u8 {
            assert!(battery_sweep_degrees(p) > battery_sweep_degrees(p - 1));
        }
    }

    #[test]
    fn half_charge_fills_the_left_half() {
        let layer = render(50, false);
        assert_eq!(layer.pixel(Point::new(16, 84)), Some(Ink::Black));
        assert_eq!(layer.pixel(Point::new(51, 84)), Some(Ink::Clear));
        // five rows of glyph fill
        assert_eq!(layer.pixel(Point::new(34, 88)), Some(Ink::Black));
        assert_eq!(layer.pixel(Point::new(34, 84)), Some(Ink::Black));
        assert_eq!(layer.pixel(Point::new(34, 83)), Some(Ink::Clear));
    }

    #[test]
    fn empty_and_full_rings() {
        let empty = render(0, false);
        assert_eq!(empty.pixel(Point::new(16, 84)), Some(Ink::Clear));
        assert_eq!(empty.pixel(Point::new(51, 84)), Some(Ink::Clear));

        let full = render(100, false);
        assert_eq!(full.pixel(Point::new(16, 84)), Some(Ink::Black));
        assert_eq!(full.pixel(Point::new(51, 84)), Some(Ink::Black));
    }

    #[test]
    fn bolt_only_while_charging() {
        let layout = LayoutConfig::classic();
        let bolt = layout.battery.charging_icon;
        let inked = |layer: &VarFrameBuf<Ink>| {
            layer
                .pixels()
                .filter(|(p, c)| bolt.contains(*p) && *c == Ink::Black)
                .count()
        };
        let idle = render(40, false);
        let charging = render(40, true);
        assert!(inked(&charging) > inked(&idle) + 20);
    }
}
