/*
 *  display/components/steps.rs
 *
 *  dialface - analog watch face renderer
 *  (c) 2020-26 Stuart Hunter
 *
 *  Step goal ring, step count and shoe glyph
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
use std::num::NonZeroU32;

use arrayvec::ArrayString;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::prelude::*;

use crate::display::color::Ink;
use crate::display::layout::{LayoutConfig, StepsLayout};
use crate::draw::{draw_glyph_centered, draw_text_centered, fill_radial};
use crate::face::state::FaceState;
use crate::geometry::degrees_to_turn;
use crate::glyphs::{GLYPH_SHOE, SHOE_GLYPH_HEIGHT, SHOE_GLYPH_WIDTH};

/// Ring sweep for progress toward the goal, clamped at a full turn
pub fn step_sweep_degrees(count: u32, goal: NonZeroU32) -> f32 {
    (count as f32 / goal.get() as f32).min(1.0) * 360.0
}

#[derive(Debug, Clone)]
pub struct StepsDisplay {
    layout: StepsLayout,
}

impl StepsDisplay {
    pub fn new(layout: &LayoutConfig) -> Self {
        Self { layout: layout.steps.clone() }
    }

    pub fn render<D>(&self, state: &FaceState, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Ink>,
    {
        let sweep = degrees_to_turn(step_sweep_degrees(state.step_count(), state.step_goal()));
        fill_radial(
            target,
            self.layout.bounds,
            self.layout.ring_thickness,
            0.0,
            sweep,
            Ink::Black,
        )?;

        let mut count: ArrayString<12> = ArrayString::new();
        let _ = write!(&mut count, "{}", state.step_count());
        draw_text_centered(target, &count, self.layout.count_text, &FONT_6X10, Ink::Black)?;

        draw_glyph_centered(
            target,
            &GLYPH_SHOE,
            Size::new(SHOE_GLYPH_WIDTH, SHOE_GLYPH_HEIGHT),
            self.layout.icon,
            Ink::Black,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::face::{FaceEvent, HealthEvent, SchedulerConfig, UpdateScheduler};
    use crate::vframebuf::VarFrameBuf;
    use std::time::Instant;

    fn goal(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[test]
    fn sweep_reaches_full_turn_at_goal() {
        assert_eq!(step_sweep_degrees(0, goal(100)), 0.0);
        assert_eq!(step_sweep_degrees(50, goal(100)), 180.0);
        assert_eq!(step_sweep_degrees(100, goal(100)), 360.0);
    }

    #[test]
    fn sweep_is_clamped_past_goal() {
        assert_eq!(step_sweep_degrees(101, goal(100)), 360.0);
        assert_eq!(step_sweep_degrees(u32::MAX, goal(1)), 360.0);
    }

    #[test]
    fn quarter_progress_lights_the_first_quadrant() {
        let layout = LayoutConfig::classic();
        let mut scheduler = UpdateScheduler::new(FaceState::default(), SchedulerConfig::default());
        scheduler.dispatch(
            FaceEvent::Health(HealthEvent::MovementUpdate { steps_today: 25 }),
            Instant::now(),
        );
        let mut layer = VarFrameBuf::with_area(layout.steps.bounds, Ink::Clear);
        StepsDisplay::new(&layout).render(scheduler.state(), &mut layer).unwrap();

        // 12 o'clock lit, 9 o'clock not
        assert_eq!(layer.pixel(Point::new(72, 104)), Some(Ink::Black));
        assert_eq!(layer.pixel(Point::new(54, 122)), Some(Ink::Clear));

        // count text and shoe both leave ink in their boxes
        let text_ink = layer
            .pixels()
            .filter(|(p, c)| layout.steps.count_text.contains(*p) && *c == Ink::Black)
            .count();
        assert!(text_ink > 0);
        let shoe_ink = layer
            .pixels()
            .filter(|(p, c)| layout.steps.icon.contains(*p) && *c == Ink::Black)
            .count();
        assert!(shoe_ink > 20);
    }
}
