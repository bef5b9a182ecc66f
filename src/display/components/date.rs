/*
 *  display/components/date.rs
 *
 *  dialface - analog watch face renderer
 *  (c) 2020-26 Stuart Hunter
 *
 *  Weekday and day of month inside the dial's date frame
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
use chrono::NaiveDateTime;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::prelude::*;

use crate::display::color::Ink;
use crate::display::layout::{DateLayout, LayoutConfig};
use crate::draw::draw_text_centered;
use crate::face::state::FaceState;

/// Abbreviated weekday and zero-padded day of month, e.g. ("Tue", "05")
pub fn date_labels(time: NaiveDateTime) -> (ArrayString<8>, ArrayString<4>) {
    let mut weekday = ArrayString::new();
    let mut day = ArrayString::new();
    let _ = write!(&mut weekday, "{}", time.format("%a"));
    let _ = write!(&mut day, "{}", time.format("%d"));
    (weekday, day)
}

#[derive(Debug, Clone)]
pub struct DateDisplay {
    layout: DateLayout,
}

impl DateDisplay {
    pub fn new(layout: &LayoutConfig) -> Self {
        Self { layout: layout.date.clone() }
    }

    pub fn render<D>(&self, state: &FaceState, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Ink>,
    {
        let (weekday, day) = date_labels(state.time());
        draw_text_centered(target, &weekday, self.layout.weekday, &FONT_6X10, Ink::Black)?;
        draw_text_centered(target, &day, self.layout.day, &FONT_6X10, Ink::Black)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn labels_follow_the_calendar() {
        let t = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap().and_hms_opt(10, 15, 0).unwrap();
        let (weekday, day) = date_labels(t);
        assert_eq!(weekday.as_str(), "Tue");
        assert_eq!(day.as_str(), "05");

        let t = NaiveDate::from_ymd_opt(2024, 12, 29).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let (weekday, day) = date_labels(t);
        assert_eq!((weekday.as_str(), day.as_str()), ("Sun", "29"));
    }

    #[test]
    fn text_lands_in_both_boxes() {
        let layout = LayoutConfig::classic();
        let mut layer = crate::vframebuf::VarFrameBuf::with_area(layout.date.bounds, Ink::Clear);
        DateDisplay::new(&layout).render(&FaceState::default(), &mut layer).unwrap();
        for rect in [layout.date.weekday, layout.date.day] {
            assert!(layer.pixels().any(|(p, c)| rect.contains(p) && c == Ink::Black));
        }
    }
}
