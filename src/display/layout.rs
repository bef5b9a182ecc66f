/*
 *  display/layout.rs
 *
 *  dialface - analog watch face renderer
 *  (c) 2020-26 Stuart Hunter
 *
 *  Named layout table keyed by canvas size
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

use embedded_graphics::geometry::{Point, Size};
use embedded_graphics::primitives::Rectangle;

use crate::display::color::Ink;
use crate::display::error::DisplayError;
use crate::display::region::RenderRegion;

/// Reference canvas every layout is derived from
pub const CLASSIC_WIDTH: u32 = 144;
pub const CLASSIC_HEIGHT: u32 = 168;

/// Smallest canvas we are prepared to lay out
pub const MIN_CANVAS: u32 = 64;

/// Largest canvas; keeps every layer allocation bounded
pub const MAX_CANVAS: u32 = 1024;

/// Layout category based on canvas resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutCategory {
    /// 144x168 rectangular panel, the reference layout
    Classic,

    /// 180x180 round panel; corners are not visible
    Round,

    /// 200x228 rectangular panel
    Large,

    /// Any other size, derived by scaling the reference layout
    Scaled,
}

/// Known panel sizes
const PRESETS: &[(u32, u32, LayoutCategory)] = &[
    (144, 168, LayoutCategory::Classic),
    (180, 180, LayoutCategory::Round),
    (200, 228, LayoutCategory::Large),
];

/// Geometry of one tick mark style
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickStyle {
    /// Length inward from the dial edge
    pub length: i32,
    pub stroke_width: u32,
}

/// Dial background: disc, tick ring, date frame
#[derive(Debug, Clone, PartialEq)]
pub struct DialLayout {
    pub radius: i32,
    pub tick_count: u32,
    /// Every n-th tick is a major tick
    pub major_every: u32,
    pub major_tick: TickStyle,
    pub minor_tick: TickStyle,
    pub date_frame: Rectangle,
    pub date_frame_corner: u32,
    /// x of the divider between weekday and day of month
    pub date_divider_x: i32,
}

/// Hands overlay
#[derive(Debug, Clone, PartialEq)]
pub struct HandsLayout {
    /// Uniform scale applied to the hand shapes
    pub scale: f32,
    pub hub_radius: u32,
    pub dot_radius: u32,
}

/// Weekday and day-of-month text
#[derive(Debug, Clone, PartialEq)]
pub struct DateLayout {
    pub bounds: Rectangle,
    pub weekday: Rectangle,
    pub day: Rectangle,
}

/// Battery ring, battery glyph and charging bolt
#[derive(Debug, Clone, PartialEq)]
pub struct BatteryLayout {
    pub bounds: Rectangle,
    pub ring_thickness: u32,
    pub glyph: Rectangle,
    pub charging_icon: Rectangle,
}

/// Disconnected-phone glyph
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectivityLayout {
    pub bounds: Rectangle,
    /// Glyph color; depends on whether the glyph sits on the dial or the background
    pub ink: Ink,
}

/// Step-goal ring, count text and shoe glyph
#[derive(Debug, Clone, PartialEq)]
pub struct StepsLayout {
    pub bounds: Rectangle,
    pub ring_thickness: u32,
    pub count_text: Rectangle,
    pub icon: Rectangle,
}

/// Temperature ring, temperature text and condition icon
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherLayout {
    pub bounds: Rectangle,
    pub ring_center: Point,
    pub ring_radius: u32,
    pub temp_text: Rectangle,
    pub icon: Rectangle,
}

/// Layout configuration for one canvas size
///
/// Replaces pixel literals in the renderers; every coordinate a renderer
/// uses comes from here.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    pub width: u32,
    pub height: u32,
    pub category: LayoutCategory,
    /// Dial centre, pivot of both hands
    pub center: Point,
    pub dial: DialLayout,
    pub hands: HandsLayout,
    pub date: DateLayout,
    pub battery: BatteryLayout,
    pub connectivity: ConnectivityLayout,
    pub steps: StepsLayout,
    pub weather: WeatherLayout,
}

fn rect(x: i32, y: i32, w: u32, h: u32) -> Rectangle {
    Rectangle::new(Point::new(x, y), Size::new(w, h))
}

impl LayoutConfig {
    /// Select the layout for a canvas of `width` x `height`
    pub fn for_canvas(width: u32, height: u32) -> Result<Self, DisplayError> {
        if width < MIN_CANVAS || height < MIN_CANVAS {
            return Err(DisplayError::InvalidConfiguration(format!(
                "canvas {width}x{height} is smaller than {MIN_CANVAS}x{MIN_CANVAS}"
            )));
        }
        if width > MAX_CANVAS || height > MAX_CANVAS {
            return Err(DisplayError::InvalidConfiguration(format!(
                "canvas {width}x{height} is larger than {MAX_CANVAS}x{MAX_CANVAS}"
            )));
        }
        let category = Self::categorize(width, height);
        let layout = match category {
            LayoutCategory::Classic => Self::classic(),
            LayoutCategory::Round => Self::round(width, height),
            LayoutCategory::Large | LayoutCategory::Scaled => {
                let mut layout = Self::classic().scaled_to(width, height);
                layout.category = category;
                layout
            }
        };
        log::debug!("layout {:?} for {}x{} canvas", layout.category, width, height);
        Ok(layout)
    }

    /// Look the canvas size up in the preset table
    pub fn categorize(width: u32, height: u32) -> LayoutCategory {
        PRESETS
            .iter()
            .find(|(w, h, _)| *w == width && *h == height)
            .map(|(_, _, c)| *c)
            .unwrap_or(LayoutCategory::Scaled)
    }

    /// The reference 144x168 layout
    pub fn classic() -> Self {
        let width = CLASSIC_WIDTH;
        let height = CLASSIC_HEIGHT;
        Self {
            width,
            height,
            category: LayoutCategory::Classic,
            center: Point::new(width as i32 / 2, height as i32 / 2),
            dial: DialLayout {
                radius: (width as i32 + 8) / 2,
                tick_count: 60,
                major_every: 5,
                major_tick: TickStyle { length: 8, stroke_width: 4 },
                minor_tick: TickStyle { length: 4, stroke_width: 1 },
                date_frame: rect(87, 77, 43, 13),
                date_frame_corner: 3,
                date_divider_x: 114,
            },
            hands: HandsLayout {
                scale: 1.0,
                hub_radius: 7,
                dot_radius: 1,
            },
            date: DateLayout {
                bounds: rect(87, 74, 44, 16),
                weekday: rect(88, 74, 26, 14),
                day: rect(113, 74, 16, 14),
            },
            battery: BatteryLayout {
                bounds: rect(16, 66, 36, 36),
                ring_thickness: 2,
                glyph: rect(31, 77, 7, 14),
                charging_icon: rect(36, 76, 14, 14),
            },
            connectivity: ConnectivityLayout {
                bounds: rect(2, 2, 14, 14),
                ink: Ink::White,
            },
            steps: StepsLayout {
                bounds: rect(54, 104, 36, 36),
                ring_thickness: 2,
                count_text: rect(54, 108, 36, 16),
                icon: rect(60, 123, 24, 16),
            },
            weather: WeatherLayout {
                bounds: rect(54, 28, 37, 37),
                ring_center: Point::new(width as i32 / 2, 46),
                ring_radius: 18,
                temp_text: rect(60, 28, 24, 16),
                icon: rect(60, 46, 24, 16),
            },
        }
    }

    /// Round panel: corners are off-glass, so the link glyph moves onto the dial
    fn round(width: u32, height: u32) -> Self {
        let mut layout = Self::classic();
        layout.connectivity = ConnectivityLayout {
            bounds: rect(28, 40, 14, 14),
            ink: Ink::Black,
        };
        let mut layout = layout.scaled_to(width, height);
        layout.category = LayoutCategory::Round;
        layout
    }

    /// Scale this layout uniformly so the dial fits `width` x `height`,
    /// keeping the dial centred on the canvas.
    pub fn scaled_to(&self, width: u32, height: u32) -> Self {
        let s = (width as f32 / self.width as f32).min(height as f32 / self.height as f32);
        let from = self.center;
        let to = Point::new(width as i32 / 2, height as i32 / 2);

        let len = |v: i32| (v as f32 * s).round() as i32;
        let ulen = |v: u32| ((v as f32 * s).round() as u32).max(1);
        let pt = |p: Point| to + Point::new(len(p.x - from.x), len(p.y - from.y));
        let rc = |r: Rectangle| {
            Rectangle::new(
                pt(r.top_left),
                Size::new(ulen(r.size.width), ulen(r.size.height)),
            )
        };

        Self {
            width,
            height,
            category: self.category,
            center: to,
            dial: DialLayout {
                radius: len(self.dial.radius),
                tick_count: self.dial.tick_count,
                major_every: self.dial.major_every,
                major_tick: TickStyle {
                    length: len(self.dial.major_tick.length),
                    stroke_width: ulen(self.dial.major_tick.stroke_width),
                },
                minor_tick: TickStyle {
                    length: len(self.dial.minor_tick.length),
                    stroke_width: ulen(self.dial.minor_tick.stroke_width),
                },
                date_frame: rc(self.dial.date_frame),
                date_frame_corner: ulen(self.dial.date_frame_corner),
                date_divider_x: to.x + len(self.dial.date_divider_x - from.x),
            },
            hands: HandsLayout {
                scale: self.hands.scale * s,
                hub_radius: ulen(self.hands.hub_radius),
                dot_radius: self.hands.dot_radius,
            },
            date: DateLayout {
                bounds: rc(self.date.bounds),
                weekday: rc(self.date.weekday),
                day: rc(self.date.day),
            },
            battery: BatteryLayout {
                bounds: rc(self.battery.bounds),
                ring_thickness: ulen(self.battery.ring_thickness),
                glyph: rc(self.battery.glyph),
                charging_icon: rc(self.battery.charging_icon),
            },
            connectivity: ConnectivityLayout {
                bounds: rc(self.connectivity.bounds),
                ink: self.connectivity.ink,
            },
            steps: StepsLayout {
                bounds: rc(self.steps.bounds),
                ring_thickness: ulen(self.steps.ring_thickness),
                count_text: rc(self.steps.count_text),
                icon: rc(self.steps.icon),
            },
            weather: WeatherLayout {
                bounds: rc(self.weather.bounds),
                ring_center: pt(self.weather.ring_center),
                ring_radius: ulen(self.weather.ring_radius),
                temp_text: rc(self.weather.temp_text),
                icon: rc(self.weather.icon),
            },
        }
    }

    /// Full canvas rectangle
    pub fn canvas(&self) -> Rectangle {
        rect(0, 0, self.width, self.height)
    }

    /// Rectangle owned by `region`; dial and hands span the whole canvas
    pub fn region_bounds(&self, region: RenderRegion) -> Rectangle {
        match region {
            RenderRegion::Dial | RenderRegion::Hands => self.canvas(),
            RenderRegion::Date => self.date.bounds,
            RenderRegion::Battery => self.battery.bounds,
            RenderRegion::Connectivity => self.connectivity.bounds,
            RenderRegion::Steps => self.steps.bounds,
            RenderRegion::Weather => self.weather.bounds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_status_regions_disjoint(layout: &LayoutConfig) {
        let status = RenderRegion::STATUS;
        for (i, a) in status.iter().enumerate() {
            for b in &status[i + 1..] {
                let overlap = layout
                    .region_bounds(*a)
                    .intersection(&layout.region_bounds(*b));
                assert!(
                    overlap.is_zero_sized(),
                    "{:?} overlaps {:?} in {:?} layout",
                    a, b, layout.category
                );
            }
        }
    }

    fn assert_status_regions_on_canvas(layout: &LayoutConfig) {
        let canvas = layout.canvas();
        for r in RenderRegion::STATUS {
            let b = layout.region_bounds(r);
            assert_eq!(b.intersection(&canvas), b, "{r:?} leaves the canvas");
        }
    }

    #[test]
    fn test_classic_layout_144x168() {
        let layout = LayoutConfig::for_canvas(144, 168).unwrap();
        assert_eq!(layout.category, LayoutCategory::Classic);
        assert_eq!(layout.center, Point::new(72, 84));
        assert_eq!(layout.dial.radius, 76);
        assert_eq!(layout.battery.bounds, rect(16, 66, 36, 36));
        assert_eq!(layout.hands.scale, 1.0);
        assert_status_regions_disjoint(&layout);
        assert_status_regions_on_canvas(&layout);
    }

    #[test]
    fn test_round_layout_180x180() {
        let layout = LayoutConfig::for_canvas(180, 180).unwrap();
        assert_eq!(layout.category, LayoutCategory::Round);
        assert_eq!(layout.center, Point::new(90, 90));
        assert_eq!(layout.connectivity.ink, Ink::Black);
        assert_status_regions_disjoint(&layout);
        assert_status_regions_on_canvas(&layout);
    }

    #[test]
    fn test_large_layout_200x228() {
        let layout = LayoutConfig::for_canvas(200, 228).unwrap();
        assert_eq!(layout.category, LayoutCategory::Large);
        assert!(layout.dial.radius > 76);
        assert!(layout.hands.scale > 1.0);
        assert_status_regions_disjoint(&layout);
        assert_status_regions_on_canvas(&layout);
    }

    #[test]
    fn test_unknown_size_is_scaled() {
        let layout = LayoutConfig::for_canvas(128, 128).unwrap();
        assert_eq!(layout.category, LayoutCategory::Scaled);
        assert_eq!(layout.center, Point::new(64, 64));
        assert_status_regions_disjoint(&layout);
    }

    #[test]
    fn test_scaling_to_same_size_is_identity() {
        let classic = LayoutConfig::classic();
        assert_eq!(classic.scaled_to(144, 168), classic);
    }

    #[test]
    fn test_tiny_canvas_rejected() {
        assert!(LayoutConfig::for_canvas(32, 168).is_err());
    }

    #[test]
    fn test_huge_canvas_rejected() {
        assert!(LayoutConfig::for_canvas(65536, 65536).is_err());
        assert!(LayoutConfig::for_canvas(MAX_CANVAS + 1, 168).is_err());
        assert!(LayoutConfig::for_canvas(MAX_CANVAS, MAX_CANVAS).is_ok());
    }
}
