/*
 *  display/components/mod.rs
 *
 *  dialface - analog watch face renderer
 *  (c) 2020-26 Stuart Hunter
 *
 *  Face components, one renderer per render region
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

pub mod battery;
pub mod connectivity;
pub mod date;
pub mod dial;
pub mod hands;
pub mod steps;
pub mod weather;

// Re-exports
pub use battery::BatteryDisplay;
pub use connectivity::ConnectivityDisplay;
pub use date::DateDisplay;
pub use dial::DialFace;
pub use hands::{HandGeometry, HandsDisplay};
pub use steps::StepsDisplay;
pub use weather::WeatherDisplay;

use embedded_graphics::prelude::*;

use crate::display::color::Ink;
use crate::display::layout::LayoutConfig;
use crate::display::region::RenderRegion;
use crate::face::state::FaceState;

/// Every component, built from one layout
#[derive(Debug, Clone)]
pub struct FaceComponents {
    dial: DialFace,
    date: DateDisplay,
    battery: BatteryDisplay,
    connectivity: ConnectivityDisplay,
    steps: StepsDisplay,
    weather: WeatherDisplay,
    hands: HandsDisplay,
}

impl FaceComponents {
    pub fn new(layout: &LayoutConfig) -> Self {
        Self {
            dial: DialFace::new(layout),
            date: DateDisplay::new(layout),
            battery: BatteryDisplay::new(layout),
            connectivity: ConnectivityDisplay::new(layout),
            steps: StepsDisplay::new(layout),
            weather: WeatherDisplay::new(layout),
            hands: HandsDisplay::new(layout),
        }
    }

    pub fn hands(&self) -> &HandsDisplay {
        &self.hands
    }

    /// Draw one region's content into its layer
    pub fn render<D>(
        &self,
        region: RenderRegion,
        state: &FaceState,
        target: &mut D,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Ink>,
    {
        match region {
            RenderRegion::Dial => self.dial.render(target),
            RenderRegion::Date => self.date.render(state, target),
            RenderRegion::Battery => self.battery.render(state, target),
            RenderRegion::Connectivity => self.connectivity.render(state, target),
            RenderRegion::Steps => self.steps.render(state, target),
            RenderRegion::Weather => self.weather.render(state, target),
            RenderRegion::Hands => self.hands.render(state, target),
        }
    }
}
