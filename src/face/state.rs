/*
 *  face/state.rs
 *
 *  dialface - analog watch face renderer
 *  (c) 2020-26 Stuart Hunter
 *
 *  Face state snapshot read by every renderer
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

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

/// Default daily step goal
pub const DEFAULT_STEP_GOAL: NonZeroU32 = NonZeroU32::new(100).unwrap();

/// Weather condition icon, selected by exact match on the inbound code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeatherIcon {
    ClearDay,
    ClearNight,
    Rain,
    Snow,
    Sleet,
    Wind,
    Fog,
    Cloudy,
    PartlyCloudyDay,
    PartlyCloudyNight,
    /// No icon drawn
    #[default]
    None,
}

impl WeatherIcon {
    /// The ten drawable icons
    pub const ALL: [WeatherIcon; 10] = [
        WeatherIcon::ClearDay,
        WeatherIcon::ClearNight,
        WeatherIcon::Rain,
        WeatherIcon::Snow,
        WeatherIcon::Sleet,
        WeatherIcon::Wind,
        WeatherIcon::Fog,
        WeatherIcon::Cloudy,
        WeatherIcon::PartlyCloudyDay,
        WeatherIcon::PartlyCloudyNight,
    ];

    /// Select an icon by its code. Anything unrecognised is `None`.
    pub fn from_code(code: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|icon| icon.code() == Some(code))
            .unwrap_or(WeatherIcon::None)
    }

    /// Wire code of this icon
    pub fn code(self) -> Option<&'static str> {
        Some(match self {
            WeatherIcon::ClearDay => "clear-day",
            WeatherIcon::ClearNight => "clear-night",
            WeatherIcon::Rain => "rain",
            WeatherIcon::Snow => "snow",
            WeatherIcon::Sleet => "sleet",
            WeatherIcon::Wind => "wind",
            WeatherIcon::Fog => "fog",
            WeatherIcon::Cloudy => "cloudy",
            WeatherIcon::PartlyCloudyDay => "partly-cloudy-day",
            WeatherIcon::PartlyCloudyNight => "partly-cloudy-night",
            WeatherIcon::None => return None,
        })
    }
}

/// Whether the hands layer is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandsVisibility {
    #[default]
    Visible,
    Hidden,
}

/// Everything the renderers need to draw one frame.
///
/// Owned by the update scheduler, which is the only writer; renderers get
/// a shared reference. Every field has a value before the first paint.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceState {
    time: NaiveDateTime,
    battery_percent: u8,
    is_charging: bool,
    step_count: u32,
    step_goal: NonZeroU32,
    connected: bool,
    weather_icon: WeatherIcon,
    temperature: Option<i32>,
    hands: HandsVisibility,
}

/// Test fixture: midnight on 2000-01-01 with the default step goal
#[cfg(test)]
impl Default for FaceState {
    fn default() -> Self {
        let epoch = chrono::NaiveDate::from_ymd_opt(2000, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap_or_default();
        Self::new(epoch, DEFAULT_STEP_GOAL)
    }
}

impl FaceState {
    pub fn new(time: NaiveDateTime, step_goal: NonZeroU32) -> Self {
        Self {
            time,
            battery_percent: 0,
            is_charging: false,
            step_count: 0,
            step_goal,
            connected: true,
            weather_icon: WeatherIcon::None,
            temperature: None,
            hands: HandsVisibility::Visible,
        }
    }

    pub fn time(&self) -> NaiveDateTime {
        self.time
    }

    /// Hour of day, 0-23
    pub fn hour(&self) -> u32 {
        self.time.hour()
    }

    /// Minute of hour, 0-59
    pub fn minute(&self) -> u32 {
        self.time.minute()
    }

    pub fn battery_percent(&self) -> u8 {
        self.battery_percent
    }

    pub fn is_charging(&self) -> bool {
        self.is_charging
    }

    pub fn step_count(&self) -> u32 {
        self.step_count
    }

    pub fn step_goal(&self) -> NonZeroU32 {
        self.step_goal
    }

    pub fn connected(&self) -> bool {
        self.connected
    }

    pub fn weather_icon(&self) -> WeatherIcon {
        self.weather_icon
    }

    pub fn temperature(&self) -> Option<i32> {
        self.temperature
    }

    pub fn hands(&self) -> HandsVisibility {
        self.hands
    }

    pub(super) fn set_time(&mut self, time: NaiveDateTime) {
        self.time = time;
    }

    /// Returns true if anything changed
    pub(super) fn set_battery(&mut self, percent: u8, charging: bool) -> bool {
        let percent = percent.min(100);
        let changed = percent != self.battery_percent || charging != self.is_charging;
        self.battery_percent = percent;
        self.is_charging = charging;
        changed
    }

    pub(super) fn set_step_count(&mut self, steps: u32) -> bool {
        let changed = steps != self.step_count;
        self.step_count = steps;
        changed
    }

    pub(super) fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }

    /// An unrecognised icon leaves the previous one on screen
    pub(super) fn set_weather(&mut self, icon: WeatherIcon, temperature: i32) {
        if icon != WeatherIcon::None {
            self.weather_icon = icon;
        }
        self.temperature = Some(temperature);
    }

    pub(super) fn set_hands(&mut self, hands: HandsVisibility) {
        self.hands = hands;
    }
}
