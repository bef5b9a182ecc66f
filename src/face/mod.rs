/*
 *  face/mod.rs
 *
 *  dialface - analog watch face renderer
 *  (c) 2020-26 Stuart Hunter
 *
 *  Face model: state, inbound events and the update scheduler
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

pub mod event;
pub mod message;
pub mod scheduler;
pub mod state;

pub use event::{BatteryCharge, Button, FaceEvent, HealthEvent};
pub use message::{AppMessage, MessageError, MessageKeys, TupleValue, WeatherUpdate};
pub use scheduler::{Alert, Dispatch, SchedulerConfig, SchedulerStats, UpdateScheduler};
pub use state::{FaceState, HandsVisibility, WeatherIcon};
