/*
 *  face/event.rs
 *
 *  dialface - analog watch face renderer
 *  (c) 2020-26 Stuart Hunter
 *
 *  Inbound events delivered by the host, one at a time
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

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::message::AppMessage;

/// Battery service snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatteryCharge {
    pub percent: u8,
    #[serde(default)]
    pub is_charging: bool,
    #[serde(default)]
    pub is_plugged: bool,
}

impl BatteryCharge {
    /// Charging indicator shows while charging or merely plugged in
    pub fn shows_charging(&self) -> bool {
        self.is_charging || self.is_plugged
    }
}

/// Health service sub-events. Only movement updates carry a step total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HealthEvent {
    SignificantUpdate,
    /// Today's accumulated step count
    MovementUpdate { steps_today: u32 },
    SleepUpdate,
    MetricAlert,
    HeartRateUpdate,
}

/// Physical buttons; only `Select` is bound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Button {
    Back,
    Up,
    Select,
    Down,
}

/// Everything the host can tell the face.
///
/// Events are replayable: feeding the same sequence (with the same
/// timestamps) to a fresh scheduler yields the same state and dirty sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FaceEvent {
    /// Wall clock crossed a minute boundary
    MinuteTick { at: NaiveDateTime },
    Battery(BatteryCharge),
    Health(HealthEvent),
    Connection { connected: bool },
    /// App message received from the phone
    Inbox { message: AppMessage },
    /// Host could not deliver an inbound message
    InboxDropped { reason: String },
    /// Outbound message acknowledged
    OutboxSent,
    /// Outbound message failed; not retried
    OutboxFailed { reason: String },
    ButtonPress { button: Button },
    /// The one-shot reveal timer elapsed. Raised by the scheduler's own
    /// timer, never accepted from the feed.
    #[serde(skip_deserializing)]
    RevealHands,
}

impl FaceEvent {
    /// Short label for logs
    pub fn kind(&self) -> &'static str {
        match self {
            FaceEvent::MinuteTick { .. } => "minute_tick",
            FaceEvent::Battery(_) => "battery",
            FaceEvent::Health(_) => "health",
            FaceEvent::Connection { .. } => "connection",
            FaceEvent::Inbox { .. } => "inbox",
            FaceEvent::InboxDropped { .. } => "inbox_dropped",
            FaceEvent::OutboxSent => "outbox_sent",
            FaceEvent::OutboxFailed { .. } => "outbox_failed",
            FaceEvent::ButtonPress { .. } => "button_press",
            FaceEvent::RevealHands => "reveal_hands",
        }
    }
}
