/*
 *  face/scheduler.rs
 *
 *  dialface - analog watch face renderer
 *  (c) 2020-26 Stuart Hunter
 *
 *  Update scheduler: event -> state mutation -> targeted dirty marking
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

use std::time::{Duration, Instant};
use log::{debug, info, warn};

use crate::display::region::{DirtySet, RenderRegion};
use super::event::{BatteryCharge, Button, FaceEvent, HealthEvent};
use super::message::{AppMessage, MessageError, MessageKeys, WeatherUpdate};
use super::state::{FaceState, HandsVisibility};

/// Default time the hands stay hidden after a select press
pub const DEFAULT_REVEAL_DELAY: Duration = Duration::from_secs(5);

/// Scheduler tunables
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// How long the hands stay hidden after a select press
    pub reveal_delay: Duration,

    /// Keys of the weather tuples in inbound messages
    pub message_keys: MessageKeys,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            reveal_delay: DEFAULT_REVEAL_DELAY,
            message_keys: MessageKeys::default(),
        }
    }
}

/// Haptic feedback requested from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alert {
    /// Two short pulses: phone link lost
    DoublePulse,
}

/// Outcome of handling one event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dispatch {
    /// Regions to redraw on the next paint pass
    pub dirty: DirtySet,

    /// Alert to fire now, at most one per event
    pub alert: Option<Alert>,
}

impl Dispatch {
    fn none() -> Self {
        Self::default()
    }

    fn mark(regions: &[RenderRegion]) -> Self {
        Self { dirty: DirtySet::of(regions), alert: None }
    }
}

/// Diagnostics counters, only ever logged
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulerStats {
    pub events: u64,
    pub messages_applied: u64,
    pub messages_rejected: u64,
    pub inbox_dropped: u64,
    pub outbox_sent: u64,
    pub outbox_failed: u64,
}

/// Single entry point for every host event.
///
/// Owns the [`FaceState`]; renderers only ever see `&FaceState` through
/// [`UpdateScheduler::state`]. Each call runs to completion and returns the
/// regions that changed, so a recorded event sequence replays exactly.
#[derive(Debug)]
pub struct UpdateScheduler {
    state: FaceState,
    config: SchedulerConfig,
    /// Deadline of the one outstanding reveal timer
    reveal_at: Option<Instant>,
    stats: SchedulerStats,
}

impl UpdateScheduler {
    pub fn new(state: FaceState, config: SchedulerConfig) -> Self {
        Self {
            state,
            config,
            reveal_at: None,
            stats: SchedulerStats::default(),
        }
    }

    /// Read-only view for the renderers
    pub fn state(&self) -> &FaceState {
        &self.state
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }

    /// When the pending reveal timer fires, if one is armed
    pub fn pending_reveal(&self) -> Option<Instant> {
        self.reveal_at
    }

    /// Handle one event. `now` is only consulted for arming timers.
    pub fn dispatch(&mut self, event: FaceEvent, now: Instant) -> Dispatch {
        self.stats.events += 1;
        debug!("dispatch {}", event.kind());
        let outcome = match event {
            FaceEvent::MinuteTick { at } => self.on_minute_tick(at),
            FaceEvent::Battery(charge) => self.on_battery(charge),
            FaceEvent::Health(health) => self.on_health(health),
            FaceEvent::Connection { connected } => self.on_connection(connected),
            FaceEvent::Inbox { message } => self.on_inbox(&message),
            FaceEvent::InboxDropped { reason } => {
                self.stats.inbox_dropped += 1;
                warn!("Message dropped! {}", reason);
                Dispatch::none()
            }
            FaceEvent::OutboxSent => {
                self.stats.outbox_sent += 1;
                info!("Outbox send success!");
                Dispatch::none()
            }
            FaceEvent::OutboxFailed { reason } => {
                self.stats.outbox_failed += 1;
                warn!("Outbox send failed! {}", reason);
                Dispatch::none()
            }
            FaceEvent::ButtonPress { button } => self.on_button(button, now),
            FaceEvent::RevealHands => self.on_reveal(),
        };
        if !outcome.dirty.is_empty() {
            debug!("dirty {:?}", outcome.dirty);
        }
        outcome
    }

    /// Fire the reveal timer if its deadline has passed
    pub fn poll_timers(&mut self, now: Instant) -> Dispatch {
        match self.reveal_at {
            Some(deadline) if now >= deadline => self.dispatch(FaceEvent::RevealHands, now),
            _ => Dispatch::none(),
        }
    }

    fn on_minute_tick(&mut self, at: chrono::NaiveDateTime) -> Dispatch {
        self.state.set_time(at);
        // hidden hands pick up the new time when they are revealed
        match self.state.hands() {
            HandsVisibility::Visible => Dispatch::mark(&[RenderRegion::Hands, RenderRegion::Date]),
            HandsVisibility::Hidden => Dispatch::mark(&[RenderRegion::Date]),
        }
    }

    fn on_battery(&mut self, charge: BatteryCharge) -> Dispatch {
        if self.state.set_battery(charge.percent, charge.shows_charging()) {
            debug!(
                "battery {}%{}",
                self.state.battery_percent(),
                if self.state.is_charging() { " charging" } else { "" }
            );
            Dispatch::mark(&[RenderRegion::Battery])
        } else {
            Dispatch::none()
        }
    }

    fn on_health(&mut self, health: HealthEvent) -> Dispatch {
        match health {
            HealthEvent::MovementUpdate { steps_today } => {
                if self.state.set_step_count(steps_today) {
                    debug!("steps {}", steps_today);
                    Dispatch::mark(&[RenderRegion::Steps])
                } else {
                    Dispatch::none()
                }
            }
            other => {
                debug!("ignoring health event {:?}", other);
                Dispatch::none()
            }
        }
    }

    fn on_connection(&mut self, connected: bool) -> Dispatch {
        let was_connected = self.state.connected();
        if was_connected == connected {
            return Dispatch::none();
        }
        self.state.set_connected(connected);
        let mut outcome = Dispatch::mark(&[RenderRegion::Connectivity]);
        if was_connected && !connected {
            info!("phone link lost");
            outcome.alert = Some(Alert::DoublePulse);
        } else {
            info!("phone link restored");
        }
        outcome
    }

    fn on_inbox(&mut self, message: &AppMessage) -> Dispatch {
        match self.apply_weather(message) {
            Ok(()) => Dispatch::mark(&[RenderRegion::Weather]),
            Err(e) => {
                self.stats.messages_rejected += 1;
                warn!("inbound message ignored: {}", e);
                Dispatch::none()
            }
        }
    }

    fn apply_weather(&mut self, message: &AppMessage) -> Result<(), MessageError> {
        let update = WeatherUpdate::parse(message, self.config.message_keys)?;
        info!("weather {} {:?} ({})", update.temperature, update.icon, update.icon_code);
        self.state.set_weather(update.icon, update.temperature);
        self.stats.messages_applied += 1;
        Ok(())
    }

    fn on_button(&mut self, button: Button, now: Instant) -> Dispatch {
        if button != Button::Select {
            debug!("unbound button {:?}", button);
            return Dispatch::none();
        }
        match self.state.hands() {
            HandsVisibility::Visible => {
                self.state.set_hands(HandsVisibility::Hidden);
                self.reveal_at = Some(now + self.config.reveal_delay);
                info!("hands hidden for {:?}", self.config.reveal_delay);
                Dispatch::mark(&[RenderRegion::Hands])
            }
            HandsVisibility::Hidden => {
                // one timer at a time; the first press still decides the reveal
                debug!("hands already hidden, press ignored");
                Dispatch::none()
            }
        }
    }

    fn on_reveal(&mut self) -> Dispatch {
        self.reveal_at = None;
        match self.state.hands() {
            HandsVisibility::Hidden => {
                self.state.set_hands(HandsVisibility::Visible);
                info!("hands shown");
                Dispatch::mark(&[RenderRegion::Hands])
            }
            HandsVisibility::Visible => Dispatch::none(),
        }
    }
}
