/*
 *  tests/face_integration.rs
 *
 *  dialface - analog watch face renderer
 *  (c) 2020-26 Stuart Hunter
 *
 *  End-to-end tests: events through the scheduler into composed frames
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

use std::num::NonZeroU32;
use std::time::{Duration, Instant};

use chrono::{NaiveDate, NaiveDateTime};
use embedded_graphics::prelude::*;
use embedded_graphics::pixelcolor::BinaryColor;

use dialface::display::drivers::MockDriver;
use dialface::display::{DirtySet, FaceCompositor, LayoutConfig, RenderRegion};
use dialface::face::{
    Alert, BatteryCharge, Button, FaceEvent, FaceState, HandsVisibility, HealthEvent,
    SchedulerConfig, UpdateScheduler, WeatherIcon,
};
use dialface::vframebuf::VarFrameBuf;

fn at(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 5)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

fn scheduler() -> UpdateScheduler {
    UpdateScheduler::new(
        FaceState::new(at(10, 15), NonZeroU32::new(100).unwrap()),
        SchedulerConfig::default(),
    )
}

fn compositor() -> (FaceCompositor, MockDriver) {
    let driver = MockDriver::new_with_size(144, 168);
    let handle = driver.clone();
    (FaceCompositor::new(Box::new(driver)).unwrap(), handle)
}

fn last_frame(driver: &MockDriver) -> VarFrameBuf<BinaryColor> {
    driver
        .state()
        .lock()
        .unwrap()
        .last_frame
        .clone()
        .expect("nothing presented")
}

fn recorded_events() -> Vec<FaceEvent> {
    vec![
        FaceEvent::Battery(BatteryCharge { percent: 80, is_charging: false, is_plugged: false }),
        FaceEvent::Health(HealthEvent::MovementUpdate { steps_today: 42 }),
        FaceEvent::Connection { connected: false },
        FaceEvent::MinuteTick { at: at(10, 16) },
        FaceEvent::ButtonPress { button: Button::Select },
        FaceEvent::MinuteTick { at: at(10, 17) },
        FaceEvent::Connection { connected: true },
        FaceEvent::Health(HealthEvent::SleepUpdate),
    ]
}

#[test]
fn replaying_events_is_deterministic() {
    let base = Instant::now();
    let run = || {
        let mut sched = scheduler();
        let outcomes: Vec<_> = recorded_events()
            .into_iter()
            .enumerate()
            .map(|(i, ev)| sched.dispatch(ev, base + Duration::from_millis(i as u64)))
            .collect();
        (sched.state().clone(), outcomes, sched.pending_reveal())
    };

    let (state_a, out_a, reveal_a) = run();
    let (state_b, out_b, reveal_b) = run();
    assert_eq!(state_a, state_b);
    assert_eq!(out_a, out_b);
    assert_eq!(reveal_a, reveal_b);

    assert_eq!(state_a.battery_percent(), 80);
    assert_eq!(state_a.step_count(), 42);
    assert!(state_a.connected());
    assert_eq!(state_a.minute(), 17);
    assert_eq!(state_a.hands(), HandsVisibility::Hidden);
    assert_eq!(out_a[2].alert, Some(Alert::DoublePulse));
}

#[test]
fn battery_update_leaves_other_regions_untouched() {
    let (mut face, driver) = compositor();
    let mut sched = scheduler();
    face.paint(sched.state(), DirtySet::all()).unwrap();
    let before = last_frame(&driver);

    let outcome = sched.dispatch(
        FaceEvent::Battery(BatteryCharge { percent: 100, is_charging: true, is_plugged: true }),
        Instant::now(),
    );
    assert_eq!(outcome.dirty, DirtySet::of(&[RenderRegion::Battery]));
    let report = face.paint(sched.state(), outcome.dirty).unwrap();
    assert_eq!(report.rendered, outcome.dirty);

    let after = last_frame(&driver);
    let battery = LayoutConfig::classic().region_bounds(RenderRegion::Battery);
    let mut changed = 0;
    for (p, color) in after.pixels() {
        if battery.contains(p) {
            changed += usize::from(before.pixel(p) != Some(color));
        } else {
            assert_eq!(before.pixel(p), Some(color), "pixel {p:?} outside battery changed");
        }
    }
    assert!(changed > 0, "battery region did not change");

    for region in RenderRegion::ALL {
        let expected = if region == RenderRegion::Battery { 2 } else { 1 };
        assert_eq!(face.render_count(region), expected, "{}", region.name());
    }
}

#[test]
fn hidden_hands_come_back_after_the_delay() {
    let (mut face, driver) = compositor();
    let mut sched = scheduler();
    face.paint(sched.state(), DirtySet::all()).unwrap();
    let shown = last_frame(&driver);

    let t0 = Instant::now();
    let hide = sched.dispatch(FaceEvent::ButtonPress { button: Button::Select }, t0);
    assert!(hide.dirty.contains(RenderRegion::Hands));
    face.paint(sched.state(), hide.dirty).unwrap();
    assert_ne!(last_frame(&driver).as_slice(), shown.as_slice());
    assert!(face.layer(RenderRegion::Hands).as_slice().iter().all(|ink| ink.to_binary().is_none()));

    // pressing again while hidden does nothing
    let again = sched.dispatch(FaceEvent::ButtonPress { button: Button::Select }, t0);
    assert!(again.dirty.is_empty());

    let deadline = sched.pending_reveal().unwrap();
    assert_eq!(deadline, t0 + SchedulerConfig::default().reveal_delay);
    assert!(sched.poll_timers(deadline - Duration::from_millis(1)).dirty.is_empty());

    let reveal = sched.poll_timers(deadline);
    assert_eq!(reveal.dirty, DirtySet::of(&[RenderRegion::Hands]));
    assert_eq!(sched.pending_reveal(), None);
    face.paint(sched.state(), reveal.dirty).unwrap();
    assert_eq!(last_frame(&driver).as_slice(), shown.as_slice());
}

#[test]
fn weather_from_a_json_line_reaches_the_weather_layer() {
    let (mut face, _driver) = compositor();
    let mut sched = scheduler();
    face.paint(sched.state(), DirtySet::all()).unwrap();
    let blank = face.layer(RenderRegion::Weather).clone();

    let line = r#"{"type":"inbox","message":{"0":72,"1":"rain"}}"#;
    let event: FaceEvent = serde_json::from_str(line).unwrap();
    let outcome = sched.dispatch(event, Instant::now());
    assert_eq!(outcome.dirty, DirtySet::of(&[RenderRegion::Weather]));
    assert_eq!(sched.state().temperature(), Some(72));
    assert_eq!(sched.state().weather_icon(), WeatherIcon::Rain);

    face.paint(sched.state(), outcome.dirty).unwrap();
    assert_ne!(face.layer(RenderRegion::Weather).as_slice(), blank.as_slice());

    // half a payload is dropped without touching the face
    let partial: FaceEvent =
        serde_json::from_str(r#"{"type":"inbox","message":{"0":10}}"#).unwrap();
    assert!(sched.dispatch(partial, Instant::now()).dirty.is_empty());
    assert_eq!(sched.state().temperature(), Some(72));
    assert_eq!(sched.stats().messages_rejected, 1);
    assert_eq!(sched.stats().messages_applied, 1);
}

#[test]
fn scaled_canvas_paints_end_to_end() {
    let driver = MockDriver::new_with_size(200, 228);
    let handle = driver.clone();
    let mut face = FaceCompositor::new(Box::new(driver)).unwrap();
    face.paint(&FaceState::new(at(3, 40), NonZeroU32::new(100).unwrap()), DirtySet::empty())
        .unwrap();

    let frame = last_frame(&handle);
    assert_eq!(frame.bounding_box().size, Size::new(200, 228));
    assert!(handle.state().lock().unwrap().count_on_pixels() > 0);
}
