/*
 *  main.rs
 *
 *  dialface - analog watch face renderer
 *  (c) 2020-26 Stuart Hunter
 *
 *  Host loop: wall clock, reveal timer and a JSON-lines event feed
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

use std::future;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local, NaiveDateTime, Timelike};
use env_logger::Env;
use log::{debug, error, info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};

use dialface::config;
use dialface::display::drivers::{MockDriver, PbmSnapshot};
use dialface::display::{BoxedDriver, DirtySet, FaceCompositor};
use dialface::face::{Alert, Dispatch, FaceEvent, FaceState, UpdateScheduler};

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// Wall-clock time floored to the minute
fn minute_floor(t: NaiveDateTime) -> NaiveDateTime {
    t.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(t)
}

/// Time left until the next minute boundary
fn until_next_minute(now: DateTime<Local>) -> Duration {
    let into_minute = Duration::new(now.second() as u64, now.nanosecond() % 1_000_000_000);
    Duration::from_secs(60).saturating_sub(into_minute)
}

/// Resolves at the reveal deadline, never if no timer is armed
async fn reveal_timer(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(tokio::time::Instant::from_std(at)).await,
        None => future::pending().await,
    }
}

/// One raw line of the event feed; blank lines and junk (bad UTF-8
/// included) are skipped
fn parse_event(line: &[u8]) -> Option<FaceEvent> {
    let line = line.trim_ascii();
    if line.is_empty() {
        return None;
    }
    match serde_json::from_slice(line) {
        Ok(event) => Some(event),
        Err(e) => {
            warn!("ignoring event line {:?}: {}", String::from_utf8_lossy(line), e);
            None
        }
    }
}

fn open_driver(cfg: &config::Config) -> BoxedDriver {
    let (width, height) = cfg.canvas_size();
    match cfg.snapshot.as_ref() {
        Some(path) => {
            info!("writing frames to {}", path.display());
            Box::new(PbmSnapshot::new(path, width, height))
        }
        None => {
            info!("no snapshot configured, frames stay in memory");
            Box::new(MockDriver::new_with_size(width, height))
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cfg = config::load()?;

    env_logger::Builder::from_env(Env::default().default_filter_or(cfg.log_level()))
        .format_timestamp_secs()
        .init();

    info!("v.{} built {} ({})", env!("CARGO_PKG_VERSION"), BUILD_DATE, BUILD_PROFILE);

    let mut face = FaceCompositor::new(open_driver(&cfg))?;
    let state = FaceState::new(minute_floor(Local::now().naive_local()), cfg.step_goal());
    let mut scheduler = UpdateScheduler::new(state, cfg.scheduler_config());

    // first paint covers every region
    face.paint(scheduler.state(), DirtySet::all())?;

    let mut lines = BufReader::new(tokio::io::stdin()).split(b'\n');
    let mut feed_open = true;

    loop {
        let outcome: Dispatch = tokio::select! {
            _ = tokio::time::sleep(until_next_minute(Local::now())) => {
                let at = minute_floor(Local::now().naive_local());
                scheduler.dispatch(FaceEvent::MinuteTick { at }, Instant::now())
            }
            _ = reveal_timer(scheduler.pending_reveal()) => {
                scheduler.poll_timers(Instant::now())
            }
            line = lines.next_segment(), if feed_open => match line {
                Ok(Some(line)) => match parse_event(&line) {
                    Some(event) => scheduler.dispatch(event, Instant::now()),
                    None => Dispatch::default(),
                },
                Ok(None) => {
                    info!("event feed closed, running on the clock alone");
                    feed_open = false;
                    Dispatch::default()
                }
                Err(e) => {
                    error!("event feed failed: {}", e);
                    feed_open = false;
                    Dispatch::default()
                }
            },
            _ = tokio::signal::ctrl_c() => {
                info!("Ctrl-C received. Shutting down.");
                break;
            }
        };

        if let Some(Alert::DoublePulse) = outcome.alert {
            info!("vibe: double pulse");
        }
        match face.paint(scheduler.state(), outcome.dirty) {
            Ok(report) if report.presented => debug!("painted {:?}", report.rendered),
            Ok(_) => {}
            Err(e) => error!("paint failed: {}", e),
        }
    }

    let stats = scheduler.stats();
    info!(
        "{} events, {} weather updates, {} messages rejected, {} frames",
        stats.events,
        stats.messages_applied,
        stats.messages_rejected,
        face.metrics().frame_count
    );
    Ok(())
}
