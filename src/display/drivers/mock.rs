/*
 *  display/drivers/mock.rs
 *
 *  dialface - analog watch face renderer
 *  (c) 2020-26 Stuart Hunter
 *
 *  Mock frame sink for tests, records every presented frame
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

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use crate::display::error::DisplayError;
use crate::display::traits::{DisplayCapabilities, DisplayDriver};
use crate::vframebuf::VarFrameBuf;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Mock display driver for testing
///
/// Simulates the host compositor without a panel. Every presented frame is
/// copied into shared state so a test can keep a handle after the driver is
/// boxed and handed to the compositor.
#[derive(Debug, Clone)]
pub struct MockDriver {
    /// Display capabilities
    capabilities: DisplayCapabilities,

    /// Shared state for testing
    state: Arc<Mutex<MockDriverState>>,
}

/// Internal state for the mock driver (shared for inspection in tests)
#[derive(Debug, Default)]
pub struct MockDriverState {
    /// Number of times init() was called
    pub init_count: usize,

    /// Number of frames presented
    pub present_count: usize,

    /// Whether the driver is initialized
    pub is_initialized: bool,

    /// Copy of the most recent frame
    pub last_frame: Option<VarFrameBuf<BinaryColor>>,

    /// Simulate failures (for error testing)
    pub simulate_present_failure: bool,
    pub simulate_init_failure: bool,
}

impl MockDriverState {
    /// Pixel of the last presented frame
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<BinaryColor> {
        self.last_frame.as_ref()?.pixel(Point::new(x, y))
    }

    /// Count number of pixels set to On in the last frame
    pub fn count_on_pixels(&self) -> usize {
        self.last_frame
            .as_ref()
            .map(|f| f.count(BinaryColor::On))
            .unwrap_or(0)
    }
}

impl MockDriver {
    /// Create a mock driver with specific dimensions
    pub fn new_with_size(width: u32, height: u32) -> Self {
        Self {
            capabilities: DisplayCapabilities {
                width,
                height,
                is_round: false,
            },
            state: Arc::new(Mutex::new(MockDriverState::default())),
        }
    }

    /// Get reference to state for inspection in tests
    pub fn state(&self) -> Arc<Mutex<MockDriverState>> {
        Arc::clone(&self.state)
    }

    /// Reset state counters (useful between tests)
    pub fn reset_state(&mut self) {
        *self.lock() = MockDriverState::default();
    }

    // a panicking test thread must not wedge the others
    fn lock(&self) -> MutexGuard<'_, MockDriverState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DisplayDriver for MockDriver {
    fn capabilities(&self) -> &DisplayCapabilities {
        &self.capabilities
    }

    fn init(&mut self) -> Result<(), DisplayError> {
        let mut state = self.lock();

        if state.simulate_init_failure {
            return Err(DisplayError::InitializationFailed("Simulated init failure".to_string()));
        }

        state.init_count += 1;
        state.is_initialized = true;
        Ok(())
    }

    fn present(&mut self, frame: &VarFrameBuf<BinaryColor>) -> Result<(), DisplayError> {
        self.check_frame(frame)?;
        let mut state = self.lock();

        if state.simulate_present_failure {
            return Err(DisplayError::PresentFailed("Simulated present failure".to_string()));
        }

        state.present_count += 1;
        state.last_frame = Some(frame.clone());
        Ok(())
    }
}
