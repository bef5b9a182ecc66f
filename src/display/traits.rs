/*
 *  display/traits.rs
 *
 *  dialface - analog watch face renderer
 *  (c) 2020-26 Stuart Hunter
 *
 *  Core trait definitions for the frame sink abstraction
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
use crate::display::error::DisplayError;
use crate::vframebuf::VarFrameBuf;

/// Display capabilities and metadata
#[derive(Debug, Clone)]
pub struct DisplayCapabilities {
    /// Display width in pixels
    pub width: u32,

    /// Display height in pixels
    pub height: u32,

    /// Whether the glass is round (corners not visible)
    pub is_round: bool,
}

/// Where composed frames go.
///
/// The host compositor owns the real panel; everything the face needs from
/// it is "take this frame". Implementations must not block.
pub trait DisplayDriver: Send {
    /// Returns the capabilities of this display
    fn capabilities(&self) -> &DisplayCapabilities;

    /// Returns the display dimensions as (width, height)
    fn dimensions(&self) -> (u32, u32) {
        let caps = self.capabilities();
        (caps.width, caps.height)
    }

    /// Prepare the sink for frames
    fn init(&mut self) -> Result<(), DisplayError>;

    /// Show a fully composed frame
    fn present(&mut self, frame: &VarFrameBuf<BinaryColor>) -> Result<(), DisplayError>;

    /// Check that a frame matches the panel before presenting it
    fn check_frame(&self, frame: &VarFrameBuf<BinaryColor>) -> Result<(), DisplayError> {
        let (w, h) = self.dimensions();
        let expected = (w as usize).saturating_mul(h as usize);
        let actual = frame.as_slice().len();
        if expected != actual {
            return Err(DisplayError::BufferSizeMismatch { expected, actual });
        }
        Ok(())
    }
}

/// Owned driver handle held by the compositor
pub type BoxedDriver = Box<dyn DisplayDriver>;
