/*
 *  lib.rs
 *
 *  dialface - analog watch face renderer
 *  (c) 2020-26 Stuart Hunter
 *
 *  dialface library: face model, layered renderer and frame sinks
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

//! Event-driven analog watch face.
//!
//! Host events go through [`face::UpdateScheduler`], which mutates the
//! [`face::FaceState`] and reports the regions that changed. The
//! [`display::FaceCompositor`] re-renders just those regions into their
//! layers, composes the canvas and hands it to a [`display::DisplayDriver`].

pub mod config;
pub mod display;
pub mod draw;
pub mod face;
pub mod geometry;
pub mod glyphs;
pub mod vframebuf;

pub use display::{DirtySet, FaceCompositor, LayoutConfig, RenderRegion};
pub use face::{Dispatch, FaceEvent, FaceState, UpdateScheduler};
