/*
 *  display/manager.rs
 *
 *  dialface - analog watch face renderer
 *  (c) 2020-26 Stuart Hunter
 *
 *  Face compositor: per-region layers, dirty-only redraw, compose and present
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

use std::time::Instant;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use log::{debug, info, warn};

use crate::display::color::{Ink, BACKGROUND};
use crate::display::components::FaceComponents;
use crate::display::error::DisplayError;
use crate::display::layout::{LayoutConfig, MAX_CANVAS};
use crate::display::region::{DirtySet, RenderRegion};
use crate::display::traits::{BoxedDriver, DisplayCapabilities};
use crate::face::state::FaceState;
use crate::vframebuf::VarFrameBuf;

/// Frame budget; a paint pass slower than this is logged
pub const FRAME_BUDGET_US: u64 = 33_333;

/// Paint timing, updated after every presented frame
#[derive(Debug, Clone, Default)]
pub struct PaintMetrics {
    /// Time spent re-rendering dirty layers and composing
    pub render_time_us: u64,

    /// Time spent handing the frame to the driver
    pub present_time_us: u64,

    /// Frames presented so far
    pub frame_count: u64,

    /// Running average of render + present
    pub avg_frame_time_us: u64,
}

impl PaintMetrics {
    pub fn record_frame(&mut self, render_time_us: u64, present_time_us: u64) {
        self.render_time_us = render_time_us;
        self.present_time_us = present_time_us;
        self.frame_count += 1;

        let frame_time_us = render_time_us + present_time_us;
        if self.avg_frame_time_us == 0 {
            self.avg_frame_time_us = frame_time_us;
        } else {
            self.avg_frame_time_us = (self.avg_frame_time_us + frame_time_us) / 2;
        }

        if frame_time_us > FRAME_BUDGET_US {
            warn!(
                "Frame time {}μs exceeds budget {}μs (render: {}μs, present: {}μs)",
                frame_time_us, FRAME_BUDGET_US, render_time_us, present_time_us
            );
        }
    }
}

/// What one paint pass did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaintReport {
    /// Layers that were re-rendered
    pub rendered: DirtySet,

    /// Whether a frame went to the driver
    pub presented: bool,
}

/// Owns one layer buffer per [`RenderRegion`] plus the composed canvas.
///
/// A paint pass re-renders only the dirty layers, then composes every layer
/// bottom-up (clear pixels let lower layers through) and presents the
/// canvas. Clean layers keep their pixels from the last time they were
/// rendered, so a region is never redrawn for another region's change.
pub struct FaceCompositor {
    driver: BoxedDriver,
    capabilities: DisplayCapabilities,
    layout: LayoutConfig,
    components: FaceComponents,
    /// Indexed by `RenderRegion as usize`
    layers: Vec<VarFrameBuf<Ink>>,
    canvas: VarFrameBuf<BinaryColor>,
    /// Regions owed a render regardless of what the caller marks
    pending: DirtySet,
    /// Set when the canvas changed but the driver has not taken it yet
    needs_present: bool,
    render_counts: [u64; RenderRegion::ALL.len()],
    metrics: PaintMetrics,
}

impl FaceCompositor {
    /// Build a compositor for the driver's canvas size
    pub fn new(driver: BoxedDriver) -> Result<Self, DisplayError> {
        let (width, height) = driver.dimensions();
        let layout = LayoutConfig::for_canvas(width, height)?;
        Self::with_layout(driver, layout)
    }

    /// Build a compositor with an explicit layout
    pub fn with_layout(mut driver: BoxedDriver, layout: LayoutConfig) -> Result<Self, DisplayError> {
        Self::check_layout(driver.capabilities(), &layout)?;
        driver.init()?;
        let capabilities = driver.capabilities().clone();

        info!(
            "Display: {}x{}, Layout: {:?}",
            capabilities.width, capabilities.height, layout.category
        );

        Ok(Self {
            components: FaceComponents::new(&layout),
            layers: Self::build_layers(&layout),
            canvas: VarFrameBuf::new(layout.width, layout.height, BACKGROUND),
            driver,
            capabilities,
            layout,
            pending: DirtySet::all(),
            needs_present: true,
            render_counts: [0; RenderRegion::ALL.len()],
            metrics: PaintMetrics::default(),
        })
    }

    fn check_layout(caps: &DisplayCapabilities, layout: &LayoutConfig) -> Result<(), DisplayError> {
        if (caps.width, caps.height) != (layout.width, layout.height) {
            return Err(DisplayError::InvalidConfiguration(format!(
                "layout is {}x{} but the display is {}x{}",
                layout.width, layout.height, caps.width, caps.height
            )));
        }
        if layout.width > MAX_CANVAS || layout.height > MAX_CANVAS {
            return Err(DisplayError::InvalidConfiguration(format!(
                "layout {}x{} exceeds {MAX_CANVAS}x{MAX_CANVAS}",
                layout.width, layout.height
            )));
        }
        Ok(())
    }

    fn build_layers(layout: &LayoutConfig) -> Vec<VarFrameBuf<Ink>> {
        RenderRegion::ALL
            .iter()
            .map(|r| VarFrameBuf::with_area(layout.region_bounds(*r), Ink::Clear))
            .collect()
    }

    /// Get display capabilities
    pub fn capabilities(&self) -> &DisplayCapabilities {
        &self.capabilities
    }

    /// Get layout configuration
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn metrics(&self) -> &PaintMetrics {
        &self.metrics
    }

    /// Last composed frame
    pub fn canvas(&self) -> &VarFrameBuf<BinaryColor> {
        &self.canvas
    }

    /// Cached pixels of one region
    pub fn layer(&self, region: RenderRegion) -> &VarFrameBuf<Ink> {
        &self.layers[region as usize]
    }

    /// How many times a region has been rendered
    pub fn render_count(&self, region: RenderRegion) -> u64 {
        self.render_counts[region as usize]
    }

    /// Swap in a new layout for the same display.
    ///
    /// Every layer is rebuilt, so every region is owed a render; the
    /// returned set says as much.
    pub fn set_layout(&mut self, layout: LayoutConfig) -> Result<DirtySet, DisplayError> {
        Self::check_layout(&self.capabilities, &layout)?;
        info!("layout changed to {:?}", layout.category);
        self.components = FaceComponents::new(&layout);
        self.layers = Self::build_layers(&layout);
        self.layout = layout;
        self.pending = DirtySet::all();
        self.needs_present = true;
        Ok(self.pending)
    }

    /// Re-render `dirty` (plus anything still owed), compose, present.
    ///
    /// Nothing dirty and nothing owed means nothing is drawn or presented.
    pub fn paint(&mut self, state: &FaceState, dirty: DirtySet) -> Result<PaintReport, DisplayError> {
        let mut todo = self.pending.take();
        todo.extend_from(dirty);
        if todo.is_empty() && !self.needs_present {
            return Ok(PaintReport::default());
        }

        let render_start = Instant::now();
        for region in todo.iter() {
            let layer = &mut self.layers[region as usize];
            layer.clear_color(Ink::Clear);
            let Ok(()) = self.components.render(region, state, layer);
            self.render_counts[region as usize] += 1;
            debug!("rendered {}", region.name());
        }
        if !todo.is_empty() {
            self.compose();
            self.needs_present = true;
        }
        let render_time_us = render_start.elapsed().as_micros() as u64;

        let present_start = Instant::now();
        self.driver.present(&self.canvas)?;
        self.needs_present = false;
        let present_time_us = present_start.elapsed().as_micros() as u64;
        self.metrics.record_frame(render_time_us, present_time_us);

        Ok(PaintReport { rendered: todo, presented: true })
    }

    fn compose(&mut self) {
        self.canvas.clear_color(BACKGROUND);
        for layer in &self.layers {
            let Ok(()) = self.canvas.draw_iter(
                layer
                    .pixels()
                    .filter_map(|(p, ink)| ink.to_binary().map(|c| Pixel(p, c))),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::drivers::MockDriver;
    use crate::display::layout::LayoutCategory;

    fn compositor() -> (FaceCompositor, MockDriver) {
        let driver = MockDriver::new_with_size(144, 168);
        let handle = driver.clone();
        (FaceCompositor::new(Box::new(driver)).unwrap(), handle)
    }

    #[test]
    fn first_paint_renders_everything() {
        let (mut face, driver) = compositor();
        let report = face.paint(&FaceState::default(), DirtySet::empty()).unwrap();
        assert_eq!(report.rendered, DirtySet::all());
        assert!(report.presented);
        assert_eq!(driver.state().lock().unwrap().present_count, 1);
        assert_eq!(driver.state().lock().unwrap().init_count, 1);
    }

    #[test]
    fn clean_paint_is_a_no_op() {
        let (mut face, driver) = compositor();
        face.paint(&FaceState::default(), DirtySet::empty()).unwrap();
        let report = face.paint(&FaceState::default(), DirtySet::empty()).unwrap();
        assert_eq!(report, PaintReport::default());
        assert_eq!(driver.state().lock().unwrap().present_count, 1);
    }

    #[test]
    fn only_dirty_layers_are_rendered() {
        let (mut face, _driver) = compositor();
        let state = FaceState::default();
        face.paint(&state, DirtySet::empty()).unwrap();
        face.paint(&state, DirtySet::of(&[RenderRegion::Battery])).unwrap();

        assert_eq!(face.render_count(RenderRegion::Battery), 2);
        for region in RenderRegion::ALL.into_iter().filter(|r| *r != RenderRegion::Battery) {
            assert_eq!(face.render_count(region), 1, "{} redrawn", region.name());
        }
    }

    #[test]
    fn composed_frame_matches_driver_frame() {
        let (mut face, driver) = compositor();
        face.paint(&FaceState::default(), DirtySet::empty()).unwrap();
        let state = driver.state();
        let state = state.lock().unwrap();
        let frame = state.last_frame.as_ref().unwrap();
        assert_eq!(frame.as_slice(), face.canvas().as_slice());
        // dial disc is lit, corner outside it is background
        assert_eq!(frame.pixel(Point::new(40, 40)), Some(BinaryColor::On));
        assert_eq!(frame.pixel(Point::new(0, 167)), Some(BinaryColor::Off));
    }

    #[test]
    fn failed_present_is_retried_on_next_paint() {
        let (mut face, driver) = compositor();
        driver.state().lock().unwrap().simulate_present_failure = true;
        assert!(face.paint(&FaceState::default(), DirtySet::empty()).is_err());

        driver.state().lock().unwrap().simulate_present_failure = false;
        let report = face.paint(&FaceState::default(), DirtySet::empty()).unwrap();
        assert!(report.rendered.is_empty());
        assert!(report.presented);
        assert_eq!(face.render_count(RenderRegion::Dial), 1);
    }

    #[test]
    fn set_layout_marks_everything() {
        let driver = MockDriver::new_with_size(180, 180);
        let mut face = FaceCompositor::new(Box::new(driver)).unwrap();
        assert_eq!(face.layout().category, LayoutCategory::Round);
        face.paint(&FaceState::default(), DirtySet::empty()).unwrap();

        let scaled = LayoutConfig::classic().scaled_to(180, 180);
        assert_eq!(face.set_layout(scaled).unwrap(), DirtySet::all());
        let report = face.paint(&FaceState::default(), DirtySet::empty()).unwrap();
        assert_eq!(report.rendered, DirtySet::all());

        assert!(face.set_layout(LayoutConfig::classic()).is_err());
    }

    #[test]
    fn oversized_display_is_rejected_before_allocating() {
        let driver = MockDriver::new_with_size(65536, 65536);
        let handle = driver.clone();
        assert!(FaceCompositor::new(Box::new(driver)).is_err());
        assert_eq!(handle.state().lock().unwrap().init_count, 0);
    }
}
