/*
 *  display/region.rs
 *
 *  dialface - analog watch face renderer
 *  (c) 2020-26 Stuart Hunter
 *
 *  Render regions and the dirty set handed to the compositor
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

use std::fmt;

/// A part of the face owned by exactly one renderer.
///
/// Declaration order is the stacking order, bottom first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum RenderRegion {
    Dial = 0,
    Date,
    Battery,
    Connectivity,
    Steps,
    Weather,
    Hands,
}

impl RenderRegion {
    /// Every region, bottom layer first
    pub const ALL: [RenderRegion; 7] = [
        RenderRegion::Dial,
        RenderRegion::Date,
        RenderRegion::Battery,
        RenderRegion::Connectivity,
        RenderRegion::Steps,
        RenderRegion::Weather,
        RenderRegion::Hands,
    ];

    /// Regions that occupy their own rectangle (everything between dial and hands)
    pub const STATUS: [RenderRegion; 5] = [
        RenderRegion::Date,
        RenderRegion::Battery,
        RenderRegion::Connectivity,
        RenderRegion::Steps,
        RenderRegion::Weather,
    ];

    fn bit(self) -> u8 {
        1 << (self as u8)
    }

    pub fn name(self) -> &'static str {
        match self {
            RenderRegion::Dial => "dial",
            RenderRegion::Date => "date",
            RenderRegion::Battery => "battery",
            RenderRegion::Connectivity => "connectivity",
            RenderRegion::Steps => "steps",
            RenderRegion::Weather => "weather",
            RenderRegion::Hands => "hands",
        }
    }
}

/// Set of regions flagged for redraw on the next paint pass
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct DirtySet(u8);

impl DirtySet {
    pub const fn empty() -> Self {
        DirtySet(0)
    }

    pub fn all() -> Self {
        RenderRegion::ALL.iter().copied().collect()
    }

    pub fn of(regions: &[RenderRegion]) -> Self {
        regions.iter().copied().collect()
    }

    pub fn mark(&mut self, region: RenderRegion) {
        self.0 |= region.bit();
    }

    pub fn contains(&self, region: RenderRegion) -> bool {
        self.0 & region.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Merge another set into this one
    pub fn extend_from(&mut self, other: DirtySet) {
        self.0 |= other.0;
    }

    /// Marked regions, bottom layer first
    pub fn iter(&self) -> impl Iterator<Item = RenderRegion> + '_ {
        RenderRegion::ALL.into_iter().filter(|r| self.contains(*r))
    }

    /// Return the current set and leave this one empty
    pub fn take(&mut self) -> DirtySet {
        std::mem::take(self)
    }
}

impl FromIterator<RenderRegion> for DirtySet {
    fn from_iter<T: IntoIterator<Item = RenderRegion>>(iter: T) -> Self {
        let mut set = DirtySet::empty();
        for r in iter {
            set.mark(r);
        }
        set
    }
}

impl fmt::Debug for DirtySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(RenderRegion::name)).finish()
    }
}
