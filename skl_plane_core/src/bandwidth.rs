// Copyright 2026 the skl_plane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bandwidth allocation values attached to plane states.
//!
//! The display buffer (DDB) split and the watermark levels are computed by
//! the watermark code outside this crate. A plane state only carries the
//! results so that they commit and are discarded together with the geometry
//! they were computed for.

/// Number of watermark levels a plane programs.
pub const MAX_WM_LEVELS: usize = 8;

/// A half-open range of display buffer blocks allocated to one plane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DdbEntry {
    start: u16,
    end: u16,
}

impl DdbEntry {
    /// Creates an entry covering blocks `start..end`.
    ///
    /// # Panics
    ///
    /// Panics if `end < start`.
    #[must_use]
    pub const fn new(start: u16, end: u16) -> Self {
        assert!(end >= start, "DDB entry ends before it starts");
        Self { start, end }
    }

    /// First block.
    #[must_use]
    pub const fn start(&self) -> u16 {
        self.start
    }

    /// One past the last block.
    #[must_use]
    pub const fn end(&self) -> u16 {
        self.end
    }

    /// Number of blocks.
    #[must_use]
    pub const fn size(&self) -> u16 {
        self.end - self.start
    }

    /// Returns whether the entry covers no blocks.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns whether two entries share any block.
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        !self.is_empty() && !other.is_empty() && self.start < other.end && other.start < self.end
    }
}

/// One watermark level as programmed into `PLANE_WM`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct WmLevel {
    /// Whether the level is usable.
    pub enable: bool,
    /// Blocks that must be buffered.
    pub blocks: u16,
    /// Lines that must be buffered.
    pub lines: u8,
}

/// DDB allocation and watermark levels of one plane state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PlaneBandwidth {
    /// Allocation for the main (or only) surface.
    pub ddb: DdbEntry,
    /// Allocation for the Y surface on hardware that fetches NV12 luma
    /// through the same plane (display version 9 and 10). Empty otherwise.
    pub ddb_y: DdbEntry,
    /// Watermark levels, lowest first.
    pub wm: [WmLevel; MAX_WM_LEVELS],
    /// Transition watermark.
    pub trans_wm: WmLevel,
}

impl PlaneBandwidth {
    /// Returns the highest enabled watermark level, if any.
    #[must_use]
    pub fn max_enabled_level(&self) -> Option<usize> {
        self.wm.iter().rposition(|level| level.enable)
    }

    /// Returns whether every enabled level fits in the allocation.
    #[must_use]
    pub fn fits(&self) -> bool {
        let blocks = self.ddb.size() + self.ddb_y.size();
        self.wm
            .iter()
            .chain(core::iter::once(&self.trans_wm))
            .filter(|level| level.enable)
            .all(|level| level.blocks <= blocks)
    }
}
