// Copyright 2026 the skl_plane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hardware identity and display configuration.
//!
//! Everything that varies between display engine revisions is keyed off a
//! [`DisplayRevision`]. A [`DisplayConfig`] bundles the revision with the
//! pipe and plane counts of a concrete part and is passed explicitly to the
//! [`CapabilityRegistry`](crate::caps::CapabilityRegistry) and
//! [`Display`](crate::display::Display) constructors.

use core::fmt;

use crate::id::{PipeId, PlaneId};

/// A display engine revision within the Skylake family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DisplayRevision {
    /// Skylake (display version 9).
    Skylake,
    /// Broxton (display version 9).
    Broxton,
    /// Kaby Lake / Coffee Lake (display version 9).
    Kabylake,
    /// Gemini Lake (display version 10).
    Geminilake,
    /// Ice Lake (display version 11).
    Icelake,
    /// Tiger Lake (display version 12).
    Tigerlake,
    /// Rocket Lake (display version 12, reduced plane count).
    Rocketlake,
    /// Alder Lake-P (display version 13).
    Alderlake,
    /// DG2 discrete (display version 13, Tile4 instead of Y tiling).
    Dg2,
}

impl DisplayRevision {
    /// Returns the display IP version.
    #[must_use]
    pub const fn display_version(self) -> u8 {
        match self {
            Self::Skylake | Self::Broxton | Self::Kabylake => 9,
            Self::Geminilake => 10,
            Self::Icelake => 11,
            Self::Tigerlake | Self::Rocketlake => 12,
            Self::Alderlake | Self::Dg2 => 13,
        }
    }

    /// Returns whether the part uses the reduced five-plane layout.
    #[must_use]
    pub const fn has_plane_minimization(self) -> bool {
        matches!(self, Self::Rocketlake)
    }

    /// Returns whether semi-planar formats are scanned out by a linked pair of
    /// planes rather than by one plane and its AUX surface.
    #[must_use]
    pub const fn has_linked_planar(self) -> bool {
        self.display_version() >= 11
    }

    /// Returns whether the part tiles with Tile4 instead of legacy Y.
    #[must_use]
    pub const fn has_tile4(self) -> bool {
        matches!(self, Self::Dg2)
    }
}

impl fmt::Display for DisplayRevision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Skylake => "Skylake",
            Self::Broxton => "Broxton",
            Self::Kabylake => "Kaby Lake",
            Self::Geminilake => "Gemini Lake",
            Self::Icelake => "Ice Lake",
            Self::Tigerlake => "Tiger Lake",
            Self::Rocketlake => "Rocket Lake",
            Self::Alderlake => "Alder Lake-P",
            Self::Dg2 => "DG2",
        };
        write!(f, "{name} (display {})", self.display_version())
    }
}

/// Configuration describing one concrete display engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Hardware revision.
    pub revision: DisplayRevision,
    /// Number of pipes (1 to 4).
    pub pipe_count: u8,
    /// Universal planes (primary plus sprites) per pipe, indexed by
    /// [`PipeId::index`]. The cursor is not counted.
    pub universal_planes: [u8; 4],
}

impl DisplayConfig {
    /// Default configuration for the given revision.
    #[must_use]
    pub const fn new(revision: DisplayRevision) -> Self {
        match revision {
            DisplayRevision::Skylake => Self::skylake(),
            DisplayRevision::Broxton => Self::broxton(),
            DisplayRevision::Kabylake => Self::kabylake(),
            DisplayRevision::Geminilake => Self::geminilake(),
            DisplayRevision::Icelake => Self::icelake(),
            DisplayRevision::Tigerlake => Self::tigerlake(),
            DisplayRevision::Rocketlake => Self::rocketlake(),
            DisplayRevision::Alderlake => Self::alderlake(),
            DisplayRevision::Dg2 => Self::dg2(),
        }
    }

    /// Skylake: three pipes, pipe C has one sprite fewer.
    #[must_use]
    pub const fn skylake() -> Self {
        Self {
            revision: DisplayRevision::Skylake,
            pipe_count: 3,
            universal_planes: [3, 3, 2, 0],
        }
    }

    /// Broxton: three pipes with three universal planes each.
    #[must_use]
    pub const fn broxton() -> Self {
        Self {
            revision: DisplayRevision::Broxton,
            pipe_count: 3,
            universal_planes: [3, 3, 3, 0],
        }
    }

    /// Kaby Lake / Coffee Lake: same layout as Skylake.
    #[must_use]
    pub const fn kabylake() -> Self {
        Self {
            revision: DisplayRevision::Kabylake,
            pipe_count: 3,
            universal_planes: [3, 3, 2, 0],
        }
    }

    /// Gemini Lake: three pipes with four universal planes each.
    #[must_use]
    pub const fn geminilake() -> Self {
        Self {
            revision: DisplayRevision::Geminilake,
            pipe_count: 3,
            universal_planes: [4, 4, 4, 0],
        }
    }

    /// Ice Lake: three pipes with seven universal planes each.
    #[must_use]
    pub const fn icelake() -> Self {
        Self {
            revision: DisplayRevision::Icelake,
            pipe_count: 3,
            universal_planes: [7, 7, 7, 0],
        }
    }

    /// Tiger Lake: four pipes with seven universal planes each.
    #[must_use]
    pub const fn tigerlake() -> Self {
        Self {
            revision: DisplayRevision::Tigerlake,
            pipe_count: 4,
            universal_planes: [7, 7, 7, 7],
        }
    }

    /// Rocket Lake: three pipes with five universal planes each.
    #[must_use]
    pub const fn rocketlake() -> Self {
        Self {
            revision: DisplayRevision::Rocketlake,
            pipe_count: 3,
            universal_planes: [5, 5, 5, 0],
        }
    }

    /// Alder Lake-P: four pipes with five universal planes each.
    #[must_use]
    pub const fn alderlake() -> Self {
        Self {
            revision: DisplayRevision::Alderlake,
            pipe_count: 4,
            universal_planes: [5, 5, 5, 5],
        }
    }

    /// DG2: four pipes with five universal planes each.
    #[must_use]
    pub const fn dg2() -> Self {
        Self {
            revision: DisplayRevision::Dg2,
            pipe_count: 4,
            universal_planes: [5, 5, 5, 5],
        }
    }

    /// Returns whether the engine has the given pipe.
    #[must_use]
    pub const fn has_pipe(&self, pipe: PipeId) -> bool {
        pipe.index() < self.pipe_count
    }

    /// Returns whether the engine has the given plane slot.
    ///
    /// Every existing pipe has a cursor.
    #[must_use]
    pub const fn has_plane(&self, pipe: PipeId, plane: PlaneId) -> bool {
        if !self.has_pipe(pipe) {
            return false;
        }
        match plane {
            PlaneId::Cursor => true,
            _ => plane.index() < self.universal_planes[pipe.index() as usize],
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self::skylake()
    }
}
