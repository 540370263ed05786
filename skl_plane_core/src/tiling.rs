// Copyright 2026 the skl_plane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Surface tiling layouts and their tile geometry.
//!
//! Every tiled layout uses 4 KiB tiles. What differs is the tile shape: X
//! tiles are wide and short, Y and Tile4 tiles are narrow and tall, and Yf
//! tiles change shape with the pixel size. The compressed (CCS) layouts tile
//! the main surface like their base layout and add an AUX surface with its own
//! tile shape.

use crate::config::DisplayRevision;

/// Size in bytes of one tile, and the alignment unit of every surface offset.
pub const TILE_SIZE: u32 = 4096;

/// Stride unit for linear surfaces, in bytes.
pub const LINEAR_STRIDE_UNIT: u32 = 64;

const DRM_FORMAT_MOD_VENDOR_INTEL: u64 = 0x01;

const fn fourcc_mod_code(vendor: u64, value: u64) -> u64 {
    (vendor << 56) | (value & 0x00ff_ffff_ffff_ffff)
}

/// Memory layout of a framebuffer surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tiling {
    /// Row-major, no tiling.
    Linear,
    /// Legacy X tiling (512 B x 8 rows).
    X,
    /// Legacy Y tiling (128 B x 32 rows).
    Y,
    /// Yf tiling, shape depends on bytes per pixel.
    Yf,
    /// Y tiling with render compression (display version 9 to 11).
    YCcs,
    /// Yf tiling with render compression (display version 9 to 11).
    YfCcs,
    /// Y tiling with render compression (display version 12).
    Gen12RcCcs,
    /// Y tiling with media compression (display version 12).
    Gen12McCcs,
    /// Tile4 (DG2 replacement for Y tiling, same tile shape).
    Tile4,
}

impl Tiling {
    /// All tilings.
    pub const ALL: [Self; 9] = [
        Self::Linear,
        Self::X,
        Self::Y,
        Self::Yf,
        Self::YCcs,
        Self::YfCcs,
        Self::Gen12RcCcs,
        Self::Gen12McCcs,
        Self::Tile4,
    ];

    /// Returns the DRM format modifier for this tiling.
    #[must_use]
    pub const fn modifier(self) -> u64 {
        let value = match self {
            Self::Linear => return 0,
            Self::X => 1,
            Self::Y => 2,
            Self::Yf => 3,
            Self::YCcs => 4,
            Self::YfCcs => 5,
            Self::Gen12RcCcs => 6,
            Self::Gen12McCcs => 7,
            Self::Tile4 => 9,
        };
        fourcc_mod_code(DRM_FORMAT_MOD_VENDOR_INTEL, value)
    }

    /// Returns the tiling for a DRM format modifier, if it is one of ours.
    #[must_use]
    pub fn from_modifier(modifier: u64) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.modifier() == modifier)
    }

    /// Returns whether this layout carries a CCS AUX surface.
    #[must_use]
    pub const fn is_ccs(self) -> bool {
        matches!(
            self,
            Self::YCcs | Self::YfCcs | Self::Gen12RcCcs | Self::Gen12McCcs
        )
    }

    /// Returns whether this is a gen12-style CCS layout.
    #[must_use]
    pub const fn is_gen12_ccs(self) -> bool {
        matches!(self, Self::Gen12RcCcs | Self::Gen12McCcs)
    }

    /// Returns the tiling of the main surface, with compression stripped.
    #[must_use]
    pub const fn base(self) -> Self {
        match self {
            Self::YCcs | Self::Gen12RcCcs | Self::Gen12McCcs => Self::Y,
            Self::YfCcs => Self::Yf,
            other => other,
        }
    }

    /// Returns whether the main surface can be scanned out rotated by 90 or
    /// 270 degrees. Only uncompressed Y-major layouts can.
    #[must_use]
    pub const fn supports_rotation_90(self) -> bool {
        matches!(self, Self::Y | Self::Yf | Self::Tile4)
    }

    /// Returns whether the display revision can scan out this tiling at all.
    #[must_use]
    pub const fn is_available(self, revision: DisplayRevision) -> bool {
        let ver = revision.display_version();
        match self {
            Self::Linear | Self::X => true,
            Self::Y => !revision.has_tile4(),
            Self::Yf | Self::YCcs | Self::YfCcs => ver <= 11,
            Self::Gen12RcCcs | Self::Gen12McCcs => ver >= 12 && !revision.has_tile4(),
            Self::Tile4 => revision.has_tile4(),
        }
    }

    /// Returns the main surface tile shape as `(width_bytes, height_rows)`,
    /// or `None` for linear surfaces.
    #[must_use]
    pub const fn tile_dims(self, cpp: u8) -> Option<(u32, u32)> {
        let width = match self.base() {
            Self::Linear => return None,
            Self::X => 512,
            Self::Yf => match cpp {
                1 => 64,
                2 | 4 => 128,
                _ => 256,
            },
            _ => 128,
        };
        Some((width, TILE_SIZE / width))
    }

    /// Returns the AUX surface tile shape as `(width_bytes, height_rows)` for
    /// CCS layouts.
    #[must_use]
    pub const fn aux_tile_dims(self) -> Option<(u32, u32)> {
        match self {
            Self::YCcs | Self::YfCcs => Some((128, 32)),
            Self::Gen12RcCcs | Self::Gen12McCcs => Some((64, 1)),
            _ => None,
        }
    }

    /// Returns the unit `PLANE_STRIDE` is expressed in, in bytes.
    #[must_use]
    pub const fn stride_unit(self, cpp: u8) -> u32 {
        match self.tile_dims(cpp) {
            Some((width, _)) => width,
            None => LINEAR_STRIDE_UNIT,
        }
    }
}
