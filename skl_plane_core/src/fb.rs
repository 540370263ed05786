// Copyright 2026 the skl_plane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Framebuffer memory layout.
//!
//! A [`Framebuffer`] records where each colour plane of a surface lives
//! relative to the buffer base. Main colour planes come first (one for packed
//! formats, luma then chroma for semi-planar formats), followed by one CCS
//! AUX plane per main plane when the tiling is compressed.

use crate::error::PlaneError;
use crate::format::{FormatInfo, FourCc};
use crate::tiling::{TILE_SIZE, Tiling};

/// Maximum number of colour planes in a framebuffer (two main plus two CCS).
pub const MAX_COLOR_PLANES: usize = 4;

/// Start offset and pitch of one colour plane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ColorPlane {
    /// Byte offset from the framebuffer base. Always a multiple of
    /// [`TILE_SIZE`].
    pub offset: u32,
    /// Bytes per row of pixels (or per row of tiles' worth of bytes).
    pub pitch: u32,
}

/// A framebuffer: format, tiling, size and colour plane layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Framebuffer {
    format: FourCc,
    info: FormatInfo,
    tiling: Tiling,
    width: u32,
    height: u32,
    planes: [ColorPlane; MAX_COLOR_PLANES],
    plane_count: u8,
}

impl Framebuffer {
    /// Creates a framebuffer with a packed layout.
    ///
    /// Each colour plane starts on the next tile boundary after the previous
    /// one, with the narrowest pitch the tiling allows.
    ///
    /// # Errors
    ///
    /// Returns [`PlaneError::UnknownFourCc`] for formats without layout
    /// information and [`PlaneError::InvalidLayout`] for empty or oversized
    /// surfaces.
    pub fn new(format: FourCc, tiling: Tiling, width: u32, height: u32) -> Result<Self, PlaneError> {
        let info = format.info().ok_or(PlaneError::UnknownFourCc(format))?;
        if width == 0 || height == 0 {
            return Err(PlaneError::InvalidLayout);
        }

        let main = usize::from(info.planes);
        let mut planes = [ColorPlane::default(); MAX_COLOR_PLANES];
        let mut rows = [0_u32; MAX_COLOR_PLANES];
        let mut next = 0_u32;

        for i in 0..main {
            let (w, h) = plane_dims(&info, width, height, i);
            let cpp = info.cpp[i];
            let unit = tiling.stride_unit(cpp);
            let pitch = align_up(checked_mul(w, u32::from(cpp))?, unit)?;
            let plane_rows = tiled_rows(tiling, cpp, h)?;
            planes[i] = ColorPlane {
                offset: next,
                pitch,
            };
            rows[i] = plane_rows;
            next = align_up(next_offset(next, pitch, plane_rows)?, TILE_SIZE)?;
        }

        if tiling.is_ccs() {
            for i in 0..main {
                let (pitch, aux_rows) = default_aux_dims(tiling, planes[i].pitch, rows[i])?;
                planes[main + i] = ColorPlane {
                    offset: next,
                    pitch,
                };
                next = align_up(next_offset(next, pitch, aux_rows)?, TILE_SIZE)?;
            }
        }

        Ok(Self {
            format,
            info,
            tiling,
            width,
            height,
            planes,
            plane_count: layout_plane_count(&info, tiling),
        })
    }

    /// Creates a framebuffer with an explicit colour plane layout.
    ///
    /// `planes` lists the main colour planes followed by the CCS planes.
    ///
    /// # Errors
    ///
    /// Returns [`PlaneError::InvalidLayout`] when the plane count does not
    /// match the format and tiling, a pitch cannot hold a row, or a plane
    /// would extend past the 32-bit address range,
    /// [`PlaneError::MisalignedPlaneOffset`] for a plane that does not start
    /// on a tile boundary, [`PlaneError::MisalignedPitch`] for a pitch that
    /// is not a multiple of the stride unit, and
    /// [`PlaneError::AuxBeforeMain`] for a CCS or chroma plane that starts
    /// before the plane it belongs to.
    pub fn with_layout(
        format: FourCc,
        tiling: Tiling,
        width: u32,
        height: u32,
        planes: &[ColorPlane],
    ) -> Result<Self, PlaneError> {
        let info = format.info().ok_or(PlaneError::UnknownFourCc(format))?;
        let count = layout_plane_count(&info, tiling);
        if width == 0 || height == 0 || planes.len() != usize::from(count) {
            return Err(PlaneError::InvalidLayout);
        }

        let main = usize::from(info.planes);
        let mut rows = [0_u32; MAX_COLOR_PLANES];
        for (i, plane) in planes.iter().enumerate() {
            if plane.offset % TILE_SIZE != 0 {
                return Err(PlaneError::MisalignedPlaneOffset {
                    color_plane: i,
                    offset: plane.offset,
                });
            }
            let unit = if i < main {
                tiling.stride_unit(info.cpp[i])
            } else {
                tiling.aux_tile_dims().map_or(TILE_SIZE, |(w, _)| w)
            };
            if plane.pitch == 0 || plane.pitch % unit != 0 {
                return Err(PlaneError::MisalignedPitch {
                    color_plane: i,
                    pitch: plane.pitch,
                });
            }
            if i < main {
                let (w, h) = plane_dims(&info, width, height, i);
                if plane.pitch < checked_mul(w, u32::from(info.cpp[i]))? {
                    return Err(PlaneError::InvalidLayout);
                }
                rows[i] = tiled_rows(tiling, info.cpp[i], h)?;
            } else {
                let (_, aux_rows) = default_aux_dims(tiling, planes[i - main].pitch, rows[i - main])?;
                rows[i] = aux_rows;
            }
            next_offset(plane.offset, plane.pitch, rows[i])?;

            // CCS planes follow their main plane, chroma follows luma.
            let owner = if i >= main { i - main } else { 0 };
            if plane.offset < planes[owner].offset {
                return Err(PlaneError::AuxBeforeMain);
            }
        }

        let mut stored = [ColorPlane::default(); MAX_COLOR_PLANES];
        stored[..planes.len()].copy_from_slice(planes);
        Ok(Self {
            format,
            info,
            tiling,
            width,
            height,
            planes: stored,
            plane_count: count,
        })
    }

    /// Returns the pixel format.
    #[must_use]
    pub const fn format(&self) -> FourCc {
        self.format
    }

    /// Returns the layout information of the pixel format.
    #[must_use]
    pub const fn info(&self) -> &FormatInfo {
        &self.info
    }

    /// Returns the tiling.
    #[must_use]
    pub const fn tiling(&self) -> Tiling {
        self.tiling
    }

    /// Returns the width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Returns the number of main (non-CCS) colour planes.
    #[must_use]
    pub const fn main_planes(&self) -> usize {
        self.info.planes as usize
    }

    /// Returns all colour planes, main planes first.
    #[must_use]
    pub fn planes(&self) -> &[ColorPlane] {
        &self.planes[..usize::from(self.plane_count)]
    }

    /// Returns one colour plane.
    ///
    /// # Panics
    ///
    /// Panics if `color_plane` is not a plane of this framebuffer.
    #[must_use]
    pub fn plane(&self, color_plane: usize) -> ColorPlane {
        self.planes()[color_plane]
    }

    /// Returns the size in pixels of a main colour plane, accounting for
    /// chroma subsampling.
    #[must_use]
    pub fn plane_size(&self, color_plane: usize) -> (u32, u32) {
        plane_dims(&self.info, self.width, self.height, color_plane)
    }

    /// Returns the pitch of a colour plane in `PLANE_STRIDE` units: 64-byte
    /// blocks for linear surfaces, tile widths otherwise. CCS planes count in
    /// AUX tile widths.
    ///
    /// # Panics
    ///
    /// Panics if `color_plane` is not a plane of this framebuffer.
    #[must_use]
    pub fn stride_units(&self, color_plane: usize) -> u32 {
        let pitch = self.plane(color_plane).pitch;
        if color_plane < self.main_planes() {
            pitch / self.tiling.stride_unit(self.info.cpp[color_plane])
        } else {
            pitch / self.tiling.aux_tile_dims().map_or(TILE_SIZE, |(w, _)| w)
        }
    }
}

/// Returns the pitch of the CCS plane that belongs to a main plane of
/// `main_pitch` bytes, or `None` if `tiling` has no CCS plane.
#[must_use]
pub const fn ccs_pitch(tiling: Tiling, main_pitch: u32) -> Option<u32> {
    match tiling {
        // One 64-byte line covers four main tiles of one tile row.
        Tiling::Gen12RcCcs | Tiling::Gen12McCcs => Some(main_pitch.div_ceil(512) * 64),
        // One byte covers 32 bytes by 16 rows of the main surface.
        Tiling::YCcs | Tiling::YfCcs => Some(main_pitch.div_ceil(32).next_multiple_of(128)),
        _ => None,
    }
}

fn layout_plane_count(info: &FormatInfo, tiling: Tiling) -> u8 {
    if tiling.is_ccs() {
        info.planes * 2
    } else {
        info.planes
    }
}

fn plane_dims(info: &FormatInfo, width: u32, height: u32, color_plane: usize) -> (u32, u32) {
    if color_plane == 0 {
        (width, height)
    } else {
        (
            width.div_ceil(u32::from(info.hsub)),
            height.div_ceil(u32::from(info.vsub)),
        )
    }
}

/// Rows a main colour plane occupies, padded to whole tiles.
fn tiled_rows(tiling: Tiling, cpp: u8, height: u32) -> Result<u32, PlaneError> {
    match tiling.tile_dims(cpp) {
        Some((_, tile_h)) => align_up(height, tile_h),
        None => Ok(height),
    }
}

/// AUX pitch and row count for the CCS plane of a main plane.
fn default_aux_dims(tiling: Tiling, main_pitch: u32, main_rows: u32) -> Result<(u32, u32), PlaneError> {
    let pitch = ccs_pitch(tiling, main_pitch).ok_or(PlaneError::InvalidLayout)?;
    let rows = if tiling.is_gen12_ccs() {
        main_rows.div_ceil(32)
    } else {
        align_up(main_rows.div_ceil(16), 32)?
    };
    Ok((pitch, rows))
}

fn next_offset(offset: u32, pitch: u32, rows: u32) -> Result<u32, PlaneError> {
    checked_mul(pitch, rows)?
        .checked_add(offset)
        .ok_or(PlaneError::InvalidLayout)
}

fn checked_mul(a: u32, b: u32) -> Result<u32, PlaneError> {
    a.checked_mul(b).ok_or(PlaneError::InvalidLayout)
}

fn align_up(value: u32, align: u32) -> Result<u32, PlaneError> {
    value
        .checked_next_multiple_of(align)
        .ok_or(PlaneError::InvalidLayout)
}
