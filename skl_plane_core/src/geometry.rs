// Copyright 2026 the skl_plane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Surface offset and AUX distance computation.
//!
//! The plane reads its surface from `PLANE_SURF` (a tile-aligned address)
//! plus `PLANE_OFFSET` (an x/y position inside the surface). The geometry
//! engine splits the source origin of a plane state into those two parts:
//!
//! ```text
//!   source origin (x, y) in framebuffer pixels
//!        │
//!        ├─ chroma subsampling (colour plane > 0)
//!        ├─ rotation into the 90/270 view (tile shape swapped)
//!        ▼
//!   tile-aligned byte offset + (x, y) residual
//!        │
//!        ├─ walk back so the AUX surface does not precede the main one
//!        ├─ walk back while an X-tiled row would exceed the stride
//!        ▼
//!   SurfaceOffset { x, y, offset }
//! ```
//!
//! Offsets are relative to the framebuffer base and always a multiple of
//! [`TILE_SIZE`]. For 90/270 rotation the offset addresses the rotated view
//! of the surface and the residual is expressed in that view.

use crate::config::DisplayRevision;
use crate::error::PlaneError;
use crate::fb::Framebuffer;
use crate::regs;
use crate::state::PlaneState;
use crate::tiling::{TILE_SIZE, Tiling};

/// Plane rotation, counter-clockwise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Rotation {
    /// No rotation.
    #[default]
    Rotate0,
    /// 90 degrees counter-clockwise.
    Rotate90,
    /// 180 degrees.
    Rotate180,
    /// 270 degrees counter-clockwise.
    Rotate270,
}

impl Rotation {
    /// Returns whether the rotation swaps the surface axes.
    #[inline]
    #[must_use]
    pub const fn is_90_or_270(self) -> bool {
        matches!(self, Self::Rotate90 | Self::Rotate270)
    }
}

/// Where a surface's top-left sample begins: a tile-aligned byte offset and
/// the residual position inside the surface at that offset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SurfaceOffset {
    /// Residual x, in pixels.
    pub x: u32,
    /// Residual y, in rows.
    pub y: u32,
    /// Byte offset from the framebuffer base, a multiple of [`TILE_SIZE`].
    pub offset: u32,
}

/// Computes surface offsets and AUX distances for one display revision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceGeometry {
    revision: DisplayRevision,
}

impl SurfaceGeometry {
    /// Creates a geometry engine for the given revision.
    #[must_use]
    pub const fn new(revision: DisplayRevision) -> Self {
        Self { revision }
    }

    /// Returns the revision this engine computes for.
    #[must_use]
    pub const fn revision(&self) -> DisplayRevision {
        self.revision
    }

    /// Returns the colour plane holding the AUX surface of `color_plane`.
    ///
    /// CCS layouts map main plane `i` to CCS plane `main_planes + i`. Before
    /// linked planar scan-out, the chroma plane of a semi-planar format is
    /// the AUX surface of the luma plane.
    #[must_use]
    pub fn aux_plane(&self, fb: &Framebuffer, color_plane: usize) -> Option<usize> {
        if fb.tiling().is_ccs() {
            Some(fb.main_planes() + color_plane)
        } else if !self.revision.has_linked_planar()
            && fb.info().is_semiplanar()
            && color_plane == 0
        {
            Some(1)
        } else {
            None
        }
    }

    /// Computes the surface offset of a main colour plane of `state`.
    ///
    /// # Errors
    ///
    /// - [`PlaneError::ColorPlaneOutOfRange`] if `color_plane` is not a main
    ///   plane of the framebuffer format.
    /// - [`PlaneError::SourceOutOfBounds`] if the source rectangle is empty or
    ///   leaves the framebuffer.
    /// - [`PlaneError::UnsupportedRotation`] for 90/270 rotation of a layout
    ///   that is not Y-major.
    /// - [`PlaneError::AuxBeforeMain`] if the AUX plane starts before the main
    ///   plane.
    /// - [`PlaneError::NoSuitableOffset`] if no X-tiled offset keeps the row
    ///   within the stride.
    /// - [`PlaneError::InvalidLayout`] if the offset does not fit in 32 bits.
    pub fn main_surface_offset(
        &self,
        state: &PlaneState,
        color_plane: usize,
    ) -> Result<SurfaceOffset, PlaneError> {
        let fb = &state.fb;
        check_color_plane(fb, color_plane)?;
        let (mut x, mut y, mut w, _) = source_px(state)?;
        if color_plane > 0 {
            let info = fb.info();
            x /= u32::from(info.hsub);
            y /= u32::from(info.vsub);
            w = w.div_ceil(u32::from(info.hsub));
        }

        let plane = fb.plane(color_plane);
        let walk = TileWalk::for_state(state, color_plane)?;
        if state.rotation.is_90_or_270() {
            let (plane_w, _) = fb.plane_size(color_plane);
            (x, y) = (y, plane_w - (x + w));
        }
        let mut offset = walk.aligned_offset(&mut x, &mut y)?;

        if let Some(aux) = self.aux_plane(fb, color_plane) {
            let aux_start = fb
                .plane(aux)
                .offset
                .checked_sub(plane.offset)
                .ok_or(PlaneError::AuxBeforeMain)?;
            if offset > aux_start {
                let target = aux_start & !(TILE_SIZE - 1);
                walk.adjust(&mut x, &mut y, offset, target)?;
                offset = target;
            }
        }

        if fb.tiling() == Tiling::X {
            let cpp = u32::from(fb.info().cpp[color_plane]);
            while checked_mul(checked_add(x, w)?, cpp)? > plane.pitch {
                if offset == 0 {
                    return Err(PlaneError::NoSuitableOffset);
                }
                walk.adjust(&mut x, &mut y, offset, offset - TILE_SIZE)?;
                offset -= TILE_SIZE;
            }
        }

        Ok(SurfaceOffset {
            x,
            y,
            offset: checked_add(plane.offset, offset)?,
        })
    }

    /// Computes the `PLANE_AUX_DIST` value for a main colour plane of
    /// `state`: the byte distance from the colour plane to its AUX surface,
    /// with the AUX stride in tiles (minus one) in the low bits before display
    /// version 12. Returns 0 when the colour plane has no AUX surface.
    ///
    /// The result depends only on the framebuffer layout, never on the
    /// source position.
    ///
    /// # Errors
    ///
    /// [`PlaneError::ColorPlaneOutOfRange`] if `color_plane` is not a main
    /// plane, and [`PlaneError::AuxBeforeMain`] if the AUX plane starts before
    /// the main plane.
    pub fn aux_distance(&self, state: &PlaneState, color_plane: usize) -> Result<u32, PlaneError> {
        let fb = &state.fb;
        check_color_plane(fb, color_plane)?;
        let Some(aux) = self.aux_plane(fb, color_plane) else {
            return Ok(0);
        };
        let mut dist = fb
            .plane(aux)
            .offset
            .checked_sub(fb.plane(color_plane).offset)
            .ok_or(PlaneError::AuxBeforeMain)?;
        if self.revision.display_version() < 12 {
            dist |= fb.stride_units(aux).saturating_sub(1) & regs::aux_dist::STRIDE_MASK;
        }
        Ok(dist)
    }
}

fn check_color_plane(fb: &Framebuffer, color_plane: usize) -> Result<(), PlaneError> {
    let planes = fb.main_planes();
    if color_plane < planes {
        Ok(())
    } else {
        Err(PlaneError::ColorPlaneOutOfRange {
            color_plane,
            planes,
        })
    }
}

fn checked_add(a: u32, b: u32) -> Result<u32, PlaneError> {
    a.checked_add(b).ok_or(PlaneError::InvalidLayout)
}

fn checked_mul(a: u32, b: u32) -> Result<u32, PlaneError> {
    a.checked_mul(b).ok_or(PlaneError::InvalidLayout)
}

/// Returns the integer source rectangle `(x, y, w, h)` in framebuffer
/// pixels. Fractional coordinates are truncated.
pub(crate) fn source_px(state: &PlaneState) -> Result<(u32, u32, u32, u32), PlaneError> {
    let src = state.src;
    let fb_w = f64::from(state.fb.width());
    let fb_h = f64::from(state.fb.height());
    let inside = src.x0 >= 0.0
        && src.y0 >= 0.0
        && src.x1 <= fb_w
        && src.y1 <= fb_h
        && src.x1 - src.x0 >= 1.0
        && src.y1 - src.y0 >= 1.0;
    if !inside {
        return Err(PlaneError::SourceOutOfBounds);
    }
    #[expect(
        clippy::cast_possible_truncation,
        reason = "coordinates were checked to lie within the u32 framebuffer size"
    )]
    let (x0, y0, x1, y1) = (src.x0 as u32, src.y0 as u32, src.x1 as u32, src.y1 as u32);
    Ok((x0, y0, x1 - x0, y1 - y0))
}

/// Tile addressing for one colour plane, in the (possibly rotated) view the
/// hardware scans.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TileWalk {
    Linear {
        pitch: u32,
        cpp: u32,
    },
    Tiled {
        /// Tile width in pixels.
        tile_w: u32,
        /// Tile height in rows.
        tile_h: u32,
        /// Row length in tiles.
        pitch_tiles: u32,
    },
}

impl TileWalk {
    pub(crate) fn for_state(state: &PlaneState, color_plane: usize) -> Result<Self, PlaneError> {
        let fb = &state.fb;
        let cpp = fb.info().cpp[color_plane];
        let tiling = fb.tiling();
        let pitch = fb.plane(color_plane).pitch;
        if state.rotation.is_90_or_270() {
            if !tiling.supports_rotation_90() {
                return Err(PlaneError::UnsupportedRotation);
            }
            let (tile_bytes, tile_rows) = tiling
                .tile_dims(cpp)
                .ok_or(PlaneError::UnsupportedRotation)?;
            let (_, plane_h) = fb.plane_size(color_plane);
            return Ok(Self::Tiled {
                tile_w: tile_rows,
                tile_h: tile_bytes / u32::from(cpp),
                pitch_tiles: plane_h.div_ceil(tile_rows),
            });
        }
        Ok(match tiling.tile_dims(cpp) {
            Some((tile_bytes, tile_rows)) => Self::Tiled {
                tile_w: tile_bytes / u32::from(cpp),
                tile_h: tile_rows,
                pitch_tiles: pitch / tile_bytes,
            },
            None => Self::Linear {
                pitch,
                cpp: u32::from(cpp),
            },
        })
    }

    /// Splits `(x, y)` into a tile-aligned offset, leaving the residual in
    /// `x` and `y`.
    pub(crate) fn aligned_offset(&self, x: &mut u32, y: &mut u32) -> Result<u32, PlaneError> {
        match *self {
            Self::Tiled {
                tile_w,
                tile_h,
                pitch_tiles,
            } => {
                let tile_rows = *y / tile_h;
                *y %= tile_h;
                let tiles = *x / tile_w;
                *x %= tile_w;
                checked_mul(checked_add(checked_mul(tile_rows, pitch_tiles)?, tiles)?, TILE_SIZE)
            }
            Self::Linear { pitch, cpp } => {
                let byte = checked_add(checked_mul(*y, pitch)?, checked_mul(*x, cpp)?)?;
                let offset = byte & !(TILE_SIZE - 1);
                let rem = byte - offset;
                *y = rem / pitch;
                *x = (rem % pitch) / cpp;
                Ok(offset)
            }
        }
    }

    /// Moves the offset from `old` back to `new`, folding the difference
    /// into the residual.
    pub(crate) fn adjust(
        &self,
        x: &mut u32,
        y: &mut u32,
        old: u32,
        new: u32,
    ) -> Result<(), PlaneError> {
        debug_assert!(new <= old, "offset adjustment only walks backwards");
        match *self {
            Self::Tiled {
                tile_w,
                tile_h,
                pitch_tiles,
            } => {
                let tiles = (old - new) / TILE_SIZE;
                let pitch_px = checked_mul(pitch_tiles, tile_w)?;
                *y = checked_add(*y, checked_mul(tiles / pitch_tiles, tile_h)?)?;
                *x = checked_add(*x, tiles % pitch_tiles * tile_w)?;
                // Keep x within one row of tiles.
                *y = checked_add(*y, checked_mul(*x / pitch_px, tile_h)?)?;
                *x %= pitch_px;
            }
            Self::Linear { pitch, cpp } => {
                let byte = checked_add(
                    old - new,
                    checked_add(checked_mul(*y, pitch)?, checked_mul(*x, cpp)?)?,
                )?;
                *y = byte / pitch;
                *x = (byte % pitch) / cpp;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;

    use super::*;
    use crate::fb::ColorPlane;
    use crate::format::FourCc;
    use crate::id::{PipeId, PlaneId};

    fn state(fb: Framebuffer, src: Rect, rotation: Rotation) -> PlaneState {
        let mut state = PlaneState::new(PipeId::A, PlaneId::Primary, fb);
        state.src = src;
        state.rotation = rotation;
        state
    }

    fn fb(format: FourCc, tiling: Tiling, w: u32, h: u32) -> Framebuffer {
        Framebuffer::new(format, tiling, w, h).unwrap()
    }

    #[test]
    fn y_tiled_offset_splits_tiles() {
        let geom = SurfaceGeometry::new(DisplayRevision::Skylake);
        // 1024 px * 4 B = 4096 B pitch = 32 Y tiles per row; a tile is 32 px x 32 rows.
        let s = state(
            fb(FourCc::XRGB8888, Tiling::Y, 1024, 768),
            Rect::new(100.0, 70.0, 300.0, 170.0),
            Rotation::Rotate0,
        );
        let off = geom.main_surface_offset(&s, 0).unwrap();
        // tile row 2, tile column 3.
        assert_eq!(
            off,
            SurfaceOffset {
                x: 4,
                y: 6,
                offset: (2 * 32 + 3) * TILE_SIZE
            }
        );
    }

    #[test]
    fn linear_offset_rounds_down_to_tile() {
        let geom = SurfaceGeometry::new(DisplayRevision::Icelake);
        // Pitch 1024 B: four rows per 4 KiB.
        let s = state(
            fb(FourCc::XRGB8888, Tiling::Linear, 256, 64),
            Rect::new(10.0, 5.0, 20.0, 15.0),
            Rotation::Rotate0,
        );
        let off = geom.main_surface_offset(&s, 0).unwrap();
        assert_eq!(off, SurfaceOffset { x: 10, y: 1, offset: 4096 });
    }

    #[test]
    fn offset_is_tile_aligned_for_every_layout() {
        let geom = SurfaceGeometry::new(DisplayRevision::Skylake);
        let layouts = [
            (FourCc::XRGB8888, Tiling::Linear),
            (FourCc::XRGB8888, Tiling::X),
            (FourCc::XRGB8888, Tiling::Y),
            (FourCc::XRGB8888, Tiling::Yf),
            (FourCc::XRGB8888, Tiling::YCcs),
            (FourCc::XRGB16161616F, Tiling::Yf),
            (FourCc::RGB565, Tiling::Y),
            (FourCc::NV12, Tiling::Y),
        ];
        let rotations = [
            Rotation::Rotate0,
            Rotation::Rotate90,
            Rotation::Rotate180,
            Rotation::Rotate270,
        ];
        let sources = [
            Rect::new(0.0, 0.0, 64.0, 64.0),
            Rect::new(2.0, 2.0, 100.0, 50.0),
            Rect::new(130.0, 66.0, 500.0, 300.0),
            Rect::new(510.0, 382.0, 512.0, 384.0),
        ];
        for (format, tiling) in layouts {
            let fb = fb(format, tiling, 512, 384);
            for rotation in rotations {
                for src in sources {
                    let s = state(fb, src, rotation);
                    for cp in 0..fb.main_planes() {
                        let Ok(off) = geom.main_surface_offset(&s, cp) else {
                            assert!(rotation.is_90_or_270() && !tiling.supports_rotation_90());
                            continue;
                        };
                        let rel = off.offset - fb.plane(cp).offset;
                        assert_eq!(rel % TILE_SIZE, 0, "{format:?} {tiling:?} {rotation:?}");
                        match TileWalk::for_state(&s, cp).unwrap() {
                            TileWalk::Tiled { tile_w, tile_h, .. } => {
                                assert!(off.x < tile_w, "{tiling:?} {rotation:?} {off:?}");
                                assert!(off.y < tile_h, "{tiling:?} {rotation:?} {off:?}");
                            }
                            TileWalk::Linear { pitch, cpp } => {
                                assert!(off.y * pitch + off.x * cpp < TILE_SIZE);
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn rotation_is_folded_in_before_alignment() {
        let geom = SurfaceGeometry::new(DisplayRevision::Icelake);
        // 256 x 128 XRGB, Y tiled: tiles are 32 px x 32 rows.
        let fb = fb(FourCc::XRGB8888, Tiling::Y, 256, 128);
        let s = state(fb, Rect::new(64.0, 40.0, 128.0, 72.0), Rotation::Rotate90);
        let off = geom.main_surface_offset(&s, 0).unwrap();
        // Rotated origin: x' = 40, y' = 256 - 128 = 128. Rotated tiles are
        // 32 px wide and 32 rows tall, four tile columns per row (128 / 32).
        assert_eq!(
            off,
            SurfaceOffset {
                x: 8,
                y: 0,
                offset: (4 * 4 + 1) * TILE_SIZE
            }
        );
    }

    #[test]
    fn rotation_rejected_for_linear_x_and_ccs() {
        let geom = SurfaceGeometry::new(DisplayRevision::Skylake);
        for tiling in [Tiling::Linear, Tiling::X, Tiling::YCcs] {
            let s = state(
                fb(FourCc::XRGB8888, tiling, 128, 128),
                Rect::new(0.0, 0.0, 64.0, 64.0),
                Rotation::Rotate270,
            );
            assert_eq!(
                geom.main_surface_offset(&s, 0),
                Err(PlaneError::UnsupportedRotation)
            );
        }
    }

    #[test]
    fn color_plane_out_of_range_is_reported() {
        let geom = SurfaceGeometry::new(DisplayRevision::Skylake);
        let s = state(
            fb(FourCc::XRGB8888, Tiling::YCcs, 128, 128),
            Rect::new(0.0, 0.0, 64.0, 64.0),
            Rotation::Rotate0,
        );
        let err = PlaneError::ColorPlaneOutOfRange {
            color_plane: 1,
            planes: 1,
        };
        assert_eq!(geom.main_surface_offset(&s, 1), Err(err));
        assert_eq!(geom.aux_distance(&s, 1), Err(err));
    }

    #[test]
    fn chroma_plane_is_subsampled() {
        let geom = SurfaceGeometry::new(DisplayRevision::Icelake);
        let fb = fb(FourCc::NV12, Tiling::Linear, 256, 64);
        let s = state(fb, Rect::new(64.0, 32.0, 128.0, 64.0), Rotation::Rotate0);
        let off = geom.main_surface_offset(&s, 1).unwrap();
        // UV row 16 at pitch 256 is byte 4096; column 32 at 2 bytes is 64.
        assert_eq!(
            off,
            SurfaceOffset {
                x: 32,
                y: 0,
                offset: fb.plane(1).offset + 4096
            }
        );
    }

    #[test]
    fn source_outside_framebuffer_is_rejected() {
        let geom = SurfaceGeometry::new(DisplayRevision::Skylake);
        let s = state(
            fb(FourCc::XRGB8888, Tiling::Linear, 64, 64),
            Rect::new(32.0, 0.0, 96.0, 64.0),
            Rotation::Rotate0,
        );
        assert_eq!(
            geom.main_surface_offset(&s, 0),
            Err(PlaneError::SourceOutOfBounds)
        );
    }

    #[test]
    fn main_offset_walks_back_to_aux() {
        let geom = SurfaceGeometry::new(DisplayRevision::Skylake);
        let fb = Framebuffer::with_layout(
            FourCc::XRGB8888,
            Tiling::YCcs,
            128,
            256,
            &[
                ColorPlane { offset: 0, pitch: 512 },
                ColorPlane {
                    offset: 2 * TILE_SIZE,
                    pitch: 128,
                },
            ],
        )
        .unwrap();
        // Y tiles are 32 px x 32 rows, 4 per row. Row 1, column 1 is tile 5.
        let s = state(fb, Rect::new(40.0, 40.0, 100.0, 100.0), Rotation::Rotate0);
        let off = geom.main_surface_offset(&s, 0).unwrap();
        // Walked back three tiles to tile 2. The residual x runs past the end
        // of tile row 0 and wraps into row 1, column 1.
        assert_eq!(off.offset, 2 * TILE_SIZE);
        assert_eq!((off.x, off.y), (104, 8));
    }

    #[test]
    fn aux_distance_depends_only_on_layout() {
        let geom = SurfaceGeometry::new(DisplayRevision::Skylake);
        let fb = fb(FourCc::XRGB8888, Tiling::YCcs, 1024, 768);
        let a = state(fb, Rect::new(0.0, 0.0, 512.0, 384.0), Rotation::Rotate0);
        let b = state(fb, Rect::new(300.0, 200.0, 812.0, 584.0), Rotation::Rotate0);
        let dist = geom.aux_distance(&a, 0).unwrap();
        assert_eq!(dist, geom.aux_distance(&b, 0).unwrap());
        assert_eq!(dist & !regs::aux_dist::STRIDE_MASK, fb.plane(1).offset);
        // AUX pitch is one 128 B tile: stride minus one is 0.
        assert_eq!(dist & regs::aux_dist::STRIDE_MASK, 0);
    }

    #[test]
    fn gen12_aux_distance_has_no_stride() {
        let geom = SurfaceGeometry::new(DisplayRevision::Tigerlake);
        let fb = fb(FourCc::XRGB8888, Tiling::Gen12RcCcs, 4096, 64);
        let s = state(fb, Rect::new(0.0, 0.0, 64.0, 64.0), Rotation::Rotate0);
        assert_eq!(geom.aux_distance(&s, 0), Ok(fb.plane(1).offset));
    }

    #[test]
    fn pre_icl_nv12_uses_chroma_as_aux() {
        let skl = SurfaceGeometry::new(DisplayRevision::Kabylake);
        let icl = SurfaceGeometry::new(DisplayRevision::Icelake);
        let fb = fb(FourCc::NV12, Tiling::Y, 256, 64);
        let s = state(fb, Rect::new(0.0, 0.0, 256.0, 64.0), Rotation::Rotate0);
        assert_eq!(skl.aux_plane(&fb, 0), Some(1));
        assert_eq!(skl.aux_plane(&fb, 1), None);
        assert_eq!(icl.aux_plane(&fb, 0), None);
        // UV pitch 256 B is two Y tiles wide.
        assert_eq!(skl.aux_distance(&s, 0), Ok(fb.plane(1).offset | 1));
        assert_eq!(icl.aux_distance(&s, 0), Ok(0));
    }

    #[test]
    fn offset_overflow_is_reported() {
        let walk = TileWalk::Tiled {
            tile_w: 128,
            tile_h: 8,
            pitch_tiles: 0xfff,
        };
        let (mut x, mut y) = (0, 8000);
        assert_eq!(
            walk.aligned_offset(&mut x, &mut y),
            Err(PlaneError::InvalidLayout)
        );
        let walk = TileWalk::Linear {
            pitch: 0x10_0000,
            cpp: 4,
        };
        let (mut x, mut y) = (0, 0x1000);
        assert_eq!(
            walk.aligned_offset(&mut x, &mut y),
            Err(PlaneError::InvalidLayout)
        );
    }

}
