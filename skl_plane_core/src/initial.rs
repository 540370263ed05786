// Copyright 2026 the skl_plane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Takeover of the configuration the firmware left in the plane registers.
//!
//! At attach, each plane may still be scanning out a boot framebuffer. The
//! takeover runs once per plane:
//!
//! ```text
//!   Uncaptured ──capture──▶ Captured ──fixup──▶ Validated
//!                                         └───▶ Rejected
//! ```
//!
//! Capture only decodes registers. Fixup rebuilds a framebuffer and a plane
//! state from the snapshot, requires that the geometry engine reproduces the
//! programmed offsets exactly, and commits the state if it passes the regular
//! check. Anything the engine cannot reproduce is rejected, never patched.

use core::fmt;

use kurbo::Rect;

use crate::display::Display;
use crate::error::PlaneError;
use crate::fb::{ColorPlane, Framebuffer, ccs_pitch};
use crate::format::{FourCc, to_fourcc};
use crate::geometry::{Rotation, SurfaceOffset};
use crate::id::{PipeId, PlaneId, StateId};
use crate::plane::Plane;
use crate::regs::{PlaneReg, aux_dist, color_ctl, ctl, stride, surf, xy};
use crate::state::PlaneState;
use crate::tiling::{TILE_SIZE, Tiling};
use crate::trace::{FixupEvent, InitialConfigEvent};

/// Progress of the firmware configuration takeover of one plane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum InitialConfigStatus {
    /// Registers not read yet, or the plane was disabled.
    #[default]
    Uncaptured,
    /// A snapshot was taken and awaits fixup.
    Captured,
    /// The snapshot was reproduced and committed.
    Validated,
    /// The snapshot could not be reproduced.
    Rejected,
}

/// Read access to the universal plane registers.
pub trait PlaneRegisters {
    /// Reads one register of a plane.
    fn read(&self, pipe: PipeId, plane: PlaneId, reg: PlaneReg) -> u32;
}

/// Decoded snapshot of the firmware plane programming.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InitialPlaneConfig {
    /// `PLANE_CTL` format field, masked but not shifted.
    pub format: u32,
    /// RGB channel order bit.
    pub rgb_order: bool,
    /// Alpha enabled.
    pub alpha: bool,
    /// Surface tiling, with compression.
    pub tiling: Tiling,
    /// Rotation, counter-clockwise.
    pub rotation: Rotation,
    /// Horizontal mirroring.
    pub reflect_x: bool,
    /// Surface base address.
    pub base: u32,
    /// Source x within the surface.
    pub x: u32,
    /// Source y within the surface.
    pub y: u32,
    /// Source width.
    pub width: u32,
    /// Source height.
    pub height: u32,
    /// Main surface stride in `PLANE_STRIDE` units.
    pub stride: u32,
    /// Destination x on the pipe.
    pub pos_x: u32,
    /// Destination y on the pipe.
    pub pos_y: u32,
    /// Raw `PLANE_AUX_DIST`.
    pub aux_dist: u32,
}

/// Why a firmware configuration was not taken over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FixupRejection {
    /// The format cannot be scanned out by this plane.
    Format(PlaneError),
    /// Semi-planar scan-out needs a companion plane the firmware state does
    /// not describe.
    Semiplanar,
    /// The surface base is not tile aligned.
    UnalignedBase(u32),
    /// The framebuffer described by the registers is inconsistent.
    Layout(PlaneError),
    /// The geometry engine places the surface differently.
    OffsetMismatch {
        /// Offset the registers describe.
        expected: SurfaceOffset,
        /// Offset the geometry engine computes.
        actual: SurfaceOffset,
    },
    /// The geometry engine computes a different AUX distance.
    AuxMismatch {
        /// `PLANE_AUX_DIST` as programmed.
        expected: u32,
        /// Value the geometry engine computes.
        actual: u32,
    },
    /// The state failed the regular check.
    Check(PlaneError),
    /// The state could not be committed.
    Commit(PlaneError),
}

impl fmt::Display for FixupRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Format(err) => write!(f, "format: {err}"),
            Self::Semiplanar => write!(f, "semi-planar firmware configuration"),
            Self::UnalignedBase(base) => write!(f, "surface base {base:#x} is not aligned"),
            Self::Layout(err) => write!(f, "layout: {err}"),
            Self::OffsetMismatch { expected, actual } => write!(
                f,
                "offset mismatch: programmed {:#x}+({},{}), computed {:#x}+({},{})",
                expected.offset, expected.x, expected.y, actual.offset, actual.x, actual.y
            ),
            Self::AuxMismatch { expected, actual } => write!(
                f,
                "aux distance mismatch: programmed {expected:#x}, computed {actual:#x}"
            ),
            Self::Check(err) => write!(f, "check: {err}"),
            Self::Commit(err) => write!(f, "commit: {err}"),
        }
    }
}

impl core::error::Error for FixupRejection {}

impl Display<'_> {
    /// Reads the firmware programming of `plane`.
    ///
    /// Returns `None`, leaving the plane
    /// [`Uncaptured`](InitialConfigStatus::Uncaptured), when the plane is
    /// disabled, the tiling field holds a reserved value, decompression is
    /// enabled on a tiling without a compressed layout, or the plane is
    /// rotated by 90 or 270 degrees.
    ///
    /// # Panics
    ///
    /// Panics if the plane has already been captured.
    pub fn capture_initial_config<R: PlaneRegisters + ?Sized>(
        &mut self,
        plane: &mut Plane,
        hw: &R,
    ) -> Option<InitialPlaneConfig> {
        assert!(
            plane.initial == InitialConfigStatus::Uncaptured,
            "initial config of {:?} already captured ({:?})",
            plane.key(),
            plane.initial
        );
        let (pipe, id) = plane.key();
        let revision = self.config().revision;
        let ver = revision.display_version();
        let read = |reg| hw.read(pipe, id, reg);

        let plane_ctl = read(PlaneReg::Ctl);
        if plane_ctl & ctl::ENABLE == 0 {
            return None;
        }

        let format_mask = if ver >= 11 {
            ctl::FORMAT_MASK_ICL
        } else {
            ctl::FORMAT_MASK_SKL
        };
        let alpha = if ver >= 10 {
            read(PlaneReg::ColorCtl) & color_ctl::ALPHA_MASK != 0
        } else {
            plane_ctl & ctl::ALPHA_MASK != 0
        };

        let render_compressed = plane_ctl & ctl::RENDER_DECOMPRESSION_ENABLE != 0;
        let media_compressed = ver >= 12 && plane_ctl & ctl::MEDIA_DECOMPRESSION_ENABLE != 0;
        let tiling = match plane_ctl & ctl::TILED_MASK {
            ctl::TILED_LINEAR => Tiling::Linear,
            ctl::TILED_X => Tiling::X,
            ctl::TILED_Y if render_compressed && ver >= 12 => Tiling::Gen12RcCcs,
            ctl::TILED_Y if render_compressed => Tiling::YCcs,
            ctl::TILED_Y if media_compressed => Tiling::Gen12McCcs,
            ctl::TILED_Y => Tiling::Y,
            ctl::TILED_YF if revision.has_tile4() => Tiling::Tile4,
            ctl::TILED_YF if render_compressed => Tiling::YfCcs,
            ctl::TILED_YF => Tiling::Yf,
            _ => return None,
        };
        if (render_compressed || media_compressed) && !tiling.is_ccs() {
            return None;
        }

        // Hardware rotates clockwise.
        let rotation = match plane_ctl & ctl::ROTATE_MASK {
            ctl::ROTATE_0 => Rotation::Rotate0,
            ctl::ROTATE_90 => Rotation::Rotate270,
            ctl::ROTATE_180 => Rotation::Rotate180,
            _ => Rotation::Rotate90,
        };
        if rotation.is_90_or_270() {
            return None;
        }

        let offset = read(PlaneReg::Offset);
        let size = read(PlaneReg::Size);
        let pos = read(PlaneReg::Pos);
        let config = InitialPlaneConfig {
            format: plane_ctl & format_mask,
            rgb_order: plane_ctl & ctl::ORDER_RGB != 0,
            alpha,
            tiling,
            rotation,
            reflect_x: ver >= 11 && plane_ctl & ctl::FLIP_HORIZONTAL != 0,
            base: read(PlaneReg::Surf) & surf::ADDR_MASK,
            x: offset & xy::X_MASK,
            y: (offset & xy::Y_MASK) >> xy::Y_SHIFT,
            width: (size & xy::X_MASK) + 1,
            height: ((size & xy::Y_MASK) >> xy::Y_SHIFT) + 1,
            stride: read(PlaneReg::Stride) & stride::MASK,
            pos_x: pos & xy::X_MASK,
            pos_y: (pos & xy::Y_MASK) >> xy::Y_SHIFT,
            aux_dist: read(PlaneReg::AuxDist),
        };

        plane.initial = InitialConfigStatus::Captured;
        self.tracer.initial_config(&InitialConfigEvent {
            pipe,
            plane: id,
            config,
        });
        Some(config)
    }

    /// Takes over a captured firmware configuration.
    ///
    /// Returns `true` and commits a state reproducing `config` when the
    /// geometry engine computes exactly the programmed offset and AUX
    /// distance and the state passes [`check`](Self::check). Returns `false`
    /// otherwise; no state is left behind. The reason is reported to the
    /// tracer.
    ///
    /// # Panics
    ///
    /// Panics if the plane is not [`Captured`](InitialConfigStatus::Captured).
    pub fn fixup_initial_config(&mut self, plane: &mut Plane, config: &InitialPlaneConfig) -> bool {
        assert!(
            plane.initial == InitialConfigStatus::Captured,
            "fixup of {:?} without a captured config ({:?})",
            plane.key(),
            plane.initial
        );
        let result = self.take_over(plane, config);
        plane.initial = if result.is_ok() {
            InitialConfigStatus::Validated
        } else {
            InitialConfigStatus::Rejected
        };
        let (pipe, id) = plane.key();
        self.tracer.fixup(&FixupEvent {
            pipe,
            plane: id,
            result,
        });
        result.is_ok()
    }

    fn take_over(
        &mut self,
        plane: &mut Plane,
        config: &InitialPlaneConfig,
    ) -> Result<StateId, FixupRejection> {
        let revision = self.config().revision;
        let format = to_fourcc(config.format, config.rgb_order, config.alpha)
            .map_err(FixupRejection::Format)?;
        plane
            .caps()
            .check_format(format, config.tiling)
            .map_err(FixupRejection::Format)?;
        if format.is_semiplanar() && revision.has_linked_planar() {
            return Err(FixupRejection::Semiplanar);
        }
        if config.base % TILE_SIZE != 0 {
            return Err(FixupRejection::UnalignedBase(config.base));
        }

        let fb = Self::rebuild_fb(format, config).map_err(FixupRejection::Layout)?;
        let mut state = PlaneState::new(plane.pipe(), plane.id(), fb);
        let (x, y) = (f64::from(config.x), f64::from(config.y));
        let (w, h) = (f64::from(config.width), f64::from(config.height));
        let (pos_x, pos_y) = (f64::from(config.pos_x), f64::from(config.pos_y));
        state.src = Rect::new(x, y, x + w, y + h);
        state.dst = Rect::new(pos_x, pos_y, pos_x + w, pos_y + h);
        state.rotation = config.rotation;
        state.reflect_x = config.reflect_x;

        let id = self.store.create(state);
        match self.reproduce(plane, id, config) {
            Ok(()) => Ok(id),
            Err(err) => {
                self.store.discard(id);
                Err(err)
            }
        }
    }

    fn rebuild_fb(
        format: FourCc,
        config: &InitialPlaneConfig,
    ) -> Result<Framebuffer, PlaneError> {
        let info = format.info().ok_or(PlaneError::UnknownFourCc(format))?;
        let tiling = config.tiling;
        let main_pitch = config
            .stride
            .checked_mul(tiling.stride_unit(info.cpp[0]))
            .ok_or(PlaneError::InvalidLayout)?;
        let width = config
            .x
            .checked_add(config.width)
            .ok_or(PlaneError::InvalidLayout)?;
        let height = config
            .y
            .checked_add(config.height)
            .ok_or(PlaneError::InvalidLayout)?;

        let main = ColorPlane {
            offset: 0,
            pitch: main_pitch,
        };
        // The second plane's pitch follows from the main pitch; only its
        // position is taken from the register.
        let aux_pitch = if info.is_semiplanar() {
            main_pitch
        } else if let Some(pitch) = ccs_pitch(tiling, main_pitch) {
            pitch
        } else {
            return Framebuffer::with_layout(format, tiling, width, height, &[main]);
        };
        let aux = ColorPlane {
            offset: config.aux_dist & aux_dist::DIST_MASK,
            pitch: aux_pitch,
        };
        Framebuffer::with_layout(format, tiling, width, height, &[main, aux])
    }

    fn reproduce(
        &mut self,
        plane: &mut Plane,
        id: StateId,
        config: &InitialPlaneConfig,
    ) -> Result<(), FixupRejection> {
        let state = *self.store.state(id);
        let expected = SurfaceOffset {
            x: config.x,
            y: config.y,
            offset: 0,
        };
        let actual = self
            .geometry
            .main_surface_offset(&state, 0)
            .map_err(FixupRejection::Check)?;
        if actual != expected {
            return Err(FixupRejection::OffsetMismatch { expected, actual });
        }

        if self.geometry.aux_plane(&state.fb, 0).is_some() {
            let expected = if self.config().revision.display_version() >= 12 {
                config.aux_dist & aux_dist::DIST_MASK
            } else {
                config.aux_dist
            };
            let actual = self
                .geometry
                .aux_distance(&state, 0)
                .map_err(FixupRejection::Check)?;
            if actual != expected {
                return Err(FixupRejection::AuxMismatch { expected, actual });
            }
        }

        self.check(id).map_err(FixupRejection::Check)?;
        self.commit(plane, id).map_err(FixupRejection::Commit)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DisplayConfig;
    use crate::state::CheckStatus;

    #[derive(Default)]
    struct FakeRegs {
        ctl: u32,
        color_ctl: u32,
        surf: u32,
        offset: u32,
        pos: u32,
        size: u32,
        stride: u32,
        aux_dist: u32,
    }

    impl PlaneRegisters for FakeRegs {
        fn read(&self, _: PipeId, _: PlaneId, reg: PlaneReg) -> u32 {
            match reg {
                PlaneReg::Ctl => self.ctl,
                PlaneReg::ColorCtl => self.color_ctl,
                PlaneReg::Surf => self.surf,
                PlaneReg::Offset => self.offset,
                PlaneReg::Pos => self.pos,
                PlaneReg::Size => self.size,
                PlaneReg::Stride => self.stride,
                PlaneReg::AuxDist => self.aux_dist,
            }
        }
    }

    const fn size(w: u32, h: u32) -> u32 {
        ((h - 1) << xy::Y_SHIFT) | (w - 1)
    }

    /// 1920x1080 NV12, Y tiled, as a Kaby Lake BIOS would leave it.
    fn kbl_nv12_regs() -> FakeRegs {
        FakeRegs {
            ctl: ctl::ENABLE | ctl::FORMAT_NV12 | ctl::TILED_Y,
            surf: 0x0010_0000,
            size: size(1920, 1080),
            // 1920 bytes in 128-byte Y tile units.
            stride: 15,
            // UV plane after 1088 rows of luma, 15 tiles wide.
            aux_dist: (1920 * 1088) | 14,
            ..FakeRegs::default()
        }
    }

    fn primary(display: &mut Display<'_>) -> Plane {
        display.create_plane(PipeId::A, PlaneId::Primary).unwrap()
    }

    #[test]
    fn kabylake_nv12_takeover() {
        let mut display = Display::new(DisplayConfig::kabylake());
        let mut plane = primary(&mut display);
        let config = display
            .capture_initial_config(&mut plane, &kbl_nv12_regs())
            .unwrap();
        assert_eq!(plane.initial_status(), InitialConfigStatus::Captured);
        assert_eq!(config.tiling, Tiling::Y);
        assert_eq!((config.width, config.height), (1920, 1080));
        assert_eq!(config.base, 0x0010_0000);

        assert!(display.fixup_initial_config(&mut plane, &config));
        assert_eq!(plane.initial_status(), InitialConfigStatus::Validated);
        let active = plane.active().unwrap();
        assert_eq!(display.store().status(active), CheckStatus::Checked);
        assert_eq!(display.store().aux_distances(active).unwrap()[0], config.aux_dist);
    }

    #[test]
    fn render_compressed_takeover() {
        let mut display = Display::new(DisplayConfig::kabylake());
        let mut plane = primary(&mut display);
        let regs = FakeRegs {
            ctl: ctl::ENABLE
                | ctl::FORMAT_XRGB_8888
                | ctl::TILED_Y
                | ctl::RENDER_DECOMPRESSION_ENABLE,
            size: size(1024, 768),
            stride: 32,
            aux_dist: 4096 * 768,
            ..FakeRegs::default()
        };
        let config = display.capture_initial_config(&mut plane, &regs).unwrap();
        assert_eq!(config.tiling, Tiling::YCcs);
        assert!(display.fixup_initial_config(&mut plane, &config));
    }

    #[test]
    fn icelake_decodes_alpha_order_and_flip() {
        let mut display = Display::new(DisplayConfig::icelake());
        let mut plane = primary(&mut display);
        let regs = FakeRegs {
            ctl: ctl::ENABLE
                | ctl::FORMAT_XRGB_8888
                | ctl::ORDER_RGB
                | ctl::TILED_X
                | ctl::FLIP_HORIZONTAL
                | ctl::ROTATE_180,
            color_ctl: 1 << 4,
            offset: (3 << xy::Y_SHIFT) | 5,
            pos: (20 << xy::Y_SHIFT) | 10,
            size: size(256, 64),
            stride: 2,
            ..FakeRegs::default()
        };
        let config = display.capture_initial_config(&mut plane, &regs).unwrap();
        assert!(config.rgb_order && config.alpha && config.reflect_x);
        assert_eq!(config.rotation, Rotation::Rotate180);
        assert_eq!((config.x, config.y), (5, 3));
        assert_eq!((config.pos_x, config.pos_y), (10, 20));
        assert_eq!(
            to_fourcc(config.format, config.rgb_order, config.alpha),
            Ok(FourCc::ABGR8888)
        );
    }

    #[test]
    fn disabled_plane_is_not_captured() {
        let mut display = Display::new(DisplayConfig::kabylake());
        let mut plane = primary(&mut display);
        let regs = FakeRegs {
            ctl: ctl::FORMAT_XRGB_8888,
            ..FakeRegs::default()
        };
        assert_eq!(display.capture_initial_config(&mut plane, &regs), None);
        assert_eq!(plane.initial_status(), InitialConfigStatus::Uncaptured);
    }

    #[test]
    fn rotated_plane_is_not_captured() {
        let mut display = Display::new(DisplayConfig::kabylake());
        let mut plane = primary(&mut display);
        let mut regs = kbl_nv12_regs();
        regs.ctl |= ctl::ROTATE_90;
        assert_eq!(display.capture_initial_config(&mut plane, &regs), None);
        regs.ctl = (regs.ctl & !ctl::ROTATE_MASK) | ctl::ROTATE_270;
        assert_eq!(display.capture_initial_config(&mut plane, &regs), None);
    }

    #[test]
    fn reserved_tiling_is_not_captured() {
        let mut display = Display::new(DisplayConfig::kabylake());
        let mut plane = primary(&mut display);
        let regs = FakeRegs {
            ctl: ctl::ENABLE | ctl::FORMAT_XRGB_8888 | (2 << 10),
            ..FakeRegs::default()
        };
        assert_eq!(display.capture_initial_config(&mut plane, &regs), None);
    }

    #[test]
    fn compression_without_ccs_layout_is_not_captured() {
        let mut display = Display::new(DisplayConfig::dg2());
        let mut plane = primary(&mut display);
        let mut regs = FakeRegs {
            ctl: ctl::ENABLE
                | ctl::FORMAT_XRGB_8888
                | ctl::TILED_YF
                | ctl::RENDER_DECOMPRESSION_ENABLE,
            size: size(1024, 768),
            stride: 32,
            ..FakeRegs::default()
        };
        assert_eq!(display.capture_initial_config(&mut plane, &regs), None);
        regs.ctl ^= ctl::RENDER_DECOMPRESSION_ENABLE | ctl::MEDIA_DECOMPRESSION_ENABLE;
        assert_eq!(display.capture_initial_config(&mut plane, &regs), None);
        assert_eq!(plane.initial_status(), InitialConfigStatus::Uncaptured);

        let mut display = Display::new(DisplayConfig::kabylake());
        let mut plane = primary(&mut display);
        let regs = FakeRegs {
            ctl: ctl::ENABLE
                | ctl::FORMAT_XRGB_8888
                | ctl::TILED_X
                | ctl::RENDER_DECOMPRESSION_ENABLE,
            size: size(1024, 768),
            stride: 8,
            ..FakeRegs::default()
        };
        assert_eq!(display.capture_initial_config(&mut plane, &regs), None);
    }

    #[test]
    fn oversized_layout_is_rejected() {
        let mut display = Display::new(DisplayConfig::kabylake());
        let mut plane = primary(&mut display);
        let regs = FakeRegs {
            ctl: ctl::ENABLE | ctl::FORMAT_XRGB_8888 | ctl::TILED_X,
            offset: 8000 << xy::Y_SHIFT,
            size: size(100, 100),
            stride: stride::MASK,
            ..FakeRegs::default()
        };
        let config = display.capture_initial_config(&mut plane, &regs).unwrap();
        assert_eq!(config.y, 8000);
        assert!(!display.fixup_initial_config(&mut plane, &config));
        assert_eq!(plane.initial_status(), InitialConfigStatus::Rejected);
        assert_eq!(plane.active(), None);
        assert_eq!(display.store().live_count(), 0);
    }

    #[test]
    fn unaligned_base_is_rejected() {
        let mut display = Display::new(DisplayConfig::kabylake());
        let mut plane = primary(&mut display);
        let mut config = display
            .capture_initial_config(&mut plane, &kbl_nv12_regs())
            .unwrap();
        config.base |= 0x800;
        assert!(!display.fixup_initial_config(&mut plane, &config));
        assert_eq!(plane.initial_status(), InitialConfigStatus::Rejected);
        assert_eq!(plane.active(), None);
        assert_eq!(display.store().live_count(), 0);
    }

    #[test]
    fn linked_planar_nv12_is_rejected() {
        let mut display = Display::new(DisplayConfig::icelake());
        let mut plane = primary(&mut display);
        let config = display
            .capture_initial_config(&mut plane, &kbl_nv12_regs())
            .unwrap();
        assert!(!display.fixup_initial_config(&mut plane, &config));
        assert_eq!(plane.initial_status(), InitialConfigStatus::Rejected);
    }

    #[test]
    fn unreproducible_offset_is_rejected() {
        let mut display = Display::new(DisplayConfig::kabylake());
        let mut plane = primary(&mut display);
        let regs = FakeRegs {
            ctl: ctl::ENABLE | ctl::FORMAT_XRGB_8888 | ctl::TILED_Y,
            // x = 200 lies in the seventh 32-pixel Y tile column.
            offset: 200,
            size: size(1000, 600),
            stride: 60,
            ..FakeRegs::default()
        };
        let config = display.capture_initial_config(&mut plane, &regs).unwrap();
        assert!(!display.fixup_initial_config(&mut plane, &config));
        assert_eq!(display.store().live_count(), 0);
    }

    #[test]
    fn mismatched_aux_distance_is_rejected() {
        let mut display = Display::new(DisplayConfig::kabylake());
        let mut plane = primary(&mut display);
        let mut regs = kbl_nv12_regs();
        // The UV plane is 15 tiles wide but the stride field says 16.
        regs.aux_dist = (1920 * 1088) | 15;
        let config = display.capture_initial_config(&mut plane, &regs).unwrap();
        assert!(!display.fixup_initial_config(&mut plane, &config));
    }

    #[test]
    #[should_panic(expected = "without a captured config")]
    fn fixup_requires_capture() {
        let mut display = Display::new(DisplayConfig::kabylake());
        let mut plane = primary(&mut display);
        let config = InitialPlaneConfig {
            format: ctl::FORMAT_XRGB_8888,
            rgb_order: false,
            alpha: false,
            tiling: Tiling::X,
            rotation: Rotation::Rotate0,
            reflect_x: false,
            base: 0,
            x: 0,
            y: 0,
            width: 64,
            height: 64,
            stride: 1,
            pos_x: 0,
            pos_y: 0,
            aux_dist: 0,
        };
        let _ = display.fixup_initial_config(&mut plane, &config);
    }
}
