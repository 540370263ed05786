// Copyright 2026 the skl_plane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-plane hardware capabilities.
//!
//! A [`CapabilityRegistry`] resolves the capability table of a display
//! revision once, at construction. Every query afterwards is a pure lookup in
//! that table. Capabilities never change at run time, so [`PlaneCaps`] is a
//! plain `Copy` value that a [`Plane`](crate::plane::Plane) keeps for its
//! whole life.

use crate::config::{DisplayConfig, DisplayRevision};
use crate::error::PlaneError;
use crate::format::FourCc;
use crate::id::{PipeId, PlaneId, PlaneMask};
use crate::tiling::Tiling;

// ---------------------------------------------------------------------------
// Format and tiling lists
// ---------------------------------------------------------------------------

const CURSOR_FORMATS: &[FourCc] = &[FourCc::ARGB8888];

const SKL_FORMATS: &[FourCc] = &[
    FourCc::RGB565,
    FourCc::XRGB8888,
    FourCc::XBGR8888,
    FourCc::ARGB8888,
    FourCc::ABGR8888,
    FourCc::XRGB2101010,
    FourCc::XBGR2101010,
    FourCc::XRGB16161616F,
    FourCc::XBGR16161616F,
    FourCc::XYUV8888,
];

const SKL_PLANAR_FORMATS: &[FourCc] = &[
    FourCc::RGB565,
    FourCc::XRGB8888,
    FourCc::XBGR8888,
    FourCc::ARGB8888,
    FourCc::ABGR8888,
    FourCc::XRGB2101010,
    FourCc::XBGR2101010,
    FourCc::XRGB16161616F,
    FourCc::XBGR16161616F,
    FourCc::XYUV8888,
    FourCc::NV12,
];

const GLK_PLANAR_FORMATS: &[FourCc] = &[
    FourCc::RGB565,
    FourCc::XRGB8888,
    FourCc::XBGR8888,
    FourCc::ARGB8888,
    FourCc::ABGR8888,
    FourCc::XRGB2101010,
    FourCc::XBGR2101010,
    FourCc::XRGB16161616F,
    FourCc::XBGR16161616F,
    FourCc::XYUV8888,
    FourCc::NV12,
    FourCc::P010,
    FourCc::P012,
    FourCc::P016,
];

const ICL_SDR_FORMATS: &[FourCc] = &[
    FourCc::RGB565,
    FourCc::XRGB8888,
    FourCc::XBGR8888,
    FourCc::ARGB8888,
    FourCc::ABGR8888,
    FourCc::XRGB2101010,
    FourCc::XBGR2101010,
    FourCc::ARGB2101010,
    FourCc::ABGR2101010,
    FourCc::XRGB16161616F,
    FourCc::XBGR16161616F,
    FourCc::XYUV8888,
    FourCc::NV12,
    FourCc::P010,
    FourCc::Y210,
    FourCc::XVYU2101010,
];

const ICL_HDR_FORMATS: &[FourCc] = &[
    FourCc::RGB565,
    FourCc::XRGB8888,
    FourCc::XBGR8888,
    FourCc::ARGB8888,
    FourCc::ABGR8888,
    FourCc::XRGB2101010,
    FourCc::XBGR2101010,
    FourCc::ARGB2101010,
    FourCc::ABGR2101010,
    FourCc::XRGB16161616F,
    FourCc::XBGR16161616F,
    FourCc::ARGB16161616F,
    FourCc::ABGR16161616F,
    FourCc::XYUV8888,
    FourCc::NV12,
    FourCc::P010,
    FourCc::P012,
    FourCc::P016,
    FourCc::Y210,
    FourCc::Y212,
    FourCc::Y216,
    FourCc::XVYU2101010,
    FourCc::XVYU12_16161616,
    FourCc::XVYU16161616,
];

const CURSOR_TILINGS: &[Tiling] = &[Tiling::Linear];
const SKL_TILINGS: &[Tiling] = &[Tiling::Linear, Tiling::X, Tiling::Y, Tiling::Yf];
const SKL_CCS_TILINGS: &[Tiling] = &[
    Tiling::Linear,
    Tiling::X,
    Tiling::Y,
    Tiling::Yf,
    Tiling::YCcs,
    Tiling::YfCcs,
];
const GEN12_TILINGS: &[Tiling] = &[
    Tiling::Linear,
    Tiling::X,
    Tiling::Y,
    Tiling::Gen12RcCcs,
    Tiling::Gen12McCcs,
];
const DG2_TILINGS: &[Tiling] = &[Tiling::Linear, Tiling::X, Tiling::Tile4];

const PRIMARY_SPRITE0: PlaneMask = PlaneMask::from_planes(&[PlaneId::Primary, PlaneId::Sprite0]);
const HDR_PLANES: PlaneMask =
    PlaneMask::from_planes(&[PlaneId::Primary, PlaneId::Sprite0, PlaneId::Sprite1]);
const UNIVERSAL: PlaneMask = PlaneMask::from_planes(&[
    PlaneId::Primary,
    PlaneId::Sprite0,
    PlaneId::Sprite1,
    PlaneId::Sprite2,
    PlaneId::Sprite3,
    PlaneId::Sprite4,
    PlaneId::Sprite5,
]);

// ---------------------------------------------------------------------------
// PlaneCaps
// ---------------------------------------------------------------------------

/// Capabilities of one plane slot, resolved at plane creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaneCaps {
    /// Can act as the Y half of a linked semi-planar pair.
    pub nv12_y: bool,
    /// Has HDR input processing.
    pub hdr: bool,
    /// Can scan out a semi-planar format (as the UV half on linked planar
    /// hardware, or on its own before that).
    pub planar: bool,
    /// Can scan out render-compressed surfaces.
    pub ccs: bool,
    formats: &'static [FourCc],
    tilings: &'static [Tiling],
}

impl PlaneCaps {
    /// Formats the plane can scan out.
    #[must_use]
    pub const fn formats(&self) -> &'static [FourCc] {
        self.formats
    }

    /// Tilings the plane can scan out.
    #[must_use]
    pub const fn tilings(&self) -> &'static [Tiling] {
        self.tilings
    }

    /// Returns whether the plane can scan out `format`.
    #[must_use]
    pub fn supports_format(&self, format: FourCc) -> bool {
        self.formats.contains(&format)
    }

    /// Returns whether the plane can scan out `tiling`.
    #[must_use]
    pub fn supports_tiling(&self, tiling: Tiling) -> bool {
        self.tilings.contains(&tiling)
    }

    /// Checks that the plane can scan out `format` with `tiling`.
    ///
    /// # Errors
    ///
    /// [`PlaneError::FormatNotOnPlane`] or [`PlaneError::TilingNotOnPlane`]
    /// when either is missing from the plane's lists, and
    /// [`PlaneError::TilingNotOnPlane`] when the pair cannot be combined:
    /// render compression only covers 8-bit RGB, media compression adds the
    /// semi-planar formats, and semi-planar formats cannot use Yf tiling.
    pub fn check_format(&self, format: FourCc, tiling: Tiling) -> Result<(), PlaneError> {
        if !self.supports_format(format) {
            return Err(PlaneError::FormatNotOnPlane(format));
        }
        if !self.supports_tiling(tiling) {
            return Err(PlaneError::TilingNotOnPlane(tiling));
        }
        let rgb8888 = matches!(
            format,
            FourCc::XRGB8888 | FourCc::XBGR8888 | FourCc::ARGB8888 | FourCc::ABGR8888
        );
        let combinable = match tiling {
            Tiling::YCcs | Tiling::YfCcs | Tiling::Gen12RcCcs => rgb8888,
            Tiling::Gen12McCcs => rgb8888 || format.is_semiplanar(),
            Tiling::Yf => !format.is_semiplanar(),
            _ => true,
        };
        if combinable {
            Ok(())
        } else {
            Err(PlaneError::TilingNotOnPlane(tiling))
        }
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Capability table of a display revision, resolved once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaneTable {
    /// Display version 9 and 10: chroma is fetched through the AUX surface
    /// of a single plane.
    Gen9 {
        /// Planes that can scan out semi-planar formats.
        planar: PlaneMask,
        /// Whether pipe C planes can scan out semi-planar formats.
        planar_on_pipe_c: bool,
        /// Whether the semi-planar planes also accept 10 to 16 bit formats.
        deep_planar: bool,
    },
    /// Display version 11+: semi-planar formats use a linked plane pair.
    Icl {
        /// Planes wired as Y halves.
        nv12_y: PlaneMask,
        /// Planes with HDR input processing.
        hdr: PlaneMask,
    },
}

impl PlaneTable {
    /// Resolves the table for a revision.
    #[must_use]
    pub const fn for_revision(revision: DisplayRevision) -> Self {
        match revision {
            // Display WA #0870: no planar scan-out on Skylake and Broxton.
            DisplayRevision::Skylake | DisplayRevision::Broxton => Self::Gen9 {
                planar: PlaneMask::EMPTY,
                planar_on_pipe_c: false,
                deep_planar: false,
            },
            DisplayRevision::Kabylake => Self::Gen9 {
                planar: PRIMARY_SPRITE0,
                planar_on_pipe_c: false,
                deep_planar: false,
            },
            DisplayRevision::Geminilake => Self::Gen9 {
                planar: PRIMARY_SPRITE0,
                planar_on_pipe_c: true,
                deep_planar: true,
            },
            DisplayRevision::Icelake | DisplayRevision::Tigerlake => Self::Icl {
                nv12_y: PlaneMask::from_planes(&[PlaneId::Sprite4, PlaneId::Sprite5]),
                hdr: HDR_PLANES,
            },
            DisplayRevision::Rocketlake | DisplayRevision::Alderlake | DisplayRevision::Dg2 => {
                Self::Icl {
                    nv12_y: PlaneMask::from_planes(&[PlaneId::Sprite2, PlaneId::Sprite3]),
                    hdr: HDR_PLANES,
                }
            }
        }
    }
}

/// Answers capability queries for one display engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CapabilityRegistry {
    config: DisplayConfig,
    table: PlaneTable,
}

impl CapabilityRegistry {
    /// Creates a registry for the given configuration.
    #[must_use]
    pub const fn new(config: DisplayConfig) -> Self {
        Self {
            config,
            table: PlaneTable::for_revision(config.revision),
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// Returns the resolved capability table.
    #[must_use]
    pub const fn table(&self) -> &PlaneTable {
        &self.table
    }

    /// Returns whether `plane` is wired as the Y half of linked semi-planar
    /// scan-out.
    ///
    /// # Panics
    ///
    /// Panics if no pipe has this plane.
    #[must_use]
    pub fn is_nv12_y_capable(&self, plane: PlaneId) -> bool {
        self.assert_plane_exists(plane);
        match self.table {
            PlaneTable::Gen9 { .. } => false,
            PlaneTable::Icl { nv12_y, .. } => nv12_y.contains(plane),
        }
    }

    /// Returns the set of planes with HDR input processing.
    #[must_use]
    pub const fn hdr_capable_mask(&self) -> PlaneMask {
        match self.table {
            PlaneTable::Gen9 { .. } => PlaneMask::EMPTY,
            PlaneTable::Icl { hdr, .. } => hdr,
        }
    }

    /// Returns whether `plane` has HDR input processing.
    ///
    /// # Panics
    ///
    /// Panics if no pipe has this plane.
    #[must_use]
    pub fn is_hdr_capable(&self, plane: PlaneId) -> bool {
        self.assert_plane_exists(plane);
        self.hdr_capable_mask().contains(plane)
    }

    /// Returns whether `plane` on `pipe` can scan out semi-planar formats.
    ///
    /// # Panics
    ///
    /// Panics if the pipe does not have this plane.
    #[must_use]
    pub fn has_planar(&self, pipe: PipeId, plane: PlaneId) -> bool {
        assert!(
            self.config.has_plane(pipe, plane),
            "plane {plane:?} does not exist on pipe {pipe:?} ({})",
            self.config.revision
        );
        match self.table {
            PlaneTable::Gen9 {
                planar,
                planar_on_pipe_c,
                ..
            } => planar.contains(plane) && (planar_on_pipe_c || pipe != PipeId::C),
            PlaneTable::Icl { .. } => plane.is_universal(),
        }
    }

    /// Returns whether `plane` can scan out render-compressed surfaces.
    ///
    /// # Panics
    ///
    /// Panics if no pipe has this plane.
    #[must_use]
    pub fn has_ccs(&self, plane: PlaneId) -> bool {
        self.assert_plane_exists(plane);
        match self.table {
            PlaneTable::Gen9 { .. } => PRIMARY_SPRITE0.contains(plane),
            PlaneTable::Icl { .. } => UNIVERSAL.contains(plane),
        }
    }

    /// Resolves the capabilities of a plane slot.
    ///
    /// # Errors
    ///
    /// [`PlaneError::NoSuchPipe`] or [`PlaneError::NoSuchPlane`] when the
    /// hardware lacks the slot.
    pub fn plane_caps(&self, pipe: PipeId, plane: PlaneId) -> Result<PlaneCaps, PlaneError> {
        if !self.config.has_pipe(pipe) {
            return Err(PlaneError::NoSuchPipe(pipe));
        }
        if !self.config.has_plane(pipe, plane) {
            return Err(PlaneError::NoSuchPlane(pipe, plane));
        }
        if plane == PlaneId::Cursor {
            return Ok(PlaneCaps {
                nv12_y: false,
                hdr: false,
                planar: false,
                ccs: false,
                formats: CURSOR_FORMATS,
                tilings: CURSOR_TILINGS,
            });
        }

        let revision = self.config.revision;
        let planar = self.has_planar(pipe, plane);
        let ccs = self.has_ccs(plane);
        let hdr = self.is_hdr_capable(plane);
        let formats = match self.table {
            PlaneTable::Gen9 { deep_planar, .. } => match (planar, deep_planar) {
                (false, _) => SKL_FORMATS,
                (true, false) => SKL_PLANAR_FORMATS,
                (true, true) => GLK_PLANAR_FORMATS,
            },
            PlaneTable::Icl { .. } if hdr => ICL_HDR_FORMATS,
            PlaneTable::Icl { .. } => ICL_SDR_FORMATS,
        };
        let tilings = if revision.has_tile4() {
            DG2_TILINGS
        } else if revision.display_version() >= 12 {
            GEN12_TILINGS
        } else if ccs {
            SKL_CCS_TILINGS
        } else {
            SKL_TILINGS
        };

        Ok(PlaneCaps {
            nv12_y: self.is_nv12_y_capable(plane),
            hdr,
            planar,
            ccs,
            formats,
            tilings,
        })
    }

    fn assert_plane_exists(&self, plane: PlaneId) {
        assert!(
            PipeId::ALL
                .into_iter()
                .any(|pipe| self.config.has_plane(pipe, plane)),
            "plane {plane:?} does not exist on {}",
            self.config.revision
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(config: DisplayConfig) -> CapabilityRegistry {
        CapabilityRegistry::new(config)
    }

    #[test]
    fn nv12_y_planes_per_revision() {
        let skl = registry(DisplayConfig::skylake());
        assert!(PlaneId::ALL[..3].iter().all(|&p| !skl.is_nv12_y_capable(p)));

        let icl = registry(DisplayConfig::icelake());
        assert!(icl.is_nv12_y_capable(PlaneId::Sprite4));
        assert!(icl.is_nv12_y_capable(PlaneId::Sprite5));
        assert!(!icl.is_nv12_y_capable(PlaneId::Sprite2));

        let rkl = registry(DisplayConfig::rocketlake());
        assert!(rkl.is_nv12_y_capable(PlaneId::Sprite2));
        assert!(rkl.is_nv12_y_capable(PlaneId::Sprite3));

        let adl = registry(DisplayConfig::alderlake());
        assert!(adl.is_nv12_y_capable(PlaneId::Sprite3));
        assert!(!adl.is_nv12_y_capable(PlaneId::Primary));
    }

    #[test]
    fn hdr_mask() {
        assert!(registry(DisplayConfig::kabylake()).hdr_capable_mask().is_empty());
        let tgl = registry(DisplayConfig::tigerlake());
        let mask = tgl.hdr_capable_mask();
        assert_eq!(
            mask,
            PlaneMask::from_planes(&[PlaneId::Primary, PlaneId::Sprite0, PlaneId::Sprite1])
        );
        for plane in PlaneId::ALL {
            assert_eq!(tgl.is_hdr_capable(plane), mask.contains(plane));
        }
    }

    #[test]
    fn queries_are_pure() {
        let reg = registry(DisplayConfig::icelake());
        for plane in PlaneId::ALL {
            let first = (reg.is_nv12_y_capable(plane), reg.is_hdr_capable(plane));
            for _ in 0..3 {
                assert_eq!(
                    (reg.is_nv12_y_capable(plane), reg.is_hdr_capable(plane)),
                    first
                );
            }
        }
    }

    #[test]
    fn planar_rules() {
        let skl = registry(DisplayConfig::skylake());
        assert!(!skl.has_planar(PipeId::A, PlaneId::Primary));

        let kbl = registry(DisplayConfig::kabylake());
        assert!(kbl.has_planar(PipeId::A, PlaneId::Primary));
        assert!(kbl.has_planar(PipeId::B, PlaneId::Sprite0));
        assert!(!kbl.has_planar(PipeId::A, PlaneId::Sprite1));
        assert!(!kbl.has_planar(PipeId::C, PlaneId::Primary));

        let glk = registry(DisplayConfig::geminilake());
        assert!(glk.has_planar(PipeId::C, PlaneId::Primary));
        assert!(!glk.has_planar(PipeId::C, PlaneId::Sprite2));

        let icl = registry(DisplayConfig::icelake());
        assert!(icl.has_planar(PipeId::C, PlaneId::Sprite5));
        assert!(!icl.has_planar(PipeId::A, PlaneId::Cursor));
    }

    #[test]
    fn ccs_rules() {
        let kbl = registry(DisplayConfig::kabylake());
        assert!(kbl.has_ccs(PlaneId::Sprite0));
        assert!(!kbl.has_ccs(PlaneId::Sprite1));
        assert!(!kbl.has_ccs(PlaneId::Cursor));
        let icl = registry(DisplayConfig::icelake());
        assert!(icl.has_ccs(PlaneId::Sprite5));
        assert!(!icl.has_ccs(PlaneId::Cursor));
    }

    #[test]
    #[should_panic(expected = "does not exist")]
    fn unknown_plane_panics() {
        let skl = registry(DisplayConfig::skylake());
        let _ = skl.is_nv12_y_capable(PlaneId::Sprite4);
    }

    #[test]
    #[should_panic(expected = "does not exist on pipe")]
    fn planar_on_missing_slot_panics() {
        let skl = registry(DisplayConfig::skylake());
        let _ = skl.has_planar(PipeId::C, PlaneId::Sprite1);
    }

    #[test]
    fn caps_for_missing_slots() {
        let skl = registry(DisplayConfig::skylake());
        assert_eq!(
            skl.plane_caps(PipeId::D, PlaneId::Primary),
            Err(PlaneError::NoSuchPipe(PipeId::D))
        );
        assert_eq!(
            skl.plane_caps(PipeId::C, PlaneId::Sprite1),
            Err(PlaneError::NoSuchPlane(PipeId::C, PlaneId::Sprite1))
        );
    }

    #[test]
    fn caps_lists_follow_revision() {
        let kbl = registry(DisplayConfig::kabylake());
        let primary = kbl.plane_caps(PipeId::A, PlaneId::Primary).unwrap();
        assert!(primary.supports_format(FourCc::NV12));
        assert!(!primary.supports_format(FourCc::P010));
        assert!(primary.supports_tiling(Tiling::YCcs));
        let sprite1 = kbl.plane_caps(PipeId::A, PlaneId::Sprite1).unwrap();
        assert!(!sprite1.supports_format(FourCc::NV12));
        assert!(!sprite1.supports_tiling(Tiling::YCcs));

        let tgl = registry(DisplayConfig::tigerlake());
        let hdr = tgl.plane_caps(PipeId::A, PlaneId::Primary).unwrap();
        let sdr = tgl.plane_caps(PipeId::A, PlaneId::Sprite3).unwrap();
        assert!(hdr.supports_format(FourCc::P016));
        assert!(!sdr.supports_format(FourCc::P016));
        assert!(sdr.supports_format(FourCc::P010));
        assert!(sdr.supports_tiling(Tiling::Gen12RcCcs));
        assert!(!sdr.supports_tiling(Tiling::Yf));

        let dg2 = registry(DisplayConfig::dg2());
        let caps = dg2.plane_caps(PipeId::D, PlaneId::Primary).unwrap();
        assert_eq!(caps.tilings(), &[Tiling::Linear, Tiling::X, Tiling::Tile4]);
    }

    #[test]
    fn cursor_caps() {
        let icl = registry(DisplayConfig::icelake());
        let caps = icl.plane_caps(PipeId::B, PlaneId::Cursor).unwrap();
        assert!(!caps.nv12_y && !caps.hdr && !caps.planar && !caps.ccs);
        assert_eq!(caps.formats(), &[FourCc::ARGB8888]);
        assert_eq!(
            caps.check_format(FourCc::ARGB8888, Tiling::X),
            Err(PlaneError::TilingNotOnPlane(Tiling::X))
        );
    }

    #[test]
    fn format_tiling_combinations() {
        let kbl = registry(DisplayConfig::kabylake());
        let caps = kbl.plane_caps(PipeId::A, PlaneId::Primary).unwrap();
        assert_eq!(caps.check_format(FourCc::XRGB8888, Tiling::YCcs), Ok(()));
        assert_eq!(
            caps.check_format(FourCc::RGB565, Tiling::YCcs),
            Err(PlaneError::TilingNotOnPlane(Tiling::YCcs))
        );
        assert_eq!(
            caps.check_format(FourCc::NV12, Tiling::Yf),
            Err(PlaneError::TilingNotOnPlane(Tiling::Yf))
        );

        let tgl = registry(DisplayConfig::tigerlake());
        let caps = tgl.plane_caps(PipeId::A, PlaneId::Primary).unwrap();
        assert_eq!(caps.check_format(FourCc::NV12, Tiling::Gen12McCcs), Ok(()));
        assert_eq!(
            caps.check_format(FourCc::NV12, Tiling::Gen12RcCcs),
            Err(PlaneError::TilingNotOnPlane(Tiling::Gen12RcCcs))
        );
    }
}
