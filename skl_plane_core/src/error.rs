// Copyright 2026 the skl_plane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type shared by all plane operations.

use core::fmt;

use crate::format::FourCc;
use crate::id::{PipeId, PlaneId};
use crate::tiling::Tiling;

/// Errors from plane creation, format translation, geometry and checks.
///
/// Contract violations that can only come from a caller bug (stale
/// [`StateId`](crate::id::StateId)s, queries about plane slots the hardware
/// does not have) panic instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaneError {
    /// The pipe does not exist on this display engine.
    NoSuchPipe(PipeId),
    /// The plane slot does not exist on this pipe.
    NoSuchPlane(PipeId, PlaneId),
    /// The state belongs to a different plane than the one it was used with.
    WrongPlane {
        /// Plane the operation was invoked on.
        expected: (PipeId, PlaneId),
        /// Plane the state was created for.
        actual: (PipeId, PlaneId),
    },
    /// The colour plane index is not a main plane of the format.
    ColorPlaneOutOfRange {
        /// Requested colour plane.
        color_plane: usize,
        /// Number of main planes in the format.
        planes: usize,
    },
    /// The `PLANE_CTL` format code has no `FourCC` equivalent.
    UnsupportedFormat(u32),
    /// The `FourCC` is not a format any universal plane can scan out.
    UnknownFourCc(FourCc),
    /// The plane cannot scan out this format.
    FormatNotOnPlane(FourCc),
    /// The plane cannot scan out this tiling.
    TilingNotOnPlane(Tiling),
    /// The rotation cannot be combined with the tiling or format.
    UnsupportedRotation,
    /// No aligned offset keeps the X-tiled scan-out within the stride.
    NoSuitableOffset,
    /// A framebuffer colour plane does not start on an alignment boundary.
    MisalignedPlaneOffset {
        /// Framebuffer colour plane.
        color_plane: usize,
        /// Offending byte offset.
        offset: u32,
    },
    /// The framebuffer dimensions or colour plane list do not describe a
    /// surface of the given format and tiling.
    InvalidLayout,
    /// The pitch is not a multiple of the tiling's stride unit.
    MisalignedPitch {
        /// Framebuffer colour plane.
        color_plane: usize,
        /// Offending pitch in bytes.
        pitch: u32,
    },
    /// The AUX surface starts before its main surface.
    AuxBeforeMain,
    /// The source rectangle is empty, negative or exceeds the framebuffer.
    SourceOutOfBounds,
    /// A chroma-subsampled source is not aligned to the subsampling factor.
    ChromaMisaligned,
    /// A semi-planar state has no companion on linked-planar hardware.
    CompanionMissing,
    /// A state carries a companion link it must not have.
    UnexpectedCompanion,
    /// The companion of a linked state is not another plane of the same
    /// pipe.
    MisplacedCompanion,
    /// The companion of a linked state failed its check.
    CompanionRejected,
    /// The state has not passed the atomic check since its last change.
    NotChecked,
}

impl fmt::Display for PlaneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSuchPipe(pipe) => write!(f, "pipe {pipe:?} does not exist"),
            Self::NoSuchPlane(pipe, plane) => {
                write!(f, "plane {plane:?} does not exist on pipe {pipe:?}")
            }
            Self::WrongPlane { expected, actual } => write!(
                f,
                "state belongs to {:?}/{:?}, not {:?}/{:?}",
                actual.0, actual.1, expected.0, expected.1
            ),
            Self::ColorPlaneOutOfRange {
                color_plane,
                planes,
            } => write!(
                f,
                "colour plane {color_plane} out of range (format has {planes})"
            ),
            Self::UnsupportedFormat(code) => {
                write!(f, "plane format {code:#010x} has no fourcc equivalent")
            }
            Self::UnknownFourCc(fourcc) => write!(f, "unknown pixel format {fourcc:?}"),
            Self::FormatNotOnPlane(fourcc) => {
                write!(f, "format {fourcc:?} not supported on this plane")
            }
            Self::TilingNotOnPlane(tiling) => {
                write!(f, "tiling {tiling:?} not supported on this plane")
            }
            Self::UnsupportedRotation => write!(f, "rotation not supported for this surface"),
            Self::NoSuitableOffset => {
                write!(f, "unable to find suitable display surface offset")
            }
            Self::MisalignedPlaneOffset {
                color_plane,
                offset,
            } => write!(
                f,
                "colour plane {color_plane} offset {offset:#x} is not aligned"
            ),
            Self::InvalidLayout => write!(f, "invalid framebuffer layout"),
            Self::MisalignedPitch { color_plane, pitch } => {
                write!(f, "colour plane {color_plane} pitch {pitch} is not aligned")
            }
            Self::AuxBeforeMain => write!(f, "AUX surface precedes main surface"),
            Self::SourceOutOfBounds => write!(f, "source rectangle outside framebuffer"),
            Self::ChromaMisaligned => {
                write!(f, "source not aligned to chroma subsampling")
            }
            Self::CompanionMissing => write!(f, "semi-planar state has no Y companion"),
            Self::UnexpectedCompanion => write!(f, "state must not have a companion"),
            Self::MisplacedCompanion => {
                write!(f, "linked companion is not another plane of the same pipe")
            }
            Self::CompanionRejected => write!(f, "linked companion failed its check"),
            Self::NotChecked => write!(f, "state has not passed the atomic check"),
        }
    }
}

impl core::error::Error for PlaneError {}
