// Copyright 2026 the skl_plane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Translation between `PLANE_CTL` format codes and `FourCC` pixel formats.
//!
//! The hardware describes a pixel format with a format code plus two flags:
//! RGB channel order and alpha. [`to_fourcc`] maps such a triple to the
//! four-character code used at the driver/userspace boundary, and
//! [`fourcc_to_format`] maps back. Codes without a `FourCC` equivalent are
//! rejected; no nearby format is ever substituted.

use core::fmt;

use crate::error::PlaneError;
use crate::regs::ctl;

/// A four-character pixel format code, little-endian packed.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FourCc(pub u32);

const fn fourcc_code(a: u8, b: u8, c: u8, d: u8) -> FourCc {
    FourCc((a as u32) | ((b as u32) << 8) | ((c as u32) << 16) | ((d as u32) << 24))
}

impl FourCc {
    /// 16 bpp RGB 5:6:5.
    pub const RGB565: Self = fourcc_code(b'R', b'G', b'1', b'6');
    /// 32 bpp RGB, alpha ignored.
    pub const XRGB8888: Self = fourcc_code(b'X', b'R', b'2', b'4');
    /// 32 bpp RGB with alpha.
    pub const ARGB8888: Self = fourcc_code(b'A', b'R', b'2', b'4');
    /// 32 bpp BGR, alpha ignored.
    pub const XBGR8888: Self = fourcc_code(b'X', b'B', b'2', b'4');
    /// 32 bpp BGR with alpha.
    pub const ABGR8888: Self = fourcc_code(b'A', b'B', b'2', b'4');
    /// 32 bpp RGB 10:10:10, alpha ignored.
    pub const XRGB2101010: Self = fourcc_code(b'X', b'R', b'3', b'0');
    /// 32 bpp RGB 10:10:10:2.
    pub const ARGB2101010: Self = fourcc_code(b'A', b'R', b'3', b'0');
    /// 32 bpp BGR 10:10:10, alpha ignored.
    pub const XBGR2101010: Self = fourcc_code(b'X', b'B', b'3', b'0');
    /// 32 bpp BGR 10:10:10:2.
    pub const ABGR2101010: Self = fourcc_code(b'A', b'B', b'3', b'0');
    /// 64 bpp half-float RGB, alpha ignored.
    pub const XRGB16161616F: Self = fourcc_code(b'X', b'R', b'4', b'H');
    /// 64 bpp half-float RGB with alpha.
    pub const ARGB16161616F: Self = fourcc_code(b'A', b'R', b'4', b'H');
    /// 64 bpp half-float BGR, alpha ignored.
    pub const XBGR16161616F: Self = fourcc_code(b'X', b'B', b'4', b'H');
    /// 64 bpp half-float BGR with alpha.
    pub const ABGR16161616F: Self = fourcc_code(b'A', b'B', b'4', b'H');
    /// Semi-planar YUV 4:2:0, 8 bit.
    pub const NV12: Self = fourcc_code(b'N', b'V', b'1', b'2');
    /// Semi-planar YUV 4:2:0, 10 bit.
    pub const P010: Self = fourcc_code(b'P', b'0', b'1', b'0');
    /// Semi-planar YUV 4:2:0, 12 bit.
    pub const P012: Self = fourcc_code(b'P', b'0', b'1', b'2');
    /// Semi-planar YUV 4:2:0, 16 bit.
    pub const P016: Self = fourcc_code(b'P', b'0', b'1', b'6');
    /// Packed YUV 4:4:4, 8 bit.
    pub const XYUV8888: Self = fourcc_code(b'X', b'Y', b'U', b'V');
    /// Packed YUV 4:2:2, 10 bit.
    pub const Y210: Self = fourcc_code(b'Y', b'2', b'1', b'0');
    /// Packed YUV 4:2:2, 12 bit.
    pub const Y212: Self = fourcc_code(b'Y', b'2', b'1', b'2');
    /// Packed YUV 4:2:2, 16 bit.
    pub const Y216: Self = fourcc_code(b'Y', b'2', b'1', b'6');
    /// Packed YUV 4:4:4, 10 bit (`Y410` layout).
    pub const XVYU2101010: Self = fourcc_code(b'X', b'V', b'3', b'0');
    /// Packed YUV 4:4:4, 12 bit (`Y412` layout).
    pub const XVYU12_16161616: Self = fourcc_code(b'X', b'V', b'3', b'6');
    /// Packed YUV 4:4:4, 16 bit (`Y416` layout).
    pub const XVYU16161616: Self = fourcc_code(b'X', b'V', b'4', b'8');

    /// Returns the four characters of the code.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "each byte is masked out of the packed code"
    )]
    pub const fn chars(self) -> [u8; 4] {
        [
            self.0 as u8,
            (self.0 >> 8) as u8,
            (self.0 >> 16) as u8,
            (self.0 >> 24) as u8,
        ]
    }

    /// Returns layout information, or `None` for codes this crate does not
    /// know how to scan out.
    #[must_use]
    pub const fn info(self) -> Option<FormatInfo> {
        let info = match self {
            Self::RGB565 => FormatInfo::packed(2, false, false),
            Self::XRGB8888 | Self::XBGR8888 | Self::XRGB2101010 | Self::XBGR2101010 => {
                FormatInfo::packed(4, false, false)
            }
            Self::ARGB8888 | Self::ABGR8888 | Self::ARGB2101010 | Self::ABGR2101010 => {
                FormatInfo::packed(4, true, false)
            }
            Self::XRGB16161616F | Self::XBGR16161616F => FormatInfo::packed(8, false, false),
            Self::ARGB16161616F | Self::ABGR16161616F => FormatInfo::packed(8, true, false),
            Self::XYUV8888 | Self::XVYU2101010 => FormatInfo::packed(4, false, true),
            Self::XVYU12_16161616 | Self::XVYU16161616 => FormatInfo::packed(8, false, true),
            Self::Y210 | Self::Y212 | Self::Y216 => FormatInfo {
                hsub: 2,
                ..FormatInfo::packed(4, false, true)
            },
            Self::NV12 => FormatInfo::semiplanar(1),
            Self::P010 | Self::P012 | Self::P016 => FormatInfo::semiplanar(2),
            _ => return None,
        };
        Some(info)
    }

    /// Returns whether the format is a two-plane luma/chroma format.
    #[must_use]
    pub const fn is_semiplanar(self) -> bool {
        matches!(self, Self::NV12 | Self::P010 | Self::P012 | Self::P016)
    }

    /// Returns whether the format carries more than 10 bits per component,
    /// which only HDR-capable planes can scan out.
    #[must_use]
    pub const fn is_high_depth(self) -> bool {
        matches!(
            self,
            Self::P012
                | Self::P016
                | Self::Y212
                | Self::Y216
                | Self::XVYU12_16161616
                | Self::XVYU16161616
        )
    }
}

impl fmt::Debug for FourCc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let chars = self.chars();
        if chars.iter().all(|c| c.is_ascii_graphic() || *c == b' ') {
            write!(f, "FourCc(")?;
            for c in chars {
                write!(f, "{}", c as char)?;
            }
            write!(f, ")")
        } else {
            write!(f, "FourCc({:#010x})", self.0)
        }
    }
}

/// Memory layout facts about a pixel format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormatInfo {
    /// Number of colour planes in memory (excluding compression metadata).
    pub planes: u8,
    /// Bytes per pixel for each colour plane.
    pub cpp: [u8; 2],
    /// Horizontal chroma subsampling factor.
    pub hsub: u8,
    /// Vertical chroma subsampling factor.
    pub vsub: u8,
    /// Whether the format has an alpha channel.
    pub has_alpha: bool,
    /// Whether the format is YUV.
    pub is_yuv: bool,
}

impl FormatInfo {
    const fn packed(cpp: u8, has_alpha: bool, is_yuv: bool) -> Self {
        Self {
            planes: 1,
            cpp: [cpp, 0],
            hsub: 1,
            vsub: 1,
            has_alpha,
            is_yuv,
        }
    }

    const fn semiplanar(luma_cpp: u8) -> Self {
        Self {
            planes: 2,
            cpp: [luma_cpp, luma_cpp * 2],
            hsub: 2,
            vsub: 2,
            has_alpha: false,
            is_yuv: true,
        }
    }

    /// Returns whether the format is two-plane luma/chroma.
    #[must_use]
    pub const fn is_semiplanar(&self) -> bool {
        self.planes == 2
    }
}

/// Translates a `PLANE_CTL` format field plus the RGB order and alpha flags
/// into a `FourCC`.
///
/// `format` is the field value as read from the register (already masked,
/// not shifted down). For the three RGB layouts, `rgb_order` selects BGR
/// naming (hardware "RGBX" memory order) and `alpha` selects the alpha
/// variant. For every other supported code the flags are ignored.
///
/// # Errors
///
/// Returns [`PlaneError::UnsupportedFormat`] for packed YUV 4:2:2, indexed
/// and unknown codes.
pub fn to_fourcc(format: u32, rgb_order: bool, alpha: bool) -> Result<FourCc, PlaneError> {
    let rgb = |xrgb, argb, xbgr, abgr| match (rgb_order, alpha) {
        (false, false) => xrgb,
        (false, true) => argb,
        (true, false) => xbgr,
        (true, true) => abgr,
    };
    let fourcc = match format {
        ctl::FORMAT_RGB_565 => FourCc::RGB565,
        ctl::FORMAT_NV12 => FourCc::NV12,
        ctl::FORMAT_XYUV => FourCc::XYUV8888,
        ctl::FORMAT_P010 => FourCc::P010,
        ctl::FORMAT_P012 => FourCc::P012,
        ctl::FORMAT_P016 => FourCc::P016,
        ctl::FORMAT_Y210 => FourCc::Y210,
        ctl::FORMAT_Y212 => FourCc::Y212,
        ctl::FORMAT_Y216 => FourCc::Y216,
        ctl::FORMAT_Y410 => FourCc::XVYU2101010,
        ctl::FORMAT_Y412 => FourCc::XVYU12_16161616,
        ctl::FORMAT_Y416 => FourCc::XVYU16161616,
        ctl::FORMAT_XRGB_8888 => rgb(
            FourCc::XRGB8888,
            FourCc::ARGB8888,
            FourCc::XBGR8888,
            FourCc::ABGR8888,
        ),
        ctl::FORMAT_XRGB_2101010 => rgb(
            FourCc::XRGB2101010,
            FourCc::ARGB2101010,
            FourCc::XBGR2101010,
            FourCc::ABGR2101010,
        ),
        ctl::FORMAT_XRGB_16161616F => rgb(
            FourCc::XRGB16161616F,
            FourCc::ARGB16161616F,
            FourCc::XBGR16161616F,
            FourCc::ABGR16161616F,
        ),
        _ => return Err(PlaneError::UnsupportedFormat(format)),
    };
    Ok(fourcc)
}

/// Maps a `FourCC` back to its `PLANE_CTL` format field and flags.
///
/// Formats without RGB ordering return both flags `false`.
#[must_use]
pub fn fourcc_to_format(fourcc: FourCc) -> Option<(u32, bool, bool)> {
    let triple = match fourcc {
        FourCc::RGB565 => (ctl::FORMAT_RGB_565, false, false),
        FourCc::NV12 => (ctl::FORMAT_NV12, false, false),
        FourCc::XYUV8888 => (ctl::FORMAT_XYUV, false, false),
        FourCc::P010 => (ctl::FORMAT_P010, false, false),
        FourCc::P012 => (ctl::FORMAT_P012, false, false),
        FourCc::P016 => (ctl::FORMAT_P016, false, false),
        FourCc::Y210 => (ctl::FORMAT_Y210, false, false),
        FourCc::Y212 => (ctl::FORMAT_Y212, false, false),
        FourCc::Y216 => (ctl::FORMAT_Y216, false, false),
        FourCc::XVYU2101010 => (ctl::FORMAT_Y410, false, false),
        FourCc::XVYU12_16161616 => (ctl::FORMAT_Y412, false, false),
        FourCc::XVYU16161616 => (ctl::FORMAT_Y416, false, false),
        FourCc::XRGB8888 => (ctl::FORMAT_XRGB_8888, false, false),
        FourCc::ARGB8888 => (ctl::FORMAT_XRGB_8888, false, true),
        FourCc::XBGR8888 => (ctl::FORMAT_XRGB_8888, true, false),
        FourCc::ABGR8888 => (ctl::FORMAT_XRGB_8888, true, true),
        FourCc::XRGB2101010 => (ctl::FORMAT_XRGB_2101010, false, false),
        FourCc::ARGB2101010 => (ctl::FORMAT_XRGB_2101010, false, true),
        FourCc::XBGR2101010 => (ctl::FORMAT_XRGB_2101010, true, false),
        FourCc::ABGR2101010 => (ctl::FORMAT_XRGB_2101010, true, true),
        FourCc::XRGB16161616F => (ctl::FORMAT_XRGB_16161616F, false, false),
        FourCc::ARGB16161616F => (ctl::FORMAT_XRGB_16161616F, false, true),
        FourCc::XBGR16161616F => (ctl::FORMAT_XRGB_16161616F, true, false),
        FourCc::ABGR16161616F => (ctl::FORMAT_XRGB_16161616F, true, true),
        _ => return None,
    };
    Some(triple)
}
