// Copyright 2026 the skl_plane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Universal plane register field layout.
//!
//! Only the fields this crate decodes are listed. Values are the register
//! bits themselves (already shifted into place), so a field is extracted with
//! a plain mask.

/// Plane registers read during initial config capture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlaneReg {
    /// `PLANE_CTL`.
    Ctl,
    /// `PLANE_COLOR_CTL` (display version 10+).
    ColorCtl,
    /// `PLANE_SURF`.
    Surf,
    /// `PLANE_OFFSET`.
    Offset,
    /// `PLANE_POS`.
    Pos,
    /// `PLANE_SIZE`.
    Size,
    /// `PLANE_STRIDE`.
    Stride,
    /// `PLANE_AUX_DIST`.
    AuxDist,
}

/// `PLANE_CTL` fields.
pub mod ctl {
    /// Plane enable.
    pub const ENABLE: u32 = 1 << 31;

    /// Format field, display version 9 and 10.
    pub const FORMAT_MASK_SKL: u32 = 0xf << 24;
    /// Format field, display version 11+.
    pub const FORMAT_MASK_ICL: u32 = 0x1f << 23;

    /// Packed YUV 4:2:2.
    pub const FORMAT_YUV422: u32 = 0;
    /// Semi-planar YUV 4:2:0, 8 bit.
    pub const FORMAT_NV12: u32 = 1 << 24;
    /// RGB 10:10:10:2.
    pub const FORMAT_XRGB_2101010: u32 = 2 << 24;
    /// Semi-planar YUV 4:2:0, 10 bit.
    pub const FORMAT_P010: u32 = 3 << 24;
    /// RGB 8:8:8:8.
    pub const FORMAT_XRGB_8888: u32 = 4 << 24;
    /// Semi-planar YUV 4:2:0, 12 bit.
    pub const FORMAT_P012: u32 = 5 << 24;
    /// RGB half float 16:16:16:16.
    pub const FORMAT_XRGB_16161616F: u32 = 6 << 24;
    /// Semi-planar YUV 4:2:0, 16 bit.
    pub const FORMAT_P016: u32 = 7 << 24;
    /// Packed YUV 4:4:4, 8 bit.
    pub const FORMAT_XYUV: u32 = 8 << 24;
    /// 8-bit indexed.
    pub const FORMAT_INDEXED: u32 = 12 << 24;
    /// RGB 5:6:5.
    pub const FORMAT_RGB_565: u32 = 14 << 24;
    /// Packed YUV 4:2:2, 10 bit (display version 11+).
    pub const FORMAT_Y210: u32 = 1 << 23;
    /// Packed YUV 4:2:2, 12 bit (display version 11+).
    pub const FORMAT_Y212: u32 = 3 << 23;
    /// Packed YUV 4:2:2, 16 bit (display version 11+).
    pub const FORMAT_Y216: u32 = 5 << 23;
    /// Packed YUV 4:4:4, 10 bit (display version 11+).
    pub const FORMAT_Y410: u32 = 7 << 23;
    /// Packed YUV 4:4:4, 12 bit (display version 11+).
    pub const FORMAT_Y412: u32 = 9 << 23;
    /// Packed YUV 4:4:4, 16 bit (display version 11+).
    pub const FORMAT_Y416: u32 = 11 << 23;

    /// RGB channel order (set: RGBX, clear: BGRX in memory order).
    pub const ORDER_RGB: u32 = 1 << 20;

    /// Render decompression enable.
    pub const RENDER_DECOMPRESSION_ENABLE: u32 = 1 << 15;

    /// Tiling field.
    pub const TILED_MASK: u32 = 0x7 << 10;
    /// Linear.
    pub const TILED_LINEAR: u32 = 0;
    /// X tiled.
    pub const TILED_X: u32 = 1 << 10;
    /// Y tiled.
    pub const TILED_Y: u32 = 4 << 10;
    /// Yf tiled; Tile4 on parts that have it.
    pub const TILED_YF: u32 = 5 << 10;

    /// Horizontal flip (display version 11+).
    pub const FLIP_HORIZONTAL: u32 = 1 << 8;

    /// Alpha mode field (display version 9 only).
    pub const ALPHA_MASK: u32 = 0x3 << 4;

    /// Media decompression enable (display version 12+).
    pub const MEDIA_DECOMPRESSION_ENABLE: u32 = 1 << 4;

    /// Rotation field. Hardware rotation is clockwise.
    pub const ROTATE_MASK: u32 = 0x3;
    /// No rotation.
    pub const ROTATE_0: u32 = 0;
    /// 90 degrees clockwise.
    pub const ROTATE_90: u32 = 1;
    /// 180 degrees.
    pub const ROTATE_180: u32 = 2;
    /// 270 degrees clockwise.
    pub const ROTATE_270: u32 = 3;
}

/// `PLANE_COLOR_CTL` fields.
pub mod color_ctl {
    /// Alpha mode field (display version 10+).
    pub const ALPHA_MASK: u32 = 0x3 << 4;
}

/// `PLANE_SURF` fields.
pub mod surf {
    /// Surface base address, 4 KiB aligned.
    pub const ADDR_MASK: u32 = 0xffff_f000;
}

/// `PLANE_OFFSET`, `PLANE_POS` and `PLANE_SIZE` share a y-high/x-low layout.
pub mod xy {
    /// Y (or height) field.
    pub const Y_MASK: u32 = 0x1fff << 16;
    /// Y field shift.
    pub const Y_SHIFT: u32 = 16;
    /// X (or width) field.
    pub const X_MASK: u32 = 0x1fff;
}

/// `PLANE_STRIDE` fields.
pub mod stride {
    /// Stride in units of 64 bytes (linear) or tile widths (tiled).
    pub const MASK: u32 = 0xfff;
}

/// `PLANE_AUX_DIST` fields.
pub mod aux_dist {
    /// Distance from the main surface, 4 KiB aligned.
    pub const DIST_MASK: u32 = 0xffff_f000;
    /// AUX stride minus one, in tiles (display version 9 to 11).
    pub const STRIDE_MASK: u32 = 0xfff;
}
