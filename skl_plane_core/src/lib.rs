// Copyright 2026 the skl_plane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Universal plane resources and surface geometry for Skylake-family display
//! engines.
//!
//! `skl_plane_core` decides, before a frame is shown, whether each hardware
//! plane can scan out a given framebuffer and where in that framebuffer the
//! scan-out starts. It is `no_std` compatible (with `alloc`), performs no
//! register I/O of its own, and passes the display revision explicitly to
//! everything that depends on it.
//!
//! # Architecture
//!
//! ```text
//!   DisplayConfig ──► CapabilityRegistry ──► Display::create_plane() ──► Plane
//!                                                                          │
//!                 ┌────────────────────────────────────────────────────────┘
//!                 ▼
//!   Display::create_state() ──► PlaneStateStore::link() (NV12 pairs)
//!                 │
//!                 ▼
//!   Display::check() ──► SurfaceGeometry ──► offsets + AUX distances
//!                 │
//!                 ▼
//!   Display::commit() ──► Plane::active()
//! ```
//!
//! **[`caps`]**: per-revision capability tables, resolved once. Answers which
//! planes can be the Y half of an NV12 pair, which have HDR processing, and
//! which formats and tilings each slot accepts.
//!
//! **[`format`]**: translation between `PLANE_CTL` format codes and `FourCC`
//! pixel formats, plus the layout facts of each format.
//!
//! **[`geometry`]**: surface offset and AUX distance computation over the
//! [`tiling`] model and the [`fb`] colour plane layout.
//!
//! **[`state`]**: struct-of-arrays plane state store with generational
//! handles and the symmetric NV12 companion link. Changes are tracked through
//! [`dirty`] channels.
//!
//! **[`display`]**: plane lifecycle (create, check, commit) for one display
//! engine. [`initial`] adds the takeover of the firmware configuration
//! through the [`PlaneRegisters`](initial::PlaneRegisters) seam.
//!
//! **[`bandwidth`]**: DDB allocations and watermark levels computed
//! elsewhere and attached to states as opaque values.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types, with
//! the zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod bandwidth;
pub mod caps;
mod check;
pub mod config;
pub mod dirty;
pub mod display;
pub mod error;
pub mod fb;
pub mod format;
pub mod geometry;
pub mod id;
pub mod initial;
pub mod plane;
pub mod regs;
pub mod state;
pub mod tiling;
pub mod trace;
