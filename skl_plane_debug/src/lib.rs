// Copyright 2026 the skl_plane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pretty-printing and JSON export for `skl_plane` diagnostics.
//!
//! This crate provides [`TraceSink`](skl_plane_core::trace::TraceSink)
//! implementations for bring-up and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`json::JsonSink`]: collects events as JSON objects and exports them as
//!   a single array.

pub mod json;
pub mod pretty;
