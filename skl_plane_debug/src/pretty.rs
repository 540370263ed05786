// Copyright 2026 the skl_plane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use skl_plane_core::trace::{
    FixupEvent, InitialConfigEvent, LinkEvent, OffsetComputedEvent, PlaneCreatedEvent,
    StateCheckedEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_plane_created(&mut self, e: &PlaneCreatedEvent) {
        let _ = writeln!(
            self.writer,
            "[plane] {:?}/{:?} nv12_y={} hdr={} planar={} ccs={} formats={} tilings={}",
            e.pipe,
            e.plane,
            e.caps.nv12_y,
            e.caps.hdr,
            e.caps.planar,
            e.caps.ccs,
            e.caps.formats().len(),
            e.caps.tilings().len(),
        );
    }

    fn on_offset_computed(&mut self, e: &OffsetComputedEvent) {
        let _ = writeln!(
            self.writer,
            "[offset] {:?} plane={} surf+{:#x} x={} y={} aux={:#x}",
            e.state, e.color_plane, e.offset.offset, e.offset.x, e.offset.y, e.aux_distance,
        );
    }

    fn on_planes_linked(&mut self, e: &LinkEvent) {
        let _ = writeln!(self.writer, "[link] uv={:?} y={:?}", e.uv, e.y);
    }

    fn on_planes_unlinked(&mut self, e: &LinkEvent) {
        let _ = writeln!(self.writer, "[unlink] uv={:?} y={:?}", e.uv, e.y);
    }

    fn on_state_checked(&mut self, e: &StateCheckedEvent) {
        let _ = match e.result {
            Ok(()) => writeln!(
                self.writer,
                "[check] {:?} {:?}/{:?} ok",
                e.state, e.pipe, e.plane,
            ),
            Err(err) => writeln!(
                self.writer,
                "[check] {:?} {:?}/{:?} REJECTED: {err}",
                e.state, e.pipe, e.plane,
            ),
        };
    }

    fn on_initial_config(&mut self, e: &InitialConfigEvent) {
        let c = &e.config;
        let _ = writeln!(
            self.writer,
            "[initial] {:?}/{:?} format={:#x} tiling={:?} base={:#x} {}x{}+{}+{} stride={}",
            e.pipe, e.plane, c.format, c.tiling, c.base, c.width, c.height, c.x, c.y, c.stride,
        );
    }

    fn on_fixup(&mut self, e: &FixupEvent) {
        let _ = match e.result {
            Ok(state) => writeln!(
                self.writer,
                "[fixup] {:?}/{:?} validated as {state:?}",
                e.pipe, e.plane,
            ),
            Err(reason) => writeln!(
                self.writer,
                "[fixup] {:?}/{:?} REJECTED: {reason}",
                e.pipe, e.plane,
            ),
        };
    }
}
