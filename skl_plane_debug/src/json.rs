// Copyright 2026 the skl_plane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON event log.
//!
//! [`JsonSink`] collects every trace event as a [`serde_json::Value`] and
//! [`JsonSink::export`] writes them as one JSON array, in arrival order. Each
//! object carries an `"event"` name plus the event's fields.

use std::io::{self, Write};

use serde_json::{Value, json};

use skl_plane_core::id::{PipeId, PlaneId, StateId};
use skl_plane_core::trace::{
    FixupEvent, InitialConfigEvent, LinkEvent, OffsetComputedEvent, PlaneCreatedEvent,
    StateCheckedEvent, TraceSink,
};

/// Collects trace events as JSON values.
#[derive(Debug, Default)]
pub struct JsonSink {
    events: Vec<Value>,
}

impl JsonSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the events collected so far.
    #[must_use]
    pub fn events(&self) -> &[Value] {
        &self.events
    }

    /// Writes the collected events as a pretty-printed JSON array.
    pub fn export(&self, writer: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer_pretty(writer, &self.events)?;
        Ok(())
    }
}

fn slot(pipe: PipeId, plane: PlaneId) -> Value {
    json!({
        "pipe": format!("{pipe:?}"),
        "plane": format!("{plane:?}"),
    })
}

fn state(id: StateId) -> Value {
    json!({
        "index": id.index(),
        "generation": id.generation(),
    })
}

impl TraceSink for JsonSink {
    fn on_plane_created(&mut self, e: &PlaneCreatedEvent) {
        let formats: Vec<String> = e.caps.formats().iter().map(|f| format!("{f:?}")).collect();
        let tilings: Vec<String> = e.caps.tilings().iter().map(|t| format!("{t:?}")).collect();
        self.events.push(json!({
            "event": "PlaneCreated",
            "slot": slot(e.pipe, e.plane),
            "caps": {
                "nv12_y": e.caps.nv12_y,
                "hdr": e.caps.hdr,
                "planar": e.caps.planar,
                "ccs": e.caps.ccs,
                "formats": formats,
                "tilings": tilings,
            }
        }));
    }

    fn on_offset_computed(&mut self, e: &OffsetComputedEvent) {
        self.events.push(json!({
            "event": "OffsetComputed",
            "state": state(e.state),
            "color_plane": e.color_plane,
            "offset": e.offset.offset,
            "x": e.offset.x,
            "y": e.offset.y,
            "aux_distance": e.aux_distance,
        }));
    }

    fn on_planes_linked(&mut self, e: &LinkEvent) {
        self.events.push(json!({
            "event": "PlanesLinked",
            "uv": state(e.uv),
            "y": state(e.y),
        }));
    }

    fn on_planes_unlinked(&mut self, e: &LinkEvent) {
        self.events.push(json!({
            "event": "PlanesUnlinked",
            "uv": state(e.uv),
            "y": state(e.y),
        }));
    }

    fn on_state_checked(&mut self, e: &StateCheckedEvent) {
        self.events.push(json!({
            "event": "StateChecked",
            "state": state(e.state),
            "slot": slot(e.pipe, e.plane),
            "ok": e.result.is_ok(),
            "error": e.result.err().map(|err| err.to_string()),
        }));
    }

    fn on_initial_config(&mut self, e: &InitialConfigEvent) {
        let c = &e.config;
        self.events.push(json!({
            "event": "InitialConfigCaptured",
            "slot": slot(e.pipe, e.plane),
            "format": c.format,
            "rgb_order": c.rgb_order,
            "alpha": c.alpha,
            "tiling": format!("{:?}", c.tiling),
            "rotation": format!("{:?}", c.rotation),
            "reflect_x": c.reflect_x,
            "base": c.base,
            "x": c.x,
            "y": c.y,
            "width": c.width,
            "height": c.height,
            "stride": c.stride,
            "pos": [c.pos_x, c.pos_y],
            "aux_dist": c.aux_dist,
        }));
    }

    fn on_fixup(&mut self, e: &FixupEvent) {
        self.events.push(json!({
            "event": "Fixup",
            "slot": slot(e.pipe, e.plane),
            "validated": e.result.is_ok(),
            "state": e.result.ok().map(state),
            "reason": e.result.err().map(|reason| reason.to_string()),
        }));
    }
}

#[cfg(test)]
mod tests {
    use skl_plane_core::config::DisplayConfig;
    use skl_plane_core::display::Display;
    use skl_plane_core::initial::PlaneRegisters;
    use skl_plane_core::regs::{PlaneReg, ctl};
    use skl_plane_core::trace::Tracer;

    use super::*;

    /// An enabled 64x64 linear XRGB8888 plane.
    struct BootPlane;

    impl PlaneRegisters for BootPlane {
        fn read(&self, _: PipeId, _: PlaneId, reg: PlaneReg) -> u32 {
            match reg {
                PlaneReg::Ctl => ctl::ENABLE | ctl::FORMAT_XRGB_8888 | ctl::TILED_LINEAR,
                PlaneReg::Size => (63 << 16) | 63,
                // 256 bytes in 64-byte units.
                PlaneReg::Stride => 4,
                _ => 0,
            }
        }
    }

    #[test]
    fn takeover_is_logged() {
        let mut sink = JsonSink::new();
        {
            let mut display =
                Display::with_tracer(DisplayConfig::skylake(), Tracer::new(&mut sink));
            let mut plane = display.create_plane(PipeId::A, PlaneId::Primary).unwrap();
            let config = display
                .capture_initial_config(&mut plane, &BootPlane)
                .unwrap();
            assert!(display.fixup_initial_config(&mut plane, &config));
        }
        let names: Vec<&str> = sink
            .events()
            .iter()
            .filter_map(|e| e["event"].as_str())
            .collect();
        assert_eq!(
            names,
            [
                "PlaneCreated",
                "InitialConfigCaptured",
                "OffsetComputed",
                "StateChecked",
                "Fixup",
            ]
        );
        let fixup = &sink.events()[4];
        assert_eq!(fixup["validated"], true);
        assert_eq!(fixup["slot"]["plane"], "Primary");
    }

    #[test]
    fn export_produces_valid_json() {
        let mut sink = JsonSink::new();
        {
            let mut display =
                Display::with_tracer(DisplayConfig::tigerlake(), Tracer::new(&mut sink));
            display.create_plane(PipeId::D, PlaneId::Sprite4).unwrap();
            assert!(display.create_plane(PipeId::D, PlaneId::Sprite5).is_ok());
        }
        let mut out = Vec::new();
        sink.export(&mut out).unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&String::from_utf8(out).unwrap()).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0]["caps"]["nv12_y"], true);
        assert_eq!(parsed[1]["slot"]["pipe"], "D");
    }

    #[test]
    fn export_empty_log() {
        let mut out = Vec::new();
        JsonSink::new().export(&mut out).unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&String::from_utf8(out).unwrap()).unwrap();
        assert!(parsed.is_empty());
    }
}
