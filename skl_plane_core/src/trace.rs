// Copyright 2026 the skl_plane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for plane management.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! [`Display`](crate::display::Display) calls as planes are created, states
//! are linked and checked, and the firmware configuration is taken over. All
//! method bodies default to no-ops, so implementing only the events you care
//! about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing. When **on**, each
//! method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace` enables the `Tracer` method bodies (one branch per call).

use crate::caps::PlaneCaps;
use crate::error::PlaneError;
use crate::geometry::SurfaceOffset;
use crate::id::{PipeId, PlaneId, StateId};
use crate::initial::{FixupRejection, InitialPlaneConfig};

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a plane object is created.
#[derive(Clone, Copy, Debug)]
pub struct PlaneCreatedEvent {
    /// Owning pipe.
    pub pipe: PipeId,
    /// Plane slot.
    pub plane: PlaneId,
    /// Capabilities resolved for the slot.
    pub caps: PlaneCaps,
}

/// Emitted for every main colour plane offset computed during a check.
#[derive(Clone, Copy, Debug)]
pub struct OffsetComputedEvent {
    /// State being checked.
    pub state: StateId,
    /// Main colour plane index.
    pub color_plane: usize,
    /// Computed surface offset.
    pub offset: SurfaceOffset,
    /// Computed AUX distance register value (0 without an AUX surface).
    pub aux_distance: u32,
}

/// Emitted when two states are linked as a semi-planar pair.
#[derive(Clone, Copy, Debug)]
pub struct LinkEvent {
    /// The UV (chroma) half.
    pub uv: StateId,
    /// The Y (luma) half.
    pub y: StateId,
}

/// Emitted after a state has been checked.
#[derive(Clone, Copy, Debug)]
pub struct StateCheckedEvent {
    /// State that was checked.
    pub state: StateId,
    /// Owning pipe.
    pub pipe: PipeId,
    /// Plane slot.
    pub plane: PlaneId,
    /// Outcome of the check.
    pub result: Result<(), PlaneError>,
}

/// Emitted when the firmware configuration of a plane has been read.
#[derive(Clone, Copy, Debug)]
pub struct InitialConfigEvent {
    /// Owning pipe.
    pub pipe: PipeId,
    /// Plane slot.
    pub plane: PlaneId,
    /// Decoded register snapshot.
    pub config: InitialPlaneConfig,
}

/// Emitted when the firmware configuration has been accepted or rejected.
#[derive(Clone, Copy, Debug)]
pub struct FixupEvent {
    /// Owning pipe.
    pub pipe: PipeId,
    /// Plane slot.
    pub plane: PlaneId,
    /// The committed state, or why the configuration was rejected.
    pub result: Result<StateId, FixupRejection>,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from plane management.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a plane is created.
    fn on_plane_created(&mut self, e: &PlaneCreatedEvent) {
        _ = e;
    }

    /// Called for every computed surface offset.
    fn on_offset_computed(&mut self, e: &OffsetComputedEvent) {
        _ = e;
    }

    /// Called when two states are linked.
    fn on_planes_linked(&mut self, e: &LinkEvent) {
        _ = e;
    }

    /// Called when a link is severed.
    fn on_planes_unlinked(&mut self, e: &LinkEvent) {
        _ = e;
    }

    /// Called after a state is checked.
    fn on_state_checked(&mut self, e: &StateCheckedEvent) {
        _ = e;
    }

    /// Called when the firmware configuration has been captured.
    fn on_initial_config(&mut self, e: &InitialConfigEvent) {
        _ = e;
    }

    /// Called with the outcome of the initial configuration fixup.
    fn on_fixup(&mut self, e: &FixupEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`PlaneCreatedEvent`].
    #[inline]
    pub fn plane_created(&mut self, e: &PlaneCreatedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_plane_created(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`OffsetComputedEvent`].
    #[inline]
    pub fn offset_computed(&mut self, e: &OffsetComputedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_offset_computed(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`LinkEvent`] for a new link.
    #[inline]
    pub fn planes_linked(&mut self, e: &LinkEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_planes_linked(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`LinkEvent`] for a severed link.
    #[inline]
    pub fn planes_unlinked(&mut self, e: &LinkEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_planes_unlinked(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`StateCheckedEvent`].
    #[inline]
    pub fn state_checked(&mut self, e: &StateCheckedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_state_checked(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`InitialConfigEvent`].
    #[inline]
    pub fn initial_config(&mut self, e: &InitialConfigEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_initial_config(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`FixupEvent`].
    #[inline]
    pub fn fixup(&mut self, e: &FixupEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_fixup(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Returns whether a sink is attached.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        #[cfg(feature = "trace")]
        {
            self.sink.is_some()
        }
        #[cfg(not(feature = "trace"))]
        {
            false
        }
    }
}
