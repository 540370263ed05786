// Copyright 2026 the skl_plane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-slot plane object.

use crate::caps::PlaneCaps;
use crate::geometry::SurfaceGeometry;
use crate::id::{PipeId, PlaneId, StateId};
use crate::initial::InitialConfigStatus;

/// A hardware plane slot owned by one pipe.
///
/// Created by [`Display::create_plane`](crate::display::Display::create_plane)
/// with capabilities fixed for its lifetime. The active state handle changes
/// on every [`commit`](crate::display::Display::commit).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Plane {
    pub(crate) pipe: PipeId,
    pub(crate) id: PlaneId,
    pub(crate) caps: PlaneCaps,
    pub(crate) geometry: SurfaceGeometry,
    pub(crate) active: Option<StateId>,
    pub(crate) initial: InitialConfigStatus,
}

impl Plane {
    pub(crate) const fn new(
        pipe: PipeId,
        id: PlaneId,
        caps: PlaneCaps,
        geometry: SurfaceGeometry,
    ) -> Self {
        Self {
            pipe,
            id,
            caps,
            geometry,
            active: None,
            initial: InitialConfigStatus::Uncaptured,
        }
    }

    /// Owning pipe.
    #[must_use]
    pub const fn pipe(&self) -> PipeId {
        self.pipe
    }

    /// Plane slot.
    #[must_use]
    pub const fn id(&self) -> PlaneId {
        self.id
    }

    /// `(pipe, id)`, the key every state of this plane carries.
    #[must_use]
    pub const fn key(&self) -> (PipeId, PlaneId) {
        (self.pipe, self.id)
    }

    /// Capabilities resolved at creation.
    #[must_use]
    pub const fn caps(&self) -> &PlaneCaps {
        &self.caps
    }

    /// Geometry engine bound to the plane's display revision.
    #[must_use]
    pub const fn geometry(&self) -> &SurfaceGeometry {
        &self.geometry
    }

    /// The committed state, if any.
    #[must_use]
    pub const fn active(&self) -> Option<StateId> {
        self.active
    }

    /// Progress of the firmware configuration takeover.
    #[must_use]
    pub const fn initial_status(&self) -> InitialConfigStatus {
        self.initial
    }
}
