// Copyright 2026 the skl_plane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The plane lifecycle manager.
//!
//! A [`Display`] owns everything one display engine needs to manage its
//! planes: the capability registry, the geometry engine, the plane state
//! store and a [`Tracer`]. The orchestrator drives it in this order:
//!
//! ```text
//!   create_plane ── once per slot at attach
//!        │
//!   capture_initial_config / fixup_initial_config ── once, optional
//!        │
//!   ┌─ per commit ───────────────────────────────────────────┐
//!   │ create_state → (link) → check → commit → discard old   │
//!   └────────────────────────────────────────────────────────┘
//! ```
//!
//! All methods take `&mut self`, so transitions on one display are
//! serialised by construction.

use crate::caps::CapabilityRegistry;
use crate::config::DisplayConfig;
use crate::error::PlaneError;
use crate::fb::Framebuffer;
use crate::geometry::SurfaceGeometry;
use crate::id::{PipeId, PlaneId, StateId};
use crate::plane::Plane;
use crate::state::{CheckStatus, PlaneState, PlaneStateStore};
use crate::trace::{LinkEvent, PlaneCreatedEvent, Tracer};

/// Plane management for one display engine.
#[derive(Debug)]
pub struct Display<'t> {
    config: DisplayConfig,
    registry: CapabilityRegistry,
    pub(crate) geometry: SurfaceGeometry,
    pub(crate) store: PlaneStateStore,
    pub(crate) tracer: Tracer<'t>,
}

impl<'t> Display<'t> {
    /// Creates a display without tracing.
    #[must_use]
    pub fn new(config: DisplayConfig) -> Self {
        Self::with_tracer(config, Tracer::none())
    }

    /// Creates a display that reports to `tracer`.
    #[must_use]
    pub fn with_tracer(config: DisplayConfig, tracer: Tracer<'t>) -> Self {
        Self {
            config,
            registry: CapabilityRegistry::new(config),
            geometry: SurfaceGeometry::new(config.revision),
            store: PlaneStateStore::new(),
            tracer,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// Returns the capability registry.
    #[must_use]
    pub const fn registry(&self) -> &CapabilityRegistry {
        &self.registry
    }

    /// Returns the geometry engine.
    #[must_use]
    pub const fn geometry(&self) -> &SurfaceGeometry {
        &self.geometry
    }

    /// Returns the plane state store.
    #[must_use]
    pub const fn store(&self) -> &PlaneStateStore {
        &self.store
    }

    /// Returns the plane state store for direct mutation.
    pub fn store_mut(&mut self) -> &mut PlaneStateStore {
        &mut self.store
    }

    // -- Lifecycle --

    /// Creates the plane object for a hardware slot.
    ///
    /// The plane starts with no active state and an uncaptured initial
    /// configuration.
    ///
    /// # Errors
    ///
    /// [`PlaneError::NoSuchPipe`] or [`PlaneError::NoSuchPlane`] when the
    /// hardware lacks the slot.
    pub fn create_plane(&mut self, pipe: PipeId, id: PlaneId) -> Result<Plane, PlaneError> {
        let caps = self.registry.plane_caps(pipe, id)?;
        self.tracer.plane_created(&PlaneCreatedEvent {
            pipe,
            plane: id,
            caps,
        });
        Ok(Plane::new(pipe, id, caps, self.geometry))
    }

    /// Creates a pending state for `plane` showing the whole framebuffer.
    pub fn create_state(&mut self, plane: &Plane, fb: Framebuffer) -> StateId {
        self.store
            .create(PlaneState::new(plane.pipe(), plane.id(), fb))
    }

    /// Discards a state, severing its link first.
    ///
    /// Discarding the state a plane has committed is the caller's
    /// responsibility to avoid.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn discard(&mut self, id: StateId) {
        if let Some((uv, y)) = self.store.pair(id) {
            self.tracer.planes_unlinked(&LinkEvent { uv, y });
        }
        self.store.discard(id);
    }

    // -- Companion links --

    /// Links `uv` and `y` as the two halves of a semi-planar scan-out.
    ///
    /// Former partners of either state are unlinked first.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale or if `uv == y`.
    pub fn link(&mut self, uv: StateId, y: StateId) {
        let previous = [self.store.pair(uv), self.store.pair(y)];
        self.store.link(uv, y);
        if let Some((old_uv, old_y)) = previous[0] {
            self.tracer.planes_unlinked(&LinkEvent { uv: old_uv, y: old_y });
        }
        if let Some((old_uv, old_y)) = previous[1].filter(|p| Some(*p) != previous[0]) {
            self.tracer.planes_unlinked(&LinkEvent { uv: old_uv, y: old_y });
        }
        self.tracer.planes_linked(&LinkEvent { uv, y });
    }

    /// Severs the link of `id` on both sides and returns the former
    /// companion.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn unlink(&mut self, id: StateId) -> Option<StateId> {
        let pair = self.store.pair(id);
        let former = self.store.unlink(id);
        if let Some((uv, y)) = pair {
            self.tracer.planes_unlinked(&LinkEvent { uv, y });
        }
        former
    }

    // -- Commit --

    /// Makes a checked state the active state of `plane`.
    ///
    /// Returns the previously active state, if it differs from `id`, so the
    /// caller can discard it.
    ///
    /// # Errors
    ///
    /// - [`PlaneError::WrongPlane`] if the state was created for another
    ///   plane.
    /// - The rejection error if the last check of the state failed, and
    ///   [`PlaneError::NotChecked`] if it has not been checked since its last
    ///   change.
    /// - [`PlaneError::NotChecked`] if the state is linked and its companion
    ///   is not checked.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn commit(&mut self, plane: &mut Plane, id: StateId) -> Result<Option<StateId>, PlaneError> {
        let actual = self.store.state(id).key();
        if actual != plane.key() {
            return Err(PlaneError::WrongPlane {
                expected: plane.key(),
                actual,
            });
        }
        match self.store.status(id) {
            CheckStatus::Checked => {}
            CheckStatus::Rejected(err) => return Err(err),
            CheckStatus::Pending => return Err(PlaneError::NotChecked),
        }
        if let Some(companion) = self.store.companion(id)
            && self.store.status(companion) != CheckStatus::Checked
        {
            return Err(PlaneError::NotChecked);
        }
        let previous = plane.active.replace(id);
        Ok(previous.filter(|&p| p != id))
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use kurbo::Rect;

    use super::*;
    use crate::config::DisplayRevision;
    use crate::format::FourCc;
    use crate::id::PlaneMask;
    use crate::tiling::Tiling;

    const REVISIONS: [DisplayRevision; 9] = [
        DisplayRevision::Skylake,
        DisplayRevision::Broxton,
        DisplayRevision::Kabylake,
        DisplayRevision::Geminilake,
        DisplayRevision::Icelake,
        DisplayRevision::Tigerlake,
        DisplayRevision::Rocketlake,
        DisplayRevision::Alderlake,
        DisplayRevision::Dg2,
    ];

    fn xrgb(w: u32, h: u32) -> Framebuffer {
        Framebuffer::new(FourCc::XRGB8888, Tiling::X, w, h).unwrap()
    }

    #[test]
    fn planes_match_capability_table() {
        for revision in REVISIONS {
            let config = DisplayConfig::new(revision);
            let mut display = Display::new(config);
            for pipe in PipeId::ALL {
                for id in PlaneId::ALL {
                    if !config.has_plane(pipe, id) {
                        assert!(display.create_plane(pipe, id).is_err());
                        continue;
                    }
                    let plane = display.create_plane(pipe, id).unwrap();
                    let reg = display.registry();
                    assert_eq!(plane.key(), (pipe, id));
                    assert_eq!(plane.active(), None);
                    if id == PlaneId::Cursor {
                        assert!(!plane.caps().nv12_y && !plane.caps().hdr);
                    } else {
                        assert_eq!(plane.caps().nv12_y, reg.is_nv12_y_capable(id));
                        assert_eq!(plane.caps().hdr, reg.is_hdr_capable(id));
                        assert_eq!(plane.caps().planar, reg.has_planar(pipe, id));
                    }
                }
            }
        }
    }

    #[test]
    fn missing_slots_are_errors() {
        let mut display = Display::new(DisplayConfig::skylake());
        assert_eq!(
            display.create_plane(PipeId::C, PlaneId::Sprite1),
            Err(PlaneError::NoSuchPlane(PipeId::C, PlaneId::Sprite1))
        );
        assert_eq!(
            display.create_plane(PipeId::D, PlaneId::Primary),
            Err(PlaneError::NoSuchPipe(PipeId::D))
        );
    }

    #[test]
    fn y_capable_planes_on_icelake() {
        let mut display = Display::new(DisplayConfig::icelake());
        let y_planes: Vec<_> = PlaneId::ALL
            .into_iter()
            .filter(|&id| display.create_plane(PipeId::A, id).unwrap().caps().nv12_y)
            .collect();
        assert_eq!(y_planes, [PlaneId::Sprite4, PlaneId::Sprite5]);
        assert_eq!(
            display.registry().hdr_capable_mask(),
            PlaneMask::from_planes(&[PlaneId::Primary, PlaneId::Sprite0, PlaneId::Sprite1])
        );
    }

    #[test]
    fn commit_flow() {
        let mut display = Display::new(DisplayConfig::skylake());
        let mut plane = display.create_plane(PipeId::A, PlaneId::Primary).unwrap();

        let first = display.create_state(&plane, xrgb(1920, 1080));
        assert_eq!(
            display.commit(&mut plane, first),
            Err(PlaneError::NotChecked)
        );
        display.check(first).unwrap();
        assert_eq!(display.commit(&mut plane, first), Ok(None));
        assert_eq!(plane.active(), Some(first));
        // Committing the active state again is a no-op.
        assert_eq!(display.commit(&mut plane, first), Ok(None));

        let second = display.create_state(&plane, xrgb(1280, 720));
        display.check(second).unwrap();
        assert_eq!(display.commit(&mut plane, second), Ok(Some(first)));
        display.discard(first);
        assert_eq!(display.store().live_count(), 1);
    }

    #[test]
    fn commit_rejects_foreign_state() {
        let mut display = Display::new(DisplayConfig::skylake());
        let primary = display.create_plane(PipeId::A, PlaneId::Primary).unwrap();
        let mut sprite = display.create_plane(PipeId::A, PlaneId::Sprite0).unwrap();
        let id = display.create_state(&primary, xrgb(64, 64));
        display.check(id).unwrap();
        assert_eq!(
            display.commit(&mut sprite, id),
            Err(PlaneError::WrongPlane {
                expected: (PipeId::A, PlaneId::Sprite0),
                actual: (PipeId::A, PlaneId::Primary),
            })
        );
    }

    #[test]
    fn commit_reports_rejection() {
        let mut display = Display::new(DisplayConfig::skylake());
        let mut plane = display.create_plane(PipeId::A, PlaneId::Primary).unwrap();
        let id = display.create_state(&plane, xrgb(64, 64));
        display
            .store_mut()
            .set_src(id, Rect::new(0.0, 0.0, 128.0, 64.0));
        assert_eq!(display.check(id), Err(PlaneError::SourceOutOfBounds));
        assert_eq!(
            display.commit(&mut plane, id),
            Err(PlaneError::SourceOutOfBounds)
        );
    }

    #[test]
    fn link_and_unlink_round_trip() {
        let mut display = Display::new(DisplayConfig::icelake());
        let uv_plane = display.create_plane(PipeId::A, PlaneId::Primary).unwrap();
        let y_plane = display.create_plane(PipeId::A, PlaneId::Sprite4).unwrap();
        let fb = Framebuffer::new(FourCc::NV12, Tiling::Y, 256, 128).unwrap();
        let uv = display.create_state(&uv_plane, fb);
        let y = display.create_state(&y_plane, fb);
        display.link(uv, y);
        assert_eq!(display.store().companion(uv), Some(y));
        assert_eq!(display.unlink(y), Some(uv));
        assert_eq!(display.store().companion(uv), None);
        assert_eq!(display.unlink(y), None);
    }
}
