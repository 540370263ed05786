// Copyright 2026 the skl_plane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plane states and the NV12 companion linker.
//!
//! A [`PlaneState`] is one candidate configuration of a plane. States live in
//! a [`PlaneStateStore`] and are addressed by generational [`StateId`]
//! handles; the store keeps the computed results (offsets, AUX distances,
//! check status, bandwidth) in parallel arrays next to them.
//!
//! On linked planar hardware a semi-planar framebuffer is scanned out by two
//! planes: the UV half, which carries the framebuffer, and the Y half, which
//! mirrors it. The link is a mutual index pair:
//!
//! ```text
//!   companion[uv] = y      role[uv] = Uv
//!   companion[y]  = uv     role[y]  = Y
//! ```
//!
//! Linking or unlinking always writes both sides, so a half-link never
//! survives. A dirty dependency from the Y half to the UV half sends both back
//! to [`CheckStatus::Pending`] when the UV half's geometry changes.

use alloc::vec::Vec;
use core::ops::Range;

use kurbo::Rect;
use understory_dirty::{CycleHandling, DirtyTracker, EagerPolicy};

use crate::bandwidth::PlaneBandwidth;
use crate::dirty;
use crate::error::PlaneError;
use crate::fb::Framebuffer;
use crate::geometry::{Rotation, SurfaceOffset};
use crate::id::{INVALID, PipeId, PlaneId, StateId};

/// Maximum number of main colour planes a state computes offsets for.
pub const MAX_MAIN_PLANES: usize = 2;

/// One candidate configuration of a plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaneState {
    /// Pipe of the plane this state belongs to.
    pub pipe: PipeId,
    /// Plane this state belongs to.
    pub plane: PlaneId,
    /// Framebuffer to scan out.
    pub fb: Framebuffer,
    /// Source rectangle, in framebuffer pixels.
    pub src: Rect,
    /// Destination rectangle, in pipe pixels.
    pub dst: Rect,
    /// Rotation, counter-clockwise.
    pub rotation: Rotation,
    /// Horizontal mirroring, applied before rotation.
    pub reflect_x: bool,
}

impl PlaneState {
    /// Creates a state showing the whole framebuffer at the pipe origin.
    #[must_use]
    pub fn new(pipe: PipeId, plane: PlaneId, fb: Framebuffer) -> Self {
        let full = Rect::new(0.0, 0.0, f64::from(fb.width()), f64::from(fb.height()));
        Self {
            pipe,
            plane,
            fb,
            src: full,
            dst: full,
            rotation: Rotation::Rotate0,
            reflect_x: false,
        }
    }

    /// Returns the `(pipe, plane)` key of the plane this state belongs to.
    #[must_use]
    pub const fn key(&self) -> (PipeId, PlaneId) {
        (self.pipe, self.plane)
    }

    /// Returns whether the scan-out configuration (everything except the
    /// owning plane) matches `other`.
    #[must_use]
    pub fn same_scanout(&self, other: &Self) -> bool {
        self.fb == other.fb
            && self.src == other.src
            && self.dst == other.dst
            && self.rotation == other.rotation
            && self.reflect_x == other.reflect_x
    }
}

/// Role of a state in a linked semi-planar pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PlanarRole {
    /// Not linked.
    #[default]
    Unlinked,
    /// Chroma half; owns the framebuffer.
    Uv,
    /// Luma half; mirrors its UV companion.
    Y,
}

impl PlanarRole {
    /// Returns the colour plane a plane in this role scans out.
    #[must_use]
    pub const fn color_plane(self) -> usize {
        match self {
            Self::Uv => 1,
            Self::Unlinked | Self::Y => 0,
        }
    }

    /// Returns the colour planes a state in this role scans out, given the
    /// number of main planes of its framebuffer.
    ///
    /// An unlinked plane scans every main plane. Each half of a linked pair
    /// scans only its own.
    #[must_use]
    pub fn scanned_planes(self, main_planes: usize) -> Range<usize> {
        match self {
            Self::Unlinked => 0..main_planes,
            Self::Uv | Self::Y => {
                let cp = self.color_plane();
                cp..(cp + 1).min(main_planes)
            }
        }
    }
}

/// Outcome of the most recent atomic check of a state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CheckStatus {
    /// Not checked since the last change.
    #[default]
    Pending,
    /// Passed; offsets and AUX distances are valid.
    Checked,
    /// Failed with the given error.
    Rejected(PlaneError),
}

/// Struct-of-arrays storage for plane states.
///
/// Discarded states are recycled via a free list, and generation counters
/// make stale handles fail validation.
#[derive(Debug)]
pub struct PlaneStateStore {
    // -- Configuration (set by callers) --
    pub(crate) state: Vec<PlaneState>,
    pub(crate) bandwidth: Vec<Option<PlaneBandwidth>>,

    // -- Companion link --
    pub(crate) companion: Vec<u32>,
    pub(crate) role: Vec<PlanarRole>,

    // -- Computed (written by the atomic check) --
    pub(crate) status: Vec<CheckStatus>,
    pub(crate) offsets: Vec<[SurfaceOffset; MAX_MAIN_PLANES]>,
    pub(crate) aux_distance: Vec<[u32; MAX_MAIN_PLANES]>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,

    // -- Dirty tracking --
    pub(crate) dirty: DirtyTracker<u32>,
}

impl Default for PlaneStateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaneStateStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Vec::new(),
            bandwidth: Vec::new(),
            companion: Vec::new(),
            role: Vec::new(),
            status: Vec::new(),
            offsets: Vec::new(),
            aux_distance: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
        }
    }

    // -- Allocation API --

    /// Adds a state and returns its handle. The state starts
    /// [`Pending`](CheckStatus::Pending) and unlinked.
    pub fn create(&mut self, state: PlaneState) -> StateId {
        let idx = if let Some(idx) = self.free_list.pop() {
            let i = idx as usize;
            self.generation[i] += 1;
            self.state[i] = state;
            self.bandwidth[i] = None;
            self.companion[i] = INVALID;
            self.role[i] = PlanarRole::Unlinked;
            self.status[i] = CheckStatus::Pending;
            self.offsets[i] = [SurfaceOffset::default(); MAX_MAIN_PLANES];
            self.aux_distance[i] = [0; MAX_MAIN_PLANES];
            idx
        } else {
            let idx = self.len;
            self.len += 1;
            self.state.push(state);
            self.bandwidth.push(None);
            self.companion.push(INVALID);
            self.role.push(PlanarRole::Unlinked);
            self.status.push(CheckStatus::Pending);
            self.offsets.push([SurfaceOffset::default(); MAX_MAIN_PLANES]);
            self.aux_distance.push([0; MAX_MAIN_PLANES]);
            self.generation.push(0);
            idx
        };

        StateId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Discards a state, unlinking its companion first.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn discard(&mut self, id: StateId) {
        self.validate(id);
        self.unlink_idx(id.idx);
        self.refresh();
        self.dirty.remove_key(id.idx);
        // Bump generation so old handles immediately fail validation.
        self.generation[id.idx as usize] += 1;
        self.free_list.push(id.idx);
    }

    /// Returns whether the handle refers to a live state.
    #[must_use]
    pub fn is_alive(&self, id: StateId) -> bool {
        id.idx < self.len
            && self.generation[id.idx as usize] == id.generation
            && !self.free_list.contains(&id.idx)
    }

    /// Returns the number of live states.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.len as usize - self.free_list.len()
    }

    // -- Link API --

    /// Links `uv` and `y` as the chroma and luma halves of one semi-planar
    /// scan-out.
    ///
    /// Any previous link of either state is severed on both sides first, so
    /// afterwards `companion(uv) == Some(y)` and `companion(y) == Some(uv)`
    /// and no former partner still points at either of them.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale or if `uv == y`.
    pub fn link(&mut self, uv: StateId, y: StateId) {
        self.validate(uv);
        self.validate(y);
        assert!(uv != y, "cannot link a state to itself");

        self.unlink_idx(uv.idx);
        self.unlink_idx(y.idx);

        self.companion[uv.idx as usize] = y.idx;
        self.companion[y.idx as usize] = uv.idx;
        self.role[uv.idx as usize] = PlanarRole::Uv;
        self.role[y.idx as usize] = PlanarRole::Y;

        // The Y half depends on the UV half's geometry.
        let _ = self.dirty.add_dependency(y.idx, uv.idx, dirty::GEOMETRY);
        self.dirty.mark(uv.idx, dirty::LINK);
        self.dirty.mark(y.idx, dirty::LINK);
        self.refresh();
    }

    /// Severs the link of `id`, if any, on both sides.
    ///
    /// Returns the former companion.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn unlink(&mut self, id: StateId) -> Option<StateId> {
        self.validate(id);
        let former = self.companion(id);
        self.unlink_idx(id.idx);
        self.refresh();
        former
    }

    /// Returns the linked companion of a state.
    #[must_use]
    pub fn companion(&self, id: StateId) -> Option<StateId> {
        self.validate(id);
        let c = self.companion[id.idx as usize];
        (c != INVALID).then(|| self.handle(c))
    }

    /// Returns the role of a state in its link.
    #[must_use]
    pub fn role(&self, id: StateId) -> PlanarRole {
        self.validate(id);
        self.role[id.idx as usize]
    }

    /// Returns the `(uv, y)` pair a state belongs to, if it is linked.
    #[must_use]
    pub fn pair(&self, id: StateId) -> Option<(StateId, StateId)> {
        let companion = self.companion(id)?;
        match self.role(id) {
            PlanarRole::Uv => Some((id, companion)),
            _ => Some((companion, id)),
        }
    }

    // -- Property getters --

    /// Returns the configuration of a state.
    #[must_use]
    pub fn state(&self, id: StateId) -> &PlaneState {
        self.validate(id);
        &self.state[id.idx as usize]
    }

    /// Returns the check status of a state.
    #[must_use]
    pub fn status(&self, id: StateId) -> CheckStatus {
        self.validate(id);
        self.status[id.idx as usize]
    }

    /// Returns the offsets computed by the last successful check, one per
    /// scanned colour plane (see [`PlanarRole::scanned_planes`]).
    ///
    /// Returns `None` unless the state is [`Checked`](CheckStatus::Checked).
    #[must_use]
    pub fn offsets(&self, id: StateId) -> Option<&[SurfaceOffset]> {
        self.validate(id);
        let i = id.idx as usize;
        (self.status[i] == CheckStatus::Checked).then(|| &self.offsets[i][self.scanned(i)])
    }

    /// Returns the AUX distances computed by the last successful check, one
    /// per scanned colour plane.
    ///
    /// Returns `None` unless the state is [`Checked`](CheckStatus::Checked).
    #[must_use]
    pub fn aux_distances(&self, id: StateId) -> Option<&[u32]> {
        self.validate(id);
        let i = id.idx as usize;
        (self.status[i] == CheckStatus::Checked).then(|| &self.aux_distance[i][self.scanned(i)])
    }

    fn scanned(&self, i: usize) -> Range<usize> {
        let main = self.state[i].fb.main_planes().min(MAX_MAIN_PLANES);
        self.role[i].scanned_planes(main)
    }

    /// Returns the bandwidth values attached to a state.
    #[must_use]
    pub fn bandwidth(&self, id: StateId) -> Option<&PlaneBandwidth> {
        self.validate(id);
        self.bandwidth[id.idx as usize].as_ref()
    }

    // -- Mutation API (auto-marks dirty) --

    /// Replaces the framebuffer.
    pub fn set_fb(&mut self, id: StateId, fb: Framebuffer) {
        self.validate(id);
        self.state[id.idx as usize].fb = fb;
        self.mark_geometry(id.idx);
    }

    /// Sets the source rectangle, in framebuffer pixels.
    pub fn set_src(&mut self, id: StateId, src: Rect) {
        self.validate(id);
        self.state[id.idx as usize].src = src;
        self.mark_geometry(id.idx);
    }

    /// Sets the destination rectangle, in pipe pixels.
    pub fn set_dst(&mut self, id: StateId, dst: Rect) {
        self.validate(id);
        self.state[id.idx as usize].dst = dst;
        self.mark_geometry(id.idx);
    }

    /// Sets the rotation and horizontal mirroring.
    pub fn set_rotation(&mut self, id: StateId, rotation: Rotation, reflect_x: bool) {
        self.validate(id);
        let state = &mut self.state[id.idx as usize];
        state.rotation = rotation;
        state.reflect_x = reflect_x;
        self.mark_geometry(id.idx);
    }

    /// Attaches bandwidth values computed by the watermark code.
    ///
    /// The values are dropped again on any later geometry or link change.
    pub fn set_bandwidth(&mut self, id: StateId, bandwidth: PlaneBandwidth) {
        self.validate(id);
        self.bandwidth[id.idx as usize] = Some(bandwidth);
    }

    // -- Crate-internal helpers for the atomic check --

    /// Copies the scan-out configuration of `from` into `to`, keeping `to`'s
    /// plane. Marks `to` dirty only if something changed.
    pub(crate) fn inherit_scanout(&mut self, to: StateId, from: StateId) {
        self.validate(to);
        self.validate(from);
        let src = self.state[from.idx as usize];
        let dst = &mut self.state[to.idx as usize];
        if !dst.same_scanout(&src) {
            *dst = PlaneState {
                pipe: dst.pipe,
                plane: dst.plane,
                ..src
            };
            self.mark_geometry(to.idx);
        }
    }

    pub(crate) fn record_checked(
        &mut self,
        id: StateId,
        offsets: [SurfaceOffset; MAX_MAIN_PLANES],
        aux_distance: [u32; MAX_MAIN_PLANES],
    ) {
        self.validate(id);
        let i = id.idx as usize;
        self.offsets[i] = offsets;
        self.aux_distance[i] = aux_distance;
        self.status[i] = CheckStatus::Checked;
    }

    pub(crate) fn record_rejected(&mut self, id: StateId, err: PlaneError) {
        self.validate(id);
        self.status[id.idx as usize] = CheckStatus::Rejected(err);
    }

    pub(crate) fn handle(&self, idx: u32) -> StateId {
        StateId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    // -- Internal helpers --

    /// Panics if the handle is stale.
    pub(crate) fn validate(&self, id: StateId) {
        assert!(
            self.is_alive(id),
            "stale StateId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    fn mark_geometry(&mut self, idx: u32) {
        self.dirty.mark_with(idx, dirty::GEOMETRY, &EagerPolicy);
        self.refresh();
    }

    /// Severs the link of `idx` on both sides without draining.
    fn unlink_idx(&mut self, idx: u32) {
        let other = self.companion[idx as usize];
        if other == INVALID {
            return;
        }
        let (uv, y) = if self.role[idx as usize] == PlanarRole::Uv {
            (idx, other)
        } else {
            (other, idx)
        };
        self.dirty.remove_dependency(y, uv, dirty::GEOMETRY);
        for i in [uv, y] {
            self.companion[i as usize] = INVALID;
            self.role[i as usize] = PlanarRole::Unlinked;
            self.dirty.mark(i, dirty::LINK);
        }
    }

    /// Drains both channels and invalidates every affected state.
    fn refresh(&mut self) {
        let geometry: Vec<u32> = self
            .dirty
            .drain(dirty::GEOMETRY)
            .affected()
            .deterministic()
            .run()
            .collect();
        let link: Vec<u32> = self
            .dirty
            .drain(dirty::LINK)
            .deterministic()
            .run()
            .collect();
        for idx in geometry.into_iter().chain(link) {
            if self.free_list.contains(&idx) {
                continue;
            }
            let i = idx as usize;
            self.status[i] = CheckStatus::Pending;
            self.bandwidth[i] = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::FourCc;
    use crate::tiling::Tiling;

    fn nv12_state(plane: PlaneId) -> PlaneState {
        let fb = Framebuffer::new(FourCc::NV12, Tiling::Y, 256, 128).unwrap();
        PlaneState::new(PipeId::A, plane, fb)
    }

    #[test]
    fn create_and_discard() {
        let mut store = PlaneStateStore::new();
        let id = store.create(nv12_state(PlaneId::Primary));
        assert!(store.is_alive(id));
        assert_eq!(store.status(id), CheckStatus::Pending);
        assert_eq!(store.live_count(), 1);
        store.discard(id);
        assert!(!store.is_alive(id));
        assert_eq!(store.live_count(), 0);
    }

    #[test]
    fn generation_prevents_stale_access() {
        let mut store = PlaneStateStore::new();
        let id1 = store.create(nv12_state(PlaneId::Primary));
        store.discard(id1);
        let id2 = store.create(nv12_state(PlaneId::Primary));
        assert!(!store.is_alive(id1));
        assert!(store.is_alive(id2));
        assert_eq!(id1.idx, id2.idx);
        assert_ne!(id1.generation, id2.generation);
    }

    #[test]
    #[should_panic(expected = "stale StateId")]
    fn stale_handle_panics() {
        let mut store = PlaneStateStore::new();
        let id = store.create(nv12_state(PlaneId::Primary));
        store.discard(id);
        let _ = store.status(id);
    }

    #[test]
    fn link_is_symmetric() {
        let mut store = PlaneStateStore::new();
        let uv = store.create(nv12_state(PlaneId::Primary));
        let y = store.create(nv12_state(PlaneId::Sprite4));
        store.link(uv, y);
        assert_eq!(store.companion(uv), Some(y));
        assert_eq!(store.companion(y), Some(uv));
        assert_eq!(store.role(uv), PlanarRole::Uv);
        assert_eq!(store.role(y), PlanarRole::Y);
        assert_eq!(store.pair(y), Some((uv, y)));
        assert_eq!(store.role(y).color_plane(), 0);
        assert_eq!(store.role(uv).color_plane(), 1);
        assert_eq!(store.role(y).scanned_planes(2), 0..1);
        assert_eq!(store.role(uv).scanned_planes(2), 1..2);
        assert_eq!(PlanarRole::Unlinked.scanned_planes(2), 0..2);
    }

    #[test]
    fn relink_severs_previous_partner() {
        let mut store = PlaneStateStore::new();
        let a = store.create(nv12_state(PlaneId::Primary));
        let b = store.create(nv12_state(PlaneId::Sprite4));
        let c = store.create(nv12_state(PlaneId::Sprite5));
        store.link(a, b);
        store.link(a, c);
        assert_eq!(store.companion(b), None);
        assert_eq!(store.role(b), PlanarRole::Unlinked);
        assert_eq!(store.companion(a), Some(c));
        assert_eq!(store.companion(c), Some(a));
    }

    #[test]
    fn relink_from_the_y_side() {
        let mut store = PlaneStateStore::new();
        let a = store.create(nv12_state(PlaneId::Primary));
        let b = store.create(nv12_state(PlaneId::Sprite0));
        let y = store.create(nv12_state(PlaneId::Sprite4));
        store.link(a, y);
        store.link(b, y);
        assert_eq!(store.companion(a), None);
        assert_eq!(store.companion(b), Some(y));
        assert_eq!(store.companion(y), Some(b));
    }

    #[test]
    fn discard_unlinks_partner() {
        let mut store = PlaneStateStore::new();
        let uv = store.create(nv12_state(PlaneId::Primary));
        let y = store.create(nv12_state(PlaneId::Sprite4));
        store.link(uv, y);
        store.discard(uv);
        assert_eq!(store.companion(y), None);
        assert_eq!(store.role(y), PlanarRole::Unlinked);
    }

    #[test]
    fn unlink_returns_former_companion() {
        let mut store = PlaneStateStore::new();
        let uv = store.create(nv12_state(PlaneId::Primary));
        let y = store.create(nv12_state(PlaneId::Sprite4));
        store.link(uv, y);
        assert_eq!(store.unlink(y), Some(uv));
        assert_eq!(store.companion(uv), None);
        assert_eq!(store.unlink(uv), None);
    }

    #[test]
    #[should_panic(expected = "cannot link a state to itself")]
    fn self_link_panics() {
        let mut store = PlaneStateStore::new();
        let a = store.create(nv12_state(PlaneId::Primary));
        store.link(a, a);
    }

    #[test]
    fn uv_geometry_change_invalidates_y() {
        let mut store = PlaneStateStore::new();
        let uv = store.create(nv12_state(PlaneId::Primary));
        let y = store.create(nv12_state(PlaneId::Sprite4));
        store.link(uv, y);
        store.record_checked(uv, [SurfaceOffset::default(); MAX_MAIN_PLANES], [0; MAX_MAIN_PLANES]);
        store.record_checked(y, [SurfaceOffset::default(); MAX_MAIN_PLANES], [0; MAX_MAIN_PLANES]);

        store.set_src(uv, Rect::new(0.0, 0.0, 128.0, 64.0));
        assert_eq!(store.status(uv), CheckStatus::Pending);
        assert_eq!(store.status(y), CheckStatus::Pending);
    }

    #[test]
    fn y_geometry_change_is_local() {
        let mut store = PlaneStateStore::new();
        let uv = store.create(nv12_state(PlaneId::Primary));
        let y = store.create(nv12_state(PlaneId::Sprite4));
        store.link(uv, y);
        store.record_checked(uv, [SurfaceOffset::default(); MAX_MAIN_PLANES], [0; MAX_MAIN_PLANES]);
        store.record_checked(y, [SurfaceOffset::default(); MAX_MAIN_PLANES], [0; MAX_MAIN_PLANES]);

        store.set_dst(y, Rect::new(10.0, 10.0, 266.0, 138.0));
        assert_eq!(store.status(uv), CheckStatus::Checked);
        assert_eq!(store.status(y), CheckStatus::Pending);
    }

    #[test]
    fn geometry_change_drops_bandwidth() {
        let mut store = PlaneStateStore::new();
        let id = store.create(nv12_state(PlaneId::Primary));
        store.set_bandwidth(id, PlaneBandwidth::default());
        assert!(store.bandwidth(id).is_some());
        store.set_rotation(id, Rotation::Rotate180, false);
        assert!(store.bandwidth(id).is_none());
    }

    #[test]
    fn offsets_hidden_until_checked() {
        let mut store = PlaneStateStore::new();
        let id = store.create(nv12_state(PlaneId::Primary));
        assert!(store.offsets(id).is_none());
        store.record_checked(id, [SurfaceOffset::default(); MAX_MAIN_PLANES], [7, 0]);
        assert_eq!(store.offsets(id).map(<[_]>::len), Some(2));
        assert_eq!(store.aux_distances(id), Some(&[7, 0][..]));
    }

    #[test]
    fn inherit_scanout_keeps_plane() {
        let mut store = PlaneStateStore::new();
        let uv = store.create(nv12_state(PlaneId::Primary));
        let y = store.create(nv12_state(PlaneId::Sprite4));
        store.set_src(uv, Rect::new(2.0, 2.0, 66.0, 34.0));
        store.inherit_scanout(y, uv);
        assert_eq!(store.state(y).plane, PlaneId::Sprite4);
        assert_eq!(store.state(y).src, Rect::new(2.0, 2.0, 66.0, 34.0));
    }
}
