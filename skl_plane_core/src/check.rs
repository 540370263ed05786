// Copyright 2026 the skl_plane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Atomic check of a plane state or a linked pair.

use crate::display::Display;
use crate::error::PlaneError;
use crate::format::FourCc;
use crate::geometry::{Rotation, SurfaceOffset, source_px};
use crate::id::StateId;
use crate::state::{CheckStatus, MAX_MAIN_PLANES, PlanarRole, PlaneState};
use crate::tiling::{TILE_SIZE, Tiling};
use crate::trace::{OffsetComputedEvent, StateCheckedEvent};

type Computed = ([SurfaceOffset; MAX_MAIN_PLANES], [u32; MAX_MAIN_PLANES]);

impl Display<'_> {
    /// Checks a state against its plane's capabilities and computes its
    /// surface offsets and AUX distances.
    ///
    /// A linked state is checked together with its companion. The Y half
    /// first takes over the framebuffer, source, destination and rotation of
    /// the UV half. If either half fails, both end up
    /// [`Rejected`](CheckStatus::Rejected): the failing half with its own
    /// error and the other with [`PlaneError::CompanionRejected`].
    ///
    /// # Errors
    ///
    /// The error the state was rejected with.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn check(&mut self, id: StateId) -> Result<(), PlaneError> {
        match self.store.pair(id) {
            None => {
                self.check_one(id);
            }
            Some((uv, y)) => {
                self.store.inherit_scanout(y, uv);
                let uv_ok = self.check_one(uv);
                let y_ok = self.check_one(y);
                if uv_ok && !y_ok {
                    self.finish(uv, Err(PlaneError::CompanionRejected));
                } else if y_ok && !uv_ok {
                    self.finish(y, Err(PlaneError::CompanionRejected));
                }
            }
        }
        match self.store.status(id) {
            CheckStatus::Checked => Ok(()),
            CheckStatus::Rejected(err) => Err(err),
            CheckStatus::Pending => Err(PlaneError::NotChecked),
        }
    }

    fn check_one(&mut self, id: StateId) -> bool {
        let result = self.compute(id);
        let ok = result.is_ok();
        self.finish(id, result);
        ok
    }

    fn finish(&mut self, id: StateId, result: Result<Computed, PlaneError>) {
        let (pipe, plane) = self.store.state(id).key();
        let status = match result {
            Ok((offsets, aux)) => {
                self.store.record_checked(id, offsets, aux);
                Ok(())
            }
            Err(err) => {
                self.store.record_rejected(id, err);
                Err(err)
            }
        };
        self.tracer.state_checked(&StateCheckedEvent {
            state: id,
            pipe,
            plane,
            result: status,
        });
    }

    fn compute(&mut self, id: StateId) -> Result<Computed, PlaneError> {
        let state = *self.store.state(id);
        let role = self.store.role(id);
        self.check_link(id, &state, role)?;
        self.check_caps(&state, role)?;
        self.check_rotation(&state)?;
        check_source(&state)?;

        let mut offsets = [SurfaceOffset::default(); MAX_MAIN_PLANES];
        let mut aux = [0; MAX_MAIN_PLANES];
        let main = state.fb.main_planes().min(MAX_MAIN_PLANES);
        for cp in role.scanned_planes(main) {
            let offset = self.geometry.main_surface_offset(&state, cp)?;
            assert!(
                offset.offset % TILE_SIZE == 0,
                "surface offset {:#x} of {id:?} is not tile aligned",
                offset.offset
            );
            offsets[cp] = offset;
            aux[cp] = self.geometry.aux_distance(&state, cp)?;
            self.tracer.offset_computed(&OffsetComputedEvent {
                state: id,
                color_plane: cp,
                offset,
                aux_distance: aux[cp],
            });
        }
        Ok((offsets, aux))
    }

    fn check_link(
        &self,
        id: StateId,
        state: &PlaneState,
        role: PlanarRole,
    ) -> Result<(), PlaneError> {
        let semiplanar = state.fb.format().is_semiplanar();
        if !self.config().revision.has_linked_planar() {
            // The chroma plane is the AUX surface of the main plane here.
            return match role {
                PlanarRole::Unlinked => Ok(()),
                PlanarRole::Uv | PlanarRole::Y => Err(PlaneError::UnexpectedCompanion),
            };
        }
        match (semiplanar, role) {
            (true, PlanarRole::Unlinked) => return Err(PlaneError::CompanionMissing),
            (false, PlanarRole::Uv | PlanarRole::Y) => return Err(PlaneError::UnexpectedCompanion),
            _ => {}
        }
        // Both halves scan out through one pipe, from two different planes.
        if let Some(companion) = self.store.companion(id) {
            let (pipe, plane) = self.store.state(companion).key();
            if pipe != state.pipe || plane == state.plane {
                return Err(PlaneError::MisplacedCompanion);
            }
        }
        Ok(())
    }

    fn check_caps(&self, state: &PlaneState, role: PlanarRole) -> Result<(), PlaneError> {
        let caps = self.registry().plane_caps(state.pipe, state.plane)?;
        let format = state.fb.format();
        match role {
            PlanarRole::Y if !caps.nv12_y => return Err(PlaneError::FormatNotOnPlane(format)),
            PlanarRole::Unlinked | PlanarRole::Uv if format.is_semiplanar() && !caps.planar => {
                return Err(PlaneError::FormatNotOnPlane(format));
            }
            _ => {}
        }
        caps.check_format(format, state.fb.tiling())
    }

    fn check_rotation(&self, state: &PlaneState) -> Result<(), PlaneError> {
        let format = state.fb.format();
        let tiling = state.fb.tiling();
        let ver = self.config().revision.display_version();
        if state.rotation.is_90_or_270() {
            if !tiling.supports_rotation_90() {
                return Err(PlaneError::UnsupportedRotation);
            }
            let rotatable = match format {
                FourCc::RGB565 => ver >= 11,
                FourCc::XRGB16161616F
                | FourCc::XBGR16161616F
                | FourCc::ARGB16161616F
                | FourCc::ABGR16161616F
                | FourCc::Y210
                | FourCc::Y212
                | FourCc::Y216
                | FourCc::XVYU12_16161616
                | FourCc::XVYU16161616 => false,
                _ => true,
            };
            if !rotatable {
                return Err(PlaneError::UnsupportedRotation);
            }
        }
        if state.reflect_x
            && (ver < 10 || state.rotation.is_90_or_270() || tiling == Tiling::Linear)
        {
            return Err(PlaneError::UnsupportedRotation);
        }
        Ok(())
    }
}

fn check_source(state: &PlaneState) -> Result<(), PlaneError> {
    let (x, y, w, h) = source_px(state)?;
    let info = state.fb.info();
    if info.is_yuv {
        let hsub = u32::from(info.hsub);
        let vsub = u32::from(info.vsub);
        if x % hsub != 0 || w % hsub != 0 || y % vsub != 0 || h % vsub != 0 {
            return Err(PlaneError::ChromaMisaligned);
        }
    }
    // Display WA #1106.
    if info.is_semiplanar() && state.rotation == Rotation::Rotate270 && w % 4 != 0 {
        return Err(PlaneError::ChromaMisaligned);
    }
    Ok(())
}
