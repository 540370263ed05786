// Copyright 2026 the skl_plane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pipe, plane and plane-state identity types.

use core::fmt;

/// Sentinel value indicating "no state" in index fields.
pub const INVALID: u32 = u32::MAX;

/// A display pipe.
///
/// Each pipe drives one output path and owns a fixed set of plane slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PipeId {
    /// Pipe A.
    A,
    /// Pipe B.
    B,
    /// Pipe C.
    C,
    /// Pipe D.
    D,
}

impl PipeId {
    /// All pipes in hardware order.
    pub const ALL: [Self; 4] = [Self::A, Self::B, Self::C, Self::D];

    /// Returns the zero-based hardware index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Returns the pipe with the given hardware index, if any.
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::A),
            1 => Some(Self::B),
            2 => Some(Self::C),
            3 => Some(Self::D),
            _ => None,
        }
    }
}

/// A plane slot within a pipe.
///
/// `Primary` and the sprites are the universal planes (`PLANE_1` to
/// `PLANE_7` in hardware numbering); the cursor is separate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PlaneId {
    /// `PLANE_1`.
    Primary,
    /// `PLANE_2`.
    Sprite0,
    /// `PLANE_3`.
    Sprite1,
    /// `PLANE_4`.
    Sprite2,
    /// `PLANE_5`.
    Sprite3,
    /// `PLANE_6`.
    Sprite4,
    /// `PLANE_7`.
    Sprite5,
    /// The cursor plane.
    Cursor,
}

impl PlaneId {
    /// All plane ids in hardware order.
    pub const ALL: [Self; 8] = [
        Self::Primary,
        Self::Sprite0,
        Self::Sprite1,
        Self::Sprite2,
        Self::Sprite3,
        Self::Sprite4,
        Self::Sprite5,
        Self::Cursor,
    ];

    /// Returns the zero-based hardware index (cursor is 7).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Returns the plane with the given hardware index, if any.
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::Primary),
            1 => Some(Self::Sprite0),
            2 => Some(Self::Sprite1),
            3 => Some(Self::Sprite2),
            4 => Some(Self::Sprite3),
            5 => Some(Self::Sprite4),
            6 => Some(Self::Sprite5),
            7 => Some(Self::Cursor),
            _ => None,
        }
    }

    /// Returns this plane's bit in a [`PlaneMask`].
    #[inline]
    #[must_use]
    pub const fn bit(self) -> u8 {
        1 << self.index()
    }

    /// Returns whether this is a universal (non-cursor) plane.
    #[inline]
    #[must_use]
    pub const fn is_universal(self) -> bool {
        !matches!(self, Self::Cursor)
    }
}

/// A set of plane ids, one bit per [`PlaneId::index`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PlaneMask(pub u8);

impl PlaneMask {
    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// Builds a mask from a list of planes.
    #[must_use]
    pub const fn from_planes(planes: &[PlaneId]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < planes.len() {
            bits |= planes[i].bit();
            i += 1;
        }
        Self(bits)
    }

    /// Returns the raw bits.
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns whether `plane` is in the set.
    #[inline]
    #[must_use]
    pub const fn contains(self, plane: PlaneId) -> bool {
        self.0 & plane.bit() != 0
    }

    /// Returns whether the set is empty.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates over the planes in the set, in hardware order.
    pub fn iter(self) -> impl Iterator<Item = PlaneId> {
        PlaneId::ALL.into_iter().filter(move |p| self.contains(*p))
    }
}

impl fmt::Debug for PlaneMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// A handle to a plane state in a [`PlaneStateStore`](crate::state::PlaneStateStore).
///
/// Contains both a slot index and a generation counter so that stale handles
/// can be detected after a state is discarded and the slot is reused.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateId {
    /// Slot index into the store's arrays.
    pub(crate) idx: u32,
    /// Generation counter; must match the store's generation for this slot.
    pub(crate) generation: u32,
}

impl StateId {
    /// Returns the raw slot index (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StateId({}@gen{})", self.idx, self.generation)
    }
}
