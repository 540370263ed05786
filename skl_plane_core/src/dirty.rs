// Copyright 2026 the skl_plane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! The plane state store uses [`understory_dirty`] to find which states must
//! be re-checked after a mutation. Each channel is an independent category of
//! change.
//!
//! - **Propagating**: [`GEOMETRY`] is marked with
//!   [`EagerPolicy`](understory_dirty::EagerPolicy) and has a dependency edge
//!   from each Y half to its UV companion. The Y half scans out the UV half's
//!   framebuffer, so a framebuffer, source, destination or rotation change on
//!   the UV half invalidates both.
//! - **Local-only**: [`LINK`] is marked on both ends whenever a companion link
//!   is made or broken.
//!
//! Every state that appears in a drain goes back to
//! [`CheckStatus::Pending`](crate::state::CheckStatus::Pending) and loses its
//! computed offsets and bandwidth values.

use understory_dirty::Channel;

/// Framebuffer, source, destination or rotation changed.
pub const GEOMETRY: Channel = Channel::new(0);

/// Companion link made or broken.
pub const LINK: Channel = Channel::new(1);
