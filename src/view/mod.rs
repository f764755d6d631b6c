//! The two-request view-update protocol and the slice representation.

/// View-update request kinds and the actor registry.
pub mod pass;
/// Slice representation modes and state.
pub mod slice_representation;
