//! Comparative grid: per-sub-view render surfaces and the mosaic compositor.

/// Mosaic compositor that lays out and combines per-sub-view render surfaces.
pub mod compositor;
/// Per-sub-view render surface tracking view identity and serial state.
pub mod surface;
