//! Slice-plane geometry extraction: meshes, basis transforms, the cutting
//! capability and the slice geometry filter.

/// Basis transforms between world and slice-plane coordinate frames.
pub mod basis;
/// Slice-cutter traits and plane-cutting implementations.
pub mod cutter;
/// Dataset field arrays and field data containers.
pub mod dataset;
/// Triangle meshes and plane-intersection primitives.
pub mod mesh;
/// Slice geometry filter producing slice polygons from datasets.
pub mod slice_filter;
