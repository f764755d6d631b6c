//! Per-process renderer synchronization: tiles, compositing, image relay.

/// Renderer trait and the built-in solid-color backend.
pub mod backend;
pub(crate) mod blend;
/// Image compression kinds, configuration and compressor.
pub mod compressor;
/// RGBA tile image buffers and pixel operations.
pub mod image;
/// K-d tree spatial partition and back-to-front rank ordering.
pub mod kdtree;
/// Ordered image compositing across a collective of ranks.
pub mod ordered;
/// Render and image-processing pass traits.
pub mod passes;
/// Client-side image relay and synchronization.
pub mod relay;
/// Synchronized per-process renderer driving the compositing pipeline.
pub mod synchronized;
