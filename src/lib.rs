//! Parvis is the parallel render-synchronization and compositing core of a
//! distributed scientific-visualization pipeline.
//!
//! The crate covers four cooperating layers:
//!
//! - Per-axis cut-plane extraction with basis-transform-aware normals and
//!   bounds caching ([`SliceGeometryFilter`])
//! - A two-request view-update protocol driving slice representations
//!   ([`SliceRepresentation`])
//! - Per-process renderer synchronization with ordered compositing and
//!   client-server image relay ([`SynchronizedRenderer`])
//! - A comparative grid compositor assembling sub-view captures into one
//!   mosaic ([`ComparativeCompositor`])
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub mod comparative;
pub mod geometry;
pub mod render;
pub mod session;
pub mod view;

pub use crate::foundation::core::{Bounds, Extent, GridDims, SliceAxis, ViewId};
pub use crate::foundation::error::{ParvisError, ParvisResult};

pub use crate::comparative::compositor::{ComparativeCompositor, ComparativeLayout};
pub use crate::comparative::surface::RenderSurface;
pub use crate::geometry::basis::BasisTransform;
pub use crate::geometry::cutter::{MultiPlaneCutter, SliceCutter, SlicePolygon};
pub use crate::geometry::dataset::{DataSet, FieldData, Geometry};
pub use crate::geometry::mesh::{Point3D, Triangle, TriangleMesh, Vector3D};
pub use crate::geometry::slice_filter::SliceGeometryFilter;
pub use crate::render::image::TileImage;
pub use crate::render::kdtree::KdTreePartition;
pub use crate::render::synchronized::SynchronizedRenderer;
pub use crate::session::{Session, SynchronizerMode};
pub use crate::view::pass::{MultiSliceViewState, PassContext, RequestKind};
pub use crate::view::slice_representation::{SliceMode, SliceRepresentation};
