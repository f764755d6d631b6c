use crate::foundation::core::{Bounds, SliceAxis};
use crate::foundation::error::{ParvisError, ParvisResult};
use crate::foundation::math::next_mtime;
use crate::geometry::basis::normals_to_basis_planes;
use crate::geometry::cutter::{MultiPlaneCutter, SliceCutter, SlicePolygon};
use crate::geometry::dataset::{DataSet, FieldArray, FieldData, Geometry};
use crate::geometry::mesh::Point3D;

/// Exact name of the cached-bounds field array. Cross-process cache
/// compatibility depends on this string.
pub const BOUNDS_ARRAY_NAME: &str = "SliceGeometryFilter_Bounds";

/// Per-axis cut-plane geometry extraction with basis-transform-aware normal
/// computation and bounds caching.
///
/// Positions are expressed in the coordinate space defined by the input's
/// change-of-basis matrix; each generation pass maps them to Cartesian space
/// and projects them onto the axis normal to obtain scalar cut offsets.
pub struct SliceGeometryFilter {
    positions: [Vec<f64>; 3],
    cutter: Box<dyn SliceCutter + Send>,
    mtime: u64,
}

impl Default for SliceGeometryFilter {
    fn default() -> Self {
        Self::new(Box::new(MultiPlaneCutter::default()))
    }
}

impl SliceGeometryFilter {
    /// Filter over an injected cutting capability.
    pub fn new(cutter: Box<dyn SliceCutter + Send>) -> Self {
        Self {
            positions: Default::default(),
            cutter,
            mtime: next_mtime(),
        }
    }

    /// Modification stamp; advances whenever filter state changes.
    pub fn mtime(&self) -> u64 {
        self.mtime
    }

    /// Set positions for slice locations along one basis axis.
    ///
    /// The sequence is replaced wholesale, and only when it differs by value
    /// from the current one. An unchanged resend is a no-op and leaves the
    /// modification stamp untouched; this is the single defense against
    /// redundant regeneration when the view re-sends identical state every
    /// update pass.
    pub fn set_slice_positions(&mut self, axis: SliceAxis, positions: &[f64]) {
        if self.positions[axis.index()] != positions {
            self.positions[axis.index()] = positions.to_vec();
            self.mtime = next_mtime();
        }
    }

    /// Positions currently configured for `axis`.
    pub fn slice_positions(&self, axis: SliceAxis) -> &[f64] {
        &self.positions[axis.index()]
    }

    /// Run one generation pass.
    ///
    /// Derives slice normals from the input's basis (identity when absent),
    /// maps every requested position to a scalar cut offset, cuts, and hands
    /// the cut geometry to the extraction step as an explicit value. The
    /// output carries the input's basis metadata and a cached copy of the
    /// input bounds under [`BOUNDS_ARRAY_NAME`].
    #[tracing::instrument(skip(self, input))]
    pub fn request_data(&mut self, input: &DataSet) -> ParvisResult<DataSet> {
        let basis = input.field_data.basis.as_ref();
        let normals = normals_to_basis_planes(basis);

        let mesh = match &input.geometry {
            Geometry::Mesh(mesh) => mesh,
            Geometry::SlicePolygons(_) => {
                return Err(ParvisError::pipeline(
                    "slice filter input must be a surface mesh",
                ));
            }
        };

        for axis in SliceAxis::ALL {
            let normal = normals[axis.index()];
            let offsets: Vec<f64> = self.positions[axis.index()]
                .iter()
                .map(|&position| {
                    // Positions live in the basis frame; map to Cartesian with
                    // homogeneous divide, then project onto the slice normal.
                    // The cut is along the plane through that projected offset
                    // from the origin, not through an arbitrary point.
                    let mut point = Point3D::origin();
                    point[axis.index()] = position;
                    let cartesian = match basis {
                        Some(b) => b.apply_homogeneous(point),
                        None => point,
                    };
                    normal.dot(&cartesian.coords)
                })
                .collect();
            self.cutter.set_cut_planes(axis, normal, &offsets);
        }

        let polygons = self.cutter.generate(mesh)?;
        let mut output = extract_geometry(polygons, &input.field_data);

        let input_bounds = input.geometry.bounds();
        cache_bounds(&mut output, &input_bounds);
        Ok(output)
    }
}

/// The generic geometry-extraction step, as a pure function of the cut
/// result: builds the output dataset and propagates upstream metadata.
fn extract_geometry(polygons: Vec<SlicePolygon>, upstream: &FieldData) -> DataSet {
    DataSet {
        geometry: Geometry::SlicePolygons(polygons),
        field_data: upstream.clone(),
    }
}

/// Stash `bounds` on `data` under the cached-bounds array name.
pub fn cache_bounds(data: &mut DataSet, bounds: &Bounds) {
    data.field_data.set_array(
        BOUNDS_ARRAY_NAME,
        FieldArray {
            components: 6,
            values: bounds.0.to_vec(),
        },
    );
}

/// Recover cached original bounds from a dataset.
///
/// An oriented bounding box expressed in the basis frame wins when present
/// (more accurate under a changed basis); otherwise the cached Cartesian
/// array is used. Returns `None` for a missing array, a malformed array, or
/// the uninitialized sentinel.
pub fn extract_cached_bounds(data: &DataSet) -> Option<Bounds> {
    if let Some(basis) = &data.field_data.basis
        && let Some(bounds) = basis.bounds_in_basis
        && bounds.is_initialized()
    {
        return Some(bounds);
    }
    let array = data.field_data.array(BOUNDS_ARRAY_NAME)?;
    if array.components != 6 || array.tuples() != 1 {
        return None;
    }
    let bounds = Bounds([
        array.values[0],
        array.values[1],
        array.values[2],
        array.values[3],
        array.values[4],
        array.values[5],
    ]);
    bounds.is_initialized().then_some(bounds)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/slice_filter.rs"]
mod tests;
