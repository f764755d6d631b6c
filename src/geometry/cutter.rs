use std::collections::HashMap;

use smallvec::SmallVec;

use crate::foundation::core::SliceAxis;
use crate::foundation::error::ParvisResult;
use crate::geometry::mesh::{LineSegment, Point3D, TriangleMesh, Vector3D};

/// One extracted cut-plane polygon.
///
/// `closed` is false when the source surface was open at this plane and the
/// contour could not be chained back to its start.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SlicePolygon {
    /// Axis whose plane family produced the polygon.
    pub axis: SliceAxis,
    /// Scalar cut offset along the axis normal.
    pub offset: f64,
    /// Contour vertices in chaining order.
    pub points: Vec<Point3D>,
    /// Whether the contour closes on itself.
    pub closed: bool,
}

/// Multi-plane cutting capability.
///
/// The slice geometry filter drives this through dependency injection: it
/// supplies per-axis cut normals and offset lists, then asks for the cut of a
/// concrete mesh. Implementations must treat an empty offset list as "no
/// planes on that axis", not an error.
pub trait SliceCutter {
    /// Replace the cut-plane family for `axis`: one shared unit `normal` and
    /// one plane per entry of `offsets`.
    fn set_cut_planes(&mut self, axis: SliceAxis, normal: Vector3D, offsets: &[f64]);

    /// Cut `input` with every configured plane.
    fn generate(&self, input: &TriangleMesh) -> ParvisResult<Vec<SlicePolygon>>;
}

/// Plane family for one axis.
#[derive(Debug, Clone)]
struct PlaneFamily {
    normal: Vector3D,
    offsets: SmallVec<[f64; 8]>,
}

impl Default for PlaneFamily {
    fn default() -> Self {
        Self {
            normal: Vector3D::new(0.0, 0.0, 1.0),
            offsets: SmallVec::new(),
        }
    }
}

/// Default [`SliceCutter`]: cuts each triangle against each plane and chains
/// the resulting segments into contours with a discretized endpoint map.
#[derive(Debug, Clone)]
pub struct MultiPlaneCutter {
    families: [PlaneFamily; 3],
    tolerance: f64,
}

impl Default for MultiPlaneCutter {
    fn default() -> Self {
        Self {
            families: Default::default(),
            tolerance: 1e-6,
        }
    }
}

impl MultiPlaneCutter {
    /// Cutter with an explicit point-merge tolerance.
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self {
            families: Default::default(),
            tolerance,
        }
    }

    fn cut_one_plane(
        &self,
        input: &TriangleMesh,
        axis: SliceAxis,
        normal: &Vector3D,
        offset: f64,
    ) -> Vec<SlicePolygon> {
        let segments: Vec<LineSegment> = input
            .triangles
            .iter()
            .filter_map(|tri| tri.intersect_plane(normal, offset))
            .collect();

        build_contours(&segments, self.tolerance)
            .into_iter()
            .map(|(points, closed)| SlicePolygon {
                axis,
                offset,
                points,
                closed,
            })
            .collect()
    }
}

impl SliceCutter for MultiPlaneCutter {
    fn set_cut_planes(&mut self, axis: SliceAxis, normal: Vector3D, offsets: &[f64]) {
        let family = &mut self.families[axis.index()];
        family.normal = normal;
        family.offsets = SmallVec::from_slice(offsets);
    }

    fn generate(&self, input: &TriangleMesh) -> ParvisResult<Vec<SlicePolygon>> {
        let mut polygons = Vec::new();
        for axis in SliceAxis::ALL {
            let family = &self.families[axis.index()];
            for &offset in &family.offsets {
                polygons.extend(self.cut_one_plane(input, axis, &family.normal, offset));
            }
        }
        Ok(polygons)
    }
}

/// Discretized point key handling floating-point endpoint comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct PointKey {
    x: i64,
    y: i64,
    z: i64,
}

impl PointKey {
    fn from_point(point: &Point3D, tolerance: f64) -> Self {
        let scale = 1.0 / tolerance;
        Self {
            x: (point.x * scale).round() as i64,
            y: (point.y * scale).round() as i64,
            z: (point.z * scale).round() as i64,
        }
    }
}

/// Chain segments into contours via an endpoint hash map, O(m) in segments.
///
/// Returns `(points, closed)` per contour.
fn build_contours(segments: &[LineSegment], tolerance: f64) -> Vec<(Vec<Point3D>, bool)> {
    if segments.is_empty() {
        return Vec::new();
    }

    let mut endpoint_map: HashMap<PointKey, Vec<usize>> = HashMap::new();
    for (i, segment) in segments.iter().enumerate() {
        let start_key = PointKey::from_point(&segment.start, tolerance);
        let end_key = PointKey::from_point(&segment.end, tolerance);
        endpoint_map.entry(start_key).or_default().push(i);
        endpoint_map.entry(end_key).or_default().push(i);
    }

    let mut used = vec![false; segments.len()];
    let mut contours = Vec::new();

    for start_idx in 0..segments.len() {
        if used[start_idx] {
            continue;
        }
        let contour = chain_from(start_idx, segments, &endpoint_map, &mut used, tolerance);
        if !contour.0.is_empty() {
            contours.push(contour);
        }
    }

    contours
}

fn chain_from(
    start_idx: usize,
    segments: &[LineSegment],
    endpoint_map: &HashMap<PointKey, Vec<usize>>,
    used: &mut [bool],
    tolerance: f64,
) -> (Vec<Point3D>, bool) {
    let mut points = Vec::new();
    let mut current_idx = start_idx;
    let mut current_point = segments[start_idx].start;

    used[current_idx] = true;
    points.push(current_point);

    let start_point = current_point;
    loop {
        let segment = &segments[current_idx];
        let next_point = if (segment.start.coords - current_point.coords).norm() < tolerance {
            segment.end
        } else {
            segment.start
        };
        points.push(next_point);

        if (next_point.coords - start_point.coords).norm() < tolerance {
            // Closed loop; drop the duplicated closing vertex.
            points.pop();
            return (points, true);
        }

        let next_key = PointKey::from_point(&next_point, tolerance);
        let next_idx = endpoint_map
            .get(&next_key)
            .and_then(|indices| indices.iter().find(|&&idx| !used[idx]).copied());

        match next_idx {
            Some(idx) => {
                used[idx] = true;
                current_idx = idx;
                current_point = next_point;
            }
            None => return (points, false),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/cutter.rs"]
mod tests;
