use crate::foundation::core::Bounds;
use nalgebra::{Point3, Vector3};

/// 3D point type.
pub type Point3D = Point3<f64>;

/// 3D vector type.
pub type Vector3D = Vector3<f64>;

/// Triangle defined by three vertices.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Triangle {
    /// First vertex.
    pub v0: Point3D,
    /// Second vertex.
    pub v1: Point3D,
    /// Third vertex.
    pub v2: Point3D,
}

impl Triangle {
    /// Build a triangle from three vertices.
    pub fn new(v0: Point3D, v1: Point3D, v2: Point3D) -> Self {
        Self { v0, v1, v2 }
    }

    /// Unit normal of the triangle, or (0, 0, 1) for degenerate triangles.
    pub fn normal(&self) -> Vector3D {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;
        let cross = edge1.cross(&edge2);
        let norm = cross.norm();
        if norm < 1e-10 || !norm.is_finite() {
            return Vector3D::new(0.0, 0.0, 1.0);
        }
        cross / norm
    }

    /// Signed distances of the three vertices from the plane `n . p = offset`.
    fn plane_distances(&self, normal: &Vector3D, offset: f64) -> [f64; 3] {
        [
            normal.dot(&self.v0.coords) - offset,
            normal.dot(&self.v1.coords) - offset,
            normal.dot(&self.v2.coords) - offset,
        ]
    }

    /// Intersect the triangle with the plane `n . p = offset`.
    ///
    /// Returns `None` when the plane misses the triangle or only grazes a
    /// vertex; otherwise the crossing segment.
    pub fn intersect_plane(&self, normal: &Vector3D, offset: f64) -> Option<LineSegment> {
        let d = self.plane_distances(normal, offset);
        let all_above = d.iter().all(|&v| v > 0.0);
        let all_below = d.iter().all(|&v| v < 0.0);
        if all_above || all_below {
            return None;
        }

        let verts = [self.v0, self.v1, self.v2];
        let mut crossings: Vec<Point3D> = Vec::with_capacity(2);
        for i in 0..3 {
            let j = (i + 1) % 3;
            let (di, dj) = (d[i], d[j]);
            if di == 0.0 {
                crossings.push(verts[i]);
                continue;
            }
            if (di > 0.0) != (dj > 0.0) && dj != 0.0 {
                let t = di / (di - dj);
                crossings.push(verts[i] + (verts[j] - verts[i]) * t);
            }
        }

        crossings.dedup_by(|a, b| (a.coords - b.coords).norm() < 1e-10);
        if crossings.len() >= 2 && (crossings[0].coords - crossings[1].coords).norm() >= 1e-10 {
            Some(LineSegment::new(crossings[0], crossings[1]))
        } else {
            None
        }
    }
}

/// Line segment in 3D space.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LineSegment {
    /// Segment start point.
    pub start: Point3D,
    /// Segment end point.
    pub end: Point3D,
}

impl LineSegment {
    /// Build a segment from two endpoints.
    pub fn new(start: Point3D, end: Point3D) -> Self {
        Self { start, end }
    }
}

/// Indexed-free triangle soup with lazily computed bounds.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TriangleMesh {
    /// Triangles of the surface.
    pub triangles: Vec<Triangle>,
}

impl TriangleMesh {
    /// Build a mesh from a triangle list.
    pub fn from_triangles(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }

    /// Return `true` when the mesh has no triangles.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Axis-aligned bounds of all vertices; uninitialized for an empty mesh.
    pub fn bounds(&self) -> Bounds {
        let mut bounds = Bounds::uninitialized();
        for tri in &self.triangles {
            for v in [&tri.v0, &tri.v1, &tri.v2] {
                bounds.add(&Bounds::new(v.x, v.x, v.y, v.y, v.z, v.z));
            }
        }
        bounds
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/mesh.rs"]
mod tests;
