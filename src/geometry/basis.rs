use crate::foundation::core::Bounds;
use crate::geometry::mesh::{Point3D, Vector3D};
use nalgebra::Matrix4;

/// Change-of-basis metadata attached to a dataset.
///
/// Defines a non-Cartesian coordinate frame for the data: a 4x4 affine
/// matrix whose columns are the basis axes, optional display names per axis,
/// and an optional bounding box expressed in basis coordinates. Absent
/// metadata means the identity/Cartesian frame. The slicing layer only ever
/// reads this; it is owned by the upstream data-producing stage.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BasisTransform {
    /// The 4x4 change-of-basis matrix (basis -> Cartesian).
    pub matrix: Matrix4<f64>,
    /// Optional display name per basis axis.
    pub axis_names: [Option<String>; 3],
    /// Optional bounding box of the data expressed in basis coordinates.
    pub bounds_in_basis: Option<Bounds>,
}

impl BasisTransform {
    /// Identity frame with no names and no basis bounds.
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
            axis_names: [None, None, None],
            bounds_in_basis: None,
        }
    }

    /// Frame from an explicit matrix.
    pub fn from_matrix(matrix: Matrix4<f64>) -> Self {
        Self {
            matrix,
            axis_names: [None, None, None],
            bounds_in_basis: None,
        }
    }

    /// The three basis axis vectors (upper 3x3 columns of the matrix).
    pub fn basis_vectors(&self) -> [Vector3D; 3] {
        let m = &self.matrix;
        [
            Vector3D::new(m[(0, 0)], m[(1, 0)], m[(2, 0)]),
            Vector3D::new(m[(0, 1)], m[(1, 1)], m[(2, 1)]),
            Vector3D::new(m[(0, 2)], m[(1, 2)], m[(2, 2)]),
        ]
    }

    /// Map a basis-space point to Cartesian space with homogeneous divide.
    pub fn apply_homogeneous(&self, p: Point3D) -> Point3D {
        let v = self.matrix * nalgebra::Vector4::new(p.x, p.y, p.z, 1.0);
        let w = if v.w != 0.0 { v.w } else { 1.0 };
        Point3D::new(v.x / w, v.y / w, v.z / w)
    }
}

/// Slice-plane normals for the three basis axes.
///
/// With no basis the normals are the Cartesian axes. Otherwise
/// `normal[i] = normalize(basis[(i+1)%3] x basis[(i+2)%3])`, which keeps the
/// normals unit length and consistent with right-handed basis ordering.
pub fn normals_to_basis_planes(basis: Option<&BasisTransform>) -> [Vector3D; 3] {
    match basis {
        None => [
            Vector3D::new(1.0, 0.0, 0.0),
            Vector3D::new(0.0, 1.0, 0.0),
            Vector3D::new(0.0, 0.0, 1.0),
        ],
        Some(basis) => {
            let axes = basis.basis_vectors();
            let mut normals = [Vector3D::zeros(); 3];
            for (i, normal) in normals.iter_mut().enumerate() {
                let cross = axes[(i + 1) % 3].cross(&axes[(i + 2) % 3]);
                *normal = cross.normalize();
            }
            normals
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/basis.rs"]
mod tests;
