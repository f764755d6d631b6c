use std::collections::BTreeMap;

use crate::foundation::core::Bounds;
use crate::geometry::basis::BasisTransform;
use crate::geometry::cutter::SlicePolygon;
use crate::geometry::mesh::TriangleMesh;

/// A named auxiliary array: fixed component count, tuple-major values.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FieldArray {
    /// Components per tuple.
    pub components: usize,
    /// Flat values, `components * tuples` long.
    pub values: Vec<f64>,
}

impl FieldArray {
    /// Number of tuples stored.
    pub fn tuples(&self) -> usize {
        if self.components == 0 {
            0
        } else {
            self.values.len() / self.components
        }
    }
}

/// Auxiliary metadata carried alongside geometry.
///
/// Holds named floating-point arrays (the bounds cache lives here under its
/// exact array name) and the optional change-of-basis block.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FieldData {
    arrays: BTreeMap<String, FieldArray>,
    /// Change-of-basis metadata, if the producing stage attached one.
    pub basis: Option<BasisTransform>,
}

impl FieldData {
    /// Insert or replace a named array.
    pub fn set_array(&mut self, name: &str, array: FieldArray) {
        self.arrays.insert(name.to_owned(), array);
    }

    /// Look up a named array.
    pub fn array(&self, name: &str) -> Option<&FieldArray> {
        self.arrays.get(name)
    }
}

/// Geometry payload of a dataset: either an input surface mesh or the
/// extracted slice polygons.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Geometry {
    /// Triangulated surface.
    Mesh(TriangleMesh),
    /// Extracted cut-plane polygons.
    SlicePolygons(Vec<SlicePolygon>),
}

impl Geometry {
    /// Axis-aligned bounds of the geometry; uninitialized when empty.
    pub fn bounds(&self) -> Bounds {
        match self {
            Geometry::Mesh(mesh) => mesh.bounds(),
            Geometry::SlicePolygons(polys) => {
                let mut bounds = Bounds::uninitialized();
                for poly in polys {
                    for p in &poly.points {
                        bounds.add(&Bounds::new(p.x, p.x, p.y, p.y, p.z, p.z));
                    }
                }
                bounds
            }
        }
    }
}

/// Geometry plus its auxiliary metadata, the unit of pipeline data flow.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DataSet {
    /// Geometry payload.
    pub geometry: Geometry,
    /// Named arrays and basis metadata.
    pub field_data: FieldData,
}

impl DataSet {
    /// Dataset from a surface mesh with empty metadata.
    pub fn from_mesh(mesh: TriangleMesh) -> Self {
        Self {
            geometry: Geometry::Mesh(mesh),
            field_data: FieldData::default(),
        }
    }
}
