use crate::foundation::core::Bounds;
use crate::geometry::mesh::Vector3D;

/// Spatial partition of the data across processes.
///
/// One region per rank, assumed pairwise disjoint. Establishes the
/// back-to-front process ordering ordered compositing needs for correct
/// alpha blending of transparent geometry.
#[derive(Clone, Debug)]
pub struct KdTreePartition {
    regions: Vec<Bounds>,
}

impl KdTreePartition {
    /// Partition from per-rank regions; `regions[rank]` is rank's territory.
    pub fn new(regions: Vec<Bounds>) -> Self {
        Self { regions }
    }

    /// Number of ranks covered.
    pub fn num_ranks(&self) -> usize {
        self.regions.len()
    }

    /// Rank ordering from farthest to nearest along `camera_dir` (the view
    /// direction, pointing away from the camera).
    ///
    /// Regions whose centroid projects further along the view direction are
    /// farther from the camera and composite first.
    pub fn back_to_front_ordering(&self, camera_dir: Vector3D) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.regions.len()).collect();
        let depth = |rank: usize| -> f64 {
            let b = &self.regions[rank].0;
            let centroid = Vector3D::new(
                (b[0] + b[1]) * 0.5,
                (b[2] + b[3]) * 0.5,
                (b[4] + b[5]) * 0.5,
            );
            centroid.dot(&camera_dir)
        };
        order.sort_by(|&a, &b| {
            depth(b)
                .partial_cmp(&depth(a))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        order
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/kdtree.rs"]
mod tests;
