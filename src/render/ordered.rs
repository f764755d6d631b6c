use crate::foundation::error::{ParvisError, ParvisResult};
use crate::geometry::mesh::Vector3D;
use crate::render::backend::Renderer;
use crate::render::blend::{depth_resolve_in_place, over_in_place};
use crate::render::image::TileImage;
use crate::render::kdtree::KdTreePartition;
use crate::render::passes::{ImageProcessingPass, RenderPass};

/// The collective compositing boundary.
///
/// `gather` blocks until every cooperating process has contributed its tile
/// for the given tile group and returns all tiles indexed by rank. There is
/// no cancellation at this layer; the surrounding process is terminated to
/// abort.
pub trait CompositingCollective: Send {
    /// Contribute the local tile and receive every rank's tile.
    fn gather(&mut self, local: TileImage, tile_group_id: u32) -> ParvisResult<Vec<TileImage>>;
}

/// Collective over tiles that have already been gathered out-of-band.
///
/// Stands in for the MPI transport in single-process deployments and tests:
/// peers' tiles are supplied up front, and `gather` simply splices the local
/// tile in at this process's rank.
pub struct PreGatheredCollective {
    rank: usize,
    peers: Vec<(usize, TileImage)>,
}

impl PreGatheredCollective {
    /// Collective for `rank`, with `(rank, tile)` pairs for every peer.
    pub fn new(rank: usize, peers: Vec<(usize, TileImage)>) -> Self {
        Self { rank, peers }
    }
}

impl CompositingCollective for PreGatheredCollective {
    fn gather(&mut self, local: TileImage, _tile_group_id: u32) -> ParvisResult<Vec<TileImage>> {
        let num_ranks = self.peers.len() + 1;
        let mut slots: Vec<Option<TileImage>> = (0..num_ranks).map(|_| None).collect();
        for (rank, tile) in &self.peers {
            let slot = slots
                .get_mut(*rank)
                .ok_or_else(|| ParvisError::render("peer rank out of range"))?;
            *slot = Some(tile.clone());
        }
        let local_slot = slots
            .get_mut(self.rank)
            .ok_or_else(|| ParvisError::render("local rank out of range"))?;
        if local_slot.is_some() {
            return Err(ParvisError::render("duplicate tile for local rank"));
        }
        *local_slot = Some(local);
        slots
            .into_iter()
            .enumerate()
            .map(|(rank, slot)| {
                slot.ok_or_else(|| ParvisError::render(format!("no tile for rank {rank}")))
            })
            .collect()
    }
}

/// Parallel ordered-compositing synchronizer.
///
/// Gathers per-rank tiles through the collective and blends them
/// back-to-front in the order the spatial partition dictates. Without a
/// partition the natural rank order is used, and compositing correctness for
/// transparent geometry is not guaranteed.
pub struct OrderedCompositor {
    tile_group_id: u32,
    collective: Box<dyn CompositingCollective>,
    kd_tree: Option<KdTreePartition>,
    camera_dir: Vector3D,
    data_replicated: bool,
    use_depth_buffer: bool,
    render_empty_images: bool,
    render_pass: Option<Box<dyn RenderPass>>,
    image_processing_pass: Option<Box<dyn ImageProcessingPass>>,
}

impl OrderedCompositor {
    /// Compositor bound to one tile group over the given collective.
    pub fn new(collective: Box<dyn CompositingCollective>, tile_group_id: u32) -> Self {
        Self {
            tile_group_id,
            collective,
            kd_tree: None,
            camera_dir: Vector3D::new(0.0, 0.0, -1.0),
            data_replicated: false,
            use_depth_buffer: false,
            render_empty_images: true,
            render_pass: None,
            image_processing_pass: None,
        }
    }

    /// Supply the spatial partition establishing process ordering.
    pub fn set_kd_tree(&mut self, kd_tree: Option<KdTreePartition>) {
        self.kd_tree = kd_tree;
    }

    /// Set the view direction used to order the partition.
    pub fn set_camera_direction(&mut self, dir: Vector3D) {
        self.camera_dir = dir;
    }

    /// Hint that every process holds the full dataset.
    pub fn set_data_replicated(&mut self, replicated: bool) {
        self.data_replicated = replicated;
    }

    /// Composite with per-pixel depth resolve instead of alpha blending.
    pub fn set_use_depth_buffer(&mut self, use_depth: bool) {
        self.use_depth_buffer = use_depth;
    }

    /// Allow skipping the collective for a fully transparent local tile.
    pub fn set_render_empty_images(&mut self, render_empty: bool) {
        self.render_empty_images = render_empty;
    }

    /// Forwarded geometry render pass.
    pub fn set_render_pass(&mut self, pass: Option<Box<dyn RenderPass>>) {
        self.render_pass = pass;
    }

    /// Forwarded post-process image pass.
    pub fn set_image_processing_pass(&mut self, pass: Option<Box<dyn ImageProcessingPass>>) {
        self.image_processing_pass = pass;
    }

    /// Produce the local frame, honoring a forwarded render pass.
    pub fn render_local(&mut self, renderer: &mut dyn Renderer) -> ParvisResult<TileImage> {
        match self.render_pass.as_mut() {
            Some(pass) => pass.render(renderer),
            None => renderer.render(),
        }
    }

    /// Run the collective compositing step on the local tile.
    #[tracing::instrument(skip(self, local))]
    pub fn composite(&mut self, local: TileImage) -> ParvisResult<TileImage> {
        if self.data_replicated {
            // Every process already holds the full dataset; the local render
            // is the composited result and redistribution would be wasted.
            let mut out = local;
            self.run_image_processing(&mut out)?;
            return Ok(out);
        }

        let tiles = self.collective.gather(local, self.tile_group_id)?;
        let mut order: Vec<usize> = (0..tiles.len()).collect();
        if let Some(kd) = &self.kd_tree
            && kd.num_ranks() == tiles.len()
        {
            order = kd.back_to_front_ordering(self.camera_dir);
        }

        let mut composited = self.blend_ordered(&tiles, &order)?;
        self.run_image_processing(&mut composited)?;
        Ok(composited)
    }

    fn blend_ordered(&self, tiles: &[TileImage], order: &[usize]) -> ParvisResult<TileImage> {
        let Some(&first) = order.first() else {
            return Err(ParvisError::render("no tiles to composite"));
        };
        let mut out = tiles[first].clone();

        for &rank in &order[1..] {
            let tile = &tiles[rank];
            if tile.width != out.width || tile.height != out.height {
                return Err(ParvisError::render(
                    "tile dimensions differ across ranks; check image reduction factors",
                ));
            }
            if !self.render_empty_images && tile.is_fully_transparent() {
                continue;
            }
            if self.use_depth_buffer
                && let (Some(dst_depth), Some(src_depth)) = (out.depth.clone(), tile.depth.as_ref())
            {
                let mut depth = dst_depth;
                depth_resolve_in_place(&mut out.data, &mut depth, &tile.data, src_depth)?;
                out.depth = Some(depth);
            } else {
                over_in_place(&mut out.data, &tile.data)?;
            }
        }
        Ok(out)
    }

    fn run_image_processing(&mut self, image: &mut TileImage) -> ParvisResult<()> {
        if let Some(pass) = self.image_processing_pass.as_mut() {
            pass.process(image, self.use_depth_buffer)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/ordered.rs"]
mod tests;
