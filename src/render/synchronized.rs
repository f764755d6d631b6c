use crate::foundation::error::{ParvisError, ParvisResult};
use crate::geometry::mesh::Vector3D;
use crate::render::backend::Renderer;
use crate::render::image::TileImage;
use crate::render::kdtree::KdTreePartition;
use crate::render::ordered::{CompositingCollective, OrderedCompositor};
use crate::render::passes::{ImageProcessingPass, RenderPass};
use crate::render::relay::{ClientRelaySynchronizer, RelayedImage};
use crate::session::{Session, SynchronizerMode};

/// Compositing path, resolved once at [`SynchronizedRenderer::initialize`]
/// and frozen for the renderer's lifetime.
enum Backend {
    /// Single process: render unmodified.
    PassThrough,
    /// Multi-process ordered compositing; servers additionally relay the
    /// composited frame to the client from the root rank.
    OrderedComposite {
        compositor: OrderedCompositor,
        relay: Option<ClientRelaySynchronizer>,
    },
    /// Client-server image relay without in-group compositing.
    ClientRelay { relay: ClientRelaySynchronizer },
}

/// Per-process renderer synchronization.
///
/// Owns exactly one target renderer and makes it render correctly whether
/// this process is a single builtin process, an MPI-parallel batch or
/// tiled-display process, a render-server process, or a thin client
/// receiving composited images. All mode selection happens once at
/// `initialize`; afterwards only the explicit enable/disable toggles change
/// behavior.
pub struct SynchronizedRenderer {
    renderer: Box<dyn Renderer>,
    backend: Backend,
    mode: SynchronizerMode,
    enabled: bool,
    disable_ordered_compositing: bool,
    image_reduction_factor: u32,
    render_pass: Option<Box<dyn RenderPass>>,
    image_processing_pass: Option<Box<dyn ImageProcessingPass>>,
    use_depth_buffer: bool,
    last_client_payload: Option<RelayedImage>,
}

impl SynchronizedRenderer {
    /// Wrap the renderer to be synchronized. Call
    /// [`initialize`](Self::initialize) before the first render.
    pub fn new(renderer: Box<dyn Renderer>) -> Self {
        Self {
            renderer,
            backend: Backend::PassThrough,
            mode: SynchronizerMode::Invalid,
            enabled: true,
            disable_ordered_compositing: false,
            image_reduction_factor: 1,
            render_pass: None,
            image_processing_pass: None,
            use_depth_buffer: false,
            last_client_payload: None,
        }
    }

    /// Disable the ordered-compositing path. Must be set before
    /// [`initialize`](Self::initialize) to take effect.
    pub fn set_disable_ordered_compositing(&mut self, disable: bool) {
        self.disable_ordered_compositing = disable;
    }

    /// Resolved topology role.
    pub fn mode(&self) -> SynchronizerMode {
        self.mode
    }

    /// One-time setup from the session topology.
    ///
    /// `id` disambiguates concurrent view instances sharing one tiled
    /// display so tiles are routed to the correct group. `collective` is the
    /// ordered-compositing transport; when absent (or explicitly disabled)
    /// the renderer silently degrades to the relay or pass-through path —
    /// never a hard error.
    pub fn initialize(
        &mut self,
        session: &Session,
        id: u32,
        collective: Option<Box<dyn CompositingCollective>>,
    ) -> ParvisResult<()> {
        if self.mode != SynchronizerMode::Invalid {
            return Err(ParvisError::validation(
                "SynchronizedRenderer already initialized",
            ));
        }
        self.mode = session.mode();

        let wants_ordered = session.num_processes() > 1 && !self.disable_ordered_compositing;
        self.backend = match self.mode {
            SynchronizerMode::Builtin | SynchronizerMode::Invalid => Backend::PassThrough,
            SynchronizerMode::Client => Backend::ClientRelay {
                relay: ClientRelaySynchronizer::default(),
            },
            SynchronizerMode::Server | SynchronizerMode::Batch => {
                match (wants_ordered, collective) {
                    (true, Some(collective)) => {
                        tracing::debug!(id, "using ordered compositing");
                        Backend::OrderedComposite {
                            compositor: OrderedCompositor::new(collective, id),
                            relay: (self.mode == SynchronizerMode::Server
                                && session.rank() == 0)
                                .then(ClientRelaySynchronizer::default),
                        }
                    }
                    _ if self.mode == SynchronizerMode::Server => Backend::ClientRelay {
                        relay: ClientRelaySynchronizer::default(),
                    },
                    _ => Backend::PassThrough,
                }
            }
        };
        self.setup_passes();
        Ok(())
    }

    /// Enable or disable synchronization entirely. Disabled renderers render
    /// unmodified — the diagnostic bypass.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether synchronization is active.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Supply the spatial partition for back-to-front process ordering.
    /// Ignored outside the ordered-compositing path.
    pub fn set_kd_tree(&mut self, kd_tree: Option<KdTreePartition>) {
        if let Backend::OrderedComposite { compositor, .. } = &mut self.backend {
            compositor.set_kd_tree(kd_tree);
        }
    }

    /// Set the view direction used to order the partition.
    pub fn set_camera_direction(&mut self, dir: Vector3D) {
        if let Backend::OrderedComposite { compositor, .. } = &mut self.backend {
            compositor.set_camera_direction(dir);
        }
    }

    /// Set the image reduction factor (>= 1). Must be set identically on
    /// every cooperating process; a mismatch corrupts tile reassembly and is
    /// not detected here.
    pub fn set_image_reduction_factor(&mut self, factor: u32) -> ParvisResult<()> {
        if factor == 0 {
            return Err(ParvisError::validation(
                "image reduction factor must be >= 1",
            ));
        }
        self.image_reduction_factor = factor;
        match &mut self.backend {
            Backend::OrderedComposite { relay: Some(relay), .. }
            | Backend::ClientRelay { relay } => relay.set_image_reduction_factor(factor),
            _ => {}
        }
        Ok(())
    }

    /// Current image reduction factor.
    pub fn image_reduction_factor(&self) -> u32 {
        self.image_reduction_factor
    }

    /// Hint that the dataset is replicated on every process. Pure
    /// performance hint; wrong-false is safe, wrong-true may duplicate
    /// compositing work.
    pub fn set_data_replicated_on_all_processes(&mut self, replicated: bool) {
        if let Backend::OrderedComposite { compositor, .. } = &mut self.backend {
            compositor.set_data_replicated(replicated);
        }
    }

    /// Let image-processing passes read the depth buffer, and composite by
    /// depth resolve where rank tiles carry depth.
    pub fn set_use_depth_buffer(&mut self, use_depth: bool) {
        self.use_depth_buffer = use_depth;
        if let Backend::OrderedComposite { compositor, .. } = &mut self.backend {
            compositor.set_use_depth_buffer(use_depth);
        }
    }

    /// Enable or disable the empty-images optimization.
    pub fn set_render_empty_images(&mut self, render_empty: bool) {
        if let Backend::OrderedComposite { compositor, .. } = &mut self.backend {
            compositor.set_render_empty_images(render_empty);
        }
    }

    /// Pass the compressor configuration to the client-relay synchronizer,
    /// if any. Compression is irrelevant to in-cluster ordered compositing,
    /// which stays raw for speed.
    pub fn configure_compressor(&mut self, configuration: &str) -> ParvisResult<()> {
        match &mut self.backend {
            Backend::OrderedComposite { relay: Some(relay), .. }
            | Backend::ClientRelay { relay } => relay.configure_compressor(configuration),
            _ => Ok(()),
        }
    }

    /// Toggle lossless compression on the client-relay synchronizer, if any.
    pub fn set_lossless_compression(&mut self, lossless: bool) {
        match &mut self.backend {
            Backend::OrderedComposite { relay: Some(relay), .. }
            | Backend::ClientRelay { relay } => relay.set_lossless_compression(lossless),
            _ => {}
        }
    }

    /// Inject the geometry render pass. Forwarded to the ordered compositor
    /// when that owns the render loop, kept and run directly otherwise.
    pub fn set_render_pass(&mut self, pass: Option<Box<dyn RenderPass>>) {
        if let Backend::OrderedComposite { compositor, .. } = &mut self.backend {
            compositor.set_render_pass(pass);
        } else {
            self.render_pass = pass;
        }
    }

    /// Inject the post-process image pass, with the same forwarding rule as
    /// [`set_render_pass`](Self::set_render_pass).
    pub fn set_image_processing_pass(&mut self, pass: Option<Box<dyn ImageProcessingPass>>) {
        if let Backend::OrderedComposite { compositor, .. } = &mut self.backend {
            compositor.set_image_processing_pass(pass);
        } else {
            self.image_processing_pass = pass;
        }
    }

    /// Re-wire passes injected before `initialize` to whoever ended up
    /// owning the render loop.
    fn setup_passes(&mut self) {
        if let Backend::OrderedComposite { compositor, .. } = &mut self.backend {
            if let Some(pass) = self.render_pass.take() {
                compositor.set_render_pass(Some(pass));
            }
            if let Some(pass) = self.image_processing_pass.take() {
                compositor.set_image_processing_pass(Some(pass));
            }
        }
    }

    /// Render one synchronized frame and return the local display image.
    ///
    /// On a server root rank the frame packaged for the client is available
    /// from [`take_client_payload`](Self::take_client_payload) afterwards.
    #[tracing::instrument(skip(self))]
    pub fn render(&mut self) -> ParvisResult<TileImage> {
        if !self.enabled {
            return self.renderer.render();
        }

        let (full_w, full_h) = self.renderer.viewport_size();
        let factor = self.image_reduction_factor;

        match &mut self.backend {
            Backend::PassThrough => {
                let mut frame = match self.render_pass.as_mut() {
                    Some(pass) => pass.render(self.renderer.as_mut())?,
                    None => self.renderer.render()?,
                };
                if let Some(pass) = self.image_processing_pass.as_mut() {
                    pass.process(&mut frame, self.use_depth_buffer)?;
                }
                Ok(frame)
            }
            Backend::OrderedComposite { compositor, relay } => {
                let local = compositor.render_local(self.renderer.as_mut())?;
                let reduced = local.reduce(factor)?;
                let composited = compositor.composite(reduced)?;
                if let Some(relay) = relay {
                    self.last_client_payload =
                        Some(relay.relay(&composited, (full_w, full_h))?);
                }
                composited.upscale_to(full_w, full_h)
            }
            Backend::ClientRelay { relay } => {
                let mut frame = match self.render_pass.as_mut() {
                    Some(pass) => pass.render(self.renderer.as_mut())?,
                    None => self.renderer.render()?,
                };
                if let Some(pass) = self.image_processing_pass.as_mut() {
                    pass.process(&mut frame, self.use_depth_buffer)?;
                }
                if self.mode == SynchronizerMode::Server {
                    let reduced = frame.reduce(factor)?;
                    self.last_client_payload = Some(relay.relay(&reduced, (full_w, full_h))?);
                }
                Ok(frame)
            }
        }
    }

    /// Take the most recent frame packaged for the client, if this process
    /// relays to one.
    pub fn take_client_payload(&mut self) -> Option<RelayedImage> {
        self.last_client_payload.take()
    }

    /// Client side: restore a relayed frame to display resolution.
    pub fn receive_client_payload(&mut self, payload: &RelayedImage) -> ParvisResult<TileImage> {
        match &self.backend {
            Backend::ClientRelay { relay } => relay.receive(payload),
            _ => Err(ParvisError::render(
                "only a client-relay renderer can receive client payloads",
            )),
        }
    }

    /// The parallel ordered-compositing synchronizer, when active. Exposed
    /// for advanced inspection; subject to change without notice.
    pub fn parallel_synchronizer(&self) -> Option<&OrderedCompositor> {
        match &self.backend {
            Backend::OrderedComposite { compositor, .. } => Some(compositor),
            _ => None,
        }
    }

    /// The client-server relay synchronizer, when active. Exposed for
    /// advanced inspection; subject to change without notice.
    pub fn client_synchronizer(&self) -> Option<&ClientRelaySynchronizer> {
        match &self.backend {
            Backend::OrderedComposite { relay, .. } => relay.as_ref(),
            Backend::ClientRelay { relay } => Some(relay),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/synchronized.rs"]
mod tests;
