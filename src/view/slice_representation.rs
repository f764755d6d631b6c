use crate::foundation::core::{Bounds, SliceAxis};
use crate::foundation::error::ParvisResult;
use crate::foundation::math::next_mtime;
use crate::geometry::dataset::DataSet;
use crate::geometry::slice_filter::{SliceGeometryFilter, extract_cached_bounds};
use crate::view::pass::{ActorId, MultiSliceViewState, PassContext, RequestKind};

/// Which slice planes this representation shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SliceMode {
    /// Only the planes along one axis, as used by an orthographic pane.
    AxisOnly(SliceAxis),
    /// All three plane families.
    All,
}

impl SliceMode {
    fn wants(self, axis: SliceAxis) -> bool {
        match self {
            SliceMode::AxisOnly(a) => a == axis,
            SliceMode::All => true,
        }
    }
}

/// Representation of sliced geometry inside a multi-slice view.
///
/// Owns a [`SliceGeometryFilter`], consumes the view's per-axis slice
/// positions during `Update` passes, and publishes the original (pre-slice)
/// data bounds and basis axis titles back so the view UI can show true data
/// extents rather than sliced-surface extents.
pub struct SliceRepresentation {
    /// Display mode; `All` participates in the default layout, `AxisOnly`
    /// drives one orthographic pane.
    mode: SliceMode,
    visible: bool,
    filter: SliceGeometryFilter,
    actor: ActorId,

    input: Option<DataSet>,
    cached_output: Option<DataSet>,

    original_data_bounds: Bounds,
    axis_labels: [Option<String>; 3],

    mtime: u64,
    update_time: u64,
}

impl SliceRepresentation {
    /// Representation in the given mode with a default cutter.
    pub fn new(mode: SliceMode, actor: ActorId) -> Self {
        Self {
            mode,
            visible: true,
            filter: SliceGeometryFilter::default(),
            actor,
            input: None,
            cached_output: None,
            original_data_bounds: Bounds::uninitialized(),
            axis_labels: [None, None, None],
            mtime: next_mtime(),
            update_time: 0,
        }
    }

    /// Display mode.
    pub fn mode(&self) -> SliceMode {
        self.mode
    }

    /// Show or hide the representation. Invisible representations do not
    /// participate in view requests at all.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Replace the upstream dataset and mark the representation stale.
    pub fn set_input(&mut self, input: DataSet) {
        self.input = Some(input);
        self.mark_modified();
    }

    /// Original (pre-slice) bounds recovered by the last successful pass.
    pub fn original_data_bounds(&self) -> Bounds {
        self.original_data_bounds
    }

    /// The filter's most recent output, kept so metadata extraction does not
    /// re-touch the pipeline.
    pub fn cached_output(&self) -> Option<&DataSet> {
        self.cached_output.as_ref()
    }

    fn mark_modified(&mut self) {
        self.mtime = next_mtime();
    }

    fn needs_update(&self) -> bool {
        self.mtime > self.update_time
    }

    /// Handle one view request. Returns `false` when the representation did
    /// not participate (invisible), `true` otherwise.
    pub fn process_view_request(
        &mut self,
        kind: RequestKind,
        view: &mut MultiSliceViewState,
        ctx: &mut PassContext,
    ) -> ParvisResult<bool> {
        if !self.visible {
            return Ok(false);
        }

        if kind == RequestKind::Update {
            // Propagate slice parameters from the view to the filter. Axes
            // outside this representation's mode get an empty sequence so a
            // single-axis representation never shows foreign planes.
            for axis in SliceAxis::ALL {
                if self.mode.wants(axis) {
                    self.filter.set_slice_positions(axis, view.slices(axis));
                } else {
                    self.filter.set_slice_positions(axis, &[]);
                }
            }
            if self.filter.mtime() > self.mtime {
                self.mark_modified();
            }
        }

        // Inherited geometry-representation behavior: regenerate when stale.
        let succeeded = match kind {
            RequestKind::Update => {
                if self.needs_update() {
                    self.run_request_data()?
                } else {
                    true
                }
            }
            RequestKind::Render => true,
        };

        if succeeded && kind == RequestKind::Update {
            ctx.data_bounds = self
                .original_data_bounds
                .is_initialized()
                .then_some(self.original_data_bounds);
            for axis in SliceAxis::ALL {
                ctx.axis_titles[axis.index()] = self.axis_labels[axis.index()].clone();
            }
            if self.mode != SliceMode::All {
                // Orthographic panes do not participate in parallel or tiled
                // compositing; their geometry must reach both the client and
                // the rendering processes unconditionally.
                ctx.deliver_to_client_and_rendering = true;
            }
        }

        if kind == RequestKind::Render {
            // Publish the basis attached to the actual rendered data object,
            // so slice handles and axis indicators render in the transformed
            // frame.
            ctx.model_transform = self
                .cached_output
                .as_ref()
                .and_then(|data| data.field_data.basis.as_ref())
                .map(|basis| basis.matrix);
        }

        view.absorb(ctx);
        Ok(succeeded)
    }

    /// Run the data pass: regenerate sliced geometry and refresh cached
    /// bounds/labels from the output metadata.
    #[tracing::instrument(skip(self))]
    fn run_request_data(&mut self) -> ParvisResult<bool> {
        // Unset first so a failed pass cannot leave stale carry-over.
        self.original_data_bounds = Bounds::uninitialized();
        self.axis_labels = [None, None, None];

        let Some(input) = self.input.as_ref() else {
            return Ok(false);
        };

        let output = self.filter.request_data(input)?;
        if let Some(bounds) = extract_cached_bounds(&output) {
            self.original_data_bounds = bounds;
        }
        if let Some(basis) = &output.field_data.basis {
            for axis in SliceAxis::ALL {
                self.axis_labels[axis.index()] = basis.axis_names[axis.index()].clone();
            }
        }
        self.cached_output = Some(output);
        self.update_time = next_mtime();
        Ok(true)
    }

    /// Attach this representation's actor to `view`.
    ///
    /// A single-axis representation inside an orthographic container goes on
    /// that axis's dedicated pane renderer; everything else goes on the
    /// default renderer.
    pub fn add_to_view(&self, view: &mut MultiSliceViewState) {
        if let (Some(panes), SliceMode::AxisOnly(axis)) = (view.ortho_panes.as_mut(), self.mode) {
            panes.renderers[axis.index()].add_actor(self.actor);
            return;
        }
        view.default_renderer.add_actor(self.actor);
    }

    /// Detach this representation's actor from `view`.
    pub fn remove_from_view(&self, view: &mut MultiSliceViewState) {
        if let (Some(panes), SliceMode::AxisOnly(axis)) = (view.ortho_panes.as_mut(), self.mode) {
            panes.renderers[axis.index()].remove_actor(self.actor);
            return;
        }
        view.default_renderer.remove_actor(self.actor);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/view/slice_representation.rs"]
mod tests;
