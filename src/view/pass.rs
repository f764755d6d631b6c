use nalgebra::Matrix4;

use crate::foundation::core::{Bounds, SliceAxis};

/// The two request kinds of the view-update protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestKind {
    /// Pre-render pass: propagate properties, update pipelines, publish
    /// metadata back to the view.
    Update,
    /// Render pass, issued on the rendering processes.
    Render,
}

/// Opaque identity of a renderable actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ActorId(pub u64);

/// The set of actors attached to one renderer.
#[derive(Clone, Debug, Default)]
pub struct ActorRegistry {
    actors: Vec<ActorId>,
}

impl ActorRegistry {
    /// Attach an actor; duplicates are ignored.
    pub fn add_actor(&mut self, actor: ActorId) {
        if !self.actors.contains(&actor) {
            self.actors.push(actor);
        }
    }

    /// Detach an actor if present.
    pub fn remove_actor(&mut self, actor: ActorId) {
        self.actors.retain(|a| *a != actor);
    }

    /// Whether the actor is attached.
    pub fn contains(&self, actor: ActorId) -> bool {
        self.actors.contains(&actor)
    }
}

/// Dedicated per-axis renderers of an orthographic 3-pane layout.
#[derive(Clone, Debug, Default)]
pub struct OrthoPanes {
    /// One renderer per slice axis.
    pub renderers: [ActorRegistry; 3],
}

/// Typed per-pass context written by representations and absorbed by the view
/// after each pass.
///
/// Replaces the ambient bag of named info keys: data bounds, axis titles,
/// delivery-target flags and the model transformation matrix travel here.
#[derive(Clone, Debug, Default)]
pub struct PassContext {
    /// Original (pre-slice) data bounds reported by the representation.
    pub data_bounds: Option<Bounds>,
    /// Axis display titles reported by the representation.
    pub axis_titles: [Option<String>; 3],
    /// Force geometry delivery to both the client and the rendering
    /// processes, bypassing delivery heuristics.
    pub deliver_to_client_and_rendering: bool,
    /// Model transformation matrix for view-level widgets.
    pub model_transform: Option<Matrix4<f64>>,
}

/// Shared state of a multi-slice render view.
///
/// Owns the per-axis slice position lists that representations consume during
/// `Update`, and accumulates the metadata representations publish back.
#[derive(Clone, Debug, Default)]
pub struct MultiSliceViewState {
    slices: [Vec<f64>; 3],
    data_bounds: Bounds,
    axis_titles: [Option<String>; 3],
    model_transform: Option<Matrix4<f64>>,
    /// Renderer of the default single-renderer layout.
    pub default_renderer: ActorRegistry,
    /// Per-axis pane renderers when this view hosts an orthographic layout.
    pub ortho_panes: Option<OrthoPanes>,
}

impl MultiSliceViewState {
    /// Create a view with uninitialized accumulated bounds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Slice positions the view requests along `axis`.
    pub fn slices(&self, axis: SliceAxis) -> &[f64] {
        &self.slices[axis.index()]
    }

    /// Replace the slice positions for `axis`.
    pub fn set_slices(&mut self, axis: SliceAxis, positions: Vec<f64>) {
        self.slices[axis.index()] = positions;
    }

    /// Accumulated data bounds across representations.
    pub fn data_bounds(&self) -> Bounds {
        self.data_bounds
    }

    /// Axis title published for `axis`, if any.
    pub fn axis_title(&self, axis: SliceAxis) -> Option<&str> {
        self.axis_titles[axis.index()].as_deref()
    }

    /// Active model transformation matrix, if any.
    pub fn model_transform(&self) -> Option<&Matrix4<f64>> {
        self.model_transform.as_ref()
    }

    /// Reset accumulated per-frame metadata before a new update round.
    pub fn reset_pass_metadata(&mut self) {
        self.data_bounds = Bounds::uninitialized();
        self.axis_titles = [None, None, None];
    }

    /// Merge a finished pass context into the view state.
    pub fn absorb(&mut self, ctx: &PassContext) {
        if let Some(bounds) = &ctx.data_bounds {
            self.data_bounds.add(bounds);
        }
        for axis in SliceAxis::ALL {
            if let Some(title) = &ctx.axis_titles[axis.index()] {
                self.axis_titles[axis.index()] = Some(title.clone());
            }
        }
        if let Some(m) = ctx.model_transform {
            self.model_transform = Some(m);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/view/pass.rs"]
mod tests;
