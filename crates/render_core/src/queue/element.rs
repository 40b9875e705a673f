//! Render queue element
//!
//! The leaf data record of the submission path: one drawable unit, captured
//! as a value snapshot at `add` time. Cloning is two `Arc` bumps plus a
//! handful of plain fields, cheap enough for sort strategies that copy.

use std::sync::Arc;

use crate::foundation::math::Vec3;
use crate::resources::{MaterialProxy, MeshProxy};

/// Contains data needed for performing a single rendering pass
///
/// Immutable per frame: once added to the queue its fields never mutate.
/// The element holds resolved, render-ready proxy references and never
/// dereferences back into the scene graph.
#[derive(Debug, Clone)]
pub struct RenderQueueElement {
    /// Shared reference to the resolved material description
    pub material: Arc<MaterialProxy>,

    /// Shared reference to the resolved mesh description
    pub mesh: Arc<MeshProxy>,

    /// World-space anchor used for distance-based sort keys
    pub world_position: Vec3,

    /// Render pass of the material's technique to use; defaults to 0
    pub pass_idx: u32,
}

impl RenderQueueElement {
    /// Create an element for pass 0 of the material's technique
    #[must_use]
    pub fn new(material: Arc<MaterialProxy>, mesh: Arc<MeshProxy>, world_position: Vec3) -> Self {
        Self {
            material,
            mesh,
            world_position,
            pass_idx: 0,
        }
    }

    /// Create an element for an explicit pass index
    ///
    /// Callers validate the index against the material's technique; see
    /// [`RenderQueue::add_for_pass`](crate::queue::RenderQueue::add_for_pass).
    #[must_use]
    pub fn for_pass(
        material: Arc<MaterialProxy>,
        mesh: Arc<MeshProxy>,
        world_position: Vec3,
        pass_idx: u32,
    ) -> Self {
        Self {
            material,
            mesh,
            world_position,
            pass_idx,
        }
    }
}
