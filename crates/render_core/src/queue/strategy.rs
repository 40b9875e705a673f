//! Sort strategies
//!
//! The pluggable ordering policies behind [`RenderQueue::sort`]. A strategy
//! reads only the unsorted element slice and writes the complete result into
//! the sorted buffer; it must be deterministic for a fixed input, and must
//! break ties by insertion order (stable) so equal-key elements do not
//! flicker between frames.
//!
//! [`RenderQueue::sort`]: crate::queue::RenderQueue::sort

use std::collections::HashMap;
use std::fmt;

use crate::foundation::math::{distance_squared, Vec3};
use crate::resources::MaterialId;

use super::RenderQueueElement;

/// Pluggable policy that orders queued elements for submission
///
/// Renderers select a strategy by injecting an implementation into the
/// queue, not through a data-driven flag.
pub trait SortStrategy: fmt::Debug {
    /// Strategy name for logging and diagnostics
    fn name(&self) -> &str;

    /// Produce the render-ready ordering
    ///
    /// Reads only from `unsorted`; replaces the contents of `sorted` with
    /// the complete result. The default strategies all produce permutations
    /// of the input, though a batching policy is free to merge or filter.
    /// Complexity target is O(n log n) in the element count.
    fn sort(&self, unsorted: &[RenderQueueElement], sorted: &mut Vec<RenderQueueElement>);
}

/// Stable insertion-order passthrough
///
/// The documented default: with no renderer-supplied policy, elements are
/// submitted in the order scene traversal added them.
#[derive(Debug, Clone, Copy, Default)]
pub struct InsertionOrder;

impl SortStrategy for InsertionOrder {
    fn name(&self) -> &str {
        "insertion_order"
    }

    fn sort(&self, unsorted: &[RenderQueueElement], sorted: &mut Vec<RenderQueueElement>) {
        sorted.clear();
        sorted.extend_from_slice(unsorted);
    }
}

/// Depth ordering direction for distance-based sorts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthOrder {
    /// Nearest first; maximizes early-z rejection for opaque geometry
    FrontToBack,
    /// Farthest first; required for correct alpha blending
    BackToFront,
}

/// Stable sort by distance from a reference point
///
/// Keys on squared distance; `f32::total_cmp` keeps the ordering total and
/// bit-deterministic even for degenerate positions.
#[derive(Debug, Clone, Copy)]
pub struct DistanceSort {
    /// Point distances are measured from, typically the camera position
    pub reference: Vec3,

    /// Ordering direction
    pub order: DepthOrder,
}

impl DistanceSort {
    /// Front-to-back sort from the given reference point
    #[must_use]
    pub const fn front_to_back(reference: Vec3) -> Self {
        Self {
            reference,
            order: DepthOrder::FrontToBack,
        }
    }

    /// Back-to-front sort from the given reference point
    #[must_use]
    pub const fn back_to_front(reference: Vec3) -> Self {
        Self {
            reference,
            order: DepthOrder::BackToFront,
        }
    }
}

impl SortStrategy for DistanceSort {
    fn name(&self) -> &str {
        match self.order {
            DepthOrder::FrontToBack => "distance_front_to_back",
            DepthOrder::BackToFront => "distance_back_to_front",
        }
    }

    fn sort(&self, unsorted: &[RenderQueueElement], sorted: &mut Vec<RenderQueueElement>) {
        sorted.clear();
        sorted.extend_from_slice(unsorted);

        // Vec::sort_by is stable, so equal distances keep insertion order.
        sorted.sort_by(|a, b| {
            let da = distance_squared(&a.world_position, &self.reference);
            let db = distance_squared(&b.world_position, &self.reference);
            match self.order {
                DepthOrder::FrontToBack => da.total_cmp(&db),
                DepthOrder::BackToFront => db.total_cmp(&da),
            }
        });
    }
}

/// Group elements by material to minimize GPU state changes
///
/// Groups appear in first-appearance order and elements keep their insertion
/// order within a group, so the result is a stable, deterministic
/// permutation of the input.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialBatch;

impl SortStrategy for MaterialBatch {
    fn name(&self) -> &str {
        "material_batch"
    }

    fn sort(&self, unsorted: &[RenderQueueElement], sorted: &mut Vec<RenderQueueElement>) {
        sorted.clear();

        let mut group_order: Vec<MaterialId> = Vec::new();
        let mut groups: HashMap<MaterialId, Vec<RenderQueueElement>> = HashMap::new();

        for element in unsorted {
            let id = element.material.id();
            groups
                .entry(id)
                .or_insert_with(|| {
                    group_order.push(id);
                    Vec::new()
                })
                .push(element.clone());
        }

        for id in group_order {
            if let Some(group) = groups.remove(&id) {
                sorted.extend(group);
            }
        }
    }
}

/// Opaque front-to-back, then transparent back-to-front
///
/// The classic renderer policy: opaque geometry first for early-z, then
/// alpha-blended geometry farthest-first for correct compositing. Elements
/// are routed by [`MaterialProxy::is_transparent`].
///
/// [`MaterialProxy::is_transparent`]: crate::resources::MaterialProxy::is_transparent
#[derive(Debug, Clone, Copy)]
pub struct AlphaSplit {
    /// Camera position both depth sorts measure from
    pub camera_position: Vec3,
}

impl AlphaSplit {
    /// Create the policy for the given camera position
    #[must_use]
    pub const fn new(camera_position: Vec3) -> Self {
        Self { camera_position }
    }
}

impl SortStrategy for AlphaSplit {
    fn name(&self) -> &str {
        "alpha_split"
    }

    fn sort(&self, unsorted: &[RenderQueueElement], sorted: &mut Vec<RenderQueueElement>) {
        sorted.clear();

        let mut transparent: Vec<RenderQueueElement> = Vec::new();
        for element in unsorted {
            if element.material.is_transparent() {
                transparent.push(element.clone());
            } else {
                sorted.push(element.clone());
            }
        }

        let near_first = |a: &RenderQueueElement, b: &RenderQueueElement| {
            let da = distance_squared(&a.world_position, &self.camera_position);
            let db = distance_squared(&b.world_position, &self.camera_position);
            da.total_cmp(&db)
        };

        sorted.sort_by(near_first);
        transparent.sort_by(|a, b| near_first(b, a));
        sorted.extend(transparent);
    }
}
