//! Render queue
//!
//! Append-only per-frame collection of drawable elements, finalized once per
//! frame by a pluggable sort. One queue instance persists across frames and
//! is logically reset by `clear()` to amortize allocation.

use std::time::Instant;

use thiserror::Error;

use crate::foundation::math::Vec3;
use crate::resources::{MaterialProxy, MeshProxy};
use std::sync::Arc;

use super::strategy::{InsertionOrder, SortStrategy};
use super::RenderQueueElement;

/// Errors raised while populating the render queue
#[derive(Debug, Error)]
pub enum QueueError {
    /// Requested pass index is outside the material's technique
    #[error("pass index {pass_idx} out of range for material '{material}' ({pass_count} passes)")]
    PassOutOfRange {
        /// Material whose technique was indexed
        material: String,
        /// Requested pass index
        pass_idx: u32,
        /// Number of passes the technique actually has
        pass_count: u32,
    },
}

/// Per-sort statistics for diagnostics
#[derive(Debug, Clone, Copy, Default)]
pub struct QueueStats {
    /// Number of elements ordered by the last sort
    pub element_count: usize,

    /// Time the last sort took (microseconds)
    pub sort_time_us: u64,
}

/// Per-frame collection of drawables with a pluggable sort step
///
/// Determines the rendering order of the elements contained within it.
/// Ordering is renderer-defined: inject a [`SortStrategy`] tied to the
/// renderer (transparency ordering, state-change minimization) at
/// construction or via [`set_strategy`](Self::set_strategy).
///
/// Single-writer: one scene-traversal producer populates the queue per
/// frame; the collection is not internally thread-safe.
///
/// # Frame lifecycle
///
/// `clear()` → `add()` per visible drawable → `sort()` exactly once →
/// `sorted_elements()` drives GPU submission. Calling `add` after `sort`
/// without an intervening re-sort is legal but leaves the sorted view stale;
/// [`needs_sort`](Self::needs_sort) exposes that staleness to callers that
/// want to fail fast instead.
#[derive(Debug)]
pub struct RenderQueue {
    /// Unsorted elements in insertion order
    elements: Vec<RenderQueueElement>,

    /// Output of the most recent sort
    sorted: Vec<RenderQueueElement>,

    /// Ordering policy
    strategy: Box<dyn SortStrategy>,

    /// True when `sorted` is stale relative to `elements`
    needs_sort: bool,

    /// Statistics from the most recent sort
    stats: QueueStats,
}

impl RenderQueue {
    /// Create a queue with the default [`InsertionOrder`] strategy
    ///
    /// The default is a stable insertion-order passthrough, keeping the
    /// sort contract well-defined when no renderer policy is supplied.
    #[must_use]
    pub fn new() -> Self {
        Self::with_strategy(Box::new(InsertionOrder))
    }

    /// Create a queue with a renderer-supplied sort strategy
    #[must_use]
    pub fn with_strategy(strategy: Box<dyn SortStrategy>) -> Self {
        Self {
            elements: Vec::new(),
            sorted: Vec::new(),
            strategy,
            needs_sort: false,
            stats: QueueStats::default(),
        }
    }

    /// Create a queue with pre-allocated element storage
    #[must_use]
    pub fn with_capacity(strategy: Box<dyn SortStrategy>, capacity: usize) -> Self {
        Self {
            elements: Vec::with_capacity(capacity),
            sorted: Vec::with_capacity(capacity),
            strategy,
            needs_sort: false,
            stats: QueueStats::default(),
        }
    }

    /// Replace the sort strategy
    ///
    /// The current sorted view becomes stale until the next [`sort`](Self::sort).
    pub fn set_strategy(&mut self, strategy: Box<dyn SortStrategy>) {
        self.strategy = strategy;
        self.needs_sort = !self.elements.is_empty();
    }

    /// Append a drawable for pass 0 of its material's technique
    ///
    /// The material and mesh are resolved, render-ready proxies; resolution
    /// (asset loads, GPU upload) happens upstream before `add` is called.
    /// O(1) amortized, no side effect beyond appending.
    ///
    /// # Errors
    /// Never fails for pass 0: every constructed material has at least one
    /// pass. The `Result` keeps the signature uniform with
    /// [`add_for_pass`](Self::add_for_pass).
    pub fn add(
        &mut self,
        material: Arc<MaterialProxy>,
        mesh: Arc<MeshProxy>,
        world_position_for_sort: Vec3,
    ) -> Result<(), QueueError> {
        self.add_for_pass(material, mesh, world_position_for_sort, 0)
    }

    /// Append a drawable for an explicit pass of its material's technique
    ///
    /// # Errors
    /// Returns [`QueueError::PassOutOfRange`] when the material's technique
    /// has no pass `pass_idx`; the queue state is left untouched.
    pub fn add_for_pass(
        &mut self,
        material: Arc<MaterialProxy>,
        mesh: Arc<MeshProxy>,
        world_position_for_sort: Vec3,
        pass_idx: u32,
    ) -> Result<(), QueueError> {
        if material.pass(pass_idx).is_none() {
            return Err(QueueError::PassOutOfRange {
                material: material.name().to_owned(),
                pass_idx,
                pass_count: material.pass_count(),
            });
        }

        self.elements.push(RenderQueueElement::for_pass(
            material,
            mesh,
            world_position_for_sort,
            pass_idx,
        ));
        self.needs_sort = true;
        Ok(())
    }

    /// Clear all render operations from the queue
    ///
    /// Empties both the unsorted and sorted sequences, releasing every
    /// proxy share the queue held this frame. Idempotent; retains capacity
    /// so a persistent queue does not reallocate every frame.
    pub fn clear(&mut self) {
        self.elements.clear();
        self.sorted.clear();
        self.needs_sort = false;
    }

    /// Sort all queued elements using the configured strategy
    ///
    /// Runs once per frame after traversal completes. The strategy reads
    /// only the unsorted sequence and writes the complete result into the
    /// sorted sequence; ties are broken by insertion order.
    pub fn sort(&mut self) {
        let start = Instant::now();
        self.strategy.sort(&self.elements, &mut self.sorted);
        self.needs_sort = false;

        self.stats = QueueStats {
            element_count: self.elements.len(),
            sort_time_us: start.elapsed().as_micros() as u64,
        };
        log::trace!(
            "sorted {} elements with '{}' in {}us",
            self.stats.element_count,
            self.strategy.name(),
            self.stats.sort_time_us
        );
    }

    /// The sorted render elements from the most recent [`sort`](Self::sort)
    ///
    /// Constant time, read-only. Caller contract: only reflects current
    /// contents after a `sort` that followed the last `add`/`clear`; an
    /// interleaved `add` leaves this view stale until the next `sort`.
    /// Check [`needs_sort`](Self::needs_sort) to fail fast instead.
    #[must_use]
    pub fn sorted_elements(&self) -> &[RenderQueueElement] {
        &self.sorted
    }

    /// True when the sorted view is stale relative to the queued elements
    #[must_use]
    pub const fn needs_sort(&self) -> bool {
        self.needs_sort
    }

    /// Number of elements added since the last clear
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// True when no elements have been added since the last clear
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Statistics from the most recent sort
    #[must_use]
    pub const fn stats(&self) -> QueueStats {
        self.stats
    }
}

impl Default for RenderQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::strategy::DistanceSort;
    use crate::resources::{
        BufferHandle, MaterialId, MaterialPass, MeshId, SubMesh,
    };

    fn material(id: u32, passes: u32) -> Arc<MaterialProxy> {
        let passes = (0..passes)
            .map(|i| MaterialPass::opaque(format!("pass_{i}")))
            .collect();
        Arc::new(MaterialProxy::new(MaterialId(id), format!("mat_{id}"), passes).unwrap())
    }

    fn mesh(id: u32) -> Arc<MeshProxy> {
        Arc::new(
            MeshProxy::new(
                MeshId(id),
                format!("mesh_{id}"),
                BufferHandle(u64::from(id)),
                BufferHandle(u64::from(id) + 100),
                SubMesh::new(0, 36),
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_add_defaults_to_pass_zero() {
        let mut queue = RenderQueue::new();
        queue.add(material(0, 1), mesh(0), Vec3::zeros()).unwrap();

        assert_eq!(queue.len(), 1);
        assert!(queue.needs_sort());
        queue.sort();
        assert_eq!(queue.sorted_elements()[0].pass_idx, 0);
    }

    #[test]
    fn test_add_for_pass_validates_index() {
        let mut queue = RenderQueue::new();
        let two_pass = material(0, 2);

        queue
            .add_for_pass(two_pass.clone(), mesh(0), Vec3::zeros(), 1)
            .unwrap();
        let err = queue
            .add_for_pass(two_pass, mesh(1), Vec3::zeros(), 2)
            .unwrap_err();

        assert!(matches!(
            err,
            QueueError::PassOutOfRange {
                pass_idx: 2,
                pass_count: 2,
                ..
            }
        ));
        // Rejected add must not corrupt queue state.
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut queue = RenderQueue::new();
        queue.add(material(0, 1), mesh(0), Vec3::zeros()).unwrap();
        queue.add(material(1, 1), mesh(1), Vec3::zeros()).unwrap();

        queue.clear();
        queue.clear();

        assert!(queue.is_empty());
        queue.sort();
        assert!(queue.sorted_elements().is_empty());
    }

    #[test]
    fn test_clear_releases_proxy_shares() {
        let shared_material = material(0, 1);
        let mut queue = RenderQueue::new();
        queue
            .add(shared_material.clone(), mesh(0), Vec3::zeros())
            .unwrap();
        queue.sort();
        assert_eq!(Arc::strong_count(&shared_material), 3);

        queue.clear();
        assert_eq!(Arc::strong_count(&shared_material), 1);
    }

    #[test]
    fn test_clear_on_empty_queue() {
        let mut queue = RenderQueue::new();
        queue.clear();
        queue.sort();
        assert!(queue.sorted_elements().is_empty());
    }

    #[test]
    fn test_sort_by_distance_from_origin() {
        let mut queue =
            RenderQueue::with_strategy(Box::new(DistanceSort::front_to_back(Vec3::zeros())));
        queue
            .add(material(0, 1), mesh(0), Vec3::new(0.0, 0.0, 0.0))
            .unwrap();
        queue
            .add(material(1, 1), mesh(1), Vec3::new(0.0, 0.0, 5.0))
            .unwrap();

        queue.sort();
        let sorted = queue.sorted_elements();
        assert_eq!(sorted[0].material.id(), MaterialId(0));
        assert_eq!(sorted[1].material.id(), MaterialId(1));
    }

    #[test]
    fn test_stale_view_excludes_late_add() {
        let mut queue = RenderQueue::new();
        queue.add(material(0, 1), mesh(0), Vec3::zeros()).unwrap();
        queue.sort();
        assert!(!queue.needs_sort());

        queue.add(material(1, 1), mesh(1), Vec3::zeros()).unwrap();

        // Without a re-sort the view is stale: the new element is missing.
        assert!(queue.needs_sort());
        assert_eq!(queue.sorted_elements().len(), 1);
        assert_eq!(queue.len(), 2);

        queue.sort();
        assert_eq!(queue.sorted_elements().len(), 2);
    }

    #[test]
    fn test_set_strategy_marks_stale() {
        let mut queue = RenderQueue::new();
        queue.add(material(0, 1), mesh(0), Vec3::zeros()).unwrap();
        queue.sort();
        assert!(!queue.needs_sort());

        queue.set_strategy(Box::new(DistanceSort::front_to_back(Vec3::zeros())));
        assert!(queue.needs_sort());
    }

    #[test]
    fn test_default_strategy_preserves_insertion_order() {
        let mut queue = RenderQueue::new();
        for i in 0..4 {
            queue
                .add(material(i, 1), mesh(i), Vec3::new(0.0, 0.0, f32::from(4 - i as u8)))
                .unwrap();
        }

        queue.sort();
        let ids: Vec<u32> = queue
            .sorted_elements()
            .iter()
            .map(|e| e.material.id().0)
            .collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_stats_recorded_on_sort() {
        let mut queue = RenderQueue::new();
        queue.add(material(0, 1), mesh(0), Vec3::zeros()).unwrap();
        queue.add(material(1, 1), mesh(1), Vec3::zeros()).unwrap();

        queue.sort();
        assert_eq!(queue.stats().element_count, 2);
    }
}
