//! Frame submission
//!
//! Walks the sorted queue and drives a [`DrawBackend`]: bind the element's
//! material pass, then issue the draw. Redundant binds are elided when
//! consecutive elements share the same material and pass, which is the
//! payoff of state-change-minimizing sort strategies.

use std::time::Instant;

use thiserror::Error;

use crate::config::SubmissionConfig;
use crate::resources::{MaterialId, MaterialProxy, MeshProxy};

use super::RenderQueue;

/// Errors raised during frame submission
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Queue was modified after its last sort; sorted view is stale
    #[error("render queue is stale: {queued} elements queued but sorted view holds {sorted}")]
    StaleQueue {
        /// Elements currently queued
        queued: usize,
        /// Elements in the stale sorted view
        sorted: usize,
    },

    /// Sorted element count exceeds the configured frame budget
    #[error("frame budget exceeded: {count} elements > {max} allowed")]
    FrameBudgetExceeded {
        /// Elements in the sorted sequence
        count: usize,
        /// Configured per-frame maximum
        max: usize,
    },

    /// The backend rejected a bind or draw
    #[error("draw backend error: {0}")]
    Backend(String),
}

/// GPU-submission collaborator the sorted queue is drained into
///
/// Implementations translate each element into actual API work: binding the
/// material's pass pipeline and parameters, binding the mesh buffers, and
/// issuing the indexed draw.
pub trait DrawBackend {
    /// Bind the given pass of a material
    ///
    /// # Errors
    /// Backend-specific; surfaced unchanged to the submitter caller.
    fn bind_material(&mut self, material: &MaterialProxy, pass_idx: u32)
        -> Result<(), SubmitError>;

    /// Draw a mesh with the currently bound material pass
    ///
    /// # Errors
    /// Backend-specific; surfaced unchanged to the submitter caller.
    fn draw_mesh(&mut self, mesh: &MeshProxy) -> Result<(), SubmitError>;
}

/// Statistics for one frame's submission
#[derive(Debug, Clone, Copy, Default)]
pub struct SubmitStats {
    /// Draw calls issued
    pub draw_calls: usize,

    /// Material pass binds issued (GPU state changes)
    pub material_binds: usize,

    /// Time spent submitting (microseconds)
    pub submission_time_us: u64,
}

/// Drains a sorted render queue into a [`DrawBackend`]
pub struct FrameSubmitter {
    /// Submission configuration
    config: SubmissionConfig,

    /// Statistics from the most recent frame
    stats: SubmitStats,
}

impl FrameSubmitter {
    /// Create a submitter with the given configuration
    #[must_use]
    pub const fn new(config: SubmissionConfig) -> Self {
        Self {
            config,
            stats: SubmitStats {
                draw_calls: 0,
                material_binds: 0,
                submission_time_us: 0,
            },
        }
    }

    /// Create a submitter with default configuration
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(SubmissionConfig::default())
    }

    /// Submit one frame's sorted elements to the backend
    ///
    /// Elements are consumed strictly in sorted order. A `(material, pass)`
    /// bind is issued only when it differs from the previous element's.
    ///
    /// # Errors
    /// - [`SubmitError::StaleQueue`] when the queue was modified after its
    ///   last sort; re-sort and retry
    /// - [`SubmitError::FrameBudgetExceeded`] when the sorted sequence is
    ///   larger than the configured per-frame maximum
    /// - Any error the backend returns from a bind or draw
    pub fn submit(
        &mut self,
        queue: &RenderQueue,
        backend: &mut impl DrawBackend,
    ) -> Result<(), SubmitError> {
        if queue.needs_sort() {
            self.stats = SubmitStats::default();
            return Err(SubmitError::StaleQueue {
                queued: queue.len(),
                sorted: queue.sorted_elements().len(),
            });
        }

        let elements = queue.sorted_elements();
        if elements.len() > self.config.max_elements_per_frame {
            self.stats = SubmitStats::default();
            return Err(SubmitError::FrameBudgetExceeded {
                count: elements.len(),
                max: self.config.max_elements_per_frame,
            });
        }

        let start = Instant::now();
        let mut stats = SubmitStats::default();
        let mut bound: Option<(MaterialId, u32)> = None;
        let mut outcome = Ok(());

        for element in elements {
            let wanted = (element.material.id(), element.pass_idx);
            if bound != Some(wanted) {
                if let Err(err) = backend.bind_material(&element.material, element.pass_idx) {
                    outcome = Err(err);
                    break;
                }
                bound = Some(wanted);
                stats.material_binds += 1;
            }

            if let Err(err) = backend.draw_mesh(&element.mesh) {
                outcome = Err(err);
                break;
            }
            stats.draw_calls += 1;
        }

        // Record the counts actually issued, even for an aborted frame, so
        // stats never carry over from a previous submit.
        stats.submission_time_us = start.elapsed().as_micros() as u64;
        self.stats = stats;

        if self.config.log_frame_stats {
            log::debug!(
                "submitted frame: {} draws, {} binds, {}us",
                stats.draw_calls,
                stats.material_binds,
                stats.submission_time_us
            );
        }
        outcome
    }

    /// Statistics from the most recent [`submit`](Self::submit) call
    ///
    /// A submit that failed mid-frame reports the binds and draws issued
    /// before the error; a submit rejected up front reports zeros. Counts
    /// never carry over from an earlier frame.
    #[must_use]
    pub const fn stats(&self) -> SubmitStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::queue::strategy::MaterialBatch;
    use crate::resources::{BufferHandle, MaterialPass, MeshId, SubMesh};
    use std::sync::Arc;

    /// Backend that records the call sequence
    #[derive(Default)]
    struct RecordingBackend {
        calls: Vec<String>,
        /// Fail the draw after this many successful draws
        draws_before_failure: Option<usize>,
        draws_issued: usize,
    }

    impl DrawBackend for RecordingBackend {
        fn bind_material(
            &mut self,
            material: &MaterialProxy,
            pass_idx: u32,
        ) -> Result<(), SubmitError> {
            self.calls.push(format!("bind {} p{}", material.name(), pass_idx));
            Ok(())
        }

        fn draw_mesh(&mut self, mesh: &MeshProxy) -> Result<(), SubmitError> {
            if self.draws_before_failure == Some(self.draws_issued) {
                return Err(SubmitError::Backend("device lost".to_owned()));
            }
            self.draws_issued += 1;
            self.calls.push(format!("draw {}", mesh.name()));
            Ok(())
        }
    }

    fn material(id: u32) -> Arc<MaterialProxy> {
        Arc::new(
            MaterialProxy::new(
                MaterialId(id),
                format!("mat_{id}"),
                vec![MaterialPass::opaque("pbr")],
            )
            .unwrap(),
        )
    }

    fn mesh(id: u32) -> Arc<MeshProxy> {
        Arc::new(
            MeshProxy::new(
                MeshId(id),
                format!("mesh_{id}"),
                BufferHandle(u64::from(id)),
                BufferHandle(u64::from(id) + 100),
                SubMesh::new(0, 6),
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_submit_elides_redundant_binds() {
        let mut queue = RenderQueue::with_strategy(Box::new(MaterialBatch));
        let red = material(0);
        let blue = material(1);

        queue.add(red.clone(), mesh(0), Vec3::zeros()).unwrap();
        queue.add(blue.clone(), mesh(1), Vec3::zeros()).unwrap();
        queue.add(red, mesh(2), Vec3::zeros()).unwrap();
        queue.sort();

        let mut backend = RecordingBackend::default();
        let mut submitter = FrameSubmitter::with_defaults();
        submitter.submit(&queue, &mut backend).unwrap();

        // Batched by material: one bind per material, three draws.
        assert_eq!(
            backend.calls,
            vec![
                "bind mat_0 p0",
                "draw mesh_0",
                "draw mesh_2",
                "bind mat_1 p0",
                "draw mesh_1",
            ]
        );
        assert_eq!(submitter.stats().draw_calls, 3);
        assert_eq!(submitter.stats().material_binds, 2);
    }

    #[test]
    fn test_submit_rejects_stale_queue() {
        let mut queue = RenderQueue::new();
        queue.add(material(0), mesh(0), Vec3::zeros()).unwrap();
        queue.sort();
        queue.add(material(1), mesh(1), Vec3::zeros()).unwrap();

        let mut backend = RecordingBackend::default();
        let mut submitter = FrameSubmitter::with_defaults();
        let err = submitter.submit(&queue, &mut backend).unwrap_err();

        assert!(matches!(
            err,
            SubmitError::StaleQueue {
                queued: 2,
                sorted: 1
            }
        ));
        assert!(backend.calls.is_empty());
    }

    #[test]
    fn test_submit_enforces_frame_budget() {
        let mut queue = RenderQueue::new();
        for i in 0..3 {
            queue.add(material(i), mesh(i), Vec3::zeros()).unwrap();
        }
        queue.sort();

        let config = SubmissionConfig {
            max_elements_per_frame: 2,
            ..SubmissionConfig::default()
        };
        let mut backend = RecordingBackend::default();
        let mut submitter = FrameSubmitter::new(config);
        let err = submitter.submit(&queue, &mut backend).unwrap_err();

        assert!(matches!(
            err,
            SubmitError::FrameBudgetExceeded { count: 3, max: 2 }
        ));
    }

    #[test]
    fn test_backend_errors_propagate() {
        let mut queue = RenderQueue::new();
        queue.add(material(0), mesh(0), Vec3::zeros()).unwrap();
        queue.sort();

        let mut backend = RecordingBackend {
            draws_before_failure: Some(0),
            ..RecordingBackend::default()
        };
        let mut submitter = FrameSubmitter::with_defaults();

        assert!(matches!(
            submitter.submit(&queue, &mut backend),
            Err(SubmitError::Backend(_))
        ));
    }

    #[test]
    fn test_failed_submit_reports_partial_stats() {
        let shared = material(0);
        let mut queue = RenderQueue::new();
        for i in 0..3 {
            queue.add(shared.clone(), mesh(i), Vec3::zeros()).unwrap();
        }
        queue.sort();

        let mut submitter = FrameSubmitter::with_defaults();

        // A full frame first, so stale carry-over would be visible.
        let mut backend = RecordingBackend::default();
        submitter.submit(&queue, &mut backend).unwrap();
        assert_eq!(submitter.stats().draw_calls, 3);

        // Device lost after the first draw: stats must show the partial
        // frame, not last frame's numbers.
        let mut failing = RecordingBackend {
            draws_before_failure: Some(1),
            ..RecordingBackend::default()
        };
        assert!(matches!(
            submitter.submit(&queue, &mut failing),
            Err(SubmitError::Backend(_))
        ));
        assert_eq!(submitter.stats().draw_calls, 1);
        assert_eq!(submitter.stats().material_binds, 1);
    }

    #[test]
    fn test_rejected_submit_zeroes_stats() {
        let mut queue = RenderQueue::new();
        queue.add(material(0), mesh(0), Vec3::zeros()).unwrap();
        queue.sort();

        let mut backend = RecordingBackend::default();
        let mut submitter = FrameSubmitter::with_defaults();
        submitter.submit(&queue, &mut backend).unwrap();
        assert_eq!(submitter.stats().draw_calls, 1);

        // Stale queue is rejected before any backend work; stats reset.
        queue.add(material(1), mesh(1), Vec3::zeros()).unwrap();
        assert!(matches!(
            submitter.submit(&queue, &mut backend),
            Err(SubmitError::StaleQueue { .. })
        ));
        assert_eq!(submitter.stats().draw_calls, 0);
        assert_eq!(submitter.stats().material_binds, 0);
    }

    #[test]
    fn test_empty_frame_submits_nothing() {
        let mut queue = RenderQueue::new();
        queue.sort();

        let mut backend = RecordingBackend::default();
        let mut submitter = FrameSubmitter::with_defaults();
        submitter.submit(&queue, &mut backend).unwrap();

        assert!(backend.calls.is_empty());
        assert_eq!(submitter.stats().draw_calls, 0);
    }
}
