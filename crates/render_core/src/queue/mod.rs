//! # Render Queue System
//!
//! The per-frame path from visible drawables to an ordered, GPU-ready
//! element sequence.
//!
//! ## Architecture
//!
//! - **RenderQueueElement**: Value snapshot of one drawable unit (material,
//!   mesh, world position, pass index)
//! - **RenderQueue**: Append-only per-frame collection with a pluggable
//!   sort step
//! - **SortStrategy**: Renderer-defined ordering policy (distance sort,
//!   material batching, opaque/transparent split)
//! - **FrameSubmitter**: Drives a draw backend from the sorted sequence
//!
//! ## Frame control flow
//!
//! Scene traversal calls [`RenderQueue::add`] once per visible drawable,
//! the renderer calls [`RenderQueue::sort`] exactly once after traversal,
//! reads [`RenderQueue::sorted_elements`] to drive GPU submission, then
//! [`RenderQueue::clear`] resets the queue for the next frame.

pub mod element;
pub mod render_queue;
pub mod strategy;
pub mod submit;

pub use element::RenderQueueElement;
pub use render_queue::{QueueError, QueueStats, RenderQueue};
pub use strategy::{AlphaSplit, DepthOrder, DistanceSort, InsertionOrder, MaterialBatch, SortStrategy};
pub use submit::{DrawBackend, FrameSubmitter, SubmitError, SubmitStats};
