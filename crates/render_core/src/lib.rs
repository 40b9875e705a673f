//! # Render Core
//!
//! The render-submission core of a real-time 3D engine: the path by which
//! scene objects become sorted, GPU-ready draw commands.
//!
//! ## Architecture
//!
//! - **RenderQueue**: Collects per-frame drawable elements and produces a
//!   render-ready ordering via a pluggable [`SortStrategy`]
//! - **Resources**: Immutable, already-resolved material/mesh proxies shared
//!   across elements for the duration of a frame
//! - **FrameSubmitter**: Walks the sorted queue and drives a [`DrawBackend`],
//!   eliding redundant material binds
//!
//! ## Quick Start
//!
//! ```rust
//! use render_core::prelude::*;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let material = Arc::new(MaterialProxy::new(
//!     MaterialId(0),
//!     "unlit",
//!     vec![MaterialPass::new("unlit", PassStateFlags::DEPTH_TEST | PassStateFlags::DEPTH_WRITE)],
//! )?);
//! let mesh = Arc::new(MeshProxy::new(
//!     MeshId(0),
//!     "quad",
//!     BufferHandle(1),
//!     BufferHandle(2),
//!     SubMesh::new(0, 6),
//! )?);
//!
//! let mut queue = RenderQueue::with_strategy(Box::new(DistanceSort::front_to_back(
//!     Vec3::new(0.0, 0.0, 0.0),
//! )));
//! queue.add(material, mesh, Vec3::new(0.0, 0.0, 5.0))?;
//! queue.sort();
//!
//! for element in queue.sorted_elements() {
//!     // translate into draw calls
//!     let _ = element.pass_idx;
//! }
//! queue.clear();
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod queue;
pub mod resources;

pub use queue::{
    DepthOrder, DrawBackend, FrameSubmitter, QueueError, QueueStats, RenderQueue,
    RenderQueueElement, SortStrategy, SubmitError, SubmitStats,
};
pub use resources::{
    BufferHandle, LayerMask, MaterialId, MaterialParam, MaterialPass, MaterialProxy, MeshId,
    MeshProxy, ParamValue, PassStateFlags, ProxyRegistry, ResourceError, SubMesh, TextureHandle,
};

/// Common imports for render-core users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, SubmissionConfig},
        foundation::math::{Mat4, Point3, Vec3, Vec4},
        queue::{
            AlphaSplit, DepthOrder, DistanceSort, DrawBackend, FrameSubmitter, InsertionOrder,
            MaterialBatch, QueueError, RenderQueue, RenderQueueElement, SortStrategy, SubmitError,
        },
        resources::{
            BufferHandle, LayerMask, MaterialId, MaterialParam, MaterialPass, MaterialProxy,
            MeshId, MeshProxy, ParamValue, PassStateFlags, ProxyRegistry, ResourceError, SubMesh,
            TextureHandle,
        },
    };
}
