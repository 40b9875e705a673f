//! Resolved render resources
//!
//! Immutable proxy descriptions of materials and meshes, shared across all
//! queue elements that reference them within a frame. Resolution (waiting on
//! asynchronous asset loads, GPU upload) happens upstream; by the time a
//! proxy exists it is render-ready. The queue only holds shared references
//! and never reaches back into the scene graph.

pub mod layers;
pub mod material;
pub mod mesh;
pub mod registry;

pub use layers::LayerMask;
pub use material::{
    MaterialId, MaterialParam, MaterialPass, MaterialProxy, ParamValue, PassStateFlags,
    TextureHandle,
};
pub use mesh::{BufferHandle, MeshId, MeshProxy, SubMesh};
pub use registry::{MaterialKey, MeshKey, ProxyRegistry};

use thiserror::Error;

/// Errors raised while constructing or resolving render resources
#[derive(Debug, Error)]
pub enum ResourceError {
    /// Material technique has no passes
    #[error("material '{0}' has an empty technique (no passes)")]
    EmptyTechnique(String),

    /// Mesh sub-mesh range covers zero indices
    #[error("mesh '{0}' has an empty sub-mesh range")]
    EmptyMesh(String),

    /// Material key does not resolve to a registered material
    #[error("unknown material key {0:?}")]
    UnknownMaterial(MaterialKey),

    /// Mesh key does not resolve to a registered mesh
    #[error("unknown mesh key {0:?}")]
    UnknownMesh(MeshKey),
}
