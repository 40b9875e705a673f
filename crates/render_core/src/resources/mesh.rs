//! Mesh proxy definitions
//!
//! A mesh proxy is the resolved, render-ready description of one piece of
//! geometry: GPU buffer handles plus the sub-mesh index range to draw.
//! Vertex data itself lives on the GPU; this core never touches it.

use super::ResourceError;

/// Unique identifier for meshes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct MeshId(pub u32);

/// Opaque handle to a GPU buffer owned by the rendering backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferHandle(pub u64);

/// Index range of a single sub-mesh within a mesh's index buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubMesh {
    /// First index to draw
    pub index_offset: u32,

    /// Number of indices to draw
    pub index_count: u32,
}

impl SubMesh {
    /// Create a sub-mesh range
    #[must_use]
    pub const fn new(index_offset: u32, index_count: u32) -> Self {
        Self {
            index_offset,
            index_count,
        }
    }
}

/// Resolved, immutable mesh description
///
/// Shared across queue elements via `Arc`; the queue holds a share for the
/// duration of the frame but never owns the underlying GPU buffers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshProxy {
    /// Unique identifier assigned by the upstream resource system
    id: MeshId,

    /// Name for logging and diagnostics
    name: String,

    /// GPU vertex buffer handle
    vertex_buffer: BufferHandle,

    /// GPU index buffer handle
    index_buffer: BufferHandle,

    /// Index range to draw
    sub_mesh: SubMesh,
}

impl MeshProxy {
    /// Create a resolved mesh proxy
    ///
    /// # Errors
    /// Returns [`ResourceError::EmptyMesh`] if the sub-mesh range covers
    /// zero indices; such a mesh can never produce a draw call.
    pub fn new(
        id: MeshId,
        name: impl Into<String>,
        vertex_buffer: BufferHandle,
        index_buffer: BufferHandle,
        sub_mesh: SubMesh,
    ) -> Result<Self, ResourceError> {
        let name = name.into();
        if sub_mesh.index_count == 0 {
            return Err(ResourceError::EmptyMesh(name));
        }
        Ok(Self {
            id,
            name,
            vertex_buffer,
            index_buffer,
            sub_mesh,
        })
    }

    /// Get the mesh identifier
    #[must_use]
    pub const fn id(&self) -> MeshId {
        self.id
    }

    /// Get the mesh name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the GPU vertex buffer handle
    #[must_use]
    pub const fn vertex_buffer(&self) -> BufferHandle {
        self.vertex_buffer
    }

    /// Get the GPU index buffer handle
    #[must_use]
    pub const fn index_buffer(&self) -> BufferHandle {
        self.index_buffer
    }

    /// Get the sub-mesh index range
    #[must_use]
    pub const fn sub_mesh(&self) -> SubMesh {
        self.sub_mesh
    }
}
