//! Proxy registry
//!
//! Arena storage for resolved material and mesh proxies. Scene traversal
//! holds lightweight slotmap keys and resolves them to shared `Arc` proxies
//! just before queueing; a key that outlives its proxy resolves to a typed
//! error rather than a dangling reference.

use std::sync::Arc;

use slotmap::{new_key_type, SlotMap};

use super::{MaterialProxy, MeshProxy, ResourceError};

new_key_type! {
    /// Key identifying a registered material proxy
    pub struct MaterialKey;

    /// Key identifying a registered mesh proxy
    pub struct MeshKey;
}

/// Arena of resolved render proxies
///
/// Lives upstream of the render queue: resolution (asset loads, GPU upload)
/// completes before a proxy is registered, so every `Arc` handed out here is
/// render-ready.
#[derive(Debug, Default)]
pub struct ProxyRegistry {
    materials: SlotMap<MaterialKey, Arc<MaterialProxy>>,
    meshes: SlotMap<MeshKey, Arc<MeshProxy>>,
}

impl ProxyRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resolved material, returning its key
    pub fn add_material(&mut self, material: MaterialProxy) -> MaterialKey {
        log::debug!("registered material '{}'", material.name());
        self.materials.insert(Arc::new(material))
    }

    /// Register a resolved mesh, returning its key
    pub fn add_mesh(&mut self, mesh: MeshProxy) -> MeshKey {
        log::debug!("registered mesh '{}'", mesh.name());
        self.meshes.insert(Arc::new(mesh))
    }

    /// Resolve a material key to its shared proxy
    ///
    /// # Errors
    /// Returns [`ResourceError::UnknownMaterial`] for stale or foreign keys.
    pub fn material(&self, key: MaterialKey) -> Result<Arc<MaterialProxy>, ResourceError> {
        self.materials
            .get(key)
            .cloned()
            .ok_or(ResourceError::UnknownMaterial(key))
    }

    /// Resolve a mesh key to its shared proxy
    ///
    /// # Errors
    /// Returns [`ResourceError::UnknownMesh`] for stale or foreign keys.
    pub fn mesh(&self, key: MeshKey) -> Result<Arc<MeshProxy>, ResourceError> {
        self.meshes
            .get(key)
            .cloned()
            .ok_or(ResourceError::UnknownMesh(key))
    }

    /// Remove a material; existing `Arc` shares stay alive until dropped
    pub fn remove_material(&mut self, key: MaterialKey) -> Option<Arc<MaterialProxy>> {
        self.materials.remove(key)
    }

    /// Remove a mesh; existing `Arc` shares stay alive until dropped
    pub fn remove_mesh(&mut self, key: MeshKey) -> Option<Arc<MeshProxy>> {
        self.meshes.remove(key)
    }

    /// Number of registered materials
    #[must_use]
    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    /// Number of registered meshes
    #[must_use]
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }
}
