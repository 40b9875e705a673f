//! Material proxy definitions
//!
//! A material proxy is the resolved, render-ready description of a material:
//! its technique (one or more passes, each a discrete GPU pipeline
//! configuration) and its bound parameter values. Proxies are immutable once
//! constructed and shared freely via `Arc` for the duration of a frame.

use super::ResourceError;
use bitflags::bitflags;

/// Unique identifier for materials
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct MaterialId(pub u32);

bitflags! {
    /// Pipeline-state flags for a single material pass
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PassStateFlags: u32 {
        /// Depth testing enabled
        const DEPTH_TEST = 1 << 0;
        /// Depth writes enabled
        const DEPTH_WRITE = 1 << 1;
        /// Alpha blending enabled
        const ALPHA_BLEND = 1 << 2;
        /// Back-face culling disabled
        const DOUBLE_SIDED = 1 << 3;
    }
}

impl Default for PassStateFlags {
    fn default() -> Self {
        Self::DEPTH_TEST | Self::DEPTH_WRITE
    }
}

/// One discrete GPU-pipeline configuration within a material's technique
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialPass {
    /// Shader variant bound by this pass
    pub shader: String,

    /// Fixed-function pipeline state for this pass
    pub state: PassStateFlags,
}

impl MaterialPass {
    /// Create a pass binding the given shader variant
    pub fn new(shader: impl Into<String>, state: PassStateFlags) -> Self {
        Self {
            shader: shader.into(),
            state,
        }
    }

    /// Create an opaque pass with default depth state
    pub fn opaque(shader: impl Into<String>) -> Self {
        Self::new(shader, PassStateFlags::default())
    }

    /// Create an alpha-blended pass (depth test without depth write)
    pub fn transparent(shader: impl Into<String>) -> Self {
        Self::new(
            shader,
            PassStateFlags::DEPTH_TEST | PassStateFlags::ALPHA_BLEND,
        )
    }

    /// Check whether this pass uses alpha blending
    #[must_use]
    pub const fn is_blended(&self) -> bool {
        self.state.contains(PassStateFlags::ALPHA_BLEND)
    }
}

/// Resolved, immutable material description
///
/// Opaque handle to a GPU texture owned by the rendering backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

/// Value of one resolved shader parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    /// Scalar parameter
    Float(f32),
    /// Four-component vector parameter (colors, padded vectors)
    Vec4(crate::foundation::math::Vec4),
    /// Resolved GPU texture binding
    Texture(TextureHandle),
}

/// One resolved shader parameter binding
///
/// Parameter values are captured at resolution time; by the time a proxy
/// exists, every texture referenced here is resident.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialParam {
    /// Shader parameter name
    pub name: String,

    /// Resolved value
    pub value: ParamValue,
}

impl MaterialParam {
    /// Create a parameter binding
    pub fn new(name: impl Into<String>, value: ParamValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Shared across all queue elements referencing the same material within a
/// frame; the queue holds an `Arc` share and never frees the underlying GPU
/// resources.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialProxy {
    /// Unique identifier assigned by the upstream resource system
    id: MaterialId,

    /// Name for logging and diagnostics
    name: String,

    /// Technique passes, indexed by `pass_idx`
    passes: Vec<MaterialPass>,

    /// Resolved shader parameter values, in bind order
    params: Vec<MaterialParam>,
}

impl MaterialProxy {
    /// Create a resolved material proxy with no parameter values
    ///
    /// Parameters are attached with [`with_param`](Self::with_param) or
    /// [`with_params`](Self::with_params).
    ///
    /// # Errors
    /// Returns [`ResourceError::EmptyTechnique`] if `passes` is empty; a
    /// material with no passes can never be bound for rendering.
    pub fn new(
        id: MaterialId,
        name: impl Into<String>,
        passes: Vec<MaterialPass>,
    ) -> Result<Self, ResourceError> {
        let name = name.into();
        if passes.is_empty() {
            return Err(ResourceError::EmptyTechnique(name));
        }
        Ok(Self {
            id,
            name,
            passes,
            params: Vec::new(),
        })
    }

    /// Attach one resolved parameter value
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: ParamValue) -> Self {
        self.params.push(MaterialParam::new(name, value));
        self
    }

    /// Replace the full resolved parameter set
    #[must_use]
    pub fn with_params(mut self, params: Vec<MaterialParam>) -> Self {
        self.params = params;
        self
    }

    /// Get the material identifier
    #[must_use]
    pub const fn id(&self) -> MaterialId {
        self.id
    }

    /// Get the material name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolved shader parameter values, in bind order
    #[must_use]
    pub fn params(&self) -> &[MaterialParam] {
        &self.params
    }

    /// Look up a parameter value by shader name
    ///
    /// Materials carry a handful of parameters, so a linear scan beats a
    /// map here.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&ParamValue> {
        self.params
            .iter()
            .find(|param| param.name == name)
            .map(|param| &param.value)
    }

    /// Get the number of passes in this material's technique
    #[must_use]
    pub fn pass_count(&self) -> u32 {
        self.passes.len() as u32
    }

    /// Get the pass at the given index, if any
    #[must_use]
    pub fn pass(&self, pass_idx: u32) -> Option<&MaterialPass> {
        self.passes.get(pass_idx as usize)
    }

    /// Check whether this material renders with alpha blending
    ///
    /// Classification is taken from pass 0, the color pass. Renderers use
    /// this to route elements into opaque vs. back-to-front ordering.
    #[must_use]
    pub fn is_transparent(&self) -> bool {
        self.passes[0].is_blended()
    }
}
