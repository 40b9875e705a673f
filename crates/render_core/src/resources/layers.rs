//! Visibility layer masks
//!
//! A renderable and a camera each carry a 64-bit layer mask; the camera
//! renders a drawable only when the masks intersect. The queue itself is
//! layer-agnostic (filtering happens during scene traversal, before `add`),
//! but the mask type lives here so traversal and renderer agree on it.

/// 64-bit visibility layer mask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct LayerMask(pub u64);

impl LayerMask {
    /// All layers visible
    pub const ALL: Self = Self(u64::MAX);

    /// No layers visible
    pub const NONE: Self = Self(0);

    /// Mask with only the given layer bit set
    ///
    /// # Panics
    /// Panics if `layer` is 64 or greater.
    #[must_use]
    pub const fn layer(layer: u32) -> Self {
        assert!(layer < 64, "layer index out of range");
        Self(1 << layer)
    }

    /// Check whether any layer is shared between the two masks
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Combine two masks
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::layer(0)
    }
}
