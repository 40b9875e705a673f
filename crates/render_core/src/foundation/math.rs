//! Math utilities and types
//!
//! Provides fundamental math types for the render-submission core.

pub use nalgebra::{Matrix4, Vector3, Vector4};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Squared euclidean distance between two positions
///
/// Distance-based sort keys only need relative ordering, so the square
/// root is skipped on the per-element hot path.
#[must_use]
pub fn distance_squared(a: &Vec3, b: &Vec3) -> f32 {
    (a - b).norm_squared()
}
