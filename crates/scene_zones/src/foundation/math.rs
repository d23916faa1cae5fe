//! Math utilities and types
//!
//! Thin aliases over nalgebra so the rest of the crate never names the
//! concrete vector type directly.

pub use nalgebra::Vector3;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Component-wise minimum of two vectors
pub fn min_components(a: &Vec3, b: &Vec3) -> Vec3 {
    Vec3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z))
}

/// Component-wise maximum of two vectors
pub fn max_components(a: &Vec3, b: &Vec3) -> Vec3 {
    Vec3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z))
}

/// Uniform vector with all components set to `value`
pub fn splat(value: f32) -> Vec3 {
    Vec3::new(value, value, value)
}
