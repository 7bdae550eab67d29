//! NEON complex kernels for aarch64.
//!
//! NEON registers are 128 bits wide, so [`f32x4x2::F32x4x2`] pairs two of them
//! to hold the same 4 complex numbers as the other vector types.

pub mod f32x4x2;
