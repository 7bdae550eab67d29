//! AVX2+FMA complex kernels on 256-bit vectors.
//!
//! # Architecture Requirements
//!
//! - **CPU Support**: Intel Haswell (2013+) or AMD Excavator (2015+), AVX2 and FMA
//! - **Target Architecture**: x86 or x86_64
//! - **Detection**: the build script enables this module when the build host
//!   reports both `avx2` and `fma`; [`crate::simd::intrinsics_available`]
//!   repeats the check on the machine running the binary
//!
//! # Available Types
//!
//! - [`f32x8::F32x8`]: one `__m256` register holding 4 interleaved single-precision
//!   complex numbers

pub mod f32x8;
