//! Complex-arithmetic vectorization benchmarks.
//!
//! The same short-vector kernels (complex multiply, multiply-accumulate and a
//! 3x3 complex matrix multiply) are written three ways:
//!
//! - [`generic`]: plain indexed loops over `f32` lanes, left to the compiler's
//!   auto-vectorizer;
//! - [`std_complex`]: loops over [`num::complex::Complex`] values;
//! - [`simd`]: hand-written AVX2+FMA (x86) or NEON (aarch64) intrinsics.
//!
//! [`harness`] drives every kernel over large buffers and reports throughput in
//! Gflop/s, [`report`] formats the results.

pub mod config;
pub mod error;
pub mod generic;
pub mod harness;
pub mod matmul;
pub mod report;
pub mod simd;
pub mod std_complex;

pub use error::{Result, VecBenchError};
pub use simd::traits::ComplexKernel;

/// Default number of vectors per buffer.
pub const N_ELEM: usize = 10_000;
/// Default number of timing-loop iterations.
pub const N_IT: usize = 5_000;
/// Rows (and columns) of the complex matrices.
pub const N_ROW: usize = 3;
/// Vectors per matrix.
pub const N_COEF: usize = N_ROW * N_ROW;

/// Double-precision complex values per generic vector.
pub const DCOMPLEX_WIDTH: usize = 2;
/// Single-precision complex values per vector.
pub const FCOMPLEX_WIDTH: usize = 2 * DCOMPLEX_WIDTH;
/// Single-precision lanes per vector.
pub const F32_LANES: usize = 2 * FCOMPLEX_WIDTH;
/// Double-precision lanes per vector.
pub const F64_LANES: usize = 2 * DCOMPLEX_WIDTH;
/// Byte alignment of every vector type.
pub const VECTOR_ALIGNMENT: usize = 32;
