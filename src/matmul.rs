//! 3x3 complex matrix multiplication on short vectors.
//!
//! A matrix is `N_COEF` consecutive vectors in row-major order, so each vector
//! lane holds an independent matrix and one call multiplies `COMPLEX_LANES`
//! matrix pairs at once. `A = B * C` is computed in two passes: the first
//! column of `B` initializes `A` with a multiply, the remaining columns are
//! added with multiply-accumulates.

use crate::simd::traits::ComplexKernel;
use crate::{N_COEF, N_ROW};

/// Flops of one `N_ROW x N_ROW` complex matrix product per complex lane.
pub const MATMUL_FLOPS_PER_LANE: usize =
    N_ROW * N_ROW * 6 + N_ROW * N_ROW * (N_ROW - 1) * 8;

// Repeats `$body` once per listed index, binding it to `$i`.
macro_rules! unroll {
    ($i:ident in [$($n:literal),* $(,)?] $body:block) => {
        $( { let $i: usize = $n; $body } )*
    };
}

/// `A = B * C` with loops over rows, inner index and columns.
///
/// # Panics
///
/// Panics if any slice is shorter than `N_COEF`.
#[inline(always)]
pub fn matmul<K: ComplexKernel>(a: &mut [K], b: &[K], c: &[K]) {
    let (a, b, c) = (&mut a[..N_COEF], &b[..N_COEF], &c[..N_COEF]);

    for r in 0..N_ROW {
        for s in 0..N_ROW {
            K::cmul_into(&mut a[r * N_ROW + s], &b[r * N_ROW], &c[s]);
        }
    }

    for r in 0..N_ROW {
        for t in 1..N_ROW {
            for s in 0..N_ROW {
                K::cmac(&mut a[r * N_ROW + s], &b[r * N_ROW + t], &c[t * N_ROW + s]);
            }
        }
    }
}

/// Same product as [`matmul`] with every loop unrolled at compile time.
///
/// # Panics
///
/// Panics if any slice is shorter than `N_COEF`.
#[inline(always)]
pub fn matmul_unrolled<K: ComplexKernel>(a: &mut [K], b: &[K], c: &[K]) {
    // the index lists below spell out 0..N_ROW
    const _: () = assert!(N_ROW == 3);

    let (a, b, c) = (&mut a[..N_COEF], &b[..N_COEF], &c[..N_COEF]);

    unroll!(r in [0, 1, 2] {
        unroll!(s in [0, 1, 2] {
            K::cmul_into(&mut a[r * N_ROW + s], &b[r * N_ROW], &c[s]);
        });
    });

    unroll!(r in [0, 1, 2] {
        unroll!(t in [1, 2] {
            unroll!(s in [0, 1, 2] {
                K::cmac(&mut a[r * N_ROW + s], &b[r * N_ROW + t], &c[t * N_ROW + s]);
            });
        });
    });
}
