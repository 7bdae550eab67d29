//! Agreement tests between the complex kernel strategies.
//!
//! Every vector type is loaded from the same interleaved random data and its
//! results are compared lane by lane with `num::complex::Complex<f32>` scalar
//! arithmetic.

use num::complex::Complex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use vecbench::generic::VecF;
use vecbench::std_complex::CVecF;
use vecbench::ComplexKernel;

const VECTORS: usize = 64;
const TOLERANCE: f32 = 1e-5;

fn random_values(seed: u64) -> Vec<f32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..VECTORS * 8).map(|_| rng.random_range(-2.0..2.0)).collect()
}

fn as_complex(values: &[f32]) -> Vec<Complex<f32>> {
    values
        .chunks_exact(2)
        .map(|pair| Complex::new(pair[0], pair[1]))
        .collect()
}

fn load<K: ComplexKernel>(values: &[f32]) -> Vec<K> {
    values
        .chunks_exact(K::REAL_LANES)
        .map(K::from_interleaved)
        .collect()
}

fn flatten<K: ComplexKernel>(vectors: &[K]) -> Vec<f32> {
    vectors.iter().flat_map(|v| v.to_interleaved()).collect()
}

fn assert_close(label: &str, got: &[f32], want: &[f32]) {
    assert_eq!(got.len(), want.len(), "{label}: length mismatch");
    for (i, (g, w)) in got.iter().zip(want.iter()).enumerate() {
        let error = (g - w).abs();
        assert!(
            error <= TOLERANCE * w.abs().max(1.0),
            "{label}: lane {i} got {g}, expected {w} (error {error:.2e})"
        );
    }
}

fn reference(op: impl Fn(Complex<f32>, Complex<f32>) -> Complex<f32>) -> Vec<f32> {
    let b = as_complex(&random_values(1));
    let c = as_complex(&random_values(2));
    b.iter()
        .zip(c.iter())
        .flat_map(|(&x, &y)| {
            let z = op(x, y);
            [z.re, z.im]
        })
        .collect()
}

fn check_kernel<K: ComplexKernel>(label: &str) {
    let b: Vec<K> = load(&random_values(1));
    let c: Vec<K> = load(&random_values(2));

    let sums: Vec<K> = b.iter().zip(c.iter()).map(|(x, y)| K::cadd(x, y)).collect();
    assert_close(&format!("{label} add"), &flatten(&sums), &reference(|x, y| x + y));

    let products: Vec<K> = b.iter().zip(c.iter()).map(|(x, y)| K::cmul(x, y)).collect();
    assert_close(&format!("{label} mul2"), &flatten(&products), &reference(|x, y| x * y));

    let mut written = vec![K::zeros(); b.len()];
    for ((a, x), y) in written.iter_mut().zip(b.iter()).zip(c.iter()) {
        K::cmul_into(a, x, y);
    }
    assert_close(&format!("{label} mul3"), &flatten(&written), &reference(|x, y| x * y));

    // two accumulations from zero
    let mut acc = vec![K::zeros(); b.len()];
    for _ in 0..2 {
        for ((a, x), y) in acc.iter_mut().zip(b.iter()).zip(c.iter()) {
            K::cmac(a, x, y);
        }
    }
    assert_close(&format!("{label} mac"), &flatten(&acc), &reference(|x, y| x * y * 2.0));
}

#[test]
fn test_generic_matches_scalar() {
    check_kernel::<VecF>("generic");
}

#[test]
fn test_std_matches_scalar() {
    check_kernel::<CVecF>("std");
}

#[cfg(any(avx2, neon))]
#[test]
fn test_intrinsics_match_scalar() {
    if !vecbench::simd::intrinsics_available() {
        println!("intrinsic kernels not supported on this CPU, skipping");
        return;
    }
    check_kernel::<vecbench::simd::IntrinsicVec>(vecbench::simd::ISA_NAME);
}

#[test]
fn test_interleaved_layout_is_shared() {
    let values = random_values(3);
    let generic = flatten(&load::<VecF>(&values));
    let std = flatten(&load::<CVecF>(&values));

    assert_eq!(generic, values);
    assert_eq!(std, values);
}

#[test]
fn test_generic_and_std_products_are_identical() {
    let b = random_values(4);
    let c = random_values(5);

    let generic: Vec<VecF> = load::<VecF>(&b)
        .iter()
        .zip(load::<VecF>(&c).iter())
        .map(|(x, y)| VecF::cmul(x, y))
        .collect();
    let std: Vec<CVecF> = load::<CVecF>(&b)
        .iter()
        .zip(load::<CVecF>(&c).iter())
        .map(|(x, y)| CVecF::cmul(x, y))
        .collect();

    // same formula, same rounding
    assert_eq!(flatten(&generic), flatten(&std));
}

#[test]
fn test_minus_i_rotations_agree() {
    let values = random_values(6);
    for v in load::<VecF>(&values) {
        let explicit = v.times_minus_i();
        let via_mul = v.times_minus_i_mul();
        assert_eq!(explicit, via_mul, "rotation of {v}");

        for lane in 0..VecF::COMPLEX_LANES {
            let z = Complex::new(v.v[2 * lane], v.v[2 * lane + 1]) * Complex::new(0.0, -1.0);
            assert_eq!(explicit.v[2 * lane], z.re);
            assert_eq!(explicit.v[2 * lane + 1], z.im);
        }
    }
}
