//! Short vectors of `num::complex::Complex` values.
//!
//! Same kernels as [`crate::generic`], but the complex arithmetic is left to
//! the operators of the `Complex` type.

use std::fmt;

use num::complex::Complex;
use num::traits::NumAssign;
use num::{Float, NumCast};

use crate::simd::traits::ComplexKernel;
use crate::{DCOMPLEX_WIDTH, FCOMPLEX_WIDTH};

/// `C` complex numbers stored contiguously.
#[repr(C, align(32))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CplxVec<T, const C: usize> {
    pub v: [Complex<T>; C],
}

/// Single-precision complex vector (4 complex numbers).
pub type CVecF = CplxVec<f32, FCOMPLEX_WIDTH>;
/// Double-precision complex vector (2 complex numbers).
pub type CVecD = CplxVec<f64, DCOMPLEX_WIDTH>;

impl<T: Float + NumAssign, const C: usize> CplxVec<T, C> {
    pub fn zeros() -> Self {
        Self {
            v: [Complex::new(T::zero(), T::zero()); C],
        }
    }

    pub fn from_array(v: [Complex<T>; C]) -> Self {
        Self { v }
    }

    #[inline(always)]
    pub fn add(&self, rhs: &Self) -> Self {
        let mut out = Self::zeros();

        for i in 0..C {
            out.v[i] = self.v[i] + rhs.v[i];
        }

        out
    }

    #[inline(always)]
    pub fn mul(&self, rhs: &Self) -> Self {
        let mut out = Self::zeros();

        for i in 0..C {
            out.v[i] = self.v[i] * rhs.v[i];
        }

        out
    }

    #[inline(always)]
    pub fn mul_from(&mut self, b: &Self, c: &Self) {
        for i in 0..C {
            self.v[i] = b.v[i] * c.v[i];
        }
    }

    #[inline(always)]
    pub fn mac(&mut self, b: &Self, c: &Self) {
        for i in 0..C {
            self.v[i] += b.v[i] * c.v[i];
        }
    }
}

impl<T: fmt::Display, const C: usize> fmt::Display for CplxVec<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, z) in self.v.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}, {}", z.re, z.im)?;
        }
        write!(f, "]")
    }
}

impl<T: Float + NumAssign, const C: usize> ComplexKernel for CplxVec<T, C> {
    const COMPLEX_LANES: usize = C;

    fn zeros() -> Self {
        CplxVec::zeros()
    }

    fn from_interleaved(values: &[f32]) -> Self {
        assert!(
            values.len() >= 2 * C,
            "need {} values, got {}",
            2 * C,
            values.len()
        );

        let cast = |x: f32| <T as NumCast>::from(x).unwrap_or_else(T::nan);

        let mut out = CplxVec::zeros();
        for (z, pair) in out.v.iter_mut().zip(values.chunks_exact(2)) {
            *z = Complex::new(cast(pair[0]), cast(pair[1]));
        }
        out
    }

    fn to_interleaved(&self) -> Vec<f32> {
        self.v
            .iter()
            .flat_map(|z| [z.re, z.im])
            .map(|x| x.to_f32().unwrap_or(f32::NAN))
            .collect()
    }

    #[inline(always)]
    fn cadd(b: &Self, c: &Self) -> Self {
        b.add(c)
    }

    #[inline(always)]
    fn cmul(b: &Self, c: &Self) -> Self {
        b.mul(c)
    }

    #[inline(always)]
    fn cmul_into(a: &mut Self, b: &Self, c: &Self) {
        a.mul_from(b, c);
    }

    #[inline(always)]
    fn cmac(a: &mut Self, b: &Self, c: &Self) {
        a.mac(b, c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c32(re: f32, im: f32) -> Complex<f32> {
        Complex::new(re, im)
    }

    #[test]
    fn test_layout_matches_generic_vector() {
        assert_eq!(std::mem::size_of::<CVecF>(), std::mem::size_of::<crate::generic::VecF>());
        assert_eq!(std::mem::align_of::<CVecF>(), crate::VECTOR_ALIGNMENT);
    }

    #[test]
    fn test_one_times_i() {
        let one = CVecF::from_array([c32(1.0, 0.0); 4]);
        let i = CVecF::from_array([c32(0.0, 1.0); 4]);

        assert_eq!(one.mul(&i), i);

        let mut out = CVecF::zeros();
        out.mul_from(&one, &i);
        assert_eq!(out, i);
    }

    #[test]
    fn test_mac_accumulates() {
        let b = CVecF::from_array([c32(1.0, 2.0), c32(2.0, -1.0), c32(0.0, 1.0), c32(0.5, 0.0)]);
        let c = CVecF::from_array([c32(3.0, 4.0), c32(2.0, 1.0), c32(0.0, 1.0), c32(0.0, -2.0)]);
        let mut a = CVecF::from_array([c32(1.0, 1.0); 4]);

        a.mac(&b, &c);

        assert_eq!(
            a.v,
            [c32(-4.0, 11.0), c32(6.0, 1.0), c32(0.0, 1.0), c32(1.0, 0.0)]
        );
    }

    #[test]
    fn test_interleaved_order() {
        let values = [1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let a = <CVecF as ComplexKernel>::from_interleaved(&values);

        assert_eq!(a.v[0], c32(1.0, 2.0));
        assert_eq!(a.v[3], c32(7.0, 8.0));
        assert_eq!(a.to_interleaved(), values.to_vec());
    }

    #[test]
    fn test_double_precision() {
        let b = CVecD::from_array([Complex::new(1.0, 2.0), Complex::new(0.0, 1.0)]);
        let c = CVecD::from_array([Complex::new(3.0, 4.0), Complex::new(0.0, 1.0)]);
        assert_eq!(
            b.mul(&c).v,
            [Complex::new(-5.0, 10.0), Complex::new(-1.0, 0.0)]
        );
    }

    #[test]
    fn test_display() {
        let a = CVecD::from_array([Complex::new(1.0, -2.0), Complex::new(0.5, 3.0)]);
        assert_eq!(a.to_string(), "[1, -2, 0.5, 3]");
    }
}
