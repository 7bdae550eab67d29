//! Generic short vectors: plain float arrays and indexed loops.
//!
//! Nothing here is vectorized by hand. The loops have a compile-time trip count
//! and no dependencies between complex lanes, which is what the compiler's
//! auto-vectorizer needs to turn them into packed instructions.

use std::fmt;

use num::{Float, NumCast};

use crate::simd::traits::ComplexKernel;
use crate::{F32_LANES, F64_LANES};

/// `R` floats holding `R / 2` interleaved complex numbers.
#[repr(C, align(32))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GenVec<T, const R: usize> {
    pub v: [T; R],
}

/// Single-precision generic vector (4 complex numbers).
pub type VecF = GenVec<f32, F32_LANES>;
/// Double-precision generic vector (2 complex numbers).
pub type VecD = GenVec<f64, F64_LANES>;

// a[i] = b[i] * c[i] on the complex pair starting at lane i
macro_rules! cmul_lane {
    ($a:expr, $b:expr, $c:expr, $i:expr) => {
        $a[$i] = $b[$i] * $c[$i] - $b[$i + 1] * $c[$i + 1];
        $a[$i + 1] = $b[$i] * $c[$i + 1] + $b[$i + 1] * $c[$i];
    };
}

// a[i] += b[i] * c[i] on the complex pair starting at lane i
macro_rules! cmac_lane {
    ($a:expr, $b:expr, $c:expr, $i:expr) => {
        $a[$i] = $a[$i] + ($b[$i] * $c[$i] - $b[$i + 1] * $c[$i + 1]);
        $a[$i + 1] = $a[$i + 1] + ($b[$i] * $c[$i + 1] + $b[$i + 1] * $c[$i]);
    };
}

impl<T: Float, const R: usize> GenVec<T, R> {
    /// Complex values packed in the vector.
    pub const COMPLEX_LANES: usize = R / 2;

    pub fn zeros() -> Self {
        Self { v: [T::zero(); R] }
    }

    pub fn from_array(v: [T; R]) -> Self {
        Self { v }
    }

    /// Lane-wise real addition.
    #[inline(always)]
    pub fn add(&self, rhs: &Self) -> Self {
        let mut out = Self::zeros();

        for i in 0..R {
            out.v[i] = self.v[i] + rhs.v[i];
        }

        out
    }

    /// Complex product of `self` and `rhs`.
    #[inline(always)]
    pub fn mul(&self, rhs: &Self) -> Self {
        let mut out = Self::zeros();

        for i in 0..Self::COMPLEX_LANES {
            cmul_lane!(out.v, self.v, rhs.v, 2 * i);
        }

        out
    }

    /// Writes `b * c` into `self` without building a temporary.
    #[inline(always)]
    pub fn mul_from(&mut self, b: &Self, c: &Self) {
        for i in 0..Self::COMPLEX_LANES {
            cmul_lane!(self.v, b.v, c.v, 2 * i);
        }
    }

    /// `self += b * c`.
    #[inline(always)]
    pub fn mac(&mut self, b: &Self, c: &Self) {
        for i in 0..Self::COMPLEX_LANES {
            cmac_lane!(self.v, b.v, c.v, 2 * i);
        }
    }

    /// A vector whose every complex lane is `-i`.
    pub fn minus_i() -> Self {
        let mut out = Self::zeros();

        for i in 0..Self::COMPLEX_LANES {
            out.v[2 * i] = T::zero();
            out.v[2 * i + 1] = -T::one();
        }

        out
    }

    /// Multiplies by `-i` by swapping lanes: `(re, im) -> (im, -re)`.
    #[inline(always)]
    pub fn times_minus_i(&self) -> Self {
        let mut out = Self::zeros();

        for i in 0..Self::COMPLEX_LANES {
            out.v[2 * i] = self.v[2 * i + 1];
            out.v[2 * i + 1] = -self.v[2 * i];
        }

        out
    }

    /// Multiplies by `-i` through the general complex product with a
    /// [`minus_i`](Self::minus_i) constant.
    #[inline(always)]
    pub fn times_minus_i_mul(&self) -> Self {
        self.mul(&Self::minus_i())
    }
}

impl<T: fmt::Display, const R: usize> fmt::Display for GenVec<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, x) in self.v.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{x}")?;
        }
        write!(f, "]")
    }
}

impl<T: Float, const R: usize> ComplexKernel for GenVec<T, R> {
    const COMPLEX_LANES: usize = R / 2;

    fn zeros() -> Self {
        GenVec::zeros()
    }

    fn from_interleaved(values: &[f32]) -> Self {
        assert!(values.len() >= R, "need {R} values, got {}", values.len());

        let mut out = GenVec::zeros();
        for (lane, &x) in out.v.iter_mut().zip(values) {
            *lane = <T as NumCast>::from(x).unwrap_or_else(T::nan);
        }
        out
    }

    fn to_interleaved(&self) -> Vec<f32> {
        self.v
            .iter()
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
