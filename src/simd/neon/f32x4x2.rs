//! NEON register pair holding 4 complex f32 numbers.
//!
//! Lanes are interleaved `[re0, im0, re1, im1 | re2, im2, re3, im3]` across the
//! `lo` and `hi` registers, the same order as [`crate::generic::VecF`].
//!
//! # Complex multiplication
//!
//! For each register, with `b = (br, bi)` and `c = (cr, ci)`:
//!
//! 1. `vtrn1q(b, b)` duplicates real parts: `[br, br, ...]`
//! 2. `vtrn2q(b, b)` duplicates imaginary parts: `[bi, bi, ...]`
//! 3. `vrev64q(c)` swaps each pair of `c`, multiplied by step 2 and by
//!    `[-1, 1, ...]`: `[-bi*ci, bi*cr, ...]`
//! 4. `vfmaq(step3, step1, c)` adds `[br*cr, br*ci, ...]`
//!
//! NEON has no `fmaddsub`, so the sign is applied with an extra multiply.

#[cfg(target_arch = "aarch64")]
use std::arch::aarch64::*;

use std::fmt;

use crate::simd::traits::ComplexKernel;

/// NEON memory alignment requirement in bytes.
pub const NEON_ALIGNMENT: usize = 16;

/// Number of f32 elements that fit in one 128-bit NEON register.
pub const LANE_COUNT: usize = 4;

// negates the real part of every complex pair after the cross product
const REAL_SIGN: [f32; LANE_COUNT] = [-1.0, 1.0, -1.0, 1.0];

/// Two NEON registers holding 4 interleaved complex f32 values.
#[derive(Copy, Clone, Debug)]
#[repr(C, align(32))]
pub struct F32x4x2 {
    lo: float32x4_t,
    hi: float32x4_t,
}

/// Complex product of the 2 complex numbers in `b` and `c`.
///
/// `(br*cr - bi*ci, br*ci + bi*cr)` from one multiply and one fused
/// multiply-add: real parts of `b` are broadcast with `vtrn1q`, imaginary parts
/// with `vtrn2q`, and `vrev64q` swaps each pair of `c`.
#[inline(always)]
unsafe fn cmul_q(b: float32x4_t, c: float32x4_t) -> float32x4_t {
    let re = vtrn1q_f32(b, b);
    let im = vtrn2q_f32(b, b);

    let cross = vmulq_f32(im, vrev64q_f32(c));
    let signed = vmulq_f32(cross, vld1q_f32(REAL_SIGN.as_ptr()));

    vfmaq_f32(signed, re, c)
}

impl F32x4x2 {
    #[inline(always)]
    pub fn zeros() -> Self {
        unsafe {
            Self {
                lo: vdupq_n_f32(0.0),
                hi: vdupq_n_f32(0.0),
            }
        }
    }

    /// Loads 8 consecutive f32 values.
    ///
    /// # Safety
    ///
    /// Pointer must point to at least 8 valid f32 values.
    #[inline(always)]
    pub unsafe fn load(ptr: *const f32) -> Self {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        Self {
            lo: vld1q_f32(ptr),
            hi: vld1q_f32(ptr.add(LANE_COUNT)),
        }
    }

    /// Stores 8 consecutive f32 values.
    ///
    /// # Safety
    ///
    /// Pointer must point to at least 8 writable f32 values.
    #[inline(always)]
    pub unsafe fn store_at(&self, ptr: *mut f32) {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        vst1q_f32(ptr, self.lo);
        vst1q_f32(ptr.add(LANE_COUNT), self.hi);
    }

    #[inline(always)]
    pub fn to_array(&self) -> [f32; 2 * LANE_COUNT] {
        let mut out = [0.0f32; 2 * LANE_COUNT];
        unsafe { self.store_at(out.as_mut_ptr()) };
        out
    }

    #[inline(always)]
    pub fn add(&self, rhs: &Self) -> Self {
        unsafe {
            Self {
                lo: vaddq_f32(self.lo, rhs.lo),
                hi: vaddq_f32(self.hi, rhs.hi),
            }
        }
    }

    #[inline(always)]
    pub fn mul(&self, rhs: &Self) -> Self {
        unsafe {
            Self {
                lo: cmul_q(self.lo, rhs.lo),
                hi: cmul_q(self.hi, rhs.hi),
            }
        }
    }

    /// `self += b * c`.
    #[inline(always)]
    pub fn mac(&mut self, b: &Self, c: &Self) {
        *self = self.add(&b.mul(c));
    }
}

impl fmt::Display for F32x4x2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lanes = self.to_array();
        write!(f, "[")?;
        for (i, x) in lanes.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{x}")?;
        }
        write!(f, "]")
    }
}

impl ComplexKernel for F32x4x2 {
    const COMPLEX_LANES: usize = LANE_COUNT;

    #[inline(always)]
    fn zeros() -> Self {
        F32x4x2::zeros()
    }

    fn from_interleaved(values: &[f32]) -> Self {
        assert!(
            values.len() >= 2 * LANE_COUNT,
            "need {} values, got {}",
            2 * LANE_COUNT,
            values.len()
        );

        unsafe { Self::load(values.as_ptr()) }
    }

    fn to_interleaved(&self) -> Vec<f32> {
        self.to_array().to_vec()
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
    fn cmac(a: &mut Self, b: &Self, c: &Self) {
        a.mac(b, c);
    }
}
