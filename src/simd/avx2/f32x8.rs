//! AVX2 8-lane f32 vector holding 4 complex numbers.
//!
//! Lanes are interleaved `[re0, im0, re1, im1, re2, im2, re3, im3]`, the same
//! order as [`crate::generic::VecF`], so both can be filled from one buffer of
//! floats.
//!
//! # Complex multiplication
//!
//! For `b = (br, bi)` and `c = (cr, ci)`:
//!
//! 1. `moveldup(b)` duplicates real parts: `[br, br, ...]`
//! 2. `movehdup(b)` duplicates imaginary parts: `[bi, bi, ...]`
//! 3. swapping each pair of `c` gives `[ci, cr, ...]`, multiplied by step 2:
//!    `[bi*ci, bi*cr, ...]`
//! 4. `fmaddsub(step1, c, step3)` subtracts in even lanes and adds in odd lanes:
//!    `[br*cr - bi*ci, br*ci + bi*cr, ...]`
//!
//! One multiply and one fused multiply-add per 4 complex products.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use std::fmt;

use crate::simd::traits::ComplexKernel;

/// AVX2 memory alignment requirement in bytes.
pub(crate) const AVX_ALIGNMENT: usize = 32;

/// Number of f32 elements that fit in an AVX2 256-bit vector.
pub(crate) const LANE_COUNT: usize = 8;

// imm8 swapping the two floats of every complex pair: [1, 0, 3, 2]
const SWAP_RE_IM: i32 = 0b10_11_00_01;

/// 256-bit AVX register of 4 packed single-precision complex numbers.
#[derive(Copy, Clone, Debug)]
#[repr(transparent)]
pub struct F32x8 {
    pub elements: __m256,
}

impl F32x8 {
    /// Vector of zeros.
    #[inline(always)]
    pub fn zeros() -> Self {
        Self {
            elements: unsafe { _mm256_setzero_ps() },
        }
    }

    /// Checks if a pointer is aligned for `_mm256_load_ps`.
    #[inline(always)]
    pub fn is_aligned(ptr: *const f32) -> bool {
        (ptr as usize) % AVX_ALIGNMENT == 0
    }

    /// Loads 8 elements from unaligned memory.
    ///
    /// # Safety
    ///
    /// Pointer must point to at least 8 valid f32 values.
    #[inline(always)]
    pub unsafe fn load_unaligned(ptr: *const f32) -> Self {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        Self {
            elements: _mm256_loadu_ps(ptr),
        }
    }

    /// Stores 8 elements to unaligned memory.
    ///
    /// # Safety
    ///
    /// Pointer must point to at least 8 writable f32 values.
    #[inline(always)]
    pub unsafe fn store_unaligned_at(&self, ptr: *mut f32) {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        _mm256_storeu_ps(ptr, self.elements)
    }

    /// Copies the lanes out of the register.
    #[inline(always)]
    pub fn to_array(&self) -> [f32; LANE_COUNT] {
        let mut out = [0.0f32; LANE_COUNT];
        unsafe { self.store_unaligned_at(out.as_mut_ptr()) };
        out
    }

    /// Lane-wise addition, `_mm256_add_ps`.
    #[inline(always)]
    pub fn add(&self, rhs: &Self) -> Self {
        Self {
            elements: unsafe { _mm256_add_ps(self.elements, rhs.elements) },
        }
    }

    /// Complex product of `self` and `rhs`.
    #[inline(always)]
    pub fn mul(&self, rhs: &Self) -> Self {
        unsafe {
            let re = _mm256_moveldup_ps(self.elements);
            let im = _mm256_movehdup_ps(self.elements);

            let cross = _mm256_mul_ps(im, _mm256_permute_ps(rhs.elements, SWAP_RE_IM));

            Self {
                elements: _mm256_fmaddsub_ps(re, rhs.elements, cross),
            }
        }
    }

    /// `self += b * c`.
    #[inline(always)]
    pub fn mac(&mut self, b: &Self, c: &Self) {
        *self = self.add(&b.mul(c));
    }
}

impl fmt::Display for F32x8 {
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

impl ComplexKernel for F32x8 {
    const COMPLEX_LANES: usize = LANE_COUNT / 2;

    #[inline(always)]
    fn zeros() -> Self {
        F32x8::zeros()
    }

    fn from_interleaved(values: &[f32]) -> Self {
        assert!(
            values.len() >= LANE_COUNT,
            "need {LANE_COUNT} values, got {}",
            values.len()
        );

        unsafe { Self::load_unaligned(values.as_ptr()) }
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
