/// A short vector of packed complex numbers.
///
/// Every implementation stores its complex values interleaved as
/// `[re0, im0, re1, im1, ...]`, so the same `f32` data loaded into any of them
/// describes the same numbers.
pub trait ComplexKernel: Copy {
    /// Complex values packed in one vector.
    const COMPLEX_LANES: usize;

    /// Real lanes packed in one vector.
    const REAL_LANES: usize = 2 * Self::COMPLEX_LANES;

    fn zeros() -> Self;

    /// Loads `REAL_LANES` interleaved values.
    ///
    /// # Panics
    ///
    /// Panics if `values` holds fewer than `REAL_LANES` elements.
    fn from_interleaved(values: &[f32]) -> Self;

    fn to_interleaved(&self) -> Vec<f32>;

    /// Lane-wise real addition, `b + c`.
    fn cadd(b: &Self, c: &Self) -> Self;

    /// Complex multiplication returning the product, `b * c`.
    fn cmul(b: &Self, c: &Self) -> Self;

    /// Complex multiplication into an existing vector, `a = b * c`.
    #[inline(always)]
    fn cmul_into(a: &mut Self, b: &Self, c: &Self) {
        *a = Self::cmul(b, c);
    }

    /// Complex multiply-accumulate, `a += b * c`.
    fn cmac(a: &mut Self, b: &Self, c: &Self);
}
