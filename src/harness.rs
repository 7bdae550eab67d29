//! Timing harness.
//!
//! Every benchmark runs one kernel over the first `elements` vectors (or
//! matrices) of three pre-filled buffers, `iterations` times in a row, and the
//! whole loop is timed with a monotonic clock. Throughput is the kernel's flop
//! count times the number of calls divided by the elapsed time.

use std::hint::black_box;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::BenchConfig;
use crate::generic::VecF;
use crate::matmul::{matmul, matmul_unrolled, MATMUL_FLOPS_PER_LANE};
use crate::simd::{self, traits::ComplexKernel};
use crate::std_complex::CVecF;
use crate::{F32_LANES, N_COEF};

/// Seed of the buffer contents, shared by every strategy.
pub const INPUT_SEED: u64 = 42;

/// The benchmarked operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kernel {
    /// `a[i] = b[i] + c[i]`, real lanes.
    Add,
    /// `a[i] = b[i] * c[i]`, product returned by value.
    Mul2,
    /// `a[i] = b[i] * c[i]`, product written in place.
    Mul3,
    /// `a[i] += b[i] * c[i]`.
    Mac,
    /// `A[i] = B[i] * C[i]` on 3x3 matrices.
    MatMul,
    /// [`Kernel::MatMul`] with unrolled loops.
    MatMulUnrolled,
}

impl Kernel {
    /// Run order within a strategy.
    pub const ALL: [Kernel; 6] = [
        Kernel::Add,
        Kernel::Mul2,
        Kernel::Mul3,
        Kernel::Mac,
        Kernel::MatMul,
        Kernel::MatMulUnrolled,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Kernel::Add => "add",
            Kernel::Mul2 => "mul2",
            Kernel::Mul3 => "mul3",
            Kernel::Mac => "mac",
            Kernel::MatMul => "matmul",
            Kernel::MatMulUnrolled => "matmul_unrolled",
        }
    }

    /// Formula printed in the report; lowercase operands are complex numbers,
    /// uppercase ones are matrices.
    pub fn description(self) -> &'static str {
        match self {
            Kernel::Add => "a[i] = b[i] + c[i]",
            Kernel::Mul2 => "a[i] = b[i]*c[i] (2 args)",
            Kernel::Mul3 => "a[i] = b[i]*c[i] (3 args)",
            Kernel::Mac => "a[i] += b[i]*c[i]",
            Kernel::MatMul => "A[i] = B[i]*C[i]",
            Kernel::MatMulUnrolled => "A[i] = B[i]*C[i] (unrolled)",
        }
    }

    /// Floating-point operations of one call on a vector of `complex_lanes`
    /// complex numbers.
    pub fn flops_per_element(self, complex_lanes: usize) -> f64 {
        let per_lane = match self {
            Kernel::Add => 2,
            Kernel::Mul2 | Kernel::Mul3 => 6,
            Kernel::Mac => 8,
            Kernel::MatMul | Kernel::MatMulUnrolled => MATMUL_FLOPS_PER_LANE,
        };
        (per_lane * complex_lanes) as f64
    }
}

/// The three ways the kernels are written.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Plain loops over `f32` lanes ([`crate::generic`]).
    Generic,
    /// `num::complex::Complex<f32>` operators ([`crate::std_complex`]).
    Std,
    /// Hand-written intrinsics ([`crate::simd`]).
    Intrinsics,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Generic, Strategy::Std, Strategy::Intrinsics];

    pub fn label(self) -> &'static str {
        match self {
            Strategy::Generic => "generic",
            Strategy::Std => "std",
            Strategy::Intrinsics => simd::ISA_NAME,
        }
    }
}

/// Result of one benchmark.
#[derive(Clone, Debug, PartialEq)]
pub struct Measurement {
    pub strategy: Strategy,
    pub kernel: Kernel,
    pub elapsed: Duration,
    pub elements: usize,
    pub iterations: usize,
    pub flops_per_element: f64,
}

impl Measurement {
    /// Selection name, `<strategy>/<kernel>` in lowercase.
    pub fn name(&self) -> String {
        benchmark_name(self.strategy, self.kernel)
    }

    pub fn title(&self) -> String {
        format!("{} {}", self.strategy.label(), self.kernel.description())
    }

    pub fn seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    pub fn total_flops(&self) -> f64 {
        self.flops_per_element * self.iterations as f64 * self.elements as f64
    }

    /// Throughput in Gflop/s, `0.0` if the clock did not advance.
    pub fn gflops(&self) -> f64 {
        let seconds = self.seconds();
        if seconds > 0.0 {
            self.total_flops() / 1.0e9 / seconds
        } else {
            0.0
        }
    }
}

pub fn benchmark_name(strategy: Strategy, kernel: Kernel) -> String {
    format!("{}/{}", strategy.label().to_lowercase(), kernel.name())
}

/// Interleaved single-precision input shared by every strategy.
#[derive(Clone, Debug)]
pub struct InputData {
    pub b: Vec<f32>,
    pub c: Vec<f32>,
}

impl InputData {
    /// `vectors` vectors worth of values in `[-1, 1)` for `b` and `c`.
    pub fn random(vectors: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let len = vectors * F32_LANES;

        let b = (0..len).map(|_| rng.random_range(-1.0..1.0)).collect();
        let c = (0..len).map(|_| rng.random_range(-1.0..1.0)).collect();

        Self { b, c }
    }
}

/// Operand buffers of one strategy; `a` starts at zero.
#[derive(Clone, Debug)]
pub struct Buffers<K> {
    pub a: Vec<K>,
    pub b: Vec<K>,
    pub c: Vec<K>,
}

impl<K: ComplexKernel> Buffers<K> {
    pub fn from_input(input: &InputData) -> Self {
        let load = |values: &[f32]| -> Vec<K> {
            values
                .chunks_exact(K::REAL_LANES)
                .map(K::from_interleaved)
                .collect()
        };

        let b = load(&input.b);
        let c = load(&input.c);
        let a = vec![K::zeros(); b.len()];

        Self { a, b, c }
    }

    fn len(&self) -> usize {
        self.a.len()
    }
}

/// Signature shared by [`run_kernel`] and [`run_intrinsic_kernel`].
pub type KernelTimer<K> = fn(Kernel, &mut Buffers<K>, usize, usize) -> Duration;

/// Calls `body(i)` for `i in 0..elements`, `iterations` times, and returns the
/// elapsed time.
#[inline(always)]
pub fn time_loop<F: FnMut(usize)>(elements: usize, iterations: usize, mut body: F) -> Duration {
    let start = Instant::now();

    for _ in 0..iterations {
        for i in 0..elements {
            body(i);
        }
    }

    start.elapsed()
}

/// Times one kernel over `buffers`.
///
/// # Panics
///
/// Panics if the buffers hold fewer than `elements * N_COEF` vectors.
#[inline(always)]
pub fn run_kernel<K: ComplexKernel>(
    kernel: Kernel,
    buffers: &mut Buffers<K>,
    elements: usize,
    iterations: usize,
) -> Duration {
    assert!(
        buffers.len() >= elements * N_COEF,
        "buffers hold {} vectors, {} elements need {}",
        buffers.len(),
        elements,
        elements * N_COEF
    );

    let Buffers { a, b, c } = buffers;
    let n = elements;

    let elapsed = match kernel {
        Kernel::Add => {
            let (a, b, c) = (&mut a[..n], &b[..n], &c[..n]);
            time_loop(n, iterations, |i| a[i] = K::cadd(&b[i], &c[i]))
        }
        Kernel::Mul2 => {
            let (a, b, c) = (&mut a[..n], &b[..n], &c[..n]);
            time_loop(n, iterations, |i| a[i] = K::cmul(&b[i], &c[i]))
        }
        Kernel::Mul3 => {
            let (a, b, c) = (&mut a[..n], &b[..n], &c[..n]);
            time_loop(n, iterations, |i| K::cmul_into(&mut a[i], &b[i], &c[i]))
        }
        Kernel::Mac => {
            let (a, b, c) = (&mut a[..n], &b[..n], &c[..n]);
            time_loop(n, iterations, |i| K::cmac(&mut a[i], &b[i], &c[i]))
        }
        Kernel::MatMul => time_loop(n, iterations, |i| {
            let os = i * N_COEF;
            matmul(&mut a[os..os + N_COEF], &b[os..os + N_COEF], &c[os..os + N_COEF]);
        }),
        Kernel::MatMulUnrolled => time_loop(n, iterations, |i| {
            let os = i * N_COEF;
            matmul_unrolled(&mut a[os..os + N_COEF], &b[os..os + N_COEF], &c[os..os + N_COEF]);
        }),
    };

    // keep the stores alive
    black_box(&*a);

    elapsed
}

/// [`run_kernel`] on the intrinsic vector type, compiled with the instruction
/// set the intrinsics need whatever the crate-wide target flags are.
///
/// # Panics
///
/// Panics if the running CPU lacks that instruction set, or if the buffers
/// are too short.
#[cfg(any(avx2, neon))]
pub fn run_intrinsic_kernel(
    kernel: Kernel,
    buffers: &mut Buffers<simd::IntrinsicVec>,
    elements: usize,
    iterations: usize,
) -> Duration {
    assert!(
        simd::intrinsics_available(),
        "{} instructions are not supported by this CPU",
        simd::ISA_NAME
    );

    // SAFETY: the features enabled on `run_kernel_isa` were detected above.
    unsafe { run_kernel_isa(kernel, buffers, elements, iterations) }
}

#[cfg(avx2)]
#[target_feature(enable = "avx2,fma")]
unsafe fn run_kernel_isa(
    kernel: Kernel,
    buffers: &mut Buffers<simd::IntrinsicVec>,
    elements: usize,
    iterations: usize,
) -> Duration {
    run_kernel(kernel, buffers, elements, iterations)
}

#[cfg(neon)]
#[target_feature(enable = "neon")]
unsafe fn run_kernel_isa(
    kernel: Kernel,
    buffers: &mut Buffers<simd::IntrinsicVec>,
    elements: usize,
    iterations: usize,
) -> Duration {
    run_kernel(kernel, buffers, elements, iterations)
}

/// Runs the selected benchmarks of every available strategy.
pub struct Harness {
    config: BenchConfig,
    input: InputData,
}

impl Harness {
    pub fn new(config: BenchConfig) -> Self {
        let input = InputData::random(config.buffer_len(), INPUT_SEED);
        Self { config, input }
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// Runs every selected kernel with the vector type `K`, calling `report`
    /// after each benchmark.
    pub fn run<K, F>(&self, strategy: Strategy, report: F) -> Vec<Measurement>
    where
        K: ComplexKernel,
        F: FnMut(&Measurement),
    {
        self.run_timed(strategy, run_kernel::<K>, report)
    }

    /// [`Harness::run`] with the kernels timed by `timer`.
    pub fn run_timed<K, F>(
        &self,
        strategy: Strategy,
        timer: KernelTimer<K>,
        mut report: F,
    ) -> Vec<Measurement>
    where
        K: ComplexKernel,
        F: FnMut(&Measurement),
    {
        let selected: Vec<Kernel> = Kernel::ALL
            .into_iter()
            .filter(|&kernel| self.config.selects(&benchmark_name(strategy, kernel)))
            .collect();

        if selected.is_empty() {
            log::debug!("no {} benchmark selected", strategy.label());
            return Vec::new();
        }

        let mut buffers = Buffers::<K>::from_input(&self.input);
        let mut results = Vec::with_capacity(selected.len());

        for kernel in selected {
            log::info!("running {}", benchmark_name(strategy, kernel));

            let elapsed = timer(
                kernel,
                &mut buffers,
                self.config.elements,
                self.config.iterations,
            );

            let measurement = Measurement {
                strategy,
                kernel,
                elapsed,
                elements: self.config.elements,
                iterations: self.config.iterations,
                flops_per_element: kernel.flops_per_element(K::COMPLEX_LANES),
            };

            report(&measurement);
            results.push(measurement);
        }

        results
    }

    /// Runs generic, std and, when the CPU supports them, intrinsic kernels in
    /// that order.
    pub fn run_all<F: FnMut(&Measurement)>(&self, mut report: F) -> Vec<Measurement> {
        let mut results = self.run::<VecF, _>(Strategy::Generic, &mut report);
        results.extend(self.run::<CVecF, _>(Strategy::Std, &mut report));
        results.extend(self.run_intrinsics(&mut report));
        results
    }

    #[cfg(any(avx2, neon))]
    fn run_intrinsics<F: FnMut(&Measurement)>(&self, report: F) -> Vec<Measurement> {
        if !simd::intrinsics_available() {
            log::warn!(
                "{} kernels were compiled but this CPU does not support them, skipping",
                simd::ISA_NAME
            );
            return Vec::new();
        }
        self.run_timed::<simd::IntrinsicVec, _>(
            Strategy::Intrinsics,
            run_intrinsic_kernel,
            report,
        )
    }

    #[cfg(not(any(avx2, neon)))]
    fn run_intrinsics<F: FnMut(&Measurement)>(&self, _report: F) -> Vec<Measurement> {
        log::warn!("no intrinsic kernels were compiled for this target, skipping");
        Vec::new()
    }
}
