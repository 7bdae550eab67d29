//! Complex Kernel Benchmarks across Strategies
//!
//! Criterion counterpart of the `vecbench` binary: every kernel runs one pass
//! over a buffer per sample, once per strategy.
//!
//! # Usage:
//! ```bash
//! cargo bench --bench cmul
//!
//! # Only the matrix kernels
//! cargo bench --bench cmul -- matmul
//! ```

use std::hint::black_box;
use std::time::Instant;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use vecbench::generic::VecF;
use vecbench::harness::{
    run_kernel, Buffers, InputData, Kernel, KernelTimer, Strategy, INPUT_SEED,
};
use vecbench::std_complex::CVecF;
use vecbench::{ComplexKernel, N_COEF};

const ELEMENT_COUNTS: &[usize] = &[256, 4_096, 10_000];

fn bench_strategy<K: ComplexKernel>(
    c: &mut Criterion,
    strategy: Strategy,
    timer: KernelTimer<K>,
    input: &InputData,
) {
    for kernel in Kernel::ALL {
        let mut group =
            c.benchmark_group(format!("{} {} flops", kernel.name(), strategy.label()));

        for &elements in ELEMENT_COUNTS {
            let flops = kernel.flops_per_element(K::COMPLEX_LANES) * elements as f64;
            // criterion reports these "elements" per second as flop/s
            group.throughput(Throughput::Elements(flops as u64));

            let mut buffers = Buffers::<K>::from_input(input);
            group.bench_function(BenchmarkId::new("flops", elements), |b| {
                b.iter(|| black_box(timer(kernel, &mut buffers, black_box(elements), 1)))
            });
        }

        group.finish();
    }
}

fn all_benchmarks(c: &mut Criterion) {
    let largest = ELEMENT_COUNTS.iter().copied().max().unwrap_or(0);
    let input = InputData::random(largest * N_COEF, INPUT_SEED);

    println!("Starting complex kernel benchmarks");
    let start_time = Instant::now();

    bench_strategy::<VecF>(c, Strategy::Generic, run_kernel::<VecF>, &input);
    bench_strategy::<CVecF>(c, Strategy::Std, run_kernel::<CVecF>, &input);

    #[cfg(any(avx2, neon))]
    if vecbench::simd::intrinsics_available() {
        bench_strategy::<vecbench::simd::IntrinsicVec>(
            c,
            Strategy::Intrinsics,
            vecbench::harness::run_intrinsic_kernel,
            &input,
        );
    }

    println!(
        "Benchmark suite completed in {:.2} seconds",
        start_time.elapsed().as_secs_f64()
    );
}

criterion_group!(benches, all_benchmarks);
criterion_main!(benches);
