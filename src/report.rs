//! Text output of a benchmark run.

use std::fmt::Write as _;

use chrono::{DateTime, Local};

use crate::config::BenchConfig;
use crate::generic::VecF;
use crate::harness::{Kernel, Measurement, Strategy};
use crate::simd;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const RULE_WIDTH: usize = 34;

/// Header printed before the first benchmark.
pub fn banner(config: &BenchConfig, started: &DateTime<Local>) -> String {
    let mut out = String::new();

    let lines = [
        "#".repeat(RULE_WIDTH),
        "# VECTORIZATION BENCHMARK".to_string(),
        format!("# {}", "-".repeat(RULE_WIDTH - 2)),
        "# everything is single precision".to_string(),
        "# lowercase  : complex numbers".to_string(),
        "# uppercase  : 3x3 complex matrices".to_string(),
        "# generic    : generic SIMD complex multiplication".to_string(),
        "# std        : num-complex Complex<f32> multiplication".to_string(),
        format!("# {:<11}: {}", simd::ISA_NAME, simd::ISA_DESCRIPTION),
        format!("# array size : {:.5} Mbytes", array_megabytes(config)),
        format!("# started    : {}", started.format(TIMESTAMP_FORMAT)),
        "#".repeat(RULE_WIDTH),
    ];

    for line in lines {
        out.push_str(&line);
        out.push('\n');
    }

    out
}

/// Size of one operand buffer in MiB.
pub fn array_megabytes(config: &BenchConfig) -> f64 {
    (config.buffer_len() * std::mem::size_of::<VecF>()) as f64 / (1024.0 * 1024.0)
}

/// Two lines per benchmark: its title, then duration and throughput.
pub fn format_measurement(m: &Measurement) -> String {
    format!(
        "# {}\nduration= {:.6} s -- Gflop/s= {:.3}",
        m.title(),
        m.seconds(),
        m.gflops()
    )
}

/// Gflop/s of every measurement, one row per kernel and one column per
/// strategy. Pairs that did not run show `-`.
pub fn summary_table(results: &[Measurement]) -> String {
    let strategies: Vec<Strategy> = Strategy::ALL
        .into_iter()
        .filter(|&s| results.iter().any(|m| m.strategy == s))
        .collect();
    let kernels: Vec<Kernel> = Kernel::ALL
        .into_iter()
        .filter(|&k| results.iter().any(|m| m.kernel == k))
        .collect();

    let mut out = String::new();
    if strategies.is_empty() {
        return out;
    }

    let name_width = kernels
        .iter()
        .map(|k| k.name().len())
        .max()
        .unwrap_or(0)
        .max("kernel".len());
    let column_width = 10;

    let _ = writeln!(out, "# summary (Gflop/s)");
    let _ = write!(out, "{:<name_width$}", "kernel");
    for s in &strategies {
        let _ = write!(out, " {:>column_width$}", s.label());
    }
    out.push('\n');

    for k in &kernels {
        let _ = write!(out, "{:<name_width$}", k.name());
        for s in &strategies {
            match results.iter().find(|m| m.kernel == *k && m.strategy == *s) {
                Some(m) => {
                    let _ = write!(out, " {:>column_width$.3}", m.gflops());
                }
                None => {
                    let _ = write!(out, " {:>column_width$}", "-");
                }
            }
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::time::Duration;

    fn measurement(strategy: Strategy, kernel: Kernel, millis: u64) -> Measurement {
        Measurement {
            strategy,
            kernel,
            elapsed: Duration::from_millis(millis),
            elements: 1_000,
            iterations: 1_000,
            flops_per_element: kernel.flops_per_element(crate::FCOMPLEX_WIDTH),
        }
    }

    #[test]
    fn test_banner() {
        let started = Local.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        let text = banner(&BenchConfig::default(), &started);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 12);
        assert_eq!(lines[0], "#".repeat(34));
        assert_eq!(lines[1], "# VECTORIZATION BENCHMARK");
        assert_eq!(lines[2], format!("# {}", "-".repeat(32)));
        assert_eq!(lines[3], "# everything is single precision");
        assert!(lines[8].contains(simd::ISA_DESCRIPTION));
        assert_eq!(lines[9], "# array size : 2.74658 Mbytes");
        assert_eq!(lines[10], "# started    : 2024-03-01 12:30:00");
        assert_eq!(lines[11], lines[0]);
    }

    #[test]
    fn test_array_size() {
        let config = BenchConfig {
            elements: 1024 * 1024 / 9,
            ..BenchConfig::default()
        };
        let expected = (1024 * 1024 / 9 * 9 * 32) as f64 / (1024.0 * 1024.0);
        assert_eq!(array_megabytes(&config), expected);
    }

    #[test]
    fn test_format_measurement() {
        let m = measurement(Strategy::Std, Kernel::Mac, 250);
        assert_eq!(
            format_measurement(&m),
            "# std a[i] += b[i]*c[i]\nduration= 0.250000 s -- Gflop/s= 0.128"
        );
    }

    #[test]
    fn test_summary_table() {
        let results = vec![
            measurement(Strategy::Generic, Kernel::Mul2, 100),
            measurement(Strategy::Std, Kernel::Mul2, 200),
            measurement(Strategy::Generic, Kernel::MatMul, 1_000),
        ];
        let table = summary_table(&results);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], "# summary (Gflop/s)");
        assert!(lines[1].starts_with("kernel"));
        assert!(lines[1].contains("generic") && lines[1].contains("std"));
        assert_eq!(lines.len(), 4);
        assert!(lines[2].starts_with("mul2"));
        assert!(lines[2].ends_with("0.120"));
        assert!(lines[3].starts_with("matmul"));
        assert!(lines[3].trim_end().ends_with('-'));
    }

    #[test]
    fn test_summary_table_empty() {
        assert!(summary_table(&[]).is_empty());
    }
}
