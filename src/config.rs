//! Benchmark run configuration.
//!
//! The binary takes no flags. Defaults come from the crate constants and can be
//! overridden through environment variables:
//!
//! - `VECBENCH_ELEMENTS`: vectors per buffer (default [`N_ELEM`])
//! - `VECBENCH_ITERATIONS`: timing-loop iterations (default [`N_IT`])
//! - `VECBENCH_FILTER`: only run benchmarks whose `<strategy>/<kernel>` name
//!   contains this substring

use crate::error::{config_error, validation_error, Result};
use crate::{N_ELEM, N_IT};

pub const ELEMENTS_KEY: &str = "VECBENCH_ELEMENTS";
pub const ITERATIONS_KEY: &str = "VECBENCH_ITERATIONS";
pub const FILTER_KEY: &str = "VECBENCH_FILTER";

/// Sizes and selection for one benchmark run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchConfig {
    /// Vectors touched by each timing-loop iteration.
    pub elements: usize,
    /// Timing-loop iterations.
    pub iterations: usize,
    /// Optional substring filter on benchmark names.
    pub filter: Option<String>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            elements: N_ELEM,
            iterations: N_IT,
            filter: None,
        }
    }
}

impl BenchConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from any key lookup, falling back to defaults
    /// for missing keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let elements = match lookup(ELEMENTS_KEY) {
            Some(value) => parse_count(ELEMENTS_KEY, &value)?,
            None => defaults.elements,
        };

        let iterations = match lookup(ITERATIONS_KEY) {
            Some(value) => parse_count(ITERATIONS_KEY, &value)?,
            None => defaults.iterations,
        };

        let filter = lookup(FILTER_KEY)
            .map(|value| value.trim().to_lowercase())
            .filter(|value| !value.is_empty());

        let config = Self {
            elements,
            iterations,
            filter,
        };
        config.validate()?;

        log::debug!("benchmark configuration: {config:?}");

        Ok(config)
    }

    /// Checks that the run does some work.
    pub fn validate(&self) -> Result<()> {
        if self.elements == 0 {
            return Err(validation_error("element count must be positive"));
        }
        if self.iterations == 0 {
            return Err(validation_error("iteration count must be positive"));
        }
        if self.elements.checked_mul(crate::N_COEF).is_none() {
            return Err(validation_error(format!(
                "element count {} overflows the buffer size",
                self.elements
            )));
        }
        Ok(())
    }

    /// Whether the benchmark called `name` is selected by the filter.
    pub fn selects(&self, name: &str) -> bool {
        match &self.filter {
            Some(filter) => name.to_lowercase().contains(filter.as_str()),
            None => true,
        }
    }

    /// Vectors per buffer: room for one matrix per element.
    pub fn buffer_len(&self) -> usize {
        self.elements * crate::N_COEF
    }
}

fn parse_count(key: &str, value: &str) -> Result<usize> {
    value
        .trim()
        .replace('_', "")
        .parse::<usize>()
        .map_err(|err| config_error(key, value, format!("expected an unsigned integer ({err})")))
}
