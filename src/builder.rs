use crate::recurrence::MatchCost;
use crate::utils::default_threads;
use crate::WavefrontEngine;

/// Tunables of a wavefront run. The process count comes from the group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavefrontConfig {
    /// Worker threads evaluating each process's block of a diagonal.
    pub threads_per_process: usize,
    /// Busy-work rounds spent per matching cell.
    pub cost_iterations: u32,
    /// Shortest block handed to the thread pool; `None` picks
    /// [`default_grain`](crate::utils::default_grain) from the table shape.
    pub min_parallel_len: Option<usize>,
}

impl Default for WavefrontConfig {
    fn default() -> Self {
        Self {
            threads_per_process: default_threads(),
            cost_iterations: MatchCost::DEFAULT_ITERATIONS,
            min_parallel_len: None,
        }
    }
}

pub struct WavefrontBuilder {
    config: WavefrontConfig,
}

impl WavefrontBuilder {
    pub fn new() -> Self {
        Self {
            config: WavefrontConfig::default(),
        }
    }
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.config.threads_per_process = threads;
        self
    }
    pub fn with_cost_iterations(mut self, iterations: u32) -> Self {
        self.config.cost_iterations = iterations;
        self
    }
    pub fn with_min_parallel_len(mut self, len: usize) -> Self {
        self.config.min_parallel_len = Some(len);
        self
    }
    pub fn build(self) -> WavefrontEngine {
        WavefrontEngine::with_config(self.config)
    }
}

impl Default for WavefrontBuilder {
    fn default() -> Self {
        Self::new()
    }
}
