//! Runtime configuration for the parallel sections of the library.
//!
//! Only pairwise distance evaluation runs in parallel. Everything else is a
//! synchronous pure function of its inputs.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for parallel distance evaluation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParallelConfig {
    /// Minimum number of element pairs to trigger parallel execution
    pub min_pairs_for_parallel: usize,
    /// Disable parallel execution entirely
    pub force_sequential: bool,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            min_pairs_for_parallel: 64,
            force_sequential: false,
        }
    }
}

impl ParallelConfig {
    /// Create a new parallel configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration that never parallelizes.
    pub fn sequential() -> Self {
        Self {
            force_sequential: true,
            ..Self::default()
        }
    }

    /// Set the minimum pair count for parallel execution.
    pub fn with_min_pairs(mut self, min_pairs: usize) -> Self {
        self.min_pairs_for_parallel = min_pairs;
        self
    }

    /// Check if parallel execution should be used for the given pair count.
    pub fn should_parallelize(&self, pairs: usize) -> bool {
        cfg!(feature = "parallel") && !self.force_sequential && pairs >= self.min_pairs_for_parallel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_never_parallelizes() {
        let config = ParallelConfig::sequential();
        assert!(!config.should_parallelize(1_000_000));
    }

    #[test]
    fn test_threshold() {
        let config = ParallelConfig::new().with_min_pairs(10);
        assert!(!config.should_parallelize(9));
        assert_eq!(config.should_parallelize(10), cfg!(feature = "parallel"));
    }
}
