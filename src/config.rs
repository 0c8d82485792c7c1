use std::thread;

use crate::constants::pipeline::{
    DEFAULT_BLOCK_SIZE, DEFAULT_CHUNK_QUEUE_CAPACITY, DEFAULT_PARTIAL_QUEUE_CAPACITY,
    FALLBACK_CORES, MIN_WORKERS,
};
use crate::errors::PipelineError;

/// Tuning knobs for the chunked aggregation pipeline.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// Size in bytes of each raw read block.
    ///
    /// Larger blocks amortize read syscalls; smaller blocks reduce queueing
    /// latency and peak memory while chunks wait for a worker.
    pub block_size: usize,
    /// Number of scan workers; `0` resolves to available cores minus one
    /// (one core stays reserved for the producer), floor one.
    pub workers: usize,
    /// Bounded capacity of the chunk hand-off queue.
    ///
    /// The producer blocks when the queue is full; together with
    /// `block_size` this bounds peak memory when workers lag.
    pub chunk_queue_capacity: usize,
    /// Bounded capacity of the partial-result hand-off queue.
    pub partial_queue_capacity: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            workers: 0,
            chunk_queue_capacity: DEFAULT_CHUNK_QUEUE_CAPACITY,
            partial_queue_capacity: DEFAULT_PARTIAL_QUEUE_CAPACITY,
        }
    }
}

impl PipelineConfig {
    /// Reject configurations the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.block_size == 0 {
            return Err(PipelineError::Configuration(
                "block_size must be at least 1 byte".into(),
            ));
        }
        if self.chunk_queue_capacity == 0 || self.partial_queue_capacity == 0 {
            return Err(PipelineError::Configuration(
                "queue capacities must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Resolve the configured worker count against available cores.
    pub fn effective_workers(&self) -> usize {
        if self.workers > 0 {
            return self.workers;
        }
        let cores = thread::available_parallelism()
            .map(usize::from)
            .unwrap_or(FALLBACK_CORES);
        cores.saturating_sub(1).max(MIN_WORKERS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(PipelineConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_block_size_is_rejected() {
        let config = PipelineConfig {
            block_size: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PipelineError::Configuration(_))
        ));
    }

    #[test]
    fn zero_queue_capacity_is_rejected() {
        let config = PipelineConfig {
            chunk_queue_capacity: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
        let config = PipelineConfig {
            partial_queue_capacity: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn explicit_worker_count_wins_over_detection() {
        let config = PipelineConfig {
            workers: 3,
            ..Default::default()
        };
        assert_eq!(config.effective_workers(), 3);
    }

    #[test]
    fn auto_worker_count_is_at_least_one() {
        let config = PipelineConfig::default();
        assert!(config.effective_workers() >= MIN_WORKERS);
    }
}
