#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Chunk scanning into worker-local statistics maps.
pub mod aggregate;
/// Boundary-safe block reading for parallel dispatch.
pub mod chunking;
/// Pipeline configuration types.
pub mod config;
/// Centralized constants used across the pipeline, record format, and rendering.
pub mod constants;
/// Fixed-point decoding of bounded-format measurement values.
pub mod decode;
/// Reusable CLI runners shared by downstream binaries.
pub mod example_apps;
/// Pipeline throughput and skip diagnostics.
pub mod metrics;
/// Producer/worker/reducer pipeline orchestration.
pub mod pipeline;
/// Final rounding, ordering, and rendering of aggregated results.
pub mod report;
/// Per-key statistics accumulation and merging.
pub mod stats;
/// Shared type aliases.
pub mod types;

mod errors;

pub use aggregate::{ChunkTally, scan_chunk};
pub use chunking::BlockChunker;
pub use config::PipelineConfig;
pub use decode::decode_tenths;
pub use errors::PipelineError;
pub use metrics::{MetricsSnapshot, PipelineMetrics};
pub use pipeline::{AggregateReport, AggregationPipeline};
pub use report::{KeySummary, render, round_tenth, summarize};
pub use stats::KeyStats;
pub use types::{Chunk, GlobalMap, PartialMap, StationKey, Tenths};
