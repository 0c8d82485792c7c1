use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error type for pipeline configuration, IO, and record decoding failures.
///
/// Open, read, and configuration failures are fatal and abort the run with
/// no output. `MalformedRecord` and `MalformedValue` describe per-record
/// skips; workers absorb them into the skip tally instead of propagating.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("input file '{path}' cannot be opened: {source}")]
    InputOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Read(#[from] io::Error),
    #[error("malformed record: {reason}")]
    MalformedRecord { reason: &'static str },
    #[error("value '{text}' is outside the bounded fixed-point format")]
    MalformedValue { text: String },
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("pipeline stage '{stage}' stopped before its input was exhausted")]
    StageStopped { stage: &'static str },
}
