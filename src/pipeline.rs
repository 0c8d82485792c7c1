use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, bounded};
use tracing::debug;

use crate::aggregate::{ChunkTally, scan_chunk};
use crate::chunking::BlockChunker;
use crate::config::PipelineConfig;
use crate::errors::PipelineError;
use crate::metrics::{MetricsSnapshot, PipelineMetrics};
use crate::report::{KeySummary, render, summarize};
use crate::types::{Chunk, GlobalMap, PartialMap};

/// Outcome of a completed pipeline run.
#[derive(Clone, Debug)]
pub struct AggregateReport {
    /// Per-key summaries sorted ascending by key byte order.
    pub summaries: Vec<KeySummary>,
    /// Counter snapshot taken after the reducer drained.
    pub metrics: MetricsSnapshot,
    /// Wall-clock time spent inside the pipeline.
    pub elapsed: Duration,
}

impl AggregateReport {
    /// Render the summaries as the single-line report format.
    pub fn to_line(&self) -> String {
        render(&self.summaries)
    }
}

/// Chunked-read, parallel-scan, merge pipeline with a fixed worker pool.
///
/// One producer thread realigns fixed-size blocks on record boundaries and
/// feeds a bounded chunk queue; each scan worker turns chunks into private
/// partial maps and hands them over a bounded queue to the reducer, which
/// merges them on the calling thread. The queues are the only shared
/// structures: every chunk is consumed by exactly one worker and every
/// partial map by the reducer alone, so the hot aggregation path takes no
/// locks.
pub struct AggregationPipeline {
    config: PipelineConfig,
}

impl AggregationPipeline {
    /// Create a pipeline, validating the configuration up front.
    pub fn new(config: PipelineConfig) -> Result<Self, PipelineError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Aggregate a file from disk.
    pub fn run(&self, path: impl AsRef<Path>) -> Result<AggregateReport, PipelineError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| PipelineError::InputOpen {
            path: path.to_path_buf(),
            source,
        })?;
        self.run_reader(file)
    }

    /// Aggregate any readable source.
    ///
    /// A read failure is fatal: the pipeline drains in-flight work, then
    /// returns the error with no partial results.
    pub fn run_reader<R: Read + Send>(&self, reader: R) -> Result<AggregateReport, PipelineError> {
        let started = Instant::now();
        let workers = self.config.effective_workers();
        let block_size = self.config.block_size;
        let metrics = PipelineMetrics::default();
        let mut global = GlobalMap::new();

        thread::scope(|scope| -> Result<(), PipelineError> {
            let (chunk_tx, chunk_rx) = bounded::<Chunk>(self.config.chunk_queue_capacity);
            let (partial_tx, partial_rx) =
                bounded::<PartialMap>(self.config.partial_queue_capacity);

            let producer = {
                let metrics = &metrics;
                scope.spawn(move || {
                    produce_chunks(BlockChunker::new(reader, block_size), chunk_tx, metrics)
                })
            };

            let mut scan_handles = Vec::with_capacity(workers);
            for worker in 0..workers {
                let chunk_rx = chunk_rx.clone();
                let partial_tx = partial_tx.clone();
                let metrics = &metrics;
                scan_handles.push(
                    scope.spawn(move || scan_worker(worker, &chunk_rx, &partial_tx, metrics)),
                );
            }
            // Only the producer and workers may keep the queues open from
            // here on: dropping these lets disconnects drive shutdown.
            drop(chunk_rx);
            drop(partial_tx);

            // Reduce on the calling thread. Arrival order is insignificant
            // because the per-key combine is commutative and associative.
            let mut merged = 0u64;
            while let Ok(partial) = partial_rx.recv() {
                merge_partial(&mut global, partial);
                merged += 1;
            }
            debug!(merged, keys = global.len(), "reducer drained partial-result queue");

            for handle in scan_handles {
                handle.join().map_err(|_| PipelineError::StageStopped {
                    stage: "scan worker",
                })?;
            }
            match producer.join() {
                Ok(outcome) => outcome,
                Err(_) => Err(PipelineError::StageStopped {
                    stage: "chunk producer",
                }),
            }
        })?;

        Ok(AggregateReport {
            summaries: summarize(global),
            metrics: metrics.snapshot(),
            elapsed: started.elapsed(),
        })
    }
}

/// Producer loop: dispatch boundary-aligned chunks until input is exhausted.
///
/// The bounded send is the pipeline's backpressure point. Dropping the
/// sender on return closes the chunk queue and releases the workers.
fn produce_chunks<R: Read>(
    chunker: BlockChunker<R>,
    chunk_tx: Sender<Chunk>,
    metrics: &PipelineMetrics,
) -> Result<(), PipelineError> {
    let mut dispatched = 0u64;
    for chunk in chunker {
        let chunk = chunk?;
        metrics.add_chunk(chunk.len() as u64);
        dispatched += 1;
        if chunk_tx.send(chunk).is_err() {
            return Err(PipelineError::StageStopped {
                stage: "scan workers",
            });
        }
    }
    debug!(dispatched, "chunk producer reached end of input");
    Ok(())
}

/// Worker loop: one private partial map per chunk, handed to the reducer.
///
/// Exits when the chunk queue closes and is empty; dropping its sender
/// clone contributes to closing the partial-result queue.
fn scan_worker(
    worker: usize,
    chunk_rx: &Receiver<Chunk>,
    partial_tx: &Sender<PartialMap>,
    metrics: &PipelineMetrics,
) {
    let mut totals = ChunkTally::default();
    let mut chunks = 0u64;
    while let Ok(chunk) = chunk_rx.recv() {
        let mut partial = PartialMap::new();
        let tally = scan_chunk(&chunk, &mut partial);
        metrics.add_scan(tally.parsed, tally.skipped);
        if tally.skipped > 0 {
            debug!(worker, skipped = tally.skipped, "skipped malformed records in chunk");
        }
        totals.parsed += tally.parsed;
        totals.skipped += tally.skipped;
        chunks += 1;
        if partial_tx.send(partial).is_err() {
            // The reducer is gone; nothing useful left to do.
            return;
        }
    }
    debug!(
        worker,
        chunks,
        parsed = totals.parsed,
        skipped = totals.skipped,
        "scan worker drained chunk queue"
    );
}

/// Merge one worker partial into the reducer-owned global map.
fn merge_partial(global: &mut GlobalMap, partial: PartialMap) {
    for (key, stats) in partial {
        match global.get_mut(&key) {
            Some(existing) => existing.merge(&stats),
            None => {
                global.insert(key, stats);
            }
        }
    }
}
