use std::sync::atomic::{AtomicU64, Ordering};

/// Shared counters updated by pipeline stages while they run.
///
/// Counters are advisory diagnostics: stages update them with relaxed
/// ordering and the pipeline snapshots them after the reducer drains.
#[derive(Debug, Default)]
pub struct PipelineMetrics {
    bytes_read: AtomicU64,
    chunks_dispatched: AtomicU64,
    records_parsed: AtomicU64,
    records_skipped: AtomicU64,
}

impl PipelineMetrics {
    /// Account one dispatched chunk of `bytes` length.
    pub fn add_chunk(&self, bytes: u64) {
        self.bytes_read.fetch_add(bytes, Ordering::Relaxed);
        self.chunks_dispatched.fetch_add(1, Ordering::Relaxed);
    }

    /// Account one scanned chunk's parsed/skipped record counts.
    pub fn add_scan(&self, parsed: u64, skipped: u64) {
        self.records_parsed.fetch_add(parsed, Ordering::Relaxed);
        self.records_skipped.fetch_add(skipped, Ordering::Relaxed);
    }

    /// Copy the counters into an immutable snapshot.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            bytes_read: self.bytes_read.load(Ordering::Relaxed),
            chunks_dispatched: self.chunks_dispatched.load(Ordering::Relaxed),
            records_parsed: self.records_parsed.load(Ordering::Relaxed),
            records_skipped: self.records_skipped.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of the pipeline counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Total bytes dispatched to workers.
    pub bytes_read: u64,
    /// Chunks pushed onto the chunk queue.
    pub chunks_dispatched: u64,
    /// Records parsed and aggregated.
    pub records_parsed: u64,
    /// Malformed records skipped by workers.
    pub records_skipped: u64,
}

impl MetricsSnapshot {
    /// Fraction of scanned records that were skipped as malformed.
    pub fn skip_ratio(&self) -> f64 {
        let scanned = self.records_parsed + self.records_skipped;
        if scanned == 0 {
            0.0
        } else {
            self.records_skipped as f64 / scanned as f64
        }
    }
}
