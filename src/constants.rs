/// Constants used by the chunk producer, worker pool, and hand-off queues.
pub mod pipeline {
    /// Default raw read block size in bytes (32 MiB).
    ///
    /// Larger blocks amortize read syscalls; smaller blocks reduce queueing
    /// latency and peak memory while chunks wait for a worker.
    pub const DEFAULT_BLOCK_SIZE: usize = 32 * 1024 * 1024;
    /// Default bounded capacity of the chunk hand-off queue.
    pub const DEFAULT_CHUNK_QUEUE_CAPACITY: usize = 15;
    /// Default bounded capacity of the partial-result hand-off queue.
    pub const DEFAULT_PARTIAL_QUEUE_CAPACITY: usize = 10;
    /// Minimum number of scan workers regardless of detected cores.
    pub const MIN_WORKERS: usize = 1;
    /// Core count assumed when available parallelism cannot be queried.
    pub const FALLBACK_CORES: usize = 2;
}

/// Constants describing the record wire format.
pub mod record {
    /// Byte separating the key field from the value field.
    pub const FIELD_SEPARATOR: u8 = b';';
    /// Byte terminating a record.
    pub const RECORD_SEPARATOR: u8 = b'\n';
}

/// Constants used when rendering the final report line.
pub mod render {
    /// Delimiter placed between rendered key entries (never trailing).
    pub const ENTRY_DELIMITER: &str = ", ";
}
