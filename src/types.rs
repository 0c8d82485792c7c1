use std::collections::HashMap;

use indexmap::IndexMap;

use crate::stats::KeyStats;

/// Category label parsed from the key field of a record.
/// Example: `Hamburg`
pub type StationKey = String;
/// Signed measurement magnitude in integer tenths.
/// Examples: `12.0` -> `120`, `-3.5` -> `-35`
pub type Tenths = i64;
/// Owned byte range containing only whole records, consumed by one worker.
pub type Chunk = Vec<u8>;
/// Worker-local statistics map built from exactly one chunk, then handed
/// to the reducer (ownership transfers on send).
pub type PartialMap = HashMap<StationKey, KeyStats>;
/// Reducer-owned statistics map; mutated only by merges, read-only once
/// the partial-result queue drains.
pub type GlobalMap = IndexMap<StationKey, KeyStats>;
