use crate::constants::record::{FIELD_SEPARATOR, RECORD_SEPARATOR};
use crate::decode::decode_tenths;
use crate::errors::PipelineError;
use crate::stats::KeyStats;
use crate::types::{PartialMap, Tenths};

/// Per-chunk scan outcome reported into the pipeline counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChunkTally {
    /// Records parsed and folded into the partial map.
    pub parsed: u64,
    /// Malformed records skipped without aborting the scan.
    pub skipped: u64,
}

/// Scan one chunk of whole records into `partial`.
///
/// Each line is split on the first field separator; the key must be
/// non-empty valid UTF-8 and the value must decode through the bounded
/// fixed-point format. Malformed records are skipped, never fatal: the
/// engine favors throughput and partial-data tolerance over strict
/// validation. Key bytes are copied into an owned string only on the first
/// occurrence of the key within the chunk.
pub fn scan_chunk(chunk: &[u8], partial: &mut PartialMap) -> ChunkTally {
    let mut tally = ChunkTally::default();
    for line in chunk.split(|&byte| byte == RECORD_SEPARATOR) {
        if line.is_empty() {
            // Artifact of splitting a separator-terminated chunk.
            continue;
        }
        match parse_record(line) {
            Ok((key, value)) => {
                tally.parsed += 1;
                match partial.get_mut(key) {
                    Some(stats) => stats.record(value),
                    None => {
                        partial.insert(key.to_owned(), KeyStats::new(value));
                    }
                }
            }
            Err(_) => tally.skipped += 1,
        }
    }
    tally
}

/// Split one line into `(key, tenths)`, classifying malformed records as
/// `MalformedRecord` (structural) or `MalformedValue` (decode failure).
fn parse_record(line: &[u8]) -> Result<(&str, Tenths), PipelineError> {
    let separator = line
        .iter()
        .position(|&byte| byte == FIELD_SEPARATOR)
        .ok_or(PipelineError::MalformedRecord {
            reason: "missing field separator",
        })?;
    let (key_bytes, rest) = line.split_at(separator);
    let value_bytes = &rest[1..];
    if key_bytes.is_empty() {
        return Err(PipelineError::MalformedRecord { reason: "empty key" });
    }
    if value_bytes.is_empty() {
        return Err(PipelineError::MalformedRecord {
            reason: "empty value",
        });
    }
    let key = std::str::from_utf8(key_bytes).map_err(|_| PipelineError::MalformedRecord {
        reason: "key is not valid UTF-8",
    })?;
    let value = decode_tenths(value_bytes)?;
    Ok((key, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_accumulates_per_key_statistics() {
        let mut partial = PartialMap::new();
        let tally = scan_chunk(b"Hamburg;12.0\nBulawayo;8.9\nHamburg;10.0\n", &mut partial);
        assert_eq!(tally, ChunkTally { parsed: 3, skipped: 0 });

        let hamburg = partial.get("Hamburg").expect("Hamburg aggregated");
        assert_eq!(hamburg.count, 2);
        assert_eq!(hamburg.sum, 220);
        assert_eq!(hamburg.min, 100);
        assert_eq!(hamburg.max, 120);

        let bulawayo = partial.get("Bulawayo").expect("Bulawayo aggregated");
        assert_eq!(*bulawayo, KeyStats::new(89));
    }

    #[test]
    fn final_record_without_trailing_separator_is_parsed() {
        let mut partial = PartialMap::new();
        let tally = scan_chunk(b"Palembang;38.8", &mut partial);
        assert_eq!(tally.parsed, 1);
        assert_eq!(partial.get("Palembang").unwrap().sum, 388);
    }

    #[test]
    fn malformed_records_are_skipped_without_touching_other_keys() {
        let mut partial = PartialMap::new();
        let chunk = b"Hamburg;12.0\n\
            no-separator-here\n\
            ;8.9\n\
            Oslo;\n\
            Oslo;abc\n\
            Oslo;123.4\n\
            Hamburg;10.0\n";
        let tally = scan_chunk(chunk, &mut partial);
        assert_eq!(tally.parsed, 2);
        assert_eq!(tally.skipped, 5);
        assert_eq!(partial.len(), 1);
        assert_eq!(partial.get("Hamburg").unwrap().count, 2);
    }

    #[test]
    fn non_utf8_key_is_skipped() {
        let mut partial = PartialMap::new();
        let tally = scan_chunk(b"\xff\xfe;1.0\nOslo;1.0\n", &mut partial);
        assert_eq!(tally, ChunkTally { parsed: 1, skipped: 1 });
        assert!(partial.contains_key("Oslo"));
    }

    #[test]
    fn parse_record_classifies_failures() {
        let structural: &[&[u8]] = &[b"no-separator", b";1.0", b"Oslo;", b"\xff\xfe;1.0"];
        for line in structural {
            assert!(matches!(
                parse_record(line),
                Err(PipelineError::MalformedRecord { .. })
            ));
        }
        assert!(matches!(
            parse_record(b"Oslo;1000.0"),
            Err(PipelineError::MalformedValue { .. })
        ));
        assert_eq!(parse_record(b"Oslo;-3.5").unwrap(), ("Oslo", -35));
    }

    #[test]
    fn value_with_second_separator_is_malformed() {
        // The split is on the FIRST separator; the remainder must still be a
        // valid bounded-format value.
        let mut partial = PartialMap::new();
        let tally = scan_chunk(b"Oslo;1.0;2.0\n", &mut partial);
        assert_eq!(tally, ChunkTally { parsed: 0, skipped: 1 });
    }
}
