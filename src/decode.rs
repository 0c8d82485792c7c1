use crate::errors::PipelineError;
use crate::types::Tenths;

/// ASCII `'0'` widened for offset arithmetic on digit bytes.
const ASCII_ZERO: Tenths = b'0' as Tenths;

/// Decode a bounded-format decimal value into a signed number of tenths.
///
/// Accepts exactly `-?D{1,2}.D` (one or two integer digits, one fractional
/// digit, optional leading sign): `"3.5"` -> `35`, `"-12.3"` -> `-123`.
/// The accept path is pure byte arithmetic with no allocation; any input
/// outside the bounded format fails with [`PipelineError::MalformedValue`].
pub fn decode_tenths(text: &[u8]) -> Result<Tenths, PipelineError> {
    let (digits, negative) = match text.split_first() {
        Some((b'-', rest)) => (rest, true),
        _ => (text, false),
    };
    let magnitude = match digits {
        [d0, b'.', d1] if d0.is_ascii_digit() && d1.is_ascii_digit() => {
            Tenths::from(*d0) * 10 + Tenths::from(*d1) - ASCII_ZERO * 11
        }
        [d0, d1, b'.', d2]
            if d0.is_ascii_digit() && d1.is_ascii_digit() && d2.is_ascii_digit() =>
        {
            Tenths::from(*d0) * 100 + Tenths::from(*d1) * 10 + Tenths::from(*d2)
                - ASCII_ZERO * 111
        }
        _ => {
            return Err(PipelineError::MalformedValue {
                text: String::from_utf8_lossy(text).into_owned(),
            });
        }
    };
    Ok(if negative { -magnitude } else { magnitude })
}
