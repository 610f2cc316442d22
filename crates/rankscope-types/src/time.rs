use crate::{Error, Result};
use regex::Regex;
use std::sync::LazyLock;

/// Microseconds since the trace-local zero point.
pub type Timestamp = u64;

const MICROS_PER_SECOND: u64 = 1_000_000;

/// `H:MM:SS.ffffff` with unbounded hours and up to six fractional digits.
static STAMP_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+):(\d{1,2}):(\d{1,2})\.(\d{1,6})$").unwrap());

/// Parse a textual stamp into microseconds.
///
/// `micros = ffffff + 1_000_000 * (seconds + 60 * (minutes + 60 * hours))`.
/// The fraction is read as a decimal fraction of a second, so `1.5` and
/// `1.500000` are the same instant.
pub fn parse_timestamp(stamp: &str) -> Result<Timestamp> {
    let malformed = || Error::MalformedTimestamp {
        stamp: stamp.to_string(),
    };

    let caps = STAMP_REGEX.captures(stamp).ok_or_else(malformed)?;

    let field = |i: usize| -> Result<u64> { caps[i].parse::<u64>().map_err(|_| malformed()) };
    let hours = field(1)?;
    let minutes = field(2)?;
    let seconds = field(3)?;

    let fraction = &caps[4];
    let micros = fraction.parse::<u64>().map_err(|_| malformed())?
        * 10u64.pow(6 - fraction.len() as u32);

    hours
        .checked_mul(60)
        .and_then(|m| m.checked_add(minutes))
        .and_then(|m| m.checked_mul(60))
        .and_then(|s| s.checked_add(seconds))
        .and_then(|s| s.checked_mul(MICROS_PER_SECOND))
        .and_then(|us| us.checked_add(micros))
        .ok_or_else(malformed)
}

/// Format microseconds as `HH:MM:SS.ffffff` (hours grow past two digits as needed).
pub fn format_timestamp(time: Timestamp) -> String {
    let micros = time % MICROS_PER_SECOND;
    let total_seconds = time / MICROS_PER_SECOND;
    format!(
        "{:02}:{:02}:{:02}.{:06}",
        total_seconds / 3600,
        (total_seconds / 60) % 60,
        total_seconds % 60,
        micros
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp_components() {
        assert_eq!(parse_timestamp("01:02:03.004005"), Ok(3_723_004_005));
        assert_eq!(parse_timestamp("00:00:00.000000"), Ok(0));
        assert_eq!(parse_timestamp("00:00:01.500000"), Ok(1_500_000));
    }

    #[test]
    fn test_parse_timestamp_unbounded_hours() {
        assert_eq!(parse_timestamp("123:00:00.000001"), Ok(123 * 3600 * 1_000_000 + 1));
        assert_eq!(parse_timestamp("7:05:09.000000"), Ok((7 * 3600 + 5 * 60 + 9) * 1_000_000));
    }

    #[test]
    fn test_parse_timestamp_short_fraction() {
        assert_eq!(parse_timestamp("00:00:01.5"), Ok(1_500_000));
        assert_eq!(parse_timestamp("00:00:00.000123"), Ok(123));
    }

    #[test]
    fn test_parse_timestamp_rejects_malformed() {
        for stamp in [
            "",
            "00:00:01",
            "00:01.000000",
            "aa:00:00.000000",
            "00:00:00.0000001",
            "-1:00:00.000000",
            "00:00:00.000000 ",
            "99999999999999999999:00:00.000000",
        ] {
            assert_eq!(
                parse_timestamp(stamp),
                Err(Error::MalformedTimestamp {
                    stamp: stamp.to_string()
                }),
                "stamp {:?} should be rejected",
                stamp
            );
        }
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0), "00:00:00.000000");
        assert_eq!(format_timestamp(3_723_004_005), "01:02:03.004005");
        assert_eq!(format_timestamp(100 * 3600 * 1_000_000), "100:00:00.000000");
    }

    #[test]
    fn test_format_then_parse_is_identity() {
        for t in [0, 1, 999_999, 1_000_000, 3_723_004_005, 86_400_000_000] {
            assert_eq!(parse_timestamp(&format_timestamp(t)), Ok(t));
        }
    }
}
