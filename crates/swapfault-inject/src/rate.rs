//! The textual fault-rate configuration boundary.
//!
//! The surrounding system configures the rate as decimal-integer text (a
//! control file or management RPC owns the transport); this module owns
//! only the parse/validate/render steps.  Rendered text round-trips
//! through [`parse`].

use crate::error::InjectError;

/// Mean accesses between faults when nothing has been configured yet.
pub const DEFAULT_FAULT_RATE: u64 = 1_000_000_000;

/// Largest accepted rate.  Countdowns live in an `i64` and resample draws
/// span `[1, 2*rate]`, so `2*rate` must stay below `i64::MAX`.
pub const MAX_FAULT_RATE: u64 = (i64::MAX as u64) / 2;

/// Parse a fault rate from its textual form.
///
/// Accepts an unsigned decimal integer with surrounding whitespace.
/// Rejects unparseable text, zero, and rates above [`MAX_FAULT_RATE`]
/// without any side effect.
pub fn parse(text: &str) -> Result<u64, InjectError> {
    let rate = text
        .trim()
        .parse::<u64>()
        .map_err(|_| InjectError::InvalidRateText {
            text: text.to_owned(),
        })?;
    validate(rate)
}

/// Check a numeric rate against the accepted range.
pub fn validate(rate: u64) -> Result<u64, InjectError> {
    if rate == 0 {
        return Err(InjectError::ZeroRate);
    }
    if rate > MAX_FAULT_RATE {
        return Err(InjectError::RateOutOfRange {
            rate,
            max: MAX_FAULT_RATE,
        });
    }
    Ok(rate)
}

/// Render a rate as the decimal text the reporting surface exposes.
pub fn render(rate: u64) -> String {
    rate.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_decimal() {
        assert_eq!(parse("10"), Ok(10));
        assert_eq!(parse("1000000000"), Ok(1_000_000_000));
    }

    #[test]
    fn parses_with_surrounding_whitespace() {
        assert_eq!(parse(" 42 "), Ok(42));
        assert_eq!(parse("100\n"), Ok(100));
    }

    #[test]
    fn rejects_garbage_text() {
        assert!(matches!(
            parse("fast"),
            Err(InjectError::InvalidRateText { .. })
        ));
        assert!(matches!(parse(""), Err(InjectError::InvalidRateText { .. })));
        assert!(matches!(
            parse("-5"),
            Err(InjectError::InvalidRateText { .. })
        ));
        assert!(matches!(
            parse("10x"),
            Err(InjectError::InvalidRateText { .. })
        ));
    }

    #[test]
    fn rejects_u64_overflow() {
        // One past u64::MAX.
        assert!(matches!(
            parse("18446744073709551616"),
            Err(InjectError::InvalidRateText { .. })
        ));
    }

    #[test]
    fn rejects_zero() {
        assert_eq!(parse("0"), Err(InjectError::ZeroRate));
        assert_eq!(validate(0), Err(InjectError::ZeroRate));
    }

    #[test]
    fn rejects_out_of_range() {
        let too_big = MAX_FAULT_RATE + 1;
        assert_eq!(
            validate(too_big),
            Err(InjectError::RateOutOfRange {
                rate: too_big,
                max: MAX_FAULT_RATE,
            })
        );
        assert_eq!(validate(MAX_FAULT_RATE), Ok(MAX_FAULT_RATE));
    }

    #[test]
    fn render_round_trips() {
        for rate in [1, 10, DEFAULT_FAULT_RATE, MAX_FAULT_RATE] {
            assert_eq!(parse(&render(rate)), Ok(rate));
        }
    }
}
