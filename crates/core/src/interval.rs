//! Interval strings ("500ms", "2s", "0") to milliseconds

use crate::error::ConfigError;

/// Parse an interval specification into milliseconds.
///
/// Accepts `<digits><unit>?` where unit is one of `ms`, `msec`, `s`, `sec`.
/// The unit may only be omitted when the value is zero.
pub fn parse_interval_ms(interval: &str) -> Result<u64, ConfigError> {
    parse_field("interval", interval)
}

pub(crate) fn parse_field(field: &str, interval: &str) -> Result<u64, ConfigError> {
    let invalid = |reason| ConfigError::InvalidInterval {
        field: field.to_string(),
        value: interval.to_string(),
        reason,
    };

    let split = interval
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(interval.len());
    let (digits, unit) = interval.split_at(split);
    if digits.is_empty() {
        return Err(invalid("expected <digits><unit>"));
    }

    let multiplier = match unit {
        "" => 0,
        "ms" | "msec" => 1,
        "s" | "sec" => 1000,
        _ => return Err(invalid("unit must be one of ms, msec, s, sec")),
    };

    let value: u64 = digits.parse().map_err(|_| invalid("value is too large"))?;
    if value == 0 {
        return Ok(0);
    }
    if multiplier == 0 {
        return Err(invalid("must specify unit except for '0'"));
    }

    value
        .checked_mul(multiplier)
        .ok_or_else(|| invalid("value is too large"))
}
