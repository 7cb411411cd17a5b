use chrono::{DateTime, NaiveDate, NaiveDateTime};
use num_traits::FromPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parses a string into a Decimal, falling back to an f64 round-trip and
/// finally to ZERO so a single bad row never poisons a whole query.
pub(crate) fn parse_decimal_tolerant(value_str: &str, field_name: &str) -> Decimal {
    match Decimal::from_str(value_str) {
        Ok(d) => d,
        Err(dec_err) => match f64::from_str(value_str) {
            Ok(f_val) => match Decimal::from_f64(f_val) {
                Some(d) => d,
                None => {
                    log::error!(
                        "Failed to convert {} '{}' (parsed as f64: {}) to Decimal.",
                        field_name,
                        value_str,
                        f_val
                    );
                    Decimal::ZERO
                }
            },
            Err(f_err) => {
                log::error!(
                    "Failed to parse {} '{}': as Decimal (err: {}), and as f64 (err: {}). Falling back to ZERO.",
                    field_name,
                    value_str,
                    dec_err,
                    f_err
                );
                Decimal::ZERO
            }
        },
    }
}

/// Parses an ISO 8601/RFC3339 timestamp or a plain YYYY-MM-DD date.
/// Date-only values are pinned to noon UTC.
pub(crate) fn parse_datetime_string(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?.and_hms_opt(12, 0, 0)
}
