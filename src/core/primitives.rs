//! Lenient scalar coercion used when records are loaded.
//!
//! Every helper maps malformed input to `None` instead of failing, so one bad
//! field only drops out of the computations that need it.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::Deserializer;
use serde::de::{self, Visitor};

use super::geography::StateCode;
use super::types::ReviewScore;

const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
];

#[must_use]
pub fn decimal_to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

/// Parses a currency amount; non-finite or non-numeric input yields `None`.
#[must_use]
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    Decimal::from_str(raw)
        .ok()
        .or_else(|| raw.parse::<f64>().ok().and_then(decimal_from_f64))
}

#[must_use]
pub fn decimal_from_f64(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    Decimal::from_f64(value)
}

/// Parses the timestamp shapes found in exported order data.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Some(with_offset.naive_utc());
    }
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Review scores are valid only inside `1..=5`; sentinels and junk are absent.
#[must_use]
pub fn review_from_f64(value: f64) -> Option<ReviewScore> {
    if !value.is_finite() || value.fract() != 0.0 {
        return None;
    }
    ReviewScore::new(value as i64)
}

#[must_use]
pub fn parse_review(raw: &str) -> Option<ReviewScore> {
    raw.trim().parse::<f64>().ok().and_then(review_from_f64)
}

/// Accepts any scalar and reports it through one of the `on_*` callbacks.
struct LenientVisitor<T> {
    expecting: &'static str,
    on_str: fn(&str) -> Option<T>,
    on_f64: fn(f64) -> Option<T>,
}

impl<'de, T> Visitor<'de> for LenientVisitor<T> {
    type Value = Option<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.expecting)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok((self.on_str)(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok((self.on_f64)(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok((self.on_f64)(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok((self.on_f64)(v as f64))
    }

    fn visit_bool<E: de::Error>(self, _v: bool) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }
}

pub(crate) fn lenient_decimal<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Decimal>, D::Error> {
    deserializer.deserialize_any(LenientVisitor {
        expecting: "a currency amount",
        on_str: parse_decimal,
        on_f64: decimal_from_f64,
    })
}

pub(crate) fn lenient_review<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<ReviewScore>, D::Error> {
    deserializer.deserialize_any(LenientVisitor {
        expecting: "a review score",
        on_str: parse_review,
        on_f64: review_from_f64,
    })
}

pub(crate) fn lenient_timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<NaiveDateTime>, D::Error> {
    deserializer.deserialize_any(LenientVisitor {
        expecting: "a timestamp string",
        on_str: parse_timestamp,
        on_f64: |_| None,
    })
}

pub(crate) fn lenient_state<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<StateCode>, D::Error> {
    deserializer.deserialize_any(LenientVisitor {
        expecting: "a two-letter state code",
        on_str: StateCode::from_code,
        on_f64: |_| None,
    })
}

pub(crate) fn lenient_label<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    deserializer.deserialize_any(LenientVisitor {
        expecting: "an identifier",
        on_str: |raw| {
            let raw = raw.trim();
            (!raw.is_empty()).then(|| raw.to_owned())
        },
        on_f64: |value| {
            if !value.is_finite() {
                None
            } else if value.fract() == 0.0 {
                Some(format!("{}", value as i64))
            } else {
                Some(value.to_string())
            }
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_parsing_accepts_numeric_strings_only() {
        assert_eq!(parse_decimal("129.90"), Some(Decimal::new(12990, 2)));
        assert_eq!(parse_decimal(" 1e2 "), Some(Decimal::new(100, 0)));
        assert_eq!(parse_decimal("n/a"), None);
        assert_eq!(parse_decimal(""), None);
        assert_eq!(decimal_from_f64(f64::NAN), None);
    }

    #[test]
    fn timestamp_parsing_covers_export_shapes() {
        let expected = NaiveDate::from_ymd_opt(2017, 10, 2)
            .and_then(|d| d.and_hms_opt(10, 56, 33))
            .expect("valid date");
        assert_eq!(parse_timestamp("2017-10-02 10:56:33"), Some(expected));
        assert_eq!(parse_timestamp("2017-10-02T10:56:33"), Some(expected));
        assert_eq!(parse_timestamp("2017-10-02T10:56:33Z"), Some(expected));
        assert!(parse_timestamp("2017-10-02").is_some());
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn review_coercion_drops_sentinels_and_out_of_range() {
        assert_eq!(review_from_f64(4.0).map(ReviewScore::get), Some(4));
        assert_eq!(review_from_f64(-1.0), None);
        assert_eq!(review_from_f64(0.0), None);
        assert_eq!(review_from_f64(6.0), None);
        assert_eq!(review_from_f64(3.5), None);
        assert_eq!(parse_review("5").map(ReviewScore::get), Some(5));
        assert_eq!(parse_review("five"), None);
    }
}
