//! Fixed-point decimal types for monetary and percentage fields.
//!
//! Uses scaled-integer representation to avoid the floating-point rounding
//! drift that plagues monetary calculations. [`Price`] carries two decimal
//! places (minor currency units), [`Percent`] carries one (tenths of a
//! percent). Both serialize as decimal strings, e.g. `"12.34"` and `"9.9"`.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// Errors from parsing or validating a decimal literal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecimalError {
    /// The text is not a plain decimal number.
    #[error("invalid decimal literal: {0}")]
    Invalid(String),

    /// More fractional digits than the field allows.
    #[error("no more than {places} decimal place(s) allowed: {value}")]
    TooManyPlaces { value: String, places: u32 },

    /// More digits in total than the field allows.
    #[error("no more than {digits} digit(s) allowed: {value}")]
    TooManyDigits { value: String, digits: u32 },
}

/// Parse a decimal literal into an integer scaled by `10^places`.
///
/// Accepts an optional sign, digits, and at most `places` fractional digits.
/// Exponents and any other notation are rejected; no float math is involved.
fn parse_scaled(text: &str, places: u32) -> Result<i64, DecimalError> {
    let trimmed = text.trim();
    let invalid = || DecimalError::Invalid(text.to_string());

    let (negative, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let (int_part, frac_part) = match body.split_once('.') {
        Some((i, f)) => (i, f),
        None => (body, ""),
    };

    if int_part.is_empty() && frac_part.is_empty() {
        return Err(invalid());
    }
    if !int_part.bytes().all(|b| b.is_ascii_digit()) || !frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid());
    }
    if frac_part.len() as u32 > places {
        return Err(DecimalError::TooManyPlaces {
            value: text.to_string(),
            places,
        });
    }

    let int_value: i64 = if int_part.is_empty() {
        0
    } else {
        int_part.parse().map_err(|_| invalid())?
    };
    let frac_value: i64 = if frac_part.is_empty() {
        0
    } else {
        frac_part.parse().map_err(|_| invalid())?
    };
    let frac_value = frac_value * 10_i64.pow(places - frac_part.len() as u32);

    let scaled = int_value
        .checked_mul(10_i64.pow(places))
        .and_then(|v| v.checked_add(frac_value))
        .ok_or_else(invalid)?;

    Ok(if negative { -scaled } else { scaled })
}

/// Count the decimal digits of the scaled magnitude.
///
/// This matches how digit budgets are declared on decimal fields: `9.9`
/// scaled by ten is 99, two digits; `123.45` scaled by a hundred is 12345,
/// five digits.
fn digit_count(scaled: i64) -> u32 {
    let mut n = scaled.unsigned_abs();
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}

/// Check a decimal literal against a digit budget without constructing a
/// value. Used by payload screening for fields declared `decimal(d, p)`.
pub fn validate_decimal(text: &str, max_digits: u32, decimal_places: u32) -> Result<(), DecimalError> {
    let scaled = parse_scaled(text, decimal_places)?;
    if digit_count(scaled) > max_digits {
        return Err(DecimalError::TooManyDigits {
            value: text.to_string(),
            digits: max_digits,
        });
    }
    Ok(())
}

macro_rules! define_fixed {
    ($name:ident, $places:expr, $doc_unit:literal) => {
        impl $name {
            /// Number of decimal places carried by this type.
            pub const DECIMAL_PLACES: u32 = $places;

            const SCALE: i64 = 10_i64.pow($places);

            #[doc = concat!("Build a value from ", $doc_unit, ".")]
            pub fn from_scaled(scaled: i64) -> Self {
                Self(scaled)
            }

            #[doc = concat!("Get the raw value in ", $doc_unit, ".")]
            pub fn scaled(&self) -> i64 {
                self.0
            }

            /// The zero value.
            pub fn zero() -> Self {
                Self(0)
            }

            /// Whether the value is exactly zero.
            pub fn is_zero(&self) -> bool {
                self.0 == 0
            }

            /// Parse a decimal literal, e.g. `"12.34"`.
            pub fn parse(text: &str) -> Result<Self, DecimalError> {
                parse_scaled(text, Self::DECIMAL_PLACES).map(Self)
            }

            /// Number of digits the value occupies, fractional part included.
            pub fn digit_count(&self) -> u32 {
                digit_count(self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let magnitude = self.0.unsigned_abs();
                let scale = Self::SCALE as u64;
                let sign = if self.0 < 0 { "-" } else { "" };
                write!(
                    f,
                    "{}{}.{:0width$}",
                    sign,
                    magnitude / scale,
                    magnitude % scale,
                    width = Self::DECIMAL_PLACES as usize
                )
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                struct FixedVisitor;

                impl<'de> Visitor<'de> for FixedVisitor {
                    type Value = $name;

                    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                        write!(f, "a decimal string or number")
                    }

                    fn visit_str<E: de::Error>(self, v: &str) -> Result<$name, E> {
                        $name::parse(v).map_err(E::custom)
                    }

                    fn visit_i64<E: de::Error>(self, v: i64) -> Result<$name, E> {
                        $name::parse(&v.to_string()).map_err(E::custom)
                    }

                    fn visit_u64<E: de::Error>(self, v: u64) -> Result<$name, E> {
                        $name::parse(&v.to_string()).map_err(E::custom)
                    }

                    fn visit_f64<E: de::Error>(self, v: f64) -> Result<$name, E> {
                        // Shortest round-trip text of the number, parsed as a
                        // decimal literal; no float arithmetic happens here.
                        $name::parse(&v.to_string()).map_err(E::custom)
                    }
                }

                deserializer.deserialize_any(FixedVisitor)
            }
        }
    };
}

/// A fixed-point amount in whole and minor currency units (two decimal
/// places), e.g. the unit price of a cart line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(i64);

define_fixed!(Price, 2, "minor units (hundredths)");

/// A fixed-point percentage in tenths, e.g. a promotional discount rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Percent(i64);

define_fixed!(Percent, 1, "tenths of a percent");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_parse() {
        assert_eq!(Price::parse("12.34").unwrap(), Price::from_scaled(1234));
        assert_eq!(Price::parse("12").unwrap(), Price::from_scaled(1200));
        assert_eq!(Price::parse("12.5").unwrap(), Price::from_scaled(1250));
        assert_eq!(Price::parse("0.05").unwrap(), Price::from_scaled(5));
        assert_eq!(Price::parse("-3.99").unwrap(), Price::from_scaled(-399));
        assert_eq!(Price::parse(".5").unwrap(), Price::from_scaled(50));
    }

    #[test]
    fn test_price_rejects_garbage() {
        assert!(matches!(Price::parse("abc"), Err(DecimalError::Invalid(_))));
        assert!(matches!(Price::parse(""), Err(DecimalError::Invalid(_))));
        assert!(matches!(Price::parse("."), Err(DecimalError::Invalid(_))));
        assert!(matches!(Price::parse("1e3"), Err(DecimalError::Invalid(_))));
    }

    #[test]
    fn test_price_rejects_extra_places() {
        assert!(matches!(
            Price::parse("1.234"),
            Err(DecimalError::TooManyPlaces { places: 2, .. })
        ));
    }

    #[test]
    fn test_price_display_pads() {
        assert_eq!(Price::from_scaled(1234).to_string(), "12.34");
        assert_eq!(Price::from_scaled(1200).to_string(), "12.00");
        assert_eq!(Price::from_scaled(5).to_string(), "0.05");
        assert_eq!(Price::from_scaled(-399).to_string(), "-3.99");
        assert_eq!(Price::zero().to_string(), "0.00");
    }

    #[test]
    fn test_percent_parse_and_display() {
        assert_eq!(Percent::parse("9.9").unwrap(), Percent::from_scaled(99));
        assert_eq!(Percent::parse("5").unwrap(), Percent::from_scaled(50));
        assert_eq!(Percent::from_scaled(99).to_string(), "9.9");
        assert_eq!(Percent::zero().to_string(), "0.0");
    }

    #[test]
    fn test_digit_count() {
        assert_eq!(Price::parse("12.34").unwrap().digit_count(), 4);
        assert_eq!(Price::parse("0.50").unwrap().digit_count(), 2);
        assert_eq!(Percent::parse("9.9").unwrap().digit_count(), 2);
        assert_eq!(Percent::parse("10.0").unwrap().digit_count(), 3);
        assert_eq!(Price::zero().digit_count(), 1);
    }

    #[test]
    fn test_validate_decimal_budget() {
        assert!(validate_decimal("9.9", 2, 1).is_ok());
        assert!(matches!(
            validate_decimal("10.0", 2, 1),
            Err(DecimalError::TooManyDigits { digits: 2, .. })
        ));
        assert!(validate_decimal("99999999.99", 10, 2).is_ok());
        assert!(matches!(
            validate_decimal("100000000.00", 10, 2),
            Err(DecimalError::TooManyDigits { .. })
        ));
    }

    #[test]
    fn test_serde_string_form() {
        let price = Price::parse("49.99").unwrap();
        let json = serde_json::to_value(price).unwrap();
        assert_eq!(json, serde_json::json!("49.99"));

        let back: Price = serde_json::from_value(json).unwrap();
        assert_eq!(back, price);
    }

    #[test]
    fn test_serde_accepts_numbers() {
        let from_int: Price = serde_json::from_value(serde_json::json!(12)).unwrap();
        assert_eq!(from_int, Price::parse("12.00").unwrap());

        let from_float: Percent = serde_json::from_value(serde_json::json!(2.5)).unwrap();
        assert_eq!(from_float, Percent::parse("2.5").unwrap());
    }
}
