//! Serde helpers for the loosely typed backend payloads.
//!
//! The backend is not consistent about JSON types: ids arrive as strings or
//! numbers, money fields sometimes as numeric strings, and an activity
//! location can be a bare string or an object.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// Identifiers that might be strings or numbers, normalized to `String`.
pub mod string_or_number {
    use super::{Deserializer, Visitor, de, fmt};

    /// Deserializes a string from a string or integer.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is neither a string nor a number.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct StringOrNumberVisitor;

        impl Visitor<'_> for StringOrNumberVisitor {
            type Value = String;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or number identifier")
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(value.to_string())
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(value.to_string())
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(value.to_string())
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(value)
            }
        }

        deserializer.deserialize_any(StringOrNumberVisitor)
    }
}

/// Counters and money amounts. Numbers, numeric strings and `null` are
/// accepted; anything unparsable becomes zero.
pub mod lenient_u64 {
    use super::{Deserializer, Visitor, de, fmt};

    /// Deserializes a `u64`, falling back to zero.
    ///
    /// # Errors
    ///
    /// Returns an error only for structurally invalid input (maps, sequences).
    pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct LenientVisitor;

        impl Visitor<'_> for LenientVisitor {
            type Value = u64;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a non-negative amount")
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(value)
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(u64::try_from(value).unwrap_or(0))
            }

            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                if value.is_finite() && value > 0.0 {
                    Ok(value.trunc() as u64)
                } else {
                    Ok(0)
                }
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(super::parse_amount(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(0)
            }

            fn visit_none<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(0)
            }
        }

        deserializer.deserialize_any(LenientVisitor)
    }
}

/// Optional coordinates sent as numbers, numeric strings, empty strings or `null`.
pub mod lenient_f64_option {
    use super::{Deserializer, Visitor, de, fmt};

    /// Deserializes an optional `f64`.
    ///
    /// # Errors
    ///
    /// Returns an error if a string is present but is not a number.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CoordinateVisitor;

        impl<'de> Visitor<'de> for CoordinateVisitor {
            type Value = Option<f64>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an optional coordinate")
            }

            #[allow(clippy::cast_precision_loss)]
            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Some(value as f64))
            }

            #[allow(clippy::cast_precision_loss)]
            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Some(value as f64))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Some(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                trimmed.parse::<f64>().map(Some).map_err(de::Error::custom)
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(None)
            }

            fn visit_none<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(None)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                deserializer.deserialize_any(self)
            }
        }

        deserializer.deserialize_any(CoordinateVisitor)
    }
}

/// Activity locations that are either a bare name or a full object.
pub mod location_or_name {
    use super::{Deserialize, Deserializer};
    use crate::domain::entities::Location;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum LocationRepr {
        Name(String),
        Full(Location),
    }

    /// Deserializes an optional location.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is neither a string, an object nor `null`.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Location>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let repr = Option::<LocationRepr>::deserialize(deserializer)?;
        Ok(repr.map(|repr| match repr {
            LocationRepr::Name(name) => Location::named(name),
            LocationRepr::Full(location) => location,
        }))
    }
}

/// Parses an integer amount the way a form would: leading digits, else zero.
#[must_use]
pub fn parse_amount(value: &str) -> u64 {
    let digits: String = value
        .trim()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().unwrap_or(0)
}
