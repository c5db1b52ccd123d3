//! Decimal helpers shared by the calculator, return generator and exporter

use bigdecimal::{BigDecimal, RoundingMode, ToPrimitive};
use std::str::FromStr;

/// Round a monetary value to 2 decimal places, half away from zero
pub fn round_half_up(value: &BigDecimal) -> BigDecimal {
    value.with_scale_round(2, RoundingMode::HalfUp)
}

/// `base * rate / 100`, unrounded
pub fn percent_of(base: &BigDecimal, rate: &BigDecimal) -> BigDecimal {
    (base * rate) / BigDecimal::from(100)
}

/// Build a percentage from an integer count of hundredths (1800 => 18.00)
pub fn from_hundredths(hundredths: u32) -> BigDecimal {
    BigDecimal::from(hundredths) / BigDecimal::from(100)
}

/// Whether two values differ by at most 0.01
pub fn within_paisa(a: &BigDecimal, b: &BigDecimal) -> bool {
    let tolerance = BigDecimal::from(1) / BigDecimal::from(100);
    (a - b).abs() <= tolerance
}

/// Serde adapter writing a `BigDecimal` as a plain JSON number.
///
/// The GST portal schema expects numeric amounts, while the `serde` feature of
/// `bigdecimal` writes strings. Reading accepts numbers and numeric strings.
pub mod json_number {
    use super::*;
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S>(value: &BigDecimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let number = value
            .to_f64()
            .ok_or_else(|| serde::ser::Error::custom(format!("{value} is not representable")))?;
        serializer.serialize_f64(number)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BigDecimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(DecimalVisitor)
    }

    struct DecimalVisitor;

    impl<'de> Visitor<'de> for DecimalVisitor {
        type Value = BigDecimal;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a decimal number")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(BigDecimal::from(v))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(BigDecimal::from(v))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            // Display gives the shortest round-tripping form, so 0.1 stays 0.1
            BigDecimal::from_str(&v.to_string()).map_err(E::custom)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            BigDecimal::from_str(v.trim()).map_err(E::custom)
        }
    }

    /// Same as the parent module for `Option<BigDecimal>` fields
    pub mod option {
        use super::*;
        use serde::Deserialize;

        pub fn serialize<S>(value: &Option<BigDecimal>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match value {
                Some(v) => super::serialize(v, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<BigDecimal>, D::Error>
        where
            D: Deserializer<'de>,
        {
            #[derive(Deserialize)]
            struct Wrapper(#[serde(with = "super")] BigDecimal);

            Ok(Option::<Wrapper>::deserialize(deserializer)?.map(|Wrapper(v)| v))
        }
    }
}
