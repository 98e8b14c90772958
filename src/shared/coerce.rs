//! Lenient deserializers for form values.
//!
//! HTML number inputs submit strings, so numeric fields accept either a JSON
//! number or a string holding one. An empty input arrives as `""` and is read
//! as a missing value so the schema reports it as required.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate};
use rust_decimal::Decimal;
use serde::de::{self, Deserialize, Deserializer, Visitor};

struct LenientI64;

impl<'de> Visitor<'de> for LenientI64 {
    type Value = Option<i64>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer or a string containing an integer")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Some(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        i64::try_from(v)
            .map(Some)
            .map_err(|_| E::custom("integer out of range"))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        if v.fract() == 0.0 && v >= i64::MIN as f64 && v <= i64::MAX as f64 {
            Ok(Some(v as i64))
        } else {
            Err(E::custom("expected a whole number"))
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        trimmed
            .parse::<i64>()
            .map(Some)
            .map_err(|_| E::custom(format!("'{}' is not an integer", v)))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
        d.deserialize_any(LenientI64)
    }
}

/// `Option<i64>` from a number, a numeric string, an empty string or null
pub fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LenientI64)
}

struct LenientDecimal;

impl<'de> Visitor<'de> for LenientDecimal {
    type Value = Option<Decimal>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number or a string containing a number")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Some(Decimal::from(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Some(Decimal::from(v)))
    }

    // Shortest round-trip text of the float, so 1.005 stays 1.005
    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Decimal::from_str(&v.to_string())
            .map(Some)
            .map_err(|_| E::custom(format!("{} is out of range", v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        Decimal::from_str(trimmed)
            .map(Some)
            .map_err(|_| E::custom(format!("'{}' is not a number", v)))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
        d.deserialize_any(LenientDecimal)
    }
}

/// `Option<Decimal>` from a number, a numeric string, an empty string or null
pub fn lenient_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LenientDecimal)
}

/// `Option<NaiveDate>` from `YYYY-MM-DD` or a full RFC 3339 timestamp.
///
/// Date pickers send midnight timestamps; only the calendar date is kept.
pub fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let Some(raw) = raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    if let Ok(date) = NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
        return Ok(Some(date));
    }
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| Some(dt.date_naive()))
        .map_err(|_| de::Error::custom(format!("'{}' is not a valid date", raw)))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Body {
        #[serde(default, deserialize_with = "super::lenient_i64")]
        puntos: Option<i64>,
    }

    fn parse(json: &str) -> Result<Option<i64>, serde_json::Error> {
        serde_json::from_str::<Body>(json).map(|b| b.puntos)
    }

    #[test]
    fn test_accepts_numbers_and_numeric_strings() {
        assert_eq!(parse(r#"{"puntos": 15}"#).unwrap(), Some(15));
        assert_eq!(parse(r#"{"puntos": -5}"#).unwrap(), Some(-5));
        assert_eq!(parse(r#"{"puntos": "42"}"#).unwrap(), Some(42));
        assert_eq!(parse(r#"{"puntos": 7.0}"#).unwrap(), Some(7));
    }

    #[test]
    fn test_empty_values_are_missing() {
        assert_eq!(parse(r#"{}"#).unwrap(), None);
        assert_eq!(parse(r#"{"puntos": null}"#).unwrap(), None);
        assert_eq!(parse(r#"{"puntos": " "}"#).unwrap(), None);
    }

    #[derive(Debug, Deserialize)]
    struct Fechas {
        #[serde(default, deserialize_with = "super::lenient_date")]
        fecha: Option<NaiveDate>,
    }

    #[test]
    fn test_dates_accept_plain_and_timestamp() {
        let plain: Fechas = serde_json::from_str(r#"{"fecha":"2024-05-01"}"#).unwrap();
        let stamp: Fechas =
            serde_json::from_str(r#"{"fecha":"2024-05-01T00:00:00.000Z"}"#).unwrap();
        let expected = NaiveDate::from_ymd_opt(2024, 5, 1);
        assert_eq!(plain.fecha, expected);
        assert_eq!(stamp.fecha, expected);
        let empty: Fechas = serde_json::from_str(r#"{"fecha":""}"#).unwrap();
        assert_eq!(empty.fecha, None);
        assert!(serde_json::from_str::<Fechas>(r#"{"fecha":"mañana"}"#).is_err());
    }

    #[derive(Debug, Deserialize)]
    struct Cantidad {
        #[serde(default, deserialize_with = "super::lenient_decimal")]
        cantidad: Option<Decimal>,
    }

    fn cantidad(json: &str) -> Result<Option<Decimal>, serde_json::Error> {
        serde_json::from_str::<Cantidad>(json).map(|c| c.cantidad)
    }

    #[test]
    fn test_decimals_from_numbers_and_strings() {
        assert_eq!(cantidad(r#"{"cantidad": 3}"#).unwrap(), Some(Decimal::from(3)));
        assert_eq!(cantidad(r#"{"cantidad": 1.005}"#).unwrap(), Some(Decimal::new(1_005, 3)));
        assert_eq!(cantidad(r#"{"cantidad": " 2.5 "}"#).unwrap(), Some(Decimal::new(25, 1)));
        assert_eq!(cantidad(r#"{"cantidad": ""}"#).unwrap(), None);
        assert_eq!(cantidad(r#"{"cantidad": null}"#).unwrap(), None);
        assert_eq!(cantidad(r#"{}"#).unwrap(), None);
        assert!(cantidad(r#"{"cantidad": "dos"}"#).is_err());
        assert!(cantidad(r#"{"cantidad": false}"#).is_err());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse(r#"{"puntos": "diez"}"#).is_err());
        assert!(parse(r#"{"puntos": 1.5}"#).is_err());
        assert!(parse(r#"{"puntos": true}"#).is_err());
    }
}
