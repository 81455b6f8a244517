use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::de::{Error as SerdeError, Unexpected};
use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};
use std::io::{Error, ErrorKind};

pub const MINOR_UNIT_SCALE: u32 = 8;
pub const MINOR_UNITS_PER_COIN: i64 = 100_000_000;

/// Scales a coin amount into minor units, truncating anything past the
/// eighth fractional digit toward zero.
pub fn to_minor_units(amount: Decimal) -> Result<i64, Error> {
    amount
        .checked_mul(Decimal::from(MINOR_UNITS_PER_COIN))
        .and_then(|scaled| scaled.trunc().to_i64())
        .ok_or_else(|| {
            Error::new(
                ErrorKind::InvalidInput,
                format!("Amount {amount} does not fit in minor units"),
            )
        })
}

#[must_use]
pub fn from_minor_units(minor_units: i64) -> Decimal {
    Decimal::new(minor_units, MINOR_UNIT_SCALE)
}

/// Plain JSON number for a decimal that is sent unscaled.
#[must_use]
pub fn decimal_to_json(value: Decimal) -> Value {
    let normalized = value.normalize();
    if normalized.scale() == 0 {
        if let Some(i) = normalized.to_i64() {
            return Value::from(i);
        }
    }
    normalized
        .to_f64()
        .and_then(Number::from_f64)
        .map_or(Value::Null, Value::Number)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn number_to_minor_units<E: SerdeError>(number: &Number) -> Result<i64, E> {
    if let Some(i) = number.as_i64() {
        Ok(i)
    } else if let Some(f) = number.as_f64() {
        let truncated = f.trunc();
        if truncated >= i64::MIN as f64 && truncated < i64::MAX as f64 {
            Ok(truncated as i64)
        } else {
            Err(E::invalid_value(
                Unexpected::Float(f),
                &"an amount in minor units",
            ))
        }
    } else {
        Err(E::custom(format!("Invalid minor unit amount: {number}")))
    }
}

/// Reads an optional minor unit amount, truncating floats toward zero.
pub fn deserialize_optional_minor_units<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Number>::deserialize(deserializer)? {
        Some(number) => number_to_minor_units(&number).map(Some),
        None => Ok(None),
    }
}

#[test]
fn test_minor_unit_round_trip() {
    use std::str::FromStr;
    for s in [
        "0",
        "1",
        "0.5",
        "0.0001",
        "0.00000001",
        "21000000",
        "12.34567891",
        "-3.1",
    ] {
        let amount = Decimal::from_str(s).unwrap();
        let minor = to_minor_units(amount).unwrap();
        assert_eq!(from_minor_units(minor), amount, "round trip of {s}");
    }
}

#[test]
fn test_minor_units_truncate() {
    use std::str::FromStr;
    assert_eq!(
        to_minor_units(Decimal::from_str("1.123456789").unwrap()).unwrap(),
        112_345_678
    );
    assert_eq!(
        to_minor_units(Decimal::from_str("0.999999999").unwrap()).unwrap(),
        99_999_999
    );
    assert_eq!(
        to_minor_units(Decimal::from_str("-1.123456789").unwrap()).unwrap(),
        -112_345_678
    );
    assert_eq!(to_minor_units(Decimal::from_str("0.5").unwrap()).unwrap(), 50_000_000);
    assert_eq!(to_minor_units(Decimal::from_str("0.0001").unwrap()).unwrap(), 10_000);
}

#[test]
fn test_minor_units_overflow() {
    let err = to_minor_units(Decimal::MAX).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[test]
fn test_float_minor_units_bounds() {
    #[derive(Debug, serde::Deserialize)]
    struct Amount {
        #[serde(default, deserialize_with = "deserialize_optional_minor_units")]
        value: Option<i64>,
    }
    let amount: Amount = serde_json::from_str(r#"{"value": 12.9}"#).unwrap();
    assert_eq!(amount.value, Some(12));
    let amount: Amount = serde_json::from_str(r#"{"value": -12.9}"#).unwrap();
    assert_eq!(amount.value, Some(-12));
    let amount: Amount = serde_json::from_str(r#"{"value": null}"#).unwrap();
    assert_eq!(amount.value, None);
    assert!(serde_json::from_str::<Amount>(r#"{"value": 9223372036854775808}"#).is_err());
    assert!(serde_json::from_str::<Amount>(r#"{"value": 9223372036854775808.0}"#).is_err());
    assert!(serde_json::from_str::<Amount>(r#"{"value": 1e300}"#).is_err());
}

#[test]
fn test_decimal_to_json() {
    use std::str::FromStr;
    assert_eq!(decimal_to_json(Decimal::from(2)), serde_json::json!(2));
    assert_eq!(
        decimal_to_json(Decimal::from_str("6.000").unwrap()),
        serde_json::json!(6)
    );
    assert_eq!(
        decimal_to_json(Decimal::from_str("1.5").unwrap()),
        serde_json::json!(1.5)
    );
}
