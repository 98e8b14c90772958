use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use super::{check, Schema, Violations};

/// Body of `PUT /api/usuario/puntos/{id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct PuntosInput {
    /// New balance; overwrites the previous one
    #[serde(default, deserialize_with = "crate::shared::coerce::lenient_i64")]
    #[validate(
        required(message = "Los puntos son obligatorios"),
        custom(function = "puntos_en_rango")
    )]
    #[schema(value_type = Option<i64>, example = 150)]
    pub puntos: Option<i64>,
}

fn puntos_en_rango(value: i64) -> Result<(), ValidationError> {
    if value < 0 {
        return Err(ValidationError::new("range")
            .with_message(Cow::Borrowed("Los puntos no pueden ser negativos")));
    }
    if value > i64::from(i32::MAX) {
        return Err(ValidationError::new("range").with_message(Cow::Owned(format!(
            "Los puntos no pueden superar {}",
            i32::MAX
        ))));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PuntosRecord {
    pub puntos: i32,
}

impl Schema for PuntosInput {
    type Record = PuntosRecord;

    fn parse(&self) -> Result<PuntosRecord, Violations> {
        let violations = check(self);
        match (violations.is_empty(), self.puntos.map(i32::try_from)) {
            (true, Some(Ok(puntos))) => Ok(PuntosRecord { puntos }),
            _ => Err(violations),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_points_rejected() {
        let violations = PuntosInput { puntos: Some(-5) }.parse().unwrap_err();
        assert!(violations.has("puntos"));
    }

    #[test]
    fn test_points_bounds_have_distinct_messages() {
        let low = PuntosInput { puntos: Some(-1) }.parse().unwrap_err();
        assert_eq!(low.messages_for("puntos"), vec!["Los puntos no pueden ser negativos"]);

        let high = PuntosInput {
            puntos: Some(i64::from(i32::MAX) + 1),
        }
        .parse()
        .unwrap_err();
        assert_eq!(high.messages_for("puntos"), vec!["Los puntos no pueden superar 2147483647"]);

        let max = PuntosInput {
            puntos: Some(i64::from(i32::MAX)),
        };
        assert_eq!(max.parse().unwrap().puntos, i32::MAX);
    }

    #[test]
    fn test_missing_points_rejected() {
        assert!(PuntosInput::default().parse().unwrap_err().has("puntos"));
    }

    #[test]
    fn test_points_from_string() {
        let input: PuntosInput = serde_json::from_str(r#"{"puntos":"120"}"#).unwrap();
        assert_eq!(input.parse().unwrap(), PuntosRecord { puntos: 120 });
    }
}
