//! Validation schemas shared by the REST handlers and the dashboard forms.
//!
//! Each entity declares one input type. Handlers deserialize request bodies
//! into it, forms edit it in place, and both call [`Schema::parse`] to obtain
//! the normalized record or the list of per-field violations. Keeping a
//! single definition means the client can never accept what the server
//! rejects.

mod categoria;
mod insumo;
mod producto;
mod promocion;
mod usuario;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::shared::types::Estado;

pub use categoria::{CategoriaInput, CategoriaRecord};
pub use insumo::{InsumoInput, InsumoRecord};
pub use producto::{ProductoInput, ProductoRecord};
pub use promocion::{PromocionInput, PromocionRecord};
pub use usuario::{PuntosInput, PuntosRecord};

/// Outcome of validating a candidate input
pub trait Schema: Validate {
    /// Normalized, typed record produced on success
    type Record;

    fn parse(&self) -> Result<Self::Record, Violations>;
}

/// One rejected field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldViolation {
    pub field: String,
    pub code: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Every violation found in one input, ordered by field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct Violations(pub Vec<FieldViolation>);

impl Violations {
    pub fn single(
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self(vec![FieldViolation::new(field, code, message)])
    }

    pub fn push(&mut self, violation: FieldViolation) {
        self.0.push(violation);
        self.0.sort_by(|a, b| a.field.cmp(&b.field));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether any violation targets `field`
    pub fn has(&self, field: &str) -> bool {
        self.0.iter().any(|v| v.field == field)
    }

    /// Messages for one field, as a form would render them under the input
    pub fn messages_for(&self, field: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|v| v.field == field)
            .map(|v| v.message.as_str())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldViolation> {
        self.0.iter()
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.0.iter().map(|v| v.field.as_str()).collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

impl std::error::Error for Violations {}

impl From<ValidationErrors> for Violations {
    fn from(errors: ValidationErrors) -> Self {
        let mut out: Vec<FieldViolation> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                let field = field.to_string();
                errs.iter().map(move |e| {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("El campo {} no es válido", field));
                    FieldViolation::new(field.clone(), e.code.to_string(), message)
                })
            })
            .collect();
        out.sort_by(|a, b| a.field.cmp(&b.field));
        Self(out)
    }
}

/// Runs the declarative rules, returning the collected violations
fn check<T: Validate>(input: &T) -> Violations {
    match input.validate() {
        Ok(()) => Violations::default(),
        Err(errors) => errors.into(),
    }
}

/// Parses a closed-set value, recording a violation when it is unknown.
/// Blank values are left to the field's own `required` rule.
fn parse_enum<T: FromStr>(
    field: &str,
    value: &str,
    violations: &mut Violations,
    message: &str,
) -> Option<T> {
    if value.trim().is_empty() {
        return None;
    }
    match value.trim().parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            violations.push(FieldViolation::new(field, "enum", message));
            None
        }
    }
}

/// Optional `estado` field: absent or blank means `activo`
fn parse_estado(value: Option<&str>, violations: &mut Violations) -> Option<Estado> {
    match value {
        Some(raw) if !raw.trim().is_empty() => {
            parse_enum::<Estado>("estado", raw, violations, "El estado no es válido")
        }
        _ => Some(Estado::Activo),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violations_sorted_by_field() {
        let mut v = Violations::default();
        v.push(FieldViolation::new("nombre", "required", "a"));
        v.push(FieldViolation::new("cantidad", "range", "b"));
        let fields: Vec<&str> = v.iter().map(|x| x.field.as_str()).collect();
        assert_eq!(fields, vec!["cantidad", "nombre"]);
        assert!(v.has("nombre"));
        assert_eq!(v.messages_for("cantidad"), vec!["b"]);
    }

    #[test]
    fn test_violations_serialize_as_list() {
        let v = Violations::single("puntos", "range", "negativo");
        let json = serde_json::to_value(&v).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["field"], "puntos");
    }
}
