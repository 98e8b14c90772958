use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use validator::ValidationError;

lazy_static! {
    /// Regex for image references accepted by catalog forms
    /// Either an absolute http(s) URL or a root-relative path without spaces
    /// - Valid: "https://cdn.example.com/a.png", "/img/default/insumo.png"
    /// - Invalid: "insumo.png", "ftp://host/a.png", "/img/con espacio.png"
    pub static ref IMG_URL_REGEX: Regex = Regex::new(r"^(?:https?://[^\s/]+|/)[^\s]*$").unwrap();
}

/// Rejects strings that are empty once trimmed
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required")
            .with_message(Cow::Borrowed("Este campo es obligatorio")));
    }
    Ok(())
}

/// Rejects negative decimals
pub fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::new("range")
            .with_message(Cow::Borrowed("El valor no puede ser negativo")));
    }
    Ok(())
}

/// Rejects decimals that do not fit a `NUMERIC(p, s)` column with
/// `max_int_digits = p - s` and `max_scale = s`
pub fn decimal_fits(
    value: &Decimal,
    max_int_digits: u32,
    max_scale: u32,
) -> Result<(), ValidationError> {
    if value.normalize().scale() > max_scale {
        return Err(ValidationError::new("scale").with_message(Cow::Owned(format!(
            "El valor admite como máximo {} decimales",
            max_scale
        ))));
    }
    if value.trunc().abs() >= Decimal::from(10_i64.pow(max_int_digits)) {
        return Err(ValidationError::new("range").with_message(Cow::Owned(format!(
            "El valor admite como máximo {} dígitos enteros",
            max_int_digits
        ))));
    }
    Ok(())
}

/// Supply quantity: non-negative, fits `NUMERIC(12,3)`
pub fn cantidad_valida(value: &Decimal) -> Result<(), ValidationError> {
    non_negative(value)?;
    decimal_fits(value, 9, 3)
}

/// Price: non-negative, fits `NUMERIC(12,2)`
pub fn precio_valido(value: &Decimal) -> Result<(), ValidationError> {
    non_negative(value)?;
    decimal_fits(value, 10, 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_img_url_regex_valid() {
        assert!(IMG_URL_REGEX.is_match("https://cdn.example.com/a.png"));
        assert!(IMG_URL_REGEX.is_match("http://localhost:3000/img/x.webp"));
        assert!(IMG_URL_REGEX.is_match("/img/default/insumo.png"));
    }

    #[test]
    fn test_img_url_regex_invalid() {
        assert!(!IMG_URL_REGEX.is_match("insumo.png")); // relative
        assert!(!IMG_URL_REGEX.is_match("ftp://host/a.png")); // scheme
        assert!(!IMG_URL_REGEX.is_match("/img/con espacio.png")); // space
        assert!(!IMG_URL_REGEX.is_match("")); // empty
    }

    #[test]
    fn test_not_blank() {
        assert!(not_blank("Harina").is_ok());
        assert!(not_blank("").is_err());
        assert!(not_blank("   ").is_err());
    }

    #[test]
    fn test_non_negative() {
        assert!(non_negative(&Decimal::ZERO).is_ok());
        assert!(non_negative(&Decimal::new(105, 1)).is_ok());
        assert!(non_negative(&Decimal::new(-1, 2)).is_err());
    }

    #[test]
    fn test_decimal_fits_column_size() {
        assert!(decimal_fits(&Decimal::new(999_999_999_999, 3), 9, 3).is_ok());
        assert!(decimal_fits(&Decimal::new(1_500, 3), 10, 2).is_ok()); // 1.500
        assert!(decimal_fits(&Decimal::new(1_005, 3), 10, 2).is_err());
        assert!(decimal_fits(&Decimal::from(10_000_000_000_i64), 9, 3).is_err());
        assert!(decimal_fits(&Decimal::from(-10_000_000_000_i64), 10, 2).is_err());
    }

    #[test]
    fn test_cantidad_and_precio_bounds() {
        assert!(cantidad_valida(&Decimal::new(25, 1)).is_ok());
        assert!(cantidad_valida(&Decimal::from(1_000_000_000)).is_err());
        assert!(precio_valido(&Decimal::new(1_999, 2)).is_ok());
        assert_eq!(
            precio_valido(&Decimal::new(1_005, 3)).unwrap_err().code,
            "scale"
        );
    }
}
