//! Utilidades de validación
//!
//! Funciones helper usadas por los `#[validate(custom = ...)]` de los DTOs
//! y por los controladores.

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;
use validator::ValidationError;

lazy_static! {
    /// Matrícula chilena: letras y dígitos, 5 a 8 caracteres sin separadores
    static ref PLATE_RE: Regex = Regex::new(r"^[A-Z0-9]{5,8}$").unwrap();
    /// RUT con o sin puntos: 76.123.456-K
    static ref RUT_RE: Regex = Regex::new(r"^\d{1,2}\.?\d{3}\.?\d{3}-[\dkK]$").unwrap();
}

/// Máximo representable por NUMERIC(10, 2)
const MAX_NUMERIC_10_2: i64 = 100_000_000;

/// Normalizar una matrícula: mayúsculas, sin espacios ni guiones
pub fn normalize_plate(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_' | '.'))
        .collect::<String>()
        .to_uppercase()
}

/// Validar formato de matrícula de camión
pub fn validate_plate(value: &str) -> Result<(), ValidationError> {
    if !PLATE_RE.is_match(&normalize_plate(value)) {
        let mut error = ValidationError::new("plate");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar formato de RUT de empresa
pub fn validate_tax_id(value: &str) -> Result<(), ValidationError> {
    if !RUT_RE.is_match(value.trim()) {
        let mut error = ValidationError::new("tax_id");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"12.345.678-9".to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar formato de teléfono (básico)
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let clean_phone = value.chars().filter(|c| c.is_ascii_digit()).collect::<String>();
    if clean_phone.len() < 8 || clean_phone.len() > 15 {
        let mut error = ValidationError::new("phone");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar un monto NUMERIC(10, 2): no negativo, dos decimales como máximo
pub fn validate_money(value: &Decimal) -> Result<(), ValidationError> {
    validate_non_negative(*value)?;
    validate_numeric_10_2(value)
}

/// Validar una medida (peso, volumen): positiva y NUMERIC(10, 2)
pub fn validate_measure(value: &Decimal) -> Result<(), ValidationError> {
    validate_positive(*value)?;
    validate_numeric_10_2(value)
}

fn validate_numeric_10_2(value: &Decimal) -> Result<(), ValidationError> {
    if value.normalize().scale() > 2 || value.abs() >= Decimal::from(MAX_NUMERIC_10_2) {
        let mut error = ValidationError::new("numeric_10_2");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea positivo
pub fn validate_positive<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value <= T::zero() {
        let mut error = ValidationError::new("positive");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea no negativo
pub fn validate_non_negative<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value < T::zero() {
        let mut error = ValidationError::new("non_negative");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar que un string no esté vacío
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_validate_plate() {
        assert!(validate_plate("BCDF12").is_ok());
        assert!(validate_plate("bc-df 12").is_ok());
        assert!(validate_plate("A1").is_err());
        assert!(validate_plate("ABCDEFGHIJK").is_err());
        assert!(validate_plate("AB#123").is_err());
    }

    #[test]
    fn test_normalize_plate() {
        assert_eq!(normalize_plate("bc-df 12"), "BCDF12");
    }

    #[test]
    fn test_validate_tax_id() {
        assert!(validate_tax_id("76.123.456-K").is_ok());
        assert!(validate_tax_id("76123456-7").is_ok());
        assert!(validate_tax_id("76.123.456").is_err());
        assert!(validate_tax_id("abc").is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("+56912345678").is_ok());
        assert!(validate_phone("123").is_err());
        assert!(validate_phone("1234567890123456").is_err());
    }

    #[test]
    fn test_validate_money() {
        assert!(validate_money(&Decimal::from_str("1500000.00").unwrap()).is_ok());
        assert!(validate_money(&Decimal::ZERO).is_ok());
        assert!(validate_money(&Decimal::from_str("-1").unwrap()).is_err());
        assert!(validate_money(&Decimal::from_str("10.005").unwrap()).is_err());
        assert!(validate_money(&Decimal::from_str("100000000").unwrap()).is_err());
    }

    #[test]
    fn test_validate_measure() {
        assert!(validate_measure(&Decimal::from_str("25000.50").unwrap()).is_ok());
        assert!(validate_measure(&Decimal::ZERO).is_err());
        assert!(validate_measure(&Decimal::from_str("1.10").unwrap()).is_ok());
    }

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive(5).is_ok());
        assert!(validate_positive(0).is_err());
        assert!(validate_positive(-5).is_err());
    }
}
