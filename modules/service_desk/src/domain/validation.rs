//! Input validation and normalization for service desk records

use crate::contract::ServiceDeskError;
use rust_decimal::Decimal;
use serde_json::Value;

const MAX_NATIONAL_ID_LEN: usize = 20;

/// Trim a required text field, rejecting blanks
pub fn required(field: &str, value: &str) -> Result<String, ServiceDeskError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceDeskError::validation(format!(
            "{} cannot be empty",
            field
        )));
    }
    Ok(trimmed.to_string())
}

/// Trim an optional text field; blank becomes `None`
pub fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Validate a national identity document number
///
/// Accepts digits, ASCII letters and '-', e.g. "V-12345678" or "1712345678".
pub fn validate_national_id(national_id: &str) -> Result<String, ServiceDeskError> {
    let national_id = required("national_id", national_id)?;

    if national_id.len() > MAX_NATIONAL_ID_LEN {
        return Err(ServiceDeskError::validation(format!(
            "national_id '{}' exceeds {} characters",
            national_id, MAX_NATIONAL_ID_LEN
        )));
    }

    if !national_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-')
    {
        return Err(ServiceDeskError::validation(format!(
            "national_id '{}' contains invalid characters. Only letters, digits and '-' are allowed",
            national_id
        )));
    }

    if !national_id.chars().any(|c| c.is_ascii_digit()) {
        return Err(ServiceDeskError::validation(format!(
            "national_id '{}' must contain at least one digit",
            national_id
        )));
    }

    Ok(national_id.to_ascii_uppercase())
}

/// Loose e-mail sanity check
pub fn validate_email(email: Option<String>) -> Result<Option<String>, ServiceDeskError> {
    let Some(email) = optional(email) else {
        return Ok(None);
    };

    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => {
            Ok(Some(email.to_lowercase()))
        }
        _ => Err(ServiceDeskError::validation(format!(
            "email '{}' is not a valid address",
            email
        ))),
    }
}

/// Money amounts are never negative
pub fn non_negative_amount(field: &str, amount: Decimal) -> Result<Decimal, ServiceDeskError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(ServiceDeskError::validation(format!(
            "{} cannot be negative",
            field
        )));
    }
    Ok(amount)
}

pub fn non_negative_count(field: &str, count: i32) -> Result<i32, ServiceDeskError> {
    if count < 0 {
        return Err(ServiceDeskError::validation(format!(
            "{} cannot be negative",
            field
        )));
    }
    Ok(count)
}

/// Commission is a percentage in 0..=100
pub fn validate_commission_rate(rate: Decimal) -> Result<Decimal, ServiceDeskError> {
    if rate < Decimal::ZERO || rate > Decimal::ONE_HUNDRED {
        return Err(ServiceDeskError::validation(format!(
            "commission_rate {} must be between 0 and 100",
            rate
        )));
    }
    Ok(rate)
}

/// Equipment specs must be a JSON object; absent specs become `{}`
pub fn validate_specs(specs: Option<Value>) -> Result<Value, ServiceDeskError> {
    match specs {
        None | Some(Value::Null) => Ok(Value::Object(Default::default())),
        Some(obj @ Value::Object(_)) => Ok(obj),
        Some(other) => Err(ServiceDeskError::validation(format!(
            "specs must be a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
