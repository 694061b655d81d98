use crate::utils::error::{BaziError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 欄位檢查失敗的細節，由呼叫端決定轉成哪一種錯誤
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub value: String,
    pub reason: String,
}

impl FieldViolation {
    pub fn new(field: &str, value: impl ToString, reason: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn into_birth_error(self) -> BaziError {
        BaziError::InvalidBirthMoment {
            field: self.field,
            value: self.value,
            reason: self.reason,
        }
    }

    pub fn into_request_error(self) -> BaziError {
        BaziError::InvalidRequest {
            field: self.field,
            reason: self.reason,
        }
    }

    pub fn into_config_error(self) -> BaziError {
        BaziError::InvalidConfigValueError {
            field: self.field,
            value: self.value,
            reason: self.reason,
        }
    }
}

pub type FieldResult = std::result::Result<(), FieldViolation>;

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> FieldResult {
    if value < min || value > max {
        return Err(FieldViolation::new(
            field_name,
            value,
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> FieldResult {
    if value.trim().is_empty() {
        return Err(FieldViolation::new(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> FieldResult {
    if !allowed.contains(&value) {
        return Err(FieldViolation::new(
            field_name,
            value,
            format!("Unsupported value. Valid values: {}", allowed.join(", ")),
        ));
    }
    Ok(())
}
