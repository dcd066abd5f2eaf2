//! # Request Extraction & Validation
//!
//! The [`Validate`] trait for request DTOs and helpers that turn axum's
//! rejections into [`AppError`]s.

use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::error::AppError;

/// Request types that check rules serde cannot express.
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

/// Extract a JSON body, mapping deserialization errors to [`AppError::BadRequest`].
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// Extract a JSON body and validate it.
pub fn extract_validated_json<T: Validate>(
    result: Result<Json<T>, JsonRejection>,
) -> Result<T, AppError> {
    let value = extract_json(result)?;
    value.validate().map_err(AppError::Validation)?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Named(String);

    impl Validate for Named {
        fn validate(&self) -> Result<(), String> {
            if self.0.is_empty() {
                return Err("name must not be empty".into());
            }
            Ok(())
        }
    }

    #[test]
    fn validation_failure_is_422() {
        let err = extract_validated_json(Ok(Json(Named(String::new())))).unwrap_err();
        assert!(matches!(err, AppError::Validation(m) if m.contains("empty")));
    }

    #[test]
    fn valid_body_passes_through() {
        let value = extract_validated_json(Ok(Json(Named("dodo".into())))).unwrap();
        assert_eq!(value.0, "dodo");
    }
}
