use async_trait::async_trait;
use axum::{
    extract::{FromRequest, Request},
    Json,
};
use hospital_core::errors::HospitalError;
use serde::de::DeserializeOwned;
use validator::Validate;

use super::error_handling::AppError;

/// A JSON request body that has passed its `Validate` rules.
///
/// Unreadable bodies and rule violations both come back as 400 validation
/// envelopes instead of axum's plain-text rejections.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                AppError(HospitalError::Validation(vec![format!(
                    "body: {}",
                    rejection.body_text()
                )]))
            })?;
        value
            .validate()
            .map_err(|errors| AppError(HospitalError::from(errors)))?;

        Ok(ValidatedJson(value))
    }
}
