use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl Patient {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Registration payload for `POST /api/v1/patients`.
///
/// Missing fields deserialize as empty strings so they surface as
/// validation errors instead of body rejections.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePatientRequest {
    #[serde(default)]
    #[validate(custom = "not_blank")]
    pub first_name: String,

    #[serde(default)]
    #[validate(custom = "not_blank")]
    pub last_name: String,

    #[serde(default)]
    #[validate(custom = "well_formed_email")]
    pub email: String,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_blank");
        error.message = Some(Cow::from("must not be blank"));
        return Err(error);
    }
    Ok(())
}

// Blank input is reported as blank only, not also as malformed.
fn well_formed_email(value: &str) -> Result<(), ValidationError> {
    not_blank(value)?;
    if validator::validate_email(value) {
        return Ok(());
    }
    let mut error = ValidationError::new("email");
    error.message = Some(Cow::from("must be a well-formed email address"));
    Err(error)
}
