use thiserror::Error;
use validator::ValidationErrors;

#[derive(Error, Debug)]
pub enum HospitalError {
    #[error("{0}")]
    NotFound(String),

    /// One `"field: reason"` entry per failed constraint.
    #[error("Validation Failed")]
    Validation(Vec<String>),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type HospitalResult<T> = Result<T, HospitalError>;

impl From<ValidationErrors> for HospitalError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, field_errors)| {
                let field = camel_case(field);
                field_errors.iter().map(move |error| {
                    let reason = error
                        .message
                        .as_ref()
                        .map(|message| message.to_string())
                        .unwrap_or_else(|| error.code.to_string());
                    format!("{}: {}", field, reason)
                })
            })
            .collect();
        messages.sort();

        HospitalError::Validation(messages)
    }
}

/// Field names are reported the way clients send them.
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}
