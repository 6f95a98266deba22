use axum::response::{IntoResponse, Response};
use hyper::StatusCode;

pub const DUPLICATE_EMAIL_MESSAGE: &str = "A player with this email already exists.";

#[derive(Debug)]
pub enum AppError {
    //Malformed input
    InvalidFormData,
    MissingRequiredFields(Vec<&'static str>),
    InvalidDateOfBirth,
    //Conflict
    DuplicateEmail,
    //Internal failures, details stay in the logs
    PictureSaveFailed,
    InternalServerError,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidFormData
            | AppError::MissingRequiredFields(_)
            | AppError::InvalidDateOfBirth => StatusCode::BAD_REQUEST,
            AppError::DuplicateEmail => StatusCode::CONFLICT,
            AppError::PictureSaveFailed | AppError::InternalServerError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn message(&self) -> String {
        match self {
            AppError::InvalidFormData => "invalid form data".to_string(),
            AppError::MissingRequiredFields(missing) => format!(
                "first name, last name, dob, and email are required (missing: {})",
                missing.join(", ")
            ),
            AppError::InvalidDateOfBirth => {
                "date of birth must be valid and use MM-DD-YYYY or MM/DD/YYYY".to_string()
            }
            AppError::DuplicateEmail => DUPLICATE_EMAIL_MESSAGE.to_string(),
            AppError::PictureSaveFailed => "failed to save picture".to_string(),
            AppError::InternalServerError => "unable to register player".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status_code(), self.message()).into_response()
    }
}
