//! Conversion of application and domain errors into HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use carrental_core::access::AccessError;
use carrental_core::bookings::BookingError;
use carrental_core::fleet::FleetError;
use carrental_core::reports::ReportError;
use carrental_shared::{AppError, CaptchaError, JwtError};
use sea_orm::DbErr;
use serde_json::json;

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// An `AppError` on its way out as a `{ "error", "message" }` response.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        if err.is_server_error() {
            tracing::error!(error = %err, code = err.error_code(), "Request failed");
        }

        let status =
            StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = Json(json!({
            "error": err.error_code(),
            "message": err.public_message(),
        }));
        (status, body).into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        match err {
            DbErr::RecordNotUpdated | DbErr::RecordNotFound(_) => {
                Self(AppError::NotFound("Record not found".to_string()))
            }
            other => Self(AppError::Database(other.to_string())),
        }
    }
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        if err.is_business_rule() {
            Self(AppError::BusinessRule(err.to_string()))
        } else {
            Self(AppError::Validation(err.to_string()))
        }
    }
}

impl From<BookingError> for ApiError {
    fn from(err: BookingError) -> Self {
        Self(AppError::Validation(err.to_string()))
    }
}

impl From<FleetError> for ApiError {
    fn from(err: FleetError) -> Self {
        Self(AppError::Validation(err.to_string()))
    }
}

impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Forbidden { .. } => Self(AppError::Forbidden(err.to_string())),
            AccessError::ProtectedRole(_) | AccessError::InvalidInvitationRole(_) => {
                Self(AppError::BusinessRule(err.to_string()))
            }
            AccessError::InvalidEmail(_) => Self(AppError::Validation(err.to_string())),
        }
    }
}

impl From<CaptchaError> for ApiError {
    fn from(err: CaptchaError) -> Self {
        match err {
            CaptchaError::MissingToken | CaptchaError::Rejected(_) => {
                Self(AppError::Validation(err.to_string()))
            }
            CaptchaError::Unavailable(_) => Self(AppError::ExternalService(err.to_string())),
        }
    }
}

impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Expired => Self(AppError::Unauthorized("Token has expired".to_string())),
            JwtError::DecodingError(_) => {
                Self(AppError::Unauthorized("Invalid or malformed token".to_string()))
            }
            JwtError::EncodingError(e) => Self(AppError::Internal(e)),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let reason = errs
                    .iter()
                    .find_map(|e| e.message.as_ref().map(ToString::to_string))
                    .unwrap_or_else(|| "is invalid".to_string());
                format!("{field} {reason}")
            })
            .collect();
        fields.sort();
        Self(AppError::Validation(fields.join("; ")))
    }
}
