use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// API service error variants.
///
/// `DuplicateEmail` maps to 400 rather than 409 — the original clients
/// depend on that status, so it is preserved.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    // 400 — validation
    #[error("missing data")]
    MissingData,
    #[error("address is required for home collection")]
    MissingAddress,
    #[error("unknown booking status")]
    InvalidStatus,
    #[error("illegal status transition")]
    InvalidTransition,
    #[error("email already registered")]
    DuplicateEmail,
    // 400 — OTP retry errors
    #[error("no pending verification for this email")]
    OtpNotFound,
    #[error("verification code expired")]
    OtpExpired,
    #[error("incorrect verification code")]
    OtpMismatch,
    // 401
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("missing bearer token")]
    MissingToken,
    #[error("malformed token")]
    MalformedToken,
    #[error("token expired")]
    ExpiredToken,
    #[error("token subject no longer exists")]
    StaleSubject,
    // 403
    #[error("forbidden")]
    Forbidden,
    // 404
    #[error("user not found")]
    UserNotFound,
    #[error("test not found")]
    TestNotFound,
    #[error("booking not found")]
    BookingNotFound,
    #[error("report not found")]
    ReportNotFound,
    // 503 — transient collaborator failures, safe to retry
    #[error("could not deliver verification email")]
    MailDelivery,
    #[error("could not store report file")]
    FileStorage,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingData => "MISSING_DATA",
            Self::MissingAddress => "MISSING_ADDRESS",
            Self::InvalidStatus => "INVALID_STATUS",
            Self::InvalidTransition => "INVALID_TRANSITION",
            Self::DuplicateEmail => "DUPLICATE_EMAIL",
            Self::OtpNotFound => "OTP_NOT_FOUND",
            Self::OtpExpired => "OTP_EXPIRED",
            Self::OtpMismatch => "OTP_MISMATCH",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::MissingToken => "MISSING_TOKEN",
            Self::MalformedToken => "MALFORMED_TOKEN",
            Self::ExpiredToken => "EXPIRED_TOKEN",
            Self::StaleSubject => "STALE_SUBJECT",
            Self::Forbidden => "FORBIDDEN",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::TestNotFound => "TEST_NOT_FOUND",
            Self::BookingNotFound => "BOOKING_NOT_FOUND",
            Self::ReportNotFound => "REPORT_NOT_FOUND",
            Self::MailDelivery => "MAIL_DELIVERY_FAILED",
            Self::FileStorage => "FILE_STORAGE_FAILED",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::MissingData
            | Self::MissingAddress
            | Self::InvalidStatus
            | Self::InvalidTransition
            | Self::DuplicateEmail
            | Self::OtpNotFound
            | Self::OtpExpired
            | Self::OtpMismatch => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials
            | Self::MissingToken
            | Self::MalformedToken
            | Self::ExpiredToken
            | Self::StaleSubject => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::UserNotFound
            | Self::TestNotFound
            | Self::BookingNotFound
            | Self::ReportNotFound => StatusCode::NOT_FOUND,
            Self::MailDelivery | Self::FileStorage => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status for all
        // requests. 4xx are expected client errors; logging them here would be noise.
        // Internal errors need the anyhow chain logged so the root cause is traceable.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
