use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::types::Report;
use crate::error::ApiError;
use crate::extract::BearerIdentity;
use crate::state::AppState;
use crate::usecase::report::{
    CreateReportInput, CreateReportUseCase, GetReportUseCase,
};

#[derive(Serialize)]
pub struct ReportResponse {
    pub id: String,
    pub booking_id: String,
    pub file_url: String,
    pub stored_name: String,
    pub remarks: Option<String>,
    #[serde(serialize_with = "labdesk_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Report> for ReportResponse {
    fn from(report: Report) -> Self {
        Self {
            id: report.id.to_string(),
            booking_id: report.booking_id.to_string(),
            file_url: report.file_url,
            stored_name: report.stored_name,
            remarks: report.remarks,
            created_at: report.created_at,
        }
    }
}

fn parse_booking_id(id: &str) -> Result<Uuid, ApiError> {
    id.parse().map_err(|_| ApiError::BookingNotFound)
}

// ── POST /bookings/{id}/report ───────────────────────────────────────────────

/// Multipart fields: `file` (the PDF; surrounding tooling has already
/// bounded type and size) and optional `remarks`.
pub async fn upload_report(
    BearerIdentity(principal): BearerIdentity,
    State(state): State<AppState>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ReportResponse>), ApiError> {
    let booking_id = parse_booking_id(&id)?;

    let mut file: Option<(String, Vec<u8>)> = None;
    let mut remarks: Option<String> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::MissingData)?
    {
        match field.name() {
            Some("file") => {
                let filename = field
                    .file_name()
                    .unwrap_or("report.pdf")
                    .to_owned();
                let bytes = field.bytes().await.map_err(|_| ApiError::MissingData)?;
                file = Some((filename, bytes.to_vec()));
            }
            Some("remarks") => {
                let text = field.text().await.map_err(|_| ApiError::MissingData)?;
                remarks = Some(text).filter(|t| !t.trim().is_empty());
            }
            _ => {}
        }
    }
    let (filename, bytes) = file.ok_or(ApiError::MissingData)?;

    let usecase = CreateReportUseCase {
        bookings: state.booking_repo(),
        files: state.file_store(),
    };
    let report = usecase
        .execute(
            &principal,
            CreateReportInput {
                booking_id,
                file: bytes,
                filename,
                remarks,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(report.into())))
}

// ── GET /bookings/{id}/report ────────────────────────────────────────────────

pub async fn get_report(
    BearerIdentity(principal): BearerIdentity,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ReportResponse>, ApiError> {
    let booking_id = parse_booking_id(&id)?;
    let usecase = GetReportUseCase {
        bookings: state.booking_repo(),
    };
    let report = usecase.execute(&principal, booking_id).await?;
    Ok(Json(report.into()))
}
