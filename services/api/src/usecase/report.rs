//! Report upload and retrieval.

use chrono::Utc;
use uuid::Uuid;

use labdesk_domain::principal::Principal;

use crate::domain::repository::{BookingRepository, ReportFileStore};
use crate::domain::types::Report;
use crate::error::ApiError;

// ── CreateReport ─────────────────────────────────────────────────────────────

pub struct CreateReportInput {
    pub booking_id: Uuid,
    pub file: Vec<u8>,
    pub filename: String,
    pub remarks: Option<String>,
}

pub struct CreateReportUseCase<B, F>
where
    B: BookingRepository,
    F: ReportFileStore,
{
    pub bookings: B,
    pub files: F,
}

impl<B, F> CreateReportUseCase<B, F>
where
    B: BookingRepository,
    F: ReportFileStore,
{
    /// Store the artifact, then link it to the booking and advance the
    /// booking to `report_ready` in one transaction.
    pub async fn execute(
        &self,
        principal: &Principal,
        input: CreateReportInput,
    ) -> Result<Report, ApiError> {
        if !principal.is_admin() {
            return Err(ApiError::Forbidden);
        }
        if input.file.is_empty() {
            return Err(ApiError::MissingData);
        }

        let booking = self
            .bookings
            .find_by_id(input.booking_id)
            .await?
            .ok_or(ApiError::BookingNotFound)?;

        let stored = self.files.store(&input.file, &input.filename).await?;

        let report = Report {
            id: Uuid::new_v4(),
            booking_id: booking.id,
            file_url: stored.url,
            stored_name: stored.stored_name,
            remarks: input.remarks,
            created_at: Utc::now(),
        };
        self.bookings.attach_report(&report).await?;
        Ok(report)
    }
}

// ── GetReport ────────────────────────────────────────────────────────────────

pub struct GetReportUseCase<B: BookingRepository> {
    pub bookings: B,
}

impl<B: BookingRepository> GetReportUseCase<B> {
    pub async fn execute(
        &self,
        principal: &Principal,
        booking_id: Uuid,
    ) -> Result<Report, ApiError> {
        let booking = self
            .bookings
            .find_by_id(booking_id)
            .await?
            .ok_or(ApiError::BookingNotFound)?;
        if !principal.is_admin() && principal.user_id() != Some(booking.customer_id) {
            return Err(ApiError::BookingNotFound);
        }
        self.bookings
            .find_report(booking_id)
            .await?
            .ok_or(ApiError::ReportNotFound)
    }
}
