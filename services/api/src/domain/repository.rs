#![allow(async_fn_in_trait)]

use uuid::Uuid;

use crate::domain::types::{Booking, LabTest, OtpChallenge, Report, StoredFile, User};
use crate::error::ApiError;

use labdesk_domain::booking::BookingStatus;

/// Repository for user records.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError>;

    /// Exact match against the stored (lowercased) email. Callers pass a
    /// lowercased probe, which makes the lookup case-insensitive overall.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError>;

    /// Exact match against the stored phone string. Ties resolve to the
    /// oldest account (`created_at` ascending).
    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, ApiError>;

    /// Substring match anywhere in the stored phone string. Same tie-break.
    async fn find_by_phone_fragment(&self, fragment: &str) -> Result<Option<User>, ApiError>;

    async fn create(&self, user: &User) -> Result<(), ApiError>;

    async fn update_profile(
        &self,
        id: Uuid,
        name: Option<&str>,
        phone: Option<&str>,
    ) -> Result<(), ApiError>;

    /// Hard delete. Returns `true` if a row was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, ApiError>;
}

/// Repository for the test catalog.
pub trait LabTestRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<LabTest>, ApiError>;
    async fn list(&self) -> Result<Vec<LabTest>, ApiError>;
    async fn create(&self, test: &LabTest) -> Result<(), ApiError>;
    /// Returns `true` if a row was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, ApiError>;
}

/// Repository for bookings and their attached reports.
pub trait BookingRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, ApiError>;
    async fn list_all(&self) -> Result<Vec<Booking>, ApiError>;
    async fn list_for_customer(&self, customer_id: Uuid) -> Result<Vec<Booking>, ApiError>;
    async fn create(&self, booking: &Booking) -> Result<(), ApiError>;
    async fn update_status(&self, id: Uuid, status: BookingStatus) -> Result<(), ApiError>;

    /// Insert the report, set the booking's report reference, and advance
    /// its status to `report_ready` — all in one transaction.
    async fn attach_report(&self, report: &Report) -> Result<(), ApiError>;

    async fn find_report(&self, booking_id: Uuid) -> Result<Option<Report>, ApiError>;
}

/// TTL-aware key/value store for registration challenges, keyed by email.
/// Single-use and expiry semantics live in [`crate::domain::otp`], so this
/// port stays swappable (Redis in production, a map in tests).
pub trait ChallengeCache: Send + Sync {
    async fn put(&self, email: &str, challenge: &OtpChallenge) -> Result<(), ApiError>;
    async fn get(&self, email: &str) -> Result<Option<OtpChallenge>, ApiError>;
    async fn remove(&self, email: &str) -> Result<(), ApiError>;
}

/// Outbound mail transport collaborator.
pub trait Mailer: Send + Sync {
    async fn send_otp(&self, to: &str, code: &str) -> Result<(), ApiError>;
}

/// File-storage collaborator for report artifacts.
pub trait ReportFileStore: Send + Sync {
    async fn store(&self, bytes: &[u8], filename: &str) -> Result<StoredFile, ApiError>;
}
