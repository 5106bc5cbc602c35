use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use labdesk_domain::booking::{BookingStatus, CollectionType};
use labdesk_domain::user::UserRole;

/// Full user record as owned by this service. The password hash never
/// leaves the usecase layer.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    /// Stored lowercased; uniqueness is case-insensitive by construction.
    pub email: String,
    /// Free-form, as entered at registration.
    pub phone: String,
    /// Argon2id PHC string.
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Registration data parked while the email is being verified.
/// The password is hashed before it enters the challenge, so the cache
/// never holds a plaintext secret.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingRegistration {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: String,
}

/// Ephemeral registration challenge, keyed by email in the cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpChallenge {
    pub code: String,
    pub payload: PendingRegistration,
    pub expires_at: DateTime<Utc>,
}

impl OtpChallenge {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// OTP code length in decimal digits.
pub const OTP_CODE_LEN: usize = 6;

/// OTP challenge time-to-live in seconds.
pub const OTP_TTL_SECS: i64 = 600;

/// Catalog entry for a diagnostic test.
#[derive(Debug, Clone)]
pub struct LabTest {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Whole currency units.
    pub price: i32,
    pub created_at: DateTime<Utc>,
}

/// A scheduled test booking.
#[derive(Debug, Clone)]
pub struct Booking {
    pub id: Uuid,
    pub customer_id: Uuid,
    /// Nulled when the catalog entry is deleted; `test_name`/`test_price`
    /// keep the booking displayable regardless.
    pub test_id: Option<Uuid>,
    pub test_name: String,
    pub test_price: i32,
    pub scheduled_date: NaiveDate,
    pub time_slot: String,
    pub collection_type: CollectionType,
    pub address: Option<String>,
    pub status: BookingStatus,
    pub report_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Result artifact uploaded for a booking.
#[derive(Debug, Clone)]
pub struct Report {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub file_url: String,
    pub stored_name: String,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Locator returned by the file-storage collaborator.
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub url: String,
    pub stored_name: String,
}
