use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use labdesk_domain::booking::{BookingStatus, CollectionType};

use crate::domain::types::Booking;
use crate::error::ApiError;
use crate::extract::BearerIdentity;
use crate::state::AppState;
use crate::usecase::booking::{
    CreateBookingInput, CreateBookingUseCase, GetBookingUseCase, ListBookingsUseCase,
    TransitionBookingUseCase,
};

#[derive(Serialize)]
pub struct BookingResponse {
    pub id: String,
    pub customer_id: String,
    pub test_id: Option<String>,
    pub test_name: String,
    pub test_price: i32,
    pub scheduled_date: NaiveDate,
    pub time_slot: String,
    pub collection_type: CollectionType,
    pub address: Option<String>,
    pub status: BookingStatus,
    pub report_id: Option<String>,
    #[serde(serialize_with = "labdesk_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "labdesk_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id.to_string(),
            customer_id: booking.customer_id.to_string(),
            test_id: booking.test_id.map(|id| id.to_string()),
            test_name: booking.test_name,
            test_price: booking.test_price,
            scheduled_date: booking.scheduled_date,
            time_slot: booking.time_slot,
            collection_type: booking.collection_type,
            address: booking.address,
            status: booking.status,
            report_id: booking.report_id.map(|id| id.to_string()),
            created_at: booking.created_at,
            updated_at: booking.updated_at,
        }
    }
}

fn parse_booking_id(id: &str) -> Result<Uuid, ApiError> {
    // A malformed id reads the same as an absent booking.
    id.parse().map_err(|_| ApiError::BookingNotFound)
}

// ── POST /bookings ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub test_id: Uuid,
    pub scheduled_date: NaiveDate,
    pub time_slot: String,
    pub collection_type: CollectionType,
    pub address: Option<String>,
    /// Optional; `pending` when omitted, `confirmed` when the client
    /// pre-confirms. Validated as a status string so unknown values answer
    /// with `INVALID_STATUS` rather than a deserialization error.
    pub status: Option<String>,
}

pub async fn create_booking(
    BearerIdentity(principal): BearerIdentity,
    State(state): State<AppState>,
    Json(body): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), ApiError> {
    let initial_status = body
        .status
        .as_deref()
        .map(|s| BookingStatus::from_str(s).ok_or(ApiError::InvalidStatus))
        .transpose()?;

    let usecase = CreateBookingUseCase {
        bookings: state.booking_repo(),
        tests: state.lab_test_repo(),
    };
    let booking = usecase
        .execute(
            &principal,
            CreateBookingInput {
                test_id: body.test_id,
                scheduled_date: body.scheduled_date,
                time_slot: body.time_slot,
                collection_type: body.collection_type,
                address: body.address,
                initial_status,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(booking.into())))
}

// ── GET /bookings ────────────────────────────────────────────────────────────

pub async fn list_bookings(
    BearerIdentity(principal): BearerIdentity,
    State(state): State<AppState>,
) -> Result<Json<Vec<BookingResponse>>, ApiError> {
    let usecase = ListBookingsUseCase {
        bookings: state.booking_repo(),
    };
    let bookings = usecase.execute(&principal).await?;
    Ok(Json(bookings.into_iter().map(Into::into).collect()))
}

// ── GET /bookings/{id} ───────────────────────────────────────────────────────

pub async fn get_booking(
    BearerIdentity(principal): BearerIdentity,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BookingResponse>, ApiError> {
    let id = parse_booking_id(&id)?;
    let usecase = GetBookingUseCase {
        bookings: state.booking_repo(),
    };
    let booking = usecase.execute(&principal, id).await?;
    Ok(Json(booking.into()))
}

// ── PATCH /bookings/{id}/status ──────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

pub async fn update_booking_status(
    BearerIdentity(principal): BearerIdentity,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateStatusRequest>,
) -> Result<Json<BookingResponse>, ApiError> {
    let id = parse_booking_id(&id)?;
    let usecase = TransitionBookingUseCase {
        bookings: state.booking_repo(),
    };
    let booking = usecase.execute(&principal, id, &body.status).await?;
    Ok(Json(booking.into()))
}
