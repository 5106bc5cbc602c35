//! Booking creation, lifecycle transitions, and visibility.

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use labdesk_domain::booking::{BookingStatus, CollectionType};
use labdesk_domain::principal::Principal;

use crate::domain::repository::{BookingRepository, LabTestRepository};
use crate::domain::types::Booking;
use crate::error::ApiError;

// ── CreateBooking ────────────────────────────────────────────────────────────

pub struct CreateBookingInput {
    pub test_id: Uuid,
    pub scheduled_date: NaiveDate,
    pub time_slot: String,
    pub collection_type: CollectionType,
    pub address: Option<String>,
    /// The client may pre-confirm; anything past `confirmed` is rejected.
    pub initial_status: Option<BookingStatus>,
}

pub struct CreateBookingUseCase<B, T>
where
    B: BookingRepository,
    T: LabTestRepository,
{
    pub bookings: B,
    pub tests: T,
}

impl<B, T> CreateBookingUseCase<B, T>
where
    B: BookingRepository,
    T: LabTestRepository,
{
    pub async fn execute(
        &self,
        principal: &Principal,
        input: CreateBookingInput,
    ) -> Result<Booking, ApiError> {
        // The synthetic admin has no customer identity and thus no bookings.
        let customer_id = principal.user_id().ok_or(ApiError::Forbidden)?;

        let status = input.initial_status.unwrap_or(BookingStatus::Pending);
        if !status.is_creation_status() {
            return Err(ApiError::InvalidStatus);
        }

        let time_slot = input.time_slot.trim();
        if time_slot.is_empty() {
            return Err(ApiError::MissingData);
        }

        // Home collection needs somewhere to go — enforced here, not later.
        let address = input
            .address
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_owned);
        if input.collection_type == CollectionType::Home && address.is_none() {
            return Err(ApiError::MissingAddress);
        }

        // Snapshot the catalog entry so the booking stays displayable after
        // the test is deleted.
        let test = self
            .tests
            .find_by_id(input.test_id)
            .await?
            .ok_or(ApiError::TestNotFound)?;

        let now = Utc::now();
        let booking = Booking {
            id: Uuid::new_v4(),
            customer_id,
            test_id: Some(test.id),
            test_name: test.name,
            test_price: test.price,
            scheduled_date: input.scheduled_date,
            time_slot: time_slot.to_owned(),
            collection_type: input.collection_type,
            address,
            status,
            report_id: None,
            created_at: now,
            updated_at: now,
        };
        self.bookings.create(&booking).await?;
        Ok(booking)
    }
}

// ── TransitionBooking ────────────────────────────────────────────────────────

pub struct TransitionBookingUseCase<B: BookingRepository> {
    pub bookings: B,
}

impl<B: BookingRepository> TransitionBookingUseCase<B> {
    /// Move a booking to `target_status`.
    ///
    /// Admins may advance any non-terminal booking forward (jumps allowed)
    /// or cancel it. Customers may only cancel their own bookings, and only
    /// while still `pending` or `confirmed`. Same-state requests succeed
    /// without a write. Backward transitions are rejected.
    pub async fn execute(
        &self,
        principal: &Principal,
        booking_id: Uuid,
        target_status: &str,
    ) -> Result<Booking, ApiError> {
        // An unknown target is an error, never a silent no-op.
        let target = BookingStatus::from_str(target_status).ok_or(ApiError::InvalidStatus)?;

        let mut booking = self
            .bookings
            .find_by_id(booking_id)
            .await?
            .ok_or(ApiError::BookingNotFound)?;

        // Customers cannot observe bookings that are not theirs.
        if !principal.is_admin() && principal.user_id() != Some(booking.customer_id) {
            return Err(ApiError::BookingNotFound);
        }

        if booking.status == target {
            return Ok(booking);
        }

        if principal.is_admin() {
            if !booking.status.can_advance_to(target) {
                return Err(ApiError::InvalidTransition);
            }
        } else {
            if target != BookingStatus::Cancelled {
                return Err(ApiError::Forbidden);
            }
            // Once the sample is collected the customer's cancel window is
            // closed; only staff can unwind the booking.
            if !matches!(
                booking.status,
                BookingStatus::Pending | BookingStatus::Confirmed
            ) {
                return Err(ApiError::Forbidden);
            }
        }

        self.bookings.update_status(booking_id, target).await?;
        booking.status = target;
        booking.updated_at = Utc::now();
        Ok(booking)
    }
}

// ── ListBookings ─────────────────────────────────────────────────────────────

pub struct ListBookingsUseCase<B: BookingRepository> {
    pub bookings: B,
}

impl<B: BookingRepository> ListBookingsUseCase<B> {
    /// Admins see every booking; customers see only their own. The
    /// synthetic admin owns none by definition, so the admin branch is the
    /// only one it can take.
    pub async fn execute(&self, principal: &Principal) -> Result<Vec<Booking>, ApiError> {
        if principal.is_admin() {
            return self.bookings.list_all().await;
        }
        let customer_id = principal.user_id().ok_or(ApiError::Forbidden)?;
        self.bookings.list_for_customer(customer_id).await
    }
}

// ── GetBooking ───────────────────────────────────────────────────────────────

pub struct GetBookingUseCase<B: BookingRepository> {
    pub bookings: B,
}

impl<B: BookingRepository> GetBookingUseCase<B> {
    pub async fn execute(
        &self,
        principal: &Principal,
        booking_id: Uuid,
    ) -> Result<Booking, ApiError> {
        let booking = self
            .bookings
            .find_by_id(booking_id)
            .await?
            .ok_or(ApiError::BookingNotFound)?;
        if !principal.is_admin() && principal.user_id() != Some(booking.customer_id) {
            return Err(ApiError::BookingNotFound);
        }
        Ok(booking)
    }
}
