//! sea-orm entities for the LabDesk API service.

pub mod bookings;
pub mod reports;
pub mod users;
