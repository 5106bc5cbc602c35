//! Booking lifecycle types.
//!
//! The status machine is strictly forward-only: admins may advance a
//! non-terminal booking to any higher-ranked status (jumps allowed) or
//! cancel it; nothing moves backward. Same-state transitions are treated
//! as idempotent successes by the caller.

use serde::{Deserialize, Serialize};

/// Booking lifecycle status.
///
/// Rank order: pending < confirmed < sample_collected < report_ready <
/// completed. `cancelled` is reachable from any non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    SampleCollected,
    ReportReady,
    Completed,
    Cancelled,
}

impl BookingStatus {
    /// Parse a wire/storage value. Returns `None` for unknown values.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            "sample_collected" => Some(Self::SampleCollected),
            "report_ready" => Some(Self::ReportReady),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::SampleCollected => "sample_collected",
            Self::ReportReady => "report_ready",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Legal initial statuses at creation time. The client may pre-confirm.
    pub fn is_creation_status(self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }

    fn rank(self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::Confirmed => 1,
            Self::SampleCollected => 2,
            Self::ReportReady => 3,
            Self::Completed => 4,
            // Not part of the forward order; handled explicitly below.
            Self::Cancelled => u8::MAX,
        }
    }

    /// Whether an admin may move a booking from `self` to `target`.
    /// Same-state is not covered here; callers short-circuit it first.
    pub fn can_advance_to(self, target: Self) -> bool {
        if self.is_terminal() {
            return false;
        }
        if target == Self::Cancelled {
            return true;
        }
        target.rank() > self.rank()
    }
}

/// Where the sample is collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionType {
    Center,
    Home,
}

impl CollectionType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "center" => Some(Self::Center),
            "home" => Some(Self::Home),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Center => "center",
            Self::Home => "home",
        }
    }
}
