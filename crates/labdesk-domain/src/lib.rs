//! Domain types shared across the LabDesk platform.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; never in `infra/` or `handlers/`.

pub mod booking;
pub mod identifier;
pub mod principal;
pub mod user;
