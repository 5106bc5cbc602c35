pub mod otp;
pub mod repository;
pub mod types;
