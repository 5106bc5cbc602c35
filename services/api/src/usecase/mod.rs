pub mod booking;
pub mod credential;
pub mod register;
pub mod report;
pub mod token;
pub mod user;
