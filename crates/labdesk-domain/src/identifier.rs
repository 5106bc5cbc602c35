//! Login identifier classification.
//!
//! A single input field accepts either an email address or a phone number.
//! Phone numbers arrive in every imaginable shape ("+91 98765-43210",
//! "09876543210", "91 98765 43210"), so the phone variant keeps both the
//! full digit string and the 10-digit suffix used for country-code-tolerant
//! matching.

/// Number of trailing digits considered significant when matching phones.
pub const PHONE_SUFFIX_LEN: usize = 10;

/// A classified login identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginIdentifier {
    /// Contains an `@`; matched case-insensitively against stored emails.
    Email(String),
    /// Everything else. `raw` is the input stripped to digits; `suffix10`
    /// is the last [`PHONE_SUFFIX_LEN`] digits of `raw` (all of them when
    /// the number is shorter).
    Phone { raw: String, suffix10: String },
}

impl LoginIdentifier {
    /// Classify a raw login identifier. Pure; never fails.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.contains('@') {
            return Self::Email(trimmed.to_owned());
        }
        let raw: String = trimmed.chars().filter(char::is_ascii_digit).collect();
        let suffix10 = last_digits(&raw, PHONE_SUFFIX_LEN);
        Self::Phone { raw, suffix10 }
    }
}

fn last_digits(digits: &str, n: usize) -> String {
    let len = digits.len();
    if len <= n {
        digits.to_owned()
    } else {
        digits[len - n..].to_owned()
    }
}
