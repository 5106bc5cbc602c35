//! Resolving a login identifier to a user record, and secret verification.

use argon2::Argon2;
use argon2::password_hash::{
    PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
};

use labdesk_domain::identifier::LoginIdentifier;

use crate::domain::repository::UserRepository;
use crate::domain::types::User;
use crate::error::ApiError;

/// Hash a plaintext secret into an Argon2id PHC string.
pub fn hash_secret(plaintext: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("hash secret: {e}")))
}

/// Verify a plaintext secret against a stored PHC string. Unparseable
/// hashes count as a mismatch. Constant-time by construction.
pub fn verify_secret(plaintext: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .and_then(|parsed| Argon2::default().verify_password(plaintext.as_bytes(), &parsed))
        .is_ok()
}

/// Looks up a user record from a classified login identifier.
///
/// Phone numbers are stored inconsistently (with or without country code,
/// with formatting), so the phone path runs an ordered list of probes and
/// takes the first hit. The order is load-bearing: two accounts sharing a
/// suffix resolve differently if it changes. Within a single probe the
/// repository breaks ties toward the oldest account.
pub struct CredentialResolver<'a, R: UserRepository> {
    pub users: &'a R,
}

impl<R: UserRepository> CredentialResolver<'_, R> {
    pub async fn resolve(&self, identifier: &LoginIdentifier) -> Result<Option<User>, ApiError> {
        match identifier {
            LoginIdentifier::Email(email) => {
                self.users.find_by_email(&email.to_lowercase()).await
            }
            LoginIdentifier::Phone { raw, suffix10 } => self.resolve_phone(raw, suffix10).await,
        }
    }

    async fn resolve_phone(&self, raw: &str, suffix10: &str) -> Result<Option<User>, ApiError> {
        // A digit-free input would turn the substring probes into match-all.
        if raw.is_empty() {
            return Ok(None);
        }

        // Probe order: exact raw digits, raw digits anywhere, exact
        // 10-digit suffix, suffix anywhere, then the two country-code
        // reconstructions.
        if let Some(user) = self.users.find_by_phone(raw).await? {
            return Ok(Some(user));
        }
        if let Some(user) = self.users.find_by_phone_fragment(raw).await? {
            return Ok(Some(user));
        }
        if let Some(user) = self.users.find_by_phone(suffix10).await? {
            return Ok(Some(user));
        }
        if let Some(user) = self.users.find_by_phone_fragment(suffix10).await? {
            return Ok(Some(user));
        }
        if let Some(user) = self.users.find_by_phone(&format!("+91{suffix10}")).await? {
            return Ok(Some(user));
        }
        self.users.find_by_phone(&format!("91{suffix10}")).await
    }
}
