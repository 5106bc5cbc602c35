//! Single-use, expiring registration challenges.
//!
//! The store owns the contract — overwrite on reissue, delete on success,
//! delete on expiry, keep on mismatch — while the backing [`ChallengeCache`]
//! stays a dumb key/value port.

use chrono::{Duration, Utc};

use crate::domain::repository::ChallengeCache;
use crate::domain::types::{OTP_TTL_SECS, OtpChallenge, PendingRegistration};
use crate::error::ApiError;

pub struct OtpChallengeStore<C: ChallengeCache> {
    pub cache: C,
}

impl<C: ChallengeCache> OtpChallengeStore<C> {
    /// Park a registration behind a code. Any existing challenge for the
    /// same email is replaced; concurrent reissues are last-writer-wins.
    pub async fn issue(
        &self,
        email: &str,
        code: String,
        payload: PendingRegistration,
    ) -> Result<(), ApiError> {
        let challenge = OtpChallenge {
            code,
            payload,
            expires_at: Utc::now() + Duration::seconds(OTP_TTL_SECS),
        };
        self.cache.put(email, &challenge).await
    }

    /// Redeem a challenge. Exactly one success per issue: the entry is
    /// deleted on success and on expiry (so a stale entry can never shadow
    /// a later reissue), but kept on a wrong code so the user may retry.
    pub async fn verify(&self, email: &str, code: &str) -> Result<PendingRegistration, ApiError> {
        let challenge = self
            .cache
            .get(email)
            .await?
            .ok_or(ApiError::OtpNotFound)?;

        if challenge.is_expired(Utc::now()) {
            self.cache.remove(email).await?;
            return Err(ApiError::OtpExpired);
        }
        if challenge.code != code {
            return Err(ApiError::OtpMismatch);
        }

        self.cache.remove(email).await?;
        Ok(challenge.payload)
    }

    /// Drop a challenge outright — used when the mail send fails, so no
    /// challenge survives whose code the user can never receive.
    pub async fn discard(&self, email: &str) -> Result<(), ApiError> {
        self.cache.remove(email).await
    }
}
