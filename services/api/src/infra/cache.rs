use deadpool_redis::Pool;
use deadpool_redis::redis::AsyncCommands;

use crate::domain::repository::ChallengeCache;
use crate::domain::types::{OTP_TTL_SECS, OtpChallenge};
use crate::error::ApiError;

/// Redis-backed challenge cache.
///
/// The Redis TTL is only a backstop against abandoned entries; expiry is
/// decided by the timestamp inside the challenge so `verify` can tell
/// `OtpExpired` apart from `OtpNotFound`.
#[derive(Clone)]
pub struct RedisChallengeCache {
    pub pool: Pool,
}

fn challenge_key(email: &str) -> String {
    format!("otp_challenge:{email}")
}

impl ChallengeCache for RedisChallengeCache {
    async fn put(&self, email: &str, challenge: &OtpChallenge) -> Result<(), ApiError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| ApiError::Internal(e.into()))?;
        let key = challenge_key(email);
        let bytes =
            serde_json::to_vec(challenge).map_err(|e| ApiError::Internal(e.into()))?;
        let (): () = conn
            .set_ex(&key, bytes, (OTP_TTL_SECS + 60) as u64)
            .await
            .map_err(|e: deadpool_redis::redis::RedisError| ApiError::Internal(e.into()))?;
        Ok(())
    }

    async fn get(&self, email: &str) -> Result<Option<OtpChallenge>, ApiError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| ApiError::Internal(e.into()))?;
        let key = challenge_key(email);
        let value: Option<Vec<u8>> = conn
            .get(&key)
            .await
            .map_err(|e| ApiError::Internal(e.into()))?;
        value
            .map(|bytes| serde_json::from_slice(&bytes))
            .transpose()
            .map_err(|e| ApiError::Internal(e.into()))
    }

    async fn remove(&self, email: &str) -> Result<(), ApiError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| ApiError::Internal(e.into()))?;
        let key = challenge_key(email);
        let (): () = conn
            .del(&key)
            .await
            .map_err(|e: deadpool_redis::redis::RedisError| ApiError::Internal(e.into()))?;
        Ok(())
    }
}
