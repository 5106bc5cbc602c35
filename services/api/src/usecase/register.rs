//! Two-phase OTP-gated registration.

use chrono::Utc;
use rand::RngExt;
use uuid::Uuid;

use labdesk_domain::user::UserRole;

use crate::domain::otp::OtpChallengeStore;
use crate::domain::repository::{ChallengeCache, Mailer, UserRepository};
use crate::domain::types::{OTP_CODE_LEN, PendingRegistration, User};
use crate::error::ApiError;
use crate::usecase::credential::hash_secret;

/// Charset for generating verification codes (decimal digits).
const CHARSET: &[u8] = b"0123456789";

fn generate_code() -> String {
    let mut rng = rand::rng();
    (0..OTP_CODE_LEN)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

// ── RequestRegistration ──────────────────────────────────────────────────────

pub struct RequestRegistrationInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
}

pub struct RequestRegistrationUseCase<R, C, M>
where
    R: UserRepository,
    C: ChallengeCache,
    M: Mailer,
{
    pub users: R,
    pub challenges: OtpChallengeStore<C>,
    pub mailer: M,
}

impl<R, C, M> RequestRegistrationUseCase<R, C, M>
where
    R: UserRepository,
    C: ChallengeCache,
    M: Mailer,
{
    pub async fn execute(&self, input: RequestRegistrationInput) -> Result<(), ApiError> {
        let name = input.name.trim();
        let email = input.email.trim().to_lowercase();
        let phone = input.phone.trim();
        if name.is_empty() || email.is_empty() || phone.is_empty() || input.password.is_empty() {
            return Err(ApiError::MissingData);
        }

        // 1. Uniqueness check — 400 with a dedicated kind, per the legacy API.
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(ApiError::DuplicateEmail);
        }

        // 2. Park the registration behind a fresh code. The password is
        //    hashed before it enters the challenge.
        let code = generate_code();
        let payload = PendingRegistration {
            name: name.to_owned(),
            email: email.clone(),
            password_hash: hash_secret(&input.password)?,
            phone: phone.to_owned(),
        };
        self.challenges.issue(&email, code.clone(), payload).await?;

        // 3. Deliver the code. A failed send must not leave a challenge the
        //    user can never redeem.
        if let Err(err) = self.mailer.send_otp(&email, &code).await {
            self.challenges.discard(&email).await?;
            return Err(err);
        }
        Ok(())
    }
}

// ── VerifyRegistration ───────────────────────────────────────────────────────

pub struct VerifyRegistrationInput {
    pub email: String,
    pub code: String,
}

pub struct VerifyRegistrationUseCase<R, C>
where
    R: UserRepository,
    C: ChallengeCache,
{
    pub users: R,
    pub challenges: OtpChallengeStore<C>,
}

impl<R, C> VerifyRegistrationUseCase<R, C>
where
    R: UserRepository,
    C: ChallengeCache,
{
    pub async fn execute(&self, input: VerifyRegistrationInput) -> Result<User, ApiError> {
        let email = input.email.trim().to_lowercase();
        let payload = self.challenges.verify(&email, input.code.trim()).await?;

        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            name: payload.name,
            email: payload.email,
            phone: payload.phone,
            password_hash: payload.password_hash,
            role: UserRole::Customer,
            created_at: now,
            updated_at: now,
        };
        self.users.create(&user).await?;
        Ok(user)
    }
}
