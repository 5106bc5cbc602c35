//! Session token issuance and principal resolution.

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use labdesk_domain::identifier::LoginIdentifier;
use labdesk_domain::principal::{Principal, Subject};
use labdesk_domain::user::UserRole;

use crate::domain::repository::UserRepository;
use crate::error::ApiError;
use crate::usecase::credential::{CredentialResolver, verify_secret};

/// Session token lifetime in seconds (7 days).
pub const SESSION_TOKEN_EXP: u64 = 7 * 24 * 60 * 60;

/// JWT claims carried by a session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub role: u8,
    pub exp: u64,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

pub fn issue_session_token(
    subject: Subject,
    role: UserRole,
    secret: &str,
) -> Result<(String, u64), ApiError> {
    let exp = now_secs() + SESSION_TOKEN_EXP;
    let claims = SessionClaims {
        sub: subject.as_sub(),
        role: role.as_u8(),
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(e.into()))?;
    Ok((token, exp))
}

/// Validate a token and return its claims.
///
/// Validation: HS256, exp checked, required claims `exp` + `sub`. An
/// expired claim and a bad signature are distinguishable to callers; both
/// still resolve to a 401.
pub fn decode_session_token(token: &str, secret: &str) -> Result<SessionClaims, ApiError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => ApiError::ExpiredToken,
        _ => ApiError::MalformedToken,
    })?;

    Ok(data.claims)
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    /// Email or phone, in whatever shape the user typed it.
    pub identifier: String,
    pub password: String,
    /// Set when the client is entering the staff panel; non-admin users are
    /// rejected with `Forbidden` rather than `InvalidCredentials`.
    pub admin_panel: bool,
}

#[derive(Debug)]
pub struct LoginOutput {
    pub principal: Principal,
    pub token: String,
    pub token_exp: u64,
}

pub struct LoginUseCase<R: UserRepository> {
    pub users: R,
    pub jwt_secret: String,
    pub admin_email: String,
    pub admin_password: String,
}

impl<R: UserRepository> LoginUseCase<R> {
    pub async fn execute(&self, input: LoginInput) -> Result<LoginOutput, ApiError> {
        let identifier = LoginIdentifier::parse(&input.identifier);

        // Super-admin shortcut: matches the configured email/secret pair
        // and never touches the user store. No rate limiting or lockout.
        if let LoginIdentifier::Email(email) = &identifier {
            if email.eq_ignore_ascii_case(&self.admin_email)
                && input.password == self.admin_password
            {
                let (token, token_exp) =
                    issue_session_token(Subject::SuperAdmin, UserRole::Admin, &self.jwt_secret)?;
                return Ok(LoginOutput {
                    principal: Principal::super_admin(self.admin_email.to_lowercase()),
                    token,
                    token_exp,
                });
            }
        }

        // Unknown identifier and wrong password produce the same error, so
        // login cannot be used to enumerate accounts.
        let user = CredentialResolver { users: &self.users }
            .resolve(&identifier)
            .await?
            .ok_or(ApiError::InvalidCredentials)?;

        if input.admin_panel && !user.role.is_admin() {
            return Err(ApiError::Forbidden);
        }

        if !verify_secret(&input.password, &user.password_hash) {
            return Err(ApiError::InvalidCredentials);
        }

        let (token, token_exp) =
            issue_session_token(Subject::User(user.id), user.role, &self.jwt_secret)?;
        Ok(LoginOutput {
            principal: Principal {
                subject: Subject::User(user.id),
                name: user.name,
                email: user.email,
                role: user.role,
            },
            token,
            token_exp,
        })
    }
}

// ── Authenticate ─────────────────────────────────────────────────────────────

pub struct AuthenticateUseCase<R: UserRepository> {
    pub users: R,
    pub jwt_secret: String,
    pub admin_email: String,
}

impl<R: UserRepository> AuthenticateUseCase<R> {
    /// Resolve a bearer token to a principal. Failure kinds stay
    /// distinguishable (`MalformedToken` / `ExpiredToken` / `StaleSubject`)
    /// for logging and tests; all of them answer 401.
    pub async fn execute(&self, token: &str) -> Result<Principal, ApiError> {
        let claims = decode_session_token(token, &self.jwt_secret)?;
        let subject = Subject::parse(&claims.sub).ok_or(ApiError::MalformedToken)?;

        match subject {
            // Synthesized without a store lookup; there is no backing record.
            Subject::SuperAdmin => Ok(Principal::super_admin(self.admin_email.to_lowercase())),
            Subject::User(id) => {
                let user = self
                    .users
                    .find_by_id(id)
                    .await?
                    // Structurally valid token, account deleted since issuance.
                    .ok_or(ApiError::StaleSubject)?;
                Ok(Principal {
                    subject,
                    name: user.name,
                    email: user.email,
                    role: user.role,
                })
            }
        }
    }
}
