//! Bearer-token principal extractor.

use axum::extract::FromRequestParts;
use http::header::AUTHORIZATION;
use http::request::Parts;

use labdesk_domain::principal::Principal;

use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::token::AuthenticateUseCase;

/// Principal resolved from the `Authorization: Bearer <token>` header.
///
/// An absent or non-Bearer header rejects with `MissingToken`; everything
/// else (signature, expiry, stale subject) is decided by
/// [`AuthenticateUseCase`].
pub struct BearerIdentity(pub Principal);

fn bearer_token(parts: &Parts) -> Option<String> {
    let header = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    Some(token.to_owned())
}

impl FromRequestParts<AppState> for BearerIdentity {
    type Rejection = ApiError;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // In Rust 1.82+ precise capturing, `async fn` captures lifetimes differently,
    // causing E0195. Fix: extract values synchronously, return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = bearer_token(parts);
        let usecase = AuthenticateUseCase {
            users: state.user_repo(),
            jwt_secret: state.jwt_secret.clone(),
            admin_email: state.admin_email.clone(),
        };

        async move {
            let token = token.ok_or(ApiError::MissingToken)?;
            let principal = usecase.execute(&token).await?;
            Ok(Self(principal))
        }
    }
}
