use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use labdesk_domain::principal::Principal;
use labdesk_domain::user::UserRole;

use crate::error::ApiError;
use crate::extract::BearerIdentity;
use crate::state::AppState;
use crate::usecase::token::{LoginInput, LoginUseCase};

#[derive(Serialize)]
pub struct PrincipalResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

impl From<Principal> for PrincipalResponse {
    fn from(principal: Principal) -> Self {
        Self {
            id: principal.subject.as_sub(),
            name: principal.name,
            email: principal.email,
            role: principal.role,
        }
    }
}

// ── POST /auth/token ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    /// Email or phone.
    pub identifier: String,
    pub password: String,
    /// Present and true when logging into the staff panel.
    #[serde(default)]
    pub admin_panel: bool,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    /// Seconds since the UNIX epoch.
    pub expires_at: u64,
    pub user: PrincipalResponse,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<(StatusCode, Json<LoginResponse>), ApiError> {
    let usecase = LoginUseCase {
        users: state.user_repo(),
        jwt_secret: state.jwt_secret.clone(),
        admin_email: state.admin_email.clone(),
        admin_password: state.admin_password.clone(),
    };
    let out = usecase
        .execute(LoginInput {
            identifier: body.identifier,
            password: body.password,
            admin_panel: body.admin_panel,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(LoginResponse {
            access_token: out.token,
            token_type: "Bearer",
            expires_at: out.token_exp,
            user: out.principal.into(),
        }),
    ))
}

// ── GET /auth/me ─────────────────────────────────────────────────────────────

pub async fn me(identity: BearerIdentity) -> Json<PrincipalResponse> {
    Json(identity.0.into())
}
