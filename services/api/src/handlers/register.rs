use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use labdesk_domain::user::UserRole;

use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::register::{
    RequestRegistrationInput, RequestRegistrationUseCase, VerifyRegistrationInput,
    VerifyRegistrationUseCase,
};

// ── POST /auth/register ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct StartRegistrationRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
}

pub async fn start_registration(
    State(state): State<AppState>,
    Json(body): Json<StartRegistrationRequest>,
) -> Result<StatusCode, ApiError> {
    let usecase = RequestRegistrationUseCase {
        users: state.user_repo(),
        challenges: state.otp_store(),
        mailer: state.mailer(),
    };
    usecase
        .execute(RequestRegistrationInput {
            name: body.name,
            email: body.email,
            password: body.password,
            phone: body.phone,
        })
        .await?;
    Ok(StatusCode::CREATED)
}

// ── POST /auth/register/verify ───────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyRegistrationRequest {
    pub email: String,
    pub code: String,
}

#[derive(Serialize)]
pub struct RegisteredUserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

pub async fn verify_registration(
    State(state): State<AppState>,
    Json(body): Json<VerifyRegistrationRequest>,
) -> Result<(StatusCode, Json<RegisteredUserResponse>), ApiError> {
    let usecase = VerifyRegistrationUseCase {
        users: state.user_repo(),
        challenges: state.otp_store(),
    };
    let user = usecase
        .execute(VerifyRegistrationInput {
            email: body.email,
            code: body.code,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisteredUserResponse {
            id: user.id.to_string(),
            name: user.name,
            email: user.email,
            role: user.role,
        }),
    ))
}
