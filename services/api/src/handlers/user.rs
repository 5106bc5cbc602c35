use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::extract::BearerIdentity;
use crate::state::AppState;
use crate::usecase::user::{DeleteUserUseCase, UpdateProfileInput, UpdateProfileUseCase};

// ── PATCH /users/@me ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateMeRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
}

pub async fn update_me(
    BearerIdentity(principal): BearerIdentity,
    State(state): State<AppState>,
    Json(body): Json<UpdateMeRequest>,
) -> Result<StatusCode, ApiError> {
    let usecase = UpdateProfileUseCase {
        users: state.user_repo(),
    };
    usecase
        .execute(
            &principal,
            UpdateProfileInput {
                name: body.name,
                phone: body.phone,
            },
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── DELETE /users/{id} ───────────────────────────────────────────────────────

pub async fn delete_user(
    BearerIdentity(principal): BearerIdentity,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    // A malformed id reads the same as an absent user.
    let id: Uuid = id.parse().map_err(|_| ApiError::UserNotFound)?;
    let usecase = DeleteUserUseCase {
        users: state.user_repo(),
    };
    usecase.execute(&principal, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
