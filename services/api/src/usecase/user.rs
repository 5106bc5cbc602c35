//! Profile updates and admin-only account removal.

use uuid::Uuid;

use labdesk_domain::principal::Principal;

use crate::domain::repository::UserRepository;
use crate::error::ApiError;

pub struct UpdateProfileInput {
    pub name: Option<String>,
    pub phone: Option<String>,
}

pub struct UpdateProfileUseCase<R: UserRepository> {
    pub users: R,
}

impl<R: UserRepository> UpdateProfileUseCase<R> {
    pub async fn execute(
        &self,
        principal: &Principal,
        input: UpdateProfileInput,
    ) -> Result<(), ApiError> {
        // The synthetic admin has no record to update.
        let user_id = principal.user_id().ok_or(ApiError::Forbidden)?;
        if input.name.is_none() && input.phone.is_none() {
            return Err(ApiError::MissingData);
        }
        self.users
            .update_profile(user_id, input.name.as_deref(), input.phone.as_deref())
            .await
    }
}

pub struct DeleteUserUseCase<R: UserRepository> {
    pub users: R,
}

impl<R: UserRepository> DeleteUserUseCase<R> {
    /// Hard delete; the only path that removes a user. Admin only.
    pub async fn execute(&self, principal: &Principal, id: Uuid) -> Result<(), ApiError> {
        if !principal.is_admin() {
            return Err(ApiError::Forbidden);
        }
        if !self.users.delete(id).await? {
            return Err(ApiError::UserNotFound);
        }
        Ok(())
    }
}
