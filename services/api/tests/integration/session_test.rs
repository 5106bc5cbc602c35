use jsonwebtoken::{EncodingKey, Header, encode};
use std::time::{SystemTime, UNIX_EPOCH};

use labdesk_api::error::ApiError;
use labdesk_api::usecase::token::{
    AuthenticateUseCase, SessionClaims, issue_session_token,
};
use labdesk_domain::principal::{SUPER_ADMIN_NAME, Subject};
use labdesk_domain::user::UserRole;

use crate::helpers::{MockUserRepo, TEST_ADMIN_EMAIL, TEST_JWT_SECRET, test_customer};

fn authenticate_usecase(users: MockUserRepo) -> AuthenticateUseCase<MockUserRepo> {
    AuthenticateUseCase {
        users,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
        admin_email: TEST_ADMIN_EMAIL.to_owned(),
    }
}

fn raw_token(sub: &str, role: u8, exp: u64, secret: &str) -> String {
    let claims = SessionClaims {
        sub: sub.to_owned(),
        role,
        exp,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

#[tokio::test]
async fn should_resolve_user_principal_from_valid_token() {
    let user = test_customer("alice@gmail.com", "9876543210", "pw");
    let (token, _) =
        issue_session_token(Subject::User(user.id), user.role, TEST_JWT_SECRET).unwrap();

    let usecase = authenticate_usecase(MockUserRepo::new(vec![user.clone()]));
    let principal = usecase.execute(&token).await.unwrap();

    assert_eq!(principal.subject, Subject::User(user.id));
    assert_eq!(principal.name, user.name);
    assert_eq!(principal.email, user.email);
    assert_eq!(principal.role, UserRole::Customer);
}

#[tokio::test]
async fn should_synthesize_super_admin_without_store_lookup() {
    let (token, _) =
        issue_session_token(Subject::SuperAdmin, UserRole::Admin, TEST_JWT_SECRET).unwrap();

    // The empty store proves no lookup happens for the sentinel.
    let usecase = authenticate_usecase(MockUserRepo::empty());
    let principal = usecase.execute(&token).await.unwrap();

    assert_eq!(principal.subject, Subject::SuperAdmin);
    assert_eq!(principal.name, SUPER_ADMIN_NAME);
    assert_eq!(principal.role, UserRole::Admin);
}

#[tokio::test]
async fn should_reject_expired_token_distinctly() {
    let user = test_customer("alice@gmail.com", "9876543210", "pw");
    // Past the 60s validation leeway.
    let token = raw_token(&user.id.to_string(), 0, now_secs() - 120, TEST_JWT_SECRET);

    let usecase = authenticate_usecase(MockUserRepo::new(vec![user]));
    let result = usecase.execute(&token).await;
    assert!(matches!(result, Err(ApiError::ExpiredToken)));
}

#[tokio::test]
async fn should_reject_token_signed_with_wrong_secret() {
    let user = test_customer("alice@gmail.com", "9876543210", "pw");
    let token = raw_token(&user.id.to_string(), 0, now_secs() + 3600, "other-secret");

    let usecase = authenticate_usecase(MockUserRepo::new(vec![user]));
    let result = usecase.execute(&token).await;
    assert!(matches!(result, Err(ApiError::MalformedToken)));
}

#[tokio::test]
async fn should_reject_garbage_token() {
    let usecase = authenticate_usecase(MockUserRepo::empty());
    let result = usecase.execute("not-a-jwt").await;
    assert!(matches!(result, Err(ApiError::MalformedToken)));
}

#[tokio::test]
async fn should_reject_unparseable_subject() {
    let token = raw_token("neither-sentinel-nor-uuid", 0, now_secs() + 3600, TEST_JWT_SECRET);

    let usecase = authenticate_usecase(MockUserRepo::empty());
    let result = usecase.execute(&token).await;
    assert!(matches!(result, Err(ApiError::MalformedToken)));
}

#[tokio::test]
async fn should_reject_stale_subject_when_account_deleted() {
    let user = test_customer("alice@gmail.com", "9876543210", "pw");
    let (token, _) =
        issue_session_token(Subject::User(user.id), user.role, TEST_JWT_SECRET).unwrap();

    // Token is structurally valid; the account is gone.
    let usecase = authenticate_usecase(MockUserRepo::empty());
    let result = usecase.execute(&token).await;
    assert!(matches!(result, Err(ApiError::StaleSubject)));
}
