use chrono::{Duration, Utc};

use labdesk_api::domain::otp::OtpChallengeStore;
use labdesk_api::domain::types::{OtpChallenge, PendingRegistration};
use labdesk_api::error::ApiError;
use labdesk_api::usecase::register::{
    RequestRegistrationInput, RequestRegistrationUseCase, VerifyRegistrationInput,
    VerifyRegistrationUseCase,
};
use labdesk_domain::user::UserRole;

use crate::helpers::{MemoryChallengeCache, MockMailer, MockUserRepo, test_customer};

fn request_input(email: &str) -> RequestRegistrationInput {
    RequestRegistrationInput {
        name: "Alice".to_owned(),
        email: email.to_owned(),
        password: "correct horse".to_owned(),
        phone: "+91 98765-43210".to_owned(),
    }
}

#[tokio::test]
async fn should_issue_challenge_and_send_code_on_registration() {
    let mailer = MockMailer::working();
    let sent = mailer.sent_handle();
    let cache = MemoryChallengeCache::new();
    let entries = cache.entries_handle();

    let usecase = RequestRegistrationUseCase {
        users: MockUserRepo::empty(),
        challenges: OtpChallengeStore { cache },
        mailer,
    };
    usecase.execute(request_input("Alice@Gmail.com")).await.unwrap();

    // The email is normalized before it keys the challenge.
    let entries = entries.lock().unwrap();
    let challenge = entries.get("alice@gmail.com").expect("challenge stored");
    assert_eq!(challenge.code.len(), 6);
    assert!(challenge.code.chars().all(|c| c.is_ascii_digit()));
    // The cached payload carries a hash, never the plaintext password.
    assert!(challenge.payload.password_hash.starts_with("$argon2"));

    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "alice@gmail.com");
    assert_eq!(sent[0].1, challenge.code);
}

#[tokio::test]
async fn should_reject_duplicate_email_before_issuing_challenge() {
    let existing = test_customer("alice@gmail.com", "9876543210", "pw");
    let mailer = MockMailer::working();
    let sent = mailer.sent_handle();
    let cache = MemoryChallengeCache::new();
    let entries = cache.entries_handle();

    let usecase = RequestRegistrationUseCase {
        users: MockUserRepo::new(vec![existing]),
        challenges: OtpChallengeStore { cache },
        mailer,
    };
    let result = usecase.execute(request_input("alice@gmail.com")).await;

    assert!(matches!(result, Err(ApiError::DuplicateEmail)));
    assert!(entries.lock().unwrap().is_empty());
    assert!(sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_discard_challenge_when_mail_send_fails() {
    let cache = MemoryChallengeCache::new();
    let entries = cache.entries_handle();

    let usecase = RequestRegistrationUseCase {
        users: MockUserRepo::empty(),
        challenges: OtpChallengeStore { cache },
        mailer: MockMailer::failing(),
    };
    let result = usecase.execute(request_input("alice@gmail.com")).await;

    assert!(matches!(result, Err(ApiError::MailDelivery)));
    // No challenge survives whose code the user never received.
    assert!(entries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_registration_with_missing_fields() {
    let usecase = RequestRegistrationUseCase {
        users: MockUserRepo::empty(),
        challenges: OtpChallengeStore {
            cache: MemoryChallengeCache::new(),
        },
        mailer: MockMailer::working(),
    };
    let mut input = request_input("alice@gmail.com");
    input.name = "   ".to_owned();
    let result = usecase.execute(input).await;
    assert!(matches!(result, Err(ApiError::MissingData)));
}

#[tokio::test]
async fn should_complete_registration_end_to_end() {
    let mailer = MockMailer::working();
    let sent = mailer.sent_handle();
    let cache = MemoryChallengeCache::new();
    let entries = cache.entries_handle();
    let users = MockUserRepo::empty();
    let users_handle = users.users_handle();

    let request = RequestRegistrationUseCase {
        users,
        challenges: OtpChallengeStore { cache },
        mailer,
    };
    request.execute(request_input("alice@gmail.com")).await.unwrap();
    let code = sent.lock().unwrap()[0].1.clone();

    let verify = VerifyRegistrationUseCase {
        users: MockUserRepo {
            users: users_handle.clone(),
        },
        challenges: OtpChallengeStore {
            cache: MemoryChallengeCache {
                entries: entries.clone(),
            },
        },
    };

    // Wrong code: rejected, challenge stays redeemable.
    let wrong = verify
        .execute(VerifyRegistrationInput {
            email: "alice@gmail.com".to_owned(),
            code: "000000".to_owned(),
        })
        .await;
    assert!(matches!(wrong, Err(ApiError::OtpMismatch)));
    assert!(entries.lock().unwrap().contains_key("alice@gmail.com"));
    assert!(users_handle.lock().unwrap().is_empty());

    // Right code: user persisted, challenge destroyed.
    let user = verify
        .execute(VerifyRegistrationInput {
            email: "alice@gmail.com".to_owned(),
            code: code.clone(),
        })
        .await
        .unwrap();
    assert_eq!(user.email, "alice@gmail.com");
    assert_eq!(user.role, UserRole::Customer);
    assert_eq!(users_handle.lock().unwrap().len(), 1);
    assert!(entries.lock().unwrap().is_empty());

    // Single-use: redeeming again finds nothing.
    let again = verify
        .execute(VerifyRegistrationInput {
            email: "alice@gmail.com".to_owned(),
            code,
        })
        .await;
    assert!(matches!(again, Err(ApiError::OtpNotFound)));
}

#[tokio::test]
async fn should_fail_verification_after_expiry() {
    let cache = MemoryChallengeCache::new();
    let entries = cache.entries_handle();
    entries.lock().unwrap().insert(
        "alice@gmail.com".to_owned(),
        OtpChallenge {
            code: "123456".to_owned(),
            payload: PendingRegistration {
                name: "Alice".to_owned(),
                email: "alice@gmail.com".to_owned(),
                password_hash: "$argon2id$stub".to_owned(),
                phone: "9876543210".to_owned(),
            },
            expires_at: Utc::now() - Duration::seconds(5),
        },
    );

    let verify = VerifyRegistrationUseCase {
        users: MockUserRepo::empty(),
        challenges: OtpChallengeStore { cache },
    };
    let result = verify
        .execute(VerifyRegistrationInput {
            email: "alice@gmail.com".to_owned(),
            code: "123456".to_owned(),
        })
        .await;

    assert!(matches!(result, Err(ApiError::OtpExpired)));
    // The stale entry was removed as a side effect.
    assert!(entries.lock().unwrap().is_empty());
}
