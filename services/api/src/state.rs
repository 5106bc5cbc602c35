use deadpool_redis::Pool as RedisPool;
use sea_orm::DatabaseConnection;

use crate::domain::otp::OtpChallengeStore;
use crate::infra::cache::RedisChallengeCache;
use crate::infra::db::{DbBookingRepository, DbLabTestRepository, DbUserRepository};
use crate::infra::files::DiskFileStore;
use crate::infra::mail::HttpMailer;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub redis: RedisPool,
    pub jwt_secret: String,
    pub admin_email: String,
    pub admin_password: String,
    pub mailer: HttpMailer,
    pub files: DiskFileStore,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn lab_test_repo(&self) -> DbLabTestRepository {
        DbLabTestRepository {
            db: self.db.clone(),
        }
    }

    pub fn booking_repo(&self) -> DbBookingRepository {
        DbBookingRepository {
            db: self.db.clone(),
        }
    }

    pub fn otp_store(&self) -> OtpChallengeStore<RedisChallengeCache> {
        OtpChallengeStore {
            cache: RedisChallengeCache {
                pool: self.redis.clone(),
            },
        }
    }

    pub fn mailer(&self) -> HttpMailer {
        self.mailer.clone()
    }

    pub fn file_store(&self) -> DiskFileStore {
        self.files.clone()
    }
}
