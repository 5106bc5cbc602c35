use std::path::PathBuf;

use sea_orm::Database;
use tracing::info;

use labdesk_api::config::ApiConfig;
use labdesk_api::infra::files::DiskFileStore;
use labdesk_api::infra::mail::HttpMailer;
use labdesk_api::router::build_router;
use labdesk_api::state::AppState;
use labdesk_core::tracing::init_tracing;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = ApiConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let redis_cfg = deadpool_redis::Config::from_url(&config.redis_url);
    let redis = redis_cfg
        .create_pool(Some(deadpool_redis::Runtime::Tokio1))
        .expect("failed to create Redis pool");

    let mailer = HttpMailer::new(
        config.mail_api_url.clone(),
        config.mail_api_key.clone(),
        config.mail_sender.clone(),
    );

    let files = DiskFileStore {
        dir: PathBuf::from(&config.report_dir),
        public_base_url: config.report_base_url.clone(),
    };

    let state = AppState {
        db,
        redis,
        jwt_secret: config.jwt_secret,
        admin_email: config.admin_email,
        admin_password: config.admin_password,
        mailer,
        files,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.api_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("api service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
