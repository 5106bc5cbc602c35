/// API service configuration loaded from environment variables.
#[derive(Debug)]
pub struct ApiConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Redis connection URL (OTP challenge cache).
    pub redis_url: String,
    /// HMAC secret for signing session tokens.
    pub jwt_secret: String,
    /// Super-admin login email. Matching is case-insensitive.
    pub admin_email: String,
    /// Super-admin login secret. The bypass has no rate limiting.
    pub admin_password: String,
    /// Transactional-mail HTTP endpoint. Unset means log-only delivery
    /// (local development). Env var: `MAIL_API_URL`.
    pub mail_api_url: Option<String>,
    /// Bearer key for the mail endpoint. Env var: `MAIL_API_KEY`.
    pub mail_api_key: String,
    /// Sender address on outgoing mail. Env var: `MAIL_SENDER`.
    pub mail_sender: String,
    /// Directory report files are written to. Env var: `REPORT_DIR`.
    pub report_dir: String,
    /// Public URL prefix for stored report files. Env var: `REPORT_BASE_URL`.
    pub report_base_url: String,
    /// TCP port to listen on (default 3100). Env var: `API_PORT`.
    pub api_port: u16,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            redis_url: std::env::var("REDIS_URL").expect("REDIS_URL"),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET"),
            admin_email: std::env::var("ADMIN_EMAIL").expect("ADMIN_EMAIL"),
            admin_password: std::env::var("ADMIN_PASSWORD").expect("ADMIN_PASSWORD"),
            mail_api_url: std::env::var("MAIL_API_URL").ok(),
            mail_api_key: std::env::var("MAIL_API_KEY").unwrap_or_default(),
            mail_sender: std::env::var("MAIL_SENDER")
                .unwrap_or_else(|_| "no-reply@labdesk.example".to_owned()),
            report_dir: std::env::var("REPORT_DIR")
                .unwrap_or_else(|_| "./data/reports".to_owned()),
            report_base_url: std::env::var("REPORT_BASE_URL")
                .unwrap_or_else(|_| "/reports".to_owned()),
            api_port: std::env::var("API_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3100),
        }
    }
}
