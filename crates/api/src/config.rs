//! Environment-driven configuration, read once at startup.

/// Runtime configuration.
///
/// Everything comes from the process environment; only the port has a
/// default beyond "unset".
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub jwt_secret: String,
    /// Controls cookie attributes: `Secure; SameSite=None` in production,
    /// `SameSite=Lax` otherwise.
    pub production: bool,
    pub allowed_origins: Vec<String>,
    pub stripe_secret_key: Option<String>,
    pub mail_from: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(5000);

        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set; using insecure dev default");
            "dev-secret".to_string()
        });

        let production = std::env::var("APP_ENV")
            .map(|v| v == "production")
            .unwrap_or(false);

        let allowed_origins = std::env::var("ALLOWED_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let stripe_secret_key = std::env::var("STRIPE_SECRET_KEY").ok();

        let mail_from = std::env::var("MAIL_FROM")
            .unwrap_or_else(|_| "no-reply@assetdesk.local".to_string());

        Self {
            port,
            jwt_secret,
            production,
            allowed_origins,
            stripe_secret_key,
            mail_from,
        }
    }
}
