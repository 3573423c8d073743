use serde::Deserialize;
use tracing::warn;

/// Fallback signing secret used when `JWT_SECRET` is unset. Kept on purpose
/// to match the deployed behavior; a startup warning flags it.
pub const DEFAULT_JWT_SECRET: &str = "your-secret-key";

pub const DEFAULT_ADMIN_EMAIL: &str = "admin@upmanila.edu";
pub const DEFAULT_ADMIN_PASSWORD: &str = "Admin@123";

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_hours: i64,
}

/// Credentials for the admin account seeded at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct BootstrapConfig {
    pub admin_email: String,
    pub admin_password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub bootstrap: BootstrapConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET").unwrap_or_else(|_| {
                warn!("JWT_SECRET not set, using built-in fallback secret");
                DEFAULT_JWT_SECRET.into()
            }),
            ttl_hours: std::env::var("JWT_TTL_HOURS")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(24),
        };
        let bootstrap = BootstrapConfig {
            admin_email: std::env::var("ADMIN_EMAIL")
                .unwrap_or_else(|_| DEFAULT_ADMIN_EMAIL.into()),
            admin_password: std::env::var("ADMIN_PASSWORD")
                .unwrap_or_else(|_| DEFAULT_ADMIN_PASSWORD.into()),
        };
        Ok(Self {
            database_url,
            jwt,
            bootstrap,
        })
    }
}
