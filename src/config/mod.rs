use std::env;

/// Default token-signing secret. Deliberately weak; deployments must set
/// JWT_SECRET before going anywhere near production.
pub const DEFAULT_JWT_SECRET: &str = "dev_secret_change_me";

/// Process-wide configuration, read once at startup and passed explicitly
/// through `AppState` so tests can construct isolated instances.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            database_url: "sqlite://data.sqlite".to_string(),
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            jwt_expiry_hours: 8,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = env::var("PORT") {
            config.port = v.parse().unwrap_or(config.port);
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            config.database_url = v;
        }
        if let Ok(v) = env::var("JWT_SECRET") {
            config.jwt_secret = v;
        }
        if let Ok(v) = env::var("JWT_EXPIRY_HOURS") {
            config.jwt_expiry_hours = v.parse().unwrap_or(config.jwt_expiry_hours);
        }

        config
    }
}
