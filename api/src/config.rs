use std::env;

/// Environment name that enables development-only behavior
pub const DEVELOPMENT: &str = "development";

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_BODY_LIMIT: usize = 500 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Deployment environment name (`APP_ENV`), reported by the health endpoint
    pub environment: String,
    /// Set only when `APP_ENV` is explicitly `development`
    pub dev_mode: bool,
    /// Maximum accepted request body size in bytes
    pub body_limit: usize,
}

impl Config {
    pub fn from_env() -> Self {
        // Environment-specific file first; dotenvy never overrides variables
        // that are already set, so it wins over the generic `.env`.
        let env_file = match env::var("APP_ENV").as_deref() {
            Ok("prod") => ".env.production",
            _ => ".env.development",
        };
        dotenvy::from_filename(env_file).ok();
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup, applying defaults
    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let app_env = lookup("APP_ENV");

        Self {
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            dev_mode: app_env.as_deref() == Some(DEVELOPMENT),
            environment: app_env.unwrap_or_else(|| DEVELOPMENT.to_string()),
            body_limit: lookup("JSON_BODY_LIMIT")
                .and_then(|l| l.parse().ok())
                .unwrap_or(DEFAULT_BODY_LIMIT),
        }
    }

    /// Whether fault responses should carry stack traces.
    /// An unset `APP_ENV` reports "development" but does not enable this.
    pub fn is_development(&self) -> bool {
        self.dev_mode
    }
}
