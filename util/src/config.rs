//! Global application configuration manager.
//!
//! `AppConfig` is a lazily initialized, globally accessible singleton containing
//! runtime configuration values loaded from environment variables. It provides
//! thread-safe access and mutation for testing or overrides in runtime environments.

use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::sync::{OnceLock, RwLock};
use tracing::warn;

/// Secret used outside production when `JWT_SECRET` is not provided.
const DEV_JWT_SECRET: &str = "campus-connect-dev-secret";

/// Upper bound on any attendance session length (one week).
pub const ATTENDANCE_DURATION_CEILING_MINUTES: i64 = 7 * 24 * 60;

/// Represents the complete application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    pub database_path: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_duration_minutes: u64,
    pub attendance_default_duration_minutes: i64,
    pub attendance_max_duration_minutes: i64,
    pub attendance_app_id: String,
}

/// Lazily-initialized, thread-safe singleton instance of `AppConfig`.
static CONFIG_INSTANCE: OnceLock<RwLock<AppConfig>> = OnceLock::new();

impl AppConfig {
    /// Loads the configuration from `.env` and environment variables.
    ///
    /// Panics only when `APP_ENV=production` and `JWT_SECRET` is missing.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) if app_env.eq_ignore_ascii_case("production") => {
                panic!("JWT_SECRET is required in production")
            }
            Err(_) => DEV_JWT_SECRET.into(),
        };

        Self {
            env: app_env,
            project_name: env::var("PROJECT_NAME").unwrap_or_else(|_| "campus-connect".into()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "api=info,services=info".into()),
            log_file: env::var("LOG_FILE").unwrap_or_else(|_| "api.log".into()),
            log_to_stdout: env::var("LOG_TO_STDOUT").unwrap_or_else(|_| "false".into()) == "true",
            database_path: env::var("DATABASE_PATH").unwrap_or_else(|_| "data/campus.db".into()),
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into()),
            port: parse_or("PORT", 5000),
            jwt_secret,
            jwt_duration_minutes: parse_or("JWT_DURATION_MINUTES", 60),
            attendance_default_duration_minutes: parse_or(
                "ATTENDANCE_DEFAULT_DURATION_MINUTES",
                15,
            ),
            attendance_max_duration_minutes: clamp_duration(parse_or(
                "ATTENDANCE_MAX_DURATION_MINUTES",
                240,
            )),
            attendance_app_id: env::var("ATTENDANCE_APP_ID")
                .unwrap_or_else(|_| "CAMPUS-ATTENDANCE".into()),
        }
    }

    /// Returns a shared reference to the global configuration.
    ///
    /// # Panics
    /// Panics if the lock cannot be acquired.
    pub fn global() -> std::sync::RwLockReadGuard<'static, AppConfig> {
        CONFIG_INSTANCE
            .get_or_init(|| RwLock::new(AppConfig::from_env()))
            .read()
            .expect("Failed to acquire AppConfig read lock")
    }

    /// Resets the configuration by reloading from environment variables.
    ///
    /// Useful in tests to clear overrides.
    pub fn reset() {
        if let Some(lock) = CONFIG_INSTANCE.get() {
            if let Ok(mut guard) = lock.write() {
                *guard = AppConfig::from_env();
            }
        }
    }

    fn set_field<F>(setter: F)
    where
        F: FnOnce(&mut AppConfig),
    {
        let lock = CONFIG_INSTANCE.get_or_init(|| RwLock::new(AppConfig::from_env()));
        let mut guard = lock
            .write()
            .expect("Failed to acquire AppConfig write lock");
        setter(&mut guard);
    }

    // --- Per-field setters below ---

    pub fn set_env(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.env = value.into());
    }

    pub fn set_log_to_stdout(value: bool) {
        AppConfig::set_field(|cfg| cfg.log_to_stdout = value);
    }

    pub fn set_database_path(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.database_path = value.into());
    }

    pub fn set_jwt_secret(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.jwt_secret = value.into());
    }

    pub fn set_jwt_duration_minutes(value: impl Into<u64>) {
        AppConfig::set_field(|cfg| cfg.jwt_duration_minutes = value.into());
    }

    pub fn set_attendance_default_duration_minutes(value: i64) {
        AppConfig::set_field(|cfg| cfg.attendance_default_duration_minutes = value);
    }

    pub fn set_attendance_max_duration_minutes(value: i64) {
        AppConfig::set_field(|cfg| cfg.attendance_max_duration_minutes = clamp_duration(value));
    }

    pub fn set_attendance_app_id(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.attendance_app_id = value.into());
    }
}

/// Parses `key` from the environment, falling back to `default` when it is
/// missing or malformed.
fn parse_or<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value '{raw}': {e}; using default {default}");
            default
        }),
        Err(_) => default,
    }
}

fn clamp_duration(minutes: i64) -> i64 {
    if minutes > ATTENDANCE_DURATION_CEILING_MINUTES {
        warn!(
            "ATTENDANCE_MAX_DURATION_MINUTES={minutes} is above the ceiling; using {ATTENDANCE_DURATION_CEILING_MINUTES}"
        );
    }
    minutes.clamp(1, ATTENDANCE_DURATION_CEILING_MINUTES)
}

// --- Free accessors ---

pub fn env() -> String {
    AppConfig::global().env.clone()
}

pub fn project_name() -> String {
    AppConfig::global().project_name.clone()
}

pub fn log_level() -> String {
    AppConfig::global().log_level.clone()
}

pub fn log_file() -> String {
    AppConfig::global().log_file.clone()
}

pub fn log_to_stdout() -> bool {
    AppConfig::global().log_to_stdout
}

pub fn database_path() -> String {
    AppConfig::global().database_path.clone()
}

pub fn host() -> String {
    AppConfig::global().host.clone()
}

pub fn port() -> u16 {
    AppConfig::global().port
}

pub fn jwt_secret() -> String {
    AppConfig::global().jwt_secret.clone()
}

pub fn jwt_duration_minutes() -> u64 {
    AppConfig::global().jwt_duration_minutes
}

pub fn attendance_default_duration_minutes() -> i64 {
    AppConfig::global().attendance_default_duration_minutes
}

pub fn attendance_max_duration_minutes() -> i64 {
    AppConfig::global().attendance_max_duration_minutes
}

pub fn attendance_app_id() -> String {
    AppConfig::global().attendance_app_id.clone()
}
