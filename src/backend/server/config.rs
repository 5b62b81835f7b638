/**
 * Server Configuration
 *
 * Configuration is read from environment variables (a `.env` file is loaded
 * by the binary first), with defaults suitable for local development.
 *
 * | Variable                 | Default                           |
 * |--------------------------|-----------------------------------|
 * | `SERVER_ADDR`            | `0.0.0.0`                         |
 * | `SERVER_PORT`            | `4000`                            |
 * | `DATABASE_URL`           | `sqlite://snippetbox.db?mode=rwc` |
 * | `SESSION_LIFETIME_HOURS` | `12`                              |
 * | `SESSION_SECURE_COOKIE`  | `false`                           |
 * | `BCRYPT_COST`            | `12`                              |
 *
 * A variable that is set but cannot be parsed is an error rather than a
 * silent fallback to the default.
 */

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use thiserror::Error;
use tower_sessions_sqlx_store::SqliteStore;

use crate::backend::error::AppError;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://snippetbox.db?mode=rwc";

/// Cost bounds accepted by bcrypt.
pub const MIN_BCRYPT_COST: u32 = 4;
pub const MAX_BCRYPT_COST: u32 = 31;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub session_lifetime: time::Duration,
    pub secure_cookies: bool,
    pub bcrypt_cost: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 4000),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            session_lifetime: time::Duration::hours(12),
            secure_cookies: false,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host: IpAddr = parse_var(&lookup, "SERVER_ADDR")?.unwrap_or(defaults.addr.ip());
        let port: u16 = parse_var(&lookup, "SERVER_PORT")?.unwrap_or(defaults.addr.port());
        let lifetime_hours: i64 = parse_var(&lookup, "SESSION_LIFETIME_HOURS")?
            .unwrap_or(defaults.session_lifetime.whole_hours());
        if lifetime_hours <= 0 {
            return Err(ConfigError::InvalidValue {
                name: "SESSION_LIFETIME_HOURS",
                value: lifetime_hours.to_string(),
            });
        }
        let bcrypt_cost: u32 = parse_var(&lookup, "BCRYPT_COST")?.unwrap_or(defaults.bcrypt_cost);
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                name: "BCRYPT_COST",
                value: bcrypt_cost.to_string(),
            });
        }

        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| {
            tracing::warn!("DATABASE_URL not set, using {}", DEFAULT_DATABASE_URL);
            defaults.database_url.clone()
        });

        Ok(Self {
            addr: SocketAddr::new(host, port),
            database_url,
            session_lifetime: time::Duration::hours(lifetime_hours),
            secure_cookies: parse_var(&lookup, "SESSION_SECURE_COOKIE")?
                .unwrap_or(defaults.secure_cookies),
            bcrypt_cost,
        })
    }
}

fn parse_var<F, T>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { name, value }),
    }
}

/// Open the SQLite pool and bring the schema up to date.
///
/// An in-memory database exists only as long as its connection, so those
/// URLs get a single connection that is never recycled.
pub async fn load_database(database_url: &str) -> Result<SqlitePool, AppError> {
    tracing::info!("Connecting to database...");

    let options = if database_url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(8)
    };
    let pool = options.connect(database_url).await?;

    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(&pool).await?;
    SqliteStore::new(pool.clone()).migrate().await?;
    tracing::info!("Database ready");

    Ok(pool)
}
