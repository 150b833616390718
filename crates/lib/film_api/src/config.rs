//! API server configuration.

use std::fmt::Display;
use std::ops::RangeInclusive;
use std::str::FromStr;

use chrono::Duration;
use film_core::auth::AuthConfig;
use film_core::auth::password::DEFAULT_COST;
use thiserror::Error;

/// Signing secret used when `APP_ENV=dev` and none is configured.
const DEV_JWT_SECRET: &str = "dev-secret-change-me";

/// Accepted ranges for numeric settings.
const ACCESS_TTL_MINUTES: RangeInclusive<i64> = 1..=24 * 60;
const REFRESH_TTL_DAYS: RangeInclusive<i64> = 1..=365;
const LEEWAY_SECONDS: RangeInclusive<i64> = 0..=300;
const BCRYPT_COST: RangeInclusive<u32> = 4..=31;

/// Deployment environment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Prod,
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dev" | "development" => Ok(Environment::Dev),
            "prod" | "production" => Ok(Environment::Prod),
            _ => Err(ConfigError::Invalid {
                var: "APP_ENV",
                value: s.to_string(),
            }),
        }
    }
}

/// Configuration errors. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set when APP_ENV=prod")]
    Missing(&'static str),

    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub environment: Environment,
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:8080").
    pub bind_addr: String,
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Token signing and lifetime settings.
    pub auth: AuthConfig,
    /// CORS origins; empty means any origin.
    pub allowed_origins: Vec<String>,
}

impl ApiConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable                 | Default                                      |
    /// |--------------------------|----------------------------------------------|
    /// | `APP_ENV`                | `dev`                                        |
    /// | `BIND_ADDR`              | `127.0.0.1:8080`                             |
    /// | `DATABASE_URL`           | `postgres://localhost:5432/film_inventory`   |
    /// | `JWT_ACCESS_SECRET`      | dev fallback; required in prod               |
    /// | `JWT_ACCESS_TTL_MINUTES` | `15`                                         |
    /// | `JWT_REFRESH_TTL_DAYS`   | `7`                                          |
    /// | `JWT_LEEWAY_SECONDS`     | `0`                                          |
    /// | `BCRYPT_COST`            | `10`                                         |
    /// | `ALLOWED_ORIGINS`        | any origin in dev; required in prod          |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ApiConfig::from_env`] but reading from an arbitrary source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let environment = match get("APP_ENV") {
            Some(raw) => raw.parse()?,
            None => Environment::Dev,
        };

        let jwt_secret = match (get("JWT_ACCESS_SECRET"), environment) {
            (Some(secret), _) => secret,
            (None, Environment::Dev) => {
                tracing::warn!("JWT_ACCESS_SECRET not set, using development secret");
                DEV_JWT_SECRET.to_string()
            }
            (None, Environment::Prod) => return Err(ConfigError::Missing("JWT_ACCESS_SECRET")),
        };

        let allowed_origins: Vec<String> = get("ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty() && o != "*")
                    .collect()
            })
            .unwrap_or_default();
        if environment == Environment::Prod && allowed_origins.is_empty() {
            return Err(ConfigError::Missing("ALLOWED_ORIGINS"));
        }

        let mut auth = AuthConfig::new(jwt_secret);
        auth.access_ttl = duration_in(
            &get,
            "JWT_ACCESS_TTL_MINUTES",
            15,
            ACCESS_TTL_MINUTES,
            Duration::try_minutes,
        )?;
        auth.refresh_ttl =
            duration_in(&get, "JWT_REFRESH_TTL_DAYS", 7, REFRESH_TTL_DAYS, Duration::try_days)?;
        auth.leeway =
            duration_in(&get, "JWT_LEEWAY_SECONDS", 0, LEEWAY_SECONDS, Duration::try_seconds)?;
        auth.bcrypt_cost = parse_in(&get, "BCRYPT_COST", DEFAULT_COST, BCRYPT_COST)?;

        Ok(Self {
            environment,
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| "127.0.0.1:8080".into()),
            database_url: get("DATABASE_URL")
                .unwrap_or_else(|| "postgres://localhost:5432/film_inventory".into()),
            auth,
            allowed_origins,
        })
    }

    /// Whether cookies should carry the `Secure` attribute.
    pub fn secure_cookies(&self) -> bool {
        self.environment == Environment::Prod
    }
}

/// Parse `var`, falling back to `default`, and require it to lie in `range`.
fn parse_in<T, G>(
    get: &G,
    var: &'static str,
    default: T,
    range: RangeInclusive<T>,
) -> Result<T, ConfigError>
where
    T: FromStr + PartialOrd + Display,
    G: Fn(&str) -> Option<String>,
{
    let Some(raw) = get(var) else {
        return Ok(default);
    };
    match raw.trim().parse::<T>() {
        Ok(value) if range.contains(&value) => Ok(value),
        _ => Err(ConfigError::Invalid {
            var,
            value: format!("{raw} (expected {}..={})", range.start(), range.end()),
        }),
    }
}

fn duration_in<G>(
    get: &G,
    var: &'static str,
    default: i64,
    range: RangeInclusive<i64>,
    unit: fn(i64) -> Option<Duration>,
) -> Result<Duration, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    let amount = parse_in(get, var, default, range)?;
    unit(amount).ok_or_else(|| ConfigError::Invalid {
        var,
        value: amount.to_string(),
    })
}
