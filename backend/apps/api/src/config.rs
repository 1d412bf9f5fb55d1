//! Server Configuration
//!
//! Everything is read from the environment (after `.env` is loaded) into
//! the per-crate config structs. Parsing is done over a lookup function so
//! it can be tested without touching the process environment.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, bail};
use attendance::{AttendanceConfig, CalendarPolicy, MAX_QR_TTL};
use auth::AuthConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:31113";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:40922,http://127.0.0.1:40922";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub bind_addr: SocketAddr,
    pub frontend_origins: Vec<String>,
    pub auth: AuthConfig,
    pub attendance: AttendanceConfig,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let database_max_connections: u32 = match var("DATABASE_MAX_CONNECTIONS") {
            Some(v) => v
                .trim()
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a positive integer")?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let bind_addr: SocketAddr = var("BIND_ADDR")
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .trim()
            .parse()
            .context("BIND_ADDR must be host:port")?;

        let frontend_origins = var("FRONTEND_ORIGINS")
            .as_deref()
            .unwrap_or(DEFAULT_FRONTEND_ORIGINS)
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Self {
            database_url,
            database_max_connections,
            bind_addr,
            frontend_origins,
            auth: auth_config(&var)?,
            attendance: attendance_config(&var)?,
        })
    }
}

fn auth_config(var: &impl Fn(&str) -> Option<String>) -> anyhow::Result<AuthConfig> {
    let mut config = match var("SESSION_SECRET") {
        Some(secret_b64) => {
            let bytes = platform::crypto::from_base64(secret_b64.trim())
                .context("SESSION_SECRET must be base64")?;
            let secret: [u8; 32] = bytes
                .try_into()
                .map_err(|_| anyhow::anyhow!("SESSION_SECRET must decode to 32 bytes"))?;
            AuthConfig {
                session_secret: secret,
                ..AuthConfig::default()
            }
        }
        None if cfg!(debug_assertions) => {
            tracing::warn!("SESSION_SECRET not set, using a random secret for this process");
            AuthConfig::development()
        }
        None => bail!("SESSION_SECRET must be set in production"),
    };

    config.password_pepper = var("PASSWORD_PEPPER").map(String::into_bytes);
    Ok(config)
}

fn attendance_config(var: &impl Fn(&str) -> Option<String>) -> anyhow::Result<AttendanceConfig> {
    let mut config = AttendanceConfig::default();

    if let Some(v) = var("ATTENDANCE_UTC_OFFSET") {
        let offset = CalendarPolicy::parse_offset(&v)
            .with_context(|| format!("ATTENDANCE_UTC_OFFSET `{}` is not like +05:30", v))?;
        config.calendar = CalendarPolicy::new(offset);
    }

    if let Some(v) = var("SWEEP_AT") {
        config.sweep_at = AttendanceConfig::parse_sweep_at(&v)
            .with_context(|| format!("SWEEP_AT `{}` is not like 23:59", v))?;
    }

    if let Some(v) = var("QR_TTL_SECS") {
        let secs: u64 = v.trim().parse().context("QR_TTL_SECS must be an integer")?;
        if secs == 0 || secs > MAX_QR_TTL.as_secs() {
            bail!(
                "QR_TTL_SECS must be between 1 and {}",
                MAX_QR_TTL.as_secs()
            );
        }
        config.qr_ttl = Duration::from_secs(secs);
    }

    Ok(config)
}
