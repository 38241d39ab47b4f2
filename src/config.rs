use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::{env, path::PathBuf, str::FromStr};

#[derive(Clone)]
pub struct Config {
    pub jwt_secret: String,
    pub server_addr: String,
    pub access_token_ttl: usize,

    // Rate limiting
    pub rate_login_per_min: u32,
    pub rate_protected_per_min: u32,

    pub api_prefix: String,

    pub admin_email: String,
    /// Artificial latency before a sign-in resolves
    pub login_delay_ms: u64,
    /// Where the signed-in identity survives restarts; in memory when unset
    pub session_file: Option<PathBuf>,
    pub payslip_months: u32,
    pub log_dir: String,
}

fn parse_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw:?}")),
        Err(_) => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string()),
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            access_token_ttl: parse_or("ACCESS_TOKEN_TTL", 900)?, // default 15 min

            rate_login_per_min: parse_or("RATE_LOGIN_PER_MIN", 60)?,
            rate_protected_per_min: parse_or("RATE_PROTECTED_PER_MIN", 1000)?,

            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),

            admin_email: env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@dayflow.com".to_string()),
            login_delay_ms: parse_or("LOGIN_DELAY_MS", 800)?,
            session_file: env::var("SESSION_FILE")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            payslip_months: parse_or("PAYSLIP_MONTHS", 3)?,
            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string()),
        })
    }
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Self {
        Self {
            jwt_secret: "test-secret".to_string(),
            server_addr: "127.0.0.1:0".to_string(),
            access_token_ttl: 900,
            rate_login_per_min: 1000,
            rate_protected_per_min: 1000,
            api_prefix: "/api".to_string(),
            admin_email: "admin@dayflow.com".to_string(),
            login_delay_ms: 0,
            session_file: None,
            payslip_months: 3,
            log_dir: "logs".to_string(),
        }
    }
}
