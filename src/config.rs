use std::net::IpAddr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
    pub base_url: String,
    pub token_ttl: Duration,
    pub store_timeout: Duration,
    pub mail_timeout: Duration,
    pub unknown_email: UnknownEmailMode,
    pub log_level: String,
    pub smtp: Option<SmtpConfig>,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
    pub from: String,
}

/// How `/api/forgot-password` answers for an email with no account.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnknownEmailMode {
    /// 404 for unknown emails, 500 when dispatch fails.
    Reveal,
    /// Always the success message; misses and dispatch failures are only logged.
    Uniform,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_required = |key: &str| {
            lookup(key).ok_or_else(|| format!("Missing required environment variable: {key}"))
        };
        let env_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let database_url = env_required("DATABASE_URL")?;

        let host: IpAddr = env_or("PWRESET_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid PWRESET_HOST: {e}"))?;

        let port: u16 = env_or("PORT", "5000")
            .parse()
            .map_err(|e| format!("Invalid PORT: {e}"))?;

        let base_url = env_or("PWRESET_BASE_URL", &format!("http://localhost:{port}"))
            .trim_end_matches('/')
            .to_string();

        let token_ttl = secs(&env_or("PWRESET_TOKEN_TTL_SECS", "300"), "PWRESET_TOKEN_TTL_SECS")?;
        let store_timeout = secs(
            &env_or("PWRESET_STORE_TIMEOUT_SECS", "5"),
            "PWRESET_STORE_TIMEOUT_SECS",
        )?;
        let mail_timeout = secs(
            &env_or("PWRESET_MAIL_TIMEOUT_SECS", "10"),
            "PWRESET_MAIL_TIMEOUT_SECS",
        )?;

        let unknown_email = match env_or("PWRESET_UNKNOWN_EMAIL", "reveal").as_str() {
            "reveal" => UnknownEmailMode::Reveal,
            "uniform" => UnknownEmailMode::Uniform,
            other => return Err(format!("Invalid PWRESET_UNKNOWN_EMAIL: {other}")),
        };

        let log_level = env_or("PWRESET_LOG_LEVEL", "info");

        let smtp = match (lookup("EMAIL_USER"), lookup("EMAIL_PASS")) {
            (Some(user), Some(pass)) => Some(SmtpConfig {
                host: env_or("SMTP_HOST", "smtp.gmail.com"),
                port: env_or("SMTP_PORT", "587")
                    .parse()
                    .map_err(|e| format!("Invalid SMTP_PORT: {e}"))?,
                from: lookup("EMAIL_FROM").unwrap_or_else(|| user.clone()),
                user,
                pass,
            }),
            _ => None,
        };

        Ok(Config {
            database_url,
            host,
            port,
            base_url,
            token_ttl,
            store_timeout,
            mail_timeout,
            unknown_email,
            log_level,
            smtp,
        })
    }
}

fn secs(value: &str, key: &str) -> Result<Duration, String> {
    let n: u64 = value.parse().map_err(|e| format!("Invalid {key}: {e}"))?;
    if n == 0 {
        return Err(format!("Invalid {key}: must be greater than zero"));
    }
    Ok(Duration::from_secs(n))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = config_from(&[("DATABASE_URL", "postgres://localhost/pwreset")]).unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.base_url, "http://localhost:5000");
        assert_eq!(config.token_ttl, Duration::from_secs(300));
        assert_eq!(config.unknown_email, UnknownEmailMode::Reveal);
        assert!(config.smtp.is_none());
    }

    #[test]
    fn database_url_is_required() {
        let err = config_from(&[]).unwrap_err();
        assert!(err.contains("DATABASE_URL"));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://localhost/pwreset"),
            ("PWRESET_BASE_URL", "https://example.com/"),
        ])
        .unwrap();
        assert_eq!(config.base_url, "https://example.com");
    }

    #[test]
    fn smtp_needs_both_credentials() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://localhost/pwreset"),
            ("EMAIL_USER", "noreply@example.com"),
        ])
        .unwrap();
        assert!(config.smtp.is_none());

        let config = config_from(&[
            ("DATABASE_URL", "postgres://localhost/pwreset"),
            ("EMAIL_USER", "noreply@example.com"),
            ("EMAIL_PASS", "secret"),
        ])
        .unwrap();
        let smtp = config.smtp.unwrap();
        assert_eq!(smtp.host, "smtp.gmail.com");
        assert_eq!(smtp.port, 587);
        assert_eq!(smtp.from, "noreply@example.com");
    }

    #[test]
    fn rejects_bad_values() {
        assert!(config_from(&[("DATABASE_URL", "x"), ("PORT", "abc")]).is_err());
        assert!(config_from(&[("DATABASE_URL", "x"), ("PWRESET_TOKEN_TTL_SECS", "0")]).is_err());
        assert!(config_from(&[("DATABASE_URL", "x"), ("PWRESET_UNKNOWN_EMAIL", "maybe")]).is_err());
    }

    #[test]
    fn uniform_mode() {
        let config = config_from(&[("DATABASE_URL", "x"), ("PWRESET_UNKNOWN_EMAIL", "uniform")]).unwrap();
        assert_eq!(config.unknown_email, UnknownEmailMode::Uniform);
    }
}
