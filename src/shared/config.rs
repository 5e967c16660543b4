use std::env;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub enum SmtpConfig {
    /// Mailpit / MailHog style relay without credentials
    Local { host: String, port: u16 },
    Relay {
        server: String,
        username: String,
        password: String,
    },
}

#[derive(Debug, Clone)]
pub struct AuditConfig {
    pub queue_capacity: usize,
    pub flush_batch: usize,
    pub flush_interval: Duration,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 1024,
            flush_batch: 64,
            flush_interval: Duration::from_millis(500),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub rust_env: String,
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub redis_url: String,
    pub email_from: String,
    pub smtp: SmtpConfig,
    pub app_base_url: String,
    pub audit: AuditConfig,
    pub bootstrap_admin_email: Option<String>,
}

impl AppConfig {
    /// Loads `.env.{RUST_ENV}` (falling back to `.env`) and reads the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let rust_env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());

        let env_file = format!(".env.{}", rust_env);
        if dotenvy::from_filename(&env_file).is_err() {
            dotenvy::dotenv().ok();
        }

        Self::from_env()
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let rust_env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());

        let smtp = if rust_env == "test" {
            SmtpConfig::Local {
                host: optional("SMTP_HOST").unwrap_or_else(|| "localhost".to_string()),
                port: parse_or("SMTP_PORT", 1025)?,
            }
        } else {
            SmtpConfig::Relay {
                server: required("SMTP_SERVER")?,
                username: required("SMTP_USERNAME")?,
                password: required("SMTP_PASSWORD")?,
            }
        };

        let defaults = AuditConfig::default();
        let audit = AuditConfig {
            queue_capacity: parse_or("AUDIT_QUEUE_CAPACITY", defaults.queue_capacity)?,
            flush_batch: parse_or("AUDIT_FLUSH_BATCH", defaults.flush_batch)?,
            flush_interval: Duration::from_millis(parse_or(
                "AUDIT_FLUSH_INTERVAL_MS",
                defaults.flush_interval.as_millis() as u64,
            )?),
        };

        if audit.queue_capacity == 0 {
            return Err(ConfigError::Invalid {
                key: "AUDIT_QUEUE_CAPACITY",
                value: "0".to_string(),
            });
        }
        if audit.flush_batch == 0 {
            return Err(ConfigError::Invalid {
                key: "AUDIT_FLUSH_BATCH",
                value: "0".to_string(),
            });
        }

        let host = required("HOST")?;
        let port = parse_required("PORT")?;

        Ok(Self {
            app_base_url: optional("APP_BASE_URL")
                .unwrap_or_else(|| format!("http://{}:{}", host, port)),
            rust_env,
            database_url: required("DATABASE_URL")?,
            host,
            port,
            redis_url: required("REDIS_URL")?,
            email_from: required("EMAIL_FROM")?,
            smtp,
            audit,
            bootstrap_admin_email: optional("BOOTSTRAP_ADMIN_EMAIL")
                .map(|email| email.trim().to_lowercase()),
        })
    }

    pub fn is_production(&self) -> bool {
        self.rust_env == "production"
    }

    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn optional(key: &'static str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    optional(key).ok_or(ConfigError::Missing(key))
}

fn parse_required<T: std::str::FromStr>(key: &'static str) -> Result<T, ConfigError> {
    let raw = required(key)?;
    raw.parse()
        .map_err(|_| ConfigError::Invalid { key, value: raw })
}

fn parse_or<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match optional(key) {
        Some(raw) => raw
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
        None => Ok(default),
    }
}
