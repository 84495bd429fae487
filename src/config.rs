use std::net::IpAddr;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub host: IpAddr,
    pub port: u16,
    pub app_name: String,
    pub token_expire_minutes: i64,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env_required("DATABASE_URL")?;
        let jwt_secret = env_required("JWT_SECRET")?;

        let host: IpAddr = env_or("BACKLOG_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid BACKLOG_HOST: {e}"))?;

        let port: u16 = env_or("BACKLOG_PORT", "8000")
            .parse()
            .map_err(|e| format!("Invalid BACKLOG_PORT: {e}"))?;

        let app_name = env_or("BACKLOG_APP_NAME", "Backlog Intelligence");

        // 24 hours by default
        let token_expire_minutes: i64 = env_or("BACKLOG_TOKEN_EXPIRE_MINUTES", "1440")
            .parse()
            .map_err(|e| format!("Invalid BACKLOG_TOKEN_EXPIRE_MINUTES: {e}"))?;

        let log_level = env_or("BACKLOG_LOG_LEVEL", "info");

        Ok(Config {
            database_url,
            jwt_secret,
            host,
            port,
            app_name,
            token_expire_minutes,
            log_level,
        })
    }
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
