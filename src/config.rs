pub const DEFAULT_DATABASE_URL: &str = "sqlite://thpu.db";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

/// Server settings, read from the environment (and `.env`, once loaded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let database_url = lookup("DATABASE_URL")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let max_connections = lookup("DATABASE_MAX_CONNECTIONS")
            .and_then(|raw| raw.parse::<u32>().ok())
            .filter(|value| *value > 0)
            .unwrap_or(DEFAULT_MAX_CONNECTIONS);

        let host = lookup("HOST")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = lookup("PORT")
            .and_then(|raw| raw.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            database_url,
            max_connections,
            host,
            port,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
