use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;

/// Runtime settings, read from flags or the environment (`.env` is loaded first).
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Spotem365 admin dashboard", long_about = None)]
pub struct Settings {
    /// Base URL of the remote admin API
    #[arg(long, env = "API_BASE_URL")]
    pub api_base_url: String,

    /// Secret used to sign the session cookie
    #[arg(long, env = "SESSION_SECRET", hide_env_values = true)]
    pub session_secret: String,

    /// Address the dashboard listens on
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:3000")]
    pub bind_addr: SocketAddr,

    /// Origin allowed by CORS, if the dashboard is embedded elsewhere
    #[arg(long, env = "CLIENT_URL")]
    pub client_url: Option<String>,

    /// Session lifetime in seconds
    #[arg(long, env = "SESSION_TTL_SECS", default_value_t = 86_400)]
    pub session_ttl_secs: u64,

    /// Rows per page on the user list
    #[arg(long, env = "USERS_PAGE_SIZE", default_value_t = 10)]
    pub users_page_size: u32,

    /// How long a cached API response is kept as fallback data
    #[arg(long, env = "CACHE_TIME_SECS", default_value_t = 300)]
    pub cache_time_secs: u64,

    /// Timeout for calls to the remote API
    #[arg(long, env = "API_TIMEOUT_SECS", default_value_t = 30)]
    pub api_timeout_secs: u64,
}

impl Settings {
    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    pub fn cache_time(&self) -> Duration {
        Duration::from_secs(self.cache_time_secs)
    }

    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api_timeout_secs)
    }

    pub fn page_size(&self) -> u32 {
        self.users_page_size.max(1)
    }
}

#[cfg(test)]
pub(crate) fn test_settings() -> Settings {
    Settings {
        api_base_url: "http://api.example.test".to_string(),
        session_secret: "test-secret".to_string(),
        bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
        client_url: None,
        session_ttl_secs: 3_600,
        users_page_size: 10,
        cache_time_secs: 300,
        api_timeout_secs: 5,
    }
}
