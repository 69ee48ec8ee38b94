use serde::{Deserialize, Serialize};

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Bound on how long `get_token_async` waits for a token (seconds)
    pub token_wait_secs: u64,

    /// TTL for message deduplication entries in seconds (default: 120)
    pub dedup_window_secs: u64,

    /// Cap on tracked deduplication entries
    pub dedup_max_entries: usize,

    /// Whether `get_token_async` triggers registration when called while
    /// unregistered
    pub auto_register_on_token_request: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            token_wait_secs: 30,
            dedup_window_secs: 120,
            dedup_max_entries: 1024,
            auto_register_on_token_request: true,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(ClientConfig {
            token_wait_secs: std::env::var("PUSH_TOKEN_WAIT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()?,
            dedup_window_secs: std::env::var("PUSH_DEDUP_WINDOW_SECS")
                .unwrap_or_else(|_| "120".to_string())
                .parse()?,
            dedup_max_entries: std::env::var("PUSH_DEDUP_MAX_ENTRIES")
                .unwrap_or_else(|_| "1024".to_string())
                .parse()?,
            auto_register_on_token_request: std::env::var("PUSH_AUTO_REGISTER")
                .unwrap_or_else(|_| "true".to_string())
                .parse()?,
        })
    }
}
