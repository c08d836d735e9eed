use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub thumbnails: ThumbnailConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpConfig {
    /// Whole-request timeout for BIF downloads, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Largest BIF body accepted, in bytes
    #[serde(default = "default_max_bif_bytes")]
    pub max_bif_bytes: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("trickplay/{}", env!("CARGO_PKG_VERSION"))
}

fn default_max_bif_bytes() -> u64 {
    64 * 1024 * 1024
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            max_bif_bytes: default_max_bif_bytes(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ThumbnailConfig {
    /// Base URL of server-rendered per-block thumbnails (`<base>/00000001.jpg`)
    #[serde(default)]
    pub base_url: Option<String>,
}
