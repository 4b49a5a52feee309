use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Fitted scaler artifact (JSON)
    #[serde(default = "default_scaler_path")]
    pub scaler_path: String,

    /// Cluster model artifact (JSON). Swapping this path selects a model with a different K.
    #[serde(default = "default_cluster_model_path")]
    pub cluster_model_path: String,

    /// Clustered song catalog (CSV)
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,

    /// Spotify client-credentials app id
    pub spotify_client_id: String,

    /// Spotify client-credentials app secret
    pub spotify_client_secret: String,

    /// Spotify Web API base URL
    #[serde(default = "default_spotify_api_url")]
    pub spotify_api_url: String,

    /// Spotify accounts service base URL (token endpoint)
    #[serde(default = "default_spotify_accounts_url")]
    pub spotify_accounts_url: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of recommendations returned when a request does not ask for a limit
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    /// Seconds a session may sit idle before it is discarded
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u32,
}

fn default_scaler_path() -> String {
    "artifacts/scaler.json".to_string()
}

fn default_cluster_model_path() -> String {
    "artifacts/kmeans_model.json".to_string()
}

fn default_catalog_path() -> String {
    "data/names_genres_clustered.csv".to_string()
}

fn default_spotify_api_url() -> String {
    "https://api.spotify.com".to_string()
}

fn default_spotify_accounts_url() -> String {
    "https://accounts.spotify.com".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_limit() -> usize {
    10
}

fn default_session_ttl_secs() -> u32 {
    1800
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from an explicit set of key/value pairs
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

        if config.default_limit == 0 {
            anyhow::bail!("Failed to load config: DEFAULT_LIMIT must be at least 1");
        }
        if config.session_ttl_secs == 0 {
            anyhow::bail!("Failed to load config: SESSION_TTL_SECS must be at least 1");
        }

        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(i64::from(self.session_ttl_secs))
    }
}
