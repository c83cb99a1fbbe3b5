/// Store connection settings loaded from environment variables.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL of the Supabase-compatible store, without a trailing
    /// slash (e.g. `https://abc.supabase.co`).
    pub base_url: String,
    /// API key sent as both `apikey` and bearer token.
    pub api_key: String,
    /// Storage bucket holding reference images (default: `images`).
    pub bucket: String,
    /// Per-request timeout in seconds (default: `30`).
    pub timeout_secs: u64,
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var              | Default    |
    /// |----------------------|------------|
    /// | `STORE_URL`          | (required) |
    /// | `STORE_API_KEY`      | (required) |
    /// | `STORE_BUCKET`       | `images`   |
    /// | `STORE_TIMEOUT_SECS` | `30`       |
    pub fn from_env() -> Self {
        let base_url = std::env::var("STORE_URL")
            .expect("STORE_URL must be set")
            .trim_end_matches('/')
            .to_string();

        let api_key = std::env::var("STORE_API_KEY").expect("STORE_API_KEY must be set");

        let bucket = std::env::var("STORE_BUCKET").unwrap_or_else(|_| "images".into());

        let timeout_secs: u64 = std::env::var("STORE_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("STORE_TIMEOUT_SECS must be a valid u64");

        Self {
            base_url,
            api_key,
            bucket,
            timeout_secs,
        }
    }
}

#[cfg(test)]
pub(crate) fn test_config() -> StoreConfig {
    StoreConfig {
        base_url: "https://store.test".to_string(),
        api_key: "test-key".to_string(),
        bucket: "images".to_string(),
        timeout_secs: 5,
    }
}
