pub mod auth;
pub mod sessions;
pub mod system;
pub mod watch;
pub mod workspaces;

use anyhow::Result;
use berth_client::api_client::ApiClient;
use berth_core::config::ClientConfig;
use berth_infrastructure::config_store::ConfigStore;
use berth_infrastructure::token_store::TokenStore;
use std::sync::Arc;

/// Shared wiring for every command: configuration, the token store, and
/// the API client.
pub struct AppContext {
    pub config: ClientConfig,
    pub store: Arc<TokenStore>,
    pub client: Arc<ApiClient>,
}

impl AppContext {
    /// Loads config (file, then environment), then applies the `--api-url`
    /// override when present.
    pub fn build(api_url: Option<&str>) -> Result<Self> {
        let mut config = ConfigStore::new()?.load()?;
        if let Some(url) = api_url {
            config = config.with_base_url(url)?;
        }
        let store = Arc::new(TokenStore::new()?);
        let client = Arc::new(ApiClient::new(&config, store.clone())?);
        Ok(Self {
            config,
            store,
            client,
        })
    }
}
