#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Namespace and key of the collection metafield that marks a collection as
/// pinned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinnedMetafield {
    pub namespace: String,
    pub key: String,
}

impl Default for PinnedMetafield {
    fn default() -> Self {
        Self {
            namespace: "custom".to_owned(),
            key: "pinned".to_owned(),
        }
    }
}

/// Page sizes used by each kind of browser request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSizes {
    /// Page size while exhaustively listing every collection.
    pub collections: u32,
    /// Size of the single page fetched for a title search.
    pub search: u32,
    /// Products fetched per open / load-more request.
    pub products: u32,
}

impl Default for PageSizes {
    fn default() -> Self {
        Self {
            collections: 50,
            search: 5,
            products: 5,
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Shop host, e.g. `"example.myshopify.com"`.
    pub shop_domain: String,
    pub access_token: String,
    pub api_version: String,
    pub gateway_timeout_secs: u64,
    pub gateway_connect_timeout_secs: u64,
    pub user_agent: String,
    pub gateway_max_retries: u32,
    pub gateway_backoff_base_secs: u64,
    pub page_sizes: PageSizes,
    pub pinned_metafield: PinnedMetafield,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("shop_domain", &self.shop_domain)
            .field("access_token", &"[redacted]")
            .field("api_version", &self.api_version)
            .field("gateway_timeout_secs", &self.gateway_timeout_secs)
            .field(
                "gateway_connect_timeout_secs",
                &self.gateway_connect_timeout_secs,
            )
            .field("user_agent", &self.user_agent)
            .field("gateway_max_retries", &self.gateway_max_retries)
            .field("gateway_backoff_base_secs", &self.gateway_backoff_base_secs)
            .field("page_sizes", &self.page_sizes)
            .field("pinned_metafield", &self.pinned_metafield)
            .finish()
    }
}
