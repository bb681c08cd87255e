use clap::builder::TypedValueParser as _;
use clap::Parser;
use dotenvy::dotenv;
use log::LevelFilter;
use secrecy::SecretString;
use std::time::Duration;

/// Default Notion API version sent in the `Notion-Version` header.
pub const DEFAULT_NOTION_VERSION: &str = "2022-06-28";

/// Default OAuth redirect URI registered with the HubSpot app.
pub const DEFAULT_HUBSPOT_REDIRECT_URI: &str =
    "http://localhost:8000/integrations/hubspot/oauth2callback";

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// A list of full CORS origin URLs that allowed to receive server responses.
    #[arg(
        long,
        env,
        value_delimiter = ',',
        use_value_delimiter = true,
        default_value = "http://localhost:3000,https://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,

    /// The host interface to listen for incoming connections
    #[arg(short, long, env, default_value = "127.0.0.1")]
    pub interface: Option<String>,

    /// The host TCP port to listen for incoming connections
    #[arg(short, long, env, default_value_t = 8000)]
    pub port: u16,

    /// Set the log level verbosity threshold (level) to control what gets displayed on console output
    #[arg(
        short,
        long,
        env,
        default_value_t = LevelFilter::Info,
        value_parser = clap::builder::PossibleValuesParser::new(["OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"])
            .map(|s| s.parse::<LevelFilter>().unwrap()),
        )]
    pub log_level_filter: LevelFilter,

    /// Redis URL of the credential store. When unset, state and credentials are
    /// kept in process memory and lost on restart.
    #[arg(long, env)]
    redis_url: Option<String>,

    /// Timeout in seconds for calls to provider APIs. Unset means no timeout.
    #[arg(long, env)]
    http_timeout_secs: Option<u64>,

    /// The HubSpot app client ID.
    #[arg(long, env)]
    hubspot_client_id: Option<String>,

    /// The HubSpot app client secret.
    #[arg(long, env)]
    hubspot_client_secret: Option<String>,

    /// The OAuth redirect URI registered with the HubSpot app.
    #[arg(long, env, default_value = DEFAULT_HUBSPOT_REDIRECT_URI)]
    hubspot_redirect_uri: String,

    /// Space separated OAuth scopes requested from HubSpot.
    #[arg(long, env)]
    hubspot_scopes: Option<String>,

    /// Override of HubSpot's OAuth authorization endpoint.
    #[arg(long, env)]
    hubspot_auth_url: Option<String>,

    /// Override of HubSpot's OAuth token endpoint.
    #[arg(long, env)]
    hubspot_token_url: Option<String>,

    /// Override of the HubSpot API base URL.
    /// Override in tests to point at a mock server.
    #[arg(long, env)]
    hubspot_api_base_url: Option<String>,

    /// The Notion internal integration token.
    #[arg(long, env)]
    notion_token: Option<String>,

    /// Override of the Notion API base URL.
    #[arg(long, env)]
    notion_api_base_url: Option<String>,

    /// The Notion API version to request.
    #[arg(long, env, default_value = DEFAULT_NOTION_VERSION)]
    notion_version: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        // Load .env file first
        dotenv().ok();
        // Then parse the command line parameters and flags
        Config::parse()
    }

    pub fn redis_url(&self) -> Option<String> {
        self.redis_url.clone()
    }

    /// Returns the provider API timeout, if configured.
    pub fn http_timeout(&self) -> Option<Duration> {
        self.http_timeout_secs.map(Duration::from_secs)
    }

    pub fn hubspot_client_id(&self) -> Option<String> {
        self.hubspot_client_id.clone()
    }

    pub fn hubspot_client_secret(&self) -> Option<SecretString> {
        self.hubspot_client_secret.clone().map(SecretString::new)
    }

    pub fn hubspot_redirect_uri(&self) -> &str {
        &self.hubspot_redirect_uri
    }

    pub fn hubspot_scopes(&self) -> Option<String> {
        self.hubspot_scopes.clone()
    }

    pub fn hubspot_auth_url(&self) -> Option<String> {
        self.hubspot_auth_url.clone()
    }

    pub fn hubspot_token_url(&self) -> Option<String> {
        self.hubspot_token_url.clone()
    }

    pub fn hubspot_api_base_url(&self) -> Option<String> {
        self.hubspot_api_base_url.clone()
    }

    pub fn notion_token(&self) -> Option<SecretString> {
        self.notion_token.clone().map(SecretString::new)
    }

    pub fn notion_api_base_url(&self) -> Option<String> {
        self.notion_api_base_url.clone()
    }

    pub fn notion_version(&self) -> &str {
        &self.notion_version
    }
}
