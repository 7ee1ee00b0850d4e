//! Connection settings.

use crate::Result;
use mongodb::{Client, Database, bson::doc, options::ClientOptions};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

/// Where and how to connect.
///
/// Loaded from `REMONGO_*` environment variables by [`MongoConfig::from_env`], e.g.
/// `REMONGO_URI=mongodb://localhost:27017` and `REMONGO_DATABASE=app`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MongoConfig {
    /// Connection string.
    pub uri: String,
    /// Name of the database repositories are bound to.
    pub database: String,
    /// Reported to the server in the connection handshake.
    #[serde(default)]
    pub app_name: Option<String>,
    #[serde(default = "default_max_pool_size")]
    pub max_pool_size: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
    #[serde(default = "default_server_selection_timeout")]
    pub server_selection_timeout_seconds: u64,
}

fn default_max_pool_size() -> u32 {
    10
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_server_selection_timeout() -> u64 {
    30
}

impl MongoConfig {
    pub fn new(uri: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database: database.into(),
            app_name: None,
            max_pool_size: default_max_pool_size(),
            connect_timeout_seconds: default_connect_timeout(),
            server_selection_timeout_seconds: default_server_selection_timeout(),
        }
    }

    pub fn from_env() -> Result<Self> {
        Self::from_source(config::Environment::with_prefix("REMONGO").try_parsing(true))
    }

    fn from_source(source: impl config::Source + Send + Sync + 'static) -> Result<Self> {
        let config = config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    pub async fn client_options(&self) -> Result<ClientOptions> {
        let mut options = ClientOptions::parse(&self.uri).await?;

        if let Some(app_name) = &self.app_name {
            options.app_name = Some(app_name.clone());
        }
        options.max_pool_size = Some(self.max_pool_size);
        options.connect_timeout = Some(Duration::from_secs(self.connect_timeout_seconds));
        options.server_selection_timeout =
            Some(Duration::from_secs(self.server_selection_timeout_seconds));

        Ok(options)
    }

    /// Connects, pings the configured database and returns its handle.
    pub async fn connect(&self) -> Result<Database> {
        let client = Client::with_options(self.client_options().await?)?;
        let database = client.database(&self.database);

        database.run_command(doc! { "ping": 1 }).await?;

        info!(database = %self.database, "connected to MongoDB");

        Ok(database)
    }
}
