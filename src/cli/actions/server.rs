use crate::{
    cli::telemetry,
    userdesk::{self, Config, ProxyRoute},
};
use anyhow::Result;
use std::{path::PathBuf, time::Duration};
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub api_base_url: Option<String>,
    pub static_dir: Option<PathBuf>,
    pub request_timeout_seconds: u64,
    pub proxies: Vec<ProxyRoute>,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            port: args.port,
            api_base_url: args.api_base_url,
            proxies: args.proxies,
            static_dir: args.static_dir,
            request_timeout: Duration::from_secs(args.request_timeout_seconds),
        }
    }
}

/// Execute the server action.
/// # Errors
/// Returns an error if the configuration is invalid or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    let config = Config::from(args);

    debug!("Server config: {:?}", config);

    let result = userdesk::new(config).await;

    telemetry::shutdown_tracer();

    result
}
