//! Command-line argument dispatch.
//!
//! Maps validated CLI matches to the action to run, currently always the
//! server with its resolved configuration.

use crate::cli::actions::{server::Args, Action};
use crate::cli::commands::{proxy, ARG_API_BASE_URL, ARG_PORT, ARG_REQUEST_TIMEOUT, ARG_STATIC_DIR};
use anyhow::Result;
use std::path::PathBuf;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if an argument cannot be interpreted.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(8080);

    let api_base_url = matches
        .get_one::<String>(ARG_API_BASE_URL)
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty());

    let static_dir = matches.get_one::<PathBuf>(ARG_STATIC_DIR).cloned();

    let request_timeout_seconds = matches
        .get_one::<u64>(ARG_REQUEST_TIMEOUT)
        .copied()
        .unwrap_or(10);

    let proxy_opts = proxy::Options::parse(matches)?;

    Ok(Action::Server(Args {
        port,
        api_base_url,
        static_dir,
        request_timeout_seconds,
        proxies: proxy_opts.routes,
    }))
}
