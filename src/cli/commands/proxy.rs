use crate::userdesk::ProxyRoute;
use clap::{Arg, ArgAction, ArgMatches, Command};

pub const ARG_PROXY_API: &str = "proxy-api";
pub const DEFAULT_PROXY_API: &str = "/reqres=https://reqres.in/api";

#[derive(Debug, Clone)]
pub struct Options {
    pub routes: Vec<ProxyRoute>,
}

impl Options {
    /// Parse proxy mappings from matches.
    ///
    /// # Errors
    /// Returns an error if a mapping is not a valid `PREFIX=URL` pair.
    pub fn parse(matches: &ArgMatches) -> anyhow::Result<Self> {
        let routes = matches
            .get_many::<String>(ARG_PROXY_API)
            .into_iter()
            .flatten()
            .filter(|value| !value.trim().is_empty())
            .map(|value| value.parse::<ProxyRoute>())
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(Self { routes })
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_PROXY_API)
            .long(ARG_PROXY_API)
            .help("API prefix to proxy, as PREFIX=URL (repeatable, comma separated in env)")
            .env("USERDESK_PROXY_API")
            .action(ArgAction::Append)
            .value_delimiter(',')
            .default_value(DEFAULT_PROXY_API),
    )
}
