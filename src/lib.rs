//! # Userdesk
//!
//! `userdesk` hosts a small user directory front-end: a form that creates a user
//! through a REST endpoint and a listing that renders the existing users.
//!
//! ## Components
//!
//! Each component owns its state and exposes a pure `view()`. Network calls go
//! through the [`client::UsersApi`] capability and come back as explicit
//! `Result`s, so every exit path is a visible state transition.
//!
//! ## Host
//!
//! The axum server renders the components, proxies API prefixes (by default
//! `/reqres` to `https://reqres.in/api`) so the front-end can call them from the
//! same origin, and optionally serves a compiled single page application with an
//! `index.html` fallback.

pub mod cli;
pub mod client;
pub mod components;
pub mod userdesk;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
    }

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with(env!("CARGO_PKG_NAME")));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
