//! Same-origin API proxy. Each configured prefix forwards to one remote base
//! URL so the front-end can call `/reqres/...` without CORS.

use anyhow::{anyhow, bail, Context, Result};
use axum::{
    // aliased so utoipa's axum_extras does not infer a `Bytes` request-body schema
    body::Bytes as RawBody,
    extract::{Extension, Path, RawQuery},
    http::{
        header::{ACCEPT, CONTENT_TYPE},
        Method, StatusCode,
    },
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use reqwest::Client;
use std::{fmt, str::FromStr, sync::Arc};
use tracing::{debug, error, instrument};
use url::Url;

const APPLICATION_JSON: &str = "application/json";
/// Paths owned by the host itself; a proxy prefix may not shadow them.
const RESERVED_PREFIXES: [&str; 3] = ["/health", "/openapi.json", "/users"];

/// One `PREFIX=URL` proxy mapping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProxyRoute {
    pub prefix: String,
    pub upstream: Url,
}

impl FromStr for ProxyRoute {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        let (prefix, upstream) = value
            .split_once('=')
            .ok_or_else(|| anyhow!("proxy mapping must look like PREFIX=URL, got: {value}"))?;

        let prefix = prefix.trim();
        if !prefix.starts_with('/') || prefix.len() < 2 || prefix.ends_with('/') {
            bail!("proxy prefix must start with '/' and not end with '/': {prefix}");
        }
        if prefix.contains(&['*', ':', '{', '}'][..]) {
            bail!("proxy prefix must be a literal path: {prefix}");
        }
        if RESERVED_PREFIXES
            .iter()
            .any(|reserved| prefix == *reserved || prefix.starts_with(&format!("{reserved}/")))
        {
            bail!("proxy prefix {prefix} collides with a built-in route");
        }

        let upstream = Url::parse(upstream.trim())
            .with_context(|| format!("invalid proxy URL for {prefix}: {upstream}"))?;
        if !matches!(upstream.scheme(), "http" | "https") {
            bail!("proxy URL for {prefix} must be http or https: {upstream}");
        }

        Ok(Self {
            prefix: prefix.to_string(),
            upstream,
        })
    }
}

impl fmt::Display for ProxyRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.prefix, self.upstream)
    }
}

#[derive(Debug)]
pub struct Upstream {
    base: Url,
    client: Client,
}

impl Upstream {
    #[must_use]
    pub fn new(base: Url, client: Client) -> Self {
        Self { base, client }
    }
}

/// Router forwarding every path below the prefix it is nested under.
pub fn router(route: &ProxyRoute, client: Client) -> Router {
    let upstream = Arc::new(Upstream::new(route.upstream.clone(), client));

    Router::new()
        .route(
            "/*path",
            get(forward)
                .post(forward)
                .put(forward)
                .patch(forward)
                .delete(forward),
        )
        .layer(Extension(upstream))
}

/// Append the already decoded `path` below `base`, one segment at a time, so
/// characters like `?` and `#` stay part of the path. Dot segments are
/// rejected instead of being resolved.
///
/// # Errors
/// Returns an error if the path contains dot segments or the base cannot carry a path.
pub fn upstream_url(base: &Url, path: &str, query: Option<&str>) -> Result<Url> {
    let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();
    if segments.iter().any(|segment| matches!(*segment, "." | "..")) {
        bail!("proxy path escapes the upstream base: {path}");
    }

    let mut url = base.clone();
    url.set_fragment(None);
    url.path_segments_mut()
        .map_err(|()| anyhow!("upstream base cannot carry a path: {base}"))?
        .pop_if_empty()
        .extend(segments);

    url.set_query(query.filter(|q| !q.is_empty()));

    Ok(url)
}

#[utoipa::path(
    get,
    path= "/reqres/{path}",
    params(
        ("path" = String, Path, description = "Path forwarded to the upstream API"),
    ),
    responses (
        (status = 200, description = "Upstream response relayed as-is (any upstream status is passed through)"),
        (status = 400, description = "Path escapes the upstream base"),
        (status = 503, description = "Upstream API not reachable"),
        (status = 500, description = "Upstream call failed"),
    ),
    tag= "proxy"
)]
// axum handler for every proxied method
#[instrument(skip(upstream, body))]
pub async fn forward(
    Extension(upstream): Extension<Arc<Upstream>>,
    method: Method,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
    body: RawBody,
) -> Response {
    let url = match upstream_url(&upstream.base, &path, query.as_deref()) {
        Ok(url) => url,
        Err(err) => {
            error!("Rejected proxy path: {:#}", err);
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    let mut request = upstream.client.request(method.clone(), url.clone());
    if method != Method::GET {
        request = request
            .header(ACCEPT, APPLICATION_JSON)
            .header(CONTENT_TYPE, APPLICATION_JSON)
            .body(body);
    }

    match request.send().await {
        Ok(response) => {
            debug!("{} {} -> {}", method, url, response.status());
            relay(response).await
        }
        Err(err) if err.is_connect() => {
            error!("Remote API {} not available: {}", upstream.base, err);
            StatusCode::SERVICE_UNAVAILABLE.into_response()
        }
        Err(err) => {
            error!(
                "An error occurred calling the API {}: {}",
                upstream.base, err
            );
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn relay(response: reqwest::Response) -> Response {
    let status = response.status();
    let content_type = response.headers().get(CONTENT_TYPE).cloned();

    match response.bytes().await {
        Ok(bytes) => {
            let mut relayed = (status, bytes).into_response();
            if let Some(content_type) = content_type {
                relayed.headers_mut().insert(CONTENT_TYPE, content_type);
            }
            relayed
        }
        Err(err) => {
            error!("Failed to read upstream body: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
