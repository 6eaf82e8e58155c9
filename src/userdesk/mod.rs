use crate::{
    client::{HttpUsersApi, UsersApi},
    APP_USER_AGENT,
};
use anyhow::{bail, Context, Result};
use axum::{
    body::Body,
    extract::{Extension, MatchedPath},
    http::{HeaderName, HeaderValue, Request},
    routing::get,
    Router,
};
use std::{
    collections::HashSet,
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::PropagateRequestIdLayer,
    services::{ServeDir, ServeFile},
    set_header::SetRequestHeaderLayer,
    trace::TraceLayer,
};
use tracing::{error, info, info_span, Span};
use ulid::Ulid;

pub mod handlers;
mod openapi;

pub use handlers::ProxyRoute;
pub use openapi::openapi;

const REQUEST_ID: &str = "x-request-id";

/// Host configuration, resolved from the CLI.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Base URL the components call; `None` means this server itself.
    pub api_base_url: Option<String>,
    pub proxies: Vec<ProxyRoute>,
    pub static_dir: Option<PathBuf>,
    pub request_timeout: Duration,
}

impl Config {
    /// Check the parts of the configuration that clap cannot.
    ///
    /// # Errors
    /// Returns an error if the static folder is missing or a proxy prefix is repeated.
    pub fn validate(&self) -> Result<()> {
        if let Some(dir) = &self.static_dir {
            if !dir.is_dir() {
                bail!("static dir must be a valid folder: {}", dir.display());
            }
        }

        let mut seen = HashSet::new();
        for route in &self.proxies {
            if !seen.insert(route.prefix.as_str()) {
                bail!("proxy prefix configured more than once: {}", route.prefix);
            }
        }

        Ok(())
    }

    /// URL the component client targets.
    #[must_use]
    pub fn component_api_base(&self) -> String {
        self.api_base_url
            .clone()
            .unwrap_or_else(|| format!("http://127.0.0.1:{}", self.port))
    }
}

/// Build the application router.
///
/// # Errors
/// Returns an error if the configuration is invalid or the upstream client cannot be built.
pub fn router<A>(config: &Config, api: Arc<A>) -> Result<Router>
where
    A: UsersApi + Send + Sync + 'static,
{
    config.validate()?;

    let upstream_client = reqwest::Client::builder()
        .user_agent(APP_USER_AGENT)
        .timeout(config.request_timeout)
        .build()
        .context("Failed to build upstream HTTP client")?;

    let mut app = Router::new()
        .route("/health", get(handlers::health))
        .route("/openapi.json", get(openapi::openapi_json))
        .route("/users", get(handlers::pages::users_list::<A>))
        .route(
            "/users/new",
            get(handlers::pages::user_add_form).post(handlers::pages::user_add_submit::<A>),
        );

    for route in &config.proxies {
        info!("Proxying {} -> {}", route.prefix, route.upstream);
        app = app.nest(
            &route.prefix,
            handlers::proxy::router(route, upstream_client.clone()),
        );
    }

    app = match &config.static_dir {
        Some(dir) => app.fallback_service(static_files(dir)),
        None => app.route("/", get(handlers::pages::home::<A>)),
    };

    Ok(app.layer(
        ServiceBuilder::new()
            .layer(SetRequestHeaderLayer::if_not_present(
                HeaderName::from_static(REQUEST_ID),
                |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
            ))
            .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                REQUEST_ID,
            )))
            .layer(TraceLayer::new_for_http().make_span_with(make_span))
            .layer(Extension(api)),
    ))
}

/// Existing files are served as-is; every other path gets `index.html` so the
/// front-end router can take over.
fn static_files(dir: &Path) -> ServeDir<ServeFile> {
    ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")))
}

/// Start the server
/// # Errors
/// Return error if failed to start the server
pub async fn new(config: Config) -> Result<()> {
    let api = Arc::new(
        HttpUsersApi::with_timeout(&config.component_api_base(), config.request_timeout)
            .context("Failed to build component HTTP client")?,
    );

    let app = router(&config, api)?;

    let listener = TcpListener::bind(format!("::0:{}", config.port)).await?;

    info!("Listening on [::]:{}", config.port);

    serve(listener, app).await
}

/// Serve `app` on an already bound listener until Ctrl-C.
///
/// # Errors
/// Returns an error if the server fails while running.
pub async fn serve(listener: TcpListener, app: Router) -> Result<()> {
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for shutdown signal: {}", err);
                std::future::pending::<()>().await;
            }
            info!("Gracefully shutdown");
        })
        .await?;

    Ok(())
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID)
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}
