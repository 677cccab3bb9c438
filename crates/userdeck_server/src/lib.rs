//! Reference HTTP implementation of the remote users resource.
//!
//! Serves `GET/POST /users` and `PUT/DELETE /users/:id` over an in-memory
//! directory, for local development and headless tests of the client.

/// In-memory user storage.
pub mod directory;
/// Runs the service on a background thread inside another process.
pub mod embedded;
pub mod error;
pub mod handlers;

pub use directory::{DirectoryError, UserDirectory};
pub use embedded::EmbeddedServer;
pub use userdeck_core::{Config, DEFAULT_PORT};

use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    routing::{get, put},
    Router,
};
use std::future::Future;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use tracing::warn;

const USER_METHODS: [Method; 4] = [Method::GET, Method::POST, Method::PUT, Method::DELETE];

/// Handler state: the directory being served plus the config it was built from.
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<UserDirectory>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config, directory: UserDirectory) -> Self {
        Self {
            directory: Arc::new(directory),
            config: Arc::new(config),
        }
    }

    /// State over the sample users, validated with the configured form profile.
    pub fn with_sample_users(config: Config) -> Self {
        let directory = UserDirectory::with_sample_users(config.form_profile);
        Self::new(config, directory)
    }
}

/// Builds the users router for the configured port.
///
/// Browser origins are limited to `localhost`/`127.0.0.1` on that port unless
/// `allow_public_access` is set.
pub fn create_app(state: AppState, allow_public_access: bool) -> Router {
    let port = state.config.port;
    users_router(state, cors_for(allow_public_access, port))
}

/// Picks the listen address: `BIND` when it parses, else loopback on
/// `config.port`. Non-loopback addresses are pulled back to `127.0.0.1`
/// unless `allow_public_access` is set.
pub fn resolve_bind_address(config: &Config, allow_public_access: bool) -> SocketAddr {
    let fallback = SocketAddr::from((Ipv4Addr::LOCALHOST, config.port));
    let requested = requested_bind(fallback);
    if allow_public_access || requested.ip().is_loopback() {
        requested
    } else {
        warn!(
            "refusing public bind {} without ALLOW_PUBLIC_ACCESS; using loopback",
            requested
        );
        SocketAddr::from((Ipv4Addr::LOCALHOST, requested.port()))
    }
}

fn requested_bind(fallback: SocketAddr) -> SocketAddr {
    let Ok(raw) = std::env::var("BIND") else {
        return fallback;
    };
    raw.trim().parse().unwrap_or_else(|err| {
        warn!("ignoring BIND='{}' ({}); using {}", raw, err, fallback);
        fallback
    })
}

fn cors_for(allow_public_access: bool, port: u16) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(USER_METHODS);
    if allow_public_access {
        return layer.allow_origin(Any).allow_headers(Any);
    }
    let origins: Vec<HeaderValue> = ["localhost", "127.0.0.1"]
        .into_iter()
        .filter_map(|host| HeaderValue::from_str(&format!("http://{}:{}", host, port)).ok())
        .collect();
    layer
        .allow_origin(origins)
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}

fn fixed_header(name: HeaderName, value: &'static str) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(name, HeaderValue::from_static(value))
}

fn users_router(state: AppState, cors: CorsLayer) -> Router {
    use handlers::user;

    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(fixed_header(header::X_CONTENT_TYPE_OPTIONS, "nosniff"))
        .layer(fixed_header(header::X_FRAME_OPTIONS, "DENY"));

    Router::new()
        .route("/users", get(user::list_users).post(user::create_user))
        .route("/users/:id", put(user::update_user).delete(user::delete_user))
        .with_state(state)
        .layer(middleware)
}

/// Serves the users router on `listener` until `shutdown_signal` resolves.
///
/// Local CORS origins use the port the listener actually bound, which differs
/// from `config.port` when the caller bound port 0 or fell back.
pub async fn serve_router(
    listener: tokio::net::TcpListener,
    state: AppState,
    allow_public_access: bool,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let port = listener
        .local_addr()
        .map_or(state.config.port, |addr| addr.port());
    let app = users_router(state, cors_for(allow_public_access, port));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
}
