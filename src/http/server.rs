//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, CORS)
//! - Serve on a bound listener until shutdown is signalled

use axum::http::HeaderValue;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::{CorsConfig, RegistryConfig};
use crate::http::handlers::{create_infraction, delete_infraction, find_by_plate, list_infractions};
use crate::storage::Gateway;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Gateway,
}

/// HTTP server for the infraction registry.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server over an initialized gateway.
    pub fn new(config: &RegistryConfig, gateway: Gateway) -> Self {
        let router = Self::build_router(config, AppState { gateway });
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &RegistryConfig, state: AppState) -> Router {
        Router::new()
            .route("/infractions", get(list_infractions).post(create_infraction))
            .route("/infractions/{key}", get(find_by_plate).delete(delete_infraction))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(cors_layer(&config.cors)),
            )
    }

    /// The router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Any origin when none are configured, otherwise the configured list.
fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origin = if config.allowed_origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use tower::ServiceExt;

    fn server(dir: &tempfile::TempDir) -> HttpServer {
        let gateway = Gateway::new(dir.path().join("infractions.db"));
        gateway.initialize().unwrap();
        HttpServer::new(&RegistryConfig::default(), gateway)
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let dir = tempfile::tempdir().unwrap();
        let response = server(&dir)
            .router()
            .oneshot(
                Request::builder()
                    .uri("/infractions")
                    .header(header::ORIGIN, "http://dashboard.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn test_preflight_is_answered() {
        let dir = tempfile::tempdir().unwrap();
        let response = server(&dir)
            .router()
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/infractions/1")
                    .header(header::ORIGIN, "http://dashboard.example")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "DELETE")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
    }

    #[tokio::test]
    async fn test_request_id_is_propagated() {
        let dir = tempfile::tempdir().unwrap();
        let response = server(&dir)
            .router()
            .oneshot(Request::builder().uri("/infractions").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_configured_origins_restrict_cors() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = Gateway::new(dir.path().join("infractions.db"));
        gateway.initialize().unwrap();
        let mut config = RegistryConfig::default();
        config.cors.allowed_origins = vec!["http://dashboard.example".into()];
        let router = HttpServer::new(&config, gateway).router();

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/infractions")
                    .header(header::ORIGIN, "http://elsewhere.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(!response.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }
}
