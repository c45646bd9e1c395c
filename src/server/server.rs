//! HTTP server core implementation
//!
//! This module provides the HttpServer struct and its core methods.

use crate::config::{Config, ServerConfig};
use crate::server::handlers::health_check;
use crate::server::middleware::RequestIdMiddleware;
use crate::server::routes;
use crate::server::state::AppState;
use crate::utils::error::Result;
use actix_cors::Cors;
use actix_web::{App, HttpServer as ActixHttpServer, middleware::DefaultHeaders, web};
use tracing::info;
use tracing_actix_web::TracingLogger;

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server
    pub fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");
        config.validate()?;

        Ok(Self {
            config: config.server.clone(),
            state: AppState::new(config.clone()),
        })
    }

    /// Start the HTTP server
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.address();
        let workers = self.config.worker_count();

        info!(workers, "Starting HTTP server on {}", bind_addr);

        let state = web::Data::new(self.state);

        let server = ActixHttpServer::new(move || create_app(state.clone()))
            .workers(workers)
            .bind(&bind_addr)?
            .run();

        info!("HTTP server listening on {}", bind_addr);

        server.await?;

        info!("HTTP server stopped");
        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}

/// Create the Actix-web application
pub fn create_app(
    state: web::Data<AppState>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let server_config = &state.config.server;
    let cors = build_cors(server_config);
    let payload = web::PayloadConfig::new(server_config.max_body_size);

    App::new()
        .app_data(state)
        .app_data(payload)
        .wrap(cors)
        .wrap(RequestIdMiddleware)
        .wrap(TracingLogger::default())
        .wrap(DefaultHeaders::new().add(("Server", "Paygent")))
        .route("/health", web::get().to(health_check))
        .configure(routes::chat::configure_routes)
        .configure(routes::auth::configure_routes)
}

fn build_cors(config: &ServerConfig) -> Cors {
    let cors_config = &config.cors;
    let mut cors = Cors::default();

    if !cors_config.enabled {
        return cors;
    }

    if cors_config.allows_all_origins() {
        cors = cors.allow_any_origin();
    } else {
        for origin in &cors_config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    let methods: Vec<actix_web::http::Method> = cors_config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    if !methods.is_empty() {
        cors = cors.allowed_methods(methods);
    }

    let headers: Vec<actix_web::http::header::HeaderName> = cors_config
        .allowed_headers
        .iter()
        .filter_map(|h| h.parse().ok())
        .collect();
    if !headers.is_empty() {
        cors = cors.allowed_headers(headers);
    }

    cors.max_age(cors_config.max_age as usize)
}
