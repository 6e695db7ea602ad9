//! Server mode
//!
//! Configures and starts the HTTP server with all routes.

use actix_cors::Cors;
use actix_web::{
    App, HttpServer,
    middleware::{Compress, DefaultHeaders, from_fn},
    web,
};
use anyhow::{Context, Result};
use tracing::warn;

use crate::api::middleware::{RequestIdMiddleware, TimingMiddleware};
use crate::api::services::{AppStartTime, api_routes, frontend_routes, health_routes};
use crate::config::{CorsConfig, get_config};
use crate::runtime::lifetime;

/// Validate CORS configuration at startup (runs once)
fn validate_cors_config(cors_config: &CorsConfig) {
    if cors_config.enabled && cors_config.allowed_origins.is_empty() {
        warn!(
            "CORS enabled but allowed_origins is empty. \
            No cross-origin requests will be allowed. \
            Use '[\"*\"]' for any origin."
        );
    }
}

/// Build CORS middleware from configuration
pub fn build_cors_middleware(cors_config: &CorsConfig) -> Cors {
    // 关闭时使用浏览器默认的同源策略
    if !cors_config.enabled {
        return Cors::default();
    }

    let mut cors = Cors::default()
        .allow_any_method()
        .allow_any_header()
        .max_age(cors_config.max_age);

    if cors_config.allowed_origins.iter().any(|o| o == "*") {
        cors = cors.allow_any_origin().send_wildcard();
    } else {
        for origin in &cors_config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    cors
}

/// Run the HTTP server
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server() -> Result<()> {
    let app_start_time = AppStartTime::now();
    let config = get_config();

    let startup = lifetime::startup::prepare_server_startup(&config).map_err(|e| {
        tracing::error!("Server startup failed: {}", e);
        e
    })?;
    let lookup_service = startup.lookup_service;

    let cors_config = config.cors.clone();
    validate_cors_config(&cors_config);

    let cpu_count = config.server.cpu_count.clamp(1, 32);
    warn!("Using {} CPU cores for the server", cpu_count);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(DefaultHeaders::new().add(("Cache-Control", "no-cache, no-store, must-revalidate")))
            .wrap(Compress::default())
            .wrap(build_cors_middleware(&cors_config))
            .wrap(TimingMiddleware)
            // 最后注册的最先执行，request span 覆盖其余中间件的日志
            .wrap(from_fn(RequestIdMiddleware::assign))
            .app_data(web::Data::new(lookup_service.clone()))
            .app_data(web::Data::new(app_start_time.clone()))
            .service(api_routes())
            .service(health_routes())
            // 空前缀 scope 必须最后注册
            .service(frontend_routes())
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .workers(cpu_count)
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?;

    warn!("Starting server at http://{}", bind_address);

    // actix-web 自带 Ctrl+C / SIGTERM 优雅关闭
    server.run().await?;

    warn!("Server stopped");
    Ok(())
}
