use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, trace};

use crate::services::LookupService;

// 应用启动时间结构体
#[derive(Clone, Debug)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

impl AppStartTime {
    pub fn now() -> Self {
        Self {
            start_datetime: chrono::Utc::now(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthHistoryCheck {
    pub status: String,
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthUpstreamCheck {
    pub provider: String,
}

#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub history: HealthHistoryCheck,
    pub upstream: HealthUpstreamCheck,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub uptime: u32,
    pub checks: HealthChecks,
    pub response_time_ms: u32,
}

/// Health Service
///
/// 只检查本地状态（历史文件是否可读），不请求上游 API。
pub struct HealthService;

impl HealthService {
    pub async fn health_check(
        service: web::Data<Arc<LookupService>>,
        app_start_time: web::Data<AppStartTime>,
    ) -> impl Responder {
        let start_time = Instant::now();
        trace!("Received health check request");

        let file = service.history_store().file_path().display().to_string();
        let history_status = match service.history() {
            Ok(entries) => HealthHistoryCheck {
                status: "healthy".to_string(),
                file,
                entries: Some(entries.len()),
                error: None,
            },
            Err(e) => {
                error!("History health check failed: {}", e);
                HealthHistoryCheck {
                    status: "unhealthy".to_string(),
                    file,
                    entries: None,
                    error: Some(e.message().to_string()),
                }
            }
        };

        let now = chrono::Utc::now();
        let uptime_seconds = (now - app_start_time.start_datetime).num_seconds().max(0) as u32;
        let is_healthy = history_status.status == "healthy";

        let health_data = HealthResponse {
            status: if is_healthy {
                "healthy".to_string()
            } else {
                "unhealthy".to_string()
            },
            timestamp: now.to_rfc3339(),
            uptime: uptime_seconds,
            checks: HealthChecks {
                history: history_status,
                upstream: HealthUpstreamCheck {
                    provider: service.provider_name().to_string(),
                },
            },
            response_time_ms: start_time.elapsed().as_millis() as u32,
        };

        let response_status = if is_healthy {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        };

        info!(
            "Health check completed in {:?}, status: {}, uptime: {}s",
            start_time.elapsed(),
            health_data.status,
            uptime_seconds
        );

        HttpResponse::build(response_status).json(health_data)
    }

    // 简单的就绪检查，只返回 200 状态码
    pub async fn readiness_check() -> impl Responder {
        trace!("Received readiness check request");

        HttpResponse::Ok()
            .append_header(("Content-Type", "text/plain"))
            .body("OK")
    }

    // 活跃性检查
    pub async fn liveness_check() -> impl Responder {
        trace!("Received liveness check request");

        HttpResponse::NoContent().finish()
    }
}

/// Health 路由配置
pub fn health_routes() -> actix_web::Scope {
    web::scope("/health")
        .route("", web::get().to(HealthService::health_check))
        .route("", web::head().to(HealthService::health_check))
        .route("/ready", web::get().to(HealthService::readiness_check))
        .route("/ready", web::head().to(HealthService::readiness_check))
        .route("/live", web::get().to(HealthService::liveness_check))
        .route("/live", web::head().to(HealthService::liveness_check))
}
