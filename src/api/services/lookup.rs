//! 查询 API
//!
//! - `GET /api/lookup?ip=`：IP 或域名，原样透传上游记录
//! - `GET /api/resolve_domain?domain=`：域名解析 + 整理后的地理位置
//! - `GET /api/history`：最近查询过的 IP

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Serialize;
use tracing::{debug, error, trace};

use crate::api::middleware::RequestId;
use crate::errors::{GeoLookupError, Result};
use crate::services::LookupService;

/// 错误响应体：`{"error": ..., "details": ...}`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorBody {
    pub fn new(error: &'static str) -> Self {
        Self {
            error,
            details: None,
        }
    }

    pub fn with_details(error: &'static str, details: impl Into<String>) -> Self {
        Self {
            error,
            details: Some(details.into()),
        }
    }
}

fn error_response(status: StatusCode, body: ErrorBody) -> HttpResponse {
    HttpResponse::build(status).json(body)
}

/// 取查询参数的第一次出现；空字符串与缺失等同
///
/// 重复参数不报错，后面的值被忽略。
fn first_query_param(req: &HttpRequest, name: &str) -> Result<String> {
    web::Query::<Vec<(String, String)>>::from_query(req.query_string())
        .ok()
        .and_then(|pairs| pairs.into_inner().into_iter().find(|(key, _)| key == name))
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| GeoLookupError::missing_parameter(format!("query parameter '{}'", name)))
}

pub struct LookupHandlers;

impl LookupHandlers {
    pub async fn lookup(
        req: HttpRequest,
        request_id: RequestId,
        service: web::Data<Arc<LookupService>>,
    ) -> HttpResponse {
        let target = match first_query_param(&req, "ip") {
            Ok(target) => target,
            Err(e) => return Self::lookup_failure(&request_id, "", e),
        };

        match service.lookup(&target).await {
            Ok(record) => HttpResponse::Ok().json(record),
            Err(e) => Self::lookup_failure(&request_id, &target, e),
        }
    }

    fn lookup_failure(request_id: &RequestId, target: &str, err: GeoLookupError) -> HttpResponse {
        match err {
            GeoLookupError::MissingParameter(msg) => {
                trace!(%request_id, "Lookup rejected: missing {}", msg);
                error_response(
                    StatusCode::BAD_REQUEST,
                    ErrorBody::new("IP address is required"),
                )
            }
            GeoLookupError::InvalidTarget(msg) => {
                debug!(%request_id, "Invalid lookup target {}: {}", target, msg);
                error_response(
                    StatusCode::BAD_REQUEST,
                    ErrorBody::new("Invalid IP or domain"),
                )
            }
            e => {
                error!(%request_id, "Lookup for {} failed: {}", target, e);
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::with_details("API failed", e.message()),
                )
            }
        }
    }

    pub async fn resolve_domain(
        req: HttpRequest,
        request_id: RequestId,
        service: web::Data<Arc<LookupService>>,
    ) -> HttpResponse {
        let domain = match first_query_param(&req, "domain") {
            Ok(domain) => domain,
            Err(e) => return Self::resolve_failure(&request_id, "", e),
        };

        match service.resolve_domain(&domain).await {
            Ok(geo) => HttpResponse::Ok().json(geo),
            Err(e) => Self::resolve_failure(&request_id, &domain, e),
        }
    }

    fn resolve_failure(request_id: &RequestId, domain: &str, err: GeoLookupError) -> HttpResponse {
        match err {
            GeoLookupError::MissingParameter(msg) => {
                trace!(%request_id, "Resolve rejected: missing {}", msg);
                error_response(StatusCode::BAD_REQUEST, ErrorBody::new("Domain required"))
            }
            GeoLookupError::ResolutionFailure(msg) => {
                debug!(%request_id, "Domain {} not found: {}", domain, msg);
                error_response(StatusCode::NOT_FOUND, ErrorBody::new("Domain not found"))
            }
            GeoLookupError::UpstreamRejected(msg) => {
                debug!(%request_id, "Geolocation rejected for {}: {}", domain, msg);
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::new("Failed to retrieve geolocation data"),
                )
            }
            e => {
                error!(%request_id, "Resolve for {} failed: {}", domain, e);
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::with_details("An error occurred", e.message()),
                )
            }
        }
    }

    pub async fn history(
        request_id: RequestId,
        service: web::Data<Arc<LookupService>>,
    ) -> HttpResponse {
        match service.history() {
            Ok(history) => HttpResponse::Ok().json(history),
            Err(e) => {
                error!(%request_id, "Failed to read history: {}", e);
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::with_details("Failed to read history", e.message()),
                )
            }
        }
    }
}

/// API 路由配置
pub fn api_routes() -> actix_web::Scope {
    web::scope("/api")
        .route("/lookup", web::get().to(LookupHandlers::lookup))
        .route(
            "/resolve_domain",
            web::get().to(LookupHandlers::resolve_domain),
        )
        .route("/history", web::get().to(LookupHandlers::history))
}
