//! Request ID middleware
//!
//! 上游代理已经带了 `X-Request-ID` 时沿用它（需通过格式校验），否则生成 UUID v4。
//! ID 写入 request extensions、tracing span 和响应头；handler 可直接提取 `RequestId`。

use std::future::{Ready, ready};

use actix_web::body::MessageBody;
use actix_web::dev::{Payload, ServiceRequest, ServiceResponse};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::middleware::Next;
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use tracing::{Instrument, info_span, trace};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// 外部传入 ID 的最大长度
const MAX_INBOUND_LEN: usize = 64;

/// 未挂载中间件时提取到的占位 ID
const UNKNOWN_REQUEST_ID: &str = "-";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromRequest for RequestId {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let id = req
            .extensions()
            .get::<RequestId>()
            .cloned()
            .unwrap_or_else(|| RequestId(UNKNOWN_REQUEST_ID.to_string()));
        ready(Ok(id))
    }
}

/// 只接受 `[A-Za-z0-9._-]`，避免日志注入
fn is_acceptable_inbound(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= MAX_INBOUND_LEN
        && value
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.'))
}

fn inbound_request_id(req: &ServiceRequest) -> Option<String> {
    let value = req.headers().get(REQUEST_ID_HEADER)?.to_str().ok()?;
    if is_acceptable_inbound(value) {
        Some(value.to_string())
    } else {
        trace!("Ignoring malformed inbound request id");
        None
    }
}

pub struct RequestIdMiddleware;

impl RequestIdMiddleware {
    /// 配合 `actix_web::middleware::from_fn` 使用
    pub async fn assign(
        req: ServiceRequest,
        next: Next<impl MessageBody>,
    ) -> Result<ServiceResponse<impl MessageBody>, Error> {
        let request_id = inbound_request_id(&req).unwrap_or_else(|| Uuid::new_v4().to_string());
        req.extensions_mut().insert(RequestId(request_id.clone()));

        let span = info_span!(
            "request",
            request_id = %request_id,
            method = %req.method(),
            path = %req.path(),
        );

        let mut response = next.call(req).instrument(span).await?;

        if let Ok(value) = HeaderValue::from_str(&request_id) {
            response
                .headers_mut()
                .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::middleware::from_fn;
    use actix_web::test::{self, TestRequest};
    use actix_web::{App, HttpResponse, web};

    async fn echo_id(request_id: RequestId) -> HttpResponse {
        HttpResponse::Ok().body(request_id.0)
    }

    #[test]
    fn test_inbound_format_check() {
        assert!(is_acceptable_inbound("abc-123_x.y"));
        assert!(is_acceptable_inbound(&"a".repeat(MAX_INBOUND_LEN)));
        assert!(!is_acceptable_inbound(""));
        assert!(!is_acceptable_inbound(&"a".repeat(MAX_INBOUND_LEN + 1)));
        assert!(!is_acceptable_inbound("id with spaces"));
        assert!(!is_acceptable_inbound("id\"quoted"));
    }

    #[actix_web::test]
    async fn test_generated_id_matches_extension() {
        let app = test::init_service(
            App::new()
                .wrap(from_fn(RequestIdMiddleware::assign))
                .route("/", web::get().to(echo_id)),
        )
        .await;

        let resp = test::call_service(&app, TestRequest::get().uri("/").to_request()).await;
        let header = resp
            .headers()
            .get(REQUEST_ID_HEADER)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        let body = test::read_body(resp).await;

        assert!(Uuid::parse_str(&header).is_ok());
        assert_eq!(body, header.as_bytes());
    }

    #[actix_web::test]
    async fn test_inbound_id_is_reused() {
        let app = test::init_service(
            App::new()
                .wrap(from_fn(RequestIdMiddleware::assign))
                .route("/", web::get().to(echo_id)),
        )
        .await;

        let req = TestRequest::get()
            .uri("/")
            .insert_header((REQUEST_ID_HEADER, "edge-7f3a.1"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.headers().get(REQUEST_ID_HEADER).unwrap(), "edge-7f3a.1");
        assert_eq!(test::read_body(resp).await, "edge-7f3a.1");
    }

    #[actix_web::test]
    async fn test_malformed_inbound_id_is_replaced() {
        let app = test::init_service(
            App::new()
                .wrap(from_fn(RequestIdMiddleware::assign))
                .route("/", web::get().to(echo_id)),
        )
        .await;

        let req = TestRequest::get()
            .uri("/")
            .insert_header((REQUEST_ID_HEADER, "bad id; drop"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        let header = resp.headers().get(REQUEST_ID_HEADER).unwrap().to_str().unwrap();
        assert!(Uuid::parse_str(header).is_ok());
    }

    #[actix_web::test]
    async fn test_extractor_without_middleware() {
        let app = test::init_service(App::new().route("/", web::get().to(echo_id))).await;

        let resp = test::call_service(&app, TestRequest::get().uri("/").to_request()).await;
        assert_eq!(test::read_body(resp).await, UNKNOWN_REQUEST_ID);
    }
}
