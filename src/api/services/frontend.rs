use actix_web::{HttpResponse, web};
use rust_embed::Embed;
use tracing::{error, trace};

// 页面在编译时嵌入，服务端不做任何注入
#[derive(Embed)]
#[folder = "templates/"]
struct PageAssets;

pub struct FrontendService;

impl FrontendService {
    pub async fn home() -> HttpResponse {
        Self::serve_page("home.html")
    }

    pub async fn ip_lookup() -> HttpResponse {
        Self::serve_page("ip_lookup.html")
    }

    pub async fn dns_lookup() -> HttpResponse {
        Self::serve_page("dns_lookup.html")
    }

    fn serve_page(name: &str) -> HttpResponse {
        trace!("Serving page {}", name);

        match PageAssets::get(name) {
            Some(content) => HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .body(content.data.into_owned()),
            None => {
                error!("Embedded page {} is missing", name);
                HttpResponse::NotFound()
                    .content_type("text/plain; charset=utf-8")
                    .body("Page not found")
            }
        }
    }
}

/// 页面路由配置（需最后注册，空前缀会匹配所有路径）
pub fn frontend_routes() -> actix_web::Scope {
    web::scope("")
        .route("/", web::get().to(FrontendService::home))
        .route("/", web::head().to(FrontendService::home))
        .route("/ip-lookup", web::get().to(FrontendService::ip_lookup))
        .route("/ip-lookup", web::head().to(FrontendService::ip_lookup))
        .route("/dns-lookup", web::get().to(FrontendService::dns_lookup))
        .route("/dns-lookup", web::head().to(FrontendService::dns_lookup))
}
