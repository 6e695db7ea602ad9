//! GeoIP 服务模块
//!
//! 通过外部 HTTP API (ip-api.com) 查询 IP 地址地理位置。

mod external_api;
mod provider;

pub use external_api::ExternalApiProvider;
pub use provider::{GeoIpLookup, GeoRecord, STATUS_SUCCESS};
