//! 查询业务逻辑
//!
//! 组合输入校验、DNS 解析、GeoIP 查询和历史记录，HTTP 层与 CLI 共用。
//! 所有失败都以 `GeoLookupError` 返回，由调用方决定如何呈现。

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::geoip::{GeoIpLookup, GeoRecord, STATUS_SUCCESS};
use super::history::HistoryStore;
use super::resolver::HostResolver;
use crate::errors::{GeoLookupError, Result};
use crate::utils::is_valid_ip;

/// 上游缺少字段时的占位值
pub const NOT_AVAILABLE: &str = "N/A";

/// `/api/resolve_domain` 的响应体
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainGeolocation {
    pub status: String,
    pub domain: String,
    pub ip: String,
    pub country: Value,
    pub city: Value,
    pub region: Value,
    pub zip: Value,
    pub timezone: Value,
    pub isp: Value,
    pub lat: Value,
    pub lon: Value,
}

impl DomainGeolocation {
    fn from_record(domain: &str, ip: &str, record: &GeoRecord) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            domain: domain.to_string(),
            ip: ip.to_string(),
            country: record.field_or("country", NOT_AVAILABLE),
            city: record.field_or("city", NOT_AVAILABLE),
            region: record.field_or("regionName", NOT_AVAILABLE),
            zip: record.field_or("zip", NOT_AVAILABLE),
            timezone: record.field_or("timezone", NOT_AVAILABLE),
            isp: record.field_or("isp", NOT_AVAILABLE),
            lat: record.field_or("lat", 0),
            lon: record.field_or("lon", 0),
        }
    }
}

pub struct LookupService {
    resolver: Arc<dyn HostResolver>,
    geoip: Arc<dyn GeoIpLookup>,
    history: Arc<HistoryStore>,
}

impl LookupService {
    pub fn new(
        resolver: Arc<dyn HostResolver>,
        geoip: Arc<dyn GeoIpLookup>,
        history: Arc<HistoryStore>,
    ) -> Self {
        Self {
            resolver,
            geoip,
            history,
        }
    }

    pub fn history_store(&self) -> &HistoryStore {
        &self.history
    }

    pub fn provider_name(&self) -> &'static str {
        self.geoip.name()
    }

    /// 查询 IP 或域名，返回上游原始记录
    ///
    /// - 非 IP 输入先做 DNS 解析，失败返回 `InvalidTarget`
    /// - 上游请求/解析失败、缺少 status 字段、写历史失败均返回 `UpstreamFailure`
    /// - `status == "success"` 时写入历史；`fail` 记录原样返回
    pub async fn lookup(&self, target: &str) -> Result<GeoRecord> {
        let ip = if is_valid_ip(target) {
            target.to_string()
        } else {
            match self.resolver.resolve(target).await {
                Ok(ip) => ip.to_string(),
                Err(e) => {
                    debug!("Lookup target {} did not resolve: {}", target, e);
                    return Err(GeoLookupError::invalid_target(e.message()));
                }
            }
        };

        let record = self.fetch(&ip).await?;

        if record.is_success() {
            self.history
                .log_ip(&ip)
                .map_err(|e| GeoLookupError::upstream_failure(e.message()))?;
            info!("Lookup for {} succeeded", ip);
        } else {
            info!(
                "Upstream reported status {:?} for {}",
                record.status(),
                ip
            );
        }

        Ok(record)
    }

    /// 解析域名并返回整理后的地理位置
    ///
    /// 不写入历史。
    pub async fn resolve_domain(&self, domain: &str) -> Result<DomainGeolocation> {
        let ip = self.resolver.resolve(domain).await?.to_string();

        let record = self.fetch(&ip).await?;

        if !record.is_success() {
            warn!(
                "Upstream rejected {} ({}) with status {:?}",
                domain,
                ip,
                record.status()
            );
            return Err(GeoLookupError::upstream_rejected(format!(
                "upstream status for {}: {}",
                ip,
                record.status().unwrap_or("<non-string>")
            )));
        }

        info!("Resolved {} to {}", domain, ip);
        Ok(DomainGeolocation::from_record(domain, &ip, &record))
    }

    pub fn history(&self) -> Result<Vec<String>> {
        self.history.get_history()
    }

    /// 请求上游，缺少 status 字段视为上游异常
    async fn fetch(&self, ip: &str) -> Result<GeoRecord> {
        let record = self.geoip.fetch(ip).await?;
        if !record.has_status() {
            warn!("Upstream response for {} has no status field", ip);
            return Err(GeoLookupError::upstream_failure(
                "upstream response is missing the 'status' field",
            ));
        }
        Ok(record)
    }
}
