//! 外部 GeoIP API 实现
//!
//! 使用外部 HTTP API 进行 IP 地理位置查询（默认 ip-api.com）。
//! 不重试、不缓存，每次调用对应一次出站请求。

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{trace, warn};
use ureq::Agent;

use super::provider::{GeoIpLookup, GeoRecord};
use crate::config::UpstreamConfig;
use crate::errors::{GeoLookupError, Result};

/// 外部 API GeoIP Provider
pub struct ExternalApiProvider {
    api_url_template: String,
    agent: Agent,
}

impl ExternalApiProvider {
    /// 创建外部 API Provider
    ///
    /// `api_url_template` 使用 `{ip}` 作为占位符，
    /// 例如: `http://ip-api.com/json/{ip}`
    pub fn new(api_url_template: &str, timeout: Option<Duration>) -> Self {
        // 非 2xx 响应也照常解析 body，由调用方根据 status 字段判断
        let agent: Agent = Agent::config_builder()
            .timeout_global(timeout)
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            api_url_template: api_url_template.to_string(),
            agent,
        }
    }

    pub fn from_config(config: &UpstreamConfig) -> Self {
        Self::new(
            &config.api_url,
            config.timeout_secs.map(Duration::from_secs),
        )
    }

    pub fn url_for(&self, ip: &str) -> String {
        self.api_url_template.replace("{ip}", ip)
    }

    /// 同步请求（在 spawn_blocking 中调用）
    fn fetch_sync(agent: &Agent, url: &str) -> Result<GeoRecord> {
        let resp = agent.get(url).call().map_err(|e| {
            warn!("GeoIP API request to \"{}\" failed: {}", url, e);
            GeoLookupError::upstream_failure(e.to_string())
        })?;

        let json: Value = resp.into_body().read_json().map_err(|e| {
            warn!("GeoIP API response from \"{}\" parse failed: {}", url, e);
            GeoLookupError::upstream_failure(e.to_string())
        })?;

        GeoRecord::try_from(json).map_err(|other| {
            warn!("GeoIP API response from \"{}\" is not an object", url);
            GeoLookupError::upstream_failure(format!(
                "expected a JSON object from upstream, got: {}",
                other
            ))
        })
    }
}

#[async_trait]
impl GeoIpLookup for ExternalApiProvider {
    async fn fetch(&self, ip: &str) -> Result<GeoRecord> {
        let url = self.url_for(ip);
        let agent = self.agent.clone();
        trace!("GeoIP lookup for {} via {}", ip, url);

        tokio::task::spawn_blocking(move || Self::fetch_sync(&agent, &url))
            .await
            .map_err(|e| {
                warn!("GeoIP spawn_blocking failed: {}", e);
                GeoLookupError::upstream_failure(e.to_string())
            })?
    }

    fn name(&self) -> &'static str {
        "ExternalAPI"
    }
}
