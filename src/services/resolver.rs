//! 主机名解析
//!
//! 使用系统解析器把主机名转换为 IPv4 地址。解析失败统一返回
//! `ResolutionFailure`，与上游请求失败区分开。

use std::net::{IpAddr, Ipv4Addr};

use async_trait::async_trait;
use tracing::{debug, trace};

use crate::errors::{GeoLookupError, Result};

/// 主机名解析 trait
#[async_trait]
pub trait HostResolver: Send + Sync {
    /// 把主机名解析为一个 IPv4 地址
    async fn resolve(&self, hostname: &str) -> Result<Ipv4Addr>;
}

/// 基于系统 getaddrinfo 的解析器
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

#[async_trait]
impl HostResolver for SystemResolver {
    async fn resolve(&self, hostname: &str) -> Result<Ipv4Addr> {
        trace!("Resolving hostname: {}", hostname);

        let addrs = tokio::net::lookup_host((hostname, 0)).await.map_err(|e| {
            debug!("DNS resolution failed for {}: {}", hostname, e);
            GeoLookupError::resolution_failure(format!("{}: {}", hostname, e))
        })?;

        // 只取 IPv4，行为与 gethostbyname 一致
        let ip = addrs
            .filter_map(|addr| match addr.ip() {
                IpAddr::V4(v4) => Some(v4),
                IpAddr::V6(_) => None,
            })
            .next()
            .ok_or_else(|| {
                debug!("No IPv4 address for {}", hostname);
                GeoLookupError::resolution_failure(format!("{}: no IPv4 address", hostname))
            })?;

        trace!("Resolved {} -> {}", hostname, ip);
        Ok(ip)
    }
}
