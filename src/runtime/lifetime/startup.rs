use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::StaticConfig;
use crate::services::{
    ExternalApiProvider, GeoIpLookup, HistoryStore, LookupService, SystemResolver,
};

pub struct StartupContext {
    pub lookup_service: Arc<LookupService>,
}

/// 准备服务器启动的上下文：历史存储、GeoIP provider、DNS 解析器
pub fn prepare_server_startup(config: &StaticConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    if config.history.capacity == 0 {
        anyhow::bail!("history.capacity must be at least 1");
    }

    let history = Arc::new(HistoryStore::from_config(&config.history));
    match history.get_history() {
        Ok(entries) => info!(
            "History file: {} ({} entries, capacity {})",
            history.file_path().display(),
            entries.len(),
            history.capacity()
        ),
        // 不阻止启动，/api/history 会返回 500 直到文件被修复
        Err(e) => warn!("History file is not readable: {}", e),
    }

    let geoip = Arc::new(ExternalApiProvider::from_config(&config.upstream));
    match config.upstream.timeout_secs {
        Some(secs) => info!(
            "GeoIP: {} provider at {} (timeout {}s)",
            geoip.name(),
            config.upstream.api_url,
            secs
        ),
        None => info!(
            "GeoIP: {} provider at {}",
            geoip.name(),
            config.upstream.api_url
        ),
    }

    let lookup_service = Arc::new(LookupService::new(
        Arc::new(SystemResolver),
        geoip,
        history,
    ));

    debug!("Pre-startup processing completed in {:?}", start_time.elapsed());

    Ok(StartupContext { lookup_service })
}
