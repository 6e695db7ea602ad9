//! Shared test fixtures: stub resolver / upstream and a temp history file.

#![allow(dead_code, unused_macros)]

use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;
use tempfile::TempDir;

use geolookup::errors::{GeoLookupError, Result};
use geolookup::services::{GeoIpLookup, GeoRecord, HistoryStore, HostResolver, LookupService};

/// Resolver backed by a fixed table; unknown names fail like NXDOMAIN
#[derive(Default)]
pub struct StubResolver {
    hosts: HashMap<String, Ipv4Addr>,
}

impl StubResolver {
    pub fn with(mut self, host: &str, ip: Ipv4Addr) -> Self {
        self.hosts.insert(host.to_string(), ip);
        self
    }
}

#[async_trait]
impl HostResolver for StubResolver {
    async fn resolve(&self, hostname: &str) -> Result<Ipv4Addr> {
        self.hosts.get(hostname).copied().ok_or_else(|| {
            GeoLookupError::resolution_failure(format!("{}: Name or service not known", hostname))
        })
    }
}

/// Upstream stub: canned JSON per IP, transport error for anything else
#[derive(Default)]
pub struct StubGeo {
    replies: HashMap<String, Value>,
    calls: Mutex<Vec<String>>,
}

impl StubGeo {
    pub fn with(mut self, ip: &str, reply: Value) -> Self {
        self.replies.insert(ip.to_string(), reply);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GeoIpLookup for StubGeo {
    async fn fetch(&self, ip: &str) -> Result<GeoRecord> {
        self.calls.lock().unwrap().push(ip.to_string());
        match self.replies.get(ip) {
            Some(value) => GeoRecord::try_from(value.clone())
                .map_err(|_| GeoLookupError::upstream_failure("expected a JSON object")),
            None => Err(GeoLookupError::upstream_failure(format!(
                "http://ip-api.com/json/{}: Connection refused",
                ip
            ))),
        }
    }

    fn name(&self) -> &'static str {
        "Stub"
    }
}

pub struct Fixture {
    pub dir: TempDir,
    pub geo: Arc<StubGeo>,
    pub service: Arc<LookupService>,
}

impl Fixture {
    pub fn new(resolver: StubResolver, geo: StubGeo) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let history = Arc::new(HistoryStore::new(dir.path().join("history.json")));
        let geo = Arc::new(geo);
        let service = Arc::new(LookupService::new(
            Arc::new(resolver),
            geo.clone(),
            history,
        ));
        Self { dir, geo, service }
    }

    pub fn history_path(&self) -> std::path::PathBuf {
        self.dir.path().join("history.json")
    }
}

pub fn google_dns() -> Value {
    serde_json::json!({
        "status": "success",
        "country": "United States",
        "countryCode": "US",
        "region": "VA",
        "regionName": "Virginia",
        "city": "Ashburn",
        "zip": "20149",
        "lat": 39.03,
        "lon": -77.5,
        "timezone": "America/New_York",
        "isp": "Google LLC",
        "org": "Google Public DNS",
        "as": "AS15169 Google LLC",
        "query": "8.8.8.8"
    })
}

pub fn private_range() -> Value {
    serde_json::json!({
        "status": "fail",
        "message": "private range",
        "query": "10.0.0.1"
    })
}

/// App with every route the server registers, backed by the fixture's service
macro_rules! init_app {
    ($service:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(actix_web::middleware::from_fn(
                    geolookup::api::middleware::RequestIdMiddleware::assign,
                ))
                .app_data(actix_web::web::Data::new($service.clone()))
                .app_data(actix_web::web::Data::new(
                    geolookup::api::services::AppStartTime::now(),
                ))
                .service(geolookup::api::services::api_routes())
                .service(geolookup::api::services::health_routes())
                .service(geolookup::api::services::frontend_routes()),
        )
        .await
    };
}
