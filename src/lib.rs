//! Geolookup - IP and domain geolocation lookups
//!
//! A small HTTP service that resolves user-supplied IPs or domains, proxies
//! the ip-api.com geolocation API and keeps a short, file-backed history of
//! successful lookups.
//!
//! # Architecture
//! - `utils`: input validation
//! - `services`: DNS resolution, GeoIP client, history store, lookup composition
//! - `api`: HTTP handlers and middleware
//! - `config`: static configuration (TOML + environment)
//! - `runtime`: server and CLI execution modes
//! - `system`: logging setup

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod services;
pub mod system;
pub mod utils;
