//! Service layer for business logic
//!
//! Shared by the HTTP API and the CLI.

pub mod geoip;
pub mod history;
mod lookup_service;
pub mod resolver;

pub use geoip::{ExternalApiProvider, GeoIpLookup, GeoRecord};
pub use history::HistoryStore;
pub use lookup_service::*;
pub use resolver::{HostResolver, SystemResolver};
