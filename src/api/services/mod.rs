pub mod frontend;
pub mod health;
pub mod lookup;

pub use frontend::{FrontendService, frontend_routes};
pub use health::{AppStartTime, HealthService, health_routes};
pub use lookup::{ErrorBody, LookupHandlers, api_routes};
