//! Mode routing
//!
//! - Server mode (HTTP server, default)
//! - CLI mode (one-shot commands)

pub mod cli;
pub mod server;

pub use cli::{run_config_command, show_history};
pub use server::run_server;
