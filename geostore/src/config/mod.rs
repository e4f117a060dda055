//! GeoStore configuration.
//!
//! - [`Config`]: top-level YAML loader
//! - [`ServerConfig`]: bind address
//! - [`CorsConfig`]: CORS policy
//! - [`StoreConfig`]: storage backend, database path and table name
//!
//! Every section is optional; command line flags override the file afterwards.

mod cors;
mod main;
mod server;
mod store;

pub use cors::CorsConfig;
pub use main::Config;
pub use server::ServerConfig;
pub use store::{StoreBackend, StoreConfig};
