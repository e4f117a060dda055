//! HTTP transport for the record service.

mod cors;
mod geo_server;
mod handlers;
mod routes;

pub use geo_server::GeoServer;
