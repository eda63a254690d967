//! Sumika - faceted catalog search server
//!
//! An HTTP API serving two listing catalogs (chairs and estates) with:
//! - Range-bucket and categorical faceted search with popularity ranking
//! - Point-in-polygon area search over estate locations
//! - A cached low-priced view served without touching the database
//! - CSV bulk ingest with synchronous cache refresh

pub mod api;
pub mod cache;
pub mod conditions;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod state;

pub use config::Config;
pub use error::{Error, Result};
pub use state::AppState;
