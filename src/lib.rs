//! A small, blocking Rust client for the Predix Analytics Framework catalog API.
//!
//! The crate builds catalog URLs, attaches query parameters and forwards
//! GET/POST/PUT calls through a zone-bound HTTP [`Service`].
//!
//! ## Quick start
//! - Configure the zone and base URI via environment variables
//!   (`PREDIX_ANALYTICS_FRAMEWORK_ZONE_ID`, `PREDIX_ANALYTICS_FRAMEWORK_URI`),
//!   or pass them to [`Framework::new`].
//! - Build a [`Catalog`] and call one of its operations.
//!
//! ```no_run
//! use predix_analytics::{AnalyticsQuery, Catalog};
//!
//! fn main() -> predix_analytics::Result<()> {
//!     let catalog = Catalog::from_env()?;
//!     let page = catalog.get_analytics(&AnalyticsQuery {
//!         page: Some(0),
//!         size: 10,
//!         ..Default::default()
//!     })?;
//!     println!("{page:#}");
//!
//!     let logs = catalog.get_logs_for_analytics_id("09718d3d-4a8b-4a04-a7a7-1ba2f9e3f6c8")?;
//!     println!("{logs}");
//!     Ok(())
//! }
//! ```
//!
//! Read operations are only available on catalogs of type
//! [`CatalogType::Analytics`]; calling them on another catalog type returns
//! [`Error::CapabilityMismatch`] without issuing a request.

#![forbid(unsafe_code)]

mod catalog;
mod config;
mod error;
mod framework;
mod service;
mod util;

pub use catalog::{AnalyticsQuery, Catalog, CatalogType, DEFAULT_CATALOG_API};
pub use config::{FrameworkConfig, env_key};
pub use error::{Error, Result};
pub use framework::{ENV_NAMESPACE, Framework};
pub use service::{
    HttpService, Response, ResponseFormat, Service, StaticToken, TokenProvider, ZONE_ID_HEADER,
};
