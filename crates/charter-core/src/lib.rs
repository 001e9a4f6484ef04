//! Charter Core - Foundation crate for the charter seat-availability tracker.
//!
//! This crate provides the shared domain types, the compiled-in vocabularies,
//! error handling, and configuration management that the scanner and the
//! command-line shell depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with platform paths
//! - [`types`] - Query, entry, and result types (`BoatQuery`, `Entry`, `QueryResult`)
//! - [`vocab`] - Fixed species keywords, ship-name allow-list, and exclude keywords
//!
//! # Example
//!
//! ```rust
//! use charter_core::{AppConfig, BoatQuery};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::default();
//! assert_eq!(config.scanning.max_concurrent_lookups, 10);
//!
//! let query = BoatQuery::new("https://example.com/index.php?mid=bk", 2024, 5, 1)?;
//! assert_eq!(query.display_date(), "2024-05-01(수)");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;
pub mod vocab;

// Re-export commonly used types
pub use config::{AppConfig, LoggingConfig, ScanningConfig};
pub use error::{CharterError, ConfigError, ConfigResult};
pub use types::{Boat, BoatEntry, BoatQuery, Entry, QueryResult, ShipStatus};
