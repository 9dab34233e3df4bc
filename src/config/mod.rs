//! Configuration loading and management for the rate engine.
//!
//! This module loads a rate card from YAML files: card metadata plus every
//! role with its per-arrangement rate tables.
//!
//! # Example
//!
//! ```no_run
//! use rate_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/rate_card").unwrap();
//! println!("Loaded rate card: {}", config.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{RateCard, RateCardMetadata, RolesConfig};
