//! Application state for the rate engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{ConfigLoader, RateCard};

/// Shared application state.
///
/// The rate card is loaded once and read concurrently by every handler.
#[derive(Clone)]
pub struct AppState {
    /// The loaded rate card configuration.
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the loaded rate card.
    pub fn card(&self) -> &RateCard {
        self.config.card()
    }
}
