//! Application state shared across all request handlers.

use std::sync::Arc;

use crate::suggestions::{SuggestionConfig, SuggestionResult, SuggestionService};

/// Shared application state.
pub struct AppState {
    /// Suggestion service backing every route.
    pub service: SuggestionService,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    /// Returns an error if the suggestion service cannot be created.
    pub fn new(config: SuggestionConfig) -> SuggestionResult<Arc<Self>> {
        let service = SuggestionService::new(config)?;
        Ok(Self::from_service(service))
    }

    /// Wrap an already built service.
    #[must_use]
    pub fn from_service(service: SuggestionService) -> Arc<Self> {
        Arc::new(Self { service })
    }
}
