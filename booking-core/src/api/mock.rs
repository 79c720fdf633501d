//! File-backed search provider for working without a backend.
//!
//! Loads a search response from a JSON file in the backend's wire format and
//! serves it as if it were a live search result.

use std::path::Path;

use crate::domain::{ResultSet, SearchCriteria};

use super::convert::convert_results;
use super::error::ApiError;
use super::provider::SearchProvider;
use super::types::SearchResponseDto;

/// Search provider that serves a fixed result set from disk.
///
/// The file is read once, when the provider is created.
#[derive(Clone)]
pub struct FileSearchProvider {
    results: ResultSet,
}

impl FileSearchProvider {
    /// Create a provider by loading the given file.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, ApiError> {
        let results = load(path.as_ref())?;
        Ok(Self { results })
    }
}

impl SearchProvider for FileSearchProvider {
    /// Criteria are ignored: the file is the result.
    async fn search(&self, _criteria: &SearchCriteria) -> Result<ResultSet, ApiError> {
        Ok(self.results.clone())
    }
}

fn load(path: &Path) -> Result<ResultSet, ApiError> {
    let json = std::fs::read_to_string(path).map_err(|e| {
        ApiError::NotConfigured(format!("failed to read results file {:?}: {}", path, e))
    })?;

    let response: SearchResponseDto = serde_json::from_str(&json).map_err(|e| ApiError::Json {
        message: format!("failed to parse {:?}: {}", path, e),
        body: None,
    })?;

    Ok(convert_results(response))
}
