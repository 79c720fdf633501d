//! Search collaborator.

use std::future::Future;

use crate::domain::{ResultSet, SearchCriteria};

use super::error::ApiError;

/// Trait for running train searches.
///
/// This abstraction lets the cache and the result page be tested with mock
/// data instead of a live backend.
pub trait SearchProvider {
    /// Search for trains matching the criteria.
    fn search(
        &self,
        criteria: &SearchCriteria,
    ) -> impl Future<Output = Result<ResultSet, ApiError>> + Send;
}
