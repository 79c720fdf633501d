//! Faceted filtering of search results.
//!
//! The result page lets the user narrow a result set along several
//! independent facets at once (category, departure window, seat class,
//! stations) plus an "only available" toggle.
//!
//! - [`compute_facets`] derives the selectable values from a result set
//! - [`FilterState`] holds the user's selections
//! - [`visible`] applies a state to a result set
//! - [`ResultView`] keeps all three in sync and publishes each change

mod engine;
mod facet;
mod state;
mod view;

#[cfg(test)]
mod test_support;

pub use engine::{is_visible, visible};
pub use facet::{Facet, FacetIndex, FacetKey, FacetValue, compute_facets};
pub use state::FilterState;
pub use view::{FacetOption, FacetOptions, FilterEdit, ResultView, ViewSnapshot};
