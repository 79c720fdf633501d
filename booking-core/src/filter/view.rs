//! Observable filtered view of a result set.
//!
//! `ResultView` ties a result set, its facets and the user's filter state
//! together. Every effective change recomputes the visible offers exactly
//! once and publishes a new `ViewSnapshot` to subscribers.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, trace};

use crate::domain::{ResultSet, TrainOffer};

use super::engine::visible;
use super::facet::{FacetIndex, FacetKey, compute_facets};
use super::state::FilterState;

/// One checkbox in the filter panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetOption {
    /// Selection id.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Whether the box is ticked.
    pub selected: bool,
}

/// One section of the filter panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetOptions {
    /// Which facet this section renders.
    pub key: FacetKey,
    /// Options in display order.
    pub options: Vec<FacetOption>,
}

/// Everything the result page renders, as of one recomputation.
#[derive(Debug, Clone)]
pub struct ViewSnapshot {
    /// Incremented once per recomputation.
    pub revision: u64,
    /// Offers passing the filter, in result order.
    pub visible: Arc<[Arc<TrainOffer>]>,
    /// Facet sections with selection state.
    pub facets: Vec<FacetOptions>,
    /// State of the "only available" toggle.
    pub only_available: bool,
}

/// A batch of filter mutations applied as one change.
///
/// Handed to the closure passed to [`ResultView::update`].
pub struct FilterEdit<'a> {
    state: &'a mut FilterState,
    facets: &'a FacetIndex,
    changed: bool,
}

impl FilterEdit<'_> {
    /// Toggle a facet value.
    pub fn toggle(&mut self, key: FacetKey, id: &str) -> &mut Self {
        self.changed |= self.state.toggle(key, id, self.facets);
        self
    }

    /// Toggle a facet value, naming the facet by wire name.
    pub fn toggle_named(&mut self, key: &str, id: &str) -> &mut Self {
        self.changed |= self.state.toggle_named(key, id, self.facets);
        self
    }

    /// Show or hide sold-out offers.
    pub fn set_only_available(&mut self, flag: bool) -> &mut Self {
        self.changed |= self.state.set_only_available(flag);
        self
    }

    /// Clear one facet.
    pub fn reset_facet(&mut self, key: FacetKey) -> &mut Self {
        self.changed |= self.state.reset_facet(key);
        self
    }

    /// Clear everything.
    pub fn reset_all(&mut self) -> &mut Self {
        self.changed |= self.state.reset_all();
        self
    }
}

/// A result set under the user's current filter.
pub struct ResultView {
    results: ResultSet,
    facets: FacetIndex,
    state: FilterState,
    visible: Arc<[Arc<TrainOffer>]>,
    revision: u64,
    publisher: watch::Sender<ViewSnapshot>,
}

impl ResultView {
    /// Create a view of `results` with nothing filtered.
    pub fn new(results: ResultSet) -> Self {
        let facets = compute_facets(&results);
        let state = FilterState::new();
        let visible: Arc<[Arc<TrainOffer>]> = visible(&results, &state).into();
        let snapshot = build_snapshot(0, &visible, &facets, &state);
        let (publisher, _) = watch::channel(snapshot);

        Self {
            results,
            facets,
            state,
            visible,
            revision: 0,
            publisher,
        }
    }

    /// Swap in a new result set.
    ///
    /// Facets are recomputed and selections the new facets don't offer are
    /// dropped before the single recomputation.
    pub fn replace_results(&mut self, results: ResultSet) {
        self.facets = compute_facets(&results);
        self.results = results;
        if self.state.prune(&self.facets) {
            debug!("pruned stale filter selections");
        }
        self.recompute();
    }

    /// Apply a batch of mutations.
    ///
    /// Recomputes once if anything changed and returns whether it did.
    pub fn update(&mut self, edit: impl FnOnce(&mut FilterEdit<'_>)) -> bool {
        let mut batch = FilterEdit {
            state: &mut self.state,
            facets: &self.facets,
            changed: false,
        };
        edit(&mut batch);
        let changed = batch.changed;

        if changed {
            self.recompute();
        }
        changed
    }

    /// Toggle a facet value.
    pub fn toggle(&mut self, key: FacetKey, id: &str) -> bool {
        self.update(|e| {
            e.toggle(key, id);
        })
    }

    /// Toggle a facet value, naming the facet by wire name.
    pub fn toggle_named(&mut self, key: &str, id: &str) -> bool {
        self.update(|e| {
            e.toggle_named(key, id);
        })
    }

    /// Show or hide sold-out offers.
    pub fn set_only_available(&mut self, flag: bool) -> bool {
        self.update(|e| {
            e.set_only_available(flag);
        })
    }

    /// Clear one facet.
    pub fn reset_facet(&mut self, key: FacetKey) -> bool {
        self.update(|e| {
            e.reset_facet(key);
        })
    }

    /// Clear everything in one transition.
    pub fn reset_all(&mut self) -> bool {
        self.update(|e| {
            e.reset_all();
        })
    }

    /// The current facets.
    pub fn facets(&self) -> &FacetIndex {
        &self.facets
    }

    /// The current filter state.
    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// The offers passing the filter.
    pub fn visible(&self) -> &[Arc<TrainOffer>] {
        &self.visible
    }

    /// Number of recomputations so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The latest published snapshot.
    pub fn snapshot(&self) -> ViewSnapshot {
        self.publisher.borrow().clone()
    }

    /// Subscribe to snapshots published after each recomputation.
    pub fn subscribe(&self) -> watch::Receiver<ViewSnapshot> {
        self.publisher.subscribe()
    }

    fn recompute(&mut self) {
        self.visible = visible(&self.results, &self.state).into();
        self.revision += 1;
        trace!(
            revision = self.revision,
            visible = self.visible.len(),
            total = self.results.len(),
            "recomputed visible offers"
        );

        let snapshot = build_snapshot(self.revision, &self.visible, &self.facets, &self.state);
        self.publisher.send_replace(snapshot);
    }
}

fn build_snapshot(
    revision: u64,
    visible: &Arc<[Arc<TrainOffer>]>,
    facets: &FacetIndex,
    state: &FilterState,
) -> ViewSnapshot {
    let facets = facets
        .iter()
        .map(|facet| FacetOptions {
            key: facet.key,
            options: facet
                .values
                .iter()
                .map(|v| FacetOption {
                    id: v.id.clone(),
                    label: v.label.clone(),
                    selected: state.is_selected(facet.key, &v.id),
                })
                .collect(),
        })
        .collect();

    ViewSnapshot {
        revision,
        visible: Arc::clone(visible),
        facets,
        only_available: state.only_available(),
    }
}
