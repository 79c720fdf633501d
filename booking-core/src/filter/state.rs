//! The user's current filter selections.

use std::collections::{BTreeMap, BTreeSet};

use super::facet::{FacetIndex, FacetKey};

/// Selections across all facets plus the "only available" toggle.
///
/// A facet with no selected values imposes no constraint. Every operation is
/// total: asking for something impossible (a value the facet doesn't offer,
/// an unknown facet name) is a no-op, not an error. Each operation reports
/// whether it changed anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    only_available: bool,

    /// Only non-empty sets are stored, so equal states compare equal.
    selections: BTreeMap<FacetKey, BTreeSet<String>>,
}

impl FilterState {
    /// A state with nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether sold-out offers are hidden.
    pub fn only_available(&self) -> bool {
        self.only_available
    }

    /// The selected ids of a facet, if any are selected.
    pub fn selection(&self, key: FacetKey) -> Option<&BTreeSet<String>> {
        self.selections.get(&key)
    }

    /// Whether a value is selected.
    pub fn is_selected(&self, key: FacetKey, id: &str) -> bool {
        self.selections.get(&key).is_some_and(|s| s.contains(id))
    }

    /// Facets with at least one selected value, in display order.
    pub fn active(&self) -> impl Iterator<Item = (FacetKey, &BTreeSet<String>)> {
        self.selections.iter().map(|(k, v)| (*k, v))
    }

    /// Whether this state filters nothing out.
    pub fn is_unrestricted(&self) -> bool {
        !self.only_available && self.selections.is_empty()
    }

    /// Select a value if it's unselected, unselect it if it's selected.
    ///
    /// Selecting a value the facet doesn't currently offer does nothing.
    pub fn toggle(&mut self, key: FacetKey, id: &str, facets: &FacetIndex) -> bool {
        if let Some(selected) = self.selections.get_mut(&key) {
            if selected.remove(id) {
                if selected.is_empty() {
                    self.selections.remove(&key);
                }
                return true;
            }
        }

        if !facets.contains(key, id) {
            return false;
        }

        self.selections.entry(key).or_default().insert(id.to_string())
    }

    /// Toggle a value on a facet given by wire name.
    ///
    /// Unknown facet names are ignored.
    pub fn toggle_named(&mut self, key: &str, id: &str, facets: &FacetIndex) -> bool {
        match FacetKey::parse(key) {
            Some(key) => self.toggle(key, id, facets),
            None => false,
        }
    }

    /// Show or hide sold-out offers.
    pub fn set_only_available(&mut self, flag: bool) -> bool {
        let changed = self.only_available != flag;
        self.only_available = flag;
        changed
    }

    /// Clear one facet's selection, leaving everything else alone.
    pub fn reset_facet(&mut self, key: FacetKey) -> bool {
        self.selections.remove(&key).is_some()
    }

    /// Clear every selection and show sold-out offers again.
    pub fn reset_all(&mut self) -> bool {
        let changed = !self.is_unrestricted();
        *self = Self::default();
        changed
    }

    /// Drop selected values the facets no longer offer.
    ///
    /// Called whenever the result set is replaced.
    pub fn prune(&mut self, facets: &FacetIndex) -> bool {
        let mut changed = false;
        self.selections.retain(|key, selected| {
            let before = selected.len();
            selected.retain(|id| facets.contains(*key, id));
            changed |= selected.len() != before;
            !selected.is_empty()
        });
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ResultSet, SeatOffer, TrainCategory, TrainOffer};
    use crate::filter::compute_facets;

    fn facets() -> FacetIndex {
        let mut g1 = TrainOffer::new("G1");
        g1.category = Some(TrainCategory::HighSpeed);
        g1.origin = Some("Shanghai".to_string());
        g1.seats = vec![SeatOffer::new("SECOND_CLASS_SEAT", 10000, 20)];

        let mut k2 = TrainOffer::new("K2");
        k2.category = Some(TrainCategory::GreenTrain);
        k2.origin = Some("Nanjing".to_string());

        compute_facets(&ResultSet::new(vec![g1, k2]))
    }

    #[test]
    fn starts_unrestricted() {
        let state = FilterState::new();
        assert!(state.is_unrestricted());
        assert!(!state.only_available());
        assert_eq!(state.active().count(), 0);
    }

    #[test]
    fn toggle_adds_then_removes() {
        let facets = facets();
        let mut state = FilterState::new();

        assert!(state.toggle(FacetKey::Category, "HIGH_SPEED", &facets));
        assert!(state.is_selected(FacetKey::Category, "HIGH_SPEED"));

        assert!(state.toggle(FacetKey::Category, "HIGH_SPEED", &facets));
        assert!(!state.is_selected(FacetKey::Category, "HIGH_SPEED"));
        assert_eq!(state, FilterState::new());
    }

    #[test]
    fn toggle_unknown_value_is_noop() {
        let facets = facets();
        let mut state = FilterState::new();

        assert!(!state.toggle(FacetKey::Category, "MAGLEV", &facets));
        assert!(!state.toggle(FacetKey::OriginStation, "HIGH_SPEED", &facets));
        assert!(state.is_unrestricted());
    }

    #[test]
    fn toggle_unknown_facet_name_is_noop() {
        let facets = facets();
        let mut state = FilterState::new();

        assert!(!state.toggle_named("price", "HIGH_SPEED", &facets));
        assert!(state.is_unrestricted());

        assert!(state.toggle_named("category", "HIGH_SPEED", &facets));
        assert!(state.is_selected(FacetKey::Category, "HIGH_SPEED"));
    }

    #[test]
    fn set_only_available_reports_change() {
        let mut state = FilterState::new();
        assert!(state.set_only_available(true));
        assert!(!state.set_only_available(true));
        assert!(state.only_available());
        assert!(state.set_only_available(false));
    }

    #[test]
    fn reset_facet_leaves_others() {
        let facets = facets();
        let mut state = FilterState::new();
        state.toggle(FacetKey::Category, "HIGH_SPEED", &facets);
        state.toggle(FacetKey::OriginStation, "Shanghai", &facets);
        state.set_only_available(true);

        assert!(state.reset_facet(FacetKey::Category));
        assert!(state.selection(FacetKey::Category).is_none());
        assert!(state.is_selected(FacetKey::OriginStation, "Shanghai"));
        assert!(state.only_available());

        assert!(!state.reset_facet(FacetKey::Category));
    }

    #[test]
    fn reset_all_clears_everything() {
        let facets = facets();
        let mut state = FilterState::new();
        state.toggle(FacetKey::Category, "HIGH_SPEED", &facets);
        state.toggle(FacetKey::SeatClass, "SECOND_CLASS_SEAT", &facets);
        state.set_only_available(true);

        assert!(state.reset_all());
        assert_eq!(state, FilterState::new());
        assert!(!state.reset_all());
    }

    #[test]
    fn prune_drops_stale_values() {
        let facets = facets();
        let mut state = FilterState::new();
        state.toggle(FacetKey::Category, "HIGH_SPEED", &facets);
        state.toggle(FacetKey::Category, "GREEN_TRAIN", &facets);
        state.toggle(FacetKey::OriginStation, "Shanghai", &facets);

        let mut k2 = TrainOffer::new("K2");
        k2.category = Some(TrainCategory::GreenTrain);
        let narrower = compute_facets(&ResultSet::new(vec![k2]));

        assert!(state.prune(&narrower));
        assert!(state.is_selected(FacetKey::Category, "GREEN_TRAIN"));
        assert!(!state.is_selected(FacetKey::Category, "HIGH_SPEED"));
        assert!(state.selection(FacetKey::OriginStation).is_none());

        assert!(!state.prune(&narrower));
    }

    #[test]
    fn stale_value_can_still_be_unselected() {
        let facets = facets();
        let mut state = FilterState::new();
        state.toggle(FacetKey::Category, "HIGH_SPEED", &facets);

        assert!(state.toggle(FacetKey::Category, "HIGH_SPEED", &FacetIndex::empty()));
        assert!(state.is_unrestricted());
    }
}
