//! Itinerary ranking for search results.
//!
//! Itineraries are ranked by total elapsed time (destination arrival minus
//! the requested start). The ranked sequence is computed once and then
//! sliced into views without re-sorting.

use crate::domain::Itinerary;

/// Sort itineraries by total elapsed time, shortest first.
///
/// The sort is stable: itineraries with equal elapsed time keep the order in
/// which the search discovered them.
pub fn rank_itineraries(mut itineraries: Vec<Itinerary>) -> Vec<Itinerary> {
    itineraries.sort_by_key(|it| it.total_elapsed());
    itineraries
}

/// A ranked, read-only set of itineraries.
#[derive(Debug, Clone, Default)]
pub struct RankedItineraries {
    ranked: Vec<Itinerary>,
}

impl RankedItineraries {
    /// Rank itineraries in discovery order.
    pub fn rank(itineraries: Vec<Itinerary>) -> Self {
        Self {
            ranked: rank_itineraries(itineraries),
        }
    }

    /// The itinerary with the lowest total elapsed time.
    pub fn optimal(&self) -> Option<&Itinerary> {
        self.ranked.first()
    }

    /// The `k` best itineraries, best first.
    pub fn top(&self, k: usize) -> &[Itinerary] {
        &self.ranked[..k.min(self.ranked.len())]
    }

    /// The `k` worst itineraries, worst first.
    ///
    /// This is the tail of the ranked sequence, reversed, so the slowest
    /// itinerary overall comes first.
    pub fn bottom(&self, k: usize) -> Vec<&Itinerary> {
        let start = self.ranked.len() - k.min(self.ranked.len());
        self.ranked[start..].iter().rev().collect()
    }

    /// All itineraries, best first.
    pub fn all(&self) -> &[Itinerary] {
        &self.ranked
    }

    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    pub fn into_vec(self) -> Vec<Itinerary> {
        self.ranked
    }
}

/// A selection over ranked itineraries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// The single best itinerary
    Optimal,
    /// The `k` best, best first
    Top(usize),
    /// The `k` worst, worst first
    Worst(usize),
}

impl View {
    /// Apply this view to a ranked result.
    pub fn select<'r>(&self, ranked: &'r RankedItineraries) -> Vec<&'r Itinerary> {
        match *self {
            View::Optimal => ranked.optimal().into_iter().collect(),
            View::Top(k) => ranked.top(k).iter().collect(),
            View::Worst(k) => ranked.bottom(k),
        }
    }
}
