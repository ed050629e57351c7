//! Itinerary planner.
//!
//! Answers "which ways can I fly from here to there within this many hours?"
//! in three steps over a shared, read-only catalog:
//!
//! 1. project every route onto the request window as timed flights,
//! 2. enumerate all simple, forward-in-time paths breadth-first,
//! 3. rank the paths by total elapsed time.

mod config;
mod rank;
mod schedule;
mod search;

pub use config::SearchConfig;
pub use rank::{RankedItineraries, View, rank_itineraries};
pub use schedule::{
    DurationPolicy, FixedDuration, RandomDurations, ScheduleGenerator, SeededDurations,
};
pub use search::{
    Enumeration, PathEnumerator, Planner, SearchBudget, SearchError, SearchRequest, SearchResult,
    enumerate_paths,
};
