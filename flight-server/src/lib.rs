//! Flight itinerary planner server.
//!
//! Loads the OpenFlights route network, projects it onto a requested time
//! window and answers: "which ways can I fly from A to B within N hours,
//! and which of them gets me there soonest?"

pub mod catalog;
pub mod config;
pub mod domain;
pub mod openflights;
pub mod planner;
pub mod web;
