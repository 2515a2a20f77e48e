//! # u-facility
//!
//! Two-tier facility location heuristics: every city needs a primary and a
//! secondary center, each hosted at a candidate location with an installed
//! facility type that bounds coverage distance and capacity. The goal is to
//! minimize the total installation cost.
//!
//! ## Modules
//!
//! - [`models`]: Domain model types (City, Location, FacilityType, Instance, Solution)
//! - [`distance`]: City-to-location distances and location compatibility
//! - [`evaluation`]: Independent solution checking
//! - [`constructive`]: Constructive heuristics (Greedy, Random, GRASP)
//! - [`local_search`]: Reassignment local search (first and best improvement)
//! - [`solver`]: Solver drivers and the configuration-driven entry point
//! - [`config`]: Solver configuration
//! - [`error`]: Validation errors
//! - [`deadline`]: Cooperative wall-clock deadline

pub mod config;
pub mod constructive;
pub mod deadline;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod local_search;
pub mod models;
pub mod solver;
