//! Domain model types for two-tier facility location.
//!
//! Provides the core abstractions: cities with populations, candidate
//! locations, facility types with coverage radius and capacity, the
//! validated [`Instance`], and the incremental [`Solution`] state with its
//! undo journal.

mod assignment;
mod facility_type;
mod instance;
mod location;
mod solution;
mod undo;

pub use assignment::Assignment;
pub use facility_type::{FacilityType, Role, SECONDARY_LOAD_FACTOR, SECONDARY_RADIUS_FACTOR};
pub use instance::{Instance, InstanceData};
pub use location::{City, Location};
pub use solution::{Centers, Solution};
pub use undo::Checkpoint;
