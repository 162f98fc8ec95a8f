//! Team registry: ordered teams with names and integer scores.

pub mod id;
pub mod registry;

pub use id::TeamId;
pub use registry::{Team, TeamRegistry, MAX_TEAMS};
