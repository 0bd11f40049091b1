//! Snake that drives itself: a grid whose body segments decay over time, a
//! movement engine enforcing the decay-aware legality rule, and an A*
//! pathfinder that plans against the same rule.

pub mod autopilot;
pub mod config;
pub mod coords;
pub mod error;
pub mod grid;
pub mod occupant;
pub mod pathfinder;
pub mod state;

pub use autopilot::{Autopilot, Tick};
pub use config::GameConfig;
pub use coords::Coords;
pub use error::{ConfigError, GameError};
pub use grid::Grid;
pub use occupant::{is_passable, Occupant};
pub use pathfinder::{find_path, find_path_between};
pub use state::{GameState, MoveOutcome};
