//! Type-safe wrappers and enums for game-event data.

pub mod action;
pub mod ids;

pub use action::ActionType;
pub use ids::{EventId, GameId, PlayerId, TeamId};
