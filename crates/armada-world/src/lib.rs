//! World model for the fleet contest: planets, fleets, distances, battle rules.

#![forbid(unsafe_code)]

pub mod battle;
pub mod map;
pub mod owner;
pub mod planet;

pub use battle::{resolve_battle, BattleOutcome};
pub use map::{GameMap, MapError};
pub use owner::{Owner, Side};
pub use planet::{Fleet, Planet, PlanetId};
