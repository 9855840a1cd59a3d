//! Multi-turn forecasting engine: per-planet timelines of ownership, garrisons,
//! reservations and capture requirements, with speculative apply and rollback.

#![forbid(unsafe_code)]

pub mod engine;
pub mod forecast;
pub mod order;
pub mod ring;

pub use engine::TimelineEngine;
pub use forecast::{PerSide, PlanetForecast};
pub use order::MoveOrder;
pub use ring::TurnRing;
