//! Greedy constrained planner: repeatedly picks the invasion with the best
//! projected return per ship, under a wall-clock budget, and turns the
//! surviving plans into move orders.

#![forbid(unsafe_code)]

pub mod clock;
pub mod planner;
pub mod pool;
pub mod support;

pub use clock::TurnClock;
pub use planner::{EmittedOrder, InvasionPlanner, PlannerConfig};
pub use pool::{OrderHandle, OrderPool};
pub use support::SupportRegistry;
