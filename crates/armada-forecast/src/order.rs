use armada_world::{PlanetId, Side};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One planned fleet movement: `ships` leave `source` for `target` at turn
/// offset `departure` (0 = this turn).
///
/// A contingent order reserves the ships at the source without committing
/// them to leave; it models support that is only sent if the target actually
/// comes under attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MoveOrder {
    pub side: Side,
    pub source: PlanetId,
    pub target: PlanetId,
    pub ships: i32,
    pub departure: i32,
    pub contingent: bool,
}

impl MoveOrder {
    pub fn new(side: Side, source: PlanetId, target: PlanetId, ships: i32, departure: i32) -> Self {
        MoveOrder {
            side,
            source,
            target,
            ships,
            departure,
            contingent: false,
        }
    }

    pub fn contingent(mut self) -> Self {
        self.contingent = true;
        self
    }
}
