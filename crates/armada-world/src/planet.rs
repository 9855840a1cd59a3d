use crate::Owner;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Planets are numbered densely starting at zero, in wire order.
pub type PlanetId = usize;

/// One planet on the map.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Planet {
    pub id: PlanetId,
    pub owner: Owner,
    pub ships: i32,
    pub growth_rate: i32,
    pub x: f64,
    pub y: f64,
}

impl Planet {
    pub fn is_owned_by(&self, owner: Owner) -> bool {
        self.owner == owner
    }
}

/// One fleet in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Fleet {
    pub owner: Owner,
    pub ships: i32,
    pub source: PlanetId,
    pub dest: PlanetId,
    pub trip_length: i32,
    pub turns_remaining: i32,
}
