#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Who controls a planet at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Owner {
    Neutral,
    Mine,
    Enemy,
}

impl Owner {
    /// Decode the wire encoding: 0 is neutral, 1 is us, anything else is the
    /// opponent.
    pub fn from_wire(raw: i64) -> Self {
        match raw {
            0 => Owner::Neutral,
            1 => Owner::Mine,
            _ => Owner::Enemy,
        }
    }

    /// Signed contribution of one turn of growth under this owner, from our
    /// point of view.
    pub fn gain_multiplier(self) -> i32 {
        match self {
            Owner::Neutral => 0,
            Owner::Mine => 1,
            Owner::Enemy => -1,
        }
    }

    pub fn side(self) -> Option<Side> {
        match self {
            Owner::Neutral => None,
            Owner::Mine => Some(Side::Mine),
            Owner::Enemy => Some(Side::Enemy),
        }
    }

    pub fn is_neutral(self) -> bool {
        self == Owner::Neutral
    }
}

/// One of the two playable sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Side {
    Mine,
    Enemy,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Mine => Side::Enemy,
            Side::Enemy => Side::Mine,
        }
    }

    pub fn owner(self) -> Owner {
        match self {
            Side::Mine => Owner::Mine,
            Side::Enemy => Owner::Enemy,
        }
    }
}

impl From<Side> for Owner {
    fn from(side: Side) -> Owner {
        side.owner()
    }
}
