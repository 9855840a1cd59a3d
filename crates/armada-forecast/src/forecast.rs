use std::ops::{Index, IndexMut};

use armada_world::{resolve_battle, GameMap, Owner, Planet, PlanetId, Side};

use crate::ring::TurnRing;

/// A pair of values, one per playable side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerSide<T> {
    pub mine: T,
    pub enemy: T,
}

impl<T> Index<Side> for PerSide<T> {
    type Output = T;

    fn index(&self, side: Side) -> &T {
        match side {
            Side::Mine => &self.mine,
            Side::Enemy => &self.enemy,
        }
    }
}

impl<T> IndexMut<Side> for PerSide<T> {
    fn index_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::Mine => &mut self.mine,
            Side::Enemy => &mut self.enemy,
        }
    }
}

impl<T: Clone> PerSide<Vec<T>> {
    fn fill(&mut self, value: T) {
        self.mine.fill(value.clone());
        self.enemy.fill(value);
    }
}

/// Projected state of one planet over the forecast horizon.
///
/// Every per-turn array is indexed through the [`TurnRing`], so advancing the
/// frame by one real turn recycles the oldest slot instead of shifting data.
/// The forecast is rebuilt from turn offset 1 onwards whenever an arrival or
/// departure changes (`recalculate`), replaying growth, battles and departures
/// forward and then deriving per-turn capture requirements.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetForecast {
    id: PlanetId,
    growth_rate: i32,
    horizon: usize,
    ring: TurnRing,

    // Ground truth captured at the last real turn.
    snapshot_owner: Owner,
    snapshot_ships: i32,

    owner: Vec<Owner>,
    ships: Vec<i32>,
    arrivals: PerSide<Vec<i32>>,
    departures: PerSide<Vec<i32>>,
    contingent: PerSide<Vec<i32>>,
    reserved: PerSide<Vec<i32>>,
    free: PerSide<Vec<i32>>,
    growth_left: PerSide<Vec<i32>>,
    capture_cost: PerSide<Vec<i32>>,

    will_be: PerSide<bool>,
    will_not_be: PerSide<bool>,

    // Support balances are engine-derived; indexed by offset directly since
    // they are recomputed wholesale after every change.
    support: Vec<i32>,
    min_support: i32,
    total_negative_support: i32,

    reinforcer: bool,
}

impl PlanetForecast {
    pub fn new(planet: &Planet, map: &GameMap, horizon: usize) -> Self {
        let zeros = vec![0i32; horizon];
        let per_side = PerSide {
            mine: zeros.clone(),
            enemy: zeros.clone(),
        };

        let mut forecast = PlanetForecast {
            id: planet.id,
            growth_rate: planet.growth_rate,
            horizon,
            ring: TurnRing::new(horizon),
            snapshot_owner: planet.owner,
            snapshot_ships: planet.ships,
            owner: vec![Owner::Neutral; horizon],
            ships: zeros.clone(),
            arrivals: per_side.clone(),
            departures: per_side.clone(),
            contingent: per_side.clone(),
            reserved: per_side.clone(),
            free: per_side.clone(),
            growth_left: per_side.clone(),
            capture_cost: per_side,
            will_be: PerSide::default(),
            will_not_be: PerSide::default(),
            support: zeros,
            min_support: 0,
            total_negative_support: 0,
            reinforcer: false,
        };
        forecast.ingest(planet, map);
        forecast
    }

    /// Rotate the frame one real turn forward and rebuild from ground truth.
    pub fn advance(&mut self, planet: &Planet, map: &GameMap) {
        self.reinforcer = false;
        self.ring.advance();
        self.ingest(planet, map);
    }

    /// Load the current real state and in-flight fleets, then reproject.
    fn ingest(&mut self, planet: &Planet, map: &GameMap) {
        debug_assert_eq!(planet.id, self.id);

        self.arrivals.fill(0);
        self.departures.fill(0);
        self.contingent.fill(0);
        self.reserved.fill(0);
        self.free.fill(0);
        self.growth_left.fill(0);

        for fleet in map.fleets_arriving_at(self.id) {
            let Some(side) = fleet.owner.side() else {
                continue;
            };
            let offset = fleet.turns_remaining as usize;
            debug_assert!(offset < self.horizon, "fleet arrives beyond the horizon");
            self.arrivals[side][self.ring.index(offset)] += fleet.ships;
        }

        self.snapshot_owner = planet.owner;
        self.snapshot_ships = planet.ships;
        self.reset_starting_data();
        self.recalculate(1);
    }

    pub fn id(&self) -> PlanetId {
        self.id
    }

    pub fn growth_rate(&self) -> i32 {
        self.growth_rate
    }

    pub fn horizon(&self) -> usize {
        self.horizon
    }

    pub fn owner_at(&self, offset: usize) -> Owner {
        self.owner[self.ring.index(offset)]
    }

    pub fn ships_at(&self, offset: usize) -> i32 {
        self.ships[self.ring.index(offset)]
    }

    /// Ships of `side` on the surface at `offset` that are not reserved for
    /// a later departure.
    pub fn ships_free(&self, offset: usize, side: Side) -> i32 {
        let free = self.free[side][self.ring.index(offset)];
        debug_assert!(
            free == 0 || self.owner_at(offset) == side.owner(),
            "free ships on a planet the side does not hold"
        );
        free
    }

    pub fn arrivals_at(&self, offset: usize, side: Side) -> i32 {
        self.arrivals[side][self.ring.index(offset)]
    }

    pub fn is_owned_by(&self, owner: Owner, offset: usize) -> bool {
        self.owner_at(offset) == owner
    }

    /// True if the planet is projected to belong to `side` on some turn.
    pub fn will_be_owned_by(&self, side: Side) -> bool {
        self.will_be[side]
    }

    /// True if the planet is projected to not belong to `side` on some turn.
    pub fn will_not_be_owned_by(&self, side: Side) -> bool {
        self.will_not_be[side]
    }

    /// Extra ships `side` must land at `offset` to own the planet on that
    /// turn and keep it through the rest of the horizon.
    pub fn ships_required_to_capture(&self, offset: usize, side: Side) -> i32 {
        self.capture_cost[side][self.ring.index(offset)]
    }

    pub fn is_reinforcer(&self) -> bool {
        self.reinforcer
    }

    pub fn set_reinforcer(&mut self, reinforcer: bool) {
        self.reinforcer = reinforcer;
    }

    pub fn support_at(&self, offset: usize) -> i32 {
        self.support[offset]
    }

    /// Worst support balance over the horizon.
    pub fn min_support(&self) -> i32 {
        self.min_support
    }

    /// Sum of the negative support balances over the horizon. Zero when the
    /// planet is safe on every turn; more negative means worse.
    pub fn total_negative_support(&self) -> i32 {
        self.total_negative_support
    }

    /// Replace the support balances. Returns true if anything changed.
    pub fn set_support(&mut self, balances: &[i32]) -> bool {
        debug_assert_eq!(balances.len(), self.horizon);
        if self.support == balances {
            return false;
        }
        self.support.copy_from_slice(balances);

        let mut min_support = i32::MAX;
        let mut total_negative = 0;
        for &balance in &self.support[1..] {
            min_support = min_support.min(balance);
            if balance < 0 {
                total_negative += balance;
            }
        }
        self.min_support = if self.horizon > 1 { min_support } else { 0 };
        self.total_negative_support = total_negative;
        true
    }

    /// Net ships-per-horizon gain this planet contributes from our point of
    /// view: growth while we hold it minus growth while the opponent does.
    pub fn ships_gained(&self) -> i32 {
        let mut gained = 0;
        for offset in 1..self.horizon {
            gained += self.owner_at(offset).gain_multiplier() * self.growth_rate;
        }
        gained
    }

    /// Record a departure of `ships` at turn offset `departure`.
    ///
    /// Contingent departures only reserve ships against earlier turns; real
    /// ones leave the surface, which forces a full reprojection.
    pub fn add_departure(&mut self, side: Side, departure: usize, ships: i32, contingent: bool) {
        let slot = self.ring.index(departure);

        if contingent {
            self.contingent[side][slot] += ships;
            self.reserve(side, departure, ships);
            return;
        }

        debug_assert!(
            ships <= self.ships[slot],
            "departing {ships} ships but only {} present",
            self.ships[slot]
        );
        self.departures[side][slot] += ships;
        self.reset_starting_data();
        self.recalculate(1);
    }

    /// Record a batch of same-side arrivals as `(offset, ships)` pairs and
    /// reproject once.
    pub fn add_arrivals(&mut self, side: Side, arrivals: &[(usize, i32)]) {
        if arrivals.is_empty() {
            return;
        }

        for &(offset, ships) in arrivals {
            debug_assert!(offset < self.horizon, "arrival beyond the horizon");
            self.arrivals[side][self.ring.index(offset)] += ships;
        }
        self.reset_starting_data();
        self.recalculate(1);
    }

    /// Rewind turn offset 0 to the last real snapshot, clearing every
    /// reservation so `recalculate` can rebuild them from the departures.
    fn reset_starting_data(&mut self) {
        self.reserved.fill(0);
        self.growth_left.fill(0);

        let slot = self.ring.index(0);
        let departing = self.departures.mine[slot] + self.departures.enemy[slot];
        let on_surface = self.snapshot_ships - departing;

        self.owner[slot] = self.snapshot_owner;
        self.ships[slot] = on_surface;
        self.free.mine[slot] = if self.snapshot_owner == Owner::Mine {
            on_surface
        } else {
            0
        };
        self.free.enemy[slot] = if self.snapshot_owner == Owner::Enemy {
            on_surface
        } else {
            0
        };
        self.capture_cost.mine[slot] = if self.snapshot_owner == Owner::Mine {
            0
        } else {
            on_surface + 1
        };
        self.capture_cost.enemy[slot] = if self.snapshot_owner == Owner::Enemy {
            0
        } else {
            on_surface + 1
        };

        self.will_be.mine = self.snapshot_owner == Owner::Mine;
        self.will_not_be.mine = self.snapshot_owner != Owner::Mine;
        self.will_be.enemy = self.snapshot_owner == Owner::Enemy;
        self.will_not_be.enemy = self.snapshot_owner != Owner::Enemy;
    }

    /// Replay growth, battles and departures forward from `starting_at`.
    fn recalculate(&mut self, starting_at: usize) {
        let growth = self.growth_rate;

        for offset in starting_at..self.horizon {
            let prev = self.ring.index(offset - 1);
            let cur = self.ring.index(offset);
            let prev_owner = self.owner[prev];
            let prev_ships = self.ships[prev];

            let base_ships = prev_ships + if prev_owner.is_neutral() { 0 } else { growth };
            let mine_arrivals = self.arrivals.mine[cur];
            let enemy_arrivals = self.arrivals.enemy[cur];

            if mine_arrivals == 0 && enemy_arrivals == 0 {
                self.owner[cur] = prev_owner;
                self.ships[cur] = base_ships;
            } else {
                let neutral = if prev_owner.is_neutral() { base_ships } else { 0 };
                let mine = mine_arrivals + if prev_owner == Owner::Mine { base_ships } else { 0 };
                let enemy =
                    enemy_arrivals + if prev_owner == Owner::Enemy { base_ships } else { 0 };
                let outcome = resolve_battle(prev_owner, neutral, mine, enemy);
                self.owner[cur] = outcome.owner;
                self.ships[cur] = outcome.ships_remaining;
            }

            let cur_owner = self.owner[cur];
            for side in [Side::Mine, Side::Enemy] {
                let departing = self.departures[side][cur];
                if departing > 0 {
                    debug_assert_eq!(
                        cur_owner,
                        side.owner(),
                        "departure from a planet the side no longer holds"
                    );
                    debug_assert!(
                        departing <= self.ships[cur],
                        "departing more ships than present"
                    );
                    self.reserve(side, offset, departing);
                    self.ships[cur] -= departing;
                }
            }

            let cur_ships = self.ships[cur];
            debug_assert!(cur_ships >= 0, "negative garrison");

            self.will_be.mine |= cur_owner == Owner::Mine;
            self.will_not_be.mine |= cur_owner != Owner::Mine;
            self.will_be.enemy |= cur_owner == Owner::Enemy;
            self.will_not_be.enemy |= cur_owner != Owner::Enemy;

            self.free.mine[cur] = if cur_owner == Owner::Mine { cur_ships } else { 0 };
            self.free.enemy[cur] = if cur_owner == Owner::Enemy { cur_ships } else { 0 };
            self.growth_left.mine[cur] = if cur_owner == Owner::Mine { growth } else { 0 };
            self.growth_left.enemy[cur] = if cur_owner == Owner::Enemy { growth } else { 0 };

            for side in [Side::Mine, Side::Enemy] {
                let contingent = self.contingent[side][cur];
                if contingent > 0 {
                    self.reserve(side, offset, contingent);
                }
            }

            for side in [Side::Mine, Side::Enemy] {
                self.capture_cost[side][cur] = capture_cost(
                    side,
                    cur_owner,
                    prev_owner,
                    base_ships,
                    self.arrivals[side][cur],
                    self.arrivals[side.opponent()][cur],
                );
            }

            if mine_arrivals == 0 && enemy_arrivals == 0 {
                if cur_owner.is_neutral() {
                    debug_assert_eq!(self.ships[cur], prev_ships);
                } else {
                    debug_assert_eq!(
                        self.ships[cur],
                        prev_ships + growth
                            - self.departures.mine[cur]
                            - self.departures.enemy[cur]
                    );
                }
            }
        }

        // A capture only sticks if it also covers what the following turns
        // demand, less the growth banked in between.
        for side in [Side::Mine, Side::Enemy] {
            for offset in (1..self.horizon.saturating_sub(1)).rev() {
                let cur = self.ring.index(offset);
                if self.owner[cur] == side.owner() {
                    continue;
                }
                let next = self.ring.index(offset + 1);
                let propagated = self.capture_cost[side][next] - growth;
                if propagated > self.capture_cost[side][cur] {
                    self.capture_cost[side][cur] = propagated;
                }
            }
        }
    }

    /// Earmark `ships` of `side` on turns before `key_time` so they are not
    /// offered as free elsewhere. Growth accruing between now and the
    /// departure absorbs the reservation first; whatever remains is pinned
    /// against each earlier turn's garrison.
    fn reserve(&mut self, side: Side, key_time: usize, ships: i32) {
        debug_assert!(key_time < self.horizon);

        let mut remaining = ships;
        for offset in (0..key_time).rev() {
            let slot = self.ring.index(offset);

            let from_growth = self.growth_left[side][slot].min(remaining);
            self.growth_left[side][slot] -= from_growth;
            remaining -= from_growth;

            if remaining <= 0 {
                break;
            }

            self.reserved[side][slot] += remaining;
            let owned = if self.owner[slot] == side.owner() {
                self.ships[slot]
            } else {
                0
            };
            self.free[side][slot] = (owned - self.reserved[side][slot]).max(0);
        }
    }
}

/// Extra ships `side` must land on a turn, on top of its projected arrivals,
/// to win the battle resolved there.
fn capture_cost(
    side: Side,
    cur_owner: Owner,
    prev_owner: Owner,
    base_ships: i32,
    own_arrivals: i32,
    opp_arrivals: i32,
) -> i32 {
    let cost = if cur_owner == side.owner() {
        0
    } else if cur_owner.is_neutral() {
        // Beat both the garrison and the rival attacker outright.
        base_ships.max(opp_arrivals) - own_arrivals + 1
    } else if prev_owner.is_neutral() {
        // The opponent overran the garrison; outbid its landing force.
        opp_arrivals - own_arrivals + 1
    } else if prev_owner == side.owner() {
        // Defending: a tie keeps the planet, so no overshoot needed.
        opp_arrivals - base_ships - own_arrivals
    } else {
        // The opponent defends with its garrison behind it.
        opp_arrivals + base_ships - own_arrivals + 1
    };
    cost.max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_cost_against_neutral_garrison() {
        let cost = capture_cost(Side::Mine, Owner::Neutral, Owner::Neutral, 20, 0, 0);
        assert_eq!(cost, 21);
    }

    #[test]
    fn capture_cost_defending_own_planet_allows_tie() {
        // 12 enemy arrivals against our pool of 10: 2 more ships tie and hold.
        let cost = capture_cost(Side::Mine, Owner::Enemy, Owner::Mine, 10, 0, 12);
        assert_eq!(cost, 2);
    }

    #[test]
    fn capture_cost_attacking_enemy_garrison_needs_strict_win() {
        let cost = capture_cost(Side::Mine, Owner::Enemy, Owner::Enemy, 10, 3, 0);
        assert_eq!(cost, 8);
    }

    #[test]
    fn capture_cost_never_negative() {
        let cost = capture_cost(Side::Mine, Owner::Enemy, Owner::Mine, 50, 0, 10);
        assert_eq!(cost, 0);
    }
}
