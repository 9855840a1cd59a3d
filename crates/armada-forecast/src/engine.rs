use armada_world::{GameMap, Owner, PlanetId, Side};

use crate::forecast::PlanetForecast;
use crate::order::MoveOrder;

/// Number of turns past the map radius the forecast looks ahead.
const HORIZON_SLACK: i32 = 5;

/// All planet forecasts plus a saved baseline, so move candidates can be
/// applied speculatively and rolled back.
///
/// Every mutation goes through the working set and flips that planet's dirty
/// flag; `save_to_base` and `reset_to_base` then copy only the dirty planets
/// in the chosen direction. Support balances are recomputed after every
/// change, since free ships on one planet shift the balance of its whole
/// neighborhood.
#[derive(Debug)]
pub struct TimelineEngine {
    horizon: usize,
    working: Vec<PlanetForecast>,
    base: Vec<PlanetForecast>,
    dirty: Vec<bool>,
}

impl TimelineEngine {
    pub fn new(map: &GameMap) -> Self {
        let horizon = (map.map_radius() + HORIZON_SLACK) as usize;
        let working: Vec<PlanetForecast> = map
            .planets()
            .iter()
            .map(|planet| PlanetForecast::new(planet, map, horizon))
            .collect();

        let mut engine = TimelineEngine {
            horizon,
            base: working.clone(),
            working,
            dirty: vec![false; map.num_planets()],
        };
        engine.update_support(map);
        engine.sync_base();
        engine
    }

    pub fn horizon(&self) -> usize {
        self.horizon
    }

    pub fn num_planets(&self) -> usize {
        self.working.len()
    }

    pub fn forecast(&self, id: PlanetId) -> &PlanetForecast {
        &self.working[id]
    }

    pub fn forecasts(&self) -> impl Iterator<Item = &PlanetForecast> {
        self.working.iter()
    }

    /// Fold one real turn of ground truth into every forecast and accept the
    /// result as the new baseline.
    pub fn ingest_turn(&mut self, map: &GameMap) {
        for (forecast, planet) in self.working.iter_mut().zip(map.planets()) {
            forecast.advance(planet, map);
        }
        self.update_support(map);
        self.sync_base();
    }

    /// Apply a batch of orders to the working forecasts without touching the
    /// baseline. Orders for the same target are folded into one reprojection.
    pub fn apply_speculative(&mut self, map: &GameMap, orders: &[MoveOrder]) {
        if orders.is_empty() {
            return;
        }

        let mut targets: Vec<(PlanetId, Side, Vec<(usize, i32)>)> = Vec::new();
        for order in orders {
            debug_assert!(order.departure >= 0, "order departs in the past");
            let arrival = (order.departure + map.distance(order.source, order.target)) as usize;

            match targets.iter_mut().find(|(id, _, _)| *id == order.target) {
                Some((_, side, arrivals)) => {
                    debug_assert_eq!(*side, order.side, "mixed sides converging on one target");
                    arrivals.push((arrival, order.ships));
                }
                None => targets.push((order.target, order.side, vec![(arrival, order.ships)])),
            }
        }

        for (target, side, arrivals) in targets {
            self.working[target].add_arrivals(side, &arrivals);
            self.dirty[target] = true;
        }

        for order in orders {
            self.working[order.source].add_departure(
                order.side,
                order.departure as usize,
                order.ships,
                order.contingent,
            );
            self.dirty[order.source] = true;
        }

        self.update_support(map);
    }

    /// Promote the working forecasts to the new baseline.
    pub fn save_to_base(&mut self) {
        for (i, dirty) in self.dirty.iter_mut().enumerate() {
            if *dirty {
                self.base[i].clone_from(&self.working[i]);
                *dirty = false;
            }
        }
    }

    /// Roll every speculative change back to the baseline.
    pub fn reset_to_base(&mut self) {
        for (i, dirty) in self.dirty.iter_mut().enumerate() {
            if *dirty {
                self.working[i].clone_from(&self.base[i]);
                *dirty = false;
            }
        }
    }

    /// Flag a planet as a pure reinforcer on both the working and base
    /// forecasts, so the flag survives rollbacks within the turn.
    pub fn set_reinforcer(&mut self, id: PlanetId, reinforcer: bool) {
        self.working[id].set_reinforcer(reinforcer);
        self.base[id].set_reinforcer(reinforcer);
    }

    /// Recompute support balances and fold the result into the baseline.
    /// Needed after reinforcer flags change, since those feed the balances.
    pub fn refresh_support(&mut self, map: &GameMap) {
        self.update_support(map);
        self.save_to_base();
    }

    pub fn ships_required_to_capture(&self, id: PlanetId, offset: usize, side: Side) -> i32 {
        self.working[id].ships_required_to_capture(offset, side)
    }

    pub fn owned_by(&self, owner: Owner, offset: usize) -> Vec<PlanetId> {
        self.working
            .iter()
            .filter(|f| f.is_owned_by(owner, offset))
            .map(|f| f.id())
            .collect()
    }

    pub fn ever_owned(&self, side: Side) -> Vec<PlanetId> {
        self.working
            .iter()
            .filter(|f| f.will_be_owned_by(side))
            .map(|f| f.id())
            .collect()
    }

    pub fn ever_not_owned(&self, side: Side) -> Vec<PlanetId> {
        self.working
            .iter()
            .filter(|f| f.will_not_be_owned_by(side))
            .map(|f| f.id())
            .collect()
    }

    /// Invasion targets: planets the side does not hold on some turn,
    /// excluding those committed as reinforcers.
    pub fn ever_not_owned_non_reinforcer(&self, side: Side) -> Vec<PlanetId> {
        self.working
            .iter()
            .filter(|f| f.will_not_be_owned_by(side) && !f.is_reinforcer())
            .map(|f| f.id())
            .collect()
    }

    /// Planets ever owned by `side`, ordered by distance from `source`.
    pub fn ever_owned_by_distance(
        &self,
        map: &GameMap,
        side: Side,
        source: PlanetId,
    ) -> Vec<PlanetId> {
        map.planets_by_distance(source)
            .iter()
            .copied()
            .filter(|&id| self.working[id].will_be_owned_by(side))
            .collect()
    }

    /// Net projected ship gain over the horizon, summed over all planets.
    pub fn projected_gain(&self) -> i32 {
        self.working.iter().map(|f| f.ships_gained()).sum()
    }

    /// True if any planet outside `except` now projects a worse total
    /// negative support balance than the baseline.
    pub fn has_support_worsened(&self, except: &[PlanetId]) -> bool {
        self.working.iter().zip(&self.base).any(|(working, base)| {
            !except.contains(&working.id())
                && working.total_negative_support() < base.total_negative_support()
        })
    }

    /// How much the total negative support balance improved over the
    /// baseline, summed across planets. Positive is better.
    pub fn support_improvement(&self) -> i32 {
        self.working
            .iter()
            .zip(&self.base)
            .map(|(working, base)| {
                working.total_negative_support() - base.total_negative_support()
            })
            .sum()
    }

    fn sync_base(&mut self) {
        for (i, dirty) in self.dirty.iter_mut().enumerate() {
            self.base[i].clone_from(&self.working[i]);
            *dirty = false;
        }
    }

    /// Recompute every planet's support balance: its garrison signed by
    /// ownership, plus free ships on planets close enough to intervene,
    /// signed by their owner.
    fn update_support(&mut self, map: &GameMap) {
        let horizon = self.horizon;
        let mut balances = vec![0i32; horizon];

        for id in 0..self.working.len() {
            balances.fill(0);

            for offset in 1..horizon {
                let planet = &self.working[id];
                let garrison_sign = if planet.owner_at(offset) == Owner::Mine { 1 } else { -1 };
                let mut balance = planet.ships_at(offset) * garrison_sign;

                for &source_id in map.planets_by_distance(id) {
                    if source_id == id {
                        continue;
                    }
                    let distance = map.distance(id, source_id) as usize;
                    if distance + 1 > offset {
                        break;
                    }

                    let source = &self.working[source_id];
                    if source.is_reinforcer() {
                        continue;
                    }
                    let Some(side) = source.owner_at(offset - distance).side() else {
                        continue;
                    };
                    // Our own ships that would have to leave this very turn
                    // cannot both defend at home and arrive here.
                    if side == Side::Mine && distance == offset - 1 {
                        continue;
                    }
                    balance += side.owner().gain_multiplier()
                        * source.ships_free(offset - distance, side);
                }

                balances[offset] = balance;
            }

            if self.working[id].set_support(&balances) {
                self.dirty[id] = true;
            }
        }
    }
}
