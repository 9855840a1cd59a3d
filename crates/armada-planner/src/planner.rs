use armada_forecast::{MoveOrder, TimelineEngine};
use armada_world::{GameMap, PlanetId, Side};
use tracing::debug;

use crate::clock::TurnClock;
use crate::pool::{OrderHandle, OrderPool};
use crate::support::SupportRegistry;

/// Tuning knobs for the planner.
#[derive(Debug, Clone, Copy)]
pub struct PlannerConfig {
    /// Multiplier on the return of plans that wrestle a planet from the
    /// opponent, since those swing growth both ways.
    pub aggression_bonus: f64,
    /// Apply the aggression bonus to the final return, not just the upper
    /// bound used for pruning.
    pub aggression_on_final: bool,
    /// Inflate invasion deficits by opposing free ships close enough to
    /// counter the landing.
    pub count_enemy_reach: bool,
    /// Plan opposing invasions of neutral planets as if the opponent must
    /// also pay the garrison a second time, modelling arriving second.
    pub second_player_margin: bool,
    /// Register support exclusion zones as soon as a defense plan commits.
    pub eager_support_commit: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        PlannerConfig {
            aggression_bonus: 3.0,
            aggression_on_final: true,
            count_enemy_reach: true,
            second_player_margin: true,
            eager_support_commit: true,
        }
    }
}

impl PlannerConfig {
    pub fn with_aggression_bonus(mut self, bonus: f64) -> Self {
        self.aggression_bonus = bonus;
        self
    }

    pub fn with_count_enemy_reach(mut self, enabled: bool) -> Self {
        self.count_enemy_reach = enabled;
        self
    }
}

/// A move order ready for the wire: `ships` leave `source` for `target`
/// this turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmittedOrder {
    pub source: PlanetId,
    pub target: PlanetId,
    pub ships: i32,
}

/// Turn planner: greedily commits the invasion or defense plan with the
/// best projected return per ship until the well runs dry or the clock does.
///
/// Committed orders persist across turns in the [`OrderPool`]; each turn they
/// age one step, get revalidated against the fresh forecast, and are emitted
/// once their departure offset reaches zero.
#[derive(Debug, Default)]
pub struct InvasionPlanner {
    config: PlannerConfig,
    pool: OrderPool,
    support: SupportRegistry,
    committed: Vec<OrderHandle>,
    /// Earliest arrival offset, per planet, at which attacks led by a
    /// reinforcer are allowed. Rebuilt each turn from the committed attacks.
    feeder_ok: Vec<i32>,
}

impl InvasionPlanner {
    pub fn new(config: PlannerConfig) -> Self {
        InvasionPlanner {
            config,
            ..InvasionPlanner::default()
        }
    }

    /// Plan one turn for our side and return the orders leaving now.
    pub fn plan_turn(
        &mut self,
        map: &GameMap,
        engine: &mut TimelineEngine,
        clock: &TurnClock,
    ) -> Vec<EmittedOrder> {
        let num_planets = map.num_planets();
        let horizon = engine.horizon() as i32;
        self.support.reset(num_planets);
        self.feeder_ok.clear();
        self.feeder_ok.resize(num_planets, horizon);

        self.reapply_committed(map, engine);
        self.mark_reinforcers(map, engine, Side::Mine);
        self.find_actions(map, engine, clock, Side::Mine);
        self.send_fleets_to_front(map, engine, clock, Side::Mine);

        let mut emitted = Vec::new();
        let mut keep = Vec::new();
        for handle in std::mem::take(&mut self.committed) {
            let order = *self.pool.get(handle);
            if order.departure > 0 {
                keep.push(handle);
                continue;
            }
            if !order.contingent {
                emitted.push(EmittedOrder {
                    source: order.source,
                    target: order.target,
                    ships: order.ships,
                });
            }
            self.pool.release(handle);
        }
        self.committed = keep;

        debug!(
            orders = emitted.len(),
            pending = self.committed.len(),
            elapsed_ms = clock.elapsed_ms(),
            "turn planned"
        );
        emitted
    }

    /// Age the orders committed on earlier turns, drop the ones reality has
    /// invalidated, and replay the rest onto the fresh baseline.
    fn reapply_committed(&mut self, map: &GameMap, engine: &mut TimelineEngine) {
        let mut survivors = Vec::with_capacity(self.committed.len());

        for handle in std::mem::take(&mut self.committed) {
            let order = {
                let order = self.pool.get_mut(handle);
                order.departure -= 1;
                *order
            };
            if order.departure < 0 {
                self.pool.release(handle);
                continue;
            }

            let departure = order.departure as usize;
            let source = engine.forecast(order.source);
            let valid = order.contingent
                || (source.owner_at(departure) == order.side.owner()
                    && order.ships <= source.ships_at(departure));
            if !valid {
                debug!(
                    src = order.source,
                    dst = order.target,
                    ships = order.ships,
                    "dropping an order reality overtook"
                );
                self.pool.release(handle);
                continue;
            }

            engine.apply_speculative(map, std::slice::from_ref(&order));
            survivors.push(handle);
        }

        engine.save_to_base();
        self.committed = survivors;

        for &handle in &self.committed {
            let order = *self.pool.get(handle);
            if order.contingent {
                continue;
            }
            if engine.forecast(order.target).owner_at(0) != order.side.owner() {
                let arrival = order.departure + map.distance(order.source, order.target);
                self.feeder_ok[order.target] = self.feeder_ok[order.target].min(arrival);
            }
        }
    }

    /// Flag planets that are walled off from every opposing growth planet by
    /// a closer ally. Their garrisons serve the front line, not invasions.
    fn mark_reinforcers(&self, map: &GameMap, engine: &mut TimelineEngine, side: Side) {
        let opponent = side.opponent().owner();
        let threats: Vec<PlanetId> = engine
            .forecasts()
            .filter(|f| f.is_owned_by(opponent, 0) && f.growth_rate() > 0)
            .map(|f| f.id())
            .collect();
        let allies = engine.owned_by(side.owner(), 0);

        for &planet in &allies {
            let shielded = !threats.is_empty()
                && threats.iter().all(|&threat| {
                    let direct = map.distance(planet, threat);
                    allies.iter().any(|&ally| {
                        ally != planet
                            && map.distance(planet, ally) + map.distance(ally, threat) <= direct
                    })
                });
            engine.set_reinforcer(planet, shielded);
        }
        engine.refresh_support(map);
    }

    /// Greedy outer loop: keep committing the best remaining plan until no
    /// plan has a positive return or the clock runs out.
    fn find_actions(
        &mut self,
        map: &GameMap,
        engine: &mut TimelineEngine,
        clock: &TurnClock,
        side: Side,
    ) {
        loop {
            if clock.expired() {
                debug!(elapsed_ms = clock.elapsed_ms(), "planning budget exhausted");
                return;
            }
            let Some((plan, ratio)) = self.best_remaining_move(map, engine, clock, side) else {
                return;
            };
            if ratio <= 0.0 {
                return;
            }

            let target = plan[0].target;
            let arrival =
                (plan[0].departure + map.distance(plan[0].source, target)) as usize;
            let against_opponent =
                engine.forecast(target).owner_at(arrival) == side.opponent().owner();
            let defending = engine.forecast(target).is_owned_by(side.owner(), 0);

            engine.apply_speculative(map, &plan);
            engine.save_to_base();

            if against_opponent {
                self.feeder_ok[target] = self.feeder_ok[target].min(arrival as i32);
            }
            if defending && self.config.eager_support_commit {
                for order in &plan {
                    self.support.add_constraint(target, order.source, map);
                }
            }

            let ships: i32 = plan.iter().map(|o| o.ships).sum();
            debug!(dst = target, ships, ratio, "committed plan");
            for order in plan {
                self.committed.push(self.pool.checkout(order));
            }
        }
    }

    /// Scan every target and arrival turn for the plan with the best return
    /// per ship. Ties keep the earliest candidate found. A clock expiry
    /// mid-scan discards the partial result, since a best-so-far from half a
    /// scan is not the best remaining move.
    fn best_remaining_move(
        &self,
        map: &GameMap,
        engine: &mut TimelineEngine,
        clock: &TurnClock,
        side: Side,
    ) -> Option<(Vec<MoveOrder>, f64)> {
        let horizon = engine.horizon();
        let mut best: Option<(Vec<MoveOrder>, f64)> = None;

        for target in engine.ever_not_owned_non_reinforcer(side) {
            if engine.forecast(target).growth_rate() <= 0 {
                continue;
            }
            let sources = engine.ever_owned_by_distance(map, side, target);
            let Some(&nearest) = sources.iter().find(|&&s| s != target) else {
                continue;
            };
            let first_arrival = (map.distance(nearest, target) as usize).max(1);

            for arrival in first_arrival..horizon {
                if clock.expired() {
                    return None;
                }
                let Some(plan) = self.find_invasion_plan(map, engine, side, target, arrival)
                else {
                    continue;
                };
                let best_ratio = best.as_ref().map_or(f64::NEG_INFINITY, |(_, r)| *r);
                let ratio =
                    self.return_for_move(map, engine, side, target, arrival, &plan, best_ratio);
                if ratio > best_ratio {
                    best = Some((plan, ratio));
                }
            }
        }
        best
    }

    /// Assemble the cheapest set of sources that covers the capture deficit
    /// for `target` at `arrival`, walking sources nearest first. Returns
    /// nothing if the deficit cannot be covered.
    fn find_invasion_plan(
        &self,
        map: &GameMap,
        engine: &TimelineEngine,
        side: Side,
        target: PlanetId,
        arrival: usize,
    ) -> Option<Vec<MoveOrder>> {
        if engine.ships_required_to_capture(target, arrival, side) <= 0 {
            return None;
        }
        let against_opponent =
            engine.forecast(target).owner_at(arrival) == side.opponent().owner();

        let mut plan: Vec<MoveOrder> = Vec::new();
        let mut allocated = 0;
        let mut band = 0;
        let mut remaining = 0;

        for source in engine.ever_owned_by_distance(map, side, target) {
            if source == target {
                continue;
            }
            let distance = map.distance(source, target);
            if distance as usize > arrival {
                break;
            }

            // Opponents farther than our farthest contributor are someone
            // else's problem; widen the deficit only when the band grows.
            if distance > band {
                band = distance;
                remaining =
                    self.invasion_deficit(map, engine, side, target, arrival, band) - allocated;
                if remaining <= 0 {
                    break;
                }
            }

            let forecast = engine.forecast(source);
            if forecast.is_reinforcer()
                && against_opponent
                && plan.is_empty()
                && self.feeder_ok[target] > arrival as i32
            {
                continue;
            }

            let departure = arrival - distance as usize;
            let free = forecast.ships_free(departure, side);
            if free <= 0 {
                continue;
            }
            if !self.support.may_support(source, target, map) {
                continue;
            }

            let ships = free.min(remaining);
            plan.push(MoveOrder::new(side, source, target, ships, departure as i32));
            allocated += ships;
            remaining -= ships;
            if remaining <= 0 {
                break;
            }
        }

        if remaining > 0 || plan.is_empty() {
            return None;
        }
        Some(plan)
    }

    /// Ships `side` must land at `arrival` to take and hold `target`,
    /// counting opposing free ships within `band` of the target that could
    /// counter the landing.
    fn invasion_deficit(
        &self,
        map: &GameMap,
        engine: &TimelineEngine,
        side: Side,
        target: PlanetId,
        arrival: usize,
        band: i32,
    ) -> i32 {
        let forecast = engine.forecast(target);
        let mut deficit = forecast.ships_required_to_capture(arrival, side);

        if self.config.second_player_margin
            && side == Side::Enemy
            && forecast.owner_at(arrival).is_neutral()
        {
            deficit += forecast.ships_at(arrival);
        }

        if self.config.count_enemy_reach {
            let opponent = side.opponent();
            for &planet in map.planets_by_distance(target) {
                if planet == target {
                    continue;
                }
                let distance = map.distance(target, planet);
                if distance > band {
                    break;
                }
                let distance = distance as usize;
                if distance > arrival {
                    continue;
                }
                deficit += engine.forecast(planet).ships_free(arrival - distance, opponent);
            }
        }

        deficit
    }

    /// Projected ships gained per ship sent, from speculatively applying the
    /// plan. `best_so_far` lets an optimistic upper bound skip the apply.
    #[allow(clippy::too_many_arguments)]
    fn return_for_move(
        &self,
        map: &GameMap,
        engine: &mut TimelineEngine,
        side: Side,
        target: PlanetId,
        arrival: usize,
        plan: &[MoveOrder],
        best_so_far: f64,
    ) -> f64 {
        let sent: i32 = plan.iter().map(|o| o.ships).sum();
        if sent <= 0 {
            return 0.0;
        }

        let forecast = engine.forecast(target);
        let against_opponent = forecast.owner_at(arrival) == side.opponent().owner();
        let neutral_at_arrival = forecast.owner_at(arrival).is_neutral();
        let garrison = forecast.ships_at(arrival);
        let growth = forecast.growth_rate();

        let bonus = if against_opponent {
            self.config.aggression_bonus
        } else {
            1.0
        };
        // Taking a planet from the opponent swings its growth both ways.
        let swing = if against_opponent { 2 * growth } else { growth };
        let horizon = engine.horizon();
        let upper_bound = swing as f64 * (horizon - arrival) as f64 * bonus / sent as f64;
        if upper_bound <= best_so_far {
            return upper_bound;
        }

        let base_gain = engine.projected_gain();
        engine.apply_speculative(map, plan);
        let mut gained = (engine.projected_gain() - base_gain) as f64;
        engine.reset_to_base();

        // Ships ground down by a neutral garrison are part of the price.
        if neutral_at_arrival {
            gained -= garrison.min(sent) as f64;
        }

        let final_bonus = if against_opponent && self.config.aggression_on_final {
            self.config.aggression_bonus
        } else {
            1.0
        };
        gained * final_bonus / sent as f64
    }

    /// Push idle rear garrisons one hop towards the nearest front, as long
    /// as doing so leaves no third planet worse off. Sources that feed the
    /// front become reinforcers.
    fn send_fleets_to_front(
        &mut self,
        map: &GameMap,
        engine: &mut TimelineEngine,
        clock: &TurnClock,
        side: Side,
    ) {
        let opponent = side.opponent().owner();

        for source in engine.owned_by(side.owner(), 0) {
            if clock.expired() {
                debug!(elapsed_ms = clock.elapsed_ms(), "no time left for the front");
                return;
            }
            let forecast = engine.forecast(source);
            let free = forecast.ships_free(0, side);
            if free <= 0 {
                continue;
            }
            let growth = forecast.growth_rate();
            let spare = forecast.min_support().max(0).min(free);

            let Some(&front) = map.planets_by_distance(source).iter().find(|&&p| {
                engine.forecast(p).is_owned_by(opponent, 0) && engine.forecast(p).growth_rate() > 0
            }) else {
                return;
            };
            let direct = map.distance(source, front);
            let Some(&dest) = map.planets_by_distance(source).iter().find(|&&p| {
                p != source
                    && engine.forecast(p).is_owned_by(side.owner(), 0)
                    && map.distance(p, front) < direct
            }) else {
                continue;
            };

            for ships in [spare, (2 * growth).min(free)] {
                if ships <= 0 {
                    continue;
                }
                let order = MoveOrder::new(side, source, dest, ships, 0);
                engine.apply_speculative(map, std::slice::from_ref(&order));
                if engine.has_support_worsened(&[source, dest]) {
                    engine.reset_to_base();
                    continue;
                }
                engine.save_to_base();
                self.committed.push(self.pool.checkout(order));
                engine.set_reinforcer(source, true);
                engine.refresh_support(map);
                debug!(src = source, dst = dest, ships, "reinforcing the front");
                break;
            }
        }
    }
}
