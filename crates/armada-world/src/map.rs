use crate::{Fleet, Owner, Planet, PlanetId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MapError {
    #[error("line {line}: malformed `{kind}` record: {reason}")]
    Malformed {
        line: usize,
        kind: char,
        reason: String,
    },
    #[error("line {line}: unknown record type `{kind}`")]
    UnknownRecord { line: usize, kind: String },
    #[error("fleet references planet {id} but the map has {count} planets")]
    PlanetOutOfRange { id: PlanetId, count: usize },
    #[error("turn update has {got} planets, expected {expected}")]
    PlanetCountMismatch { got: usize, expected: usize },
}

/// Immutable-per-turn snapshot of the game state, plus the static geometry
/// derived from the first turn.
///
/// Distances are ceilings of Euclidean distance (the number of turns a fleet
/// needs to travel between two planets) and are precomputed into an `N x N`
/// table, together with per-source planet lists sorted by distance (ties by
/// ascending id, so iteration order is deterministic).
#[derive(Debug, Clone)]
pub struct GameMap {
    planets: Vec<Planet>,
    fleets: Vec<Fleet>,
    distances: Vec<i32>,
    by_distance: Vec<PlanetId>,
    fleets_by_dest: Vec<Vec<usize>>,
    map_radius: i32,
    turn: u32,
}

impl GameMap {
    /// Parse the first turn's snapshot and precompute the geometry tables.
    pub fn parse(state: &str) -> Result<Self, MapError> {
        let (planets, fleets) = parse_records(state)?;
        let count = planets.len();

        for fleet in &fleets {
            for id in [fleet.source, fleet.dest] {
                if id >= count {
                    return Err(MapError::PlanetOutOfRange { id, count });
                }
            }
        }

        let mut distances = vec![0i32; count * count];
        let mut map_radius = 0;
        for a in 0..count {
            for b in 0..count {
                let dx = planets[a].x - planets[b].x;
                let dy = planets[a].y - planets[b].y;
                let d = (dx * dx + dy * dy).sqrt().ceil() as i32;
                distances[a * count + b] = d;
                map_radius = map_radius.max(d);
            }
        }

        let mut by_distance = Vec::with_capacity(count * count);
        for source in 0..count {
            let mut ids: Vec<PlanetId> = (0..count).collect();
            ids.sort_by_key(|&id| (distances[source * count + id], id));
            by_distance.extend(ids);
        }

        let mut map = GameMap {
            planets,
            fleets,
            distances,
            by_distance,
            fleets_by_dest: vec![Vec::new(); count],
            map_radius,
            turn: 1,
        };
        map.rebucket_fleets();
        Ok(map)
    }

    /// Re-parse a later turn's snapshot in place. The geometry tables are
    /// kept; the planet count must match the first turn.
    pub fn update(&mut self, state: &str) -> Result<(), MapError> {
        let (planets, fleets) = parse_records(state)?;

        if planets.len() != self.planets.len() {
            return Err(MapError::PlanetCountMismatch {
                got: planets.len(),
                expected: self.planets.len(),
            });
        }

        let count = self.planets.len();
        for fleet in &fleets {
            for id in [fleet.source, fleet.dest] {
                if id >= count {
                    return Err(MapError::PlanetOutOfRange { id, count });
                }
            }
        }

        self.planets = planets;
        self.fleets = fleets;
        self.turn += 1;
        self.rebucket_fleets();
        Ok(())
    }

    fn rebucket_fleets(&mut self) {
        for bucket in &mut self.fleets_by_dest {
            bucket.clear();
        }
        for (i, fleet) in self.fleets.iter().enumerate() {
            self.fleets_by_dest[fleet.dest].push(i);
        }
    }

    pub fn num_planets(&self) -> usize {
        self.planets.len()
    }

    pub fn planet(&self, id: PlanetId) -> &Planet {
        &self.planets[id]
    }

    pub fn planets(&self) -> &[Planet] {
        &self.planets
    }

    pub fn fleets(&self) -> &[Fleet] {
        &self.fleets
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Travel time between two planets, in turns. Symmetric.
    pub fn distance(&self, a: PlanetId, b: PlanetId) -> i32 {
        self.distances[a * self.planets.len() + b]
    }

    /// Largest pairwise distance on the map.
    pub fn map_radius(&self) -> i32 {
        self.map_radius
    }

    /// All planet ids sorted by distance from `source` (including `source`
    /// itself at distance zero).
    pub fn planets_by_distance(&self, source: PlanetId) -> &[PlanetId] {
        let count = self.planets.len();
        &self.by_distance[source * count..(source + 1) * count]
    }

    /// Fleets currently in flight towards `dest`.
    pub fn fleets_arriving_at(&self, dest: PlanetId) -> impl Iterator<Item = &Fleet> {
        self.fleets_by_dest[dest].iter().map(|&i| &self.fleets[i])
    }

    pub fn owned_by(&self, owner: Owner) -> impl Iterator<Item = &Planet> {
        self.planets.iter().filter(move |p| p.owner == owner)
    }

    pub fn not_owned_by(&self, owner: Owner) -> impl Iterator<Item = &Planet> {
        self.planets.iter().filter(move |p| p.owner != owner)
    }

    /// Growth-positive planets held by `owner`.
    pub fn growth_planets(&self, owner: Owner) -> impl Iterator<Item = &Planet> {
        self.owned_by(owner).filter(|p| p.growth_rate > 0)
    }
}

fn parse_records(state: &str) -> Result<(Vec<Planet>, Vec<Fleet>), MapError> {
    let mut planets = Vec::new();
    let mut fleets = Vec::new();

    for (line_no, raw_line) in state.lines().enumerate() {
        let line = match raw_line.find('#') {
            Some(pos) => &raw_line[..pos],
            None => raw_line,
        };
        let mut tokens = line.split_whitespace();
        let Some(kind) = tokens.next() else {
            continue;
        };

        match kind {
            "P" => {
                let fields: Vec<&str> = tokens.collect();
                let planet = parse_planet(planets.len(), &fields).ok_or_else(|| {
                    MapError::Malformed {
                        line: line_no + 1,
                        kind: 'P',
                        reason: format!("expected `x y owner ships growth`, got `{}`", line.trim()),
                    }
                })?;
                planets.push(planet);
            }
            "F" => {
                let fields: Vec<&str> = tokens.collect();
                let fleet = parse_fleet(&fields).ok_or_else(|| MapError::Malformed {
                    line: line_no + 1,
                    kind: 'F',
                    reason: format!(
                        "expected `owner ships src dst trip remaining`, got `{}`",
                        line.trim()
                    ),
                })?;
                fleets.push(fleet);
            }
            "go" => break,
            other => {
                return Err(MapError::UnknownRecord {
                    line: line_no + 1,
                    kind: other.to_string(),
                })
            }
        }
    }

    Ok((planets, fleets))
}

fn parse_planet(id: PlanetId, fields: &[&str]) -> Option<Planet> {
    if fields.len() != 5 {
        return None;
    }
    Some(Planet {
        id,
        x: fields[0].parse().ok()?,
        y: fields[1].parse().ok()?,
        owner: Owner::from_wire(fields[2].parse().ok()?),
        ships: fields[3].parse().ok()?,
        growth_rate: fields[4].parse().ok()?,
    })
}

fn parse_fleet(fields: &[&str]) -> Option<Fleet> {
    if fields.len() != 6 {
        return None;
    }
    Some(Fleet {
        owner: Owner::from_wire(fields[0].parse().ok()?),
        ships: fields[1].parse().ok()?,
        source: fields[2].parse::<i64>().ok()?.try_into().ok()?,
        dest: fields[3].parse::<i64>().ok()?.try_into().ok()?,
        trip_length: fields[4].parse().ok()?,
        turns_remaining: fields[5].parse().ok()?,
    })
}
