use armada_world::{GameMap, PlanetId};

/// Per-target exclusion zones for support commitments.
///
/// When a defense plan promises ships to a target, each contributing source
/// becomes the center of a zone whose radius is its distance to the target.
/// Later plans for the same target may only draw from outside every zone,
/// which stops one crisis from cannibalizing the ships already promised to
/// it. Zones last one planning turn.
#[derive(Debug, Default)]
pub struct SupportRegistry {
    zones: Vec<Vec<(PlanetId, i32)>>,
}

impl SupportRegistry {
    pub fn new(num_planets: usize) -> Self {
        SupportRegistry {
            zones: vec![Vec::new(); num_planets],
        }
    }

    /// Drop all zones and resize for the map.
    pub fn reset(&mut self, num_planets: usize) {
        self.zones.resize(num_planets, Vec::new());
        for zone in &mut self.zones {
            zone.clear();
        }
    }

    pub fn add_constraint(&mut self, target: PlanetId, center: PlanetId, map: &GameMap) {
        let radius = map.distance(center, target);
        self.zones[target].push((center, radius));
    }

    /// True if `source` sits outside every exclusion zone around `target`.
    pub fn may_support(&self, source: PlanetId, target: PlanetId, map: &GameMap) -> bool {
        self.zones[target]
            .iter()
            .all(|&(center, radius)| map.distance(center, source) > radius)
    }
}
