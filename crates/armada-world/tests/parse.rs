use armada_world::{GameMap, MapError, Owner};

const FIRST_TURN: &str = "\
P 0.0 0.0 1 100 5
P 10.0 0.0 2 100 5
P 5.0 4.0 0 30 2
F 1 20 0 2 7 3
go
";

#[test]
fn parses_planets_and_fleets() {
    let map = GameMap::parse(FIRST_TURN).unwrap();

    assert_eq!(map.num_planets(), 3);
    assert_eq!(map.planet(0).owner, Owner::Mine);
    assert_eq!(map.planet(1).owner, Owner::Enemy);
    assert_eq!(map.planet(2).owner, Owner::Neutral);
    assert_eq!(map.planet(2).ships, 30);
    assert_eq!(map.planet(2).growth_rate, 2);

    assert_eq!(map.fleets().len(), 1);
    let fleet = &map.fleets()[0];
    assert_eq!(fleet.owner, Owner::Mine);
    assert_eq!(fleet.ships, 20);
    assert_eq!(fleet.source, 0);
    assert_eq!(fleet.dest, 2);
    assert_eq!(fleet.turns_remaining, 3);
}

#[test]
fn distances_are_ceiled_and_symmetric() {
    let map = GameMap::parse(FIRST_TURN).unwrap();

    assert_eq!(map.distance(0, 0), 0);
    assert_eq!(map.distance(0, 1), 10);
    // sqrt(5^2 + 4^2) = 6.40.. rounds up to 7
    assert_eq!(map.distance(0, 2), 7);
    assert_eq!(map.distance(2, 0), 7);
    assert_eq!(map.map_radius(), 10);
}

#[test]
fn by_distance_breaks_ties_by_id() {
    let state = "\
P 0.0 0.0 1 10 1
P 3.0 0.0 0 10 1
P 0.0 3.0 0 10 1
go
";
    let map = GameMap::parse(state).unwrap();

    // Planets 1 and 2 are equidistant from 0; the lower id comes first.
    assert_eq!(map.planets_by_distance(0), &[0, 1, 2]);
}

#[test]
fn comments_and_blank_lines_are_skipped() {
    let state = "\
# map header
P 0.0 0.0 1 10 1 # home

P 4.0 0.0 2 10 1
go
";
    let map = GameMap::parse(state).unwrap();
    assert_eq!(map.num_planets(), 2);
}

#[test]
fn rejects_malformed_planet_record() {
    let err = GameMap::parse("P 0.0 0.0 1 10\ngo\n").unwrap_err();
    assert!(matches!(err, MapError::Malformed { line: 1, kind: 'P', .. }));
}

#[test]
fn rejects_unknown_record_type() {
    let err = GameMap::parse("Q 1 2 3\ngo\n").unwrap_err();
    assert!(matches!(err, MapError::UnknownRecord { line: 1, .. }));
}

#[test]
fn rejects_fleet_to_missing_planet() {
    let state = "\
P 0.0 0.0 1 10 1
F 1 5 0 9 4 2
go
";
    let err = GameMap::parse(state).unwrap_err();
    assert!(matches!(err, MapError::PlanetOutOfRange { id: 9, count: 1 }));
}

#[test]
fn update_replaces_state_and_bumps_turn() {
    let mut map = GameMap::parse(FIRST_TURN).unwrap();
    assert_eq!(map.turn(), 1);

    let next = "\
P 0.0 0.0 1 105 5
P 10.0 0.0 2 105 5
P 5.0 4.0 1 3 2
go
";
    map.update(next).unwrap();

    assert_eq!(map.turn(), 2);
    assert_eq!(map.planet(2).owner, Owner::Mine);
    assert_eq!(map.planet(2).ships, 3);
    assert!(map.fleets().is_empty());
    // Geometry is kept from the first turn.
    assert_eq!(map.distance(0, 2), 7);
}

#[test]
fn update_rejects_planet_count_change() {
    let mut map = GameMap::parse(FIRST_TURN).unwrap();
    let err = map.update("P 0.0 0.0 1 10 1\ngo\n").unwrap_err();
    assert!(matches!(
        err,
        MapError::PlanetCountMismatch { got: 1, expected: 3 }
    ));
}

#[test]
fn fleets_are_bucketed_by_destination() {
    let state = "\
P 0.0 0.0 1 50 5
P 6.0 0.0 2 50 5
F 1 10 0 1 6 2
F 2 15 1 0 6 4
F 1 5 0 1 6 1
go
";
    let map = GameMap::parse(state).unwrap();

    let inbound: Vec<i32> = map.fleets_arriving_at(1).map(|f| f.ships).collect();
    assert_eq!(inbound, vec![10, 5]);
    assert_eq!(map.fleets_arriving_at(0).count(), 1);
}
