use armada_planner::SupportRegistry;
use armada_world::GameMap;

fn line_map() -> GameMap {
    // Planets at x = 0, 3, 6, 9.
    GameMap::parse(
        "P 0.0 0.0 1 10 1\nP 3.0 0.0 1 10 1\nP 6.0 0.0 0 10 1\nP 9.0 0.0 2 10 1\ngo\n",
    )
    .unwrap()
}

#[test]
fn everything_is_allowed_before_any_constraint() {
    let map = line_map();
    let registry = SupportRegistry::new(map.num_planets());

    assert!(registry.may_support(0, 2, &map));
    assert!(registry.may_support(3, 2, &map));
}

#[test]
fn zone_blocks_sources_within_the_radius() {
    let map = line_map();
    let mut registry = SupportRegistry::new(map.num_planets());

    // Planet 1 promised support to planet 2: radius 3 around planet 1.
    registry.add_constraint(2, 1, &map);

    assert!(!registry.may_support(0, 2, &map), "distance 3 is inside");
    assert!(!registry.may_support(1, 2, &map), "the center itself is inside");
    assert!(registry.may_support(3, 2, &map), "distance 6 is outside");
    // Only plans for that target are constrained.
    assert!(registry.may_support(0, 3, &map));
}

#[test]
fn reset_drops_all_zones() {
    let map = line_map();
    let mut registry = SupportRegistry::new(map.num_planets());
    registry.add_constraint(2, 1, &map);

    registry.reset(map.num_planets());
    assert!(registry.may_support(0, 2, &map));
}
