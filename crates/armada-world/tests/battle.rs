use armada_world::{resolve_battle, BattleOutcome, Owner};

#[test]
fn single_attacker_overruns_neutral_garrison() {
    let out = resolve_battle(Owner::Neutral, 10, 11, 0);
    assert_eq!(
        out,
        BattleOutcome {
            owner: Owner::Mine,
            ships_remaining: 1
        }
    );
}

#[test]
fn neutral_garrison_holds_on_exact_match() {
    let out = resolve_battle(Owner::Neutral, 10, 10, 0);
    assert_eq!(out.owner, Owner::Neutral);
    assert_eq!(out.ships_remaining, 0);
}

#[test]
fn attacker_tie_over_neutral_leaves_neutral() {
    let out = resolve_battle(Owner::Neutral, 4, 9, 9);
    assert_eq!(out.owner, Owner::Neutral);
    assert_eq!(out.ships_remaining, 0);
}

#[test]
fn three_way_battle_winner_pays_strongest_loser() {
    let out = resolve_battle(Owner::Neutral, 6, 14, 9);
    assert_eq!(out.owner, Owner::Mine);
    // Winner loses ships equal to the larger of the two defeated pools.
    assert_eq!(out.ships_remaining, 14 - 9);

    let out = resolve_battle(Owner::Neutral, 9, 14, 6);
    assert_eq!(out.ships_remaining, 14 - 9);
}

#[test]
fn owned_planet_defender_pool_includes_garrison() {
    // Defender pool of 12 (garrison plus reinforcements) against 8 attackers.
    let out = resolve_battle(Owner::Mine, 0, 12, 8);
    assert_eq!(out.owner, Owner::Mine);
    assert_eq!(out.ships_remaining, 4);
}

#[test]
fn owned_planet_falls_to_larger_attacker() {
    let out = resolve_battle(Owner::Enemy, 0, 20, 12);
    assert_eq!(out.owner, Owner::Mine);
    assert_eq!(out.ships_remaining, 8);
}

#[test]
fn exact_tie_on_owned_planet_keeps_owner() {
    let out = resolve_battle(Owner::Enemy, 0, 10, 10);
    assert_eq!(out.owner, Owner::Enemy);
    assert_eq!(out.ships_remaining, 0);
}

#[test]
fn tie_over_empty_neutral_stays_neutral() {
    let out = resolve_battle(Owner::Neutral, 0, 7, 7);
    assert_eq!(out.owner, Owner::Neutral);
    assert_eq!(out.ships_remaining, 0);
}

#[test]
fn symmetric_in_the_two_sides() {
    for (neutral, a, b) in [(0, 13, 5), (7, 13, 5), (7, 20, 19), (3, 0, 8)] {
        let mine = resolve_battle(Owner::Neutral, neutral, a, b);
        let enemy = resolve_battle(Owner::Neutral, neutral, b, a);

        assert_eq!(mine.ships_remaining, enemy.ships_remaining);
        let flipped = match mine.owner {
            Owner::Mine => Owner::Enemy,
            Owner::Enemy => Owner::Mine,
            Owner::Neutral => Owner::Neutral,
        };
        assert_eq!(flipped, enemy.owner);
    }
}
