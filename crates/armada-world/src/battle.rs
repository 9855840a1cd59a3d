use crate::Owner;

/// Result of resolving all simultaneous arrivals at one planet on one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BattleOutcome {
    pub owner: Owner,
    pub ships_remaining: i32,
}

/// Resolve a three-way battle between the standing garrison and the two
/// sides' simultaneous arrivals.
///
/// `neutral`, `mine` and `enemy` are the pools fighting for the planet: the
/// previous owner's pool already includes the standing garrison, the other
/// two are pure arrivals. When the defender pool is neutral, an attacker must
/// strictly exceed both the garrison and the other attacker to win; a tie
/// between the attackers (or a garrison at least as large as both) leaves the
/// planet neutral. When the defender pool is not neutral, the larger of the
/// two sides wins with the difference, and an exact tie leaves ownership
/// unchanged with zero ships.
pub fn resolve_battle(owner_before: Owner, neutral: i32, mine: i32, enemy: i32) -> BattleOutcome {
    debug_assert!(neutral >= 0 && mine >= 0 && enemy >= 0, "negative battle pool");

    if neutral != 0 || owner_before == Owner::Neutral {
        let strongest_attacker = mine.max(enemy);

        if neutral >= strongest_attacker {
            return BattleOutcome {
                owner: Owner::Neutral,
                ships_remaining: neutral - strongest_attacker,
            };
        }

        if mine > enemy {
            BattleOutcome {
                owner: Owner::Mine,
                ships_remaining: mine - neutral.max(enemy),
            }
        } else if enemy > mine {
            BattleOutcome {
                owner: Owner::Enemy,
                ships_remaining: enemy - neutral.max(mine),
            }
        } else {
            // Attackers annihilate each other over the garrison.
            BattleOutcome {
                owner: Owner::Neutral,
                ships_remaining: 0,
            }
        }
    } else if mine > enemy {
        BattleOutcome {
            owner: Owner::Mine,
            ships_remaining: mine - enemy,
        }
    } else if enemy > mine {
        BattleOutcome {
            owner: Owner::Enemy,
            ships_remaining: enemy - mine,
        }
    } else {
        BattleOutcome {
            owner: owner_before,
            ships_remaining: 0,
        }
    }
}
