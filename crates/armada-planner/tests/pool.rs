use armada_forecast::MoveOrder;
use armada_planner::OrderPool;
use armada_world::Side;

fn order(ships: i32) -> MoveOrder {
    MoveOrder::new(Side::Mine, 0, 1, ships, 0)
}

#[test]
fn checkout_and_get_round_trip() {
    let mut pool = OrderPool::new();
    let handle = pool.checkout(order(7));

    assert_eq!(pool.get(handle).ships, 7);
    assert_eq!(pool.live(), 1);

    pool.get_mut(handle).departure = 3;
    assert_eq!(pool.get(handle).departure, 3);
}

#[test]
fn released_slots_are_reissued_with_a_new_generation() {
    let mut pool = OrderPool::new();
    let first = pool.checkout(order(1));
    pool.release(first);

    let second = pool.checkout(order(2));
    // Same slot, different handle.
    assert_eq!(pool.allocated(), 1);
    assert_ne!(first, second);
    assert_eq!(pool.get(second).ships, 2);
}

#[test]
fn churn_reuses_a_single_slot() {
    let mut pool = OrderPool::new();

    for round in 0..5 {
        let handle = pool.checkout(order(round));
        assert_eq!(pool.get(handle).ships, round);
        pool.release(handle);
    }

    assert_eq!(pool.allocated(), 1);
    assert_eq!(pool.live(), 0);
}

#[test]
fn release_all_frees_every_handle() {
    let mut pool = OrderPool::new();
    let handles: Vec<_> = (0..4).map(|i| pool.checkout(order(i))).collect();
    assert_eq!(pool.live(), 4);

    pool.release_all(&handles);
    assert_eq!(pool.live(), 0);
    assert_eq!(pool.allocated(), 4);
}

#[test]
fn recheckout_after_release_all_reuses_the_same_slots() {
    let mut pool = OrderPool::new();
    let handles: Vec<_> = (0..5).map(|i| pool.checkout(order(i))).collect();
    assert_eq!(pool.allocated(), 5);

    pool.release_all(&handles);

    let reissued: Vec<_> = (10..15).map(|i| pool.checkout(order(i))).collect();
    // The second batch fills the freed slots; nothing new is allocated.
    assert_eq!(pool.allocated(), 5);
    assert_eq!(pool.live(), 5);
    for (handle, ships) in reissued.iter().zip(10..15) {
        assert_eq!(pool.get(*handle).ships, ships);
    }
}
