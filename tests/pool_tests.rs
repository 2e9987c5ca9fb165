//! Integration tests for [`table_fsm::Pool`] through the public API: a
//! fixed-capacity array of independently-dispatching machines.

use table_fsm::{ArrayQueue, InitError, Machine, Pool, StateCallbacks, Transition};

const A: u8 = 1;
const B: u8 = 2;
const GO: u8 = 10;

fn build(start: u32) -> Machine<u32, ArrayQueue<4>> {
    let transitions = [Transition::new(A, GO, B)];
    let callbacks: [StateCallbacks<u32>; 0] = [];
    Machine::init(start, A, &transitions, &callbacks, 4).unwrap()
}

#[test]
fn claimed_slots_dispatch_independently() {
    let mut pool: Pool<u32, ArrayQueue<4>, 2> = Pool::new();
    let first = pool.claim(build(1)).unwrap();
    let second = pool.claim(build(2)).unwrap();

    pool.get_mut(first).unwrap().add_event(GO).unwrap();
    pool.get_mut(first).unwrap().run();

    assert_eq!(pool.get(first).unwrap().state(), B);
    assert_eq!(pool.get(second).unwrap().state(), A);
}

#[test]
fn pool_exhaustion_reports_pool_exhausted() {
    let mut pool: Pool<u32, ArrayQueue<4>, 1> = Pool::new();
    pool.claim(build(0)).unwrap();
    assert_eq!(pool.claim(build(0)).unwrap_err(), InitError::PoolExhausted);
}

#[test]
fn released_slot_is_reusable_and_no_longer_active() {
    let mut pool: Pool<u32, ArrayQueue<4>, 1> = Pool::new();
    let slot = pool.claim(build(0)).unwrap();
    assert_eq!(pool.active_count(), 1);

    pool.release(slot);
    assert!(!pool.is_active(slot));
    assert_eq!(pool.active_count(), 0);
    assert!(pool.claim(build(0)).is_ok());
}

#[test]
fn capacity_reports_the_const_generic_size() {
    let pool: Pool<u32, ArrayQueue<4>, 5> = Pool::new();
    assert_eq!(pool.capacity(), 5);
}
