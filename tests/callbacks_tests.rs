//! `on_entry` / `on_run` / `on_exit` ordering rules, exercised through
//! [`table_fsm::Machine::init`] and [`table_fsm::Machine::run`] rather than
//! the orchestrator directly (it is a private module).

use core::cell::Cell;
use table_fsm::{ArrayQueue, Machine, StateCallbacks, Transition};

const A: u8 = 1;
const B: u8 = 2;
const GO: u8 = 10;
const STAY: u8 = 11;
const UNHANDLED: u8 = 12;

struct Counters {
    entries: Cell<u32>,
    runs: Cell<u32>,
    exits: Cell<u32>,
}

fn on_entry(ctx: &mut Counters) {
    ctx.entries.set(ctx.entries.get() + 1);
}
fn on_run(ctx: &mut Counters) {
    ctx.runs.set(ctx.runs.get() + 1);
}
fn on_exit(ctx: &mut Counters) {
    ctx.exits.set(ctx.exits.get() + 1);
}

fn fresh() -> Counters {
    Counters {
        entries: Cell::new(0),
        runs: Cell::new(0),
        exits: Cell::new(0),
    }
}

fn table() -> ([Transition<Counters>; 3], [StateCallbacks<Counters>; 2]) {
    (
        [
            Transition::new(A, GO, B),
            Transition::new(A, STAY, A),
            // Extends event_max to UNHANDLED without giving B a row for it,
            // so dispatching UNHANDLED from B is a genuine no-match.
            Transition::new(B, UNHANDLED, B),
        ],
        [
            StateCallbacks::new(A)
                .with_entry(on_entry)
                .with_run(on_run)
                .with_exit(on_exit),
            StateCallbacks::new(B)
                .with_entry(on_entry)
                .with_run(on_run)
                .with_exit(on_exit),
        ],
    )
}

#[test]
fn init_runs_entry_and_run_of_the_initial_state_only() {
    let (transitions, callbacks) = table();
    let fsm: Machine<Counters, ArrayQueue<4>> =
        Machine::init(fresh(), A, &transitions, &callbacks, 4).unwrap();

    assert_eq!(fsm.user_data().entries.get(), 1);
    assert_eq!(fsm.user_data().runs.get(), 1);
    assert_eq!(fsm.user_data().exits.get(), 0);
}

#[test]
fn real_transition_fires_exit_then_entry_then_run() {
    let (transitions, callbacks) = table();
    let mut fsm: Machine<Counters, ArrayQueue<4>> =
        Machine::init(fresh(), A, &transitions, &callbacks, 4).unwrap();

    fsm.add_event(GO).unwrap();
    fsm.run();

    assert_eq!(fsm.state(), B);
    assert_eq!(fsm.user_data().exits.get(), 1);
    assert_eq!(fsm.user_data().entries.get(), 2); // initial A + entry into B
    assert_eq!(fsm.user_data().runs.get(), 2); // initial A + run of B
}

#[test]
fn self_loop_to_the_same_state_only_reruns_on_run() {
    let (transitions, callbacks) = table();
    let mut fsm: Machine<Counters, ArrayQueue<4>> =
        Machine::init(fresh(), A, &transitions, &callbacks, 4).unwrap();

    fsm.add_event(STAY).unwrap();
    fsm.run();

    assert_eq!(fsm.state(), A);
    // STAY is an authored transition A->A: previous_step_state and
    // current_state end up equal, so the orchestrator takes the
    // "no state change" branch — on_exit/on_entry are skipped even though a
    // transition row did fire, and only on_run reruns.
    assert_eq!(fsm.user_data().exits.get(), 0);
    assert_eq!(fsm.user_data().entries.get(), 1);
    assert_eq!(fsm.user_data().runs.get(), 2);
}

#[test]
fn no_matching_transition_still_runs_on_run_but_skips_entry_and_exit() {
    let (transitions, callbacks) = table();
    let mut fsm: Machine<Counters, ArrayQueue<4>> =
        Machine::init(fresh(), A, &transitions, &callbacks, 4).unwrap();

    // A has no row for UNHANDLED (only B does), so this is a genuine no-match.
    fsm.add_event(UNHANDLED).unwrap();
    let before_entries = fsm.user_data().entries.get();
    let before_exits = fsm.user_data().exits.get();
    let before_runs = fsm.user_data().runs.get();

    fsm.run();

    assert_eq!(fsm.state(), A);
    assert_eq!(fsm.user_data().entries.get(), before_entries);
    assert_eq!(fsm.user_data().exits.get(), before_exits);
    assert_eq!(fsm.user_data().runs.get(), before_runs + 1);
}
