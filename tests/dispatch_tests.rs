//! Dispatcher behavior exercised end-to-end through [`table_fsm::Machine`]:
//! guard fall-through, unconditional fallback rows, and unmatched
//! `(state, event)` pairs.

use table_fsm::{ArrayQueue, Machine, StateCallbacks, Transition};

const S1: u8 = 1;
const S2: u8 = 2;
const S3: u8 = 9;
const EV: u8 = 10;
const OTHER: u8 = 11;

fn always_false(_ctx: &i32) -> bool {
    false
}
fn positive(ctx: &i32) -> bool {
    *ctx > 0
}

#[test]
fn first_passing_guard_wins_in_authored_order() {
    let transitions = [
        Transition::guarded(S1, EV, always_false, S3),
        Transition::guarded(S1, EV, positive, S2),
        Transition::new(S1, EV, S1),
    ];
    let callbacks: [StateCallbacks<i32>; 0] = [];
    let mut fsm: Machine<i32, ArrayQueue<4>> =
        Machine::init(5, S1, &transitions, &callbacks, 4).unwrap();

    fsm.add_event(EV).unwrap();
    fsm.run();
    assert_eq!(fsm.state(), S2);
}

#[test]
fn falls_through_to_unconditional_row_when_all_guards_fail() {
    let transitions = [
        Transition::guarded(S1, EV, positive, S2),
        Transition::new(S1, EV, S3),
    ];
    let callbacks: [StateCallbacks<i32>; 0] = [];
    let mut fsm: Machine<i32, ArrayQueue<4>> =
        Machine::init(-1, S1, &transitions, &callbacks, 4).unwrap();

    fsm.add_event(EV).unwrap();
    fsm.run();
    assert_eq!(fsm.state(), S3);
}

#[test]
fn no_winning_row_leaves_state_unchanged() {
    let transitions = [Transition::guarded(S1, EV, positive, S2)];
    let callbacks: [StateCallbacks<i32>; 0] = [];
    let mut fsm: Machine<i32, ArrayQueue<4>> =
        Machine::init(-1, S1, &transitions, &callbacks, 4).unwrap();

    fsm.add_event(EV).unwrap();
    fsm.run();
    assert_eq!(fsm.state(), S1);
}

#[test]
fn unmatched_event_for_current_state_leaves_state_unchanged() {
    let transitions = [Transition::new(S1, EV, S2), Transition::new(S1, OTHER, S3)];
    let callbacks: [StateCallbacks<i32>; 0] = [];
    let mut fsm: Machine<i32, ArrayQueue<4>> =
        Machine::init(0, S2, &transitions, &callbacks, 4).unwrap();

    // S2 has no rows at all for EV or OTHER.
    fsm.add_event(EV).unwrap();
    fsm.run();
    assert_eq!(fsm.state(), S2);
}

#[test]
fn transition_for_reports_the_would_be_winner_without_mutating_state() {
    let transitions = [
        Transition::guarded(S1, EV, positive, S2),
        Transition::new(S1, EV, S3),
    ];
    let callbacks: [StateCallbacks<i32>; 0] = [];
    let fsm: Machine<i32, ArrayQueue<4>> =
        Machine::init(5, S1, &transitions, &callbacks, 4).unwrap();

    assert_eq!(fsm.transition_for(EV).map(|t| t.next_state), Some(S2));
    assert_eq!(fsm.state(), S1);
}
