//! Table Preparation (component C).
//!
//! Ported from `lfsm_bubble_sort_list` and
//! `lfsm_find_state_event_min_max_count` in
//! `examples/original_source/src/lovely_fsm.c`.

use crate::model::{Event, State, Transition};

/// Sorts `transitions` ascending by `(current_state, event)` with a stable
/// O(n^2) exchange sort.
///
/// Tables are small (a few hundred rows at most) so the quadratic cost is
/// immaterial; stability is the point — it preserves the caller-authored
/// order among rows sharing a key, which is the order guards are evaluated
/// in at dispatch time.
pub fn sort_transitions<Ctx>(transitions: &mut [Transition<Ctx>]) {
    let len = transitions.len();
    for unsorted in (1..len).rev() {
        for i in 0..unsorted {
            let a = (transitions[i].current_state, transitions[i].event);
            let b = (transitions[i + 1].current_state, transitions[i + 1].event);
            if a > b {
                transitions.swap(i, i + 1);
            }
        }
    }
}

/// Bounds derived from a transition table: the smallest/largest state and
/// event values referenced anywhere in it, plus the event span those
/// bounds imply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extrema {
    pub state_min: State,
    pub state_max: State,
    pub event_min: Event,
    pub event_max: Event,
    /// `event_max - event_min + 1`, cached for reuse by the lookup builder
    /// and dispatcher (as `event_count` in `spec.md` §3).
    pub event_count: u16,
}

/// Computes [`Extrema`] over `transitions`.
///
/// # Panics
///
/// Panics (via an unsigned subtraction underflow in the caller) if
/// `transitions` is empty; a machine always has at least one authored
/// transition.
pub fn compute_extrema<Ctx>(transitions: &[Transition<Ctx>]) -> Extrema {
    debug_assert!(
        !transitions.is_empty(),
        "a transition table must have at least one row"
    );

    let mut state_min = State::MAX;
    let mut state_max = State::MIN;
    let mut event_min = Event::MAX;
    let mut event_max = Event::MIN;

    for t in transitions {
        state_min = state_min.min(t.current_state).min(t.next_state);
        state_max = state_max.max(t.current_state).max(t.next_state);
        event_min = event_min.min(t.event);
        event_max = event_max.max(t.event);
    }

    let event_count = event_max as u16 - event_min as u16 + 1;

    Extrema {
        state_min,
        state_max,
        event_min,
        event_max,
        event_count,
    }
}
