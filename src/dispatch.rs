//! Dispatcher (component E).
//!
//! Ported from `lfsm_get_transition_from_lookup` and
//! `lfsm_find_transition_to_execute` in `lovely_fsm.c`: resolves one
//! `(state, event)` pair to a winning transition row, walking forward
//! through the sorted table from the index's first-match cell and
//! evaluating guards in authored order, first match wins.

use crate::index::LookupTables;
use crate::model::{Event, State, Transition};
use crate::prepare::Extrema;

/// Finds the transition that should fire for `(state, event)`, if any.
///
/// Walks the run of consecutive rows in `transitions` sharing the same
/// `(current_state, event)` key, starting at the row `index` points to.
/// Returns the first row whose guard is absent or returns `true` for
/// `ctx`. Returns `None` if no row matches the key at all, or every row
/// in the block has a guard and none of them pass.
pub fn find_transition<'a, Ctx>(
    transitions: &'a [Transition<Ctx>],
    index: &LookupTables,
    extrema: Extrema,
    state: State,
    event: Event,
    ctx: &Ctx,
) -> Option<&'a Transition<Ctx>> {
    let start = index.transition_at(state, event, extrema)? as usize;

    transitions[start..]
        .iter()
        .take_while(|t| t.current_state == state && t.event == event)
        .find(|t| t.guard.map_or(true, |g| g(ctx)))
}
