//! Callback Orchestrator (component F).
//!
//! Ported from `lfsm_run_all_callbacks` / `lfsm_get_state_function` in
//! `lovely_fsm.c`. Runs `on_exit` of the state being left, then `on_entry`
//! of the state being entered, then `on_run` of the resulting state —
//! always in that order, regardless of whether a transition actually fired
//! this step (`spec.md` §4.F, §8 scenario 1).

use crate::index::LookupTables;
use crate::model::{State, StateCallbacks, INVALID_SENTINEL};
use crate::prepare::Extrema;

/// Looks up and runs `on_exit`/`on_entry`/`on_run` for one dispatch step.
///
/// `previous_state` is the state the machine was in *immediately before
/// this step's dispatch* — [`INVALID_SENTINEL`] only for the one call made
/// at the end of `Machine::init`, and the machine's pre-dispatch
/// `current_state` for every `Machine::run` call after that (never the
/// sticky `previous_step_state` field, which only updates when a
/// transition actually fires and exists for introspection, not for driving
/// this orchestrator — see `Machine::run`'s doc comment). `current_state`
/// is the state the machine is in *after* this step's transition lookup
/// (unchanged from before if nothing fired).
///
/// `on_exit` runs only when `previous_state` names a real, distinct state
/// (never on the very first call, and never when `previous_state ==
/// current_state`, i.e. a self-transition or a no-op/no-match step). This
/// is what keeps a no-match `run` from spuriously re-firing `on_exit`/
/// `on_entry` just because some earlier step's transition left
/// `current_state` different from where the machine was two steps ago.
/// `on_entry` and `on_run` run unconditionally once the resulting state
/// has a callback row at all.
pub fn run_callbacks<Ctx>(
    ctx: &mut Ctx,
    callbacks: &[StateCallbacks<Ctx>],
    index: &LookupTables,
    extrema: Extrema,
    previous_state: State,
    current_state: State,
) {
    if previous_state != INVALID_SENTINEL && previous_state != current_state {
        if let Some(row) = lookup_row(callbacks, index, extrema, previous_state) {
            if let Some(on_exit) = row.on_exit {
                on_exit(ctx);
            }
        }
    }

    let Some(row) = lookup_row(callbacks, index, extrema, current_state) else {
        return;
    };

    if previous_state != current_state {
        if let Some(on_entry) = row.on_entry {
            on_entry(ctx);
        }
    }

    if let Some(on_run) = row.on_run {
        on_run(ctx);
    }
}

fn lookup_row<'a, Ctx>(
    callbacks: &'a [StateCallbacks<Ctx>],
    index: &LookupTables,
    extrema: Extrema,
    state: State,
) -> Option<&'a StateCallbacks<Ctx>> {
    let row_index = index.callback_at(state, extrema)?;
    callbacks.get(row_index as usize)
}
