//! Public API (component G): `init` / `add_event` / `run` / `deinit` /
//! introspection, wired over the five components above it.
//!
//! Ported from `lfsm_init_func` / `fsm_add_event` / `lfsm_run` /
//! `lfsm_deinit` plus the block of `lfsm_get_*` accessors at the bottom of
//! `lovely_fsm.c`. The C original keeps all of this state behind one
//! process-wide array of `lfsm_context_t`; here [`Machine`] is a plain value
//! a caller owns directly (or hands to a [`crate::Pool`] slot), and the two
//! dense indices plus the normalized table copies are dropped automatically
//! when it goes out of scope — there is no separate `deinit` call to
//! forget.

use alloc::vec::Vec;
use core::fmt;

use crate::callbacks::run_callbacks;
use crate::dispatch::find_transition;
use crate::error::{DispatchError, InitError, Status};
use crate::index::LookupTables;
use crate::model::{Event, State, StateCallbacks, Transition, INVALID_SENTINEL};
use crate::prepare::{compute_extrema, sort_transitions, Extrema};
use crate::queue::EventQueue;

/// A live FSM instance: its normalized tables, the two derived lookup
/// indices, an event queue, and the caller's user data value.
///
/// `Ctx` is the user data type (`void* user_data` in the C original, made
/// concrete and owned instead of an opaque pointer). `Q` is the
/// [`EventQueue`] implementation backing this machine's bounded FIFO.
pub struct Machine<Ctx, Q> {
    ctx: Ctx,
    transitions: Vec<Transition<Ctx>>,
    callbacks: Vec<StateCallbacks<Ctx>>,
    lookup: LookupTables,
    extrema: Extrema,
    queue: Q,
    current_state: State,
    previous_step_state: State,
}

impl<Ctx, Q> Machine<Ctx, Q>
where
    Q: EventQueue,
{
    /// Builds a machine from caller-authored tables.
    ///
    /// `transitions` and `callbacks` are copied into normalized,
    /// engine-owned storage (the caller's slices are left untouched — see
    /// `SPEC_FULL.md` §3's "Rust-native redesign"); the copy is then sorted
    /// by `(current_state, event)` and the two dense lookup indices are
    /// built over it. The initial callback step (`on_entry` then `on_run`
    /// of `initial_state`, with no prior state) runs before this returns.
    ///
    /// # Errors
    ///
    /// - [`InitError::AllocationError`] if the normalized table copies or
    ///   either lookup index cannot be allocated.
    /// - [`InitError::QueueInitFailed`] if `Q::init` rejects `queue_capacity`.
    ///
    /// Claiming a slot in a [`crate::Pool`] ([`InitError::PoolExhausted`]) is
    /// the pool's responsibility, not this constructor's — a bare `Machine`
    /// can be built and owned directly without ever touching a pool.
    pub fn init(
        user_data: Ctx,
        initial_state: State,
        transitions: &[Transition<Ctx>],
        callbacks: &[StateCallbacks<Ctx>],
        queue_capacity: usize,
    ) -> Result<Self, InitError> {
        let mut transitions = try_collect(transitions)?;
        let callbacks = try_collect(callbacks)?;

        sort_transitions(&mut transitions);
        let extrema = compute_extrema(&transitions);
        let lookup = LookupTables::build(&transitions, &callbacks, extrema)?;
        let queue = Q::init(queue_capacity)?;

        crate::__fsm_log!(
            "table_fsm: init state_min={} state_max={} event_min={} event_max={} transitions={} initial_state={}",
            extrema.state_min,
            extrema.state_max,
            extrema.event_min,
            extrema.event_max,
            transitions.len(),
            initial_state
        );

        let mut machine = Self {
            ctx: user_data,
            transitions,
            callbacks,
            lookup,
            extrema,
            queue,
            current_state: initial_state,
            previous_step_state: INVALID_SENTINEL,
        };
        machine.run_callbacks_now(INVALID_SENTINEL, initial_state);
        Ok(machine)
    }

    /// Enqueues `event` for a future [`Machine::run`].
    ///
    /// Rejects events outside `[event_min, event_max]` without touching the
    /// queue (`lfsm_get_next_event`'s range check, performed here at
    /// enqueue time instead of dequeue time as `fsm_add_event` does).
    pub fn add_event(&mut self, event: Event) -> Result<(), DispatchError> {
        if event < self.extrema.event_min || event > self.extrema.event_max {
            crate::__fsm_log!("table_fsm: add_event({}) rejected: out of range", event);
            return Err(DispatchError::EventOutOfRange);
        }
        if !self.queue.add(event) {
            crate::__fsm_log!("table_fsm: add_event({}) rejected: queue full", event);
            return Err(DispatchError::QueueFull);
        }
        Ok(())
    }

    /// Dequeues and dispatches one event.
    ///
    /// Ported from `lfsm_run`: empty queue returns [`Status::Nop`]
    /// immediately with no callbacks invoked. Otherwise the event is
    /// dequeued; if it falls outside `[event_min, event_max]` it is treated
    /// as a no-match rather than rejected (it has already left the queue).
    /// A resolved transition's guard block is walked in authored order,
    /// first match wins; if one fires, `previous_step_state`/`current_state`
    /// update before callbacks run. `on_run` of the resulting state always
    /// fires, transition or not.
    ///
    /// Callbacks are orchestrated against the state the machine was in
    /// *immediately before this step's dispatch*, not the sticky
    /// `previous_step_state` field — a no-op/no-match step must not re-fire
    /// `on_exit`/`on_entry` just because some earlier step left
    /// `previous_step_state` pointing at a different state (`spec.md` §4.F:
    /// "state change occurred *this step*"). `previous_step_state` itself
    /// still only updates when a transition actually fires, preserving its
    /// role as an introspection-only "last real previous state" record.
    pub fn run(&mut self) -> Status {
        if self.queue.is_empty() {
            return Status::Nop;
        }

        let event = self.queue.read();
        let in_range = event >= self.extrema.event_min && event <= self.extrema.event_max;
        let before = self.current_state;

        if in_range {
            let winner = find_transition(
                &self.transitions,
                &self.lookup,
                self.extrema,
                self.current_state,
                event,
                &self.ctx,
            )
            .map(|t| t.next_state);

            if let Some(next_state) = winner {
                crate::__fsm_log!(
                    "table_fsm: {} + {} -> {}",
                    self.current_state,
                    event,
                    next_state
                );
                self.previous_step_state = self.current_state;
                self.current_state = next_state;
            } else {
                crate::__fsm_log!("table_fsm: {} + {} -> no transition", self.current_state, event);
            }
        } else {
            crate::__fsm_log!(
                "table_fsm: dequeued event {} outside [{}, {}], treated as no-match",
                event,
                self.extrema.event_min,
                self.extrema.event_max
            );
        }

        let current = self.current_state;
        self.run_callbacks_now(before, current);

        if self.queue.is_empty() {
            Status::Ok
        } else {
            Status::MoreQueued
        }
    }

    fn run_callbacks_now(&mut self, previous: State, current: State) {
        run_callbacks(
            &mut self.ctx,
            &self.callbacks,
            &self.lookup,
            self.extrema,
            previous,
            current,
        );
    }

    /// Shared access to the user data value.
    pub fn user_data(&self) -> &Ctx {
        &self.ctx
    }

    /// Exclusive access to the user data value, for host code that wants to
    /// poke at it between `run` calls (e.g. updating a sensor reading a
    /// guard will read).
    pub fn user_data_mut(&mut self) -> &mut Ctx {
        &mut self.ctx
    }

    /// The machine's current state.
    pub fn state(&self) -> State {
        self.current_state
    }

    /// The state the machine was in immediately before its most recent
    /// *actual* transition, or `None` if no transition has fired yet.
    pub fn previous_state(&self) -> Option<State> {
        if self.previous_step_state == INVALID_SENTINEL {
            None
        } else {
            Some(self.previous_step_state)
        }
    }

    /// The normalized, sorted transition table (introspection, per
    /// `spec.md` §4.G).
    pub fn transitions(&self) -> &[Transition<Ctx>] {
        &self.transitions
    }

    /// The normalized state-callback table.
    pub fn state_callbacks(&self) -> &[StateCallbacks<Ctx>] {
        &self.callbacks
    }

    /// The dense `(state, event) -> transition row index` lookup table.
    pub fn transition_index(&self) -> &[Option<u32>] {
        self.lookup.transition_index()
    }

    /// The dense `state -> callback row index` lookup table.
    pub fn callback_index(&self) -> &[Option<u32>] {
        self.lookup.callback_index()
    }

    /// The `(state_min, state_max, event_min, event_max, event_count)`
    /// bounds computed at construction time.
    pub fn extrema(&self) -> Extrema {
        self.extrema
    }

    /// Looks up the transition (if any) that `event` would resolve to from
    /// the machine's *current* state, without evaluating guards or
    /// mutating anything. Intended for tests and host-side introspection,
    /// not for driving dispatch (use [`Machine::add_event`] +
    /// [`Machine::run`] for that).
    pub fn transition_for(&self, event: Event) -> Option<&Transition<Ctx>> {
        let row = self
            .lookup
            .transition_at(self.current_state, event, self.extrema)?;
        self.transitions.get(row as usize)
    }
}

impl<Ctx, Q> fmt::Debug for Machine<Ctx, Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("current_state", &self.current_state)
            .field("previous_state", &self.previous_state())
            .field("transitions", &self.transitions.len())
            .field("state_callbacks", &self.callbacks.len())
            .field("state_min", &self.extrema.state_min)
            .field("state_max", &self.extrema.state_max)
            .field("event_min", &self.extrema.event_min)
            .field("event_max", &self.extrema.event_max)
            .finish()
    }
}

impl<Ctx, Q> fmt::Display for Machine<Ctx, Q> {
    /// Renders the same facts `lovely_fsm_debug.c` used to print with
    /// `printf` — current/previous state, extrema, table sizes — as a
    /// structured one-liner instead of writing to a stream directly, per
    /// `SPEC_FULL.md` §4.H.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "state={} previous={:?} transitions={} callbacks={} states=[{},{}] events=[{},{}]",
            self.current_state,
            self.previous_state(),
            self.transitions.len(),
            self.callbacks.len(),
            self.extrema.state_min,
            self.extrema.state_max,
            self.extrema.event_min,
            self.extrema.event_max,
        )
    }
}

fn try_collect<T: Clone>(items: &[T]) -> Result<Vec<T>, InitError> {
    let mut out = Vec::new();
    out.try_reserve_exact(items.len())
        .map_err(|_| InitError::AllocationError)?;
    out.extend_from_slice(items);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::ArrayQueue;
    use core::cell::Cell;

    struct Temp {
        value: i32,
        normal_run: Cell<u32>,
        normal_exit: Cell<u32>,
        warn_entry: Cell<u32>,
        warn_run: Cell<u32>,
    }

    const NORMAL: State = 1;
    const ALARM: State = 2;
    const WARN: State = 4;
    const BUTTON_PRESS: Event = 10;
    const MEASURE: Event = 11;

    fn below_80(ctx: &Temp) -> bool {
        ctx.value <= 80
    }
    fn between(ctx: &Temp) -> bool {
        ctx.value >= 80 && ctx.value < 100
    }
    fn at_or_above_100(ctx: &Temp) -> bool {
        ctx.value >= 100
    }

    fn normal_run(ctx: &mut Temp) {
        ctx.normal_run.set(ctx.normal_run.get() + 1);
    }
    fn normal_exit(ctx: &mut Temp) {
        ctx.normal_exit.set(ctx.normal_exit.get() + 1);
    }
    fn warn_entry(ctx: &mut Temp) {
        ctx.warn_entry.set(ctx.warn_entry.get() + 1);
    }
    fn warn_run(ctx: &mut Temp) {
        ctx.warn_run.set(ctx.warn_run.get() + 1);
    }

    fn table() -> [Transition<Temp>; 5] {
        [
            Transition::guarded(ALARM, BUTTON_PRESS, below_80, NORMAL),
            Transition::guarded(NORMAL, MEASURE, between, WARN),
            Transition::guarded(NORMAL, MEASURE, at_or_above_100, ALARM),
            Transition::guarded(WARN, MEASURE, below_80, NORMAL),
            Transition::guarded(WARN, MEASURE, at_or_above_100, ALARM),
        ]
    }

    fn callbacks() -> [StateCallbacks<Temp>; 2] {
        [
            StateCallbacks::new(NORMAL)
                .with_run(normal_run)
                .with_exit(normal_exit),
            StateCallbacks::new(WARN)
                .with_entry(warn_entry)
                .with_run(warn_run),
        ]
    }

    fn temp(value: i32) -> Temp {
        Temp {
            value,
            normal_run: Cell::new(0),
            normal_exit: Cell::new(0),
            warn_entry: Cell::new(0),
            warn_run: Cell::new(0),
        }
    }

    #[test]
    fn scenario_1_no_transition_still_runs_on_run() {
        let transitions = table();
        let cbs = callbacks();
        let mut m: Machine<Temp, ArrayQueue<5>> =
            Machine::init(temp(75), NORMAL, &transitions, &cbs, 5).unwrap();
        assert_eq!(m.user_data().normal_run.get(), 1);

        m.add_event(MEASURE).unwrap();
        let status = m.run();

        assert_eq!(m.state(), NORMAL);
        assert_eq!(m.user_data().normal_run.get(), 2);
        assert_eq!(status, Status::Ok);
    }

    #[test]
    fn scenario_2_guard_pass_fires_transition_and_exit_entry() {
        let transitions = table();
        let cbs = callbacks();
        let mut m: Machine<Temp, ArrayQueue<5>> =
            Machine::init(temp(85), NORMAL, &transitions, &cbs, 5).unwrap();

        m.add_event(MEASURE).unwrap();
        m.run();

        assert_eq!(m.state(), WARN);
        assert_eq!(m.user_data().normal_exit.get(), 1);
        assert_eq!(m.user_data().warn_entry.get(), 1);
        assert_eq!(m.user_data().warn_run.get(), 1);
    }

    #[test]
    fn scenario_3_unmatched_event_leaves_state_unchanged() {
        let transitions = table();
        let cbs = callbacks();
        let mut m: Machine<Temp, ArrayQueue<5>> =
            Machine::init(temp(75), NORMAL, &transitions, &cbs, 5).unwrap();

        m.add_event(BUTTON_PRESS).unwrap();
        let status = m.run();

        assert_eq!(m.state(), NORMAL);
        assert_eq!(status, Status::Ok);
        assert_eq!(m.user_data().normal_run.get(), 2);
    }

    #[test]
    fn scenario_4_empty_queue_returns_nop_with_no_callbacks() {
        let transitions = table();
        let cbs = callbacks();
        let mut m: Machine<Temp, ArrayQueue<5>> =
            Machine::init(temp(75), NORMAL, &transitions, &cbs, 5).unwrap();

        let before = m.user_data().normal_run.get();
        assert_eq!(m.run(), Status::Nop);
        assert_eq!(m.user_data().normal_run.get(), before);
    }

    #[test]
    fn scenario_5_out_of_range_event_is_rejected_at_enqueue() {
        let transitions = table();
        let cbs = callbacks();
        let mut m: Machine<Temp, ArrayQueue<5>> =
            Machine::init(temp(75), NORMAL, &transitions, &cbs, 5).unwrap();

        assert_eq!(
            m.add_event(99).unwrap_err(),
            DispatchError::EventOutOfRange
        );
    }

    #[test]
    fn more_queued_reported_until_the_last_enqueued_event_drains() {
        let transitions = table();
        let cbs = callbacks();
        let mut m: Machine<Temp, ArrayQueue<5>> =
            Machine::init(temp(75), NORMAL, &transitions, &cbs, 5).unwrap();

        m.add_event(BUTTON_PRESS).unwrap();
        m.add_event(BUTTON_PRESS).unwrap();
        m.add_event(BUTTON_PRESS).unwrap();

        assert_eq!(m.run(), Status::MoreQueued);
        assert_eq!(m.run(), Status::MoreQueued);
        assert_eq!(m.run(), Status::Ok);
    }

    #[test]
    fn introspection_exposes_tables_and_extrema() {
        let transitions = table();
        let cbs = callbacks();
        let m: Machine<Temp, ArrayQueue<5>> =
            Machine::init(temp(75), NORMAL, &transitions, &cbs, 5).unwrap();

        assert_eq!(m.transitions().len(), 5);
        assert_eq!(m.state_callbacks().len(), 2);
        assert_eq!(m.extrema().event_min, BUTTON_PRESS);
        assert_eq!(m.extrema().event_max, MEASURE);
        assert!(m.previous_state().is_none());
        assert_eq!(
            m.transition_for(MEASURE).map(|t| t.current_state),
            Some(NORMAL)
        );
    }
}
