//! Flat table types: transition rows, state-callback rows, and the
//! small-integer state/event domain the dispatcher operates over.
//!
//! Ported from `lfsm_transitions_t` / `lfsm_state_functions_t` in
//! `lovely_fsm.h`: both tables stay "flat" (no nesting, no indirection
//! beyond the two fn-pointer slots), authored by the caller and normalized
//! (sorted, indexed) once at construction time.

use core::fmt;

/// A state identifier. Mirrors the original implementation's `uint8_t`
/// domain: small, non-negative, and bounded below [`INVALID_SENTINEL`].
pub type State = u8;

/// An event identifier, sharing [`State`]'s small-integer domain.
pub type Event = u8;

/// Reserved state value meaning "no previous state". Authored tables must
/// never use this value for a real state — the engine relies on the
/// collision never happening to tell "freshly initialized" from "has
/// transitioned at least once".
pub const INVALID_SENTINEL: State = 0xFE;

/// A guard predicate attached to a transition row.
///
/// # Contract
///
/// Guards are assumed **pure**. A single dispatch may invoke a guard zero
/// or more times — once per candidate row in the matching `(state, event)`
/// block, stopping at the first row whose guard returns `true` (or has no
/// guard at all). Side-effecting guards are unsupported; their observable
/// behavior beyond "evaluated in authored order until one matches" is
/// unspecified.
pub type Guard<Ctx> = fn(&Ctx) -> bool;

/// An `on_entry` / `on_run` / `on_exit` callback attached to a
/// state-callback row.
pub type Callback<Ctx> = fn(&mut Ctx);

/// One row of the transition table, authored by the caller.
///
/// Two rows may share the same `(current_state, event)` key; when they do,
/// they form a guard-disambiguated block evaluated in the order the caller
/// wrote them (ties are broken by authored order, never by `next_state` or
/// any other field).
pub struct Transition<Ctx> {
    pub current_state: State,
    pub event: Event,
    pub guard: Option<Guard<Ctx>>,
    pub next_state: State,
}

impl<Ctx> Transition<Ctx> {
    /// An unconditional transition: fires whenever `(current_state, event)`
    /// is reached, unless a guarded row earlier in authored order wins
    /// first.
    pub const fn new(current_state: State, event: Event, next_state: State) -> Self {
        Self {
            current_state,
            event,
            guard: None,
            next_state,
        }
    }

    /// A transition that only fires when `guard` returns `true`.
    pub const fn guarded(
        current_state: State,
        event: Event,
        guard: Guard<Ctx>,
        next_state: State,
    ) -> Self {
        Self {
            current_state,
            event,
            guard: Some(guard),
            next_state,
        }
    }
}

// Manual impls: `fn` pointers are `Copy`/`Debug` regardless of `Ctx`, but a
// derive would still add a spurious `Ctx: Copy`/`Ctx: Debug` bound since
// `Ctx` appears (only inside a fn-pointer type) in the struct body.
impl<Ctx> Clone for Transition<Ctx> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Ctx> Copy for Transition<Ctx> {}

impl<Ctx> fmt::Debug for Transition<Ctx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("current_state", &self.current_state)
            .field("event", &self.event)
            .field("guarded", &self.guard.is_some())
            .field("next_state", &self.next_state)
            .finish()
    }
}

/// One row of the state-callback table, authored by the caller.
///
/// Any of the three callback slots may be absent; absent slots are simply
/// skipped by the orchestrator, never treated as errors.
pub struct StateCallbacks<Ctx> {
    pub state: State,
    pub on_entry: Option<Callback<Ctx>>,
    pub on_run: Option<Callback<Ctx>>,
    pub on_exit: Option<Callback<Ctx>>,
}

impl<Ctx> StateCallbacks<Ctx> {
    pub const fn new(state: State) -> Self {
        Self {
            state,
            on_entry: None,
            on_run: None,
            on_exit: None,
        }
    }

    pub const fn with_entry(mut self, f: Callback<Ctx>) -> Self {
        self.on_entry = Some(f);
        self
    }

    pub const fn with_run(mut self, f: Callback<Ctx>) -> Self {
        self.on_run = Some(f);
        self
    }

    pub const fn with_exit(mut self, f: Callback<Ctx>) -> Self {
        self.on_exit = Some(f);
        self
    }
}

impl<Ctx> Clone for StateCallbacks<Ctx> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Ctx> Copy for StateCallbacks<Ctx> {}

impl<Ctx> fmt::Debug for StateCallbacks<Ctx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateCallbacks")
            .field("state", &self.state)
            .field("on_entry", &self.on_entry.is_some())
            .field("on_run", &self.on_run.is_some())
            .field("on_exit", &self.on_exit.is_some())
            .finish()
    }
}
