//! Lookup Builder (component D).
//!
//! Builds the two dense indices described in `spec.md` §3/§4.D:
//! `transition_index` keyed by `(state, event)` and `callback_index` keyed
//! by `state`. Ported from `lfsm_alloc_lookup_table`,
//! `lfsm_fill_transition_lookup_table`, and
//! `lfsm_fill_state_function_lookup_table`.
//!
//! Cells hold an index into the engine's own sorted `Vec<Transition<Ctx>>`
//! / `Vec<StateCallbacks<Ctx>>` rather than a raw pointer — the "explicit
//! value type" the design notes ask for in place of caller-memory
//! pointers.

use alloc::vec::Vec;

use crate::error::InitError;
use crate::model::{Event, State, StateCallbacks, Transition};
use crate::prepare::Extrema;

pub struct LookupTables {
    transition_index: Vec<Option<u32>>,
    callback_index: Vec<Option<u32>>,
}

impl LookupTables {
    /// Builds both indices over an already-sorted `transitions` slice and
    /// an unordered `callbacks` slice.
    ///
    /// Fails with [`InitError::AllocationError`] if either dense array
    /// cannot be allocated; if the second allocation (the callback index)
    /// fails, the first (the transition index) is released before
    /// returning, per `spec.md` §4.D.
    pub fn build<Ctx>(
        transitions: &[Transition<Ctx>],
        callbacks: &[StateCallbacks<Ctx>],
        extrema: Extrema,
    ) -> Result<Self, InitError> {
        let state_span = (extrema.state_max - extrema.state_min) as usize + 1;
        let event_span = extrema.event_count as usize;
        let transition_len = state_span * event_span;

        let mut transition_index: Vec<Option<u32>> = Vec::new();
        transition_index
            .try_reserve_exact(transition_len)
            .map_err(|_| InitError::AllocationError)?;
        transition_index.resize(transition_len, None);

        let mut callback_index: Vec<Option<u32>> = Vec::new();
        if callback_index.try_reserve_exact(state_span).is_err() {
            drop(transition_index);
            return Err(InitError::AllocationError);
        }
        callback_index.resize(state_span, None);

        // First element of every (state, event) equal-key block.
        let mut previous_key: Option<(State, Event)> = None;
        for (i, t) in transitions.iter().enumerate() {
            let key = (t.current_state, t.event);
            if previous_key != Some(key) {
                let offset = (t.current_state - extrema.state_min) as usize * event_span
                    + (t.event - extrema.event_min) as usize;
                transition_index[offset] = Some(i as u32);
                previous_key = Some(key);
            }
        }

        for (i, row) in callbacks.iter().enumerate() {
            let offset = (row.state - extrema.state_min) as usize;
            callback_index[offset] = Some(i as u32);
        }

        Ok(Self {
            transition_index,
            callback_index,
        })
    }

    /// Index of the first transition row for `(state, event)`, or `None`
    /// if the pair is out of range or simply has no authored transition.
    pub fn transition_at(&self, state: State, event: Event, extrema: Extrema) -> Option<u32> {
        if state < extrema.state_min
            || state > extrema.state_max
            || event < extrema.event_min
            || event > extrema.event_max
        {
            return None;
        }
        let event_span = extrema.event_count as usize;
        let offset =
            (state - extrema.state_min) as usize * event_span + (event - extrema.event_min) as usize;
        self.transition_index.get(offset).copied().flatten()
    }

    /// Index of the callback row for `state`, or `None` if out of range or
    /// simply absent from the authored callback table.
    pub fn callback_at(&self, state: State, extrema: Extrema) -> Option<u32> {
        if state < extrema.state_min || state > extrema.state_max {
            return None;
        }
        let offset = (state - extrema.state_min) as usize;
        self.callback_index.get(offset).copied().flatten()
    }

    pub fn transition_index(&self) -> &[Option<u32>] {
        &self.transition_index
    }

    pub fn callback_index(&self) -> &[Option<u32>] {
        &self.callback_index
    }
}
