//! Return types for the public API.
//!
//! Kept as plain hand-rolled enums with manual `Display`/`Error` impls —
//! the teacher crate carries no error-derive dependency anywhere in its
//! `no_std` path, and neither does any other `no_std` crate in the
//! surrounding pack, so this stays aligned rather than pulling in
//! `thiserror` for four-variant enums.

use core::fmt;

/// Failure modes that can occur while constructing a [`crate::Machine`].
///
/// Mirrors `spec.md` §7's construction-time taxonomy: the C original
/// signals all three by returning `NULL` from `lfsm_init_func`; this is the
/// distinguishing, matchable version of that `NULL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitError {
    /// No free slot in the context pool.
    PoolExhausted,
    /// The event queue's `init` capability failed (e.g. requested capacity
    /// exceeds the queue's fixed backing storage).
    QueueInitFailed,
    /// One of the two dense lookup indices could not be allocated.
    AllocationError,
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            InitError::PoolExhausted => "no free context slot in the pool",
            InitError::QueueInitFailed => "event queue initialization failed",
            InitError::AllocationError => "lookup index allocation failed",
        };
        f.write_str(msg)
    }
}

impl core::error::Error for InitError {}

/// Failure modes returned by [`crate::Machine::add_event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchError {
    /// The event was outside `[event_min, event_max]`; it was never
    /// enqueued.
    EventOutOfRange,
    /// The queue capability reported full; the event was not enqueued.
    QueueFull,
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            DispatchError::EventOutOfRange => "event outside the table's [event_min, event_max]",
            DispatchError::QueueFull => "event queue is full",
        };
        f.write_str(msg)
    }
}

impl core::error::Error for DispatchError {}

/// Successful outcomes of [`crate::Machine::run`].
///
/// `ERROR` from `spec.md`'s C-flavored `{OK, NOP, MORE_QUEUED, ERROR}`
/// return enum is carried by `Result::Err(DispatchError)` instead of a
/// fourth variant here — a `Result` is the non-exceptional, no-panic
/// analogue of a tagged return code, not a deviation from "no
/// exception-like control flow" (`spec.md` §7).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The queue was empty; nothing was dispatched, no callbacks ran.
    Nop,
    /// One event was dispatched and the queue drained to empty.
    Ok,
    /// One event was dispatched and at least one more event remains
    /// queued.
    MoreQueued,
}
