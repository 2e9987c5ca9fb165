//! # table-fsm: Table-Driven Finite State Machine Runtime
//!
//! A reusable, table-driven FSM runtime for embedded and control-oriented
//! software. Callers declare a machine with two flat tables — a transition
//! table and a per-state callback table — plus a user data value and an
//! initial state. The runtime dispatches queued events by looking up the
//! current `(state, event)` pair, evaluates optional guard predicates to
//! pick a single winning transition, performs the state change, and invokes
//! the appropriate `on_entry` / `on_run` / `on_exit` callbacks.
//!
//! ## Design Philosophy
//!
//! - **Table-driven, not macro-generated:** transitions and callbacks are
//!   plain data (`&[Transition<Ctx>]`, `&[StateCallbacks<Ctx>]`), built
//!   however the caller likes — `const` arrays, a build script, a config
//!   file parsed at startup.
//! - **Zero-allocation callback surface:** guards and callbacks are `fn`
//!   pointers over a generic context type, never `Box<dyn _>`. The two
//!   derived lookup indices are the only heap allocation the engine makes.
//! - **`no_std`:** the crate links only `alloc` for the two dense indices
//!   and the normalized table copies; the default [`ArrayQueue`] event
//!   queue is allocation-free.
//!
//! ## Quick Start
//!
//! ```rust
//! use table_fsm::{ArrayQueue, Machine, StateCallbacks, Status, Transition};
//!
//! const OFF: u8 = 0;
//! const ON: u8 = 1;
//! const TOGGLE: u8 = 10;
//!
//! struct Light {
//!     brightness: u8,
//! }
//!
//! fn turn_on(ctx: &mut Light) {
//!     ctx.brightness = 100;
//! }
//! fn turn_off(ctx: &mut Light) {
//!     ctx.brightness = 0;
//! }
//!
//! let transitions = [
//!     Transition::new(OFF, TOGGLE, ON),
//!     Transition::new(ON, TOGGLE, OFF),
//! ];
//! let callbacks = [
//!     StateCallbacks::new(ON).with_entry(turn_on),
//!     StateCallbacks::new(OFF).with_entry(turn_off),
//! ];
//!
//! let mut fsm: Machine<Light, ArrayQueue<5>> =
//!     Machine::init(Light { brightness: 0 }, OFF, &transitions, &callbacks, 5).unwrap();
//!
//! fsm.add_event(TOGGLE).unwrap();
//! assert_eq!(fsm.run(), Status::Ok);
//! assert_eq!(fsm.user_data().brightness, 100);
//! ```
//!
//! ## Feature flags
//!
//! - `logging` — routes every dispatch, guard decision, and queue/alloc
//!   failure through the [`log`] crate at zero cost when disabled.
//! - `concurrent` — adds [`concurrent::GuardedMachine`] and
//!   [`concurrent::ConcurrentPool`], safe to call from an ISR and a main
//!   loop (or multiple threads) simultaneously.
//!
//! ## Non-goals
//!
//! Hierarchical/orthogonal states, transition-action callbacks distinct
//! from entry/exit, dynamic addition or removal of states after
//! initialization, and cross-process persistence of machine state are all
//! out of scope — see `DESIGN.md`.

#![no_std]

extern crate alloc;

// Logging support (optional) — internal macro, zero-cost when the
// `logging` feature is off. Ported in spirit from the teacher's
// `__fsm_log!` in `src/fsm.rs`.
#[cfg(feature = "logging")]
#[macro_export]
#[doc(hidden)]
macro_rules! __fsm_log {
    ($($arg:tt)*) => {
        log::trace!($($arg)*);
    };
}

#[cfg(not(feature = "logging"))]
#[macro_export]
#[doc(hidden)]
macro_rules! __fsm_log {
    ($($arg:tt)*) => {};
}

pub mod callbacks;
pub mod dispatch;
pub mod error;
pub mod index;
pub mod machine;
pub mod model;
pub mod pool;
pub mod prepare;
pub mod queue;

#[cfg(feature = "concurrent")]
pub mod concurrent;

pub use error::{DispatchError, InitError, Status};
pub use machine::Machine;
pub use model::{Callback, Event, Guard, State, StateCallbacks, Transition, INVALID_SENTINEL};
pub use pool::Pool;
pub use prepare::Extrema;
pub use queue::{ArrayQueue, EventQueue};

/// Historical default pool capacity (`LFSM_MAX_COUNT` in the C original).
/// [`Pool`]'s capacity is an explicit `const N: usize` generic parameter;
/// this constant only documents the original library's default.
pub const DEFAULT_MAX_COUNT: usize = 3;

/// Historical default event queue capacity (`LFSM_EV_QUEUE_SIZE`).
/// [`ArrayQueue`]'s capacity is an explicit `const N: usize` generic
/// parameter; this constant only documents the original library's default.
pub const DEFAULT_EV_QUEUE_SIZE: usize = 5;
