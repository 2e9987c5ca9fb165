//! ISR- and multi-thread-safe wrappers, gated behind the `concurrent`
//! feature.
//!
//! `spec.md` §5 states the baseline dispatch model is single-threaded
//! cooperative, but allows a process-wide pool to be guarded "by a mutex or
//! equivalent" for multi-threaded callers, and `SPEC_FULL.md` §5 extends
//! that with a re-entrancy guard around dispatch itself — generalizing the
//! teacher's `DISPATCH_ACTIVE_*` atomic / `critical_section::Mutex`-guarded
//! pending queue (`typed-fsm`'s `src/fsm.rs`, the `concurrent` arm of
//! `state_machine!`) from a macro-per-machine-type pattern to one reusable
//! over any `Machine<Ctx, Q>`.
//!
//! Unlike the teacher, which keeps a second `heapless::Deque` purely for
//! events that arrive while a dispatch is active, this crate's engine
//! already owns one bounded [`crate::EventQueue`] per machine — so a
//! reentrant `add_event` just enqueues into that same queue, and a
//! reentrant `run` is simply skipped (the active call's own drain loop
//! will reach the newly queued event).

use core::cell::RefCell;
use core::sync::atomic::{AtomicBool, Ordering};

use critical_section::Mutex;

use crate::error::{DispatchError, InitError, Status};
use crate::machine::Machine;
use crate::model::Event;
use crate::pool::Pool;
use crate::queue::EventQueue;

/// A [`Machine`] wrapped so `add_event`/`run` are safe to call from an ISR
/// and a main loop (or two threads) at once.
///
/// `run` uses an atomic compare-exchange to detect re-entrancy: if a
/// dispatch is already in progress when `run` is called again (e.g. an ISR
/// firing mid-dispatch), the second call returns immediately without
/// touching the machine — correct because the event that triggered it was
/// already placed on the shared queue by `add_event`, and the active
/// dispatch's own `run` loop will pick it up on its next call.
pub struct GuardedMachine<Ctx, Q> {
    machine: Mutex<RefCell<Machine<Ctx, Q>>>,
    dispatch_active: AtomicBool,
}

impl<Ctx, Q> GuardedMachine<Ctx, Q>
where
    Q: EventQueue,
{
    /// Wraps an already-initialized [`Machine`].
    pub fn new(machine: Machine<Ctx, Q>) -> Self {
        Self {
            machine: Mutex::new(RefCell::new(machine)),
            dispatch_active: AtomicBool::new(false),
        }
    }

    /// Enqueues `event`. Safe to call from an ISR while a main-loop `run`
    /// is in progress — the critical section only protects the queue push,
    /// not the whole dispatch.
    pub fn add_event(&self, event: Event) -> Result<(), DispatchError> {
        critical_section::with(|cs| self.machine.borrow(cs).borrow_mut().add_event(event))
    }

    /// Dequeues and dispatches one event, unless another call is already
    /// mid-dispatch, in which case this call is a no-op that reports
    /// [`Status::MoreQueued`] (the active call will reach the event).
    pub fn run(&self) -> Status {
        if self
            .dispatch_active
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            crate::__fsm_log!("table_fsm: reentrant run() skipped, dispatch already active");
            return Status::MoreQueued;
        }

        let status = critical_section::with(|cs| self.machine.borrow(cs).borrow_mut().run());

        self.dispatch_active.store(false, Ordering::Release);
        status
    }

    /// Runs `f` with shared access to the user data value.
    pub fn with_user_data<R>(&self, f: impl FnOnce(&Ctx) -> R) -> R {
        critical_section::with(|cs| f(self.machine.borrow(cs).borrow().user_data()))
    }

    /// Runs `f` with exclusive access to the user data value, e.g. to
    /// update a sensor reading a guard will read, or a counter before the
    /// event whose outcome it tallies is dispatched.
    pub fn with_user_data_mut<R>(&self, f: impl FnOnce(&mut Ctx) -> R) -> R {
        critical_section::with(|cs| f(self.machine.borrow(cs).borrow_mut().user_data_mut()))
    }

    /// The machine's current state.
    pub fn state(&self) -> crate::model::State {
        critical_section::with(|cs| self.machine.borrow(cs).borrow().state())
    }
}

/// A [`Pool`] whose `claim`/`release` are safe to call from multiple
/// threads or an ISR, guarded the same way the teacher guards its
/// pending-event queue: a `critical_section::Mutex<RefCell<...>>` around
/// the whole slot array.
pub struct ConcurrentPool<Ctx, Q, const N: usize> {
    inner: Mutex<RefCell<Pool<Ctx, Q, N>>>,
}

impl<Ctx, Q, const N: usize> ConcurrentPool<Ctx, Q, N>
where
    Q: EventQueue,
{
    /// An empty pool with all `N` slots free.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Pool::new())),
        }
    }

    /// Claims a free slot for `machine`, returning its index.
    pub fn claim(&self, machine: Machine<Ctx, Q>) -> Result<usize, InitError> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().claim(machine))
    }

    /// Frees slot `index` back to the pool.
    pub fn release(&self, index: usize) {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().release(index));
    }

    /// Number of currently occupied slots.
    pub fn active_count(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().active_count())
    }

    /// Total slot count, i.e. `N`.
    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<Ctx, Q, const N: usize> Default for ConcurrentPool<Ctx, Q, N>
where
    Q: EventQueue,
{
    fn default() -> Self {
        Self::new()
    }
}
