//! Event Queue Adapter (component A).
//!
//! `spec.md` §4.A specifies five capabilities — `init`, `is_empty`,
//! `is_full`, `add`, `read` — plus an engine-owned fixed backing buffer.
//! [`EventQueue`] generalizes those five raw function pointers into a
//! trait, per the design notes' "map to a small trait/interface... not to
//! virtual inheritance". [`ArrayQueue`] is the default, allocation-free
//! ring-buffer implementation, the direct analogue of the C original's
//! `event_queue_buffer[LFSM_EV_QUEUE_SIZE]`.

use crate::error::InitError;
use crate::model::Event;

/// Capability interface the dispatcher needs from a bounded event FIFO.
///
/// Implementors own their backing storage. Ordering is FIFO. Concurrency,
/// if any, is the implementation's own responsibility — the engine assumes
/// calls into one queue instance are serialized, except when reached
/// through [`crate::concurrent::GuardedMachine`] under the `concurrent`
/// feature.
pub trait EventQueue: Sized {
    /// Constructs a queue able to hold at least `capacity` events.
    fn init(capacity: usize) -> Result<Self, InitError>;

    /// `true` when no event is queued.
    fn is_empty(&self) -> bool;

    /// `true` when the queue cannot accept another event.
    fn is_full(&self) -> bool;

    /// Enqueues `event`. Returns `false` (and leaves the queue unchanged)
    /// if the queue was full.
    fn add(&mut self, event: Event) -> bool;

    /// Dequeues and returns the oldest event.
    ///
    /// # Panics
    ///
    /// Implementations may panic (debug builds) or return an unspecified
    /// value (release builds) if called while [`EventQueue::is_empty`]
    /// would return `true`; callers (the dispatcher) always check first.
    fn read(&mut self) -> Event;
}

/// Default fixed-capacity ring buffer over `[Event; N]`. No heap
/// allocation — the two *lookup indices* are the only heap-backed state
/// the engine owns (`spec.md` §5).
pub struct ArrayQueue<const N: usize> {
    buffer: [Event; N],
    head: usize,
    len: usize,
}

impl<const N: usize> EventQueue for ArrayQueue<N> {
    fn init(capacity: usize) -> Result<Self, InitError> {
        if capacity > N {
            return Err(InitError::QueueInitFailed);
        }
        Ok(Self {
            buffer: [0; N],
            head: 0,
            len: 0,
        })
    }

    fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn is_full(&self) -> bool {
        self.len == N
    }

    fn add(&mut self, event: Event) -> bool {
        if self.is_full() {
            return false;
        }
        let tail = (self.head + self.len) % N;
        self.buffer[tail] = event;
        self.len += 1;
        true
    }

    fn read(&mut self) -> Event {
        debug_assert!(!self.is_empty(), "read() called on an empty ArrayQueue");
        let value = self.buffer[self.head];
        self.head = (self.head + 1) % N;
        self.len = self.len.saturating_sub(1);
        value
    }
}
