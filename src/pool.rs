//! Context Pool (component B).
//!
//! A process-wide fixed-capacity array of machine slots, each either empty
//! or occupied. `claim` hands out the first empty slot; `release` frees
//! one back. The default flavor assumes a single cooperative caller,
//! exactly the baseline model in `spec.md` §5.
//!
//! With the `concurrent` feature the slot array moves behind a
//! `critical_section::Mutex<RefCell<...>>`, the same pattern the teacher
//! uses for its pending-event queue, so `claim`/`release` are safe from an
//! ISR or a second thread.

use crate::error::InitError;
use crate::machine::Machine;
use crate::queue::EventQueue;

/// A fixed-capacity pool of `N` machine slots.
///
/// `MAX_COUNT` from `spec.md` §6 is this struct's `N` const generic rather
/// than a crate-wide `#define`, so callers can size independent pools
/// differently within one binary.
pub struct Pool<Ctx, Q, const N: usize> {
    slots: [Option<Machine<Ctx, Q>>; N],
}

impl<Ctx, Q, const N: usize> Pool<Ctx, Q, N>
where
    Q: EventQueue,
{
    /// An empty pool with all `N` slots free.
    pub const fn new() -> Self {
        Self {
            slots: [const { None }; N],
        }
    }

    /// Moves `machine` into the first free slot, returning its index.
    ///
    /// Fails with [`InitError::PoolExhausted`] if every slot is occupied,
    /// mirroring `lfsm_init_func` returning `NULL` when `MAX_COUNT` is
    /// already reached.
    pub fn claim(&mut self, machine: Machine<Ctx, Q>) -> Result<usize, InitError> {
        let slot = self
            .slots
            .iter()
            .position(Option::is_none)
            .ok_or(InitError::PoolExhausted)?;
        self.slots[slot] = Some(machine);
        Ok(slot)
    }

    /// Frees slot `index`, dropping the machine it held, if any.
    ///
    /// A no-op on an already-empty slot or an out-of-range index, mirroring
    /// `lfsm_deinit`'s tolerance of a double-free on an inactive context.
    pub fn release(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = None;
        }
    }

    /// Shared access to the machine in slot `index`, if occupied.
    pub fn get(&self, index: usize) -> Option<&Machine<Ctx, Q>> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Exclusive access to the machine in slot `index`, if occupied.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Machine<Ctx, Q>> {
        self.slots.get_mut(index).and_then(Option::as_mut)
    }

    /// `true` when slot `index` currently holds a machine.
    pub fn is_active(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(Option::is_some)
    }

    /// Number of occupied slots.
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Total slot count, i.e. `N`.
    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<Ctx, Q, const N: usize> Default for Pool<Ctx, Q, N>
where
    Q: EventQueue,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{StateCallbacks, Transition};
    use crate::queue::ArrayQueue;

    fn build_machine() -> Machine<u32, ArrayQueue<4>> {
        let transitions = [Transition::new(1, 10, 2)];
        let callbacks: [StateCallbacks<u32>; 0] = [];
        Machine::init(0u32, 1, &transitions, &callbacks, 4).unwrap()
    }

    #[test]
    fn claim_hands_out_slots_until_exhausted() {
        let mut pool: Pool<u32, ArrayQueue<4>, 2> = Pool::new();
        let a = pool.claim(build_machine()).unwrap();
        let b = pool.claim(build_machine()).unwrap();
        assert_ne!(a, b);
        assert_eq!(
            pool.claim(build_machine()).unwrap_err(),
            InitError::PoolExhausted
        );
        assert_eq!(pool.active_count(), 2);
    }

    #[test]
    fn release_frees_a_slot_for_reuse() {
        let mut pool: Pool<u32, ArrayQueue<4>, 1> = Pool::new();
        let a = pool.claim(build_machine()).unwrap();
        pool.release(a);
        assert!(!pool.is_active(a));
        assert!(pool.claim(build_machine()).is_ok());
    }

    #[test]
    fn release_on_empty_or_out_of_range_slot_is_a_no_op() {
        let mut pool: Pool<u32, ArrayQueue<4>, 1> = Pool::new();
        pool.release(0);
        pool.release(99);
        assert_eq!(pool.active_count(), 0);
    }
}
