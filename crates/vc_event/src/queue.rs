use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt::Debug;

use crate::{EventBox, EventKind};

// -----------------------------------------------------------------------------
// EventQueue

/// A FIFO queue of events waiting to be dispatched.
///
/// The queue is unbounded. Like [`Listeners`](crate::listener::Listeners)
/// every method takes `&self` and no borrow is held while the dispatch
/// function runs, so the function may enqueue, inspect or clear the queue.
///
/// Events stay in the queue until they are dispatched or discarded, also
/// while a [`drain_matching`](Self::drain_matching) pass is running.
#[derive(Default)]
pub struct EventQueue {
    state: RefCell<QueueState>,
}

#[derive(Default)]
struct QueueState {
    entries: VecDeque<EventBox>,
    passes: Vec<Pass>,
}

/// Position of a running `drain_matching` pass.
///
/// The first `retained` entries were visited and kept, the next `unvisited`
/// entries still have to be looked at.
#[derive(Clone, Copy)]
struct Pass {
    retained: usize,
    unvisited: usize,
}

impl Pass {
    const FINISHED: Self = Self {
        retained: 0,
        unvisited: 0,
    };
}

impl QueueState {
    fn remove(&mut self, index: usize) -> Option<EventBox> {
        let event = self.entries.remove(index)?;
        for pass in &mut self.passes {
            if index < pass.retained {
                pass.retained -= 1;
            } else if index < pass.retained + pass.unvisited {
                pass.unvisited -= 1;
            }
        }
        Some(event)
    }
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            state: RefCell::new(QueueState {
                entries: VecDeque::with_capacity(capacity),
                passes: Vec::new(),
            }),
        }
    }

    /// Appends `event` at the tail.
    #[inline]
    pub fn enqueue(&self, event: EventBox) {
        self.state.borrow_mut().entries.push_back(event);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.state.borrow().entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.state.borrow().entries.is_empty()
    }

    /// Returns the kinds of the queued events, head first.
    pub fn kinds(&self) -> Vec<EventKind> {
        let state = self.state.borrow();
        state.entries.iter().map(EventBox::kind).collect()
    }

    /// Drops every queued event without dispatching it.
    ///
    /// A running `drain_matching` pass ends after its current event.
    ///
    /// Returns how many events were discarded.
    pub fn clear(&self) -> usize {
        let discarded = {
            let mut state = self.state.borrow_mut();
            state.passes.fill(Pass::FINISHED);
            core::mem::take(&mut state.entries)
        };
        discarded.len()
    }

    /// Pops events from the head and passes them to `dispatch` until the
    /// queue is empty.
    ///
    /// Events enqueued by `dispatch` itself are drained by the same call, so
    /// this only returns once no event of any kind is left.
    ///
    /// Returns how many events were dispatched.
    pub fn drain_all(&self, mut dispatch: impl FnMut(EventBox)) -> usize {
        let mut count = 0;
        loop {
            let next = self.state.borrow_mut().remove(0);
            let Some(event) = next else {
                return count;
            };
            dispatch(event);
            count += 1;
        }
    }

    /// Dispatches the queued events of `kind` and keeps all others.
    ///
    /// This is a single pass over the events queued when the call starts.
    /// Matching events are passed to `dispatch` in queue order. The others
    /// stay queued in their original order, in front of anything `dispatch`
    /// enqueued during the pass; those new events wait for a later drain.
    ///
    /// If `dispatch` panics, the events not yet dispatched stay queued.
    ///
    /// Returns how many events were dispatched.
    pub fn drain_matching(&self, kind: EventKind, mut dispatch: impl FnMut(EventBox)) -> usize {
        let pass = {
            let mut state = self.state.borrow_mut();
            let unvisited = state.entries.len();
            state.passes.push(Pass {
                retained: 0,
                unvisited,
            });
            PassGuard {
                state: &self.state,
                index: state.passes.len() - 1,
            }
        };

        let mut count = 0;
        loop {
            let next = {
                let mut state = self.state.borrow_mut();
                let Pass {
                    retained,
                    unvisited,
                } = state.passes[pass.index];
                if unvisited == 0 {
                    break;
                }
                let Some(current) = state.entries.get(retained) else {
                    break;
                };
                if current.kind() == kind {
                    state.remove(retained)
                } else {
                    let current = &mut state.passes[pass.index];
                    current.retained += 1;
                    current.unvisited -= 1;
                    None
                }
            };
            if let Some(event) = next {
                dispatch(event);
                count += 1;
            }
        }
        count
    }
}

impl Debug for EventQueue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list()
            .entries(self.state.borrow().entries.iter())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// PassGuard

/// Ends a [`EventQueue::drain_matching`] pass when dropped, normally or
/// while unwinding. Nested passes always end before the outer one.
struct PassGuard<'a> {
    state: &'a RefCell<QueueState>,
    index: usize,
}

impl Drop for PassGuard<'_> {
    fn drop(&mut self) {
        self.state.borrow_mut().passes.truncate(self.index);
    }
}

// -----------------------------------------------------------------------------
// Tests
