//! Bounded FIFO queue over contiguous ring-buffer storage.
//!
//! # Overview
//! [`CircularQueue`] stores up to `capacity` elements in a single block of
//! slots allocated up front. Elements are added at the rear and removed from
//! the front; the live run wraps around the end of the block instead of
//! shifting.
//!
//! Every operation reports its outcome through a `Result`. A full queue
//! rejects an insert and hands the element back, and an empty queue answers
//! `Err(QueueError::Empty)`. Neither case panics.
//!
//! # Example
//! ```
//! use ring_queue::{CircularQueue, QueueError};
//!
//! let mut queue = CircularQueue::new(2)?;
//! queue.enqueue("a")?;
//! queue.enqueue("b")?;
//! assert_eq!(queue.enqueue("c").unwrap_err().error(), QueueError::Full);
//!
//! assert_eq!(queue.dequeue(), Ok("a"));
//! assert_eq!(queue.peek_rear(), Ok(&"b"));
//! # Ok::<(), QueueError>(())
//! ```
//!
//! # Element ownership
//! The queue owns the `T` values placed in it and drops whatever is still
//! queued when it is dropped. When `T` is itself a handle (`&U`, `Rc<U>`,
//! an id), only the handle is stored: the referent belongs to the caller,
//! which must keep it alive while it is queued. For plain references the
//! borrow checker enforces that.

use super::inner_ring::Slots;
use crate::config::QueueConfig;
use crate::error::{QueueError, Rejected};
use std::fmt;
use std::iter::FusedIterator;
use tracing::{debug, trace};

/// Position of the live run inside the slot block.
///
/// Replaces a `-1` sentinel for the empty queue: `head` and `tail` only exist
/// while at least one element is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Empty,
    /// `head` is the next element to dequeue, `tail` the most recently
    /// enqueued one. Both are valid slot indices.
    Occupied { head: usize, tail: usize },
}

/// Coarse occupancy of a queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueState {
    /// No elements. Reported for a zero-capacity queue too, which is full at
    /// the same time.
    Empty,
    Partial,
    Full,
}

/// Advances a slot index by one, wrapping to zero at `capacity`.
///
/// # Wrap-around logic
///
/// Instead of `(index + 1) % capacity`, the incremented index is multiplied
/// by the boolean `(index + 1) < capacity`:
///
/// ```text
/// index = 3, capacity = 4  ->  4 * (4 < 4) = 0
/// index = 1, capacity = 4  ->  2 * (2 < 4) = 2
/// ```
///
/// Only called with `index < capacity`, so the result stays in bounds.
#[inline(always)]
fn wrap_next(index: usize, capacity: usize) -> usize {
    let next = index + 1;
    next * (next < capacity) as usize
}

/// A bounded, single-threaded FIFO queue backed by a ring buffer.
///
/// # State machine
///
/// ```text
///            enqueue            enqueue (len + 1 == capacity)
///   EMPTY ------------> PARTIAL -----------------------------> FULL
///     ^                  |   ^                                  |
///     +------------------+   +----------------------------------+
///     dequeue (len == 1)            dequeue
/// ```
///
/// With `capacity == 0` EMPTY and FULL coincide, and [`enqueue`] always
/// reports [`QueueError::Full`].
///
/// # Thread safety
///
/// None provided. All mutation goes through `&mut self`; wrap the queue in a
/// lock to share it between threads.
///
/// [`enqueue`]: CircularQueue::enqueue
pub struct CircularQueue<T> {
    slots: Slots<T>,
    len: usize,
    cursor: Cursor,
}

impl<T> CircularQueue<T> {
    /// Creates an empty queue with room for exactly `capacity` elements.
    ///
    /// Returns [`QueueError::Allocation`] if the storage cannot be obtained.
    pub fn new(capacity: usize) -> Result<Self, QueueError> {
        let slots = Slots::allocate(capacity)?;
        trace!(capacity, "created circular queue");
        Ok(Self {
            slots,
            len: 0,
            cursor: Cursor::Empty,
        })
    }

    pub fn from_config(config: &QueueConfig) -> Result<Self, QueueError> {
        Self::new(config.capacity)
    }

    /// Appends `value` at the rear.
    ///
    /// Returns the value inside a [`Rejected`] with [`QueueError::Full`] when
    /// `len == capacity`; the queue is left unchanged.
    ///
    /// # Wrap-around logic
    ///
    /// From [`Cursor::Empty`] both `head` and `tail` move to slot 0. Otherwise
    /// `tail` advances by one with wraparound, landing in the slot most recently
    /// vacated at the front once the run has wrapped.
    pub fn enqueue(&mut self, value: T) -> Result<(), Rejected<T>> {
        if self.is_full() {
            return Err(Rejected::new(QueueError::Full, value));
        }

        let (head, tail) = match self.cursor {
            Cursor::Empty => (0, 0),
            Cursor::Occupied { head, tail } => (head, wrap_next(tail, self.slots.capacity())),
        };

        // Not full, so `tail` is vacant.
        unsafe { self.slots.write(tail, value) };
        self.len += 1;
        self.cursor = Cursor::Occupied { head, tail };
        Ok(())
    }

    /// Removes and returns the front element.
    ///
    /// Once the last element leaves, the cursor returns to [`Cursor::Empty`].
    pub fn dequeue(&mut self) -> Result<T, QueueError> {
        let Cursor::Occupied { head, tail } = self.cursor else {
            return Err(QueueError::Empty);
        };

        let value = unsafe { self.slots.take(head) };
        self.len -= 1;
        self.cursor = if self.len == 0 {
            Cursor::Empty
        } else {
            Cursor::Occupied {
                head: wrap_next(head, self.slots.capacity()),
                tail,
            }
        };
        Ok(value)
    }

    /// Returns the front element, the next one [`dequeue`](Self::dequeue)
    /// would return.
    pub fn peek_front(&self) -> Result<&T, QueueError> {
        match self.cursor {
            Cursor::Empty => Err(QueueError::Empty),
            Cursor::Occupied { head, .. } => Ok(unsafe { self.slots.get(head) }),
        }
    }

    /// Returns the most recently enqueued element.
    pub fn peek_rear(&self) -> Result<&T, QueueError> {
        match self.cursor {
            Cursor::Empty => Err(QueueError::Empty),
            Cursor::Occupied { tail, .. } => Ok(unsafe { self.slots.get(tail) }),
        }
    }

    pub fn peek_front_mut(&mut self) -> Result<&mut T, QueueError> {
        match self.cursor {
            Cursor::Empty => Err(QueueError::Empty),
            Cursor::Occupied { head, .. } => Ok(unsafe { self.slots.get_mut(head) }),
        }
    }

    pub fn peek_rear_mut(&mut self) -> Result<&mut T, QueueError> {
        match self.cursor {
            Cursor::Empty => Err(QueueError::Empty),
            Cursor::Occupied { tail, .. } => Ok(unsafe { self.slots.get_mut(tail) }),
        }
    }

    /// Reallocates the storage to exactly `new_capacity` slots.
    ///
    /// `new_capacity` is absolute, not an increment. Shrinking is allowed as
    /// long as every live element still fits; otherwise
    /// [`QueueError::WouldTruncate`] is returned.
    ///
    /// The live run is re-linearized: the element at `head` moves to slot 0
    /// and the rest follow in FIFO order, so a wrapped queue keeps its order.
    /// On any error, including [`QueueError::Allocation`], the queue is
    /// unchanged and still usable.
    pub fn grow(&mut self, new_capacity: usize) -> Result<(), QueueError> {
        if new_capacity < self.len {
            return Err(QueueError::WouldTruncate {
                len: self.len,
                requested: new_capacity,
            });
        }

        let mut slots = Slots::allocate(new_capacity)?;
        if let Cursor::Occupied { head, .. } = self.cursor {
            unsafe { self.slots.move_run(head, self.len, &mut slots) };
            self.cursor = Cursor::Occupied {
                head: 0,
                tail: self.len - 1,
            };
        }

        let old_capacity = self.slots.capacity();
        // The old block is vacant now; dropping it only frees memory.
        drop(std::mem::replace(&mut self.slots, slots));
        debug!(old_capacity, new_capacity, len = self.len, "resized circular queue");
        Ok(())
    }

    /// Drops every element and returns to [`Cursor::Empty`]. Capacity is kept.
    pub fn clear(&mut self) {
        let Cursor::Occupied { head, .. } = self.cursor else {
            return;
        };
        let len = self.len;
        // Reset first so a panicking destructor leaks instead of double-dropping.
        self.cursor = Cursor::Empty;
        self.len = 0;

        let capacity = self.slots.capacity();
        let mut index = head;
        for _ in 0..len {
            unsafe { self.slots.drop_at(index) };
            index = wrap_next(index, capacity);
        }
        trace!(dropped = len, "cleared circular queue");
    }

    /// Ends the queue's lifecycle, dropping queued elements and releasing the
    /// storage. Equivalent to letting it go out of scope.
    pub fn destroy(self) {
        trace!(capacity = self.capacity(), len = self.len, "destroying circular queue");
        drop(self);
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if the queue is full. A zero-capacity queue always is.
    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.len == self.slots.capacity()
    }

    /// Current head/tail positions.
    #[inline]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn state(&self) -> QueueState {
        if self.is_empty() {
            QueueState::Empty
        } else if self.is_full() {
            QueueState::Full
        } else {
            QueueState::Partial
        }
    }

    /// Iterates front to rear without removing anything.
    pub fn iter(&self) -> Iter<'_, T> {
        let index = match self.cursor {
            Cursor::Empty => 0,
            Cursor::Occupied { head, .. } => head,
        };
        Iter {
            queue: self,
            index,
            remaining: self.len,
        }
    }
}

impl<T> Drop for CircularQueue<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: fmt::Debug> fmt::Debug for CircularQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Borrowing FIFO iterator returned by [`CircularQueue::iter`].
pub struct Iter<'a, T> {
    queue: &'a CircularQueue<T>,
    index: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let queue: &'a CircularQueue<T> = self.queue;
        // `remaining > 0` keeps `index` inside the live run.
        let item = unsafe { queue.slots.get(self.index) };
        self.index = wrap_next(self.index, queue.slots.capacity());
        self.remaining -= 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a CircularQueue<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

#[cfg(test)]
mod wrap_tests {
    use super::wrap_next;

    #[test]
    fn wraps_at_capacity() {
        assert_eq!(wrap_next(0, 4), 1);
        assert_eq!(wrap_next(2, 4), 3);
        assert_eq!(wrap_next(3, 4), 0);
        assert_eq!(wrap_next(0, 1), 0);
    }
}
