//! Error and status types shared by [`CircularQueue`](crate::CircularQueue)
//! and [`QueueHandle`](crate::QueueHandle).
//!
//! Every operation reports failure through its return value. Nothing in this
//! crate panics on a full, empty or missing queue, and nothing logs an error on
//! the caller's behalf.

use std::fmt;

/// Reasons a queue operation can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    /// The queue handle is null or destroyed, or a null element was supplied.
    #[error("invalid queue handle or null element")]
    InvalidHandle,

    /// Backing storage for `capacity` slots could not be obtained.
    #[error("could not allocate storage for {capacity} slots")]
    Allocation { capacity: usize },

    /// Enqueue attempted while `len == capacity`.
    #[error("queue is full")]
    Full,

    /// Dequeue or peek attempted on a queue with no elements.
    #[error("queue is empty")]
    Empty,

    /// Resize requested to fewer slots than there are live elements.
    #[error("cannot resize to {requested} slots while holding {len} elements")]
    WouldTruncate { len: usize, requested: usize },
}

impl QueueError {
    /// Maps the error onto the coarse status code reported to callers.
    pub fn status(&self) -> Status {
        match self {
            QueueError::InvalidHandle => Status::NullPointer,
            QueueError::Full => Status::Full,
            QueueError::Empty => Status::Empty,
            QueueError::Allocation { .. } | QueueError::WouldTruncate { .. } => Status::Nok,
        }
    }
}

/// A failed insertion: the error plus the element the queue did not take.
///
/// Dropping a `Rejected` drops the element with it. Use [`Rejected::into_inner`]
/// to get it back, or `?` to convert into a plain [`QueueError`].
#[derive(thiserror::Error)]
#[error("{error}")]
pub struct Rejected<T> {
    error: QueueError,
    value: T,
}

impl<T> Rejected<T> {
    pub(crate) fn new(error: QueueError, value: T) -> Self {
        Self { error, value }
    }

    /// The reason the element was rejected.
    #[inline]
    pub fn error(&self) -> QueueError {
        self.error
    }

    /// Returns the element that was not enqueued.
    #[inline]
    pub fn into_inner(self) -> T {
        self.value
    }

    #[inline]
    pub fn into_parts(self) -> (QueueError, T) {
        (self.error, self.value)
    }

    /// Transforms the carried element, keeping the error.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Rejected<U> {
        Rejected {
            error: self.error,
            value: f(self.value),
        }
    }
}

impl<T> fmt::Debug for Rejected<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rejected")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl<T> From<Rejected<T>> for QueueError {
    fn from(rejected: Rejected<T>) -> Self {
        rejected.error
    }
}

/// Status codes for callers written against a return-code convention.
///
/// `NotFull` from the older C-style API is not reproduced; [`Status::Ok`]
/// covers it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Ok,
    /// Generic failure: allocation or an impossible resize.
    Nok,
    Full,
    Empty,
    NullPointer,
}

impl Status {
    /// Collapses any queue result into its status code.
    pub fn of<T>(result: &Result<T, QueueError>) -> Status {
        match result {
            Ok(_) => Status::Ok,
            Err(err) => err.status(),
        }
    }

    #[inline]
    pub fn is_ok(self) -> bool {
        self == Status::Ok
    }
}

impl From<QueueError> for Status {
    fn from(err: QueueError) -> Self {
        err.status()
    }
}

impl<T> From<&Rejected<T>> for Status {
    fn from(rejected: &Rejected<T>) -> Self {
        rejected.error.status()
    }
}
