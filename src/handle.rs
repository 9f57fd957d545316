//! Nullable queue handle with a status-code surface.
//!
//! [`QueueHandle`] is for callers that pass queues around as possibly-null
//! handles and check a status after every call. It wraps an optional
//! [`CircularQueue`] and makes every operation total. A null or destroyed
//! handle answers [`QueueError::InvalidHandle`] (status
//! [`Status::NullPointer`]) instead of misbehaving. So does a null element,
//! which keeps "no element" distinct from "empty queue".
//!
//! ```
//! use ring_queue::{QueueHandle, Status};
//!
//! let (mut handle, status) = QueueHandle::create(1);
//! assert_eq!(status, Status::Ok);
//!
//! assert!(handle.enqueue(Some(7)).is_ok());
//! assert_eq!(Status::from(&handle.enqueue(Some(8)).unwrap_err()), Status::Full);
//! assert_eq!(Status::of(&handle.dequeue()), Status::Ok);
//!
//! assert_eq!(Status::of(&handle.destroy()), Status::Ok);
//! assert_eq!(Status::of(&handle.destroy()), Status::NullPointer);
//! ```

use crate::error::{QueueError, Rejected, Status};
use crate::ring::CircularQueue;
use tracing::debug;

/// An owned queue that may be null.
pub struct QueueHandle<T> {
    inner: Option<CircularQueue<T>>,
}

impl<T> QueueHandle<T> {
    /// The null handle. Every operation on it fails with
    /// [`QueueError::InvalidHandle`].
    pub const fn null() -> Self {
        Self { inner: None }
    }

    /// Allocates a queue of `capacity` slots.
    ///
    /// On allocation failure the returned handle is null and the status is
    /// [`Status::Nok`]; it is never half-initialized.
    pub fn create(capacity: usize) -> (Self, Status) {
        match CircularQueue::new(capacity) {
            Ok(queue) => (Self::from(queue), Status::Ok),
            Err(err) => (Self::null(), err.status()),
        }
    }

    pub fn is_null(&self) -> bool {
        self.inner.is_none()
    }

    /// Borrows the underlying queue.
    pub fn queue(&self) -> Result<&CircularQueue<T>, QueueError> {
        self.inner.as_ref().ok_or_else(null_handle)
    }

    fn queue_mut(&mut self) -> Result<&mut CircularQueue<T>, QueueError> {
        self.inner.as_mut().ok_or_else(null_handle)
    }

    /// See [`CircularQueue::grow`]. `new_capacity` is absolute.
    pub fn grow(&mut self, new_capacity: usize) -> Result<(), QueueError> {
        self.queue_mut()?.grow(new_capacity)
    }

    /// Enqueues `element`. `None` is a null element and is refused with
    /// [`QueueError::InvalidHandle`].
    pub fn enqueue(&mut self, element: Option<T>) -> Result<(), Rejected<Option<T>>> {
        let Some(queue) = self.inner.as_mut() else {
            return Err(Rejected::new(null_handle(), element));
        };
        let Some(value) = element else {
            debug!("refused null element");
            return Err(Rejected::new(QueueError::InvalidHandle, None));
        };
        queue.enqueue(value).map_err(|rejected| rejected.map(Some))
    }

    pub fn dequeue(&mut self) -> Result<T, QueueError> {
        self.queue_mut()?.dequeue()
    }

    pub fn peek_front(&self) -> Result<&T, QueueError> {
        self.queue()?.peek_front()
    }

    pub fn peek_rear(&self) -> Result<&T, QueueError> {
        self.queue()?.peek_rear()
    }

    /// Destroys the queue and nulls the handle. Destroying a null handle
    /// fails with [`QueueError::InvalidHandle`].
    pub fn destroy(&mut self) -> Result<(), QueueError> {
        let queue = self.inner.take().ok_or_else(null_handle)?;
        queue.destroy();
        Ok(())
    }
}

fn null_handle() -> QueueError {
    debug!("operation on a null queue handle");
    QueueError::InvalidHandle
}

impl<T> Default for QueueHandle<T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T> From<CircularQueue<T>> for QueueHandle<T> {
    fn from(queue: CircularQueue<T>) -> Self {
        Self { inner: Some(queue) }
    }
}

#[cfg(test)]
mod tests {
    use super::QueueHandle;
    use crate::error::{QueueError, Status};

    #[test]
    fn null_handle_rejects_everything() {
        let mut handle: QueueHandle<u32> = QueueHandle::null();
        assert!(handle.is_null());
        assert_eq!(handle.grow(4), Err(QueueError::InvalidHandle));
        assert_eq!(handle.dequeue(), Err(QueueError::InvalidHandle));
        assert_eq!(handle.peek_front(), Err(QueueError::InvalidHandle));
        assert_eq!(handle.peek_rear(), Err(QueueError::InvalidHandle));
        assert_eq!(handle.destroy(), Err(QueueError::InvalidHandle));

        let rejected = handle.enqueue(Some(1)).unwrap_err();
        assert_eq!(Status::from(&rejected), Status::NullPointer);
        assert_eq!(rejected.into_inner(), Some(1));
    }

    #[test]
    fn null_element_is_refused() {
        let (mut handle, status) = QueueHandle::<u32>::create(2);
        assert!(status.is_ok());
        let rejected = handle.enqueue(None).unwrap_err();
        assert_eq!(rejected.error(), QueueError::InvalidHandle);
        assert_eq!(handle.queue().unwrap().len(), 0);
        assert_eq!(handle.dequeue(), Err(QueueError::Empty));
    }

    #[test]
    fn failed_create_yields_null_handle() {
        let (handle, status) = QueueHandle::<u64>::create(usize::MAX);
        assert_eq!(status, Status::Nok);
        assert!(handle.is_null());
    }

    #[test]
    fn use_after_destroy_is_reported() {
        let (mut handle, _) = QueueHandle::create(3);
        handle.enqueue(Some('a')).unwrap();
        assert_eq!(handle.peek_rear(), Ok(&'a'));
        assert_eq!(handle.destroy(), Ok(()));
        assert!(handle.is_null());
        assert_eq!(handle.dequeue(), Err(QueueError::InvalidHandle));
        assert_eq!(Status::of(&handle.destroy()), Status::NullPointer);
    }

    #[test]
    fn full_keeps_the_element() {
        let (mut handle, _) = QueueHandle::create(1);
        handle.enqueue(Some("x")).unwrap();
        let (err, element) = handle.enqueue(Some("y")).unwrap_err().into_parts();
        assert_eq!(err, QueueError::Full);
        assert_eq!(element, Some("y"));
        assert_eq!(handle.peek_front(), Ok(&"x"));
    }

    #[test]
    fn grow_through_handle() {
        let (mut handle, _) = QueueHandle::create(1);
        handle.enqueue(Some(1)).unwrap();
        assert_eq!(handle.grow(0), Err(QueueError::WouldTruncate { len: 1, requested: 0 }));
        handle.grow(2).unwrap();
        handle.enqueue(Some(2)).unwrap();
        assert_eq!(handle.dequeue(), Ok(1));
        assert_eq!(handle.dequeue(), Ok(2));
    }
}
