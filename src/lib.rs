//! Bounded FIFO queue backed by a contiguous ring buffer.
//!
//! # Overview
//! [`CircularQueue`] is the core: a fixed-capacity ring buffer that can be
//! resized on demand with [`CircularQueue::grow`]. Every operation returns a
//! `Result` instead of panicking, and [`Status`] collapses those results into
//! plain status codes for callers that work that way.
//!
//! [`QueueHandle`] layers a nullable handle on top, for code that models
//! "no queue" and "destroyed queue" explicitly.
//!
//! The queue is single-threaded. It performs no locking; share it across
//! threads only behind an external lock.
//!
//! # Example
//! ```
//! use ring_queue::{CircularQueue, QueueError};
//!
//! let mut queue = CircularQueue::new(3)?;
//! for job in ["fetch", "parse", "store"] {
//!     queue.enqueue(job)?;
//! }
//! assert!(queue.is_full());
//!
//! queue.dequeue()?;
//! queue.grow(6)?;
//! assert_eq!(queue.iter().copied().collect::<Vec<_>>(), ["parse", "store"]);
//! # Ok::<(), QueueError>(())
//! ```

mod config;
mod error;
mod handle;
mod ring;

pub use config::QueueConfig;
pub use error::{QueueError, Rejected, Status};
pub use handle::QueueHandle;
pub use ring::{CircularQueue, Cursor, Iter, QueueState};
