pub(crate) mod inner_ring;
mod queue;

pub use queue::{CircularQueue, Cursor, Iter, QueueState};
