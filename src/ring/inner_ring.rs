use crate::error::QueueError;
use std::alloc::{Layout, alloc, dealloc};
use std::{mem::MaybeUninit, ptr, ptr::NonNull};

/// Contiguous, fixed-length block of possibly-uninitialized slots.
///
/// This struct is wrapped by [`super::queue::CircularQueue`], which owns the
/// knowledge of which slots are live. `Slots` itself never reads, writes or
/// drops an element on its own: every accessor is `unsafe` and relies on the
/// caller's cursor bookkeeping.
///
/// # Allocation
///
/// Allocation is fallible. A capacity whose layout overflows `isize`, or an
/// allocator returning null, yields [`QueueError::Allocation`] instead of
/// aborting. Zero-sized layouts (`capacity == 0` or a zero-sized `T`) never
/// touch the allocator and use a dangling, well-aligned pointer.
///
/// # Release
///
/// Dropping `Slots` only frees the block. Live elements must have been moved
/// out or dropped in place by the owner beforehand.
pub(crate) struct Slots<T> {
    buffer: NonNull<MaybeUninit<T>>,
    capacity: usize,
}

// `Slots` uniquely owns its block, like `Box<[MaybeUninit<T>]>`.
unsafe impl<T: Send> Send for Slots<T> {}
unsafe impl<T: Sync> Sync for Slots<T> {}

impl<T> Slots<T> {
    pub(crate) fn allocate(capacity: usize) -> Result<Self, QueueError> {
        let layout = Layout::array::<MaybeUninit<T>>(capacity)
            .map_err(|_| QueueError::Allocation { capacity })?;

        if layout.size() == 0 {
            return Ok(Self {
                buffer: NonNull::dangling(),
                capacity,
            });
        }

        let ptr = unsafe { alloc(layout) as *mut MaybeUninit<T> };
        let buffer = NonNull::new(ptr).ok_or(QueueError::Allocation { capacity })?;
        Ok(Self { buffer, capacity })
    }

    #[inline(always)]
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    /// Writes `value` into the slot at `index`.
    ///
    /// # Safety
    ///
    /// `index < capacity`, and the slot must not hold a live element (it would
    /// be leaked).
    #[inline(always)]
    pub(crate) unsafe fn write(&mut self, index: usize, value: T) {
        unsafe {
            let ptr = self.buffer.as_ptr().add(index);
            ptr.write(MaybeUninit::new(value));
        }
    }

    /// Moves the value out of the slot at `index`, leaving it logically
    /// uninitialized.
    ///
    /// # Safety
    ///
    /// `index < capacity` and the slot is initialized. The caller must treat
    /// the slot as vacant afterwards.
    #[inline(always)]
    pub(crate) unsafe fn take(&mut self, index: usize) -> T {
        unsafe {
            let ptr = self.buffer.as_ptr().add(index);
            (*ptr).assume_init_read()
        }
    }

    /// # Safety
    ///
    /// `index < capacity` and the slot is initialized.
    #[inline(always)]
    pub(crate) unsafe fn get(&self, index: usize) -> &T {
        unsafe { (*self.buffer.as_ptr().add(index)).assume_init_ref() }
    }

    /// # Safety
    ///
    /// `index < capacity` and the slot is initialized.
    #[inline(always)]
    pub(crate) unsafe fn get_mut(&mut self, index: usize) -> &mut T {
        unsafe { (*self.buffer.as_ptr().add(index)).assume_init_mut() }
    }

    /// Drops the element in the slot at `index` in place.
    ///
    /// # Safety
    ///
    /// `index < capacity` and the slot is initialized. The slot is vacant
    /// afterwards.
    #[inline(always)]
    pub(crate) unsafe fn drop_at(&mut self, index: usize) {
        unsafe { (*self.buffer.as_ptr().add(index)).assume_init_drop() }
    }

    /// Moves the circular run of `len` slots starting at `head` into slots
    /// `[0, len)` of `dest`.
    ///
    /// # Wrap-around logic
    ///
    /// The run is split into at most two contiguous pieces:
    ///
    /// ```text
    /// self:  [ c d . . a b ]     head = 4, len = 4
    ///                  ^---^     first  = min(len, capacity - head) = 2
    ///          ^-^               second = len - first              = 2
    /// dest:  [ a b c d . . . . ]
    /// ```
    ///
    /// # Safety
    ///
    /// The `len` slots of the run must be initialized, `head < capacity` when
    /// `len > 0`, and `dest.capacity() >= len`. The destination slots
    /// `[0, len)` must be vacant. Afterwards the source slots are vacant.
    pub(crate) unsafe fn move_run(&mut self, head: usize, len: usize, dest: &mut Slots<T>) {
        if len == 0 {
            return;
        }
        let first = len.min(self.capacity - head);
        let second = len - first;
        unsafe {
            let src = self.buffer.as_ptr();
            let dst = dest.buffer.as_ptr();
            ptr::copy_nonoverlapping(src.add(head), dst, first);
            ptr::copy_nonoverlapping(src, dst.add(first), second);
        }
    }
}

impl<T> Drop for Slots<T> {
    fn drop(&mut self) {
        // The layout was valid when allocated, so recomputing it cannot fail.
        if let Ok(layout) = Layout::array::<MaybeUninit<T>>(self.capacity) {
            if layout.size() != 0 {
                unsafe { dealloc(self.buffer.as_ptr() as *mut u8, layout) };
            }
        }
    }
}
