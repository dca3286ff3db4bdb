use std::alloc::{alloc, dealloc, Layout};
use std::marker::PhantomData;
use std::mem;
use std::ptr::NonNull;

use crate::error::Error;

/// Exclusive owner of a contiguous block of element slots.
///
/// The buffer manages the allocation only: slots hold uninitialized memory as
/// far as `RawBuf` is concerned, and dropping the buffer releases the block
/// without running any element destructors. Tracking which slots contain live
/// values is the caller's job.
///
/// There is no `Clone` impl: two owners of one block would release it twice.
/// Ownership crosses a boundary only by moving the buffer, by [`RawBuf::swap`],
/// or by [`RawBuf::release`].
// zero-sized element types get capacity bookkeeping but no allocation
pub struct RawBuf<T> {
    ptr: NonNull<T>,
    cap: usize,
    _marker: PhantomData<T>,
}

unsafe impl<T: Send> Send for RawBuf<T> {}
unsafe impl<T: Sync> Sync for RawBuf<T> {}

impl<T> RawBuf<T> {
    /// Returns a buffer that owns no block.
    pub fn new() -> RawBuf<T> {
        RawBuf {
            ptr: NonNull::dangling(),
            cap: 0,
            _marker: PhantomData,
        }
    }

    /// Allocates a block of exactly `cap` slots.
    ///
    /// A capacity of zero, or a zero-sized `T`, produces a buffer that tracks
    /// the capacity without touching the allocator.
    pub fn with_capacity(cap: usize) -> Result<RawBuf<T>, Error> {
        if cap == 0 || mem::size_of::<T>() == 0 {
            let mut buf = RawBuf::new();
            buf.cap = cap;
            return Ok(buf);
        }
        let layout = Layout::array::<T>(cap).map_err(|_| Error::CapacityOverflow)?;
        let raw = unsafe { alloc(layout) } as *mut T;
        match NonNull::new(raw) {
            None => Err(Error::AllocationFailed { bytes: layout.size() }),
            Some(ptr) => {
                debug!("alloc {} bytes for {} slots", layout.size(), cap);
                Ok(RawBuf {
                    ptr,
                    cap,
                    _marker: PhantomData,
                })
            }
        }
    }

    /// Adopts a block of `cap` slots allocated elsewhere. No allocation happens.
    ///
    /// # Safety
    ///
    /// `ptr` must come from a previous [`RawBuf::release`] (or an allocation
    /// with the layout of `[T; cap]`), and no other owner of the block may
    /// remain.
    pub unsafe fn from_raw(ptr: NonNull<T>, cap: usize) -> RawBuf<T> {
        RawBuf {
            ptr,
            cap,
            _marker: PhantomData,
        }
    }

    /// Relinquishes ownership of the block, leaving this buffer empty.
    ///
    /// Returns the block pointer and its slot count, or `None` if there is no
    /// allocation to hand over. The caller becomes responsible for releasing
    /// the block, normally by handing it back to [`RawBuf::from_raw`].
    pub fn release(&mut self) -> Option<(NonNull<T>, usize)> {
        let had_block = self.has_block();
        let cap = mem::replace(&mut self.cap, 0);
        let ptr = mem::replace(&mut self.ptr, NonNull::dangling());
        if had_block {
            Some((ptr, cap))
        } else {
            None
        }
    }

    /// Exchanges the owned blocks of two buffers in constant time.
    pub fn swap(&mut self, other: &mut RawBuf<T>) {
        mem::swap(&mut self.ptr, &mut other.ptr);
        mem::swap(&mut self.cap, &mut other.cap);
    }

    /// Number of slots in the owned block.
    #[inline(always)]
    pub fn cap(&self) -> usize {
        self.cap
    }

    #[inline(always)]
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    #[inline(always)]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Pointer to the slot at `index`, without any bounds enforcement.
    ///
    /// # Safety
    ///
    /// `index` must be within the allocated slot count; whether the slot holds
    /// a live value is tracked one layer up.
    #[inline(always)]
    pub unsafe fn slot(&self, index: usize) -> *const T {
        debug_assert!(index < self.cap, "slot index {} within capacity {}", index, self.cap);
        self.ptr.as_ptr().add(index)
    }

    /// Mutable pointer to the slot at `index`, without any bounds enforcement.
    ///
    /// # Safety
    ///
    /// Same contract as [`RawBuf::slot`].
    #[inline(always)]
    pub unsafe fn slot_mut(&mut self, index: usize) -> *mut T {
        debug_assert!(index < self.cap, "slot index {} within capacity {}", index, self.cap);
        self.ptr.as_ptr().add(index)
    }

    fn has_block(&self) -> bool {
        self.cap != 0 && mem::size_of::<T>() != 0
    }
}

impl<T> Drop for RawBuf<T> {
    fn drop(&mut self) {
        if self.has_block() {
            // layout was validated when the block was allocated
            let layout = Layout::array::<T>(self.cap).expect("layout of owned block");
            debug!("dealloc {} bytes", layout.size());
            unsafe { dealloc(self.ptr.as_ptr() as *mut u8, layout) };
        }
    }
}
