use super::{MemoryLimitExceededError, SharedMemoryLimiter};
use std::mem::size_of;

// Growable byte storage for the bytes of a token that didn't fit into
// a single chunk. Bytes are always appended at the watermark, and the
// pool never shrinks, so the limiter is only notified about growth.
#[derive(Debug)]
pub(crate) struct Arena {
    limiter: SharedMemoryLimiter,
    mem_pool: Vec<u8>,
    watermark: usize,
}

impl Arena {
    pub fn new(limiter: SharedMemoryLimiter, preallocated_size: usize) -> Self {
        limiter
            .borrow_mut()
            .preallocate(preallocated_size * size_of::<u8>());

        Arena {
            limiter,
            mem_pool: vec![0; preallocated_size],
            watermark: 0,
        }
    }

    pub fn append(&mut self, slice: &[u8]) -> Result<(), MemoryLimitExceededError> {
        // NOTE: the capacity (i.e. the amount of memory that can be used without reallocation)
        // is basically a current length of the underlying memory pool.
        let capacity = self.mem_pool.len();
        let new_watermark = self.watermark + slice.len();

        if new_watermark > capacity {
            // NOTE: we can't fit in the whole slice with the memory available.
            // Split the slice into two parts: one that we can fit in now and the one
            // for which we need to allocate additional memory.
            let space_left = capacity - self.watermark;
            let (within_capacity, rest) = slice.split_at(space_left);

            self.limiter
                .borrow_mut()
                .increase_usage(rest.len() * size_of::<u8>())?;

            self.mem_pool[self.watermark..capacity].copy_from_slice(within_capacity);
            self.mem_pool.extend_from_slice(rest);
        } else {
            self.mem_pool[self.watermark..new_watermark].copy_from_slice(slice);
        }

        self.watermark = new_watermark;

        Ok(())
    }

    pub fn init_with(&mut self, slice: &[u8]) -> Result<(), MemoryLimitExceededError> {
        self.watermark = 0;

        self.append(slice)
    }

    pub fn shrink_to_last(&mut self, byte_count: usize) {
        self.mem_pool
            .copy_within(self.watermark - byte_count..self.watermark, 0);

        self.watermark = byte_count;
    }

    #[inline]
    pub fn clear(&mut self) {
        self.watermark = 0;
    }

    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.mem_pool[..self.watermark]
    }
}

impl Drop for Arena {
    fn drop(&mut self) {
        self.limiter
            .borrow_mut()
            .decrease_usage(self.mem_pool.len() * size_of::<u8>());
    }
}
