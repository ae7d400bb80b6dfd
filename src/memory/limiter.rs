use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;

pub(crate) type SharedMemoryLimiter = Rc<RefCell<MemoryLimiter>>;

/// An error that occurs when the memory used to hold pending input
/// exceeds [`MemorySettings::max_allowed_memory_usage`].
///
/// [`MemorySettings::max_allowed_memory_usage`]: crate::MemorySettings::max_allowed_memory_usage
#[derive(Error, Debug, PartialEq, Eq, Copy, Clone)]
#[error("Memory limit of {max} bytes has been exceeded: {current_usage} bytes were used.")]
pub struct MemoryLimitExceededError {
    pub current_usage: usize,
    pub max: usize,
}

#[derive(Debug)]
pub(crate) struct MemoryLimiter {
    current_usage: usize,
    max: usize,
}

impl MemoryLimiter {
    pub fn new_shared(max: usize) -> SharedMemoryLimiter {
        Rc::new(RefCell::new(MemoryLimiter {
            max,
            current_usage: 0,
        }))
    }

    #[cfg(test)]
    pub fn current_usage(&self) -> usize {
        self.current_usage
    }

    // NOTE: preallocated memory is accounted for, but never rejected.
    #[inline]
    pub fn preallocate(&mut self, byte_count: usize) {
        self.current_usage += byte_count;
    }

    // NOTE: rejected usage isn't recorded, so the limiter stays
    // accurate for a tokenizer that is reset after the error.
    #[inline]
    pub fn increase_usage(&mut self, byte_count: usize) -> Result<(), MemoryLimitExceededError> {
        let new_usage = self.current_usage.saturating_add(byte_count);

        if new_usage > self.max {
            Err(MemoryLimitExceededError {
                current_usage: new_usage,
                max: self.max,
            })
        } else {
            self.current_usage = new_usage;
            Ok(())
        }
    }

    #[inline]
    pub fn decrease_usage(&mut self, byte_count: usize) {
        self.current_usage -= byte_count;
    }
}
