mod arena;
mod limiter;

pub(crate) use self::arena::Arena;
pub use self::limiter::MemoryLimitExceededError;
pub(crate) use self::limiter::{MemoryLimiter, SharedMemoryLimiter};
