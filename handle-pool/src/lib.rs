//! A pool of reusable native resource handles, such as the execution
//! contexts of a GPU numerical library. Creating such a context is expensive
//! and may perturb global library state, so a hot path borrows one from a
//! [`Pool`] instead and hands it back when the [`BorrowedHandle`] is dropped.
//!
//! Handles are created lazily, the first time a borrow finds the pool empty,
//! and are reused for as long as the pool lives. The pool never destroys a
//! handle.
//!
//! ```
//! use handle_pool::PoolConfig;
//!
//! #[derive(Copy, Clone, Debug, Default, PartialEq)]
//! struct Context(usize);
//!
//! let pool = PoolConfig::<Context, u32, std::io::Error>::new(|| Ok(Context(7)))
//!     .label("demo")
//!     .build()
//!     .unwrap();
//!
//! let first = pool.borrow().unwrap().get();
//! // the handle was returned on drop, so it is reused here
//! assert_eq!(pool.borrow().unwrap().get(), first);
//! assert_eq!(pool.created_count(), 1);
//! ```

mod handle;
pub use self::handle::{BorrowedHandle, NativeHandle};

mod pool;
pub use self::pool::{BorrowError, Pool, PoolConfig, PoolStats, WarmUpError};

mod registry;
pub use self::registry::PoolRegistry;
