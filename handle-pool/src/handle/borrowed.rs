use std::fmt::{self, Debug, Formatter};

use crate::pool::Pool;

/// Exclusive ownership of a handle borrowed from a [`Pool`]. The handle is
/// returned to the pool when this value is dropped.
///
/// A `BorrowedHandle` cannot be cloned. Moving it moves the obligation to
/// return the handle along with it. A default instance owns nothing, and is
/// what `std::mem::take` leaves behind.
pub struct BorrowedHandle<'p, H, S, E> {
    pool: Option<&'p Pool<H, S, E>>,
    handle: Option<H>,
}

impl<'p, H, S, E> BorrowedHandle<'p, H, S, E> {
    pub(crate) fn new(pool: &'p Pool<H, S, E>, handle: H) -> Self {
        Self {
            pool: Some(pool),
            handle: Some(handle),
        }
    }

    /// Check whether this instance owns no handle.
    pub fn is_empty(&self) -> bool {
        self.handle.is_none()
    }

    /// The pool the handle was borrowed from, if any.
    pub fn pool(&self) -> Option<&'p Pool<H, S, E>> {
        self.pool
    }
}

impl<H: Copy + Default, S, E> BorrowedHandle<'_, H, S, E> {
    /// Get the raw handle for use in native calls. An empty instance
    /// produces the null handle.
    pub fn get(&self) -> H {
        self.handle.unwrap_or_default()
    }
}

impl<H, S, E> Default for BorrowedHandle<'_, H, S, E> {
    fn default() -> Self {
        Self {
            pool: None,
            handle: None,
        }
    }
}

impl<H: Debug, S, E> Debug for BorrowedHandle<'_, H, S, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("BorrowedHandle")
            .field("handle", &self.handle)
            .finish()
    }
}

impl<H, S, E> Drop for BorrowedHandle<'_, H, S, E> {
    fn drop(&mut self) {
        if let (Some(pool), Some(handle)) = (self.pool.take(), self.handle.take()) {
            pool.return_handle(handle);
        }
    }
}
