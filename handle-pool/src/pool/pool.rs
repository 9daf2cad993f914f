use std::fmt::{self, Debug, Formatter};
use std::sync::atomic::{AtomicUsize, Ordering};

use log::{debug, trace};
use parking_lot::Mutex;

use super::BorrowError;
use crate::handle::{BorrowedHandle, NativeHandle};

pub(crate) type CreateFn<H, E> = Box<dyn Fn() -> Result<H, E> + Send + Sync>;

pub(crate) type BindFn<H, S, E> = Box<dyn Fn(&H, S) -> Result<(), E> + Send + Sync>;

const DEFAULT_LABEL: &str = "handle pool";

/// A point-in-time view of the handles owned by a [`Pool`].
///
/// The fields are read independently, so under concurrent use they may not
/// add up exactly.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Handles produced by the `create` callback over the life of the pool
    pub created: usize,
    /// Handles currently sitting in the free list
    pub idle: usize,
    /// Handles currently owned by a live `BorrowedHandle`
    pub borrowed: usize,
}

/// A pool of reusable handles of kind `H`, which may be bound to a stream of
/// kind `S` when borrowed. `E` is the error reported by the collaborators.
///
/// Handles are never destroyed by the pool. Dropping a `Pool` forgets
/// whatever is left in its free list.
pub struct Pool<H, S, E> {
    bind: BindFn<H, S, E>,
    borrowed: AtomicUsize,
    create: CreateFn<H, E>,
    created: AtomicUsize,
    idle: Mutex<Vec<H>>,
    label: Option<String>,
}

impl<H, S, E> Pool<H, S, E>
where
    H: Send + 'static,
    S: Default + PartialEq + 'static,
    E: std::error::Error + 'static,
{
    pub(crate) fn from_parts(
        create: CreateFn<H, E>,
        bind: BindFn<H, S, E>,
        label: Option<String>,
    ) -> Self {
        Self {
            bind,
            borrowed: AtomicUsize::new(0),
            create,
            created: AtomicUsize::new(0),
            idle: Mutex::new(Vec::new()),
            label,
        }
    }

    /// Create an empty pool from a pair of collaborator callbacks. Use
    /// [`PoolConfig`](crate::PoolConfig) for more options.
    pub fn new<C, B>(create: C, bind: B) -> Self
    where
        C: Fn() -> Result<H, E> + Send + Sync + 'static,
        B: Fn(&H, S) -> Result<(), E> + Send + Sync + 'static,
    {
        Self::from_parts(Box::new(create), Box::new(bind), None)
    }

    /// Borrow a handle without touching its stream association.
    pub fn borrow(&self) -> Result<BorrowedHandle<'_, H, S, E>, BorrowError<E>> {
        self.borrow_with_stream(S::default())
    }

    /// Borrow a handle, reusing an idle one when available and creating a
    /// new one otherwise. Unless `stream` is the default (no stream) value,
    /// the handle is bound to it before being returned, whether or not the
    /// handle was reused.
    ///
    /// When binding fails the handle goes back to the free list.
    pub fn borrow_with_stream(
        &self,
        stream: S,
    ) -> Result<BorrowedHandle<'_, H, S, E>, BorrowError<E>> {
        let handle = match self.pop_idle() {
            Some(handle) => {
                trace!("{}: reusing idle handle", self.name());
                handle
            }
            None => self.create_handle()?,
        };

        if stream != S::default() {
            if let Err(err) = (self.bind)(&handle, stream) {
                debug!("{}: stream binding failed: {}", self.name(), err);
                self.push_idle(handle);
                return Err(BorrowError::Bind(err));
            }
        }

        self.borrowed.fetch_add(1, Ordering::Relaxed);
        Ok(BorrowedHandle::new(self, handle))
    }

    /// Invoke the `create` callback, outside of the free list lock.
    pub(crate) fn create_handle(&self) -> Result<H, BorrowError<E>> {
        match (self.create)() {
            Ok(handle) => {
                let total = self.created.fetch_add(1, Ordering::Relaxed) + 1;
                debug!("{}: created handle ({} total)", self.name(), total);
                Ok(handle)
            }
            Err(err) => {
                debug!("{}: handle creation failed: {}", self.name(), err);
                Err(BorrowError::Create(err))
            }
        }
    }
}

impl<H, S, E> Pool<H, S, E>
where
    H: NativeHandle<S, Error = E>,
    S: Default + PartialEq + 'static,
    E: std::error::Error + Send + Sync + 'static,
{
    /// Create an empty pool using the collaborators of a `NativeHandle` kind.
    pub fn native() -> Self {
        Self::new(H::create, |handle: &H, stream| handle.bind_stream(stream))
    }
}

impl<H, S, E> Pool<H, S, E> {
    /// The number of handles created by this pool.
    pub fn created_count(&self) -> usize {
        self.created.load(Ordering::Relaxed)
    }

    /// The number of handles waiting in the free list.
    pub fn idle_count(&self) -> usize {
        self.idle.lock().len()
    }

    /// The label assigned to this pool, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Fetch the current handle counts for this pool.
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            created: self.created_count(),
            idle: self.idle_count(),
            borrowed: self.borrowed.load(Ordering::Relaxed),
        }
    }

    /// Hand a borrowed handle back. Only called when a `BorrowedHandle` is
    /// dropped.
    pub(crate) fn return_handle(&self, handle: H) {
        self.borrowed.fetch_sub(1, Ordering::Relaxed);
        self.push_idle(handle);
        trace!("{}: handle returned", self.name());
    }

    pub(crate) fn push_idle(&self, handle: H) {
        self.idle.lock().push(handle);
    }

    fn pop_idle(&self) -> Option<H> {
        self.idle.lock().pop()
    }

    fn name(&self) -> &str {
        self.label.as_deref().unwrap_or(DEFAULT_LABEL)
    }
}

impl<H, S, E> Debug for Pool<H, S, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool")
            .field("label", &self.name())
            .field("stats", &self.stats())
            .finish()
    }
}
