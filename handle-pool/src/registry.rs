use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt::{self, Debug, Formatter};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use log::debug;
use once_cell::sync::OnceCell;
use parking_lot::RwLock;

use crate::handle::NativeHandle;
use crate::pool::Pool;

type Slot<T> = OnceCell<Arc<T>>;

type SlotMap = HashMap<TypeId, Arc<dyn Any + Send + Sync>>;

/// Holds one [`Pool`] per handle kind, created on first request.
///
/// The registry is owned by the application and passed to whatever needs a
/// pool. Pools are never removed, so they live as long as the registry.
#[derive(Default)]
pub struct PoolRegistry {
    ready: AtomicUsize,
    slots: RwLock<SlotMap>,
}

impl PoolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the pool for a `NativeHandle` kind and stream kind, creating
    /// it if this is the first request.
    pub fn pool<H, S>(&self) -> Arc<Pool<H, S, H::Error>>
    where
        H: NativeHandle<S>,
        S: Default + PartialEq + 'static,
    {
        self.pool_with(Pool::<H, S, H::Error>::native)
    }

    /// Fetch the pool with the given type, creating it with `init` if this
    /// is the first request. `init` is not called otherwise.
    pub fn pool_with<H, S, E, F>(&self, init: F) -> Arc<Pool<H, S, E>>
    where
        H: Send + 'static,
        S: 'static,
        E: 'static,
        F: FnOnce() -> Pool<H, S, E>,
    {
        match self.try_pool_with(|| Ok::<_, std::convert::Infallible>(init())) {
            Ok(pool) => pool,
            Err(never) => match never {},
        }
    }

    /// Fetch the pool with the given type, creating it with `init` if this
    /// is the first request. A failure in `init` leaves nothing registered,
    /// so the next request tries again.
    ///
    /// Concurrent first requests for the same type are serialized: exactly
    /// one `init` runs and every caller receives the pool it produced.
    /// `init` runs outside the registry lock, so it may request pools of
    /// other types, but requesting its own type from `init` never returns.
    pub fn try_pool_with<H, S, E, F, R>(&self, init: F) -> Result<Arc<Pool<H, S, E>>, R>
    where
        H: Send + 'static,
        S: 'static,
        E: 'static,
        F: FnOnce() -> Result<Pool<H, S, E>, R>,
    {
        let slot = self.slot::<Pool<H, S, E>>();
        let pool = slot.get_or_try_init(|| {
            let pool = Arc::new(init()?);
            debug!("registered {:?}", pool);
            self.ready.fetch_add(1, Ordering::Relaxed);
            Ok(pool)
        })?;
        Ok(pool.clone())
    }

    /// Find or insert the initialization slot for `T`. The map lock is only
    /// held while looking up or inserting the slot.
    fn slot<T: Send + Sync + 'static>(&self) -> Arc<Slot<T>> {
        let key = TypeId::of::<T>();
        if let Some(found) = self.slots.read().get(&key) {
            return downcast::<Slot<T>>(found);
        }
        let mut slots = self.slots.write();
        let entry = slots
            .entry(key)
            .or_insert_with(|| Arc::new(Slot::<T>::new()));
        downcast::<Slot<T>>(entry)
    }

    /// The number of registered pools.
    pub fn len(&self) -> usize {
        self.ready.load(Ordering::Relaxed)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Debug for PoolRegistry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("PoolRegistry")
            .field("pools", &self.len())
            .finish()
    }
}

fn downcast<T: Any + Send + Sync>(entry: &Arc<dyn Any + Send + Sync>) -> Arc<T> {
    // slots are keyed by the TypeId of the pool they hold
    entry
        .clone()
        .downcast::<T>()
        .unwrap_or_else(|_| unreachable!("slot registered under a foreign type id"))
}
