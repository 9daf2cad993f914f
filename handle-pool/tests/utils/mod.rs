#![allow(unused)]

use std::fmt::{self, Display, Formatter};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use handle_pool::{Pool, PoolConfig};

pub struct AtomicCounter {
    count: AtomicUsize,
}

impl AtomicCounter {
    pub fn new(val: usize) -> Self {
        Self {
            count: AtomicUsize::new(val),
        }
    }

    pub fn increment(&self) -> usize {
        self.count.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn value(&self) -> usize {
        self.count.load(Ordering::Acquire)
    }
}

impl Default for AtomicCounter {
    fn default() -> Self {
        Self::new(0)
    }
}

#[derive(Debug, PartialEq)]
pub struct NativeError(pub &'static str);

impl Display for NativeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "native error: {}", self.0)
    }
}

impl std::error::Error for NativeError {}

/// Stand-in for a native context: handle values are numbered from 1, so the
/// default value 0 is the null handle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Context(pub usize);

/// Stand-in for an execution stream: 0 means no stream.
pub type Stream = u32;

pub type TestPool = Pool<Context, Stream, NativeError>;

/// Records the calls made to the collaborators of a pool.
#[derive(Default)]
pub struct Collaborators {
    pub created: AtomicCounter,
    pub binds: AtomicCounter,
    pub bound: parking_lot::Mutex<Vec<(Context, Stream)>>,
    pub fail_create: AtomicBool,
    pub fail_bind: AtomicBool,
}

impl Collaborators {
    pub fn bound(&self) -> Vec<(Context, Stream)> {
        self.bound.lock().clone()
    }
}

pub fn counting_pool_config() -> (PoolConfig<Context, Stream, NativeError>, Arc<Collaborators>) {
    let calls = Arc::new(Collaborators::default());
    let create_calls = calls.clone();
    let bind_calls = calls.clone();
    let config = PoolConfig::new(move || {
        if create_calls.fail_create.load(Ordering::SeqCst) {
            Err(NativeError("create"))
        } else {
            Ok(Context(create_calls.created.increment()))
        }
    })
    .bind(move |handle: &Context, stream| {
        bind_calls.binds.increment();
        if bind_calls.fail_bind.load(Ordering::SeqCst) {
            Err(NativeError("bind"))
        } else {
            bind_calls.bound.lock().push((*handle, stream));
            Ok(())
        }
    });
    (config, calls)
}

pub fn counting_pool() -> (TestPool, Arc<Collaborators>) {
    let (config, calls) = counting_pool_config();
    (config.build().unwrap(), calls)
}
