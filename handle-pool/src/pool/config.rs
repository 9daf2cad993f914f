use log::debug;

use super::{BindFn, CreateFn, Pool, WarmUpError};
use crate::handle::NativeHandle;

/// Builder for a [`Pool`].
pub struct PoolConfig<H, S, E> {
    bind: Option<BindFn<H, S, E>>,
    create: CreateFn<H, E>,
    label: Option<String>,
    warm_up: usize,
}

impl<H, S, E> PoolConfig<H, S, E>
where
    H: Send + 'static,
    S: Default + PartialEq + 'static,
    E: std::error::Error + 'static,
{
    pub fn new<C>(create: C) -> Self
    where
        C: Fn() -> Result<H, E> + Send + Sync + 'static,
    {
        Self {
            bind: None,
            create: Box::new(create),
            label: None,
            warm_up: 0,
        }
    }

    /// Set the callback used to associate a handle with a stream. Without
    /// one, binding always succeeds and does nothing.
    pub fn bind<B>(mut self, bind: B) -> Self
    where
        B: Fn(&H, S) -> Result<(), E> + Send + Sync + 'static,
    {
        self.bind.replace(Box::new(bind));
        self
    }

    /// Name the pool in log output.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label.replace(label.into());
        self
    }

    /// Create `count` handles up front when the pool is built, so that the
    /// first borrowers do not pay for construction. If creation fails part
    /// way, `build` returns the partially warmed pool inside the error.
    pub fn warm_up(mut self, count: usize) -> Self {
        self.warm_up = count;
        self
    }

    pub fn build(self) -> Result<Pool<H, S, E>, WarmUpError<H, S, E>> {
        let bind = self
            .bind
            .unwrap_or_else(|| Box::new(|_: &H, _: S| Ok(())));
        let pool = Pool::from_parts(self.create, bind, self.label);
        if self.warm_up > 0 {
            for _ in 0..self.warm_up {
                match pool.create_handle() {
                    Ok(handle) => pool.push_idle(handle),
                    Err(err) => return Err(WarmUpError::new(pool, self.warm_up, err)),
                }
            }
            debug!("{:?}: warmed up", pool);
        }
        Ok(pool)
    }
}

impl<H, S, E> PoolConfig<H, S, E>
where
    H: NativeHandle<S, Error = E>,
    S: Default + PartialEq + 'static,
    E: std::error::Error + Send + Sync + 'static,
{
    /// Start from the collaborators of a `NativeHandle` kind.
    pub fn native() -> Self {
        Self::new(H::create).bind(|handle: &H, stream| handle.bind_stream(stream))
    }
}
