use std::fmt::{self, Debug, Formatter};

use thiserror::Error;

use super::Pool;

/// An error during handle acquisition.
///
/// Both variants wrap the error reported by the collaborator that failed.
/// Neither is retried by the pool.
#[derive(Debug, Error)]
pub enum BorrowError<E>
where
    E: std::error::Error + 'static,
{
    /// The pool was empty and the `create` callback could not produce a
    /// new handle
    #[error("failed to create handle")]
    Create(#[source] E),
    /// The `bind` callback rejected the requested stream
    #[error("failed to bind stream to handle")]
    Bind(#[source] E),
}

impl<E> BorrowError<E>
where
    E: std::error::Error + 'static,
{
    /// Access the collaborator error.
    pub fn inner(&self) -> &E {
        match self {
            Self::Create(err) | Self::Bind(err) => err,
        }
    }

    /// Extract the collaborator error.
    pub fn into_inner(self) -> E {
        match self {
            Self::Create(err) | Self::Bind(err) => err,
        }
    }
}

/// Building a pool failed while creating its warm-up handles.
///
/// The partially warmed pool is kept, so the handles created before the
/// failure are not lost and can still be used.
#[derive(Error)]
#[error("pool warm-up stopped after {created} of {requested} handles")]
pub struct WarmUpError<H, S, E>
where
    E: std::error::Error + 'static,
{
    pool: Pool<H, S, E>,
    created: usize,
    requested: usize,
    #[source]
    source: BorrowError<E>,
}

impl<H, S, E> WarmUpError<H, S, E>
where
    E: std::error::Error + 'static,
{
    pub(crate) fn new(pool: Pool<H, S, E>, requested: usize, source: BorrowError<E>) -> Self {
        Self {
            created: pool.idle_count(),
            pool,
            requested,
            source,
        }
    }

    /// The number of handles created before the failure.
    pub fn created(&self) -> usize {
        self.created
    }

    /// Access the creation error that stopped the warm-up.
    pub fn error(&self) -> &BorrowError<E> {
        &self.source
    }

    /// Extract the creation error, dropping the partial pool.
    pub fn into_error(self) -> BorrowError<E> {
        self.source
    }

    /// Recover the partially warmed pool.
    pub fn into_pool(self) -> Pool<H, S, E> {
        self.pool
    }
}

impl<H, S, E> Debug for WarmUpError<H, S, E>
where
    E: std::error::Error + 'static,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("WarmUpError")
            .field("pool", &self.pool)
            .field("requested", &self.requested)
            .field("source", &self.source)
            .finish()
    }
}
