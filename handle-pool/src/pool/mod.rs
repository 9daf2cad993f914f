mod config;
pub use config::PoolConfig;

mod error;
pub use error::{BorrowError, WarmUpError};

#[allow(clippy::module_inception)]
mod pool;
pub use pool::{Pool, PoolStats};
pub(crate) use pool::{BindFn, CreateFn};
