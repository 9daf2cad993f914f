mod borrowed;
pub use borrowed::BorrowedHandle;

/// A native handle kind which knows how to construct itself and how to bind
/// itself to an execution stream of kind `S`.
///
/// `Self::default()` is the null handle, and `S::default()` is taken to mean
/// "no stream": borrowing with it leaves the stream association untouched.
///
/// Raw native handles are usually pointers; wrap them in a newtype and
/// assert `Send` for it when the native library permits moving a handle
/// between threads.
pub trait NativeHandle<S>: Copy + Default + PartialEq + Send + 'static {
    /// The error reported by the native library.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct a new handle.
    fn create() -> Result<Self, Self::Error>;

    /// Associate this handle with `stream`, replacing any previous
    /// association.
    fn bind_stream(&self, stream: S) -> Result<(), Self::Error>;
}
