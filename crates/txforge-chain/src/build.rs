//! Asynchronous build plumbing shared by the transaction builders.
//!
//! A builder hands a snapshot of its request to an injected build function,
//! which returns a [`BuildFuture`]. Callers either `.await` the future or
//! register a [`TransactionCallback`] that receives the outcome once, on the
//! builder's tokio runtime.

use std::fmt;

use futures::future::BoxFuture;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use txforge_core::error::{BuildError, ErrorCode};

/// Future returned by a build function. Settles exactly once.
pub type BuildFuture<T> = BoxFuture<'static, Result<T, BuildError>>;

/// Error delivered to a [`TransactionCallback`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackError {
    /// Stable error code.
    pub code: ErrorCode,
    /// Human-readable message.
    pub message: String,
}

impl CallbackError {
    /// Create a callback error.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CallbackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.message, self.code)
    }
}

impl std::error::Error for CallbackError {}

impl From<BuildError> for CallbackError {
    fn from(error: BuildError) -> Self {
        Self::new(error.code(), error.to_string())
    }
}

/// Sink for a build outcome.
///
/// Exactly one of `result` and `error` is `Some`. The sink is consumed, so it
/// is invoked at most once.
pub trait TransactionCallback<T>: Send + 'static {
    /// Receive the outcome of a build.
    fn on_callback(self, result: Option<T>, error: Option<CallbackError>);
}

impl<T, F> TransactionCallback<T> for F
where
    F: FnOnce(Option<T>, Option<CallbackError>) + Send + 'static,
{
    fn on_callback(self, result: Option<T>, error: Option<CallbackError>) {
        self(result, error);
    }
}

/// Drive `future` on `handle` and deliver its outcome to `callback`.
pub fn deliver<T, C>(handle: &Handle, future: BuildFuture<T>, callback: C) -> JoinHandle<()>
where
    T: Send + 'static,
    C: TransactionCallback<T>,
{
    handle.spawn(async move {
        match future.await {
            Ok(transaction) => callback.on_callback(Some(transaction), None),
            Err(error) => {
                tracing::debug!(error = %error, "build failed, notifying callback");
                callback.on_callback(None, Some(error.into()));
            }
        }
    })
}
