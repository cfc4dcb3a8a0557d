//! Single-shot deferred computations.

use futures::future::{self, BoxFuture, FutureExt};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// A computation that produces exactly one `T` after one suspension point.
///
/// Nothing runs until the value is first polled. `map` and `bind` build new
/// deferred values around the source instead of executing it, and awaiting a
/// `Deferred` consumes it, so each one is driven at most once.
///
/// Failure is not part of this type; a fallible step produces a
/// `Deferred<Result<T, E>>`, which [`FutureResult`](super::FutureResult)
/// wraps with short-circuiting combinators.
///
/// # Examples
///
/// ```
/// use resultflow::core::Deferred;
///
/// # tokio_test::block_on(async {
/// let doubled = Deferred::pure(21).map(|x| x * 2);
/// assert_eq!(doubled.await, 42);
/// # });
/// ```
#[must_use = "a Deferred does nothing unless awaited"]
pub struct Deferred<T> {
    inner: BoxFuture<'static, T>,
}

impl<T> fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred").finish_non_exhaustive()
    }
}

// ============================================================
// Constructors
// ============================================================

impl<T: Send + 'static> Deferred<T> {
    /// Creates an already-resolved deferred. Awaiting it does not suspend.
    pub fn pure(value: T) -> Self {
        Self {
            inner: future::ready(value).boxed(),
        }
    }

    /// Wraps a future without polling it.
    pub fn new<F>(fut: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Self { inner: fut.boxed() }
    }

    /// Defers even the construction of the future until first poll.
    pub fn lazy<F, Fut>(make: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = T> + Send + 'static,
    {
        Self::new(async move { make().await })
    }
}

// ============================================================
// Monadic combinators
// ============================================================

impl<T: Send + 'static> Deferred<T> {
    /// Applies `f` to the resolved value.
    pub fn map<U, F>(self, f: F) -> Deferred<U>
    where
        U: Send + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        Deferred::new(async move { f(self.inner.await) })
    }

    /// Chains a computation that depends on the resolved value.
    ///
    /// The deferred returned by `f` is not created, let alone polled, before
    /// this one has resolved.
    pub fn bind<U, F>(self, f: F) -> Deferred<U>
    where
        U: Send + 'static,
        F: FnOnce(T) -> Deferred<U> + Send + 'static,
    {
        Deferred::new(async move {
            let value = self.inner.await;
            f(value).await
        })
    }

    /// Runs a side effect on the resolved value, passing it through.
    pub fn inspect<F>(self, f: F) -> Self
    where
        F: FnOnce(&T) + Send + 'static,
    {
        self.map(move |value| {
            f(&value);
            value
        })
    }
}

impl<T> Future for Deferred<T> {
    type Output = T;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<T> {
        self.inner.poll_unpin(cx)
    }
}
