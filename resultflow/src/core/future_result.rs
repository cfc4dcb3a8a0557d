//! The `Deferred`/`Result` transformer.
//!
//! [`FutureResult`] owns a single `Deferred<Result<T, E>>` and gives it the
//! combinators of `Result`, each of them asynchronous. Once a step resolves to
//! `Err`, every later continuation is skipped: its closure is never called, so
//! no downstream future is even created.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::FutureExt;

use super::deferred::Deferred;
use super::result_ext::ResultExt;

/// An asynchronous computation that resolves to `Result<T, E>`.
///
/// Awaiting a `FutureResult` yields the plain `Result`.
///
/// # Examples
///
/// ```
/// use resultflow::core::FutureResult;
///
/// # tokio_test::block_on(async {
/// let out: Result<i32, &str> = FutureResult::ok(2)
///     .bind(|x| FutureResult::ok(x * 10))
///     .and_then(|x| if x > 5 { Ok(x) } else { Err("too small") })
///     .await;
/// assert_eq!(out, Ok(20));
/// # });
/// ```
#[derive(Debug)]
#[must_use = "a FutureResult does nothing unless awaited"]
pub struct FutureResult<T, E> {
    inner: Deferred<Result<T, E>>,
}

impl<T, E> FutureResult<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Wraps a deferred result.
    pub const fn new(inner: Deferred<Result<T, E>>) -> Self {
        Self { inner }
    }

    /// Wraps any future that resolves to a `Result`.
    pub fn from_future<F>(fut: F) -> Self
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
    {
        Self::new(Deferred::new(fut))
    }

    /// Lifts an already computed `Result`.
    pub fn from_result(result: Result<T, E>) -> Self {
        Self::new(Deferred::pure(result))
    }

    /// An already-resolved success.
    pub fn ok(value: T) -> Self {
        Self::from_result(Ok(value))
    }

    /// An already-resolved failure.
    pub fn err(error: E) -> Self {
        Self::from_result(Err(error))
    }

    /// Transforms the success value with an infallible function.
    pub fn map<U, F>(self, f: F) -> FutureResult<U, E>
    where
        U: Send + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        FutureResult::new(self.inner.map(move |result| result.map(f)))
    }

    /// Chains a synchronous step that may fail.
    ///
    /// On `Err` the step is skipped and the error propagates unchanged.
    pub fn and_then<U, F>(self, f: F) -> FutureResult<U, E>
    where
        U: Send + 'static,
        F: FnOnce(T) -> Result<U, E> + Send + 'static,
    {
        FutureResult::new(self.inner.map(move |result| result.bind(f)))
    }

    /// Chains an asynchronous step that may fail.
    ///
    /// On `Ok(v)`, `f(v)` is called and its result awaited. On `Err(e)` the
    /// chain resolves to `Err(e)` without calling `f`.
    pub fn bind<U, F>(self, f: F) -> FutureResult<U, E>
    where
        U: Send + 'static,
        F: FnOnce(T) -> FutureResult<U, E> + Send + 'static,
    {
        FutureResult::new(self.inner.bind(move |result| match result {
            Ok(value) => f(value).inner,
            Err(err) => Deferred::pure(Err(err)),
        }))
    }

    /// Transforms the error value.
    pub fn map_err<F2, F>(self, f: F) -> FutureResult<T, F2>
    where
        F2: Send + 'static,
        F: FnOnce(E) -> F2 + Send + 'static,
    {
        FutureResult::new(self.inner.map(move |result| result.map_error(f)))
    }

    /// Returns the wrapped deferred result.
    pub fn into_deferred(self) -> Deferred<Result<T, E>> {
        self.inner
    }
}

impl<T, E> Deferred<Result<T, E>>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Views this deferred result through the transformer.
    pub const fn into_future_result(self) -> FutureResult<T, E> {
        FutureResult::new(self)
    }
}

impl<T, E> From<Deferred<Result<T, E>>> for FutureResult<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    fn from(inner: Deferred<Result<T, E>>) -> Self {
        Self::new(inner)
    }
}

impl<T, E> Future for FutureResult<T, E> {
    type Output = Result<T, E>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.inner.poll_unpin(cx)
    }
}
