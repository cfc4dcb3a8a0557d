//! Monadic combinators for the synchronous `Result` layer.
//!
//! `std::result::Result` already provides `map`; this trait adds the
//! remaining vocabulary used by the pipeline: `bind`, `map_error`, the tap
//! helpers used for rendering, and `fold`.

/// Extension trait adding `bind`/`map_error` style combinators to `Result<T, E>`.
pub trait ResultExt<T, E>: Sized {
    /// Chains a fallible continuation.
    ///
    /// `Ok(v)` becomes `f(v)`, so the continuation may switch to failure.
    /// `Err(e)` is returned as is and `f` is never invoked.
    fn bind<U, F>(self, f: F) -> Result<U, E>
    where
        F: FnOnce(T) -> Result<U, E>;

    /// Transforms only the error channel. The dual of `map`.
    fn map_error<F2, F>(self, f: F) -> Result<T, F2>
    where
        F: FnOnce(E) -> F2;

    /// Runs a side effect on the success value and returns the result unchanged.
    fn tap<F>(self, f: F) -> Self
    where
        F: FnOnce(&T);

    /// Runs a side effect on the error value and returns the result unchanged.
    fn tap_error<F>(self, f: F) -> Self
    where
        F: FnOnce(&E);

    /// Collapses both channels into a single value.
    fn fold<U, FE, FT>(self, on_err: FE, on_ok: FT) -> U
    where
        FE: FnOnce(E) -> U,
        FT: FnOnce(T) -> U;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    fn bind<U, F>(self, f: F) -> Result<U, E>
    where
        F: FnOnce(T) -> Result<U, E>,
    {
        match self {
            Ok(value) => f(value),
            Err(err) => Err(err),
        }
    }

    fn map_error<F2, F>(self, f: F) -> Result<T, F2>
    where
        F: FnOnce(E) -> F2,
    {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(f(err)),
        }
    }

    fn tap<F>(self, f: F) -> Self
    where
        F: FnOnce(&T),
    {
        if let Ok(ref value) = self {
            f(value);
        }
        self
    }

    fn tap_error<F>(self, f: F) -> Self
    where
        F: FnOnce(&E),
    {
        if let Err(ref err) = self {
            f(err);
        }
        self
    }

    fn fold<U, FE, FT>(self, on_err: FE, on_ok: FT) -> U
    where
        FE: FnOnce(E) -> U,
        FT: FnOnce(T) -> U,
    {
        match self {
            Ok(value) => on_ok(value),
            Err(err) => on_err(err),
        }
    }
}
