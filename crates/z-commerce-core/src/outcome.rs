//! Chaining helpers for fallible asynchronous pipelines.
//!
//! Success/failure and presence/absence are carried by `Result` and `Option`
//! throughout z-commerce. The one combinator std does not provide is an
//! asynchronous flat-map: run a suspending, fallible step on the success value
//! and fold its failure into the error branch. [`ResultAsyncExt::then_async`]
//! fills that gap so build pipelines read top to bottom without nested matches.

use std::future::Future;

/// Asynchronous chaining for `Result`.
pub trait ResultAsyncExt<T, E>: Sized {
    /// Apply a suspending, fallible transform to the success value.
    ///
    /// On `Ok(value)` the future returned by `f(value)` is awaited; its error, if
    /// any, is converted into `E`. On `Err(error)` the error is passed through and
    /// `f` is never called.
    fn then_async<U, R, F, Fut>(self, f: F) -> impl Future<Output = Result<U, E>> + Send
    where
        F: FnOnce(T) -> Fut + Send,
        Fut: Future<Output = Result<U, R>> + Send,
        R: Into<E>;
}

impl<T: Send, E: Send> ResultAsyncExt<T, E> for Result<T, E> {
    fn then_async<U, R, F, Fut>(self, f: F) -> impl Future<Output = Result<U, E>> + Send
    where
        F: FnOnce(T) -> Fut + Send,
        Fut: Future<Output = Result<U, R>> + Send,
        R: Into<E>,
    {
        async move {
            match self {
                Ok(value) => f(value).await.map_err(Into::into),
                Err(error) => Err(error),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum TestError {
        Validation(&'static str),
        Lookup(String),
    }

    impl From<String> for TestError {
        fn from(reason: String) -> Self {
            Self::Lookup(reason)
        }
    }

    #[tokio::test]
    async fn then_async_runs_on_success() {
        let start: Result<u32, TestError> = Ok(2);
        let out = start
            .then_async(|n| async move { Ok::<_, String>(n * 10) })
            .await;
        assert_eq!(out, Ok(20));
    }

    #[tokio::test]
    async fn then_async_folds_step_failure_into_error() {
        let start: Result<u32, TestError> = Ok(2);
        let out: Result<u32, TestError> = start
            .then_async(|_| async { Err::<u32, _>("lookup failed".to_string()) })
            .await;
        assert_eq!(out, Err(TestError::Lookup("lookup failed".into())));
    }

    #[tokio::test]
    async fn then_async_skips_step_on_error() {
        let start: Result<u32, TestError> = Err(TestError::Validation("bad"));
        let out = start
            .then_async(|_| async { Err::<u32, _>("step ran".to_string()) })
            .await;
        assert_eq!(out, Err(TestError::Validation("bad")));
    }

    #[test]
    fn unit_and_none_are_legitimate_success_values() {
        let ok: Result<Option<()>, TestError> = Ok(None);
        assert!(ok.is_ok());
        let some: Option<Option<u8>> = Some(None);
        assert!(some.is_some());
    }
}
