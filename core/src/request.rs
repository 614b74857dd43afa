//! One-shot remote requests keyed by their input.
//!
//! A result view may be shown, torn down and shown again for the same
//! document set. [`OneShotRequest`] makes sure only the first showing sends
//! anything; later showings read the cached (or still pending) result.
//!
//! ```text
//!            issue(k)                resolve(k, v)
//!   Idle ─────────────▶ Pending ─────────────────▶ Ready(v)
//!                          │                          │
//!                 cancel() │       issue(k') k' != k  │
//!                          ▼                          ▼
//!                      Cancelled ◀──────────── (old request aborted)
//! ```
//!
//! The returned future is wrapped with [`futures::future::abortable`], so
//! cancelling drops the in-flight work at its next suspension point.

use futures::future::{abortable, AbortHandle, Abortable};
use std::future::Future;

/// Where a [`OneShotRequest`] is in its lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestState<T> {
    Idle,
    Pending,
    Ready(T),
    Cancelled,
}

/// At most one in-flight request per key, with its result cached.
#[derive(Debug)]
pub struct OneShotRequest<K, T> {
    key: Option<K>,
    state: RequestState<T>,
    abort: Option<AbortHandle>,
    issued: usize,
}

impl<K, T> Default for OneShotRequest<K, T> {
    fn default() -> Self {
        Self {
            key: None,
            state: RequestState::Idle,
            abort: None,
            issued: 0,
        }
    }
}

impl<K: PartialEq + Clone, T> OneShotRequest<K, T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the request for `key` unless it is already pending or done.
    ///
    /// Returns the future to drive when a request was started, `None` when
    /// the caller should wait on or read the existing one. A different key
    /// aborts whatever was in flight. A cancelled request for the same key
    /// may be issued again.
    pub fn issue<Fut, M>(&mut self, key: K, make: M) -> Option<Abortable<Fut>>
    where
        Fut: Future<Output = T>,
        M: FnOnce() -> Fut,
    {
        if self.key.as_ref() == Some(&key)
            && matches!(self.state, RequestState::Pending | RequestState::Ready(_))
        {
            log::debug!("request already issued for this input, reusing it");
            return None;
        }

        self.cancel();
        let (future, handle) = abortable(make());
        self.key = Some(key);
        self.state = RequestState::Pending;
        self.abort = Some(handle);
        self.issued += 1;
        Some(future)
    }

    /// Store the result for `key`.
    ///
    /// Ignored (returns `false`) when the request was cancelled or a newer
    /// key has been issued since.
    pub fn resolve(&mut self, key: &K, value: T) -> bool {
        if self.key.as_ref() != Some(key) || !self.is_pending() {
            log::debug!("discarding stale request result");
            return false;
        }
        self.state = RequestState::Ready(value);
        self.abort = None;
        true
    }

    /// Abort the in-flight request, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.abort.take() {
            handle.abort();
        }
        if self.is_pending() {
            self.state = RequestState::Cancelled;
        }
    }

    /// Forget the key and result so the next `issue` always sends.
    pub fn reset(&mut self) {
        self.cancel();
        self.key = None;
        self.state = RequestState::Idle;
    }

    pub fn state(&self) -> &RequestState<T> {
        &self.state
    }

    pub fn result(&self) -> Option<&T> {
        match &self.state {
            RequestState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, RequestState::Pending)
    }

    pub fn key(&self) -> Option<&K> {
        self.key.as_ref()
    }

    /// How many requests have actually been started.
    pub fn issued_count(&self) -> usize {
        self.issued
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::Cell;

    #[test]
    fn test_same_key_issues_once() {
        let sent = Cell::new(0);
        let mut request = OneShotRequest::<&str, u32>::new();

        let first = request.issue("set-a", || {
            sent.set(sent.get() + 1);
            async { 7 }
        });
        let value = block_on(first.unwrap()).unwrap();
        assert!(request.resolve(&"set-a", value));

        // Second showing of the same set: nothing is sent.
        let second = request.issue("set-a", || {
            sent.set(sent.get() + 1);
            async { 8 }
        });
        assert!(second.is_none());
        assert_eq!(sent.get(), 1);
        assert_eq!(request.result(), Some(&7));
        assert_eq!(request.issued_count(), 1);
    }

    #[test]
    fn test_pending_request_is_not_duplicated() {
        let mut request = OneShotRequest::<u8, &str>::new();
        let pending = request.issue(1, || async { "done" }).unwrap();
        assert!(request.is_pending());
        assert!(request.issue(1, || async { "again" }).is_none());

        let value = block_on(pending).unwrap();
        assert!(request.resolve(&1, value));
        assert_eq!(request.result(), Some(&"done"));
    }

    #[test]
    fn test_new_key_aborts_previous() {
        let mut request = OneShotRequest::<u8, u8>::new();
        let old = request.issue(1, || futures::future::pending::<u8>()).unwrap();
        let new = request.issue(2, || async { 2 }).unwrap();

        assert!(block_on(old).is_err());
        let value = block_on(new).unwrap();
        assert!(!request.resolve(&1, 1));
        assert!(request.resolve(&2, value));
        assert_eq!(request.key(), Some(&2));
        assert_eq!(request.issued_count(), 2);
    }

    #[test]
    fn test_cancel_ignores_late_result() {
        let mut request = OneShotRequest::<u8, u8>::new();
        let future = request.issue(1, || async { 1 }).unwrap();
        request.cancel();

        assert!(block_on(future).is_err());
        assert!(!request.resolve(&1, 1));
        assert_eq!(request.state(), &RequestState::Cancelled);
    }

    #[test]
    fn test_cancelled_request_can_be_retried() {
        let mut request = OneShotRequest::<u8, u8>::new();
        let _ = request.issue(1, || async { 1 });
        request.cancel();
        assert!(request.issue(1, || async { 1 }).is_some());
    }

    #[test]
    fn test_reset_forgets_result() {
        let mut request = OneShotRequest::<u8, u8>::new();
        let future = request.issue(1, || async { 5 }).unwrap();
        let value = block_on(future).unwrap();
        request.resolve(&1, value);

        request.reset();
        assert_eq!(request.state(), &RequestState::Idle);
        assert!(request.issue(1, || async { 5 }).is_some());
    }
}
