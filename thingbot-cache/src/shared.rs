//! Mutex-guarded variant of [`TtlCache`].

use crate::ttl::TtlCache;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// A [`TtlCache`] usable through `&self`.
///
/// The lock is held for the whole call, producer included, so a reader never
/// observes a value paired with another call's arguments or timestamp.
/// Concurrent callers wait for an in-flight refresh instead of starting their
/// own.
pub struct SharedTtlCache<A, T, F> {
    inner: Mutex<TtlCache<A, T, F>>,
}

impl<A, T, F> SharedTtlCache<A, T, F> {
    pub fn new(producer: F, expiry: Option<Duration>) -> Self {
        Self {
            inner: Mutex::new(TtlCache::new(producer, expiry)),
        }
    }

    /// Forces the next call to invoke the producer.
    pub fn reset(&self) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .reset();
    }

    /// A copy of the last computed value, without refreshing it.
    pub fn cached(&self) -> Option<T>
    where
        T: Clone,
    {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .cached()
            .cloned()
    }
}

impl<A: PartialEq, T: Clone, F> SharedTtlCache<A, T, F> {
    /// Returns a copy of the value for `args`, recomputing it if needed.
    pub fn call<E>(&self, args: A) -> Result<T, E>
    where
        F: FnMut(&A) -> Result<T, E>,
    {
        self.call_at(args, Instant::now())
    }

    /// Like [`call`](Self::call) with an explicit current instant.
    pub fn call_at<E>(&self, args: A, now: Instant) -> Result<T, E>
    where
        F: FnMut(&A) -> Result<T, E>,
    {
        let mut cache = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        cache.call_at(args, now).cloned()
    }
}
