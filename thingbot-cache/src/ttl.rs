//! Single-slot cache with argument and time based invalidation.

use std::time::{Duration, Instant};
use tracing::debug;

/// A boxed producer, for caches stored in structs that cannot name a closure type.
pub type BoxProducer<A, T, E> = Box<dyn FnMut(&A) -> Result<T, E> + Send>;

/// Why a call recomputed its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    /// Nothing cached yet.
    FirstCall,
    /// Arguments differ from the cached call.
    ArgsChanged,
    /// The expiry duration has elapsed since the cached call.
    Expired,
    /// [`TtlCache::reset`] was called.
    Reset,
}

/// The cached (arguments, value, timestamp) triple. Replaced as a unit.
struct Slot<A, T> {
    args: A,
    value: T,
    /// `None` after a reset.
    computed_at: Option<Instant>,
}

/// Remembers the last result of `producer`.
///
/// A call recomputes when nothing is cached, when its arguments differ from
/// the cached call's, when `expiry` has elapsed since the cached value was
/// computed, or after [`reset`](TtlCache::reset). Otherwise the cached value
/// is returned without invoking the producer.
///
/// A failing producer leaves the previous slot untouched and its error is
/// returned verbatim.
pub struct TtlCache<A, T, F> {
    producer: F,
    expiry: Option<Duration>,
    slot: Option<Slot<A, T>>,
}

impl<A, T, F> TtlCache<A, T, F> {
    /// Creates an empty cache. An `expiry` of `None` never expires on time.
    pub fn new(producer: F, expiry: Option<Duration>) -> Self {
        Self {
            producer,
            expiry,
            slot: None,
        }
    }

    /// Creates an empty cache that expires `expiry` after each computation.
    pub fn with_expiry(producer: F, expiry: Duration) -> Self {
        Self::new(producer, Some(expiry))
    }

    /// Forces the next call to invoke the producer.
    ///
    /// The cached value stays readable through [`cached`](Self::cached).
    pub fn reset(&mut self) {
        if let Some(slot) = self.slot.as_mut() {
            slot.computed_at = None;
        }
    }

    /// The last computed value, without refreshing it.
    #[must_use]
    pub fn cached(&self) -> Option<&T> {
        self.slot.as_ref().map(|slot| &slot.value)
    }
}

impl<A: PartialEq, T, F> TtlCache<A, T, F> {
    /// Decides whether a call with `args` at `now` must recompute.
    pub fn needs_refresh(&self, args: &A, now: Instant) -> Option<Refresh> {
        let Some(slot) = self.slot.as_ref() else {
            return Some(Refresh::FirstCall);
        };
        if slot.args != *args {
            return Some(Refresh::ArgsChanged);
        }
        let Some(computed_at) = slot.computed_at else {
            return Some(Refresh::Reset);
        };
        match self.expiry {
            Some(expiry) if now.saturating_duration_since(computed_at) > expiry => {
                Some(Refresh::Expired)
            }
            _ => None,
        }
    }

    /// Returns the value for `args`, recomputing it if needed.
    pub fn call<E>(&mut self, args: A) -> Result<&T, E>
    where
        F: FnMut(&A) -> Result<T, E>,
    {
        self.call_at(args, Instant::now())
    }

    /// Like [`call`](Self::call) with an explicit current instant.
    pub fn call_at<E>(&mut self, args: A, now: Instant) -> Result<&T, E>
    where
        F: FnMut(&A) -> Result<T, E>,
    {
        let stale = self.needs_refresh(&args, now);
        match (stale, &mut self.slot) {
            (None, Some(slot)) => Ok(&slot.value),
            (reason, slot) => {
                debug!(reason = ?reason, "Recomputing cached value");
                let value = (self.producer)(&args)?;
                let slot = slot.insert(Slot {
                    args,
                    value,
                    computed_at: Some(now),
                });
                Ok(&slot.value)
            }
        }
    }
}
