//! Time-boxed memoization.
//!
//! - [`TtlCache`]: remembers the last result of a producer function and
//!   recomputes it when the arguments change, the expiry elapses, or the
//!   cache is reset
//! - [`SharedTtlCache`]: the same cache behind a mutex, for use from `&self`
//!
//! Refreshes happen synchronously on the calling thread. There is no
//! background refresh and no cancellation: a producer call that has started
//! runs to completion or failure.

mod shared;
mod ttl;

pub use shared::SharedTtlCache;
pub use ttl::{BoxProducer, Refresh, TtlCache};
