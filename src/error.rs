pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for ID configuration and generation.
///
/// Sequence exhaustion within a millisecond is not an error: generators wait
/// out the current tick instead. The only runtime failure the algorithm itself
/// can surface is [`Error::ClockRegression`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An origin field or explicit initial sequence was outside the range its
    /// bit width allows.
    ///
    /// Non-retryable: the caller must supply corrected parameters.
    #[error("{field} must be between {min} and {max}, got {value}")]
    InvalidConfiguration {
        field: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },

    /// The clock reported a time earlier than the last issued timestamp.
    ///
    /// The uniqueness guarantee cannot be trusted for a regressive call, so
    /// this is surfaced rather than masked. Recovery policy (wait out the
    /// regression window, alert, abort) is left to the caller.
    #[error("clock moved backwards; refusing to generate an ID for {behind_ms} ms")]
    ClockRegression {
        /// Magnitude of the regression in milliseconds.
        behind_ms: u64,
    },

    /// The generator lock was **poisoned**.
    ///
    /// This occurs when a thread panics while holding the lock. When the
    /// `parking-lot` feature is enabled, mutexes do not poison, so this
    /// variant is not available.
    #[cfg(not(feature = "parking-lot"))]
    #[error("generator lock poisoned by a panicked thread")]
    LockPoisoned,
}

#[cfg(not(feature = "parking-lot"))]
use std::sync::{MutexGuard, PoisonError};

// Convert all poisoned lock errors to a simplified `LockPoisoned`
#[cfg(not(feature = "parking-lot"))]
impl<T> From<PoisonError<MutexGuard<'_, T>>> for Error {
    fn from(_: PoisonError<MutexGuard<'_, T>>) -> Self {
        Self::LockPoisoned
    }
}
