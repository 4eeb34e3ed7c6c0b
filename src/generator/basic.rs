use core::{cell::Cell, cmp::Ordering};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    Error, IdGenStatus, Origin, Result, SnowlineGenerator, SnowlineId, TimeSource,
    origin::check_range,
};

/// A non-concurrent ID generator suitable for single-threaded environments.
///
/// This generator is lightweight and fast, but **not thread-safe**: the
/// last-timestamp/sequence pair lives in a [`Cell`] and is never shared
/// across threads, which is what makes its read-modify-write of the state
/// atomic with respect to callers.
///
/// ## Recommended When
/// - Each thread or task owns its own generator (distinct origins)
/// - You want the fastest generator
///
/// ## See Also
/// - [`LockSnowlineGenerator`]
///
/// [`LockSnowlineGenerator`]: crate::LockSnowlineGenerator
pub struct BasicSnowlineGenerator<T> {
    state: Cell<SnowlineId>,
    time: T,
}

impl<T> BasicSnowlineGenerator<T>
where
    T: TimeSource,
{
    /// Creates a new generator for the given origin, with the sequence
    /// counter starting at zero.
    ///
    /// # Parameters
    ///
    /// - `origin`: The validated [`Origin`] tuple encoded into every
    ///   generated ID.
    /// - `time`: A [`TimeSource`] (e.g. [`SystemClock`]) that supplies
    ///   epoch-relative millisecond timestamps.
    ///
    /// # Example
    /// ```
    /// use snowline::{BasicSnowlineGenerator, Origin, SystemClock};
    ///
    /// let origin = Origin::new(1, 1, 1).unwrap();
    /// let generator = BasicSnowlineGenerator::new(origin, SystemClock::default());
    ///
    /// let id = generator.next_id().unwrap();
    /// ```
    ///
    /// [`SystemClock`]: crate::SystemClock
    pub fn new(origin: Origin, time: T) -> Self {
        Self {
            state: Cell::new(Self::seed(origin, 0)),
            time,
        }
    }

    /// Creates a new generator with an explicit initial sequence value.
    ///
    /// Useful when an integrator hands over counter state it manages itself.
    /// The value is validated against the sequence field's 12-bit bound; as
    /// with the origin fields, zero is reserved (omit the value instead — the
    /// counter then starts at zero).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `sequence` is outside
    /// `[1, 4095]`.
    pub fn with_initial_sequence(origin: Origin, sequence: u64, time: T) -> Result<Self> {
        check_range("sequence", sequence, SnowlineId::max_sequence())?;
        Ok(Self {
            state: Cell::new(Self::seed(origin, sequence)),
            time,
        })
    }

    fn seed(origin: Origin, sequence: u64) -> SnowlineId {
        SnowlineId::from_components(
            0,
            origin.business_id(),
            origin.data_center_id(),
            origin.machine_id(),
            sequence,
        )
    }

    /// Generates the next ID, spin-waiting across a sequence-exhausted
    /// millisecond.
    ///
    /// The spin re-reads the clock until it advances strictly past the
    /// exhausted tick, so the wait is bounded by real clock resolution
    /// (typically under a millisecond).
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClockRegression`] if the clock reports a time earlier
    /// than the last issued timestamp. No ID is produced; the caller decides
    /// whether to retry, halt, or re-synchronize.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_id(&self) -> Result<SnowlineId> {
        loop {
            match self.poll_next_id()? {
                IdGenStatus::Ready { id } => break Ok(id),
                IdGenStatus::Pending { .. } => core::hint::spin_loop(),
            }
        }
    }

    /// Attempts to generate the next ID without blocking.
    ///
    /// Returns [`IdGenStatus::Pending`] when the sequence space for the
    /// current millisecond is exhausted; the caller may retry once the clock
    /// advances.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClockRegression`] if the clock reports a time earlier
    /// than the last issued timestamp.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn poll_next_id(&self) -> Result<IdGenStatus> {
        let now = self.time.current_millis();
        let state = self.state.get();
        let last = state.timestamp();

        match now.cmp(&last) {
            Ordering::Equal => {
                if state.has_sequence_room() {
                    let updated = state.increment_sequence();
                    self.state.set(updated);
                    Ok(IdGenStatus::Ready { id: updated })
                } else {
                    Ok(IdGenStatus::Pending { yield_for: 1 })
                }
            }
            Ordering::Greater => {
                let updated = state.rollover_to_timestamp(now);
                self.state.set(updated);
                Ok(IdGenStatus::Ready { id: updated })
            }
            Ordering::Less => Err(Self::cold_clock_behind(now, last)),
        }
    }

    #[cold]
    #[inline(never)]
    fn cold_clock_behind(now: u64, last: u64) -> Error {
        Error::ClockRegression {
            behind_ms: last - now,
        }
    }
}

impl<T> SnowlineGenerator<T> for BasicSnowlineGenerator<T>
where
    T: TimeSource,
{
    fn new(origin: Origin, time: T) -> Self {
        Self::new(origin, time)
    }

    fn next_id(&self) -> Result<SnowlineId> {
        self.next_id()
    }

    fn poll_next_id(&self) -> Result<IdGenStatus> {
        self.poll_next_id()
    }
}
