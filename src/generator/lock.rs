use core::cmp::Ordering;
use std::sync::Arc;

#[cfg(feature = "tracing")]
use tracing::instrument;

use super::mutex::Mutex;
use crate::{
    Error, IdGenStatus, Origin, Result, SnowlineGenerator, SnowlineId, TimeSource,
    origin::check_range,
};

/// A lock-based ID generator suitable for multi-threaded environments.
///
/// The last-timestamp/sequence pair is a single packed word behind one mutex
/// (`std::sync::Mutex` by default, `parking_lot::Mutex` with the
/// `parking-lot` feature). Every generation attempt — clock read, regression
/// check, sequence update — runs as one critical section, so concurrent
/// callers can never interleave partial state transitions or observe a
/// sibling's in-flight timestamp as a regression.
///
/// ## Recommended When
/// - Multiple threads share one origin tuple
/// - Fair access across threads is important
///
/// ## See Also
/// - [`BasicSnowlineGenerator`]
///
/// [`BasicSnowlineGenerator`]: crate::BasicSnowlineGenerator
#[derive(Clone)]
pub struct LockSnowlineGenerator<T> {
    #[cfg(feature = "cache-padded")]
    state: Arc<crossbeam_utils::CachePadded<Mutex<SnowlineId>>>,
    #[cfg(not(feature = "cache-padded"))]
    state: Arc<Mutex<SnowlineId>>,
    time: T,
}

impl<T> LockSnowlineGenerator<T>
where
    T: TimeSource,
{
    /// Creates a new generator for the given origin, with the sequence
    /// counter starting at zero.
    ///
    /// # Example
    /// ```
    /// use snowline::{LockSnowlineGenerator, Origin, SystemClock};
    ///
    /// let origin = Origin::new(1, 1, 1).unwrap();
    /// let generator = LockSnowlineGenerator::new(origin, SystemClock::default());
    ///
    /// let id = generator.next_id().unwrap();
    /// ```
    pub fn new(origin: Origin, time: T) -> Self {
        Self::from_seed(Self::seed(origin, 0), time)
    }

    /// Creates a new generator with an explicit initial sequence value.
    ///
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
        Ok(Self::from_seed(Self::seed(origin, sequence), time))
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

    fn from_seed(id: SnowlineId, time: T) -> Self {
        Self {
            #[cfg(feature = "cache-padded")]
            state: Arc::new(crossbeam_utils::CachePadded::new(Mutex::new(id))),
            #[cfg(not(feature = "cache-padded"))]
            state: Arc::new(Mutex::new(id)),
            time,
        }
    }

    /// Generates the next ID, waiting out a sequence-exhausted millisecond.
    ///
    /// The lock is released between attempts and the thread yields, so a
    /// caller stuck on an exhausted tick never starves its siblings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClockRegression`] if the clock reports a time earlier
    /// than the last issued timestamp, and [`Error::LockPoisoned`] if another
    /// thread panicked while holding the generator lock (std mutex only).
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_id(&self) -> Result<SnowlineId> {
        loop {
            match self.poll_next_id()? {
                IdGenStatus::Ready { id } => break Ok(id),
                IdGenStatus::Pending { .. } => std::thread::yield_now(),
            }
        }
    }

    /// Attempts to generate the next ID without blocking beyond the lock.
    ///
    /// Returns [`IdGenStatus::Pending`] when the sequence space for the
    /// current millisecond is exhausted; the caller may retry once the clock
    /// advances.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClockRegression`] if the clock reports a time earlier
    /// than the last issued timestamp, and [`Error::LockPoisoned`] if another
    /// thread panicked while holding the generator lock (std mutex only).
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn poll_next_id(&self) -> Result<IdGenStatus> {
        let mut id = {
            #[cfg(feature = "parking-lot")]
            {
                self.state.lock()
            }
            #[cfg(not(feature = "parking-lot"))]
            {
                self.state.lock()?
            }
        };

        // The clock is read with the lock held: the regression verdict must
        // be made against a state no other caller can advance mid-read.
        let now = self.time.current_millis();
        let last = id.timestamp();

        match now.cmp(&last) {
            Ordering::Equal => {
                if id.has_sequence_room() {
                    *id = id.increment_sequence();
                    Ok(IdGenStatus::Ready { id: *id })
                } else {
                    Ok(IdGenStatus::Pending { yield_for: 1 })
                }
            }
            Ordering::Greater => {
                *id = id.rollover_to_timestamp(now);
                Ok(IdGenStatus::Ready { id: *id })
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

impl<T> SnowlineGenerator<T> for LockSnowlineGenerator<T>
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
