use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Epoch origin shared by every deployment: 2017-12-13 02:45:04 UTC.
///
/// Part of the bit-compatibility contract. Changing it re-bases the timestamp
/// field of every generated ID, so IDs minted against different epochs are
/// not comparable.
pub const SNOWLINE_EPOCH: Duration = Duration::from_millis(1_513_133_104_000);

/// A source of millisecond timestamps relative to a configured epoch.
///
/// This abstraction allows plugging in the real system clock or a stubbed
/// time source in tests.
///
/// # Example
///
/// ```
/// use snowline::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_millis(&self) -> u64 {
///         1234
///     }
/// }
///
/// assert_eq!(FixedTime.current_millis(), 1234);
/// ```
pub trait TimeSource {
    /// Returns the current time in milliseconds since the configured epoch,
    /// floored to the millisecond.
    fn current_millis(&self) -> u64;
}

/// Wall-clock time source anchored at a fixed epoch.
///
/// The wall clock is read on every call rather than cached: a backward
/// adjustment (NTP step, manual change) must stay observable so the
/// generator can refuse to issue IDs for the regression window instead of
/// silently reusing timestamps.
#[derive(Clone)]
pub struct SystemClock {
    epoch_ms: u64,
}

impl Default for SystemClock {
    /// Constructs a clock aligned to [`SNOWLINE_EPOCH`].
    fn default() -> Self {
        Self::with_epoch(SNOWLINE_EPOCH)
    }
}

impl SystemClock {
    /// Constructs a clock using a custom epoch as the origin (t = 0),
    /// specified as a [`Duration`] since the Unix epoch.
    pub fn with_epoch(epoch: Duration) -> Self {
        Self {
            epoch_ms: epoch.as_millis() as u64,
        }
    }
}

impl TimeSource for SystemClock {
    fn current_millis(&self) -> u64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock before UNIX_EPOCH")
            .as_millis() as u64;
        // A wall clock sitting before the epoch clamps to 0; the generator's
        // regression check reports it rather than this read underflowing.
        now.saturating_sub(self.epoch_ms)
    }
}
