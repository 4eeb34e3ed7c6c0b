use crate::SnowlineId;

/// Outcome of a single non-blocking generation attempt.
///
/// - [`IdGenStatus::Ready`] indicates a new ID was generated.
/// - [`IdGenStatus::Pending`] means the sequence space for the current
///   millisecond is exhausted and the clock must advance before another ID
///   can be issued. This is backpressure, not a failure; clock regression is
///   reported as an error, never as `Pending`.
///
/// # Example
///
/// ```
/// use snowline::{BasicSnowlineGenerator, IdGenStatus, Origin, TimeSource};
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_millis(&self) -> u64 {
///         1
///     }
/// }
///
/// let origin = Origin::new(1, 1, 1).unwrap();
/// let generator = BasicSnowlineGenerator::new(origin, FixedTime);
/// match generator.poll_next_id().unwrap() {
///     IdGenStatus::Ready { id } => println!("ID: {id}"),
///     IdGenStatus::Pending { yield_for } => println!("back off for {yield_for} ms"),
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdGenStatus {
    /// A unique ID was generated and is ready to use.
    Ready {
        /// The generated ID.
        id: SnowlineId,
    },
    /// The sequence has been exhausted for the current tick.
    Pending {
        /// How long to wait (in milliseconds) before trying again.
        yield_for: u64,
    },
}
