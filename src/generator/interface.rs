use crate::{IdGenStatus, Origin, Result, SnowlineId, TimeSource};

/// A minimal interface over the ID generator flavors.
pub trait SnowlineGenerator<T>
where
    T: TimeSource,
{
    /// Creates a new generator with the sequence counter starting at zero.
    fn new(origin: Origin, time: T) -> Self;

    /// Returns the next available ID, waiting out sequence exhaustion.
    fn next_id(&self) -> Result<SnowlineId>;

    /// Attempts to generate the next ID without blocking.
    fn poll_next_id(&self) -> Result<IdGenStatus>;
}
