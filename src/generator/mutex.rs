#[cfg(feature = "parking-lot")]
pub(crate) use parking_lot::Mutex;

#[cfg(not(feature = "parking-lot"))]
pub(crate) use std::sync::Mutex;
