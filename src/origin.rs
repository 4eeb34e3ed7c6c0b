use crate::{Error, Result, SnowlineId};

/// The validated `(business, data center, machine)` triple identifying a
/// generator instance's position in the ID namespace.
///
/// Each field must lie in `[1, max]` where `max` is derived from the field's
/// bit width; `0` is reserved. Two generators with distinct origins can never
/// produce colliding IDs.
///
/// # Example
/// ```
/// use snowline::Origin;
///
/// let origin = Origin::new(1, 2, 3).unwrap();
/// assert_eq!(origin.machine_id(), 3);
///
/// assert!(Origin::new(0, 2, 3).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Origin {
    business_id: u64,
    data_center_id: u64,
    machine_id: u64,
}

impl Origin {
    /// Validates and constructs an origin tuple.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] naming the offending field if
    /// any value falls outside `[1, max]` for its bit width. No partially
    /// constructed origin is observable.
    pub fn new(business_id: u64, data_center_id: u64, machine_id: u64) -> Result<Self> {
        check_range("business ID", business_id, SnowlineId::max_business_id())?;
        check_range(
            "data center ID",
            data_center_id,
            SnowlineId::max_data_center_id(),
        )?;
        check_range("machine ID", machine_id, SnowlineId::max_machine_id())?;

        Ok(Self {
            business_id,
            data_center_id,
            machine_id,
        })
    }

    /// Returns the business line ID.
    pub const fn business_id(&self) -> u64 {
        self.business_id
    }

    /// Returns the data center ID.
    pub const fn data_center_id(&self) -> u64 {
        self.data_center_id
    }

    /// Returns the machine ID.
    pub const fn machine_id(&self) -> u64 {
        self.machine_id
    }
}

/// Rejects values outside `[1, max]`.
///
/// Zero is reserved rather than treated as the first legal value; see the
/// `Origin` docs.
pub(crate) fn check_range(field: &'static str, value: u64, max: u64) -> Result<()> {
    if value == 0 || value > max {
        return Err(Error::InvalidConfiguration {
            field,
            value,
            min: 1,
            max,
        });
    }
    Ok(())
}
