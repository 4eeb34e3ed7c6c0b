use core::fmt;

/// A 64-bit time-ordered ID carrying origin and sequence fields.
///
/// - 46 bits timestamp (ms since [`SNOWLINE_EPOCH`])
/// - 2 bits business line ID
/// - 2 bits data center ID
/// - 2 bits machine ID
/// - 12 bits sequence
///
/// ```text
///  Bit Index:  63             18 17      16 15       14 13       12 11             0
///              +----------------+----------+------------+-----------+---------------+
///  Field:      | timestamp (46) | buss (2) | dc (2)     | machine(2)| sequence (12) |
///              +----------------+----------+------------+-----------+---------------+
///              |<------------ MSB ----------- 64 bits ----------- LSB ------------->|
/// ```
///
/// IDs from instances with distinct `(business, data center, machine)` tuples
/// can never collide: those fields occupy disjoint, fixed bit positions.
///
/// [`SNOWLINE_EPOCH`]: crate::SNOWLINE_EPOCH
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SnowlineId {
    id: u64,
}

const _: () = {
    // Compile-time check: total bit width _must_ equal the backing type. This
    // is to avoid aliasing surprises.
    assert!(
        SnowlineId::TIMESTAMP_BITS
            + SnowlineId::BUSINESS_ID_BITS
            + SnowlineId::DATA_CENTER_ID_BITS
            + SnowlineId::MACHINE_ID_BITS
            + SnowlineId::SEQUENCE_BITS
            == u64::BITS as u64,
        "field layout overflows the underlying integer type"
    );
};

impl SnowlineId {
    /// Width of the timestamp field in bits.
    pub const TIMESTAMP_BITS: u64 = 46;

    /// Width of the business line ID field in bits.
    pub const BUSINESS_ID_BITS: u64 = 2;

    /// Width of the data center ID field in bits.
    pub const DATA_CENTER_ID_BITS: u64 = 2;

    /// Width of the machine ID field in bits.
    pub const MACHINE_ID_BITS: u64 = 2;

    /// Width of the sequence field in bits.
    pub const SEQUENCE_BITS: u64 = 12;

    /// Number of bits to shift the sequence field (bit 0).
    pub const SEQUENCE_SHIFT: u64 = 0;

    /// Number of bits to shift the machine ID to its correct position
    /// (bit 12).
    pub const MACHINE_ID_SHIFT: u64 = Self::SEQUENCE_SHIFT + Self::SEQUENCE_BITS;

    /// Number of bits to shift the data center ID to its correct position
    /// (bit 14).
    pub const DATA_CENTER_ID_SHIFT: u64 = Self::MACHINE_ID_SHIFT + Self::MACHINE_ID_BITS;

    /// Number of bits to shift the business line ID to its correct position
    /// (bit 16).
    pub const BUSINESS_ID_SHIFT: u64 = Self::DATA_CENTER_ID_SHIFT + Self::DATA_CENTER_ID_BITS;

    /// Number of bits to shift the timestamp to its correct position
    /// (bit 18).
    pub const TIMESTAMP_SHIFT: u64 = Self::BUSINESS_ID_SHIFT + Self::BUSINESS_ID_BITS;

    /// Bitmask for extracting the 46-bit timestamp field.
    pub const TIMESTAMP_MASK: u64 = (1 << Self::TIMESTAMP_BITS) - 1;

    /// Bitmask for extracting the 2-bit business line ID field.
    pub const BUSINESS_ID_MASK: u64 = (1 << Self::BUSINESS_ID_BITS) - 1;

    /// Bitmask for extracting the 2-bit data center ID field.
    pub const DATA_CENTER_ID_MASK: u64 = (1 << Self::DATA_CENTER_ID_BITS) - 1;

    /// Bitmask for extracting the 2-bit machine ID field.
    pub const MACHINE_ID_MASK: u64 = (1 << Self::MACHINE_ID_BITS) - 1;

    /// Bitmask for extracting the 12-bit sequence field.
    pub const SEQUENCE_MASK: u64 = (1 << Self::SEQUENCE_BITS) - 1;

    pub const fn from_parts(
        timestamp: u64,
        business_id: u64,
        data_center_id: u64,
        machine_id: u64,
        sequence: u64,
    ) -> Self {
        let timestamp = (timestamp & Self::TIMESTAMP_MASK) << Self::TIMESTAMP_SHIFT;
        let business_id = (business_id & Self::BUSINESS_ID_MASK) << Self::BUSINESS_ID_SHIFT;
        let data_center_id =
            (data_center_id & Self::DATA_CENTER_ID_MASK) << Self::DATA_CENTER_ID_SHIFT;
        let machine_id = (machine_id & Self::MACHINE_ID_MASK) << Self::MACHINE_ID_SHIFT;
        let sequence = (sequence & Self::SEQUENCE_MASK) << Self::SEQUENCE_SHIFT;
        Self {
            id: timestamp | business_id | data_center_id | machine_id | sequence,
        }
    }

    /// Constructs a new ID from its components, asserting field bounds in
    /// debug builds.
    pub fn from_components(
        timestamp: u64,
        business_id: u64,
        data_center_id: u64,
        machine_id: u64,
        sequence: u64,
    ) -> Self {
        debug_assert!(timestamp <= Self::TIMESTAMP_MASK, "timestamp overflow");
        debug_assert!(business_id <= Self::BUSINESS_ID_MASK, "business_id overflow");
        debug_assert!(
            data_center_id <= Self::DATA_CENTER_ID_MASK,
            "data_center_id overflow"
        );
        debug_assert!(machine_id <= Self::MACHINE_ID_MASK, "machine_id overflow");
        debug_assert!(sequence <= Self::SEQUENCE_MASK, "sequence overflow");
        Self::from_parts(timestamp, business_id, data_center_id, machine_id, sequence)
    }

    /// Extracts the timestamp from the packed ID.
    pub const fn timestamp(&self) -> u64 {
        (self.id >> Self::TIMESTAMP_SHIFT) & Self::TIMESTAMP_MASK
    }

    /// Extracts the business line ID from the packed ID.
    pub const fn business_id(&self) -> u64 {
        (self.id >> Self::BUSINESS_ID_SHIFT) & Self::BUSINESS_ID_MASK
    }

    /// Extracts the data center ID from the packed ID.
    pub const fn data_center_id(&self) -> u64 {
        (self.id >> Self::DATA_CENTER_ID_SHIFT) & Self::DATA_CENTER_ID_MASK
    }

    /// Extracts the machine ID from the packed ID.
    pub const fn machine_id(&self) -> u64 {
        (self.id >> Self::MACHINE_ID_SHIFT) & Self::MACHINE_ID_MASK
    }

    /// Extracts the sequence number from the packed ID.
    pub const fn sequence(&self) -> u64 {
        (self.id >> Self::SEQUENCE_SHIFT) & Self::SEQUENCE_MASK
    }

    /// Returns the maximum representable timestamp value.
    pub const fn max_timestamp() -> u64 {
        Self::TIMESTAMP_MASK
    }

    /// Returns the maximum representable business line ID.
    pub const fn max_business_id() -> u64 {
        Self::BUSINESS_ID_MASK
    }

    /// Returns the maximum representable data center ID.
    pub const fn max_data_center_id() -> u64 {
        Self::DATA_CENTER_ID_MASK
    }

    /// Returns the maximum representable machine ID.
    pub const fn max_machine_id() -> u64 {
        Self::MACHINE_ID_MASK
    }

    /// Returns the maximum representable sequence value.
    pub const fn max_sequence() -> u64 {
        Self::SEQUENCE_MASK
    }

    /// Returns true if the current sequence value can be incremented without
    /// wrapping.
    pub const fn has_sequence_room(&self) -> bool {
        self.sequence() < Self::max_sequence()
    }

    /// Returns a new ID with the sequence incremented and every other field
    /// unchanged.
    pub fn increment_sequence(&self) -> Self {
        Self::from_components(
            self.timestamp(),
            self.business_id(),
            self.data_center_id(),
            self.machine_id(),
            self.sequence() + 1,
        )
    }

    /// Returns a new ID for a newer timestamp with the sequence reset to
    /// zero.
    pub fn rollover_to_timestamp(&self, ts: u64) -> Self {
        Self::from_components(
            ts,
            self.business_id(),
            self.data_center_id(),
            self.machine_id(),
            0,
        )
    }

    /// Converts this ID into its raw integer representation.
    pub const fn to_raw(&self) -> u64 {
        self.id
    }

    /// Converts a raw integer into an ID.
    pub const fn from_raw(raw: u64) -> Self {
        Self { id: raw }
    }

    /// Returns the ID as a zero-padded 20-digit string.
    pub fn to_padded_string(&self) -> String {
        format!("{:020}", self.id)
    }
}

impl fmt::Display for SnowlineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl fmt::Debug for SnowlineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnowlineId")
            .field("id", &self.id)
            .field("timestamp", &self.timestamp())
            .field("business_id", &self.business_id())
            .field("data_center_id", &self.data_center_id())
            .field("machine_id", &self.machine_id())
            .field("sequence", &self.sequence())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_and_bounds_roundtrip() {
        let ts = SnowlineId::max_timestamp();
        let buss = SnowlineId::max_business_id();
        let dc = SnowlineId::max_data_center_id();
        let mid = SnowlineId::max_machine_id();
        let seq = SnowlineId::max_sequence();

        let id = SnowlineId::from_parts(ts, buss, dc, mid, seq);
        assert_eq!(id.timestamp(), ts);
        assert_eq!(id.business_id(), buss);
        assert_eq!(id.data_center_id(), dc);
        assert_eq!(id.machine_id(), mid);
        assert_eq!(id.sequence(), seq);
        assert_eq!(SnowlineId::from_components(ts, buss, dc, mid, seq), id);
        assert_eq!(id.to_raw(), u64::MAX);
    }

    #[test]
    fn low_bit_fields() {
        let id = SnowlineId::from_parts(0, 0, 0, 0, 0);
        assert_eq!(id.to_raw(), 0);

        let id = SnowlineId::from_parts(1, 1, 1, 1, 1);
        assert_eq!(id.timestamp(), 1);
        assert_eq!(id.business_id(), 1);
        assert_eq!(id.data_center_id(), 1);
        assert_eq!(id.machine_id(), 1);
        assert_eq!(id.sequence(), 1);
    }

    #[test]
    fn shift_layout_matches_field_widths() {
        assert_eq!(SnowlineId::SEQUENCE_SHIFT, 0);
        assert_eq!(SnowlineId::MACHINE_ID_SHIFT, 12);
        assert_eq!(SnowlineId::DATA_CENTER_ID_SHIFT, 14);
        assert_eq!(SnowlineId::BUSINESS_ID_SHIFT, 16);
        assert_eq!(SnowlineId::TIMESTAMP_SHIFT, 18);
    }

    #[test]
    fn ordering_follows_timestamp_then_sequence() {
        let a = SnowlineId::from_parts(10, 1, 1, 1, 5);
        let b = SnowlineId::from_parts(10, 1, 1, 1, 6);
        let c = SnowlineId::from_parts(11, 1, 1, 1, 0);
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn increment_preserves_origin_fields() {
        let id = SnowlineId::from_parts(7, 2, 3, 1, 40);
        let next = id.increment_sequence();
        assert_eq!(next.sequence(), 41);
        assert_eq!(next.timestamp(), 7);
        assert_eq!(next.business_id(), 2);
        assert_eq!(next.data_center_id(), 3);
        assert_eq!(next.machine_id(), 1);

        let rolled = id.rollover_to_timestamp(8);
        assert_eq!(rolled.sequence(), 0);
        assert_eq!(rolled.timestamp(), 8);
        assert_eq!(rolled.business_id(), 2);
    }

    #[test]
    fn padded_string_is_fixed_width() {
        let id = SnowlineId::from_parts(1, 1, 1, 1, 1);
        assert_eq!(id.to_padded_string().len(), 20);
    }

    #[test]
    #[should_panic(expected = "timestamp overflow")]
    fn timestamp_overflow_panics() {
        let ts = SnowlineId::max_timestamp() + 1;
        SnowlineId::from_components(ts, 0, 0, 0, 0);
    }

    #[test]
    #[should_panic(expected = "business_id overflow")]
    fn business_id_overflow_panics() {
        let buss = SnowlineId::max_business_id() + 1;
        SnowlineId::from_components(0, buss, 0, 0, 0);
    }

    #[test]
    #[should_panic(expected = "data_center_id overflow")]
    fn data_center_id_overflow_panics() {
        let dc = SnowlineId::max_data_center_id() + 1;
        SnowlineId::from_components(0, 0, dc, 0, 0);
    }

    #[test]
    #[should_panic(expected = "machine_id overflow")]
    fn machine_id_overflow_panics() {
        let mid = SnowlineId::max_machine_id() + 1;
        SnowlineId::from_components(0, 0, 0, mid, 0);
    }

    #[test]
    #[should_panic(expected = "sequence overflow")]
    fn sequence_overflow_panics() {
        let seq = SnowlineId::max_sequence() + 1;
        SnowlineId::from_components(0, 0, 0, 0, seq);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_roundtrips_as_native_integer() {
        let id = SnowlineId::from_parts(42, 1, 2, 3, 9);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, id.to_raw().to_string());
        let back: SnowlineId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
