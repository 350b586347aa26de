//! Definition of plain old data values that can be logged as raw bytes.

/// Fixed sized type with compile time known layout, size and alignment.
///
/// Lets a channel append the in-memory representation of a value without
/// formatting or copying it anywhere first. You probably don't want to
/// handwrite these yourself, enable the feature of the crate you already use.
pub trait Record: Sized {
    /// Zero copy transmute from record to bytes.
    ///
    /// # Arguments
    ///
    /// * `record` - Record to transmute.
    fn to_bytes(record: &Self) -> &[u8];

    /// Zero copy transmute from record slice to bytes.
    ///
    /// # Arguments
    ///
    /// * `records` - Record slice to transmute.
    fn to_bytes_slice(records: &[Self]) -> &[u8];
}

// There will be conflicting implementations if both features are enabled.
#[cfg(all(feature = "zerocopy", feature = "bytemuck"))]
compile_error!("Either zerocopy or bytemuck feature can to be enabled, not both");

#[cfg(all(feature = "bytemuck", not(feature = "zerocopy")))]
use bytemuck::{NoUninit, bytes_of, must_cast_slice};

#[cfg(all(feature = "bytemuck", not(feature = "zerocopy")))]
impl<T: NoUninit> Record for T {
    #[inline]
    fn to_bytes(record: &Self) -> &[u8] {
        bytes_of(record)
    }

    #[inline]
    fn to_bytes_slice(records: &[Self]) -> &[u8] {
        must_cast_slice(records)
    }
}

#[cfg(all(feature = "zerocopy", not(feature = "bytemuck")))]
use zerocopy::{Immutable, IntoBytes};

#[cfg(all(feature = "zerocopy", not(feature = "bytemuck")))]
impl<T: IntoBytes + Immutable> Record for T {
    #[inline]
    fn to_bytes(record: &Self) -> &[u8] {
        record.as_bytes()
    }

    #[inline]
    fn to_bytes_slice(records: &[Self]) -> &[u8] {
        records.as_bytes()
    }
}

#[cfg(test)]
#[cfg(feature = "zerocopy")]
mod tests {
    use super::*;
    use bolero::{TypeGenerator, check};
    use zerocopy::{FromBytes, KnownLayout};

    #[repr(C)]
    #[derive(
        Debug,
        Clone,
        Copy,
        PartialEq,
        Eq,
        TypeGenerator,
        IntoBytes,
        FromBytes,
        KnownLayout,
        Immutable,
    )]
    struct Sample {
        seq_no: u64,
        data: [u8; 16],
    }

    #[test]
    fn slice_bytes_are_concatenated_records() {
        check!().with_type::<Vec<Sample>>().for_each(|records| {
            let bytes = Sample::to_bytes_slice(records);
            assert_eq!(size_of::<Sample>() * records.len(), bytes.len());

            for (record, chunk) in records.iter().zip(bytes.chunks(size_of::<Sample>())) {
                assert_eq!(Sample::to_bytes(record), chunk);
            }
        });
    }
}
