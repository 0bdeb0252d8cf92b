//! Byte regions with bounds-checked primitive access
//!
//! A region is any externally owned span of bytes: a slice over a mapped
//! shared memory segment, a `Vec<u8>`, a `BytesMut`. The traits here never
//! allocate or free the bytes, they only read and write within them.
//!
//! Integers use the host's native byte order. Every access copies through a
//! fixed-size array, so unaligned offsets are always safe.

use std::ops::Range;

use super::{Error, Result};

mod sealed {
    pub trait Sealed {}
}

/// Fixed-width integer that can be stored in a region
///
/// Sealed: the wire format only admits the integer widths implemented here.
pub trait Primitive: sealed::Sealed + Copy {
    /// Encoded width in bytes
    const WIDTH: usize;

    /// Decode from exactly `WIDTH` native-endian bytes
    fn read_ne(bytes: &[u8]) -> Self;

    /// Encode into exactly `WIDTH` native-endian bytes
    fn write_ne(self, bytes: &mut [u8]);
}

macro_rules! impl_primitive {
    ($($ty:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Primitive for $ty {
                const WIDTH: usize = std::mem::size_of::<$ty>();

                #[inline]
                fn read_ne(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; std::mem::size_of::<$ty>()];
                    raw.copy_from_slice(bytes);
                    <$ty>::from_ne_bytes(raw)
                }

                #[inline]
                fn write_ne(self, bytes: &mut [u8]) {
                    bytes.copy_from_slice(&self.to_ne_bytes());
                }
            }
        )*
    };
}

impl_primitive!(i8, i16, i32, i64, u8, u16, u32, u64);

/// Read access to an externally owned byte region
pub trait Region {
    /// Whole region as a byte slice
    fn raw(&self) -> &[u8];

    /// Number of addressable bytes
    #[inline]
    fn capacity(&self) -> usize {
        self.raw().len()
    }

    /// Validate that `len` bytes starting at `index` lie inside the region
    #[inline]
    fn bounds(&self, index: usize, len: usize) -> Result<Range<usize>> {
        let capacity = self.capacity();
        match index.checked_add(len) {
            Some(end) if end <= capacity => Ok(index..end),
            _ => Err(Error::OutOfBounds {
                index,
                len,
                capacity,
            }),
        }
    }

    /// Read a fixed-width integer at `index`
    #[inline]
    fn get_fixed<T: Primitive>(&self, index: usize) -> Result<T> {
        let range = self.bounds(index, T::WIDTH)?;
        Ok(T::read_ne(&self.raw()[range]))
    }

    /// Borrow `len` bytes starting at `index`
    #[inline]
    fn get_bytes(&self, index: usize, len: usize) -> Result<&[u8]> {
        let range = self.bounds(index, len)?;
        Ok(&self.raw()[range])
    }
}

/// Write access to an externally owned byte region
pub trait RegionMut: Region {
    /// Whole region as a mutable byte slice
    fn raw_mut(&mut self) -> &mut [u8];

    /// Write a fixed-width integer at `index`
    #[inline]
    fn put_fixed<T: Primitive>(&mut self, index: usize, value: T) -> Result<()> {
        let range = self.bounds(index, T::WIDTH)?;
        value.write_ne(&mut self.raw_mut()[range]);
        Ok(())
    }

    /// Copy `src` into the region starting at `index`
    #[inline]
    fn put_bytes(&mut self, index: usize, src: &[u8]) -> Result<()> {
        let range = self.bounds(index, src.len())?;
        self.raw_mut()[range].copy_from_slice(src);
        Ok(())
    }
}

impl<T: AsRef<[u8]> + ?Sized> Region for T {
    #[inline]
    fn raw(&self) -> &[u8] {
        self.as_ref()
    }
}

impl<T: AsRef<[u8]> + AsMut<[u8]> + ?Sized> RegionMut for T {
    #[inline]
    fn raw_mut(&mut self) -> &mut [u8] {
        self.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    #[test]
    fn test_primitive_widths() {
        assert_eq!(<i8 as Primitive>::WIDTH, 1);
        assert_eq!(<u16 as Primitive>::WIDTH, 2);
        assert_eq!(<i32 as Primitive>::WIDTH, 4);
        assert_eq!(<u64 as Primitive>::WIDTH, 8);
    }

    #[test]
    fn test_put_get_native_endian() {
        let mut region = [0u8; 16];
        region.put_fixed(3, -2_i32).unwrap();
        region.put_fixed(8, 0x0102_0304_0506_0708_i64).unwrap();

        assert_eq!(region.get_fixed::<i32>(3).unwrap(), -2);
        assert_eq!(region.get_fixed::<i64>(8).unwrap(), 0x0102_0304_0506_0708);
        assert_eq!(&region[8..16], &0x0102_0304_0506_0708_i64.to_ne_bytes());
    }

    #[test]
    fn test_access_past_capacity_rejected() {
        let mut region = vec![0u8; 8];

        assert_eq!(
            region.get_fixed::<i64>(1),
            Err(Error::OutOfBounds {
                index: 1,
                len: 8,
                capacity: 8,
            })
        );
        assert!(matches!(
            region.put_fixed(6, 1_i32),
            Err(Error::OutOfBounds { .. })
        ));
        assert!(region.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_index_overflow_rejected() {
        let region = [0u8; 4];
        assert!(matches!(
            region.get_bytes(usize::MAX, 2),
            Err(Error::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_bytes_mut_is_a_region() {
        let mut region = BytesMut::zeroed(12);
        region.put_bytes(4, b"abcd").unwrap();

        assert_eq!(Region::capacity(&region), 12);
        assert_eq!(region.get_bytes(4, 4).unwrap(), b"abcd");
    }

    #[test]
    fn test_empty_range_at_end_is_valid() {
        let region = [0u8; 4];
        assert_eq!(region.get_bytes(4, 0).unwrap(), b"");
    }
}
