//! Flyweight view over a byte region
//!
//! A [`Flyweight`] overlays typed accessors onto a region at a base offset
//! without copying. Field offsets passed to it are local to the base.
//!
//! # Length-Prefixed Strings
//!
//! ```text
//! +---------------------------+---------------------------+
//! |     Length (i32, native)  |   Bytes (Length bytes)  ...
//! +---------------------------+---------------------------+
//! ```
//!
//! No terminator and no padding follow the bytes.

use tracing::{debug, trace};

use super::{Error, Primitive, Region, RegionMut, Result};

/// Size of the length prefix in front of every variable-length field
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Non-owning view bound to a region at a base offset
#[derive(Debug, Clone, Copy)]
pub struct Flyweight<B> {
    buffer: B,
    offset: usize,
}

impl<B: Region> Flyweight<B> {
    /// Bind a view to `buffer` at `offset`
    ///
    /// Fails with [`Error::OutOfBounds`] when no byte is addressable at
    /// `offset`. Individual accesses are checked again against the region.
    pub fn bind(buffer: B, offset: usize) -> Result<Self> {
        let capacity = buffer.capacity();
        if offset >= capacity {
            return Err(Error::OutOfBounds {
                index: offset,
                len: 1,
                capacity,
            });
        }

        trace!(offset, capacity, "flyweight bound");
        Ok(Self { buffer, offset })
    }

    /// Base offset within the region
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Underlying region
    #[must_use]
    pub const fn buffer(&self) -> &B {
        &self.buffer
    }

    /// Release the region
    pub fn into_inner(self) -> B {
        self.buffer
    }

    /// Read a fixed-width field at `local` offset
    #[inline]
    pub fn get<T: Primitive>(&self, local: usize) -> Result<T> {
        self.buffer.get_fixed(self.index(local)?)
    }

    /// Read only the length prefix of the string field at `local`
    pub fn string_length(&self, local: usize) -> Result<usize> {
        let index = self.index(local)?;
        let length: i32 = self.buffer.get_fixed(index)?;

        usize::try_from(length).map_err(|_| {
            debug!(index, length, "negative length prefix");
            Error::InvalidLength {
                index,
                length: i64::from(length),
                capacity: self.buffer.capacity(),
            }
        })
    }

    /// Borrow the content of the string field at `local` without copying
    pub fn get_string_bytes(&self, local: usize) -> Result<&[u8]> {
        let index = self.index(local)?;
        let length = self.string_length(local)?;

        // The prefix was readable, so index + 4 cannot overflow.
        self.buffer
            .get_bytes(index + LENGTH_PREFIX_SIZE, length)
            .map_err(|_| {
                let capacity = self.buffer.capacity();
                debug!(index, length, capacity, "length prefix runs past region");
                Error::InvalidLength {
                    index,
                    length: i64::try_from(length).unwrap_or(i64::MAX),
                    capacity,
                }
            })
    }

    /// Decode the string field at `local`
    pub fn get_string(&self, local: usize) -> Result<String> {
        let bytes = self.get_string_bytes(local)?;
        Ok(std::str::from_utf8(bytes)?.to_owned())
    }

    /// Hex dump of `len` bytes from the base offset
    #[cfg(feature = "debug-tools")]
    pub fn dump(&self, len: usize) -> Result<String> {
        use std::fmt::Write;

        let bytes = self.buffer.get_bytes(self.offset, len)?;
        let mut out = String::with_capacity(len * 3);
        for (i, chunk) in bytes.chunks(16).enumerate() {
            let _ = write!(out, "{:08x}:", i * 16);
            for b in chunk {
                let _ = write!(out, " {b:02x}");
            }
            out.push('\n');
        }
        Ok(out)
    }

    fn index(&self, local: usize) -> Result<usize> {
        self.offset
            .checked_add(local)
            .ok_or_else(|| Error::OutOfBounds {
                index: self.offset,
                len: local,
                capacity: self.buffer.capacity(),
            })
    }
}

impl<B: RegionMut> Flyweight<B> {
    /// Write a fixed-width field at `local` offset
    #[inline]
    pub fn put<T: Primitive>(&mut self, local: usize, value: T) -> Result<()> {
        let index = self.index(local)?;
        self.buffer.put_fixed(index, value)
    }

    /// Write a UTF-8 string field at `local`
    pub fn put_string(&mut self, local: usize, value: &str) -> Result<()> {
        self.put_string_bytes(local, value.as_bytes())
    }

    /// Write a raw byte string field at `local`
    ///
    /// Nothing is written unless the prefix and the content both fit.
    pub fn put_string_bytes(&mut self, local: usize, value: &[u8]) -> Result<()> {
        let index = self.index(local)?;
        let length = i32::try_from(value.len()).map_err(|_| Error::InvalidLength {
            index,
            length: i64::try_from(value.len()).unwrap_or(i64::MAX),
            capacity: self.buffer.capacity(),
        })?;

        self.buffer.bounds(index, LENGTH_PREFIX_SIZE + value.len())?;
        self.buffer.put_fixed(index, length)?;
        self.buffer.put_bytes(index + LENGTH_PREFIX_SIZE, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_at_capacity_rejected() {
        let region = [0u8; 16];
        let result = Flyweight::bind(&region[..], 16);

        assert_eq!(
            result.unwrap_err(),
            Error::OutOfBounds {
                index: 16,
                len: 1,
                capacity: 16,
            }
        );
    }

    #[test]
    fn test_fixed_fields_relative_to_base() {
        let mut region = [0u8; 32];
        let mut view = Flyweight::bind(&mut region[..], 8).unwrap();

        view.put(0, 7_i64).unwrap();
        view.put(8, -1_i32).unwrap();

        assert_eq!(view.get::<i64>(0).unwrap(), 7);
        assert_eq!(view.get::<i32>(8).unwrap(), -1);
        assert_eq!(&region[8..16], &7_i64.to_ne_bytes());
        assert!(region[..8].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_string_layout() {
        let mut region = vec![0u8; 32];
        let mut view = Flyweight::bind(&mut region, 0).unwrap();
        view.put_string(4, "abc").unwrap();

        assert_eq!(view.string_length(4).unwrap(), 3);
        assert_eq!(view.get_string(4).unwrap(), "abc");
        assert_eq!(&region[4..8], &3_i32.to_ne_bytes());
        assert_eq!(&region[8..11], b"abc");
        assert_eq!(region[11], 0);
    }

    #[test]
    fn test_empty_string() {
        let mut region = [0xFFu8; 8];
        let mut view = Flyweight::bind(&mut region[..], 0).unwrap();
        view.put_string(0, "").unwrap();

        assert_eq!(view.string_length(0).unwrap(), 0);
        assert_eq!(view.get_string(0).unwrap(), "");
        assert_eq!(region[4], 0xFF);
    }

    #[test]
    fn test_negative_length_prefix() {
        let mut region = [0u8; 16];
        region[..4].copy_from_slice(&(-5_i32).to_ne_bytes());
        let view = Flyweight::bind(&region[..], 0).unwrap();

        assert!(matches!(
            view.string_length(0),
            Err(Error::InvalidLength { length: -5, .. })
        ));
        assert!(matches!(
            view.get_string(0),
            Err(Error::InvalidLength { length: -5, .. })
        ));
    }

    #[test]
    fn test_length_prefix_past_capacity() {
        let mut region = [0u8; 16];
        region[..4].copy_from_slice(&100_i32.to_ne_bytes());
        let view = Flyweight::bind(&region[..], 0).unwrap();

        assert_eq!(view.string_length(0).unwrap(), 100);
        assert_eq!(
            view.get_string_bytes(0).unwrap_err(),
            Error::InvalidLength {
                index: 0,
                length: 100,
                capacity: 16,
            }
        );
    }

    #[test]
    fn test_string_that_does_not_fit_leaves_region_untouched() {
        let mut region = [0u8; 8];
        let mut view = Flyweight::bind(&mut region[..], 0).unwrap();

        assert!(matches!(
            view.put_string(0, "too long"),
            Err(Error::OutOfBounds { .. })
        ));
        assert_eq!(region, [0u8; 8]);
    }

    #[test]
    fn test_non_utf8_content() {
        let mut region = [0u8; 8];
        let mut view = Flyweight::bind(&mut region[..], 0).unwrap();
        view.put_string_bytes(0, &[0xC3, 0x28]).unwrap();

        assert_eq!(view.get_string_bytes(0).unwrap(), &[0xC3, 0x28]);
        assert!(matches!(view.get_string(0), Err(Error::InvalidUtf8(_))));
    }

    #[test]
    fn test_local_offset_past_end() {
        let region = [0u8; 8];
        let view = Flyweight::bind(&region[..], 4).unwrap();

        assert!(matches!(view.get::<i64>(0), Err(Error::OutOfBounds { .. })));
        assert!(matches!(
            view.string_length(usize::MAX),
            Err(Error::OutOfBounds { .. })
        ));
    }

    #[cfg(feature = "debug-tools")]
    #[test]
    fn test_dump() {
        let region = [0xABu8; 4];
        let view = Flyweight::bind(&region[..], 0).unwrap();
        assert_eq!(view.dump(4).unwrap(), "00000000: ab ab ab ab\n");
    }
}
