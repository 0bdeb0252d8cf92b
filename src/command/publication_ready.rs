//! Publication buffers ready command
//!
//! Sent to a client once the buffers backing a new publication are in place.

use bytes::Bytes;

use crate::buffer::{Flyweight, LENGTH_PREFIX_SIZE, Region, RegionMut, Result};
use crate::transport::CommandSink;

/// Offset of the correlation ID (i64)
pub const CORRELATION_ID_OFFSET: usize = 0;

/// Offset of the session ID (i32)
pub const SESSION_ID_OFFSET: usize = 8;

/// Offset of the stream ID (i32)
pub const STREAM_ID_OFFSET: usize = 12;

/// Offset of the position indicator offset (i32)
pub const POSITION_INDICATOR_OFFSET_OFFSET: usize = 16;

/// Offset of the MTU length (i32)
pub const MTU_LENGTH_OFFSET: usize = 20;

/// Offset of the channel length prefix
pub const CHANNEL_OFFSET: usize = 24;

/// Bytes taken by the fixed fields ahead of the channel
pub const FIXED_FIELDS_LENGTH: usize = CHANNEL_OFFSET;

/// Flyweight codec for the publication buffers ready command
///
/// # Wire Format
///
/// ```text
/// 0                   1                   2                   3
/// 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                                                               |
/// +                      Correlation ID (8)                       +
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                         Session ID (4)                        |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                         Stream ID (4)                         |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                 Position Indicator Offset (4)                 |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                         MTU Length (4)                        |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                       Channel Length (4)                      |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                            Channel                          ...
/// ...                                                             |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                    Log File Name Length (4)                   |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                         Log File Name                       ...
/// ...                                                             |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// The log file name starts right after the channel bytes, so its offset is
/// derived from the channel length prefix on every access. Fields may be
/// written in any order.
#[derive(Debug, Clone, Copy)]
pub struct PublicationBuffersReady<B> {
    flyweight: Flyweight<B>,
}

impl<B: Region> PublicationBuffersReady<B> {
    /// Bind the codec to `buffer` at `offset`
    pub fn bind(buffer: B, offset: usize) -> Result<Self> {
        Ok(Self {
            flyweight: Flyweight::bind(buffer, offset)?,
        })
    }

    /// Underlying flyweight
    #[must_use]
    pub const fn flyweight(&self) -> &Flyweight<B> {
        &self.flyweight
    }

    /// Release the region
    pub fn into_inner(self) -> B {
        self.flyweight.into_inner()
    }

    /// Get correlation ID
    pub fn correlation_id(&self) -> Result<i64> {
        self.flyweight.get(CORRELATION_ID_OFFSET)
    }

    /// Get session ID
    pub fn session_id(&self) -> Result<i32> {
        self.flyweight.get(SESSION_ID_OFFSET)
    }

    /// Get stream ID
    pub fn stream_id(&self) -> Result<i32> {
        self.flyweight.get(STREAM_ID_OFFSET)
    }

    /// Get position indicator offset
    pub fn position_indicator_offset(&self) -> Result<i32> {
        self.flyweight.get(POSITION_INDICATOR_OFFSET_OFFSET)
    }

    /// Get MTU length
    pub fn mtu_length(&self) -> Result<i32> {
        self.flyweight.get(MTU_LENGTH_OFFSET)
    }

    /// Get channel
    pub fn channel(&self) -> Result<String> {
        self.flyweight.get_string(CHANNEL_OFFSET)
    }

    /// Borrow the raw channel bytes
    pub fn channel_bytes(&self) -> Result<&[u8]> {
        self.flyweight.get_string_bytes(CHANNEL_OFFSET)
    }

    /// Get log file name
    pub fn log_file_name(&self) -> Result<String> {
        self.flyweight.get_string(self.log_file_name_offset()?)
    }

    /// Borrow the raw log file name bytes
    pub fn log_file_name_bytes(&self) -> Result<&[u8]> {
        self.flyweight.get_string_bytes(self.log_file_name_offset()?)
    }

    /// Total encoded length in bytes, from the base offset through the last
    /// byte of the log file name
    ///
    /// Call once every field is written; this is the exact byte count to
    /// hand to the transport.
    pub fn length(&self) -> Result<usize> {
        let offset = self.log_file_name_offset()?;
        let content = self.flyweight.get_string_bytes(offset)?;
        Ok(offset + LENGTH_PREFIX_SIZE + content.len())
    }

    /// Copy exactly [`length`](Self::length) bytes out of the region
    pub fn encoded_bytes(&self) -> Result<Bytes> {
        let length = self.length()?;
        let bytes = self
            .flyweight
            .buffer()
            .get_bytes(self.flyweight.offset(), length)?;
        Ok(Bytes::copy_from_slice(bytes))
    }

    /// Hand the encoded message to `sink`, returning the byte count submitted
    pub fn submit<S: CommandSink + ?Sized>(&self, sink: &mut S) -> Result<usize> {
        let length = self.length()?;
        sink.submit(self.flyweight.buffer().raw(), self.flyweight.offset(), length)?;
        Ok(length)
    }

    fn log_file_name_offset(&self) -> Result<usize> {
        // Bounds-checks the channel content, so a corrupt prefix surfaces as
        // InvalidLength rather than an access at a garbage offset.
        let channel = self.flyweight.get_string_bytes(CHANNEL_OFFSET)?;
        Ok(CHANNEL_OFFSET + LENGTH_PREFIX_SIZE + channel.len())
    }
}

impl<B: RegionMut> PublicationBuffersReady<B> {
    /// Set correlation ID
    pub fn set_correlation_id(&mut self, value: i64) -> Result<&mut Self> {
        self.flyweight.put(CORRELATION_ID_OFFSET, value)?;
        Ok(self)
    }

    /// Set session ID
    pub fn set_session_id(&mut self, value: i32) -> Result<&mut Self> {
        self.flyweight.put(SESSION_ID_OFFSET, value)?;
        Ok(self)
    }

    /// Set stream ID
    pub fn set_stream_id(&mut self, value: i32) -> Result<&mut Self> {
        self.flyweight.put(STREAM_ID_OFFSET, value)?;
        Ok(self)
    }

    /// Set position indicator offset
    pub fn set_position_indicator_offset(&mut self, value: i32) -> Result<&mut Self> {
        self.flyweight.put(POSITION_INDICATOR_OFFSET_OFFSET, value)?;
        Ok(self)
    }

    /// Set MTU length
    pub fn set_mtu_length(&mut self, value: i32) -> Result<&mut Self> {
        self.flyweight.put(MTU_LENGTH_OFFSET, value)?;
        Ok(self)
    }

    /// Set channel
    ///
    /// Changing the channel length moves the log file name. Rewrite the log
    /// file name afterwards if it was already set.
    pub fn set_channel(&mut self, value: &str) -> Result<&mut Self> {
        self.flyweight.put_string(CHANNEL_OFFSET, value)?;
        Ok(self)
    }

    /// Set log file name at the offset implied by the current channel
    pub fn set_log_file_name(&mut self, value: &str) -> Result<&mut Self> {
        let offset = self.log_file_name_offset()?;
        self.flyweight.put_string(offset, value)?;
        Ok(self)
    }
}

/// Owned, decoded copy of a publication buffers ready command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PublicationBuffersReadyData {
    /// Correlation ID of the request being answered
    pub correlation_id: i64,
    /// Session ID
    pub session_id: i32,
    /// Stream ID
    pub stream_id: i32,
    /// Offset of the position indicator
    pub position_indicator_offset: i32,
    /// MTU length
    pub mtu_length: i32,
    /// Channel URI
    pub channel: String,
    /// Log file backing the publication
    pub log_file_name: String,
}

impl PublicationBuffersReadyData {
    /// Decode every field from a bound view
    pub fn decode<B: Region>(view: &PublicationBuffersReady<B>) -> Result<Self> {
        Ok(Self {
            correlation_id: view.correlation_id()?,
            session_id: view.session_id()?,
            stream_id: view.stream_id()?,
            position_indicator_offset: view.position_indicator_offset()?,
            mtu_length: view.mtu_length()?,
            channel: view.channel()?,
            log_file_name: view.log_file_name()?,
        })
    }

    /// Write every field into a bound view, returning the encoded length
    pub fn encode_into<B: RegionMut>(
        &self,
        view: &mut PublicationBuffersReady<B>,
    ) -> Result<usize> {
        view.set_correlation_id(self.correlation_id)?
            .set_session_id(self.session_id)?
            .set_stream_id(self.stream_id)?
            .set_position_indicator_offset(self.position_indicator_offset)?
            .set_mtu_length(self.mtu_length)?
            .set_channel(&self.channel)?
            .set_log_file_name(&self.log_file_name)?;
        view.length()
    }

    /// Number of bytes [`encode_into`](Self::encode_into) writes
    #[must_use]
    pub fn encoded_length(&self) -> usize {
        CHANNEL_OFFSET
            + LENGTH_PREFIX_SIZE
            + self.channel.len()
            + LENGTH_PREFIX_SIZE
            + self.log_file_name.len()
    }
}
