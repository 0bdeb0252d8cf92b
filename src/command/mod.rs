//! Control-plane command codecs
//!
//! Each command is a flyweight over a region. Fixed fields sit at static,
//! 4-byte aligned offsets; variable-length fields follow them and are located
//! from the length prefixes already in the region.

mod publication_ready;

pub use publication_ready::{
    CHANNEL_OFFSET, CORRELATION_ID_OFFSET, FIXED_FIELDS_LENGTH, MTU_LENGTH_OFFSET,
    POSITION_INDICATOR_OFFSET_OFFSET, PublicationBuffersReady, PublicationBuffersReadyData,
    SESSION_ID_OFFSET, STREAM_ID_OFFSET,
};
