//! Zero-copy flyweight codecs for control-plane commands
//!
//! A client and the transport process backing it exchange commands through a
//! shared memory region. Both sides must agree on the layout byte for byte,
//! whatever language they are written in. This library overlays typed views
//! directly onto those bytes instead of serializing into separate buffers.
//!
//! # Quick Start
//!
//! ```rust
//! use shm_command::PublicationBuffersReady;
//!
//! let mut region = vec![0u8; 256];
//!
//! // Producer: fill in fields in any order
//! let mut command = PublicationBuffersReady::bind(&mut region, 0)?;
//! command
//!     .set_correlation_id(42)?
//!     .set_session_id(7)?
//!     .set_channel("aeron:udp?endpoint=localhost:40123")?
//!     .set_log_file_name("/dev/shm/aeron/pub-7-3.log")?;
//! let length = command.length()?;
//!
//! // Consumer: bind a read-only view to the same bytes
//! let received = PublicationBuffersReady::bind(&region[..length], 0)?;
//! assert_eq!(received.session_id()?, 7);
//! assert_eq!(received.log_file_name()?, "/dev/shm/aeron/pub-7-3.log");
//! # Ok::<(), shm_command::Error>(())
//! ```
//!
//! # Features
//!
//! - **Zero-copy views** - Flyweights borrow any `AsRef<[u8]>` region
//! - **Bounds-checked access** - Every read and write is checked against the region
//! - **Native byte order** - Peers on one host share the integer layout
//! - **Order-independent setters** - Variable-length fields are located from
//!   the length prefixes already written

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod buffer;
pub mod command;
pub mod transport;

pub use buffer::{Error, Flyweight, LENGTH_PREFIX_SIZE, Primitive, Region, RegionMut, Result};
pub use command::{PublicationBuffersReady, PublicationBuffersReadyData};
pub use transport::{CommandQueue, CommandSink};
