//! Buffer view primitives
//!
//! Regions, bounds-checked primitive access, and the flyweight view that
//! message codecs are built on.

mod error;
mod flyweight;
mod region;

pub use error::{Error, Result};
pub use flyweight::{Flyweight, LENGTH_PREFIX_SIZE};
pub use region::{Primitive, Region, RegionMut};
