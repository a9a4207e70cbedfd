mod conversions;
mod duration;
mod error;
mod scalar;
mod shape;
mod time;

pub use conversions::*;
pub use error::*;
pub use scalar::*;
pub use shape::*;
pub use time::{Time, TimeLayout};

pub(crate) use duration::{format_duration, parse_duration};
pub(crate) use time::{default_layouts, zero_time};
