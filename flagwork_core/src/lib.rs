//! Core module for `flagwork`.
//! See [documentation root](https://docs.rs/flagwork/latest/flagwork/index.html) for full details.
#![deny(missing_docs)]
mod api;
mod constant;
mod convert;
mod model;
mod parser;
#[allow(missing_docs)]
pub mod prelude;

pub use api::*;
pub use convert::*;
pub use model::*;
pub use parser::{
    ConfigError, ConsoleInterface, FlagSet, ParseError, Registration, UserInterface, Value,
};

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
