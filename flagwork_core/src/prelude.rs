//! Traits which, typically, may be imported without concern: `use flagwork::prelude::*`.

pub use crate::api::Flag;

/// Behaviour for a caller-defined type to be populated from a command line string.
// Needs to be imported in order to implement a `GenericFlag` type.
pub trait Generic {
    /// Update `self` from the `input` string, returning a message describing any failure.
    fn set(&mut self, input: &str) -> Result<(), String>;
}
