//! One flag type per semantic kind.
use std::time::Duration;

use crate::api::definition::Definition;
use crate::convert::{Custom, Settable, Single, Slice, Time};

/// A `String` flag.
pub type StringFlag<'a> = Definition<'a, Single<String>>;
/// An `isize` flag.
pub type IntFlag<'a> = Definition<'a, Single<isize>>;
/// An `i64` flag.
pub type Int64Flag<'a> = Definition<'a, Single<i64>>;
/// A `usize` flag.
pub type UintFlag<'a> = Definition<'a, Single<usize>>;
/// A `u64` flag.
pub type Uint64Flag<'a> = Definition<'a, Single<u64>>;
/// An `f64` flag.
pub type Float64Flag<'a> = Definition<'a, Single<f64>>;
/// A `bool` flag, supplied as a switch (`--verbose`) or with an explicit value (`--verbose=false`).
pub type BoolFlag<'a> = Definition<'a, Single<bool>>;
/// A `Duration` flag, such as `1h30m`.
pub type DurationFlag<'a> = Definition<'a, Single<Duration>>;
/// A [`Time`] flag, converted through the configured time layouts.
pub type TimeFlag<'a> = Definition<'a, Single<Time>>;

/// A `Vec<String>` flag.
pub type StringSliceFlag<'a> = Definition<'a, Slice<String>>;
/// A `Vec<isize>` flag.
pub type IntSliceFlag<'a> = Definition<'a, Slice<isize>>;
/// A `Vec<i64>` flag.
pub type Int64SliceFlag<'a> = Definition<'a, Slice<i64>>;
/// A `Vec<usize>` flag.
pub type UintSliceFlag<'a> = Definition<'a, Slice<usize>>;
/// A `Vec<u64>` flag.
pub type Uint64SliceFlag<'a> = Definition<'a, Slice<u64>>;
/// A `Vec<f64>` flag.
pub type Float64SliceFlag<'a> = Definition<'a, Slice<f64>>;
/// A `Vec<bool>` flag.
pub type BoolSliceFlag<'a> = Definition<'a, Slice<bool>>;
/// A `Vec<Duration>` flag.
pub type DurationSliceFlag<'a> = Definition<'a, Slice<Duration>>;
/// A `Vec<Time>` flag.
pub type TimeSliceFlag<'a> = Definition<'a, Slice<Time>>;

/// A flag of a caller-defined type `T`, set from strings through its [`Generic`](crate::prelude::Generic) implementation.
pub type GenericFlag<'a, T> = Definition<'a, Settable<T>>;
/// A flag of a caller-defined type `T` that only has a converter at runtime.
///
/// `T` must have a converter registered in the [`Conversions`](crate::Conversions) of the flag set, or applying the flag fails.
pub type CustomFlag<'a, T> = Definition<'a, Custom<T>>;
