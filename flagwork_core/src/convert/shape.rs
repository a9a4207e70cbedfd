use std::fmt::Display;
use std::marker::PhantomData;

use crate::constant::*;
use crate::convert::{ConversionError, Conversions, Scalar};
use crate::model::{Kind, ScalarKind};
use crate::prelude::Generic;

/// Behaviour to convert strings into an explicit value type for a flag.
///
/// We use this at the bottom of the flag object graph so the compiler can maintain each flag's type.
/// Shapes are never instantiated; see [`Single`], [`Slice`], [`Settable`] and [`Custom`].
pub trait Shape: 'static {
    /// The value held by flags of this shape.
    type Value: Clone + PartialEq + 'static;

    /// The semantic kind of this shape.
    fn kind() -> Kind;

    /// The zero value, used when neither a source nor a default supplies one.
    fn zero() -> Self::Value;

    /// Whether `value` is the zero value.
    fn is_zero(value: &Self::Value) -> bool {
        value == &Self::zero()
    }

    /// Whether repeated occurrences accumulate.
    fn is_slice() -> bool {
        false
    }

    /// Whether flags of this shape may be supplied without a value token.
    fn is_switch() -> bool {
        false
    }

    /// Whether `conversions` is able to convert into this shape.
    fn supported(_conversions: &Conversions) -> bool {
        true
    }

    /// The name of the value type, for error messages.
    fn type_name() -> &'static str {
        std::any::type_name::<Self::Value>()
    }

    /// Convert a single command line occurrence on top of the `current` value.
    fn convert_text(
        current: &Self::Value,
        input: &str,
        conversions: &Conversions,
    ) -> Result<Self::Value, ConversionError>;

    /// Convert a complete environment variable or file value.
    fn from_source(input: &str, conversions: &Conversions) -> Result<Self::Value, ConversionError> {
        Self::convert_text(&Self::zero(), input, conversions)
    }

    /// Render the value for display.
    fn stringify(value: &Self::Value) -> String;

    /// Render the declared default for help text, or `None` when there is nothing worth showing.
    fn describe_default(declared: Option<&Self::Value>) -> Option<String>;
}

/// An input to [`convert`].
#[derive(Debug, Clone, PartialEq)]
pub enum Input<'i, V> {
    /// A string, as supplied on the command line.
    Text(&'i str),
    /// An already typed value, as supplied programmatically.
    Value(V),
}

/// Produce the next value of a flag of shape `S` from its `current` value and an `input`.
///
/// A typed input replaces the current value wholesale.
/// A text input is parsed according to the shape; slices append the parsed element.
pub fn convert<S: Shape>(
    current: &S::Value,
    input: Input<'_, S::Value>,
    conversions: &Conversions,
) -> Result<S::Value, ConversionError> {
    match input {
        Input::Value(value) => Ok(value),
        Input::Text(text) => S::convert_text(current, text, conversions),
    }
}

/// A single value of a native scalar kind.
pub struct Single<T>(PhantomData<T>);

impl<T: Scalar> Shape for Single<T> {
    type Value = T;

    fn kind() -> Kind {
        Kind::Scalar(T::KIND)
    }

    fn zero() -> T {
        T::zero()
    }

    fn is_switch() -> bool {
        T::KIND == ScalarKind::Bool
    }

    fn convert_text(
        current: &T,
        input: &str,
        conversions: &Conversions,
    ) -> Result<T, ConversionError> {
        let converted = match conversions.converter::<T>() {
            Some(converter) => converter(current, input),
            None => T::parse_text(input, conversions),
        };
        converted.map_err(|cause| ConversionError::invalid(input, Self::kind(), cause))
    }

    fn stringify(value: &T) -> String {
        value.stringify()
    }

    fn describe_default(declared: Option<&T>) -> Option<String> {
        match declared {
            Some(value) => value.describe(),
            None => T::zero().describe(),
        }
    }
}

/// Zero or more values of a native scalar kind, one per occurrence.
pub struct Slice<T>(PhantomData<T>);

impl<T: Scalar> Shape for Slice<T> {
    type Value = Vec<T>;

    fn kind() -> Kind {
        Kind::Slice(T::KIND)
    }

    fn zero() -> Vec<T> {
        Vec::default()
    }

    fn is_slice() -> bool {
        true
    }

    fn convert_text(
        current: &Vec<T>,
        input: &str,
        conversions: &Conversions,
    ) -> Result<Vec<T>, ConversionError> {
        let element = Single::<T>::convert_text(&T::zero(), input, conversions)
            .map_err(|error| error.relabel(Self::kind()))?;
        let mut next = current.clone();
        next.push(element);
        Ok(next)
    }

    fn from_source(input: &str, conversions: &Conversions) -> Result<Vec<T>, ConversionError> {
        input
            .split(SLICE_SEPARATOR)
            .map(str::trim)
            .try_fold(Self::zero(), |accumulated, piece| {
                Self::convert_text(&accumulated, piece, conversions)
            })
    }

    fn stringify(value: &Vec<T>) -> String {
        value
            .iter()
            .map(Scalar::stringify)
            .collect::<Vec<String>>()
            .join(SLICE_SEPARATOR.to_string().as_str())
    }

    fn describe_default(declared: Option<&Vec<T>>) -> Option<String> {
        let parts: Vec<String> = declared
            .map(|values| values.iter().filter_map(Scalar::describe).collect())
            .unwrap_or_default();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

/// A caller-defined type, converted by the converter registered for it in [`Conversions`].
pub struct Custom<T>(PhantomData<T>);

impl<T> Shape for Custom<T>
where
    T: Clone + Default + PartialEq + Display + 'static,
{
    type Value = T;

    fn kind() -> Kind {
        Kind::Generic
    }

    fn zero() -> T {
        T::default()
    }

    fn supported(conversions: &Conversions) -> bool {
        conversions.supports::<T>()
    }

    fn convert_text(
        current: &T,
        input: &str,
        conversions: &Conversions,
    ) -> Result<T, ConversionError> {
        match conversions.converter::<T>() {
            Some(converter) => converter(current, input)
                .map_err(|cause| ConversionError::invalid(input, Self::kind(), cause)),
            None => Err(ConversionError::Unsupported {
                type_name: Self::type_name(),
            }),
        }
    }

    fn stringify(value: &T) -> String {
        value.to_string()
    }

    fn describe_default(declared: Option<&T>) -> Option<String> {
        declared
            .map(|value| value.to_string())
            .filter(|text| !text.is_empty())
    }
}

/// A caller-defined type that sets itself from a string through [`Generic`].
///
/// A converter registered for `T` in [`Conversions`] takes precedence over `Generic::set`.
pub struct Settable<T>(PhantomData<T>);

impl<T> Shape for Settable<T>
where
    T: Generic + Clone + Default + PartialEq + Display + 'static,
{
    type Value = T;

    fn kind() -> Kind {
        Kind::Generic
    }

    fn zero() -> T {
        T::default()
    }

    fn convert_text(
        current: &T,
        input: &str,
        conversions: &Conversions,
    ) -> Result<T, ConversionError> {
        let converted = match conversions.converter::<T>() {
            Some(converter) => converter(current, input),
            None => {
                let mut next = current.clone();
                next.set(input).map(|()| next)
            }
        };
        converted.map_err(|cause| ConversionError::invalid(input, Self::kind(), cause))
    }

    fn stringify(value: &T) -> String {
        value.to_string()
    }

    fn describe_default(declared: Option<&T>) -> Option<String> {
        Custom::<T>::describe_default(declared)
    }
}
