use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

use crate::convert::time::{default_layouts, Time, TimeLayout};
use crate::prelude::Generic;

pub(crate) type Converter<T> = Box<dyn Fn(&T, &str) -> Result<T, String>>;

/// The conversion configuration shared by every flag of a [`FlagSet`](crate::FlagSet).
///
/// Build it once before declaring any flags:
/// ```
/// use flagwork_core::{Conversions, FlagSet, TimeLayout};
///
/// let conversions = Conversions::default()
///     .with_time_layout(TimeLayout::format("%d/%m/%Y %H:%M"))
///     .with_from_str::<std::net::Ipv4Addr>();
/// let flag_set = FlagSet::with_conversions("program", conversions);
/// ```
pub struct Conversions {
    time_layouts: Vec<TimeLayout>,
    // Holds `Converter<T>` values, keyed by the `TypeId` of `T`.
    converters: HashMap<TypeId, Box<dyn Any>>,
}

impl std::fmt::Debug for Conversions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Conversions")
            .field("time_layouts", &self.time_layouts)
            .field("converters", &self.converters.len())
            .finish()
    }
}

impl Default for Conversions {
    fn default() -> Self {
        Self {
            time_layouts: default_layouts(),
            converters: HashMap::default(),
        }
    }
}

impl Conversions {
    /// Append a layout to try (after those already present) when converting time flags.
    pub fn with_time_layout(mut self, layout: TimeLayout) -> Self {
        self.time_layouts.push(layout);
        self
    }

    /// Replace the time layouts entirely.
    pub fn with_time_layouts(mut self, layouts: Vec<TimeLayout>) -> Self {
        self.time_layouts = layouts;
        self
    }

    /// Register the converter for values of type `T`.
    ///
    /// The converter receives the current value and the input string.
    /// For the native scalar kinds, this overrides the built in conversion.
    pub fn with_converter<T: 'static>(
        mut self,
        converter: impl Fn(&T, &str) -> Result<T, String> + 'static,
    ) -> Self {
        let converter: Converter<T> = Box::new(converter);
        self.converters
            .insert(TypeId::of::<T>(), Box::new(converter));
        self
    }

    /// Register a [`Generic`] type, which updates a copy of the current value in place.
    pub fn with_generic<T>(self) -> Self
    where
        T: Generic + Clone + 'static,
    {
        self.with_converter::<T>(|current, input| {
            let mut next = current.clone();
            next.set(input)?;
            Ok(next)
        })
    }

    /// Register a type by its `FromStr` implementation.
    pub fn with_from_str<T>(self) -> Self
    where
        T: FromStr + 'static,
        T::Err: Display,
    {
        self.with_converter::<T>(|_, input| T::from_str(input).map_err(|error| error.to_string()))
    }

    /// The time layouts, in the order they are tried.
    pub fn time_layouts(&self) -> &[TimeLayout] {
        &self.time_layouts
    }

    /// Whether a converter is registered for `T`.
    pub fn supports<T: 'static>(&self) -> bool {
        self.converter::<T>().is_some()
    }

    pub(crate) fn converter<T: 'static>(&self) -> Option<&Converter<T>> {
        self.converters
            .get(&TypeId::of::<T>())
            .and_then(|converter| converter.downcast_ref::<Converter<T>>())
    }

    pub(crate) fn parse_time(&self, input: &str) -> Result<Time, String> {
        self.time_layouts
            .iter()
            .find_map(|layout| layout.parse(input))
            .ok_or_else(|| format!("no time layout matches {input:?}"))
    }
}
