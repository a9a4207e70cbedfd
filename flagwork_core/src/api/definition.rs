use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use thiserror::Error;

use crate::api::help::{HelpEntry, Renderer};
use crate::api::source::resolve;
use crate::api::value::{GenericValue, Storage};
use crate::convert::{ConversionError, Conversions, Shape};
use crate::model::Kind;
use crate::parser::{ConfigError, FlagSet, Registration};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Failure to apply a flag to a [`FlagSet`].
#[derive(Debug, Error)]
pub enum ApplyError {
    /// The value found in the environment (or a file) does not convert.
    #[error("could not parse {input:?} as {kind} value for flag {flag}: {cause}")]
    Parse {
        /// The offending value.
        input: String,
        /// The kind of the flag.
        kind: Kind,
        /// The primary name of the flag.
        flag: String,
        /// What went wrong.
        cause: String,
    },
    /// The flag's type has no registered converter.
    #[error("flag {flag} has type {type_name}, which has no registered converter")]
    Unsupported {
        /// The primary name of the flag.
        flag: String,
        /// The name of the unsupported type.
        type_name: &'static str,
    },
    /// The flag could not be registered.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Behaviour common to every flag definition, regardless of its value type.
///
/// Flags of varying value types are handled together as `dyn Flag`.
pub trait Flag<'a> {
    /// The primary name followed by the aliases.
    fn names(&self) -> Vec<&str>;

    /// Resolve the flag's initial value, bind its storage, and register it under every name with `flag_set`.
    fn apply(&self, flag_set: &mut FlagSet<'a>) -> Result<(), ApplyError>;

    /// What the help text of this flag is rendered from.
    fn help_entry(&self) -> HelpEntry;

    /// The help text of this flag, as per the default [`Renderer`].
    fn help(&self) -> String {
        Renderer::default().render(&self.help_entry())
    }

    /// Whether the flag has been declared as required.
    ///
    /// Enforcing this is left to the caller.
    fn is_required(&self) -> bool;

    /// Whether the flag has been declared as hidden from help listings.
    fn is_hidden(&self) -> bool;
}

/// The declaration of a flag whose value has shape `S`.
///
/// See [the family of aliases](crate::StringFlag) for the concrete flag types.
/// ```
/// use flagwork_core::{FlagSet, IntSliceFlag};
/// use flagwork_core::prelude::*;
///
/// let mut sizes: Vec<isize> = Vec::default();
/// {
///     let flag = IntSliceFlag::new("size")
///         .alias("s")
///         .usage("The `SIZE` to use")
///         .value(vec![9, 2])
///         .env("APP_SIZE")
///         .destination(&mut sizes);
///     let mut flag_set = FlagSet::new("program");
///     flag.apply(&mut flag_set).unwrap();
///     flag_set.parse(&["-s", "10", "--size", "20"]).unwrap();
/// }
/// assert_eq!(sizes, vec![10, 20]);
/// ```
pub struct Definition<'a, S: Shape> {
    name: String,
    aliases: Vec<String>,
    usage: String,
    value: Option<S::Value>,
    destination: Option<Rc<RefCell<&'a mut S::Value>>>,
    env_vars: Vec<String>,
    file_paths: Vec<PathBuf>,
    default_text: Option<String>,
    required: bool,
    hidden: bool,
}

impl<'a, S: Shape> std::fmt::Debug for Definition<'a, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Definition")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("kind", &S::kind())
            .finish()
    }
}

impl<'a, S: Shape> Definition<'a, S> {
    /// Declare a flag with the primary `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::default(),
            usage: String::default(),
            value: None,
            destination: None,
            env_vars: Vec::default(),
            file_paths: Vec::default(),
            default_text: None,
            required: false,
            hidden: false,
        }
    }

    /// Add an alias; aliases share the flag's value.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Describe the flag.
    /// The first backtick quoted word becomes the placeholder of the help text.
    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    /// Declare the default value.
    pub fn value(mut self, value: S::Value) -> Self {
        self.value = Some(value);
        self
    }

    /// Bind the flag to a caller-owned variable.
    ///
    /// A variable already holding a non-zero value keeps it over the declared default.
    /// The environment, the files and the command line still override it.
    pub fn destination(mut self, destination: &'a mut S::Value) -> Self {
        self.destination = Some(Rc::new(RefCell::new(destination)));
        self
    }

    /// Add an environment variable to fall back to; the first one set wins.
    pub fn env(mut self, name: impl Into<String>) -> Self {
        self.env_vars.push(name.into());
        self
    }

    /// Add a file to fall back to, after the environment variables; the first one readable wins.
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_paths.push(path.into());
        self
    }

    /// Override the default shown in the help text.
    pub fn default_text(mut self, default_text: impl Into<String>) -> Self {
        self.default_text = Some(default_text.into());
        self
    }

    /// Mark the flag as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Mark the flag as hidden.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// The primary name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared default value.
    pub fn declared(&self) -> Option<&S::Value> {
        self.value.as_ref()
    }

    /// The environment variables, in order.
    pub fn env_vars(&self) -> &[String] {
        &self.env_vars
    }

    /// The files, in order.
    pub fn file_paths(&self) -> &[PathBuf] {
        &self.file_paths
    }

    fn initial(&self, conversions: &Conversions) -> Result<S::Value, ApplyError> {
        if let Some(resolved) = resolve(&self.env_vars, &self.file_paths) {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Flag {} resolved from {:?}.", self.name, resolved.origin);
            }

            return S::from_source(&resolved.value, conversions)
                .map_err(|error| self.apply_error(&resolved.value, error));
        }

        if let Some(destination) = &self.destination {
            let current = destination.borrow();

            if !S::is_zero(&**current) {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Flag {} keeps its destination value over the default.", self.name);
                }

                return Ok((**current).clone());
            }
        }

        Ok(self.value.clone().unwrap_or_else(S::zero))
    }

    fn shown_default(&self) -> Option<String> {
        match &self.default_text {
            Some(text) if !text.is_empty() => Some(text.clone()),
            _ => S::describe_default(self.value.as_ref()),
        }
    }

    fn apply_error(&self, input: &str, error: ConversionError) -> ApplyError {
        match error {
            ConversionError::Invalid { cause, .. } => ApplyError::Parse {
                input: input.to_string(),
                kind: S::kind(),
                flag: self.name.clone(),
                cause,
            },
            ConversionError::Unsupported { type_name } => ApplyError::Unsupported {
                flag: self.name.clone(),
                type_name,
            },
        }
    }
}

impl<'a, S: Shape> Flag<'a> for Definition<'a, S> {
    fn names(&self) -> Vec<&str> {
        std::iter::once(self.name.as_str())
            .chain(self.aliases.iter().map(String::as_str))
            .collect()
    }

    fn apply(&self, flag_set: &mut FlagSet<'a>) -> Result<(), ApplyError> {
        let conversions = Rc::clone(flag_set.conversions());

        if !S::supported(&conversions) {
            return Err(ApplyError::Unsupported {
                flag: self.name.clone(),
                type_name: S::type_name(),
            });
        }

        let names: Vec<String> = self.names().into_iter().map(String::from).collect();
        // The destination must stay untouched when the names can't be registered.
        flag_set.validate(&names)?;
        let initial = self.initial(&conversions)?;
        let storage = match &self.destination {
            Some(destination) => Storage::Bound(Rc::clone(destination)),
            None => Storage::Owned(Rc::new(RefCell::new(S::zero()))),
        };
        let mut value: GenericValue<'a, S> = GenericValue::new(storage, conversions);
        value
            .assign(initial)
            .map_err(|error| self.apply_error("", error))?;

        let registration = Registration::new(names, Box::new(value))
            .usage(self.usage.clone())
            .hidden(self.hidden);
        let registration = match self.shown_default() {
            Some(text) => registration.default_text(text),
            None => registration,
        };
        flag_set.register(registration)?;
        Ok(())
    }

    fn help_entry(&self) -> HelpEntry {
        HelpEntry {
            names: self.names().into_iter().map(String::from).collect(),
            usage: self.usage.clone(),
            takes_value: !S::is_switch(),
            default_text: self.shown_default(),
            env_vars: self.env_vars.clone(),
        }
    }

    fn is_required(&self) -> bool {
        self.required
    }

    fn is_hidden(&self) -> bool {
        self.hidden
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::{Single, Slice};
    use rstest::rstest;
    use serial_test::serial;
    use std::env;

    #[rstest]
    #[case(None, None, Some("0"))]
    #[case(Some(7), None, Some("7"))]
    #[case(Some(7), Some(""), Some("7"))]
    #[case(Some(7), Some("lucky"), Some("lucky"))]
    fn shown_default_scalar(
        #[case] value: Option<i64>,
        #[case] default_text: Option<&str>,
        #[case] expected: Option<&str>,
    ) {
        // Setup
        let mut definition: Definition<Single<i64>> = Definition::new("n");

        if let Some(value) = value {
            definition = definition.value(value);
        }

        if let Some(text) = default_text {
            definition = definition.default_text(text);
        }

        // Execute
        let shown = definition.shown_default();

        // Verify
        assert_eq!(shown.as_deref(), expected);
    }

    #[test]
    fn initial_zero() {
        let definition: Definition<Slice<String>> = Definition::new("s");
        let initial = definition.initial(&Conversions::default()).unwrap();
        assert_eq!(initial, Vec::<String>::new());
    }

    #[test]
    #[serial]
    fn initial_zero_destination_defers() {
        // Setup
        env::set_var("FLAGWORK_DEFINITION_SPEED", "2.5");
        let mut speed = 0.0;
        let definition: Definition<Single<f64>> = Definition::new("speed")
            .value(1.0)
            .env("FLAGWORK_DEFINITION_SPEED")
            .destination(&mut speed);

        // Execute
        let initial = definition.initial(&Conversions::default()).unwrap();

        // Verify
        assert_eq!(initial, 2.5);
        env::remove_var("FLAGWORK_DEFINITION_SPEED");
    }

    #[test]
    #[serial]
    fn initial_env_beats_destination() {
        // Setup
        env::set_var("FLAGWORK_DEFINITION_RATE", "2.5");
        let mut rate = 3.0;
        let definition: Definition<Single<f64>> = Definition::new("rate")
            .value(1.0)
            .env("FLAGWORK_DEFINITION_RATE")
            .destination(&mut rate);

        // Execute
        let initial = definition.initial(&Conversions::default()).unwrap();

        // Verify
        assert_eq!(initial, 2.5);
        env::remove_var("FLAGWORK_DEFINITION_RATE");
    }

    #[test]
    fn initial_destination_kept() {
        let mut speed = 3.0;
        let definition: Definition<Single<f64>> =
            Definition::new("speed").value(1.0).destination(&mut speed);
        let initial = definition.initial(&Conversions::default()).unwrap();
        assert_eq!(initial, 3.0);
    }

    #[test]
    fn apply_error_relabels() {
        // Setup
        let definition: Definition<Single<u64>> = Definition::new("count");

        // Execute
        let error = definition.apply_error(
            "x",
            ConversionError::Invalid {
                input: "x".to_string(),
                kind: Kind::Scalar(crate::model::ScalarKind::Uint64),
                cause: "bad digit".to_string(),
            },
        );

        // Verify
        assert_eq!(
            error.to_string(),
            "could not parse \"x\" as uint64 value for flag count: bad digit"
        );
    }
}
