use std::any::Any;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;
use thiserror::Error;

use crate::constant::*;
use crate::convert::{ConversionError, Conversions, Time};
use crate::parser::interface::UserInterface;
use crate::parser::printer::Printer;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Error for an invalid flag set configuration.
#[derive(Debug, Error)]
#[error("Config error: {0}")]
pub struct ConfigError(pub(crate) String);

/// Error while parsing command line tokens.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The token names a flag that was never registered.
    #[error("flag provided but not defined: -{name}")]
    Undefined {
        /// The name as given.
        name: String,
    },
    /// The token is not of the form `-name`, `--name`, or `--name=value`.
    #[error("bad flag syntax: {token}")]
    BadSyntax {
        /// The offending token.
        token: String,
    },
    /// A non-switch flag was last, without a value token.
    #[error("flag needs an argument: -{name}")]
    MissingValue {
        /// The name as given.
        name: String,
    },
    /// The flag's value did not convert.
    #[error("invalid value {input:?} for flag -{name}: {source}")]
    Invalid {
        /// The offending value.
        input: String,
        /// The name as given.
        name: String,
        /// What went wrong.
        source: ConversionError,
    },
}

/// Behaviour to set a flag's value from a string, regardless of its type.
///
/// We use this at the top of the flag set object graph so that values of different types may all be set from a single token list.
pub trait Value: std::fmt::Display {
    /// Set the value from `input`.
    fn set(&mut self, input: &str) -> Result<(), ConversionError>;

    /// The current value, boxed.
    fn get(&self) -> Box<dyn Any>;

    /// Whether the value may be supplied without a value token (ie: `--verbose` rather than `--verbose true`).
    fn is_switch(&self) -> bool;
}

/// A value to register with a [`FlagSet`], along with what describes it.
pub struct Registration<'a> {
    names: Vec<String>,
    value: Box<dyn Value + 'a>,
    usage: String,
    default_text: Option<String>,
    hidden: bool,
}

impl<'a> Registration<'a> {
    /// Register `value` under every one of `names`.
    pub fn new(names: Vec<String>, value: Box<dyn Value + 'a>) -> Self {
        Self {
            names,
            value,
            usage: String::default(),
            default_text: None,
            hidden: false,
        }
    }

    /// Describe the value; the first backtick quoted word becomes the placeholder.
    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    /// The default to show in the defaults listing.
    pub fn default_text(mut self, default_text: impl Into<String>) -> Self {
        self.default_text = Some(default_text.into());
        self
    }

    /// Whether to leave the value out of the defaults listing.
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }
}

struct Entry<'a> {
    names: Vec<String>,
    value: Box<dyn Value + 'a>,
    usage: String,
    default_text: Option<String>,
    hidden: bool,
    visited: bool,
}

/// The registry of named values that command line tokens are parsed against.
///
/// Tokens follow the conventions of Go's `flag` package: `-name value`, `--name value`, `-name=value` and `--name=value` are equivalent.
/// Switches are set to `true` by their bare name (use `--name=false` to unset them).
/// Parsing stops at `--` or the first token that isn't a flag; the remaining tokens are available through [`FlagSet::args`].
pub struct FlagSet<'a> {
    name: String,
    // One entry per registration; every name of the entry maps to its position in `formal`.
    entries: Vec<Entry<'a>>,
    formal: HashMap<String, usize>,
    args: Vec<String>,
    parsed: bool,
    conversions: Rc<Conversions>,
}

impl<'a> std::fmt::Debug for FlagSet<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlagSet")
            .field("name", &self.name)
            .field("args", &self.args)
            .field("parsed", &self.parsed)
            .finish()
    }
}

macro_rules! typed_lookup {
    ($($method:ident => $type:ty),* $(,)?) => {
        $(
            #[doc = concat!("The `", stringify!($type), "` value registered under `name`.")]
            pub fn $method(&self, name: &str) -> Option<$type> {
                self.get::<$type>(name)
            }
        )*
    };
}

impl<'a> FlagSet<'a> {
    /// Create an empty flag set using the default [`Conversions`].
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_conversions(name, Conversions::default())
    }

    /// Create an empty flag set using `conversions` for every flag applied to it.
    pub fn with_conversions(name: impl Into<String>, conversions: Conversions) -> Self {
        Self {
            name: name.into(),
            entries: Vec::default(),
            formal: HashMap::default(),
            args: Vec::default(),
            parsed: false,
            conversions: Rc::new(conversions),
        }
    }

    /// The name of this flag set.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The conversions shared by every flag of this set.
    pub fn conversions(&self) -> &Rc<Conversions> {
        &self.conversions
    }

    /// Register a value under all its names.
    pub fn register(&mut self, registration: Registration<'a>) -> Result<(), ConfigError> {
        let Registration {
            names,
            value,
            usage,
            default_text,
            hidden,
        } = registration;

        self.validate(&names)?;
        let position = self.entries.len();

        for name in &names {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Registering flag '{name}' in {}.", self.name);
            }

            self.formal.insert(name.clone(), position);
        }

        self.entries.push(Entry {
            names,
            value,
            usage,
            default_text,
            hidden,
            visited: false,
        });
        Ok(())
    }

    /// Check that `names` could be registered together, without registering anything.
    pub(crate) fn validate(&self, names: &[String]) -> Result<(), ConfigError> {
        if names.is_empty() {
            return Err(ConfigError("Cannot register a flag without a name.".to_string()));
        }

        for (i, name) in names.iter().enumerate() {
            if name.is_empty() || name.starts_with('-') || name.contains('=') {
                return Err(ConfigError(format!("Invalid flag name '{name}'.")));
            }

            if self.formal.contains_key(name) || names[..i].contains(name) {
                return Err(ConfigError(format!("Cannot duplicate the flag '{name}'.")));
            }
        }

        Ok(())
    }

    /// Parse `tokens` (excluding the program name) against the registered flags.
    pub fn parse(&mut self, tokens: &[&str]) -> Result<(), ParseError> {
        self.parsed = true;
        let mut index = 0;

        while index < tokens.len() {
            let token = tokens[index];

            if token.len() < 2 || !token.starts_with(SHORT_PREFIX) {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Token '{token}' ends the flags.");
                }

                break;
            }

            index += 1;

            if token == FLAG_TERMINATOR {
                break;
            }

            let body = token
                .strip_prefix(LONG_PREFIX)
                .or_else(|| token.strip_prefix(SHORT_PREFIX))
                .unwrap_or(token);

            if body.is_empty() || body.starts_with(SHORT_PREFIX) || body.starts_with('=') {
                return Err(ParseError::BadSyntax {
                    token: token.to_string(),
                });
            }

            let (name, inline) = match body.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (body, None),
            };
            let position = *self
                .formal
                .get(name)
                .ok_or_else(|| ParseError::Undefined {
                    name: name.to_string(),
                })?;
            let entry = &mut self.entries[position];
            let input = match inline {
                Some(value) => value,
                None if entry.value.is_switch() => SWITCH_IMPLICIT,
                None => {
                    if index < tokens.len() {
                        index += 1;
                        tokens[index - 1]
                    } else {
                        return Err(ParseError::MissingValue {
                            name: name.to_string(),
                        });
                    }
                }
            };

            #[cfg(feature = "tracing_debug")]
            {
                debug!("Setting flag '{name}' from '{input}'.");
            }

            entry
                .value
                .set(input)
                .map_err(|source| ParseError::Invalid {
                    input: input.to_string(),
                    name: name.to_string(),
                    source,
                })?;
            entry.visited = true;
        }

        self.args = tokens[index..].iter().map(|token| token.to_string()).collect();
        Ok(())
    }

    /// Set the value registered under `name` from a string, as if it had been given on the command line.
    pub fn set(&mut self, name: &str, input: &str) -> Result<(), ParseError> {
        let position = *self
            .formal
            .get(name)
            .ok_or_else(|| ParseError::Undefined {
                name: name.to_string(),
            })?;
        let entry = &mut self.entries[position];
        entry
            .value
            .set(input)
            .map_err(|source| ParseError::Invalid {
                input: input.to_string(),
                name: name.to_string(),
                source,
            })?;
        entry.visited = true;
        Ok(())
    }

    /// Whether `parse` has been called.
    pub fn parsed(&self) -> bool {
        self.parsed
    }

    /// The tokens remaining after the flags.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The `i`th token remaining after the flags.
    pub fn arg(&self, i: usize) -> Option<&str> {
        self.args.get(i).map(String::as_str)
    }

    /// Whether the flag registered under `name` was set (under any of its names) on the command line or via [`FlagSet::set`].
    pub fn is_set(&self, name: &str) -> bool {
        self.formal
            .get(name)
            .map(|position| self.entries[*position].visited)
            .unwrap_or(false)
    }

    /// The names of the flags that were set, in registration order (primary names only).
    pub fn visited(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|entry| entry.visited)
            .map(|entry| entry.names[0].as_str())
            .collect()
    }

    /// The value registered under `name`.
    pub fn lookup(&self, name: &str) -> Option<&(dyn Value + 'a)> {
        self.formal
            .get(name)
            .map(|position| self.entries[*position].value.as_ref())
    }

    /// The value registered under `name`, if it has type `T`.
    pub fn get<T: 'static>(&self, name: &str) -> Option<T> {
        self.lookup(name)?
            .get()
            .downcast::<T>()
            .ok()
            .map(|value| *value)
    }

    typed_lookup! {
        string => String,
        int => isize,
        int64 => i64,
        uint => usize,
        uint64 => u64,
        float64 => f64,
        bool => bool,
        duration => Duration,
        time => Time,
        string_slice => Vec<String>,
        int_slice => Vec<isize>,
        int64_slice => Vec<i64>,
        uint_slice => Vec<usize>,
        uint64_slice => Vec<u64>,
        float64_slice => Vec<f64>,
        bool_slice => Vec<bool>,
        duration_slice => Vec<Duration>,
        time_slice => Vec<Time>,
    }

    /// The value of a caller-defined type registered under `name`.
    pub fn generic<T: 'static>(&self, name: &str) -> Option<T> {
        self.get::<T>(name)
    }

    /// Print every visible flag, one per line, in columns fitted to the terminal.
    pub fn print_defaults(&self, user_interface: &(impl UserInterface + ?Sized)) {
        let rows = self
            .entries
            .iter()
            .filter(|entry| !entry.hidden)
            .map(|entry| {
                let names: Vec<&str> = entry.names.iter().map(String::as_str).collect();
                Printer::row(
                    &names,
                    &entry.usage,
                    entry.value.is_switch(),
                    entry.default_text.as_deref(),
                )
            })
            .collect();
        Printer::terminal(rows).print(user_interface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::interface::util::InMemoryInterface;
    use crate::test::assert_contains;
    use rstest::rstest;
    use std::cell::RefCell;

    struct Recorder {
        inputs: Rc<RefCell<Vec<String>>>,
        switch: bool,
    }

    impl std::fmt::Display for Recorder {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}", self.inputs.borrow().join(","))
        }
    }

    impl Value for Recorder {
        fn set(&mut self, input: &str) -> Result<(), ConversionError> {
            if input == "bad" {
                return Err(ConversionError::Unsupported { type_name: "bad" });
            }

            self.inputs.borrow_mut().push(input.to_string());
            Ok(())
        }

        fn get(&self) -> Box<dyn Any> {
            Box::new(self.inputs.borrow().clone())
        }

        fn is_switch(&self) -> bool {
            self.switch
        }
    }

    fn recorder(switch: bool) -> (Rc<RefCell<Vec<String>>>, Box<Recorder>) {
        let inputs = Rc::new(RefCell::new(Vec::default()));
        let value = Box::new(Recorder {
            inputs: Rc::clone(&inputs),
            switch,
        });
        (inputs, value)
    }

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn flag_set_empty() {
        // Setup
        let mut flag_set = FlagSet::new("program");

        // Execute
        flag_set.parse(empty::slice()).unwrap();

        // Verify
        assert!(flag_set.parsed());
        assert!(flag_set.args().is_empty());
    }

    #[rstest]
    #[case(vec!["--variable", "1"])]
    #[case(vec!["-variable", "1"])]
    #[case(vec!["--variable=1"])]
    #[case(vec!["-variable=1"])]
    #[case(vec!["-v", "1"])]
    #[case(vec!["-v=1"])]
    #[case(vec!["--v", "1"])]
    fn flag_set_value(#[case] tokens: Vec<&str>) {
        // Setup
        let (inputs, value) = recorder(false);
        let mut flag_set = FlagSet::new("program");
        flag_set
            .register(Registration::new(names(&["variable", "v"]), value))
            .unwrap();

        // Execute
        flag_set.parse(tokens.as_slice()).unwrap();

        // Verify
        assert_eq!(*inputs.borrow(), vec!["1".to_string()]);
        assert!(flag_set.is_set("variable"));
        assert!(flag_set.is_set("v"));
        assert_eq!(flag_set.visited(), vec!["variable"]);
    }

    #[rstest]
    #[case(vec!["--serve"], vec!["true"])]
    #[case(vec!["-s"], vec!["true"])]
    #[case(vec!["--serve=false"], vec!["false"])]
    #[case(vec!["-s", "--serve"], vec!["true", "true"])]
    fn flag_set_switch(#[case] tokens: Vec<&str>, #[case] expected: Vec<&str>) {
        // Setup
        let (inputs, value) = recorder(true);
        let mut flag_set = FlagSet::new("program");
        flag_set
            .register(Registration::new(names(&["serve", "s"]), value))
            .unwrap();

        // Execute
        flag_set.parse(tokens.as_slice()).unwrap();

        // Verify
        assert_eq!(*inputs.borrow(), expected);
    }

    #[rstest]
    #[case(vec!["abc"], vec!["abc"], vec![])]
    #[case(vec!["-", "-v", "1"], vec!["-", "-v", "1"], vec![])]
    #[case(vec!["-v", "1", "abc", "-v", "2"], vec!["abc", "-v", "2"], vec!["1"])]
    #[case(vec!["-v", "1", "--", "-v", "2"], vec!["-v", "2"], vec!["1"])]
    #[case(vec!["--", "--"], vec!["--"], vec![])]
    #[case(vec!["-v", "--"], vec![], vec!["--"])]
    fn flag_set_args(
        #[case] tokens: Vec<&str>,
        #[case] expected_args: Vec<&str>,
        #[case] expected_inputs: Vec<&str>,
    ) {
        // Setup
        let (inputs, value) = recorder(false);
        let mut flag_set = FlagSet::new("program");
        flag_set
            .register(Registration::new(names(&["v"]), value))
            .unwrap();

        // Execute
        flag_set.parse(tokens.as_slice()).unwrap();

        // Verify
        assert_eq!(flag_set.args(), expected_args);
        assert_eq!(*inputs.borrow(), expected_inputs);
    }

    #[test]
    fn flag_set_undefined() {
        let mut flag_set = FlagSet::new("program");
        let result = flag_set.parse(&["--wat"]);
        assert_matches!(result, Err(ParseError::Undefined { ref name }) if name == "wat");
        assert_eq!(
            result.unwrap_err().to_string(),
            "flag provided but not defined: -wat"
        );
    }

    #[rstest]
    #[case("---v")]
    #[case("--=1")]
    #[case("-=1")]
    fn flag_set_bad_syntax(#[case] token: &str) {
        let (_, value) = recorder(false);
        let mut flag_set = FlagSet::new("program");
        flag_set
            .register(Registration::new(names(&["v"]), value))
            .unwrap();
        assert_matches!(flag_set.parse(&[token]), Err(ParseError::BadSyntax { .. }));
    }

    #[test]
    fn flag_set_missing_value() {
        // Setup
        let (_, value) = recorder(false);
        let mut flag_set = FlagSet::new("program");
        flag_set
            .register(Registration::new(names(&["v"]), value))
            .unwrap();

        // Execute
        let result = flag_set.parse(&["-v"]);

        // Verify
        assert_matches!(result, Err(ParseError::MissingValue { ref name }) if name == "v");
        assert!(!flag_set.is_set("v"));
    }

    #[test]
    fn flag_set_invalid() {
        // Setup
        let (_, value) = recorder(false);
        let mut flag_set = FlagSet::new("program");
        flag_set
            .register(Registration::new(names(&["v"]), value))
            .unwrap();

        // Execute
        let result = flag_set.parse(&["-v", "bad"]);

        // Verify
        let error = result.unwrap_err();
        assert_contains!(error.to_string(), "invalid value \"bad\" for flag -v: ");
        assert!(!flag_set.is_set("v"));
    }

    #[rstest]
    #[case(vec!["flag"], vec!["flag"])]
    #[case(vec!["flag"], vec!["other", "flag"])]
    #[case(vec!["flag", "flag"], vec![])]
    #[case(vec![], vec![])]
    #[case(vec!["-f"], vec![])]
    #[case(vec!["a=b"], vec![])]
    fn flag_set_invalid_registration(#[case] first: Vec<&str>, #[case] second: Vec<&str>) {
        // Setup
        let mut flag_set = FlagSet::new("program");
        let (_, value) = recorder(false);
        let first_result = flag_set.register(Registration::new(names(&first), value));

        // Execute
        let result = match first_result {
            Ok(()) => {
                let (_, value) = recorder(false);
                flag_set.register(Registration::new(names(&second), value))
            }
            Err(error) => Err(error),
        };

        // Verify
        assert_matches!(result, Err(ConfigError(_)));
    }

    #[test]
    fn flag_set_programmatic_set() {
        // Setup
        let (inputs, value) = recorder(false);
        let mut flag_set = FlagSet::new("program");
        flag_set
            .register(Registration::new(names(&["v"]), value))
            .unwrap();

        // Execute
        flag_set.set("v", "abc").unwrap();

        // Verify
        assert_eq!(*inputs.borrow(), vec!["abc".to_string()]);
        assert!(flag_set.is_set("v"));
        assert_matches!(flag_set.set("x", "abc"), Err(ParseError::Undefined { .. }));
    }

    #[test]
    fn flag_set_lookup() {
        // Setup
        let (_, value) = recorder(false);
        let mut flag_set = FlagSet::new("program");
        flag_set
            .register(Registration::new(names(&["v", "verbose"]), value))
            .unwrap();
        flag_set.parse(&["-v", "a", "--verbose", "b"]).unwrap();

        // Execute
        let by_short = flag_set.get::<Vec<String>>("v");
        let by_long = flag_set.get::<Vec<String>>("verbose");

        // Verify
        let expected = Some(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(by_short, expected);
        assert_eq!(by_long, expected);
        assert_eq!(flag_set.lookup("v").unwrap().to_string(), "a,b");
        assert_eq!(flag_set.get::<String>("v"), None);
        assert!(flag_set.lookup("x").is_none());
    }

    #[test]
    fn flag_set_print_defaults() {
        // Setup
        let mut flag_set = FlagSet::new("program");
        let (_, value) = recorder(false);
        flag_set
            .register(
                Registration::new(names(&["config", "c"]), value)
                    .usage("Load configuration from `FILE`")
                    .default_text("\"config.json\""),
            )
            .unwrap();
        let (_, value) = recorder(true);
        flag_set
            .register(Registration::new(names(&["debug"]), value).default_text("false"))
            .unwrap();
        let (_, value) = recorder(false);
        flag_set
            .register(
                Registration::new(names(&["secret"]), value)
                    .usage("Not for you")
                    .hidden(true),
            )
            .unwrap();
        let interface = InMemoryInterface::default();

        // Execute
        flag_set.print_defaults(&interface);

        // Verify
        let message = interface.consume_message();
        assert_contains!(message, "--config FILE, -c FILE");
        assert_contains!(message, "Load");
        assert_contains!(message, "\"config.json\")");
        assert_contains!(message, "--debug");
        assert!(!message.contains("secret"));
        assert!(!message.contains("Not for you"));
    }
}
