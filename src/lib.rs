//! `flagwork` declares typed command line flags that fall back to environment variables, files and defaults.
//!
//! Each flag is declared once, with its type, names, usage, and where else its value may come from.
//! Applying the flag to a [`FlagSet`] resolves its initial value and registers it under every name, so that `-p 80`, `--port 80` and `--port=80` all land in the same place.
//! `flagwork` concerns itself with the following:
//! * *Typed flags*:
//! One flag type per semantic kind ([`StringFlag`], [`IntFlag`], [`DurationFlag`], [`TimeFlag`], ..), and a slice variant of each ([`StringSliceFlag`], ..).
//! Caller-defined types implementing [`prelude::Generic`] go through [`GenericFlag`], and any other type through [`CustomFlag`] with a converter registered on [`Conversions`].
//! * *Layered initial values*:
//! The first non-empty environment variable, then the first non-empty file supplies the value.
//! Otherwise a destination already holding a non-zero value keeps it, and failing that the declared default applies.
//! Whatever the command line says overrides all of these.
//! * *Go style tokens*:
//! Single and double dash are interchangeable, values may be attached with `=`, switches take no value, and parsing stops at `--` or the first non-flag.
//! * *Help text*:
//! Each flag renders as `--name value, -n value<TAB>usage (default: X) [$ENV]`, or in aligned columns via [`FlagSet::print_defaults`].
//!
//! # Usage
//! ```no_run
#![doc = include_str!("../demos/serve.rs")]
//! ```
//!
//! ```console
//! $ serve -h
//! flag provided but not defined: -h
//! usage: serve [flags]
//!   --port PORT, -p PORT  Listen on PORT (default: 8080) [$SERVE_PORT]
//!   ..
//!
//! $ SERVE_PORT=9000 serve --host a.example --host b.example
//! Serving on port 9000 for ["a.example", "b.example"] (timeout: 30s, level: info, verbose: false).
//!
//! $ serve --port=80 -v --timeout 1m30s --level warn
//! Serving on port 80 for [] (timeout: 90s, level: warn, verbose: true).
//! ```
//!
//! # Destinations & Initials
//! Bind a flag to a variable with `destination`.
//! The registry keeps a handle on the variable until it is dropped, so read your variables after the [`FlagSet`] (and the flags) go out of scope.
//! Without a destination, read values back through the registry by any of the flag's names:
//!
//! ```
//! use flagwork::prelude::*;
//! use flagwork::{FlagSet, StringFlag};
//!
//! let flag = StringFlag::new("name").alias("n").value("world".to_string());
//! let mut flag_set = FlagSet::new("greet");
//! flag.apply(&mut flag_set).unwrap();
//! flag_set.parse(&["-n", "flagwork"]).unwrap();
//! assert_eq!(flag_set.string("name"), Some("flagwork".to_string()));
//! assert!(flag_set.is_set("n"));
//! ```
//!
//! Slice flags are the exception to "the command line overrides": the first value given on the command line replaces the initial value, and subsequent ones are appended.
//!
//! # Feature `tracing_debug`
//! Emits `tracing` debug events as flags resolve and tokens are consumed.
pub use flagwork_core::*;
