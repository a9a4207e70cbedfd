mod definition;
mod family;
mod help;
mod source;
mod value;

pub use definition::*;
pub use family::*;
pub use help::{prefixed_names, EnvSyntax, HelpEntry, Prefixer, Renderer};
pub use source::*;
pub use value::GenericValue;

pub(crate) use help::{unquote_usage, with_default};
