pub(crate) const DEFAULT_PLACEHOLDER: &str = "value";
pub(crate) const SLICE_SEPARATOR: char = ',';
pub(crate) const SWITCH_IMPLICIT: &str = "true";
pub(crate) const FLAG_TERMINATOR: &str = "--";
pub(crate) const SHORT_PREFIX: &str = "-";
pub(crate) const LONG_PREFIX: &str = "--";
