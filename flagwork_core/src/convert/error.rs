use thiserror::Error;

use crate::model::Kind;

/// Failure to convert an input into a flag's value.
///
/// The flag name is not known at this level; callers attach it when composing their own errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// The input does not match the lexical grammar (or range) of the target kind.
    #[error("{cause}")]
    Invalid {
        /// The offending input.
        input: String,
        /// The kind that was being converted into.
        kind: Kind,
        /// What went wrong.
        cause: String,
    },
    /// The target type has no converter registered for it.
    #[error("no converter is registered for type {type_name}")]
    Unsupported {
        /// The name of the unsupported type.
        type_name: &'static str,
    },
}

impl ConversionError {
    pub(crate) fn invalid(input: &str, kind: Kind, cause: impl Into<String>) -> Self {
        ConversionError::Invalid {
            input: input.to_string(),
            kind,
            cause: cause.into(),
        }
    }

    pub(crate) fn relabel(self, kind: Kind) -> Self {
        match self {
            ConversionError::Invalid { input, cause, .. } => {
                ConversionError::Invalid { input, kind, cause }
            }
            unsupported => unsupported,
        }
    }
}
