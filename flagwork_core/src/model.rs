/// The scalar kinds understood natively by the conversion engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// `bool`, supplied as a switch.
    Bool,
    /// `isize`.
    Int,
    /// `i64`.
    Int64,
    /// `usize`.
    Uint,
    /// `u64`.
    Uint64,
    /// `f64`.
    Float64,
    /// `String`.
    String,
    /// `std::time::Duration`, written as a compound literal like `2h3m6s`.
    Duration,
    /// A timezone-aware timestamp (see [`Time`](crate::Time)).
    Time,
}

impl std::fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ScalarKind::Bool => "bool",
            ScalarKind::Int => "int",
            ScalarKind::Int64 => "int64",
            ScalarKind::Uint => "uint",
            ScalarKind::Uint64 => "uint64",
            ScalarKind::Float64 => "float64",
            ScalarKind::String => "string",
            ScalarKind::Duration => "duration",
            ScalarKind::Time => "time",
        };
        write!(f, "{name}")
    }
}

/// The semantic kind of a flag's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// A single value of a native kind.
    Scalar(ScalarKind),
    /// Zero or more values of a native kind, accumulated across occurrences.
    Slice(ScalarKind),
    /// A caller-defined type, converted through a registered converter.
    Generic,
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Kind::Scalar(kind) => write!(f, "{kind}"),
            Kind::Slice(kind) => write!(f, "{kind} slice"),
            Kind::Generic => write!(f, "generic"),
        }
    }
}
