use std::time::Duration;

use crate::convert::duration::{format_duration, parse_duration};
use crate::convert::time::{zero_time, Time};
use crate::convert::Conversions;
use crate::model::ScalarKind;

/// Behaviour of a native scalar kind: how it is parsed, displayed and described.
///
/// Implemented for `bool`, `isize`, `i64`, `usize`, `u64`, `f64`, `String`, `Duration` and [`Time`].
pub trait Scalar: Clone + PartialEq + 'static {
    /// The kind this type represents.
    const KIND: ScalarKind;

    /// The zero value of the kind.
    fn zero() -> Self;

    /// Parse `input` according to the kind's lexical rules.
    fn parse_text(input: &str, conversions: &Conversions) -> Result<Self, String>;

    /// Render the value so that `parse_text` reads it back.
    fn stringify(&self) -> String;

    /// Render the value for help text, or `None` when it isn't worth showing.
    fn describe(&self) -> Option<String> {
        Some(self.stringify())
    }
}

fn parse_bool(input: &str) -> Result<bool, String> {
    match input {
        "" | "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
        _ => Err(format!("invalid boolean {input:?}")),
    }
}

fn parse_integer(input: &str) -> Result<i128, String> {
    let (negative, unsigned) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input.strip_prefix('+').unwrap_or(input)),
    };
    let (radix, digits) = if let Some(digits) = strip_radix(unsigned, "0x", "0X") {
        (16, digits)
    } else if let Some(digits) = strip_radix(unsigned, "0o", "0O") {
        (8, digits)
    } else if let Some(digits) = strip_radix(unsigned, "0b", "0B") {
        (2, digits)
    } else {
        (10, unsigned)
    };

    // `from_str_radix` would otherwise tolerate a second sign.
    if digits.is_empty() || digits.starts_with(['+', '-']) {
        return Err(format!("invalid integer {input:?}"));
    }

    let magnitude =
        i128::from_str_radix(digits, radix).map_err(|error| format!("{error} in {input:?}"))?;

    if negative {
        Ok(-magnitude)
    } else {
        Ok(magnitude)
    }
}

fn strip_radix<'s>(input: &'s str, lower: &str, upper: &str) -> Option<&'s str> {
    input
        .strip_prefix(lower)
        .or_else(|| input.strip_prefix(upper))
}

macro_rules! integer_scalar {
    ($type:ty, $kind:expr) => {
        impl Scalar for $type {
            const KIND: ScalarKind = $kind;

            fn zero() -> Self {
                0
            }

            fn parse_text(input: &str, _conversions: &Conversions) -> Result<Self, String> {
                let wide = parse_integer(input)?;
                <$type>::try_from(wide)
                    .map_err(|_| format!("{input:?} is out of range for {}", $kind))
            }

            fn stringify(&self) -> String {
                self.to_string()
            }
        }
    };
}

integer_scalar!(isize, ScalarKind::Int);
integer_scalar!(i64, ScalarKind::Int64);
integer_scalar!(usize, ScalarKind::Uint);
integer_scalar!(u64, ScalarKind::Uint64);

impl Scalar for bool {
    const KIND: ScalarKind = ScalarKind::Bool;

    fn zero() -> Self {
        false
    }

    fn parse_text(input: &str, _conversions: &Conversions) -> Result<Self, String> {
        parse_bool(input)
    }

    fn stringify(&self) -> String {
        self.to_string()
    }
}

impl Scalar for f64 {
    const KIND: ScalarKind = ScalarKind::Float64;

    fn zero() -> Self {
        0.0
    }

    fn parse_text(input: &str, _conversions: &Conversions) -> Result<Self, String> {
        input
            .parse::<f64>()
            .map_err(|error| format!("{error} in {input:?}"))
    }

    fn stringify(&self) -> String {
        self.to_string()
    }
}

impl Scalar for String {
    const KIND: ScalarKind = ScalarKind::String;

    fn zero() -> Self {
        String::default()
    }

    fn parse_text(input: &str, _conversions: &Conversions) -> Result<Self, String> {
        Ok(input.to_string())
    }

    fn stringify(&self) -> String {
        self.clone()
    }

    fn describe(&self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(format!("{self:?}"))
        }
    }
}

impl Scalar for Duration {
    const KIND: ScalarKind = ScalarKind::Duration;

    fn zero() -> Self {
        Duration::ZERO
    }

    fn parse_text(input: &str, _conversions: &Conversions) -> Result<Self, String> {
        parse_duration(input)
    }

    fn stringify(&self) -> String {
        format_duration(self)
    }
}

impl Scalar for Time {
    const KIND: ScalarKind = ScalarKind::Time;

    fn zero() -> Self {
        zero_time()
    }

    fn parse_text(input: &str, conversions: &Conversions) -> Result<Self, String> {
        conversions.parse_time(input)
    }

    fn stringify(&self) -> String {
        self.to_rfc3339()
    }

    fn describe(&self) -> Option<String> {
        if self == &zero_time() {
            None
        } else {
            Some(self.stringify())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{thread_rng, Rng};
    use rstest::rstest;

    fn parse<T: Scalar>(input: &str) -> Result<T, String> {
        T::parse_text(input, &Conversions::default())
    }

    #[rstest]
    #[case("", false)]
    #[case("0", false)]
    #[case("f", false)]
    #[case("False", false)]
    #[case("FALSE", false)]
    #[case("1", true)]
    #[case("t", true)]
    #[case("True", true)]
    #[case("TRUE", true)]
    #[case("true", true)]
    fn bool_forms(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(parse::<bool>(input).unwrap(), expected);
    }

    #[rstest]
    #[case("foobar")]
    #[case("yes")]
    #[case("tRuE")]
    fn bool_invalid(#[case] input: &str) {
        assert_matches!(parse::<bool>(input), Err(_));
    }

    #[rstest]
    #[case("10", 10)]
    #[case("+10", 10)]
    #[case("-10", -10)]
    #[case("0x1f", 31)]
    #[case("0X1F", 31)]
    #[case("-0x10", -16)]
    #[case("0o17", 15)]
    #[case("0b101", 5)]
    #[case("017", 17)]
    #[case("17179869184", 17179869184)]
    fn int64_forms(#[case] input: &str, #[case] expected: i64) {
        assert_eq!(parse::<i64>(input).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("foobar")]
    #[case("1.5")]
    #[case("0x")]
    #[case("--1")]
    #[case("+-1")]
    #[case("0x-1")]
    #[case("9223372036854775808")]
    fn int64_invalid(#[case] input: &str) {
        assert_matches!(parse::<i64>(input), Err(_));
    }

    #[test]
    fn unsigned_rejects_negative() {
        assert_matches!(parse::<u64>("-1"), Err(_));
        assert_matches!(parse::<usize>("-1"), Err(_));
        assert_eq!(parse::<u64>("-0").unwrap(), 0);
        assert_eq!(parse::<u64>("18446744073709551615").unwrap(), u64::MAX);
    }

    #[rstest]
    #[case("0.1", 0.1)]
    #[case("-10.5", -10.5)]
    #[case("1e3", 1000.0)]
    #[case("43.33333", 43.33333)]
    fn float_forms(#[case] input: &str, #[case] expected: f64) {
        assert_eq!(parse::<f64>(input).unwrap(), expected);
    }

    #[rstest]
    #[case(String::default(), None)]
    #[case("all".to_string(), Some("\"all\""))]
    fn string_describe(#[case] value: String, #[case] expected: Option<&str>) {
        assert_eq!(value.describe().as_deref(), expected);
    }

    #[test]
    fn numbers_always_described() {
        assert_eq!(0isize.describe(), Some("0".to_string()));
        assert_eq!(false.describe(), Some("false".to_string()));
        assert_eq!(Duration::ZERO.describe(), Some("0s".to_string()));
    }

    #[test]
    fn time_described_when_set() {
        assert_eq!(zero_time().describe(), None);
        let time = parse::<Time>("526").unwrap();
        assert_eq!(time.describe(), Some("1970-01-01T00:08:46+00:00".to_string()));
    }

    #[test]
    fn integer_round_trip() {
        for _ in 0..100 {
            // Setup
            let value: i64 = thread_rng().gen();

            // Execute
            let parsed = parse::<i64>(&value.stringify()).unwrap();

            // Verify
            assert_eq!(parsed, value);
        }
    }

    #[test]
    fn float_round_trip() {
        for _ in 0..100 {
            let value: f64 = thread_rng().gen_range(-1.0e12..1.0e12);
            assert_eq!(parse::<f64>(&value.stringify()).unwrap(), value);
        }
    }

    #[test]
    fn time_round_trip() {
        for _ in 0..100 {
            let seconds: i64 = thread_rng().gen_range(0..4_000_000_000);
            let value = parse::<Time>(&seconds.to_string()).unwrap();
            assert_eq!(parse::<Time>(&value.stringify()).unwrap(), value);
        }
    }
}
