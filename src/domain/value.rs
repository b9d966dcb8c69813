//! Argument values and their truthiness

use std::fmt;

/// A single argument value as produced by the argv parser or supplied to
/// [`join_args`](crate::domain::join_args).
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Str(String),
    Num(f64),
    Bool(bool),
}

impl ArgValue {
    /// Loose truthiness.
    ///
    /// Falsy: `false`, `0`, `NaN` and the empty string. Everything else is
    /// truthy. An absent value is falsy as well, see [`is_truthy_opt`].
    pub fn is_truthy(&self) -> bool {
        match self {
            ArgValue::Str(s) => !s.is_empty(),
            ArgValue::Num(n) => *n != 0.0 && !n.is_nan(),
            ArgValue::Bool(b) => *b,
        }
    }

    /// Parse a raw token the way a user would expect it typed.
    ///
    /// `true`/`false` become booleans, numeric literals become numbers, and
    /// everything else stays a string.
    pub fn infer(raw: &str) -> Self {
        match raw {
            "true" => ArgValue::Bool(true),
            "false" => ArgValue::Bool(false),
            _ => parse_number(raw)
                .map(ArgValue::Num)
                .unwrap_or_else(|| ArgValue::Str(raw.to_string())),
        }
    }
}

/// Truthiness of a possibly absent value.
pub fn is_truthy_opt(value: Option<&ArgValue>) -> bool {
    value.is_some_and(ArgValue::is_truthy)
}

/// Parse `raw` as a number if it looks like one: decimal with optional sign,
/// fraction and exponent, or `0x` hex.
pub fn parse_number(raw: &str) -> Option<f64> {
    if let Some(hex) = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        if hex.is_empty() || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        return u64::from_str_radix(hex, 16).ok().map(|n| n as f64);
    }
    if number_regex().is_match(raw) {
        raw.parse::<f64>().ok()
    } else {
        None
    }
}

fn number_regex() -> &'static regex::Regex {
    static RE: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
    RE.get_or_init(|| {
        regex::Regex::new(r"^[-+]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][-+]?\d+)?$")
            .expect("number pattern is valid")
    })
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Str(s) => f.write_str(s),
            ArgValue::Num(n) => fmt_number(*n, f),
            ArgValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// Plain decimal inside `[1e-6, 1e21)`, exponent form (`1e+21`, `1e-7`)
/// outside it. Signed zero prints as `0`.
fn fmt_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_nan() {
        return f.write_str("NaN");
    }
    if n.is_infinite() {
        return f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" });
    }
    if n == 0.0 {
        return f.write_str("0");
    }
    let abs = n.abs();
    if (1e-6..1e21).contains(&abs) {
        return write!(f, "{}", n);
    }
    let exp = format!("{:e}", n);
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => write!(f, "{}e+{}", mantissa, power),
        _ => f.write_str(&exp),
    }
}

impl From<&str> for ArgValue {
    fn from(s: &str) -> Self {
        ArgValue::Str(s.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(s: String) -> Self {
        ArgValue::Str(s)
    }
}

impl From<bool> for ArgValue {
    fn from(b: bool) -> Self {
        ArgValue::Bool(b)
    }
}

impl From<f64> for ArgValue {
    fn from(n: f64) -> Self {
        ArgValue::Num(n)
    }
}

impl From<i64> for ArgValue {
    fn from(n: i64) -> Self {
        ArgValue::Num(n as f64)
    }
}

impl From<i32> for ArgValue {
    fn from(n: i32) -> Self {
        ArgValue::Num(f64::from(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ArgValue::Num(1.0), true)]
    #[case(ArgValue::Num(0.0), false)]
    #[case(ArgValue::Num(-0.5), true)]
    #[case(ArgValue::Num(f64::NAN), false)]
    #[case(ArgValue::Str(String::new()), false)]
    #[case(ArgValue::Str("0".into()), true)]
    #[case(ArgValue::Str("false".into()), true)]
    #[case(ArgValue::Bool(true), true)]
    #[case(ArgValue::Bool(false), false)]
    fn test_is_truthy(#[case] value: ArgValue, #[case] expected: bool) {
        assert_eq!(value.is_truthy(), expected);
    }

    #[test]
    fn test_absent_is_falsy() {
        assert!(!is_truthy_opt(None));
        assert!(is_truthy_opt(Some(&ArgValue::Num(1.0))));
    }

    #[rstest]
    #[case("3000", Some(3000.0))]
    #[case("-1.5", Some(-1.5))]
    #[case(".5", Some(0.5))]
    #[case("1e3", Some(1000.0))]
    #[case("0x1F", Some(31.0))]
    #[case("0x+1F", None)]
    #[case("0x-1", None)]
    #[case("0x", None)]
    #[case("12px", None)]
    #[case("1.2.3", None)]
    #[case("", None)]
    #[case("inf", None)]
    fn test_parse_number(#[case] raw: &str, #[case] expected: Option<f64>) {
        assert_eq!(parse_number(raw), expected);
    }

    #[test]
    fn test_display_numbers_without_trailing_fraction() {
        assert_eq!(ArgValue::Num(3000.0).to_string(), "3000");
        assert_eq!(ArgValue::Num(1.5).to_string(), "1.5");
        assert_eq!(ArgValue::Num(-0.0).to_string(), "0");
    }

    #[rstest]
    #[case(1e21, "1e+21")]
    #[case(1.5e22, "1.5e+22")]
    #[case(-1e21, "-1e+21")]
    #[case(1e20, "100000000000000000000")]
    #[case(1e-7, "1e-7")]
    #[case(0.000001, "0.000001")]
    #[case(f64::INFINITY, "Infinity")]
    #[case(f64::NEG_INFINITY, "-Infinity")]
    #[case(f64::NAN, "NaN")]
    fn test_display_numbers_at_extremes(#[case] n: f64, #[case] expected: &str) {
        assert_eq!(ArgValue::Num(n).to_string(), expected);
    }

    #[test]
    fn test_infer() {
        assert_eq!(ArgValue::infer("true"), ArgValue::Bool(true));
        assert_eq!(ArgValue::infer("100"), ArgValue::Num(100.0));
        assert_eq!(ArgValue::infer("iPhone X"), ArgValue::from("iPhone X"));
    }
}
