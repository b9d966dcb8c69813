//! minimist-compatible argv parsing
//!
//! Long options: `--key=value`, `--key value`, `--key`, `--no-key`.
//! Short options: `-abc` (all `true`), `-n5`, `-k=value`, `-k value`.
//! `--` ends option parsing. Numeric-looking values become numbers.

use tracing::trace;

use crate::domain::value::parse_number;
use crate::domain::{ArgValue, ParsedArgs};

/// Stateless argv parser.
#[derive(Debug, Default, Clone, Copy)]
pub struct MinimistParser;

impl MinimistParser {
    /// Parse `argv` (without the program name).
    pub fn parse_args<S: AsRef<str>>(argv: &[S]) -> ParsedArgs {
        let mut parsed = ParsedArgs::new();
        let mut i = 0;

        while i < argv.len() {
            let arg = argv[i].as_ref();

            if arg == "--" {
                for rest in &argv[i + 1..] {
                    parsed.push_positional(rest.as_ref());
                }
                break;
            }

            if let Some(long) = arg.strip_prefix("--") {
                if let Some((key, value)) = long.split_once('=') {
                    parsed.set(key, coerce(value));
                } else if let Some(negated) = long.strip_prefix("no-").filter(|k| !k.is_empty()) {
                    parsed.set(negated, ArgValue::Bool(false));
                } else {
                    i += take_value(&mut parsed, long, argv.get(i + 1).map(|s| s.as_ref()));
                }
            } else if let Some(shorts) = arg.strip_prefix('-').filter(|s| !s.is_empty()) {
                i += parse_short_cluster(&mut parsed, shorts, argv.get(i + 1).map(|s| s.as_ref()));
            } else {
                parsed.push_positional(arg);
            }

            i += 1;
        }

        trace!("parsed argv: {:?}", parsed);
        parsed
    }
}

/// Assign `key` from the following token if it is a value, else `true`.
/// Returns how many extra tokens were consumed.
fn take_value(parsed: &mut ParsedArgs, key: &str, next: Option<&str>) -> usize {
    match next {
        Some("true") => {
            parsed.set(key, ArgValue::Bool(true));
            1
        }
        Some("false") => {
            parsed.set(key, ArgValue::Bool(false));
            1
        }
        Some(value) if !value.starts_with('-') => {
            parsed.set(key, coerce(value));
            1
        }
        _ => {
            parsed.set(key, ArgValue::Bool(true));
            0
        }
    }
}

fn parse_short_cluster(parsed: &mut ParsedArgs, shorts: &str, next: Option<&str>) -> usize {
    let letters: Vec<(usize, char)> = shorts.char_indices().collect();

    for (pos, &(offset, letter)) in letters.iter().enumerate() {
        let key = letter.to_string();
        let rest = &shorts[offset + letter.len_utf8()..];

        if pos + 1 == letters.len() {
            return take_value(parsed, &key, next);
        }

        if letter.is_ascii_alphabetic() {
            if let Some(value) = rest.strip_prefix('=') {
                parsed.set(key, coerce(value));
                return 0;
            }
            if parse_number(rest).is_some() {
                parsed.set(key, coerce(rest));
                return 0;
            }
        }

        parsed.set(key, ArgValue::Bool(true));
    }
    0
}

fn coerce(raw: &str) -> ArgValue {
    match parse_number(raw) {
        Some(n) => ArgValue::Num(n),
        None => ArgValue::Str(raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(argv: &[&str]) -> ParsedArgs {
        MinimistParser::parse_args(argv)
    }

    #[test]
    fn test_long_with_equals() {
        let parsed = parse(&["--configuration=ios.sim.release", "--retries=3"]);
        assert_eq!(
            parsed.get("configuration"),
            Some(&ArgValue::from("ios.sim.release"))
        );
        assert_eq!(parsed.get("retries"), Some(&ArgValue::Num(3.0)));
    }

    #[test]
    fn test_long_with_separate_value() {
        let parsed = parse(&["--device-name", "iPhone X", "--loglevel", "trace"]);
        assert_eq!(parsed.get("device-name"), Some(&ArgValue::from("iPhone X")));
        assert_eq!(parsed.get("loglevel"), Some(&ArgValue::from("trace")));
    }

    #[test]
    fn test_long_followed_by_option_is_flag() {
        let parsed = parse(&["--headless", "--record-logs", "all"]);
        assert_eq!(parsed.get("headless"), Some(&ArgValue::Bool(true)));
        assert_eq!(parsed.get("record-logs"), Some(&ArgValue::from("all")));
    }

    #[rstest]
    #[case(&["--cleanup", "true"], ArgValue::Bool(true))]
    #[case(&["--cleanup", "false"], ArgValue::Bool(false))]
    #[case(&["--no-cleanup"], ArgValue::Bool(false))]
    #[case(&["--cleanup"], ArgValue::Bool(true))]
    #[case(&["--cleanup=false"], ArgValue::from("false"))]
    fn test_boolean_forms(#[case] argv: &[&str], #[case] expected: ArgValue) {
        assert_eq!(parse(argv).get("cleanup"), Some(&expected));
    }

    #[test]
    fn test_short_cluster() {
        let parsed = parse(&["-abc", "value"]);
        assert_eq!(parsed.get("a"), Some(&ArgValue::Bool(true)));
        assert_eq!(parsed.get("b"), Some(&ArgValue::Bool(true)));
        assert_eq!(parsed.get("c"), Some(&ArgValue::from("value")));
    }

    #[test]
    fn test_short_with_attached_number_and_equals() {
        let parsed = parse(&["-n5", "-k=key"]);
        assert_eq!(parsed.get("n"), Some(&ArgValue::Num(5.0)));
        assert_eq!(parsed.get("k"), Some(&ArgValue::from("key")));
    }

    #[test]
    fn test_double_dash_ends_options() {
        let parsed = parse(&["run", "--debug", "--", "--not-an-option", "x"]);
        assert_eq!(parsed.get("debug"), Some(&ArgValue::Bool(true)));
        assert_eq!(parsed.get("not-an-option"), None);
        assert_eq!(parsed.positionals(), ["run", "--not-an-option", "x"]);
    }

    #[test]
    fn test_bare_dash_is_positional() {
        let parsed = parse(&["-"]);
        assert_eq!(parsed.positionals(), ["-"]);
        assert!(parsed.values().is_empty());
        assert!(!parsed.is_empty());
    }

    #[test]
    fn test_no_arguments_is_empty() {
        assert!(parse(&[]).is_empty());
    }

    #[test]
    fn test_flag_values_one_and_zero() {
        let parsed = parse(&["--flag-true", "1", "--flag-false", "0"]);
        assert_eq!(parsed.get("flag-true"), Some(&ArgValue::Num(1.0)));
        assert_eq!(parsed.get("flag-false"), Some(&ArgValue::Num(0.0)));
    }

    #[test]
    fn test_repeated_key_keeps_last() {
        let parsed = parse(&["--workers", "2", "--workers", "4"]);
        assert_eq!(parsed.get("workers"), Some(&ArgValue::Num(4.0)));
    }
}
