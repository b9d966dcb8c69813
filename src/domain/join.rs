//! Serialize an [`ArgsMap`] back into a command-line string.

use serde::{Deserialize, Serialize};

use crate::domain::args::ArgsMap;
use crate::domain::value::ArgValue;

/// How keys and values are spelled on output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct JoinOptions {
    /// Prepended to keys that do not already start with `-` (default `--`)
    pub prefix: String,
    /// Placed between key and value (default a single space)
    pub joiner: String,
}

impl Default for JoinOptions {
    fn default() -> Self {
        Self {
            prefix: "--".into(),
            joiner: " ".into(),
        }
    }
}

/// Join key-values into an argument string.
///
/// Absent values and `false` are dropped, `true` renders as a bare flag, and
/// values containing a space are double-quoted. Keys already starting with a
/// dash are used as is regardless of `options.prefix`.
pub fn join_args(args: &ArgsMap, options: &JoinOptions) -> String {
    let mut tokens = Vec::with_capacity(args.len());
    for (key, value) in args.iter() {
        let Some(value) = value else { continue };
        if matches!(value, ArgValue::Bool(false)) {
            continue;
        }

        let mut token = if key.starts_with('-') {
            key.to_string()
        } else {
            format!("{}{}", options.prefix, key)
        };

        if !matches!(value, ArgValue::Bool(true)) {
            let rendered = value.to_string();
            token.push_str(&options.joiner);
            if rendered.contains(' ') {
                token.push('"');
                token.push_str(&rendered);
                token.push('"');
            } else {
                token.push_str(&rendered);
            }
        }
        tokens.push(token);
    }
    tokens.join(" ")
}
