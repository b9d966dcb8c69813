//! I/O boundary traits for testability
//!
//! These traits abstract the process environment and the argv parser,
//! allowing the resolver to be tested with in-memory implementations.

use std::collections::HashMap;
use std::ffi::OsString;
use std::sync::{Arc, OnceLock};

use thiserror::Error;

use crate::domain::ParsedArgs;
use crate::infrastructure::argv::MinimistParser;

/// An environment variable exists but cannot be read as a string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvVarError {
    #[error("environment variable {name} is not valid unicode: {value:?}")]
    NotUnicode { name: String, value: OsString },
}

/// Read-only key-value configuration source.
pub trait Environment: Send + Sync {
    /// Look up a variable. `Ok(None)` if it is not set.
    fn var(&self, name: &str) -> Result<Option<String>, EnvVarError>;
}

/// Source of parsed command-line arguments.
pub trait ArgParser: Send + Sync {
    /// Parse and return the argument mapping.
    fn parse(&self) -> Arc<ParsedArgs>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Reads the live process environment on every lookup.
#[derive(Debug, Default)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn var(&self, name: &str) -> Result<Option<String>, EnvVarError> {
        match std::env::var(name) {
            Ok(value) => Ok(Some(value)),
            Err(std::env::VarError::NotPresent) => Ok(None),
            Err(std::env::VarError::NotUnicode(value)) => Err(EnvVarError::NotUnicode {
                name: name.to_string(),
                value,
            }),
        }
    }
}

/// Frozen set of variables, either captured from the process or built by hand.
#[derive(Debug, Default, Clone)]
pub struct SnapshotEnvironment {
    vars: HashMap<String, String>,
}

impl SnapshotEnvironment {
    /// Capture the current process environment, skipping non-unicode entries.
    pub fn capture() -> Self {
        std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.vars.remove(name)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SnapshotEnvironment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl Environment for SnapshotEnvironment {
    fn var(&self, name: &str) -> Result<Option<String>, EnvVarError> {
        Ok(self.vars.get(name).cloned())
    }
}

/// Parses the process arguments (minus the program name) once per process.
#[derive(Debug, Default)]
pub struct ProcessArgParser {
    cache: OnceLock<Arc<ParsedArgs>>,
}

impl ProcessArgParser {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ArgParser for ProcessArgParser {
    fn parse(&self) -> Arc<ParsedArgs> {
        self.cache
            .get_or_init(|| {
                let argv: Vec<String> = std::env::args_os()
                    .skip(1)
                    .map(|a| a.to_string_lossy().into_owned())
                    .collect();
                Arc::new(MinimistParser::parse_args(&argv))
            })
            .clone()
    }
}

/// Serves a fixed, already parsed argument set.
#[derive(Debug, Default, Clone)]
pub struct StaticArgParser {
    parsed: Arc<ParsedArgs>,
}

impl StaticArgParser {
    pub fn new(parsed: ParsedArgs) -> Self {
        Self {
            parsed: Arc::new(parsed),
        }
    }

    /// Parse `argv` with [`MinimistParser`] and serve the result.
    pub fn from_argv<S: AsRef<str>>(argv: &[S]) -> Self {
        Self::new(MinimistParser::parse_args(argv))
    }
}

impl ArgParser for StaticArgParser {
    fn parse(&self) -> Arc<ParsedArgs> {
        Arc::clone(&self.parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ArgValue;

    #[test]
    fn test_process_environment_reads_set_variable() {
        std::env::set_var("ARGRESOLVE_TRAITS_TEST_SET", "present");
        let env = ProcessEnvironment;
        assert_eq!(
            env.var("ARGRESOLVE_TRAITS_TEST_SET").unwrap(),
            Some("present".to_string())
        );
        std::env::remove_var("ARGRESOLVE_TRAITS_TEST_SET");
    }

    #[test]
    fn test_process_environment_missing_is_none() {
        let env = ProcessEnvironment;
        assert_eq!(env.var("ARGRESOLVE_TRAITS_TEST_NEVER_SET").unwrap(), None);
    }

    #[test]
    fn test_snapshot_environment_is_isolated_from_process() {
        let mut env: SnapshotEnvironment = [("fooBar", "legacy")].into_iter().collect();
        env.set("DETOX_FOO_BAR", "new");
        assert_eq!(env.var("DETOX_FOO_BAR").unwrap(), Some("new".to_string()));
        assert_eq!(env.remove("fooBar"), Some("legacy".to_string()));
        assert_eq!(env.var("fooBar").unwrap(), None);
    }

    #[test]
    fn test_snapshot_capture_freezes_process_environment() {
        std::env::set_var("ARGRESOLVE_TRAITS_TEST_CAPTURE", "before");
        let env = SnapshotEnvironment::capture();
        std::env::set_var("ARGRESOLVE_TRAITS_TEST_CAPTURE", "after");

        let value = env.var("ARGRESOLVE_TRAITS_TEST_CAPTURE").unwrap();
        std::env::remove_var("ARGRESOLVE_TRAITS_TEST_CAPTURE");

        assert_eq!(value, Some("before".to_string()));
    }

    #[test]
    fn test_static_parser_serves_same_snapshot() {
        let parser = StaticArgParser::from_argv(&["--timeout", "3000"]);
        let first = parser.parse();
        let second = parser.parse();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.get("timeout"), Some(&ArgValue::Num(3000.0)));
    }

    #[test]
    fn test_process_parser_memoizes() {
        let parser = ProcessArgParser::new();
        assert!(Arc::ptr_eq(&parser.parse(), &parser.parse()));
    }
}
