//! Flag resolution service
//!
//! Resolves a dash-cased key against, in order:
//! 1. `<PREFIX>_SNAKE_CASE` environment variable
//! 2. legacy `camelCase` environment variable
//! 3. parsed command-line arguments

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::Settings;
use crate::domain::{is_truthy_opt, join_args, ArgValue, ArgsMap, JoinOptions, Key};
use crate::infrastructure::traits::{ArgParser, Environment};

/// Service resolving flags from the environment and argv.
pub struct ArgResolver {
    env: Arc<dyn Environment>,
    args: Arc<dyn ArgParser>,
    settings: Arc<Settings>,
}

impl ArgResolver {
    /// Create a new resolver.
    pub fn new(env: Arc<dyn Environment>, args: Arc<dyn ArgParser>, settings: Arc<Settings>) -> Self {
        Self {
            env,
            args,
            settings,
        }
    }

    /// Resolve `key` to a string value, environment first.
    ///
    /// Environment values equal to the undefined sentinel are skipped.
    /// Argument values are stringified.
    pub fn get_arg_value(&self, key: impl Into<Key>) -> Option<String> {
        let key = key.into();
        self.get_env_value(&key)
            .or_else(|| self.get_raw_arg(key.as_str()).map(|v| v.to_string()))
    }

    /// Resolve `key` from parsed arguments only, without stringification.
    pub fn get_raw_arg(&self, key: &str) -> Option<ArgValue> {
        let value = self.args.parse().get(key).cloned();
        if let Some(v) = &value {
            debug!("{}: resolved from argv: {:?}", key, v);
        }
        value
    }

    /// Truthiness of the argument-sourced value. Unset is `false`.
    pub fn get_flag(&self, key: &str) -> bool {
        is_truthy_opt(self.get_raw_arg(key).as_ref())
    }

    /// Join with `options`, or the configured defaults when `None`.
    pub fn join_args(&self, args: &ArgsMap, options: Option<&JoinOptions>) -> String {
        join_args(args, options.unwrap_or(&self.settings.join))
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    fn get_env_value(&self, key: &Key) -> Option<String> {
        let mut candidates = vec![key.to_snake_env(&self.settings.env_prefix)];
        if self.settings.legacy_env_lookup {
            candidates.push(key.to_camel_env());
        }

        candidates.into_iter().find_map(|name| {
            let value = match self.env.var(&name) {
                Ok(value) => value?,
                Err(e) => {
                    warn!("ignoring {}: {}", name, e);
                    return None;
                }
            };
            if value == self.settings.undefined_sentinel {
                debug!("{}: holds the undefined sentinel, skipping", name);
                return None;
            }
            debug!("{}: resolved from env {}", key, name);
            Some(value)
        })
    }
}
