//! Resolve flags for an e2e test tool.
//!
//! A key such as `device-name` is looked up in `DETOX_DEVICE_NAME`, then the
//! legacy `deviceName`, then the parsed command line. [`ArgResolver`] also
//! answers boolean flags and joins key-values back into an argument string.
//!
//! ```
//! use std::sync::Arc;
//! use argresolve::config::Settings;
//! use argresolve::infrastructure::traits::{SnapshotEnvironment, StaticArgParser};
//! use argresolve::ArgResolver;
//!
//! let env: SnapshotEnvironment = [("DETOX_CONFIGURATION", "ios.sim.release")].into_iter().collect();
//! let resolver = ArgResolver::new(
//!     Arc::new(env),
//!     Arc::new(StaticArgParser::from_argv(&["--headless"])),
//!     Arc::new(Settings::default()),
//! );
//!
//! assert_eq!(resolver.get_arg_value("configuration").as_deref(), Some("ios.sim.release"));
//! assert!(resolver.get_flag("headless"));
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use application::services::ArgResolver;
pub use domain::{join_args, ArgValue, ArgsMap, JoinOptions, Key};
