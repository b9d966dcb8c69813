//! Domain layer: keys, values and argument serialization
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod args;
pub mod error;
pub mod join;
pub mod key;
pub mod value;

pub use args::{ArgsMap, ParsedArgs};
pub use error::DomainError;
pub use join::{join_args, JoinOptions};
pub use key::Key;
pub use value::{is_truthy_opt, ArgValue};
