//! Infrastructure layer: environment and argv implementations, DI container
//!
//! This layer implements the I/O boundary traits and wires up the resolver.

pub mod argv;
pub mod di;
pub mod error;
pub mod traits;

pub use argv::MinimistParser;
pub use error::{InfraError, InfraResult};
