//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (Environment, ArgParser)
//! but are themselves concrete structs, not traits.

mod resolver;

pub use resolver::ArgResolver;
