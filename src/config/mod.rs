//! Configuration: compile-time bounds plus runtime (environment-driven)
//! preferences. No filesystem or network access — see spec §6's "no
//! process-wide configuration" rule for the core; this module only backs
//! the ambient logging stack and the dialect compiler's default bounds.

pub mod constants;
pub mod runtime;

pub use constants::compile_time;
