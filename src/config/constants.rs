//! Compile-time bounds baked into the binary. These are the defaults a
//! dialect's syntax-rule resource (spec §6) may override per dialect; the
//! crate itself never changes them at runtime.

pub mod compile_time {
    /// Fallback bounds used by [`crate::dialect::rules::DialectRules`] when
    /// a loaded syntax-rule resource does not specify its own.
    pub mod dialect {
        pub const DEFAULT_MAX_QUERY_LENGTH: usize = 8_192;
        pub const DEFAULT_MAX_NESTING_DEPTH: usize = 16;
        pub const DEFAULT_MAX_OPERATORS: usize = 256;
    }

    /// Resource limits for the logging subsystem.
    pub mod logging {
        /// Log buffer size for in-memory loggers.
        pub const LOG_BUFFER_SIZE: usize = 10_000;

        /// Maximum log message length before truncation.
        pub const MAX_LOG_MESSAGE_LENGTH: usize = 10_000;
    }
}
