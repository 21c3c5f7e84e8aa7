//! Exit code constants for CLI commands.

/// Successful operation.
pub const EXIT_SUCCESS: i32 = 0;

/// Any failure: invalid input, a rejected transaction, configuration or I/O
/// errors. Matches the code clap uses for usage errors.
pub const EXIT_ERROR: i32 = 2;
