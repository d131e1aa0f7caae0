//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! | Code | Description                                             |
//! |------|---------------------------------------------------------|
//! | 0    | Success                                                 |
//! | 1    | General error (store, terminal, I/O)                    |
//! | 2    | Usage error (bad args, unusable settings, no terminal)  |
//!
//! clap exits with 2 on its own for malformed arguments.

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - the store could not be opened, the terminal failed,
/// or output could not be written.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, a settings file describing an impossible
/// board, or the editor started without a terminal.
pub const EXIT_USAGE: u8 = 2;
