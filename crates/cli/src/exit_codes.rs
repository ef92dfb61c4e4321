//! CLI Exit Code Registry
//!
//! Single source of truth for `sheetsense` exit codes. Scripts rely on them.
//!
//! | Code | Meaning                                   |
//! |------|-------------------------------------------|
//! | 0    | Success                                   |
//! | 1    | General error (IO, unexpected failure)    |
//! | 2    | Usage error (bad args, missing file)      |
//! | 3    | Input could not be parsed as a grid       |
//! | 4    | Configuration file invalid                |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// Input parse error - malformed JSON snapshot or CSV.
pub const EXIT_INPUT_PARSE: u8 = 3;

/// Config error - unreadable, unparseable or invalid structure.toml.
pub const EXIT_CONFIG: u8 = 4;
