//! CLI Exit Code Registry
//!
//! Single source of truth for exit codes. They are part of the shell
//! contract; scheduled jobs branch on them.
//!
//! | Code | Meaning                                             |
//! |------|-----------------------------------------------------|
//! | 0    | Success                                             |
//! | 1    | General error (unspecified)                         |
//! | 2    | Usage error (bad args, bad settings)                |
//! | 3    | Audit ran and found at least one inconsistency      |
//! | 4    | Source unavailable (workbook or store missing)      |
//! | 5    | Workbook does not match the layout contract         |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, unreadable settings file.
pub const EXIT_USAGE: u8 = 2;

/// The audit completed but at least one reconciliation was
/// inconsistent. Like `diff(1)`, this is a finding, not a failure.
pub const EXIT_INCONSISTENT: u8 = 3;

/// A required input could not be opened (workbook file, store file).
pub const EXIT_SOURCE_UNAVAILABLE: u8 = 4;

/// The workbook opened but a sheet violates the layout contract:
/// text in a numeric position under fail-fast, or a missing header.
pub const EXIT_MALFORMED: u8 = 5;
