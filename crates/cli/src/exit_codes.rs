//! CLI Exit Code Registry
//!
//! Single source of truth for every exit code `assessjoin` returns.
//! Scripts branch on these, so treat them as part of the shell contract.
//!
//! | Code | Meaning                                              |
//! |------|------------------------------------------------------|
//! | 0    | Success                                              |
//! | 1    | General error (unspecified)                          |
//! | 2    | Usage error (bad args, a source with no location)    |
//! | 3    | Input retrieval failed (file unreadable, HTTP error) |
//! | 4    | Config file unreadable or invalid                    |
//! | 5    | Output file could not be written                     |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant below
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - the join ran and the output was written.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, or a source with neither a path nor a URL.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Join (3-5)
// =============================================================================

/// An input could not be retrieved. Nothing was processed.
/// Covers unreadable files, transport errors and non-2xx HTTP responses.
pub const EXIT_INPUT: u8 = 3;

/// Config file could not be read, parsed or validated.
pub const EXIT_CONFIG: u8 = 4;

/// The joined CSV could not be written.
pub const EXIT_OUTPUT: u8 = 5;
