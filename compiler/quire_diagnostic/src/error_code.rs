use std::fmt;

/// Error codes for formatter diagnostics.
///
/// Format: E#### where the first digit indicates the phase:
/// - E1xxx: markup parse errors
/// - E2xxx: embedded-content errors
/// - E9xxx: internal errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    /// Element never closed
    E1001,
    /// Closing tag does not match the open element
    E1002,
    /// Unterminated comment
    E1003,
    /// Unbalanced `{` in text or attribute value
    E1004,
    /// Malformed tag or attribute
    E1005,
    /// Closing tag with no open element
    E1006,

    /// Embedded language or interpolation failed to format
    E2001,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E2001 => "E2001",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
