//! Exit code contract for the obc CLI
//!
//! Three codes, stable for scripting: 0 success, 1 user error (bad
//! arguments, bad config, missing bucket or object, conflict, crypto
//! failure), 2 transport/remote error (endpoint unreachable, auth rejected,
//! backend failure). The CLI boundary is the only place that chooses one.

use obc_core::Error;

/// Exit codes for the obc binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Operation completed successfully
    Success = 0,

    /// Invalid input, missing resource, or local failure
    UserError = 1,

    /// Network, authentication, or backend failure
    RemoteError = 2,
}

impl ExitCode {
    /// Convert to i32 for std::process::exit
    #[inline]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Map a typed core error onto the contract
    pub const fn from_error(err: &Error) -> Self {
        match err.exit_code() {
            2 => Self::RemoteError,
            _ => Self::UserError,
        }
    }

    /// Human-readable description
    pub const fn description(self) -> &'static str {
        match self {
            Self::Success => "Operation completed successfully",
            Self::UserError => "User error",
            Self::RemoteError => "Transport or remote error",
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.as_i32()
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.description(), self.as_i32())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::UserError.as_i32(), 1);
        assert_eq!(ExitCode::RemoteError.as_i32(), 2);
    }

    #[test]
    fn test_from_error() {
        assert_eq!(
            ExitCode::from_error(&Error::Transport("unreachable".into())),
            ExitCode::RemoteError
        );
        assert_eq!(
            ExitCode::from_error(&Error::NotFound("bucket".into())),
            ExitCode::UserError
        );
        assert_eq!(
            ExitCode::from_error(&Error::Validation("bad".into())),
            ExitCode::UserError
        );
        assert_eq!(
            ExitCode::from_error(&Error::Crypto("no key".into())),
            ExitCode::UserError
        );
    }

    #[test]
    fn test_exit_code_display() {
        let display = format!("{}", ExitCode::RemoteError);
        assert!(display.contains("2"));
        assert!(display.contains("remote"));
    }
}
