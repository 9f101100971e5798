//! Error taxonomy for the line editor
//!
//! Every error is handled where it is detected and rendered as a single
//! line of user-facing text. The `Display` impl is that line.

/// Errors produced while executing an editor command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// Address outside `[1, count]`
    InvalidAddress,
    /// Insert attempted with the buffer at its line capacity
    BufferFull,
    /// Line exceeds the configured maximum length
    LineTooLong,
    /// Save attempted and no filename was ever given
    NoFilenameSpecified,
    /// Persistence target could not be opened for writing
    FileWriteFailure(String),
    /// Input did not parse as any known command
    UnknownCommand,
}

impl EditError {
    /// Short machine-friendly name, used in log lines
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidAddress => "invalid_address",
            Self::BufferFull => "buffer_full",
            Self::LineTooLong => "line_too_long",
            Self::NoFilenameSpecified => "no_filename",
            Self::FileWriteFailure(_) => "file_write_failure",
            Self::UnknownCommand => "unknown_command",
        }
    }
}

impl std::fmt::Display for EditError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidAddress | Self::UnknownCommand => write!(f, "?"),
            Self::BufferFull => write!(f, "Buffer full"),
            Self::LineTooLong => write!(f, "Line too long"),
            Self::NoFilenameSpecified => write!(f, "No filename specified"),
            // The underlying reason only goes to the log
            Self::FileWriteFailure(_) => write!(f, "Can't write file"),
        }
    }
}

impl std::error::Error for EditError {}

pub type EditResult<T> = Result<T, EditError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_and_unknown_render_as_question_mark() {
        assert_eq!(EditError::InvalidAddress.to_string(), "?");
        assert_eq!(EditError::UnknownCommand.to_string(), "?");
    }

    #[test]
    fn test_write_failure_hides_os_reason() {
        let err = EditError::FileWriteFailure("permission denied".to_string());
        assert_eq!(err.to_string(), "Can't write file");
        assert_eq!(err.kind(), "file_write_failure");
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(EditError::BufferFull.to_string(), "Buffer full");
        assert_eq!(
            EditError::NoFilenameSpecified.to_string(),
            "No filename specified"
        );
        assert_eq!(EditError::LineTooLong.to_string(), "Line too long");
    }
}
