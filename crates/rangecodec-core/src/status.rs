use thiserror::Error;

/// Error variants for the range coder and its container format.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodecError {
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Empty frequency model: cannot build cumulative ranges from a zero total")]
    EmptyModel,
    #[error("Frequency total {0} exceeds the coder's interval precision")]
    PrecisionExceeded(u32),
    #[error("Symbol {0:#04x} is not present in the frequency table")]
    UnknownSymbol(u8),
    #[error("Truncated stream: {0}")]
    Truncated(String),
    #[error("Malformed frame: {0}")]
    Malformed(String),
}

pub type Result<T> = std::result::Result<T, CodecError>;

impl From<std::io::Error> for CodecError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            CodecError::Truncated(err.to_string())
        } else {
            CodecError::IoError(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = CodecError::UnknownSymbol(0x41);
        assert_eq!(
            format!("{}", err),
            "Symbol 0x41 is not present in the frequency table"
        );
    }

    #[test]
    fn test_from_io_error() {
        let eof = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "failed to fill buffer");
        assert!(matches!(CodecError::from(eof), CodecError::Truncated(_)));

        let denied = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(matches!(CodecError::from(denied), CodecError::IoError(_)));
    }
}
