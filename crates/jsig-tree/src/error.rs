use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    InvalidDescriptor(String),
    /// A generic signature the parser rejected.
    InvalidSignature {
        signature: String,
        position: usize,
        message: String,
    },
    Other(&'static str),
}

impl Error {
    pub fn invalid_signature(
        signature: impl Into<String>,
        position: usize,
        message: impl Into<String>,
    ) -> Self {
        Error::InvalidSignature {
            signature: signature.into(),
            position,
            message: message.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidDescriptor(desc) => write!(f, "invalid descriptor: {desc}"),
            Error::InvalidSignature {
                signature,
                position,
                message,
            } => write!(
                f,
                "invalid generic signature `{signature}` at offset {position}: {message}"
            ),
            Error::Other(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for Error {}
