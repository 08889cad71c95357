use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed query string. Carries the byte offset of the offending
    /// character in the original input.
    QuerySyntax { offset: usize },
    NotFound,
    /// An index invariant would be violated. Unreachable under correct use.
    IndexCorruption,
    UnsupportedFormat,
    Extraction,
    Io,
    Parse,
}

#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub context: String,
}

impl Error {
    pub fn new(kind: ErrorKind, context: impl Into<String>) -> Self {
        Error {
            kind,
            context: context.into(),
        }
    }

    pub fn syntax(offset: usize, context: impl Into<String>) -> Self {
        Error::new(ErrorKind::QuerySyntax { offset }, context)
    }

    pub fn not_found(context: impl Into<String>) -> Self {
        Error::new(ErrorKind::NotFound, context)
    }

    pub fn corruption(context: impl Into<String>) -> Self {
        Error::new(ErrorKind::IndexCorruption, context)
    }

    /// Offset of the offending character, for query syntax errors.
    pub fn offset(&self) -> Option<usize> {
        match self.kind {
            ErrorKind::QuerySyntax { offset } => Some(offset),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            ErrorKind::QuerySyntax { offset } => {
                write!(f, "QuerySyntax at {}: {}", offset, self.context)
            }
            _ => write!(f, "{:?}: {}", self.kind, self.context),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error {
            kind: ErrorKind::Io,
            context: err.to_string(),
        }
    }
}

impl From<bincode::Error> for Error {
    fn from(err: bincode::Error) -> Self {
        Error {
            kind: ErrorKind::Parse,
            context: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
