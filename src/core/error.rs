//! Purpose: Structured error model shared by the resolver, the JSON boundary, and the CLI.
//! Exports: `Error`, `ErrorKind`, `to_exit_code`.
//! Role: One error type for the whole crate; kinds map to stable process exit codes.
//! Invariants: The resolver only ever produces `ErrorKind::MissingKey`.
//! Invariants: Errors carry structured data; rendering is left to callers.
use std::error::Error as StdError;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Internal,
    Usage,
    MissingKey,
    Parse,
    Io,
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    hint: Option<String>,
    field: Option<String>,
    key: Option<String>,
    path: Option<PathBuf>,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            hint: None,
            field: None,
            key: None,
            path: None,
            source: None,
        }
    }

    /// A required field had no entry in the record; `key` is the key that was searched for.
    pub fn missing_key(field: impl Into<String>, key: impl Into<String>) -> Self {
        Self::new(ErrorKind::MissingKey)
            .with_field(field)
            .with_key(key)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.kind)?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        if let Some(field) = &self.field {
            write!(f, " (field: {field})")?;
        }
        if let Some(key) = &self.key {
            write!(f, " (key: {key:?})")?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn StdError + 'static))
    }
}

pub fn to_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Internal => 1,
        ErrorKind::Usage => 2,
        ErrorKind::MissingKey => 3,
        ErrorKind::Parse => 4,
        ErrorKind::Io => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, ErrorKind, to_exit_code};
    use std::error::Error as _;

    #[test]
    fn exit_code_mapping_is_stable() {
        let cases = [
            (ErrorKind::Internal, 1),
            (ErrorKind::Usage, 2),
            (ErrorKind::MissingKey, 3),
            (ErrorKind::Parse, 4),
            (ErrorKind::Io, 5),
        ];

        for (kind, code) in cases {
            assert_eq!(to_exit_code(kind), code);
        }
    }

    #[test]
    fn missing_key_carries_field_and_searched_key() {
        let err = Error::missing_key("firstName", "firstName");
        assert_eq!(err.kind(), ErrorKind::MissingKey);
        assert_eq!(err.field(), Some("firstName"));
        assert_eq!(err.key(), Some("firstName"));
        assert!(err.message().is_none());
        assert_eq!(
            err.to_string(),
            "MissingKey (field: firstName) (key: \"firstName\")"
        );
    }

    #[test]
    fn source_chain_is_exposed() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = Error::new(ErrorKind::Io)
            .with_message("failed to read payload")
            .with_path("/tmp/payload.json")
            .with_source(io);
        assert_eq!(err.source().map(|s| s.to_string()).as_deref(), Some("gone"));
        assert_eq!(
            err.to_string(),
            "Io: failed to read payload (path: /tmp/payload.json)"
        );
    }
}
