use std::fmt;

/// Convenience alias for results returned by this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a menu.
///
/// Rendering never fails; every error surfaces while items are constructed
/// or definitions are loaded.
#[derive(Debug, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
}

impl Error {
    /// Creates a new error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Shorthand for an [`ErrorKind::InvalidItem`] error on `field`.
    pub(crate) fn invalid_item(field: &'static str) -> Self {
        Self::new(
            ErrorKind::InvalidItem { field },
            format!("`{}` must not be empty", field),
        )
    }

    /// Returns the error kind.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Returns the human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::new(ErrorKind::InvalidDefinition, e.to_string())
    }
}

/// The kind of menu error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required item field was empty
    InvalidItem {
        /// Name of the offending field
        field: &'static str,
    },
    /// A declarative menu definition could not be parsed
    InvalidDefinition,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::InvalidItem { field } => write!(f, "Invalid item field '{}'", field),
            ErrorKind::InvalidDefinition => write!(f, "Invalid menu definition"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_item_names_the_field() {
        let err = Error::invalid_item("label");

        assert_eq!(err.kind(), &ErrorKind::InvalidItem { field: "label" });
        assert_eq!(
            err.to_string(),
            "Invalid item field 'label': `label` must not be empty"
        );
    }

    #[test]
    fn json_errors_become_invalid_definition() {
        let parse = serde_json::from_str::<Vec<u8>>("not json").unwrap_err();
        let err: Error = parse.into();

        assert_eq!(err.kind(), &ErrorKind::InvalidDefinition);
        assert!(err.to_string().starts_with("Invalid menu definition"));
    }
}
