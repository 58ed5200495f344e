//! Identifier types for z-commerce.
//!
//! Every stored record is addressed by a [`DocumentId`] assigned by the document
//! store on insert. Identifiers arriving from callers (path parameters, references
//! inside a transaction) are parsed through [`DocumentId::parse`] so that blank or
//! malformed values never reach the store.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

/// Maximum accepted identifier length.
pub const MAX_ID_LEN: usize = 128;

/// A document identifier assigned by the store.
///
/// Store backends generate ULIDs, so freshly created identifiers sort by
/// creation time. Identifiers are otherwise opaque: any non-blank string without
/// path separators is accepted, which keeps records written by other tools
/// addressable.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentId(String);

impl DocumentId {
    /// Generate a new time-ordered identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Ulid::new().to_string())
    }

    /// Parse a caller-supplied identifier.
    ///
    /// Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is blank, too long, or contains a
    /// path separator or control character.
    pub fn parse(raw: &str) -> Result<Self, IdError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(IdError::Empty);
        }
        if trimmed.len() > MAX_ID_LEN {
            return Err(IdError::TooLong);
        }
        if trimmed.chars().any(|c| c == '/' || c.is_control()) {
            return Err(IdError::InvalidCharacter);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Return the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for DocumentId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Debug for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DocumentId({})", self.0)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for DocumentId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DocumentId> for String {
    fn from(id: DocumentId) -> Self {
        id.0
    }
}

impl AsRef<[u8]> for DocumentId {
    fn as_ref(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

/// Errors that can occur when parsing identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// The identifier is empty or only whitespace.
    #[error("identifier must not be empty")]
    Empty,

    /// The identifier exceeds [`MAX_ID_LEN`].
    #[error("identifier is too long")]
    TooLong,

    /// The identifier contains a path separator or control character.
    #[error("identifier contains an invalid character")]
    InvalidCharacter,
}
