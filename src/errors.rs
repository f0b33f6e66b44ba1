use thiserror::Error;

use crate::name::DomainName;

/// Errors raised while constructing or parsing a [`DomainName`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    #[error("empty domain name")]
    Empty,

    #[error("empty label in domain name")]
    EmptyLabel,

    #[error("label exceeds 63 bytes: {0}")]
    LabelTooLong(String),

    #[error("domain name exceeds 255 bytes ({0} bytes)")]
    NameTooLong(usize),

    #[error("invalid character {ch:?} in label {label:?}")]
    InvalidCharacter { label: String, ch: char },
}

/// Errors raised by structural tree operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("name not found: {0}")]
    NameNotFound(DomainName),
}

pub type TreeResult<T> = Result<T, TreeError>;
