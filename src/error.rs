//! Error types for `did-iiot` crate
use serde_json::Error as SerdeJSONError;
use std::string::FromUtf8Error;
use thiserror::Error;

/// Error type for `did-iiot`.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Key parameter outside of its enumerated set of valid values
    #[error("Invalid {name}: {value}")]
    InvalidParameter {
        /// Name of the offending parameter
        name: &'static str,
        /// Rejected value, as given
        value: String,
    },
    /// Verification relationship entry is neither a DID URL nor a verification method
    #[error("Verification relationship must be either a string or a verification method, found {0}")]
    InvalidArgumentType(&'static str),
    /// Missing document ID
    #[error("Missing document ID")]
    MissingDocumentId,
    /// Document built without any verification method
    #[error("Missing verification method")]
    MissingVerificationMethod,
    /// Property did not serialize to a JSON object
    #[error("Expected object")]
    ExpectedObject,
    /// Document could not be built
    #[error("Invalid DID document: {0}")]
    InvalidDocument(String),
    /// Error (de)serializing JSON
    #[error(transparent)]
    SerdeJSON(#[from] SerdeJSONError),
    /// Error parsing a UTF-8 string
    #[error(transparent)]
    FromUtf8(#[from] FromUtf8Error),
}

impl From<Error> for String {
    fn from(err: Error) -> String {
        format!("{}", err)
    }
}
