use std::fmt;

/// Failure kinds for credential hashing and verification.
///
/// Every variant is fatal to the call that raised it; nothing is retried
/// internally. Malformed stored data always surfaces as an error rather than
/// a "not verified" result, so data corruption cannot hide behind a failed
/// login attempt.
#[derive(Debug)]
pub enum CredentialError {
    /// The credential carries no side-channel parameter mapping.
    MissingParameters,
    /// Stored credential data could not be decoded: bad Base64, missing or
    /// non-numeric cost parameters, or no recoverable digest segment.
    Decoding(String),
    /// The key-derivation primitive failed or rejected its parameters. All
    /// rejections share this kind, so callers cannot tell a bad password
    /// apart from bad parameters through the error channel.
    Hashing(String),
}

impl fmt::Display for CredentialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialError::MissingParameters => {
                write!(f, "credential has no hashing parameters")
            }
            CredentialError::Decoding(msg) => write!(f, "malformed credential data: {msg}"),
            CredentialError::Hashing(msg) => write!(f, "password hashing failed: {msg}"),
        }
    }
}

impl std::error::Error for CredentialError {}
