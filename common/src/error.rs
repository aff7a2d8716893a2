use thiserror::Error;

/// Reasons a range token fails to parse.
///
/// Every variant carries the offending text so configuration authors can find it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("range token is empty")]
    EmptyToken,

    #[error("'{0}' mixes span ('-') and prefix ('/') notation")]
    MixedNotation(String),

    #[error("'{token}' has {count} octets, expected 4")]
    OctetCount { token: String, count: usize },

    #[error("invalid octet '{0}'")]
    InvalidOctet(String),

    #[error("octet value {value} in '{token}' is out of range 0-255")]
    OctetOutOfRange { token: String, value: u64 },

    #[error("octet span '{0}' has its lower bound above its upper bound")]
    InvertedOctetSpan(String),

    #[error("'{0}' must be a literal dotted-quad address")]
    NotLiteralAddress(String),

    #[error("invalid prefix length '{0}', expected 0-32 or a dotted netmask")]
    InvalidPrefix(String),

    #[error("'{0}' is not a standard netmask")]
    UnknownNetmask(String),

    #[error("span '{0}' must have exactly one '-' between two addresses")]
    MalformedSpan(String),
}
