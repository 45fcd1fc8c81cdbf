use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The mapping was built from an explicit list of pairs and has no
    /// default value for pairs outside that list.
    #[error("pair is not part of the explicitly initialized similarity mapping")]
    UnmappedPair,

    #[error("length mismatch: {expected} pairs but {actual} similarity values")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("invalid value `{value}` for `{name}`: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("unknown configuration key `{0}`")]
    UnknownKey(String),
}
