use std::fmt;

/// Error type for data accessor operations.
///
/// Absence is not an error: lookups return `Option`, removals and updates
/// return `bool`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataAccessError {
    /// The caller cancelled the operation before it took effect.
    Cancelled { operation: &'static str },
    /// A caller-supplied argument was rejected (e.g. a zero page size).
    InvalidArgument(String),
    /// Two seeded entities of the same kind share an identifier.
    DuplicateId { kind: &'static str, id: i32 },
    /// The kind already holds the largest representable identifier.
    IdentifiersExhausted { kind: &'static str },
    /// The store's internal state is inconsistent.
    Storage(String),
}

impl fmt::Display for DataAccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataAccessError::Cancelled { operation } => {
                write!(f, "{} cancelled before completion", operation)
            }
            DataAccessError::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            DataAccessError::DuplicateId { kind, id } => {
                write!(f, "duplicate {} identifier {}", kind, id)
            }
            DataAccessError::IdentifiersExhausted { kind } => {
                write!(f, "no {} identifiers left to assign", kind)
            }
            DataAccessError::Storage(msg) => write!(f, "storage error: {}", msg),
        }
    }
}

impl std::error::Error for DataAccessError {}
