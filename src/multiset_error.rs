use std::fmt;

use log::warn;

/// Errors raised by the counted `Multiset` operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultisetError {
    /// A multiplicity argument was negative, or adding it would overflow the
    /// total size of the multiset.
    InvalidArgument { count: i64 },
}

impl fmt::Display for MultisetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MultisetError::InvalidArgument { count } => {
                write!(f, "invalid multiplicity {}: negative or overflows the multiset size", count)
            }
        }
    }
}

impl std::error::Error for MultisetError {}

pub type Result<T> = std::result::Result<T, MultisetError>;

/// Converts a caller supplied multiplicity into an element count.
pub(crate) fn checked_count(count: i64) -> Result<usize> {
    usize::try_from(count).map_err(|_| {
        warn!("rejected multiplicity argument {}", count);
        MultisetError::InvalidArgument { count }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_counts_are_rejected() {
        assert_eq!(
            checked_count(-1),
            Err(MultisetError::InvalidArgument { count: -1 })
        );
        assert_eq!(checked_count(0), Ok(0));
        assert_eq!(checked_count(7), Ok(7));
    }

    #[test]
    fn message_names_the_count() {
        let err = MultisetError::InvalidArgument { count: -3 };
        assert_eq!(err.to_string(), "invalid multiplicity -3: negative or overflows the multiset size");
    }
}
