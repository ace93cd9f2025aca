use core::fmt;

/// Every way an operation in this crate can fail.
///
/// All fallible operations return this type immediately; nothing is retried
/// or swallowed internally.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum Failure {
    /// The requested capacity exceeds [`MAX_CAPACITY`](crate::MAX_CAPACITY).
    InvalidCapacity {
        /// The capacity that was asked for.
        requested: usize,
    },
    /// The load factor was zero, negative or NaN.
    InvalidLoadFactor,
    /// A cursor was advanced past its end, or an extremum was requested from
    /// an empty collection.
    NoSuchElement,
    /// The container was structurally modified outside the cursor that
    /// observed it.
    ConcurrentModification,
    /// A cursor was asked to remove or replace before it yielded anything.
    IllegalState,
    /// A null key or value was handed to a container that forbids them.
    IllegalNull,
    /// A write was attempted through a read-only or constant container.
    MutationRejected,
    /// A checked view refused an item of the wrong runtime type.
    TypeMismatch {
        /// Name of the type the view was created for.
        expected: &'static str,
        /// Name of the type that was offered, or `"null"`.
        found: &'static str,
    },
    /// A positional access fell outside the sequence.
    IndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// The length of the sequence at the time of the access.
        len: usize,
    },
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Failure::InvalidCapacity { requested } => {
                write!(f, "capacity {requested} exceeds the maximum bucket count")
            }
            Failure::InvalidLoadFactor => f.write_str("load factor must be a positive number"),
            Failure::NoSuchElement => f.write_str("no such element"),
            Failure::ConcurrentModification => {
                f.write_str("container was modified outside of this cursor")
            }
            Failure::IllegalState => f.write_str("cursor has no current element"),
            Failure::IllegalNull => f.write_str("null keys and values are not permitted"),
            Failure::MutationRejected => f.write_str("container does not support mutation"),
            Failure::TypeMismatch { expected, found } => {
                write!(f, "expected an element of type {expected}, found {found}")
            }
            Failure::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for length {len}")
            }
        }
    }
}

impl core::error::Error for Failure {}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Failure>;

// Infallible constructors panic with the failure's message, like
// `Vec::with_capacity` does on overflow.
pub(crate) fn or_panic<T>(result: Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(failure) => panic!("{failure}"),
    }
}

pub(crate) fn check_index(index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(Failure::IndexOutOfBounds { index, len })
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            Failure::IndexOutOfBounds { index: 4, len: 3 }.to_string(),
            "index 4 out of bounds for length 3"
        );
        assert_eq!(
            Failure::TypeMismatch {
                expected: "i32",
                found: "null",
            }
            .to_string(),
            "expected an element of type i32, found null"
        );
        assert_eq!(
            Failure::InvalidCapacity { requested: 7 }.to_string(),
            "capacity 7 exceeds the maximum bucket count"
        );
    }

    #[test]
    fn test_check_index() {
        assert_eq!(check_index(0, 1), Ok(()));
        assert_eq!(
            check_index(1, 1),
            Err(Failure::IndexOutOfBounds { index: 1, len: 1 })
        );
    }
}
