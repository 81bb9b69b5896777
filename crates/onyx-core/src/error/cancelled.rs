use super::Error;

/// Error when a caller cancelled an in-flight resolution.
#[derive(Debug)]
pub(super) struct Cancelled;

impl std::error::Error for Cancelled {}

impl core::fmt::Display for Cancelled {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("resolution cancelled")
    }
}

/// Error when a resolution ran past its deadline.
#[derive(Debug)]
pub(super) struct DeadlineExceeded;

impl std::error::Error for DeadlineExceeded {}

impl core::fmt::Display for DeadlineExceeded {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("resolution deadline exceeded")
    }
}

impl Error {
    /// Creates a cancellation error.
    ///
    /// Raised between store round-trips once the caller's cancel token has
    /// been tripped.
    pub fn cancelled() -> Error {
        Error::from(super::ErrorKind::Cancelled(Cancelled))
    }

    /// Returns `true` if this error is a cancellation error.
    pub fn is_cancelled(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Cancelled(_))
    }

    /// Creates a deadline exceeded error.
    pub fn deadline_exceeded() -> Error {
        Error::from(super::ErrorKind::DeadlineExceeded(DeadlineExceeded))
    }

    /// Returns `true` if this error is a deadline exceeded error.
    pub fn is_deadline_exceeded(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::DeadlineExceeded(_))
    }
}
