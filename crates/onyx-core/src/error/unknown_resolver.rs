use super::Error;

/// Error when a resolver name is not declared on the record's entity.
#[derive(Debug)]
pub(super) struct UnknownResolver {
    entity: Box<str>,
    resolver: Box<str>,
}

impl std::error::Error for UnknownResolver {}

impl core::fmt::Display for UnknownResolver {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "unknown resolver `{}.{}`", self.entity, self.resolver)
    }
}

impl Error {
    /// Creates an unknown resolver error.
    pub fn unknown_resolver(entity: impl Into<String>, resolver: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnknownResolver(UnknownResolver {
            entity: entity.into().into(),
            resolver: resolver.into().into(),
        }))
    }

    /// Returns `true` if this error is an unknown resolver error.
    pub fn is_unknown_resolver(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnknownResolver(_))
    }
}
