use super::Error;

/// Error when a resolver expression cannot be compiled.
///
/// Only the offending resolver is affected; other resolvers of the same
/// entity compile independently.
#[derive(Debug)]
pub(super) struct MalformedResolver {
    entity: Box<str>,
    resolver: Box<str>,
    message: Box<str>,
}

impl std::error::Error for MalformedResolver {}

impl core::fmt::Display for MalformedResolver {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "malformed resolver `{}.{}`: {}",
            self.entity, self.resolver, self.message
        )
    }
}

impl Error {
    /// Creates a malformed resolver error.
    pub fn malformed_resolver(
        entity: impl Into<String>,
        resolver: impl Into<String>,
        message: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::MalformedResolver(MalformedResolver {
            entity: entity.into().into(),
            resolver: resolver.into().into(),
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a malformed resolver error.
    pub fn is_malformed_resolver(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::MalformedResolver(_))
    }
}
