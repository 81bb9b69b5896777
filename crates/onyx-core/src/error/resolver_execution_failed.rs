use super::Error;

/// Error when the store fails while a resolver is being evaluated.
///
/// Always carries the store error as its cause.
#[derive(Debug)]
pub(super) struct ResolverExecutionFailed {
    entity: Box<str>,
    id: Box<str>,
    resolver: Box<str>,
}

impl std::error::Error for ResolverExecutionFailed {}

impl core::fmt::Display for ResolverExecutionFailed {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "failed to resolve `{}.{}` for id `{}`",
            self.entity, self.resolver, self.id
        )
    }
}

impl Error {
    /// Creates a resolver execution error.
    ///
    /// Use it as context around the store error:
    /// `err.context(Error::resolver_execution_failed(..))`.
    pub fn resolver_execution_failed(
        entity: impl Into<String>,
        id: impl Into<String>,
        resolver: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::ResolverExecutionFailed(
            ResolverExecutionFailed {
                entity: entity.into().into(),
                id: id.into().into(),
                resolver: resolver.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is a resolver execution error.
    pub fn is_resolver_execution_failed(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::ResolverExecutionFailed(_))
    }
}
