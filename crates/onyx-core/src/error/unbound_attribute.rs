use super::Error;

/// Error when a resolver references `this.<attr>` and the record being
/// resolved has no such attribute.
#[derive(Debug)]
pub(super) struct UnboundAttribute {
    entity: Box<str>,
    attribute: Box<str>,
}

impl std::error::Error for UnboundAttribute {}

impl core::fmt::Display for UnboundAttribute {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "attribute `{}` is not bound on `{}` record",
            self.attribute, self.entity
        )
    }
}

impl Error {
    /// Creates an unbound attribute error.
    pub fn unbound_attribute(entity: impl Into<String>, attribute: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnboundAttribute(UnboundAttribute {
            entity: entity.into().into(),
            attribute: attribute.into().into(),
        }))
    }

    /// Returns `true` if this error is an unbound attribute error.
    pub fn is_unbound_attribute(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnboundAttribute(_))
    }
}
