use super::Error;

/// Error when a raw stored value does not fit its attribute's declared type.
#[derive(Debug)]
pub(super) struct TypeCoercionError {
    attribute: Box<str>,
    expected: Box<str>,
    actual: Box<str>,
}

impl std::error::Error for TypeCoercionError {}

impl core::fmt::Display for TypeCoercionError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "cannot coerce attribute `{}` to {} (got {})",
            self.attribute, self.expected, self.actual
        )
    }
}

impl Error {
    /// Creates a type coercion error.
    pub fn type_coercion(
        attribute: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::TypeCoercion(TypeCoercionError {
            attribute: attribute.into().into(),
            expected: expected.into().into(),
            actual: actual.into().into(),
        }))
    }

    /// Returns `true` if this error is a type coercion error.
    pub fn is_type_coercion(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::TypeCoercion(_))
    }
}
