mod adhoc;
mod cancelled;
mod cyclic_resolution;
mod driver_operation_failed;
mod invalid_config;
mod invalid_schema;
mod malformed_resolver;
mod resolver_execution_failed;
mod type_coercion;
mod unbound_attribute;
mod unknown_entity;
mod unknown_resolver;

use adhoc::AdhocError;
use cancelled::{Cancelled, DeadlineExceeded};
use cyclic_resolution::CyclicResolution;
use driver_operation_failed::DriverOperationFailed;
use invalid_config::InvalidConfig;
use invalid_schema::InvalidSchema;
use malformed_resolver::MalformedResolver;
use resolver_execution_failed::ResolverExecutionFailed;
use std::sync::Arc;
use type_coercion::TypeCoercionError;
use unbound_attribute::UnboundAttribute;
use unknown_entity::UnknownEntity;
use unknown_resolver::UnknownResolver;

/// An error that can occur in Onyx.
///
/// `Error` is a single pointer wide and cheap to clone, so a compiled
/// resolver that failed to compile can keep its error around and hand out
/// copies every time the resolver is requested.
#[derive(Clone)]
pub struct Error {
    inner: Option<Arc<ErrorInner>>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

impl Error {
    /// Adds context to this error.
    ///
    /// Context is displayed in reverse order: the most recently added context
    /// is shown first, followed by earlier context, ending with the root cause.
    #[inline(always)]
    pub fn context(self, consequent: impl IntoError) -> Error {
        self.context_impl(consequent.into_error())
    }

    #[inline(never)]
    #[cold]
    fn context_impl(self, consequent: Error) -> Error {
        let mut err = consequent;
        if err.inner.is_none() {
            err = Error::from(ErrorKind::Unknown);
        }

        match err.inner.as_mut().and_then(Arc::get_mut) {
            Some(inner) => {
                debug_assert!(
                    inner.cause.is_none(),
                    "consequent error must not already have a cause"
                );
                inner.cause = Some(self);
                err
            }
            // The consequent is shared; wrap it instead of mutating.
            None => Error {
                inner: Some(Arc::new(ErrorInner {
                    kind: ErrorKind::Adhoc(AdhocError::new(err.to_string())),
                    cause: Some(self),
                })),
            },
        }
    }

    /// Returns the error this one wraps, if any.
    pub fn cause(&self) -> Option<&Error> {
        self.inner.as_ref().and_then(|inner| inner.cause.as_ref())
    }

    /// Returns the innermost error of the context chain.
    pub fn root(&self) -> &Error {
        let mut err = self;
        while let Some(cause) = err.cause() {
            err = cause;
        }
        err
    }

    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.cause()?;
            Some(err)
        }))
    }

    fn kind(&self) -> &ErrorKind {
        self.inner
            .as_ref()
            .map(|inner| &inner.kind)
            .unwrap_or(&ErrorKind::Unknown)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        if let Some(cause) = self.cause() {
            return Some(cause);
        }

        match self.kind() {
            ErrorKind::DriverOperationFailed(err) => Some(err),
            ErrorKind::Anyhow(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            let Some(ref inner) = self.inner else {
                return f.debug_struct("Error").field("kind", &"None").finish();
            };
            f.debug_struct("Error")
                .field("kind", &inner.kind)
                .field("cause", &inner.cause)
                .finish()
        }
    }
}

#[derive(Debug)]
enum ErrorKind {
    Anyhow(anyhow::Error),
    Adhoc(AdhocError),
    Cancelled(Cancelled),
    CyclicResolution(CyclicResolution),
    DeadlineExceeded(DeadlineExceeded),
    DriverOperationFailed(DriverOperationFailed),
    InvalidConfig(InvalidConfig),
    InvalidSchema(InvalidSchema),
    MalformedResolver(MalformedResolver),
    ResolverExecutionFailed(ResolverExecutionFailed),
    TypeCoercion(TypeCoercionError),
    UnboundAttribute(UnboundAttribute),
    UnknownEntity(UnknownEntity),
    UnknownResolver(UnknownResolver),
    Unknown,
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self {
            Anyhow(err) => core::fmt::Display::fmt(err, f),
            Adhoc(err) => core::fmt::Display::fmt(err, f),
            Cancelled(err) => core::fmt::Display::fmt(err, f),
            CyclicResolution(err) => core::fmt::Display::fmt(err, f),
            DeadlineExceeded(err) => core::fmt::Display::fmt(err, f),
            DriverOperationFailed(err) => core::fmt::Display::fmt(err, f),
            InvalidConfig(err) => core::fmt::Display::fmt(err, f),
            InvalidSchema(err) => core::fmt::Display::fmt(err, f),
            MalformedResolver(err) => core::fmt::Display::fmt(err, f),
            ResolverExecutionFailed(err) => core::fmt::Display::fmt(err, f),
            TypeCoercion(err) => core::fmt::Display::fmt(err, f),
            UnboundAttribute(err) => core::fmt::Display::fmt(err, f),
            UnknownEntity(err) => core::fmt::Display::fmt(err, f),
            UnknownResolver(err) => core::fmt::Display::fmt(err, f),
            Unknown => f.write_str("unknown onyx error"),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Some(Arc::new(ErrorInner { kind, cause: None })),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        Error::from(ErrorKind::Anyhow(err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        Error::from(anyhow::Error::from(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        Error::from(anyhow::Error::from(err))
    }
}

/// Trait for types that can be converted into an Error.
pub trait IntoError {
    /// Converts this type into an Error.
    fn into_error(self) -> Error;
}

impl IntoError for Error {
    #[inline(always)]
    fn into_error(self) -> Error {
        self
    }
}
