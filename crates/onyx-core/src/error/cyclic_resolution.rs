use super::Error;

/// Error when a resolver transitively depends on itself for the same record.
///
/// The path lists every `Entity(id).resolver` frame that was active when the
/// cycle closed, ending with the frame that was requested a second time.
#[derive(Debug)]
pub(super) struct CyclicResolution {
    path: Box<[String]>,
}

impl std::error::Error for CyclicResolution {}

impl core::fmt::Display for CyclicResolution {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "cyclic resolution: {}", self.path.join(" -> "))
    }
}

impl Error {
    /// Creates a cyclic resolution error.
    pub fn cyclic_resolution(path: Vec<String>) -> Error {
        Error::from(super::ErrorKind::CyclicResolution(CyclicResolution {
            path: path.into(),
        }))
    }

    /// Returns `true` if this error is a cyclic resolution error.
    pub fn is_cyclic_resolution(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::CyclicResolution(_))
    }
}
