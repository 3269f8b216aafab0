use std::io;
use thiserror::Error;

/// Errors surfaced by the resolver stack and the stream rewriter.
///
/// Resolution failures are deliberately absent: an address that cannot be
/// resolved degrades to itself (see [`crate::resolver::Resolve`]) and is
/// never reported as an error.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Background resolution was requested without caching. The worker
    /// pool populates the cache as its only output, so this combination
    /// is rejected at construction time.
    #[error("background resolution requires caching to be enabled")]
    BackgroundRequiresCaching,

    /// The underlying character stream failed while reading a line.
    #[error("stream read failed")]
    Read(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::ErrorKind;

    #[test]
    fn test_display_messages() {
        let err = ResolveError::BackgroundRequiresCaching;
        assert_eq!(
            err.to_string(),
            "background resolution requires caching to be enabled"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(ErrorKind::BrokenPipe, "pipe closed");
        let err = ResolveError::from(io_err);
        match err {
            ResolveError::Read(source) => assert_eq!(source.kind(), ErrorKind::BrokenPipe),
            _ => panic!("expected Read variant"),
        }
    }
}
