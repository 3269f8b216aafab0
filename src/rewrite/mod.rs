//! Line-oriented address substitution over character streams.
//!
//! [`HostnameRewriter`] pulls lines from any async reader, finds
//! address-shaped tokens and substitutes each with the injected
//! resolver's current answer. All non-address text and whitespace pass
//! through verbatim. Combined with a
//! [`BackgroundResolver`](crate::resolver::BackgroundResolver) the
//! rewriter never stalls on a slow lookup: unresolved addresses simply
//! come through unchanged until the cache catches up.

mod scanner;

use crate::base::ResolveError;
use crate::resolver::{Address, Resolve};
use scanner::Segment;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader, Lines};

/// What to do with an address token once its name is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewriteMode {
    /// Substitute the token with the resolved name.
    #[default]
    Replace,
    /// Keep the token and append the resolved name in brackets,
    /// producing `<address> [<name>] `.
    Annotate,
}

/// Stream transformer that resolves addresses line by line.
///
/// Driven by one reading caller; the resolver it holds may be shared
/// with any number of other rewriters and tasks.
pub struct HostnameRewriter<R> {
    lines: Option<Lines<BufReader<R>>>,
    resolver: Arc<dyn Resolve>,
    mode: RewriteMode,
}

impl<R: AsyncRead + Unpin> HostnameRewriter<R> {
    /// Creates a rewriter over the given reader in [`RewriteMode::Replace`].
    pub fn new(reader: R, resolver: Arc<dyn Resolve>) -> Self {
        Self {
            lines: Some(BufReader::new(reader).lines()),
            resolver,
            mode: RewriteMode::default(),
        }
    }

    /// Sets the substitution mode.
    pub fn with_mode(mut self, mode: RewriteMode) -> Self {
        self.mode = mode;
        self
    }

    /// Pulls one line from the underlying stream and substitutes its
    /// address tokens.
    ///
    /// Returns `Ok(None)` once the stream is exhausted (or after
    /// [`close`](Self::close)). An empty line comes back as an empty
    /// line; lines without address-shaped tokens come back unchanged
    /// without any resolver call. Read failures from the underlying
    /// stream propagate as [`ResolveError::Read`].
    pub async fn read_line(&mut self) -> Result<Option<String>, ResolveError> {
        let Some(lines) = self.lines.as_mut() else {
            return Ok(None);
        };
        let Some(line) = lines.next_line().await? else {
            return Ok(None);
        };
        Ok(Some(self.rewrite(&line).await))
    }

    /// Releases the underlying stream. Idempotent; subsequent
    /// [`read_line`](Self::read_line) calls report end of stream.
    pub fn close(&mut self) {
        self.lines = None;
    }

    async fn rewrite(&self, line: &str) -> String {
        let mut out = String::with_capacity(line.len());
        for segment in scanner::segments(line) {
            match segment {
                Segment::Gap(text) => out.push_str(text),
                Segment::Token(token) if scanner::is_address(token) => {
                    let name = self.resolver.resolve(Address::new(token)).await;
                    match self.mode {
                        RewriteMode::Replace => out.push_str(&name),
                        RewriteMode::Annotate => {
                            out.push_str(token);
                            out.push_str(" [");
                            out.push_str(&name);
                            out.push_str("] ");
                        }
                    }
                }
                Segment::Token(text) => out.push_str(text),
            }
        }
        out
    }
}

impl<R> std::fmt::Debug for HostnameRewriter<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostnameRewriter")
            .field("mode", &self.mode)
            .field("closed", &self.lines.is_none())
            .finish_non_exhaustive()
    }
}
