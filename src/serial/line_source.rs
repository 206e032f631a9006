//! Trait abstraction for line-oriented transport reads to enable testing

use async_trait::async_trait;

use crate::error::Result;

/// Trait for line-oriented telemetry transports
#[async_trait]
pub trait LineSource: Send {
    /// Read the next line, without its trailing newline
    ///
    /// Suspends until a line is available. Fails with
    /// [`crate::error::ScopeError::TransportClosed`] once the transport
    /// reaches end of stream or is interrupted; other I/O failures map to
    /// [`crate::error::ScopeError::Io`]. Both are fatal to the session and
    /// propagate, unlike malformed line content which is the parser's
    /// business.
    async fn next_line(&mut self) -> Result<String>;

    /// Flush and release the transport
    async fn shutdown(&mut self) -> Result<()>;
}
