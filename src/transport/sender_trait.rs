//! Trait abstraction for status delivery to enable testing

use async_trait::async_trait;

use crate::error::Result;

/// Delivers one encoded status message to a Xymon server
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatusSender: Send + Sync {
    /// Send `report` to `server` (`host` or `host:port`)
    async fn send(&self, server: &str, report: &str) -> Result<()>;
}
