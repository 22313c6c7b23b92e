//! # Status Transport Module
//!
//! Delivers encoded Xymon status messages over UDP.
//!
//! This module handles:
//! - Defaulting the server port to 1984
//! - Resolving the server address
//! - Sending each message as a single datagram on a fresh socket
//!
//! Delivery is best effort: there is no acknowledgement and no retry.

pub mod sender_trait;

use async_trait::async_trait;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use tokio::net::{lookup_host, UdpSocket};
use tracing::debug;

use crate::error::{CuspXymonError, Result};
use crate::xymon::protocol::XYMON_DEFAULT_PORT;

pub use sender_trait::StatusSender;

/// UDP status sender
///
/// Opens one socket per message; the socket is closed when the send
/// completes or fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct UdpSender;

impl UdpSender {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl StatusSender for UdpSender {
    /// Send a status message to the Xymon server
    ///
    /// # Errors
    ///
    /// Returns [`CuspXymonError::Transport`] if the server cannot be
    /// resolved or the datagram cannot be sent.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use cusp_xymon::transport::{StatusSender, UdpSender};
    ///
    /// #[tokio::main(flavor = "current_thread")]
    /// async fn main() -> anyhow::Result<()> {
    ///     UdpSender::new()
    ///         .send("xymon.example.net", "status cusp.temp green Tue Mar 04 05:06:07 2014\n\n")
    ///         .await?;
    ///     Ok(())
    /// }
    /// ```
    async fn send(&self, server: &str, report: &str) -> Result<()> {
        let address = with_default_port(server);
        let target = resolve(&address).await?;

        let local = if target.is_ipv4() {
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
        } else {
            SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
        };

        let socket = UdpSocket::bind(local)
            .await
            .map_err(|e| CuspXymonError::Transport(format!("Failed to open socket for {}: {}", address, e)))?;

        socket
            .send_to(report.as_bytes(), target)
            .await
            .map_err(|e| CuspXymonError::Transport(format!("Failed to send to {}: {}", address, e)))?;

        debug!("Sent status to {} ({} bytes)", target, report.len());
        Ok(())
    }
}

async fn resolve(address: &str) -> Result<SocketAddr> {
    lookup_host(address)
        .await
        .map_err(|e| CuspXymonError::Transport(format!("Failed to resolve {}: {}", address, e)))?
        .next()
        .ok_or_else(|| CuspXymonError::Transport(format!("No addresses found for {}", address)))
}

/// Append the default Xymon port unless one is already given
///
/// Bare IPv6 literals are bracketed before the port is added.
///
/// # Examples
///
/// ```
/// use cusp_xymon::transport::with_default_port;
///
/// assert_eq!(with_default_port("xymon"), "xymon:1984");
/// assert_eq!(with_default_port("xymon:1985"), "xymon:1985");
/// assert_eq!(with_default_port("::1"), "[::1]:1984");
/// ```
pub fn with_default_port(server: &str) -> String {
    if server.parse::<SocketAddr>().is_ok() {
        return server.to_string();
    }

    // a single colon always separates host and port, even a bad one
    match server.matches(':').count() {
        0 => format!("{}:{}", server, XYMON_DEFAULT_PORT),
        1 => server.to_string(),
        _ if server.starts_with('[') => {
            if server.ends_with(']') {
                format!("{}:{}", server, XYMON_DEFAULT_PORT)
            } else {
                server.to_string()
            }
        }
        _ => format!("[{}]:{}", server, XYMON_DEFAULT_PORT),
    }
}
