// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! The tokio-based UDP server loop.
//!
//! Receives one datagram at a time, validates it, and answers valid NTPv3/v4
//! client requests with timestamps from the drift clock. Invalid datagrams
//! are logged and dropped without a reply.
//!
//! # Examples
//!
//! ```no_run
//! # async fn example() -> std::io::Result<()> {
//! use skewntp_server::server::SkewServer;
//!
//! let server = SkewServer::builder()
//!     .listen("[::]:123")
//!     .speed_factor(0.999)
//!     .build()?;
//!
//! server.run().await
//! # }
//! ```

use std::io;
use std::net::SocketAddr;

use tokio::net::UdpSocket;
use tracing::debug;

use crate::error::{ConfigError, SkewServerError};
use crate::protocol;
use crate::server_common::{
    DEFAULT_REFERENCE_ID, DriftClock, HandleResult, bind_udp_dual_stack, handle_request,
};

/// Builder for configuring and creating a [`SkewServer`].
#[derive(Clone, Debug)]
pub struct SkewServerBuilder {
    listen_addr: String,
    speed_factor: f64,
    reference_id: protocol::ReferenceIdentifier,
}

impl SkewServerBuilder {
    fn new() -> Self {
        SkewServerBuilder {
            listen_addr: format!("[::]:{}", protocol::PORT),
            speed_factor: DriftClock::DEFAULT_SPEED,
            reference_id: DEFAULT_REFERENCE_ID,
        }
    }

    /// Set the listen address (`ip:port`). Defaults to `[::]:123`, the
    /// dual-stack wildcard on the NTP port.
    pub fn listen(mut self, addr: impl Into<String>) -> Self {
        self.listen_addr = addr.into();
        self
    }

    /// Set the clock speed relative to real time. Values below 1.0 simulate
    /// a slow clock. Defaults to [`DriftClock::DEFAULT_SPEED`].
    pub fn speed_factor(mut self, speed: f64) -> Self {
        self.speed_factor = speed;
        self
    }

    /// Set the 4-byte reference identifier stamped on replies.
    pub fn reference_id(mut self, reference_id: protocol::ReferenceIdentifier) -> Self {
        self.reference_id = reference_id;
        self
    }

    /// Build the server: bind the socket and start the drift clock.
    pub fn build(self) -> io::Result<SkewServer> {
        let addr: SocketAddr = self.listen_addr.parse().map_err(|e| {
            SkewServerError::Config(ConfigError::InvalidListenAddress {
                address: self.listen_addr.clone(),
                detail: format!("{e}"),
            })
        })?;

        let sock = UdpSocket::from_std(bind_udp_dual_stack(addr)?)?;
        debug!("drifting NTP server listening on {}", self.listen_addr);

        Ok(SkewServer {
            sock,
            clock: DriftClock::new(self.speed_factor),
            reference_id: self.reference_id,
        })
    }
}

/// A fake NTP server whose replies come from a deliberately skewed clock.
///
/// Created via [`SkewServer::builder()`]. Call [`run()`](SkewServer::run) to
/// start serving requests.
pub struct SkewServer {
    sock: UdpSocket,
    clock: DriftClock,
    reference_id: protocol::ReferenceIdentifier,
}

impl SkewServer {
    /// Create a builder for configuring the server.
    pub fn builder() -> SkewServerBuilder {
        SkewServerBuilder::new()
    }

    /// The drift clock driving this server's replies.
    pub fn clock(&self) -> &DriftClock {
        &self.clock
    }

    /// Get the local address the server is bound to.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.sock.local_addr()
    }

    /// Run the server, processing incoming requests indefinitely.
    ///
    /// Datagrams are handled strictly one at a time: receive, validate,
    /// compute, send, then the next receive. This future runs until an I/O
    /// error occurs on the socket; send failures on individual replies are
    /// logged and do not stop the loop.
    pub async fn run(self) -> io::Result<()> {
        let mut recv_buf = [0u8; 2048];

        loop {
            let (recv_len, src_addr) = self.sock.recv_from(&mut recv_buf).await?;

            match handle_request(
                &recv_buf,
                recv_len,
                src_addr,
                &self.clock,
                self.reference_id,
            ) {
                HandleResult::Response(resp_buf) => {
                    if let Err(e) = self.sock.send_to(&resp_buf, src_addr).await {
                        debug!("failed to send response to {}: {}", src_addr, e);
                    }
                }
                HandleResult::Drop => {
                    debug!("dropped packet from {}", src_addr);
                }
            }
        }
    }
}
