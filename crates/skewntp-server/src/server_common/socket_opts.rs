// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! UDP socket creation for dual-stack listening.
//!
//! Binding behavior differs across platforms; everything socket-option
//! related lives behind this one function so the request pipeline never has
//! to know. Uses `socket2` for cross-platform socket option control.

use std::io;
use std::net::SocketAddr;

use socket2::{Domain, Protocol, Socket, Type};

/// Create and bind a UDP socket suitable for the server loop.
///
/// For IPv6 bind addresses the socket is made dual-stack (`IPV6_V6ONLY`
/// cleared), so IPv4 clients arrive as IPv4-mapped IPv6 addresses.
/// `SO_REUSEADDR` is set, and the socket is put in non-blocking mode for use
/// with the async runtime.
pub(crate) fn bind_udp_dual_stack(bind_addr: SocketAddr) -> io::Result<std::net::UdpSocket> {
    let domain = if bind_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;

    if bind_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.set_nonblocking(true)?;
    socket.bind(&bind_addr.into())?;

    Ok(socket.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_v4() {
        let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
        let sock = bind_udp_dual_stack(addr).unwrap();
        assert!(sock.local_addr().unwrap().is_ipv4());
    }

    #[test]
    fn test_bind_v6_ephemeral() {
        let addr: SocketAddr = "[::1]:0".parse().unwrap();
        let sock = bind_udp_dual_stack(addr).unwrap();
        let local = sock.local_addr().unwrap();
        assert!(local.is_ipv6());
        assert!(local.port() > 0);
    }
}
