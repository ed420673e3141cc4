// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! `skewntpd` - a fake NTP server with a deliberately slow clock.
//!
//! Answers NTPv3/NTPv4 client requests with timestamps that drift behind
//! real time, for testing how time-sync clients react. Run as root (or with
//! `CAP_NET_BIND_SERVICE`) to bind the standard NTP port, or pick a high
//! port with `--port` for unprivileged testing.

use std::io;
use std::net::{IpAddr, SocketAddr, ToSocketAddrs};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use skewntp_server::error::{ConfigError, SkewServerError};
use skewntp_server::protocol;
use skewntp_server::server::SkewServer;
use skewntp_server::server_common::DriftClock;

#[derive(Parser, Debug)]
#[command(name = "skewntpd")]
#[command(about = "Fake NTP server answering queries from a deliberately slow clock", long_about = None)]
#[command(version)]
struct Cli {
    /// Address to listen on (host name or numeric address)
    #[arg(long, default_value = "::")]
    listen: String,

    /// UDP port to listen on
    #[arg(long, default_value_t = protocol::PORT)]
    port: u16,

    /// Clock speed relative to real time (values below 1.0 run slow)
    #[arg(long, default_value_t = DriftClock::DEFAULT_SPEED)]
    speed: f64,
}

/// Resolve a free-form host string to a numeric bind address.
///
/// IPv4 results are mapped into IPv6 (`::ffff:a.b.c.d`) so they can be bound
/// on the dual-stack socket, mirroring how IPv4 clients will appear on it.
fn resolve_listen_addr(host: &str, port: u16) -> io::Result<SocketAddr> {
    let mut addrs = (host, port).to_socket_addrs().map_err(|e| {
        SkewServerError::Config(ConfigError::InvalidListenAddress {
            address: host.to_string(),
            detail: format!("{e}"),
        })
    })?;

    let addr = addrs.next().ok_or_else(|| {
        SkewServerError::Config(ConfigError::InvalidListenAddress {
            address: host.to_string(),
            detail: "no usable address".to_string(),
        })
    })?;

    Ok(match addr {
        SocketAddr::V4(v4) => SocketAddr::new(IpAddr::V6(v4.ip().to_ipv6_mapped()), port),
        SocketAddr::V6(_) => addr,
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let listen = resolve_listen_addr(&cli.listen, cli.port)?;

    let server = SkewServer::builder()
        .listen(listen.to_string())
        .speed_factor(cli.speed)
        .build()?;

    tracing::info!(
        "skewntpd listening on {} (speed factor {})",
        server.local_addr()?,
        cli.speed
    );

    server.run().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_wildcard_v6() {
        let addr = resolve_listen_addr("::", 123).unwrap();
        assert_eq!(addr, "[::]:123".parse().unwrap());
    }

    #[test]
    fn resolve_v4_maps_to_v6() {
        let addr = resolve_listen_addr("127.0.0.1", 1123).unwrap();
        assert_eq!(addr, "[::ffff:127.0.0.1]:1123".parse().unwrap());
    }

    #[test]
    fn resolve_rejects_garbage() {
        assert!(resolve_listen_addr("no^such^host", 123).is_err());
    }
}
