// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Fake NTP server that answers client queries from a deliberately slow clock.
//!
//! The server speaks just enough NTPv3/NTPv4 to satisfy real time-sync
//! clients, but every reply carries timestamps from a clock running at a
//! configurable fraction of real time (0.9996 by default). This lets client
//! implementations be tested against controlled clock-drift scenarios.
//!
//! Requests are handled strictly sequentially on a single task: one blocking
//! receive, a full validate/compute/send cycle, then the next receive.

#![warn(missing_docs)]

// Re-export wire types from skewntp-proto for convenience.
pub use skewntp_proto::{protocol, unix_time};

/// Custom error types for the drifting NTP server.
pub mod error;

/// Runtime-independent request handling: validation, drift clock, response
/// building, and the per-datagram pipeline.
pub mod server_common;

/// The tokio-based UDP server loop.
pub mod server;
