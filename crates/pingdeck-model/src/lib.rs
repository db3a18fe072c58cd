//! Shared data structures for pingdeck.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Probe families the backend knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Icmp,
    Tcp,
    Arp,
    Udp,
    Rdns,
}

impl Protocol {
    pub const ALL: [Protocol; 5] = [
        Protocol::Icmp,
        Protocol::Tcp,
        Protocol::Arp,
        Protocol::Udp,
        Protocol::Rdns,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Protocol::Icmp => "icmp",
            Protocol::Tcp => "tcp",
            Protocol::Arp => "arp",
            Protocol::Udp => "udp",
            Protocol::Rdns => "rdns",
        }
    }

    /// Query parameter the backend expects the target under. Reverse DNS
    /// takes an address, everything else a host.
    pub fn target_key(self) -> &'static str {
        match self {
            Protocol::Rdns => "ip",
            _ => "host",
        }
    }

    pub fn requires_port(self) -> bool {
        matches!(self, Protocol::Tcp)
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Protocol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "icmp" => Ok(Protocol::Icmp),
            "tcp" => Ok(Protocol::Tcp),
            "arp" => Ok(Protocol::Arp),
            "udp" => Ok(Protocol::Udp),
            "rdns" => Ok(Protocol::Rdns),
            other => Err(format!(
                "unknown protocol {other:?} (expected icmp, tcp, arp, udp or rdns)"
            )),
        }
    }
}

/// Current form state, rebuilt on every edit. The port text is kept verbatim
/// even while a portless protocol is selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeRequest {
    pub host: String,
    pub protocol: Protocol,
    pub port: String,
}

impl ProbeRequest {
    pub fn new(host: impl Into<String>, protocol: Protocol, port: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            protocol,
            port: port.into(),
        }
    }
}

/// Spelling of the backend's liveness endpoint; it varies between backend
/// versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusEndpoint {
    Status,
    Health,
}

impl StatusEndpoint {
    pub fn path(self) -> &'static str {
        match self {
            StatusEndpoint::Status => "status",
            StatusEndpoint::Health => "health",
        }
    }
}

impl fmt::Display for StatusEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for StatusEndpoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "status" => Ok(StatusEndpoint::Status),
            "health" => Ok(StatusEndpoint::Health),
            other => Err(format!(
                "unknown status endpoint {other:?} (expected status or health)"
            )),
        }
    }
}
