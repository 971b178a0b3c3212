use std::net::{Ipv4Addr, Ipv6Addr};

use super::{DEFAULT_MAX_DATAGRAM_SIZE, DEFAULT_PORT, DEFAULT_TTL};

/// Settings handed to [`Responder`](crate::Responder) at construction
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResponderConfig {
    /// UDP port for both address families; 0 picks a free port per family
    pub port: u16,
    /// IPv4 address to listen on, `None` to skip IPv4
    pub ipv4: Option<Ipv4Addr>,
    /// IPv6 address to listen on, `None` to skip IPv6
    pub ipv6: Option<Ipv6Addr>,
    /// TTL written into every answer
    pub ttl: u32,
    /// Datagrams longer than this are cut to this size before decoding
    pub max_datagram_size: usize,
}

impl Default for ResponderConfig {
    fn default() -> Self {
        ResponderConfig {
            port: DEFAULT_PORT,
            ipv4: Some(Ipv4Addr::UNSPECIFIED),
            ipv6: Some(Ipv6Addr::UNSPECIFIED),
            ttl: DEFAULT_TTL,
            max_datagram_size: DEFAULT_MAX_DATAGRAM_SIZE,
        }
    }
}

impl ResponderConfig {
    /// IPv4 loopback only, on a port chosen by the OS
    pub fn localhost() -> Self {
        ResponderConfig {
            port: 0,
            ipv4: Some(Ipv4Addr::LOCALHOST),
            ipv6: None,
            ..ResponderConfig::default()
        }
    }
}
