use std::net::{IpAddr, Ipv6Addr};

use crate::error::Error;

/// Checks that `ip` is an IPv6 address literal before any provider is
/// contacted. IPv4 addresses are rejected, the service only answers for
/// IPv6.
pub fn validate_ipv6(ip: &str) -> Result<Ipv6Addr, Error> {
    match ip.parse::<IpAddr>()? {
        IpAddr::V6(addr) => Ok(addr),
        IpAddr::V4(addr) => Err(Error::InvalidAddress(format!(
            "{addr} is an IPv4 address, only IPv6 is supported"
        ))),
    }
}
