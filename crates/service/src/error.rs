use std::net::AddrParseError;

use crate::transport::ProviderError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Invalid IPv6 address: {0}")]
    InvalidAddress(String),
    #[error("Geolocation lookup failed: {0}")]
    Lookup(LookupError),
}

impl From<LookupError> for Error {
    fn from(value: LookupError) -> Self {
        Error::Lookup(value)
    }
}

impl From<AddrParseError> for Error {
    fn from(value: AddrParseError) -> Self {
        Error::InvalidAddress(value.to_string())
    }
}

/// Returned once every provider has been tried without producing usable
/// data. Carries the most recent transport or decode error, if any request
/// got that far.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Could not query any geolocation provider, check DNS or internet connectivity")]
pub struct LookupError {
    #[source]
    pub last_error: Option<ProviderError>,
}
