use providers::PROVIDERS;
use reqwest::Client;
use serde_json::{Map, Value};
use tracing::{error, info, instrument};
use transport::{HttpFetcher, JsonFetcher, default_client};

pub use error::{Error, LookupError};
pub use transport::ProviderError;
pub use validate::validate_ipv6;

pub mod api;
mod error;
mod providers;
mod transport;
mod validate;

/// A successful lookup: which provider answered and the payload it returned,
/// passed through unmodified.
#[derive(Debug, Clone, PartialEq)]
pub struct Lookup {
    pub provider: &'static str,
    pub data: Map<String, Value>,
}

/// Resolves geolocation data for IPv6 addresses by querying a fixed list of
/// providers in order and keeping the first usable answer.
#[derive(Debug)]
pub struct GeoResolver {
    fetcher: Box<dyn JsonFetcher>,
}

impl GeoResolver {
    /// Resolver with its own HTTP client, configured with a 3 second connect
    /// and 7 second read timeout.
    pub fn new() -> GeoResolver {
        GeoResolver::with_client(default_client())
    }

    /// Resolver reusing a caller-supplied client. The client is used as-is,
    /// no extra timeouts are applied.
    pub fn with_client(client: Client) -> GeoResolver {
        GeoResolver {
            fetcher: Box::new(HttpFetcher::new(client)),
        }
    }

    #[cfg(test)]
    fn with_fetcher(fetcher: Box<dyn JsonFetcher>) -> GeoResolver {
        GeoResolver { fetcher }
    }

    /// Resolves geolocation data for `ip`.
    ///
    /// Providers are queried strictly in their configured order. A transport
    /// or decode failure is remembered as the last error and the next
    /// provider is tried. A provider that answers but flags "no data" is
    /// skipped without recording an error, as is an empty body. The first
    /// accepted non-empty body is returned and later providers are never
    /// contacted.
    #[instrument(skip(self))]
    pub async fn resolve(&self, ip: &str) -> Result<Lookup, Error> {
        validate_ipv6(ip)?;

        let mut last_error = None;
        for provider in PROVIDERS {
            match self.fetcher.get_json(&provider.url(ip)).await {
                Ok(body) => {
                    if !provider.accepts(&body) {
                        info!(
                            msg = "Provider flagged no data for address, skipping",
                            provider = provider.name
                        );
                        continue;
                    }
                    if body.is_empty() {
                        info!(
                            msg = "Provider returned an empty body, skipping",
                            provider = provider.name
                        );
                        continue;
                    }
                    info!(msg = "Resolved geolocation data", provider = provider.name);
                    return Ok(Lookup {
                        provider: provider.name,
                        data: body,
                    });
                }
                Err(e) => {
                    info!(
                        msg = "Failed to query provider",
                        provider = provider.name,
                        err = e.msg
                    );
                    last_error = Some(e);
                }
            }
        }
        error!(msg = "No provider returned geolocation data, see logs for details");
        Err(Error::Lookup(LookupError { last_error }))
    }
}

impl Default for GeoResolver {
    fn default() -> Self {
        GeoResolver::new()
    }
}

/// One-shot lookup through a freshly built resolver.
pub async fn geolocate(ip: &str) -> Result<Lookup, Error> {
    GeoResolver::new().resolve(ip).await
}
