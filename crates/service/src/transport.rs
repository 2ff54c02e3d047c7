use std::{fmt::Debug, time::Duration};

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Map, Value};

// Connection establishment and response read limits for the built-in
// client. Callers bringing their own client keep its configuration.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);
const READ_TIMEOUT: Duration = Duration::from_secs(7);

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
#[error("Failed to query geolocation provider: {msg}")]
pub struct ProviderError {
    pub msg: String,
}
impl ProviderError {
    pub fn new(msg: String) -> ProviderError {
        ProviderError { msg }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(value: reqwest::Error) -> Self {
        ProviderError {
            msg: value.to_string(),
        }
    }
}

/// Issues a GET request and decodes the body as a JSON object.
#[async_trait]
pub(crate) trait JsonFetcher: Send + Sync + Debug {
    async fn get_json(&self, url: &str) -> Result<Map<String, Value>, ProviderError>;
}

#[derive(Debug)]
pub(crate) struct HttpFetcher {
    client: Client,
}
impl HttpFetcher {
    pub fn new(client: Client) -> HttpFetcher {
        HttpFetcher { client }
    }
}

#[async_trait]
impl JsonFetcher for HttpFetcher {
    async fn get_json(&self, url: &str) -> Result<Map<String, Value>, ProviderError> {
        let res = self.client.get(url).send().await?;
        let body = res.error_for_status()?.json::<Map<String, Value>>().await?;
        Ok(body)
    }
}

/// Client used when the caller does not supply one.
pub(crate) fn default_client() -> Client {
    Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .read_timeout(READ_TIMEOUT)
        .build()
        .expect("reqwest client with static configuration")
}

#[cfg(test)]
pub(crate) mod mock {
    use std::{
        collections::VecDeque,
        sync::{Arc, Mutex},
    };

    use super::*;

    /// Replays a fixed queue of responses and records every requested URL.
    /// Running out of queued responses fails the test, which doubles as an
    /// assertion that no extra provider was contacted.
    #[derive(Debug)]
    pub struct MockFetcher {
        responses: Mutex<VecDeque<Result<Map<String, Value>, ProviderError>>>,
        requests: Arc<Mutex<Vec<String>>>,
    }

    impl MockFetcher {
        pub fn new(responses: Vec<Result<Map<String, Value>, ProviderError>>) -> MockFetcher {
            MockFetcher {
                responses: Mutex::new(responses.into()),
                requests: Arc::new(Mutex::new(vec![])),
            }
        }

        /// Handle to the request log, grab before boxing the mock.
        pub fn request_log(&self) -> Arc<Mutex<Vec<String>>> {
            self.requests.clone()
        }
    }

    #[async_trait]
    impl JsonFetcher for MockFetcher {
        async fn get_json(&self, url: &str) -> Result<Map<String, Value>, ProviderError> {
            self.requests.lock().unwrap().push(url.to_string());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("no canned response left for request")
        }
    }
}
