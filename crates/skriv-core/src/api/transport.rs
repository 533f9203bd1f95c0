//! HTTP boundary
//!
//! A single enum transport so the probing logic in `client` can be
//! exercised against canned responses in tests, without a network. The
//! real variant wraps a `reqwest::Client` with cookies enabled (the
//! deployment may sit behind session auth) and redirect following (the
//! legacy create flow answers with a redirect whose target names the
//! new document).

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use serde_json::Value;

use super::dialect::Encoding;
use super::error::ApiResult;

const USER_AGENT: &str = concat!("skriv/", env!("CARGO_PKG_VERSION"));

/// A request body, already shaped for its wire encoding
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    Form(Vec<(String, String)>),
}

/// One outgoing request
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub encoding: Encoding,
    pub payload: Option<Payload>,
}

/// One incoming response
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
    /// URL the response was served from, after following redirects
    pub final_url: String,
}

/// The transport a [`super::DocClient`] sends requests through
#[derive(Debug, Clone)]
pub enum Transport {
    Http(reqwest::Client),
    #[cfg(test)]
    Stub(stub::StubTransport),
}

impl Transport {
    /// Build the real HTTP transport
    pub fn http(timeout: Duration) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .build()?;
        Ok(Transport::Http(client))
    }

    /// Issue a single request and collect its outcome
    ///
    /// Any HTTP status is a successful send; only connection-level
    /// failures error here. Interpreting the status is the caller's job.
    pub async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        match self {
            Transport::Http(client) => {
                let mut builder = client.request(request.method, &request.url);
                if request.encoding == Encoding::Json {
                    builder = builder.header(CONTENT_TYPE, "application/json");
                }
                builder = match &request.payload {
                    Some(Payload::Json(value)) => builder.json(value),
                    Some(Payload::Form(pairs)) => builder.form(pairs),
                    None => builder,
                };

                let response = builder.send().await?;
                let status = response.status();
                let final_url = response.url().to_string();
                let body = response.text().await?;

                Ok(ApiResponse {
                    status,
                    body,
                    final_url,
                })
            }
            #[cfg(test)]
            Transport::Stub(stub) => stub.send(&request),
        }
    }
}

#[cfg(test)]
pub(crate) mod stub {
    //! Canned-response transport for tests
    //!
    //! Responses are keyed by method and full URL and consumed in FIFO
    //! order. A request with no registered stub panics: a test that
    //! probes an unexpected endpoint should fail loudly.

    use std::collections::{HashMap, VecDeque};
    use std::sync::{Arc, Mutex};

    use reqwest::{Method, StatusCode};

    use super::{ApiRequest, ApiResponse};
    use crate::api::error::ApiResult;

    #[derive(Debug, Default, Clone)]
    pub struct StubTransport {
        stubs: Arc<Mutex<HashMap<String, VecDeque<Canned>>>>,
        seen: Arc<Mutex<Vec<ApiRequest>>>,
    }

    #[derive(Debug, Clone)]
    struct Canned {
        status: StatusCode,
        body: String,
        final_url: Option<String>,
    }

    impl StubTransport {
        pub fn new() -> Self {
            Default::default()
        }

        /// Register a canned response for `method url`
        #[must_use = "call .finish() to register the stub"]
        pub fn stub(&mut self, method: Method, url: &str) -> StubBuilder<'_> {
            StubBuilder {
                transport: self,
                key: stub_key(&method, url),
                status: StatusCode::OK,
                body: String::new(),
                final_url: None,
            }
        }

        /// Every request sent through this transport, in order
        pub fn requests(&self) -> Vec<ApiRequest> {
            self.seen.lock().unwrap().clone()
        }

        pub(in crate::api) fn send(&self, request: &ApiRequest) -> ApiResult<ApiResponse> {
            self.seen.lock().unwrap().push(request.clone());

            let key = stub_key(&request.method, &request.url);
            let canned = self
                .stubs
                .lock()
                .unwrap()
                .get_mut(&key)
                .and_then(VecDeque::pop_front)
                .unwrap_or_else(|| panic!("no stub registered for {key}"));

            Ok(ApiResponse {
                status: canned.status,
                body: canned.body,
                final_url: canned.final_url.unwrap_or_else(|| request.url.clone()),
            })
        }
    }

    #[must_use = "call .finish() to register the stub"]
    pub struct StubBuilder<'a> {
        transport: &'a mut StubTransport,
        key: String,
        status: StatusCode,
        body: String,
        final_url: Option<String>,
    }

    impl StubBuilder<'_> {
        pub fn status(mut self, status: StatusCode) -> Self {
            self.status = status;
            self
        }

        pub fn body(mut self, body: impl Into<String>) -> Self {
            self.body = body.into();
            self
        }

        /// Pretend the request was redirected and served from `url`
        pub fn redirected_to(mut self, url: impl Into<String>) -> Self {
            self.final_url = Some(url.into());
            self
        }

        pub fn finish(self) {
            self.transport
                .stubs
                .lock()
                .unwrap()
                .entry(self.key)
                .or_default()
                .push_back(Canned {
                    status: self.status,
                    body: self.body,
                    final_url: self.final_url,
                });
        }
    }

    fn stub_key(method: &Method, url: &str) -> String {
        format!("{method} {url}")
    }
}
