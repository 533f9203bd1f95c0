//! Document client adapter
//!
//! `DocClient` resolves which backend dialect is live by probing the
//! candidate endpoints of each operation in order, against every
//! configured base URL. A 404 advances the probe sequence; any other
//! failure stops it immediately, so a broken backend is never mistaken
//! for a dialect mismatch. Fallback handles contract uncertainty, not
//! transient failure: there is no retry.

use std::time::Duration;

use percent_encoding::percent_decode_str;
use reqwest::{StatusCode, Url};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::config::Config;
use crate::models::{Document, DocumentDraft};

use super::dialect::{Candidate, Encoding, Operation};
use super::error::{ApiError, ApiResult};
use super::record::{document_from_value, unwrap_envelope};
use super::transport::{ApiRequest, ApiResponse, Payload, Transport};

/// Client for the remote document backend
pub struct DocClient {
    /// Base URLs, probed in order
    bases: Vec<String>,
    transport: Transport,
}

/// Outcome of one probe sequence
enum Probe {
    /// A candidate answered with a success status
    Hit {
        encoding: Encoding,
        response: ApiResponse,
    },
    /// Every candidate answered 404; `last` is the final miss
    Miss { last: Option<ApiResponse> },
}

impl DocClient {
    /// Build a client from configuration
    ///
    /// Fails when no backend base URL is configured.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let bases = config.base_urls();
        if bases.is_empty() {
            anyhow::bail!(
                "No backend configured. Set api_url in the config file or SKRIV_API_URL."
            );
        }

        let transport = Transport::http(Duration::from_secs(config.timeout_secs))?;
        Ok(Self { bases, transport })
    }

    /// Build a client over an explicit transport
    ///
    /// `bases` must not be empty.
    #[cfg(test)]
    pub(crate) fn with_transport(bases: Vec<String>, transport: Transport) -> Self {
        debug_assert!(!bases.is_empty());
        Self { bases, transport }
    }

    /// Fetch all documents, in backend order
    pub async fn list(&self) -> ApiResult<Vec<Document>> {
        match self.probe(Operation::List, None, None).await? {
            Probe::Hit { response, .. } => {
                let body = unwrap_envelope(parse_json(&response)?);
                let items = body
                    .as_array()
                    .ok_or_else(|| ApiError::malformed("expected an array of documents"))?;
                items
                    .iter()
                    .map(|item| document_from_value(item, None))
                    .collect()
            }
            Probe::Miss { last } => Err(miss_error(last)),
        }
    }

    /// Fetch a single document by id
    ///
    /// When no item endpoint answers, the full listing is scanned for a
    /// matching id before giving up with [`ApiError::NotFound`].
    pub async fn get(&self, id: &str) -> ApiResult<Document> {
        match self.probe(Operation::Get, Some(id), None).await? {
            Probe::Hit { response, .. } => {
                let body = unwrap_envelope(parse_json(&response)?);
                if body.is_null() {
                    return Err(ApiError::NotFound);
                }
                document_from_value(&body, Some(id))
            }
            Probe::Miss { .. } => {
                debug!(id, "no item endpoint answered, scanning the listing");
                let docs = self.list().await?;
                docs.into_iter()
                    .find(|doc| doc.id == id)
                    .ok_or(ApiError::NotFound)
            }
        }
    }

    /// Create a document and return it with its assigned id
    pub async fn create(&self, draft: &DocumentDraft) -> ApiResult<Document> {
        match self.probe(Operation::Create, None, Some(draft)).await? {
            Probe::Hit {
                encoding: Encoding::Json,
                response,
            } => {
                let body = unwrap_envelope(parse_json(&response)?);
                document_from_value(&body, None)
            }
            Probe::Hit {
                encoding: Encoding::Form,
                response,
            } => {
                // The legacy dialect answers a create with a redirect whose
                // final path segment is the new id. Known fragility: a
                // backend redirecting anywhere else produces a bogus id.
                let id = redirect_id(&response.final_url).ok_or_else(|| {
                    ApiError::malformed("create redirect target has no usable id segment")
                })?;
                Ok(Document {
                    id,
                    title: draft.title.clone(),
                    content: draft.content.clone(),
                })
            }
            Probe::Miss { last } => Err(miss_error(last)),
        }
    }

    /// Update an existing document
    pub async fn update(&self, id: &str, draft: &DocumentDraft) -> ApiResult<()> {
        match self.probe(Operation::Update, Some(id), Some(draft)).await? {
            Probe::Hit { .. } => Ok(()),
            Probe::Miss { last } => Err(miss_error(last)),
        }
    }

    /// Delete a document
    ///
    /// The legacy dialect has no delete endpoint: running out of
    /// candidates fails with [`ApiError::Unsupported`] so callers can
    /// disable delete affordances, never a silent no-op.
    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        match self.probe(Operation::Delete, Some(id), None).await? {
            Probe::Hit { .. } => Ok(()),
            Probe::Miss { .. } => Err(ApiError::Unsupported {
                operation: "delete",
            }),
        }
    }

    /// Try every (base, candidate) combination for an operation
    ///
    /// Attempts are strictly sequential; the next one is issued only
    /// after the previous outcome is known.
    async fn probe(
        &self,
        operation: Operation,
        id: Option<&str>,
        draft: Option<&DocumentDraft>,
    ) -> ApiResult<Probe> {
        let mut last_miss = None;

        for base in &self.bases {
            for candidate in operation.candidates() {
                let url = format!("{}{}", base, candidate.path_for(id));
                debug!(method = %candidate.method, %url, "probing backend");

                let response = self
                    .transport
                    .send(ApiRequest {
                        method: candidate.method.clone(),
                        url: url.clone(),
                        encoding: candidate.encoding,
                        payload: build_payload(candidate, id, draft),
                    })
                    .await?;

                if response.status == StatusCode::NOT_FOUND {
                    debug!(%url, "endpoint not found, trying next candidate");
                    last_miss = Some(response);
                    continue;
                }

                if !response.status.is_success() {
                    warn!(%url, status = %response.status, "backend error");
                    return Err(ApiError::Transport {
                        status: response.status,
                        body: response.body,
                    });
                }

                return Ok(Probe::Hit {
                    encoding: candidate.encoding,
                    response,
                });
            }
        }

        Ok(Probe::Miss { last: last_miss })
    }
}

/// Encode a draft (and, for legacy updates, the id) for a candidate
fn build_payload(
    candidate: &Candidate,
    id: Option<&str>,
    draft: Option<&DocumentDraft>,
) -> Option<Payload> {
    let draft = draft?;
    match candidate.encoding {
        Encoding::Json => Some(Payload::Json(json!({
            "title": draft.title,
            "content": draft.content,
        }))),
        Encoding::Form => {
            let mut pairs = Vec::new();
            // The legacy dialect carries the id in the form body
            if let Some(id) = id {
                pairs.push(("id".to_string(), id.to_string()));
            }
            pairs.push(("title".to_string(), draft.title.clone()));
            pairs.push(("content".to_string(), draft.content.clone()));
            Some(Payload::Form(pairs))
        }
    }
}

fn parse_json(response: &ApiResponse) -> ApiResult<Value> {
    serde_json::from_str(&response.body)
        .map_err(|err| ApiError::malformed(format!("invalid JSON in response: {err}")))
}

fn miss_error(last: Option<ApiResponse>) -> ApiError {
    match last {
        Some(response) => ApiError::Transport {
            status: response.status,
            body: response.body,
        },
        None => ApiError::NotFound,
    }
}

/// The last non-empty path segment of a redirect target, decoded
fn redirect_id(final_url: &str) -> Option<String> {
    let path = match Url::parse(final_url) {
        Ok(url) => url.path().to_string(),
        // Tolerate a bare path; some proxies strip the origin
        Err(_) => final_url
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_string(),
    };

    let segment = path.rsplit('/').find(|segment| !segment.is_empty())?;
    let decoded = percent_decode_str(segment).decode_utf8_lossy().into_owned();
    if decoded.is_empty() {
        None
    } else {
        Some(decoded)
    }
}
