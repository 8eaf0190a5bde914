use reqwest::header::CONTENT_TYPE;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::error::ClientError;

/// A GraphQL operation ready to go over the wire.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct GraphqlRequest {
    pub query: String,
    pub variables: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    data: Option<Value>,
    errors: Option<Vec<GraphqlError>>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub(crate) struct GraphqlError {
    pub(crate) message: String,
}

/// Executes queries and mutations against the `/v1/graphql` endpoint.
///
/// Credential headers are baked into the underlying [`reqwest::Client`] at
/// construction time so every request carries them.
#[derive(Clone, Debug)]
pub struct GraphqlTransport {
    http: reqwest::Client,
    url: String,
}

impl GraphqlTransport {
    pub fn new(
        url: impl Into<String>,
        headers: &[(&'static str, String)],
    ) -> Result<Self, ClientError> {
        Ok(GraphqlTransport {
            http: build_http_client(headers)?,
            url: url.into(),
        })
    }

    /// Posts the document and returns the `data` payload.
    ///
    /// A non-empty `errors` array in the response body becomes a
    /// [`ClientError::Server`] carrying the first error's message.
    pub async fn execute(
        &self,
        document: &str,
        variables: Map<String, Value>,
    ) -> Result<Value, ClientError> {
        tracing::debug!(url = %self.url, document, "executing graphql operation");
        let request = GraphqlRequest {
            query: document.to_string(),
            variables,
        };
        let response = self
            .http
            .post(&self.url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;
        let body: GraphqlResponse = response.json().await?;
        if let Some(first) = body.errors.into_iter().flatten().next() {
            tracing::warn!(message = %first.message, "graphql operation rejected");
            return Err(ClientError::Server {
                message: first.message,
            });
        }
        Ok(body.data.unwrap_or(Value::Null))
    }
}

pub(crate) fn build_http_client(
    headers: &[(&'static str, String)],
) -> Result<reqwest::Client, ClientError> {
    let mut defaults = HeaderMap::new();
    defaults.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    for (name, value) in headers {
        let value = HeaderValue::from_str(value).map_err(|_| ClientError::Configuration {
            message: format!("header `{name}` has a non-ASCII value"),
        })?;
        defaults.insert(*name, value);
    }
    Ok(reqwest::Client::builder()
        .default_headers(defaults)
        .build()?)
}
