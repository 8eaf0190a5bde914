use hasura_om_core::SettingsOverride;

use crate::error::ClientError;

/// Connection settings for a [`Hasura`](crate::Hasura) client.
///
/// Only `graphql_url` is required. The SQL meta endpoint and the WebSocket
/// endpoint are derived from it unless given explicitly, and exactly one
/// credential (admin secret or JWT) is forwarded with every request.
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    /// Admin secret. Takes precedence over `jwt` and forces the `admin` role.
    pub admin_secret: Option<String>,

    /// The `/v1/graphql` endpoint, e.g. `https://my-app.hasura.app/v1/graphql`.
    pub graphql_url: String,

    /// Role header sent alongside a JWT. Defaults to `user`.
    pub hasura_role: Option<String>,

    /// Bearer token used when no admin secret is configured.
    pub jwt: Option<String>,

    /// Flattening overrides applied to every mutation.
    pub mutation: SettingsOverride,

    /// Flattening overrides applied to every query.
    pub query: SettingsOverride,

    /// The `/v1/query` endpoint. Derived from `graphql_url` when absent.
    pub query_url: Option<String>,

    /// Flattening overrides applied to every subscription delivery.
    pub subscription: SettingsOverride,

    /// The `ws(s)://` endpoint. Derived from `graphql_url` when absent.
    pub ws_url: Option<String>,
}

impl ClientConfig {
    pub fn new(graphql_url: impl Into<String>) -> Self {
        ClientConfig {
            graphql_url: graphql_url.into(),
            ..ClientConfig::default()
        }
    }

    /// Validates `graphql_url` and fills in the derived endpoints.
    pub(crate) fn resolve(&self) -> Result<ResolvedEndpoints, ClientError> {
        if self.graphql_url.is_empty() {
            return Err(ClientError::Configuration {
                message: "`graphql_url` must be set".to_string(),
            });
        }
        if !self.graphql_url.starts_with("http://") && !self.graphql_url.starts_with("https://") {
            return Err(ClientError::Configuration {
                message: format!(
                    "`graphql_url` must start with http:// or https://, got `{}`",
                    self.graphql_url,
                ),
            });
        }

        let query_url = self
            .query_url
            .clone()
            .unwrap_or_else(|| self.graphql_url.replace("/v1/graphql", "/v1/query"));
        let ws_url = self
            .ws_url
            .clone()
            .unwrap_or_else(|| self.graphql_url.replacen("http", "ws", 1));

        Ok(ResolvedEndpoints {
            graphql_url: self.graphql_url.clone(),
            query_url,
            ws_url,
        })
    }

    /// The credential headers attached to every HTTP and WebSocket request.
    ///
    /// Header names are lowercase so they can be used as static
    /// [`reqwest::header::HeaderName`] values.
    pub(crate) fn credential_headers(&self) -> Vec<(&'static str, String)> {
        if let Some(secret) = &self.admin_secret {
            return vec![
                ("x-hasura-admin-secret", secret.clone()),
                ("x-hasura-role", "admin".to_string()),
            ];
        }
        if let Some(jwt) = &self.jwt {
            let role = self.hasura_role.clone().unwrap_or_else(|| "user".to_string());
            return vec![
                ("authorization", format!("Bearer {jwt}")),
                ("x-hasura-role", role),
            ];
        }
        Vec::new()
    }
}

#[derive(Clone, Debug)]
pub(crate) struct ResolvedEndpoints {
    pub(crate) graphql_url: String,
    pub(crate) query_url: String,
    pub(crate) ws_url: String,
}
