//! Schema discovery over Hasura's `/v1/query` SQL endpoint.
//!
//! `run_sql` returns rows as arrays with a leading header row of column
//! names; [`decode_rows`] reassembles them into keyed objects.

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::error::ClientError;
use crate::transport::graphql::build_http_client;

pub(crate) const TABLES_SQL: &str = "\
    SELECT table_name, table_type \
    FROM information_schema.tables \
    WHERE table_schema = 'public';";

pub(crate) const COLUMNS_SQL: &str = "\
    SELECT table_name, column_name, data_type, udt_name \
    FROM information_schema.columns \
    WHERE table_schema = 'public' \
    ORDER BY table_name, ordinal_position;";

pub(crate) const PRIMARY_KEYS_SQL: &str = "\
    SELECT tc.table_name, kcu.column_name, kcu.ordinal_position \
    FROM information_schema.table_constraints AS tc \
    JOIN information_schema.key_column_usage AS kcu \
      ON tc.constraint_name = kcu.constraint_name \
    WHERE tc.constraint_type = 'PRIMARY KEY' AND tc.table_schema = 'public';";

#[derive(Debug, Serialize)]
struct MetaRequest<'a> {
    r#type: &'a str,
    args: MetaArgs<'a>,
}

#[derive(Debug, Serialize)]
struct MetaArgs<'a> {
    sql: &'a str,
}

#[derive(Debug, Deserialize)]
struct RunSqlResponse {
    result: Option<Vec<Vec<Value>>>,
}

/// Issues `run_sql` statements against the meta endpoint.
#[derive(Clone, Debug)]
pub(crate) struct Introspector {
    http: reqwest::Client,
    url: String,
}

impl Introspector {
    pub(crate) fn new(
        url: impl Into<String>,
        headers: &[(&'static str, String)],
    ) -> Result<Self, ClientError> {
        Ok(Introspector {
            http: build_http_client(headers)?,
            url: url.into(),
        })
    }

    pub(crate) async fn run_sql(&self, sql: &str) -> Result<Vec<Map<String, Value>>, ClientError> {
        tracing::debug!(url = %self.url, sql, "running introspection statement");
        let request = MetaRequest {
            r#type: "run_sql",
            args: MetaArgs { sql },
        };
        let response = self
            .http
            .post(&self.url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;
        let body: RunSqlResponse = response.json().await?;
        Ok(decode_rows(body.result.unwrap_or_default()))
    }
}

/// Zips each value row against the header row of column names.
///
/// Rows shorter than the header simply omit the trailing keys; extra values
/// are dropped.
pub(crate) fn decode_rows(result: Vec<Vec<Value>>) -> Vec<Map<String, Value>> {
    let mut rows = result.into_iter();
    let Some(header) = rows.next() else {
        return Vec::new();
    };
    let keys: Vec<String> = header
        .into_iter()
        .map(|name| match name {
            Value::String(name) => name,
            other => other.to_string(),
        })
        .collect();
    rows.map(|row| keys.iter().cloned().zip(row).collect())
        .collect()
}
