use hasura_om_core::BuiltOperation;
use hasura_om_core::DocumentBuilder;
use hasura_om_core::Field;
use hasura_om_core::MutationParams;
use hasura_om_core::OperationKind;
use hasura_om_core::QueryParams;
use hasura_om_core::Settings;
use hasura_om_core::SettingsOverride;
use hasura_om_core::Table;
use hasura_om_core::flatten;
use indexmap::IndexMap;
use serde_json::Value;

use crate::client_config::ClientConfig;
use crate::error::ClientError;
use crate::introspection::COLUMNS_SQL;
use crate::introspection::Introspector;
use crate::introspection::PRIMARY_KEYS_SQL;
use crate::introspection::TABLES_SQL;
use crate::transport::GraphqlRequest;
use crate::transport::GraphqlTransport;
use crate::transport::SubscriptionHandle;
use crate::transport::WebsocketTransport;

/// Per-table query parameters, keyed by table name. Iteration order is
/// preserved into the built document.
pub type QueryRequest = IndexMap<String, QueryParams>;

/// Per-table mutation parameters, keyed by table name.
pub type MutationRequest = IndexMap<String, MutationParams>;

/// The client facade: a registry of [`Table`] schemas plus the transports
/// that execute the documents built from them.
///
/// Tables come either from [`generate_tables_from_api`] (schema
/// introspection, admin secret required) or from manual
/// [`create_table`] calls.
///
/// [`generate_tables_from_api`]: Hasura::generate_tables_from_api
/// [`create_table`]: Hasura::create_table
pub struct Hasura {
    graphql: GraphqlTransport,
    has_admin_secret: bool,
    introspector: Introspector,
    mutation_settings: Settings,
    query_settings: Settings,
    subscription_settings: Settings,
    tables: IndexMap<String, Table>,
    websocket: WebsocketTransport,
}

impl Hasura {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let endpoints = config.resolve()?;
        let headers = config.credential_headers();
        let defaults = Settings::default();
        Ok(Hasura {
            graphql: GraphqlTransport::new(&endpoints.graphql_url, &headers)?,
            has_admin_secret: config.admin_secret.is_some(),
            introspector: Introspector::new(&endpoints.query_url, &headers)?,
            mutation_settings: defaults.with(&config.mutation),
            query_settings: defaults.with(&config.query),
            subscription_settings: defaults.with(&config.subscription),
            tables: IndexMap::new(),
            websocket: WebsocketTransport::new(&endpoints.ws_url, &headers),
        })
    }

    /// Registers an empty table schema, replacing any previous one with the
    /// same name.
    pub fn create_table(&mut self, name: impl Into<String>, kind: impl Into<String>) -> &mut Table {
        let name = name.into();
        let table = Table::new(name.clone(), kind);
        self.tables.insert(name.clone(), table);
        &mut self.tables[&name]
    }

    pub fn table(&self, name: &str) -> Result<&Table, ClientError> {
        self.tables.get(name).ok_or_else(|| ClientError::TableNotFound {
            name: name.to_string(),
        })
    }

    pub fn table_mut(&mut self, name: &str) -> Result<&mut Table, ClientError> {
        self.tables
            .get_mut(name)
            .ok_or_else(|| ClientError::TableNotFound {
                name: name.to_string(),
            })
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.values()
    }

    /// Discovers the `public` schema over the SQL meta endpoint and
    /// registers a table (with fields, primary keys, and the derived
    /// `base`/`pk` fragments) for everything it finds.
    ///
    /// Replaces any manually registered tables with the same names. The
    /// meta endpoint only answers to the admin role, so an admin secret
    /// must be configured.
    pub async fn generate_tables_from_api(&mut self) -> Result<(), ClientError> {
        if !self.has_admin_secret {
            return Err(ClientError::Configuration {
                message: "schema introspection requires an admin secret".to_string(),
            });
        }

        for row in self.introspector.run_sql(TABLES_SQL).await? {
            let Some(name) = row.get("table_name").and_then(Value::as_str) else {
                continue;
            };
            let kind = row
                .get("table_type")
                .and_then(Value::as_str)
                .unwrap_or("BASE TABLE");
            self.create_table(name, kind);
        }

        for row in self.introspector.run_sql(COLUMNS_SQL).await? {
            let (Some(table), Some(column)) = (
                row.get("table_name").and_then(Value::as_str),
                row.get("column_name").and_then(Value::as_str),
            ) else {
                continue;
            };
            let Ok(table) = self.table_mut(table) else {
                continue;
            };
            let mut field = Field::new(column);
            if let Some(sql_type) = row.get("data_type").and_then(Value::as_str) {
                field = field.with_sql_type(sql_type);
            }
            if let Some(udt_name) = row.get("udt_name").and_then(Value::as_str) {
                field = field.with_udt_name(udt_name);
            }
            table.add_field(field);
        }

        for row in self.introspector.run_sql(PRIMARY_KEYS_SQL).await? {
            let (Some(table), Some(column)) = (
                row.get("table_name").and_then(Value::as_str),
                row.get("column_name").and_then(Value::as_str),
            ) else {
                continue;
            };
            // run_sql renders every cell as text
            let position = row
                .get("ordinal_position")
                .and_then(ordinal)
                .unwrap_or(1);
            if let Ok(table) = self.table_mut(table) {
                table.set_primary_key(column, position)?;
            }
        }

        for table in self.tables.values_mut() {
            table.rebuild_derived_fragments()?;
        }
        tracing::debug!(tables = self.tables.len(), "generated table schemas");
        Ok(())
    }

    /// Assembles one document covering every table in `request`.
    pub fn build_query(
        &self,
        request: &QueryRequest,
        kind: OperationKind,
    ) -> Result<BuiltOperation, ClientError> {
        let mut builder = DocumentBuilder::new(kind);
        for (name, params) in request {
            let table = self.table(name)?;
            for part in table.build_query(params, kind)? {
                builder = builder.add(part)?;
            }
        }
        Ok(builder.build()?)
    }

    /// Assembles one mutation document; Hasura executes its top-level
    /// selections atomically.
    pub fn build_mutation(&self, request: &MutationRequest) -> Result<BuiltOperation, ClientError> {
        let mut builder = DocumentBuilder::new(OperationKind::Mutation);
        for (name, params) in request {
            let table = self.table(name)?;
            for part in table.build_mutation(params)? {
                builder = builder.add(part)?;
            }
        }
        Ok(builder.build()?)
    }

    pub async fn query(&self, request: &QueryRequest) -> Result<Value, ClientError> {
        self.query_with(request, SettingsOverride::default()).await
    }

    pub async fn query_with(
        &self,
        request: &QueryRequest,
        overrides: SettingsOverride,
    ) -> Result<Value, ClientError> {
        let built = self.build_query(request, OperationKind::Query)?;
        let raw = self.graphql.execute(&built.document, built.variables).await?;
        let settings = self.query_settings.with(&overrides);
        Ok(flatten(&raw, &built.flatten, settings, &requested(request)))
    }

    pub async fn mutate(&self, request: &MutationRequest) -> Result<Value, ClientError> {
        self.mutate_with(request, SettingsOverride::default()).await
    }

    pub async fn mutate_with(
        &self,
        request: &MutationRequest,
        overrides: SettingsOverride,
    ) -> Result<Value, ClientError> {
        let built = self.build_mutation(request)?;
        let raw = self.graphql.execute(&built.document, built.variables).await?;
        let settings = self.mutation_settings.with(&overrides);
        Ok(flatten(&raw, &built.flatten, settings, &requested(request)))
    }

    pub async fn subscribe(
        &self,
        request: &QueryRequest,
        callback: impl FnMut(Result<Value, ClientError>) + Send + 'static,
    ) -> Result<SubscriptionHandle, ClientError> {
        self.subscribe_with(request, SettingsOverride::default(), callback)
            .await
    }

    /// Starts a subscription; `callback` receives every delivery already
    /// reshaped with the subscription settings. The first call dials the
    /// WebSocket endpoint.
    pub async fn subscribe_with(
        &self,
        request: &QueryRequest,
        overrides: SettingsOverride,
        mut callback: impl FnMut(Result<Value, ClientError>) + Send + 'static,
    ) -> Result<SubscriptionHandle, ClientError> {
        let built = self.build_query(request, OperationKind::Subscription)?;
        let settings = self.subscription_settings.with(&overrides);
        let tables = requested(request);
        let plan = built.flatten;
        let wrapped = Box::new(move |delivery: Result<Value, ClientError>| {
            callback(delivery.map(|raw| flatten(&raw, &plan, settings, &tables)));
        });
        self.websocket
            .subscribe(
                GraphqlRequest {
                    query: built.document,
                    variables: built.variables,
                },
                wrapped,
            )
            .await
    }

    pub async fn subscribe_to_more(
        &self,
        request: &QueryRequest,
        callback: impl FnMut(Result<Value, ClientError>) + Send + 'static,
    ) -> Result<SubscriptionHandle, ClientError> {
        self.subscribe_to_more_with(request, SettingsOverride::default(), callback)
            .await
    }

    /// Queries once, hands the snapshot to `callback`, then subscribes to
    /// the same request. The subscription's first delivery is the current
    /// state again and is skipped; errors are never skipped.
    pub async fn subscribe_to_more_with(
        &self,
        request: &QueryRequest,
        overrides: SettingsOverride,
        mut callback: impl FnMut(Result<Value, ClientError>) + Send + 'static,
    ) -> Result<SubscriptionHandle, ClientError> {
        let snapshot = self.query_with(request, overrides).await?;
        callback(Ok(snapshot));
        self.subscribe_with(request, overrides, skip_first(callback))
            .await
    }
}

fn requested<P>(request: &IndexMap<String, P>) -> Vec<String> {
    request.keys().cloned().collect()
}

/// Drops the first successful delivery and forwards everything after it.
pub(crate) fn skip_first<F>(mut callback: F) -> impl FnMut(Result<Value, ClientError>) + Send + 'static
where
    F: FnMut(Result<Value, ClientError>) + Send + 'static,
{
    let mut skipped = false;
    move |delivery| {
        if skipped || delivery.is_err() {
            callback(delivery);
        } else {
            skipped = true;
        }
    }
}

fn ordinal(value: &Value) -> Option<u32> {
    match value {
        Value::Number(number) => number.as_u64().map(|n| n as u32),
        Value::String(text) => text.parse().ok(),
        _ => None,
    }
}
