//! A Hasura object-mapping client.
//!
//! Declarative per-table parameters are compiled into GraphQL documents by
//! [`hasura_om_core`] and executed here: queries and mutations over HTTP,
//! subscriptions over a multiplexed WebSocket connection, and schema
//! introspection over Hasura's SQL meta endpoint.

pub use hasura_om_core::*;

mod client;
mod client_config;
mod error;
mod introspection;
pub mod transport;

pub use client::Hasura;
pub use client::MutationRequest;
pub use client::QueryRequest;
pub use client_config::ClientConfig;
pub use error::ClientError;
pub use transport::websocket::SubscriptionHandle;

#[cfg(test)]
mod tests;
