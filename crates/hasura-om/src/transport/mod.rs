pub mod graphql;
pub mod websocket;

pub use graphql::GraphqlRequest;
pub use graphql::GraphqlTransport;
pub use websocket::SubscriptionHandle;
pub use websocket::WebsocketTransport;
